use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Index not found: {0}")]
    MissingIndex(PathBuf),

    #[error("Malformed index {path}: {reason}")]
    MalformedIndex { path: PathBuf, reason: String },

    #[error("Agent '{0}' already exists in the index")]
    DuplicateAgent(String),

    #[error("Agent '{agent}' matches more than one record file: {}", format_paths(.candidates))]
    AmbiguousRecord {
        agent: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Malformed agent record {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("Malformed patch document {path}: {reason}")]
    MalformedPatch { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid built-in catalogue: {0}")]
    Catalogue(String),
}

impl RegistryError {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegistryError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_record_lists_candidates() {
        let err = RegistryError::AmbiguousRecord {
            agent: "API Designer".to_string(),
            candidates: vec![
                PathBuf::from("05-api-designer.json"),
                PathBuf::from("60-graphql-api-designer.json"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("'API Designer'"));
        assert!(msg.contains("05-api-designer.json, 60-graphql-api-designer.json"));
    }

    #[test]
    fn test_write_failure_names_path() {
        let err = RegistryError::write_failure(
            "/readonly/01-code-architect.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err
            .to_string()
            .starts_with("Failed to write /readonly/01-code-architect.json"));
    }
}
