//! Pretty JSON persistence shared by the index, records and patch document.

use crate::error::{RegistryError, Result};
use serde::Serialize;
use std::path::Path;

/// Render a value as two-space indented JSON with a trailing newline.
pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a value to `path`, overwriting any existing file.
pub fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let rendered = to_pretty_string(value)?;
    std::fs::write(path, rendered).map_err(|e| RegistryError::write_failure(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_string_keeps_unicode() {
        let rendered = to_pretty_string(&json!({"name": "Revisão de Código"})).unwrap();
        assert_eq!(rendered, "{\n  \"name\": \"Revisão de Código\"\n}\n");
    }

    #[test]
    fn test_write_pretty_missing_directory_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("record.json");
        let err = write_pretty(&path, &json!({})).unwrap_err();
        assert!(matches!(err, RegistryError::WriteFailure { .. }));
    }
}
