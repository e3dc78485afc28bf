//! File name derivation for agent records.

/// Lowercase the name and replace spaces with hyphens.
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// Record file name for a sequence number: `NN-slug.json`.
pub fn record_file_name(sequence: u64, name: &str) -> String {
    format!("{:02}-{}.json", sequence, slugify(name))
}

/// True if `file_name` contains the slug of `name`, ignoring case.
pub fn matches_name(file_name: &str, name: &str) -> bool {
    file_name.to_lowercase().contains(&slugify(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Code Architect"), "code-architect");
        assert_eq!(slugify("DevOps Engineer"), "devops-engineer");
        assert_eq!(slugify("API Designer"), "api-designer");
    }

    #[test]
    fn test_record_file_name_pads_sequence() {
        assert_eq!(record_file_name(1, "Code Architect"), "01-code-architect.json");
        assert_eq!(
            record_file_name(51, "Research Specialist"),
            "51-research-specialist.json"
        );
        assert_eq!(record_file_name(100, "Bug Hunter"), "100-bug-hunter.json");
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        assert!(matches_name("04-Security-Guardian.json", "Security Guardian"));
        assert!(matches_name("04-security-guardian.json", "security guardian"));
        assert!(!matches_name("04-security-guardian.json", "Bug Hunter"));
    }
}
