use semver::Version;

// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("AGENT_REGISTRY_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Next major release of an index version.
///
/// Loose versions such as `2.0` or `v3` are read by their leading number.
/// Anything without one counts as 0.0.0.
pub fn bump_major(version: &str) -> String {
    let major = current_major(version.trim());
    Version::new(major.saturating_add(1), 0, 0).to_string()
}

fn current_major(version: &str) -> u64 {
    if let Ok(parsed) = Version::parse(version) {
        return parsed.major;
    }

    let digits: String = version
        .trim_start_matches(['v', 'V'])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse() {
        Ok(major) => major,
        Err(_) => {
            if !version.is_empty() {
                tracing::warn!(version, "index version has no leading number, bumping from 0.0.0");
            }
            0
        }
    }
}
