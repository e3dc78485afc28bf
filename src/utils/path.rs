use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Expand a leading `~` or `~user` to the matching home directory.
///
/// Returns `None` when the home directory cannot be determined (no `HOME`,
/// unknown user). Paths without a leading tilde are returned unchanged.
///
/// ```
/// use agent_registry::utils::path::expand_tilde;
///
/// let path = expand_tilde("agents/specialized").unwrap();
/// assert_eq!(path.to_str(), Some("agents/specialized"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        let home = std::env::var("HOME").ok()?;
        return Some(PathBuf::from(home).join(after_tilde.trim_start_matches('/')));
    }

    let (username, rest) = match after_tilde.split_once('/') {
        Some((user, rest)) => (user, rest),
        None => (after_tilde, ""),
    };

    let user = uzers::get_user_by_name(username)?;
    Some(user.home_dir().join(rest))
}

/// Expand a user-supplied path, keeping it verbatim when expansion fails.
pub fn resolve_user_path(raw: &str) -> PathBuf {
    expand_tilde(raw).unwrap_or_else(|| PathBuf::from(raw))
}
