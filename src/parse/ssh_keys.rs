//! authorized_keys file parsing.

/// Filters an authorized_keys file down to its public key lines: every
/// non-empty line that isn't a comment is one key.
pub fn extract_public_keys(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
