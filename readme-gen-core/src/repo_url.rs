//! Repository URL normalization and `owner/name` path extraction.
//!
//! Pure string handling, no I/O: the reader runs this before building any
//! client, so a rejected URL never costs a network call.

use crate::error::{ReadmeError, Result};

/// Host marker every accepted URL must contain.
pub const HOST_MARKER: &str = "github.com";

/// Trim the input and prepend `https://` when no http(s) scheme is present.
/// Fails when the result does not reference GitHub.
pub fn normalize(repo_url: &str) -> Result<String> {
    let trimmed = repo_url.trim();
    if trimmed.is_empty() {
        return Err(ReadmeError::InvalidInput(
            "repository URL is empty".to_string(),
        ));
    }

    let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if !url.to_lowercase().contains(HOST_MARKER) {
        return Err(ReadmeError::InvalidInput(format!(
            "URL must be from GitHub: {url}"
        )));
    }
    Ok(url)
}

/// Extract `owner/name` from a normalized URL: the text after `github.com/`,
/// cut at any query or fragment, without a `.git` suffix and without
/// surrounding slashes.
pub fn repo_path(url: &str) -> Result<String> {
    let marker = format!("{HOST_MARKER}/");
    let start = url
        .to_ascii_lowercase()
        .find(&marker)
        .map(|idx| idx + marker.len())
        .ok_or_else(|| {
            ReadmeError::InvalidInput(format!("no repository path found in {url}"))
        })?;

    let rest = &url[start..];
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let mut path = rest[..end].trim_matches('/');
    if let Some(stripped) = path.strip_suffix(".git") {
        path = stripped.trim_end_matches('/');
    }

    if path.is_empty() {
        return Err(ReadmeError::InvalidInput(format!(
            "no repository path found in {url}"
        )));
    }
    Ok(path.to_string())
}

/// [`normalize`] followed by [`repo_path`].
pub fn parse(repo_url: &str) -> Result<String> {
    let url = normalize(repo_url)?;
    repo_path(&url)
}
