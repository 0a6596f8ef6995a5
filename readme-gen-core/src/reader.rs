//! Repository Reader: builds a [`RepositoryInfo`] from a repository URL.
//!
//! Four independent remote steps, each with its own failure policy:
//!
//! | step            | on failure                                          |
//! |-----------------|-----------------------------------------------------|
//! | metadata        | fatal, aborts with no result                        |
//! | languages       | warning, `languages` stays empty                    |
//! | root listing    | warning, `structure` and `key_files` stay empty     |
//! | key file fetch  | silent, that file is left out of `key_files`        |
//!
//! The URL is validated before any client is constructed, so invalid input
//! never reaches the network.

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::contract::RepositorySource;
use crate::error::{ReadmeError, Result, SourceError};
use crate::github::GitHubClient;
use crate::model::{
    Analysis, ContentEntry, EntryKind, KeyFile, LanguageBytes, RepositoryInfo, NO_DESCRIPTION,
};

/// Maximum number of top-level entries kept in `structure`.
pub const MAX_STRUCTURE_ENTRIES: usize = 20;
/// Maximum number of characters kept from each key file.
pub const MAX_EXCERPT_CHARS: usize = 1000;
/// File extensions whose content is read into `key_files`.
pub const KEY_FILE_EXTENSIONS: [&str; 4] = [".py", ".js", ".md", ".txt"];

/// Analyze a GitHub repository with the default settings.
///
/// An absent or empty `auth_token` still allows reading public repositories.
pub async fn fetch(repo_url: &str, auth_token: Option<&str>) -> Result<Analysis> {
    fetch_with_settings(&Settings::from_env(), repo_url, auth_token).await
}

/// Like [`fetch`], with explicit endpoint settings.
pub async fn fetch_with_settings(
    settings: &Settings,
    repo_url: &str,
    auth_token: Option<&str>,
) -> Result<Analysis> {
    // Validate first: a bad URL must not cost a client or a request.
    crate::repo_url::parse(repo_url)?;
    let client = GitHubClient::new(settings, auth_token)
        .map_err(|e| ReadmeError::RepositoryUnreachable(e.to_string()))?;
    fetch_with(&client, repo_url).await
}

/// Analyze a repository through any [`RepositorySource`].
pub async fn fetch_with<S>(source: &S, repo_url: &str) -> Result<Analysis>
where
    S: RepositorySource + ?Sized,
{
    let repo = crate::repo_url::parse(repo_url).map_err(|e| {
        error!(repo_url, error = %e, "Rejected repository URL");
        e
    })?;
    info!(repo = %repo, "Analyzing repository");

    let metadata = source
        .get_repository(&repo)
        .await
        .map_err(|e| metadata_error(&repo, e))?;

    let mut warnings = Vec::new();

    let languages = match source.get_languages(&repo).await {
        Ok(bytes) => match language_percentages(&bytes) {
            Some(languages) => languages,
            None => {
                let w = ReadmeError::LanguageDataUnavailable(
                    "language byte counts total zero".to_string(),
                );
                warn!(repo = %repo, warning = %w, "Language data degraded");
                warnings.push(w);
                BTreeMap::new()
            }
        },
        Err(e) => {
            let w = ReadmeError::LanguageDataUnavailable(e.to_string());
            warn!(repo = %repo, warning = %w, "Language data degraded");
            warnings.push(w);
            BTreeMap::new()
        }
    };

    let (structure, key_files) = match source.list_contents(&repo).await {
        Ok(entries) => read_structure(source, &repo, entries).await,
        Err(e) => {
            let w = ReadmeError::StructureUnavailable(e.to_string());
            warn!(repo = %repo, warning = %w, "Structure degraded");
            warnings.push(w);
            (Vec::new(), Vec::new())
        }
    };

    let info = RepositoryInfo {
        name: metadata.name,
        description: metadata
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        owner: metadata.owner,
        stars: metadata.stars,
        forks: metadata.forks,
        license: metadata.license,
        url: metadata.html_url,
        languages,
        structure,
        key_files,
    };

    info!(
        repo = %repo,
        languages = info.languages.len(),
        entries = info.structure.len(),
        key_files = info.key_files.len(),
        warnings = warnings.len(),
        "Repository analysis complete"
    );
    Ok(Analysis { info, warnings })
}

fn metadata_error(repo: &str, e: SourceError) -> ReadmeError {
    error!(repo, error = %e, "Failed to access repository");
    match e {
        SourceError::NotFound(message) => {
            ReadmeError::RepositoryNotFound(format!("{repo}: {message}"))
        }
        SourceError::Forbidden { status, message } => {
            ReadmeError::AccessDenied(format!("{repo}: HTTP {status}: {message}"))
        }
        other => ReadmeError::RepositoryUnreachable(format!("{repo}: {other}")),
    }
}

/// `100 * bytes / total`, rounded to one decimal place.
///
/// Returns an empty map for an empty input, and `None` when entries exist but
/// their byte counts sum to zero.
pub fn language_percentages(bytes: &LanguageBytes) -> Option<BTreeMap<String, f64>> {
    if bytes.is_empty() {
        return Some(BTreeMap::new());
    }
    let total: u64 = bytes.values().sum();
    if total == 0 {
        return None;
    }
    Some(
        bytes
            .iter()
            .map(|(lang, count)| {
                let pct = 100.0 * *count as f64 / total as f64;
                (lang.clone(), (pct * 10.0).round() / 10.0)
            })
            .collect(),
    )
}

/// Render the first [`MAX_STRUCTURE_ENTRIES`] entries and read the key files among them.
async fn read_structure<S>(
    source: &S,
    repo: &str,
    entries: Vec<ContentEntry>,
) -> (Vec<String>, Vec<KeyFile>)
where
    S: RepositorySource + ?Sized,
{
    let mut structure = Vec::new();
    let mut key_files = Vec::new();

    for entry in entries.into_iter().take(MAX_STRUCTURE_ENTRIES) {
        structure.push(entry.display_line());
        if !is_key_file(&entry) {
            continue;
        }
        match fetch_excerpt(source, repo, &entry).await {
            Ok(excerpt) => key_files.push(excerpt),
            // FileDecodeSkipped: not surfaced to the user.
            Err(e) => debug!(repo, file = %entry.path, error = %e, "Key file skipped"),
        }
    }
    (structure, key_files)
}

pub fn is_key_file(entry: &ContentEntry) -> bool {
    entry.kind == EntryKind::File
        && KEY_FILE_EXTENSIONS
            .iter()
            .any(|ext| entry.name.ends_with(ext))
}

async fn fetch_excerpt<S>(source: &S, repo: &str, entry: &ContentEntry) -> Result<KeyFile>
where
    S: RepositorySource + ?Sized,
{
    let skipped = |reason: String| ReadmeError::FileDecodeSkipped {
        file: entry.path.clone(),
        reason,
    };
    let bytes = source
        .get_file_content(repo, &entry.path)
        .await
        .map_err(|e| skipped(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| skipped(e.to_string()))?;
    Ok(KeyFile {
        name: entry.name.clone(),
        excerpt: truncate_chars(&text, MAX_EXCERPT_CHARS).to_string(),
    })
}

/// First `max` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
