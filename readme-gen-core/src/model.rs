use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ReadmeError;

/// Placeholder used when the repository has no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Everything the prompt needs to know about one repository.
///
/// Built once per analysis by [`crate::reader`]; held by the
/// [`crate::session::Session`] until the next analysis replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    pub license: Option<String>,
    pub url: String,
    /// Language name to share of total bytes, in percent with one decimal.
    /// Empty (never absent) when the language query failed.
    pub languages: BTreeMap<String, f64>,
    /// One `- name` / `- name/` line per top-level entry, at most 20.
    pub structure: Vec<String>,
    /// Head of each readable text file among the listed entries.
    pub key_files: Vec<KeyFile>,
}

/// The first characters (at most 1000) of one top-level text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    pub name: String,
    pub excerpt: String,
}

/// Result of a repository analysis: the info plus the non-fatal warnings
/// raised while collecting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub info: RepositoryInfo,
    pub warnings: Vec<ReadmeError>,
}

/// Generated README text and when it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReadme {
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl GeneratedReadme {
    pub fn new(content: String) -> Self {
        Self {
            content,
            created_at: Local::now(),
        }
    }

    pub fn caption(&self) -> String {
        format!("Generated on {}", self.created_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Repository metadata as returned by a [`crate::contract::RepositorySource`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepoMetadata {
    pub name: String,
    pub description: Option<String>,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    pub license: Option<String>,
    pub html_url: String,
}

/// Byte count per language, as reported by the hosting API.
pub type LanguageBytes = BTreeMap<String, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Symlinks and submodules: listed, never read.
    Other,
}

/// One top-level entry of the repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}

impl ContentEntry {
    pub fn display_line(&self) -> String {
        match self.kind {
            EntryKind::Dir => format!("- {}/", self.name),
            _ => format!("- {}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_get_a_trailing_slash() {
        let dir = ContentEntry {
            name: "src".into(),
            path: "src".into(),
            kind: EntryKind::Dir,
        };
        let file = ContentEntry {
            name: "main.py".into(),
            path: "main.py".into(),
            kind: EntryKind::File,
        };
        assert_eq!(dir.display_line(), "- src/");
        assert_eq!(file.display_line(), "- main.py");
    }

    #[test]
    fn caption_uses_local_timestamp_format() {
        let readme = GeneratedReadme::new("# x".into());
        let caption = readme.caption();
        assert!(caption.starts_with("Generated on "));
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(caption.len(), "Generated on ".len() + 19);
    }
}
