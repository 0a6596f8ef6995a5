//! Download artifact for a generated README.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub const DEFAULT_FILENAME: &str = "README.md";

/// A named markdown file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    filename: String,
    content: String,
}

impl DownloadArtifact {
    /// A blank filename falls back to [`DEFAULT_FILENAME`].
    pub fn new(content: impl Into<String>, filename: &str) -> Self {
        let filename = filename.trim();
        let filename = if filename.is_empty() {
            DEFAULT_FILENAME
        } else {
            filename
        };
        Self {
            filename: filename.to_string(),
            content: content.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Base64 of the UTF-8 content.
    pub fn base64(&self) -> String {
        BASE64.encode(self.content.as_bytes())
    }

    pub fn data_uri(&self) -> String {
        format!("data:file/markdown;base64,{}", self.base64())
    }

    /// HTML anchor that saves the file client-side when clicked.
    pub fn html_link(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">Download {}</a>"#,
            self.data_uri(),
            self.filename,
            self.filename
        )
    }

    /// Write the file into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, self.content.as_bytes())?;
        tracing::info!(path = %path.display(), bytes = self.content.len(), "README written");
        Ok(path)
    }
}
