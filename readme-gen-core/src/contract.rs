#![allow(unused)]

//! # contract: the two network seams of the pipeline
//!
//! The pipeline talks to the outside world through exactly two traits:
//!
//! - [`RepositorySource`]: read-only access to a source-hosting API
//!   (metadata, language byte counts, top-level listing, file content).
//! - [`TextGenerator`]: a hosted text-generation endpoint.
//!
//! Production implementations live in [`crate::github`] and
//! [`crate::generation`]. Both traits are annotated for `mockall`, so tests
//! (in this crate, and in dependents through the `test-export-mocks`
//! feature) can drive the reader and the session without any network.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

use crate::error::{ReadmeError, SourceError};
use crate::model::{ContentEntry, LanguageBytes, RepoMetadata};

/// Read-only access to a repository on a hosting service.
///
/// `repo` is always the `owner/name` path extracted by [`crate::repo_url`].
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch the repository metadata (name, owner, counts, license).
    async fn get_repository(&self, repo: &str) -> Result<RepoMetadata, SourceError>;

    /// Fetch byte counts per language.
    async fn get_languages(&self, repo: &str) -> Result<LanguageBytes, SourceError>;

    /// List the top-level entries of the repository, in API order.
    async fn list_contents(&self, repo: &str) -> Result<Vec<ContentEntry>, SourceError>;

    /// Fetch the raw (already base64-decoded) bytes of one file.
    async fn get_file_content(&self, repo: &str, path: &str) -> Result<Vec<u8>, SourceError>;
}

/// A hosted text-generation endpoint.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the prompt and return the full generated text.
    ///
    /// Implementations must map every failure to [`ReadmeError::GenerationFailed`]
    /// and must not retry.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, ReadmeError>;
}
