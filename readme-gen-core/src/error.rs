//! Error types shared by the reader, the generation client and the session.
//!
//! Failures come in three tiers, see [`Severity`]:
//! - fatal errors abort the current action,
//! - warnings degrade a field to empty and are surfaced to the user,
//! - silent skips drop a single key file and are only logged at debug level.

use thiserror::Error;

/// Convenience alias used across the core crate.
pub type Result<T> = std::result::Result<T, ReadmeError>;

/// How an error is handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Warning,
    Silent,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadmeError {
    /// Malformed repository URL, or one that does not point at GitHub.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// Private repository, bad token, or the unauthenticated rate limit was hit.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The hosting API could not be reached or answered with an unexpected status.
    #[error("Repository unreachable: {0}")]
    RepositoryUnreachable(String),

    #[error("Could not retrieve language data: {0}")]
    LanguageDataUnavailable(String),

    #[error("Couldn't load full structure: {0}")]
    StructureUnavailable(String),

    #[error("Skipped key file {file}: {reason}")]
    FileDecodeSkipped { file: String, reason: String },

    /// A required input was left blank; raised before any network call.
    #[error("Missing credential: please enter your {0}")]
    MissingCredential(String),

    #[error("README generation failed: {0}")]
    GenerationFailed(String),
}

impl ReadmeError {
    pub fn severity(&self) -> Severity {
        match self {
            ReadmeError::LanguageDataUnavailable(_) | ReadmeError::StructureUnavailable(_) => {
                Severity::Warning
            }
            ReadmeError::FileDecodeSkipped { .. } => Severity::Silent,
            _ => Severity::Fatal,
        }
    }

    /// Short, stable name of the failure kind, used in user-facing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ReadmeError::InvalidInput(_) => "InvalidInput",
            ReadmeError::RepositoryNotFound(_) => "RepositoryNotFound",
            ReadmeError::AccessDenied(_) => "AccessDenied",
            ReadmeError::RepositoryUnreachable(_) => "RepositoryUnreachable",
            ReadmeError::LanguageDataUnavailable(_) => "LanguageDataUnavailable",
            ReadmeError::StructureUnavailable(_) => "StructureUnavailable",
            ReadmeError::FileDecodeSkipped { .. } => "FileDecodeSkipped",
            ReadmeError::MissingCredential(_) => "MissingCredential",
            ReadmeError::GenerationFailed(_) => "GenerationFailed",
        }
    }

    /// True for the failures of the repository analysis step, where the
    /// troubleshooting hints (typos, private repo, token, rate limit) apply.
    pub fn is_repository_failure(&self) -> bool {
        matches!(
            self,
            ReadmeError::InvalidInput(_)
                | ReadmeError::RepositoryNotFound(_)
                | ReadmeError::AccessDenied(_)
                | ReadmeError::RepositoryUnreachable(_)
        )
    }
}

/// Transport-level failure of a [`crate::contract::RepositorySource`] call.
/// The reader maps these onto [`ReadmeError`] depending on which call failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Forbidden { status: u16, message: String },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}
