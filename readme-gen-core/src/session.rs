//! Session: the explicit state one user carries between actions.
//!
//! A [`Session`] owns the last [`RepositoryInfo`], the warnings raised while
//! building it, and the last [`GeneratedReadme`]. [`Session::trigger`] is the
//! single "generate" action: Reader, then Composer, then Client, strictly in
//! sequence.
//!
//! # State transitions
//! - blank API key or URL: error, nothing changes, no network call
//! - analysis fails: error, previous info and readme stay as they were
//! - analysis succeeds: info and warnings replaced, old readme cleared
//! - generation fails: error, the new info stays, no readme
//! - generation succeeds: readme stored with its timestamp
//!
//! Nothing is retried.

use tracing::{error, info};

use crate::contract::{RepositorySource, TextGenerator};
use crate::error::{ReadmeError, Result};
use crate::model::{GeneratedReadme, RepositoryInfo};
use crate::prompt;
use crate::reader;

/// Inputs of one generate action.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub api_key: String,
    pub repo_url: String,
    pub instructions: String,
}

impl GenerateRequest {
    /// Both the API key and the repository URL are required.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ReadmeError::MissingCredential(
                "Hugging Face API key".to_string(),
            ));
        }
        if self.repo_url.trim().is_empty() {
            return Err(ReadmeError::MissingCredential(
                "GitHub repository URL".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Session {
    repo_info: Option<RepositoryInfo>,
    warnings: Vec<ReadmeError>,
    readme: Option<GeneratedReadme>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo_info(&self) -> Option<&RepositoryInfo> {
        self.repo_info.as_ref()
    }

    /// Warnings of the analysis that produced the current [`RepositoryInfo`].
    pub fn warnings(&self) -> &[ReadmeError] {
        &self.warnings
    }

    pub fn readme(&self) -> Option<&GeneratedReadme> {
        self.readme.as_ref()
    }

    /// Drop everything held by the session.
    pub fn reset(&mut self) {
        self.repo_info = None;
        self.warnings.clear();
        self.readme = None;
    }

    /// Run Reader, Composer and Client for one request, updating the session state.
    pub async fn trigger<S, G>(
        &mut self,
        request: &GenerateRequest,
        source: &S,
        generator: &G,
    ) -> Result<()>
    where
        S: RepositorySource + ?Sized,
        G: TextGenerator + ?Sized,
    {
        request.validate()?;

        self.analyze(&request.repo_url, source).await?;
        self.generate(&request.instructions, &request.api_key, generator)
            .await?;
        Ok(())
    }

    /// Reader step only. On success the stored info is replaced and any readme
    /// derived from the previous info is cleared.
    pub async fn analyze<S>(&mut self, repo_url: &str, source: &S) -> Result<&RepositoryInfo>
    where
        S: RepositorySource + ?Sized,
    {
        let analysis = reader::fetch_with(source, repo_url).await.map_err(|e| {
            error!(kind = e.kind(), error = %e, "Repository analysis failed");
            e
        })?;

        self.warnings = analysis.warnings;
        self.readme = None;
        Ok(self.repo_info.insert(analysis.info))
    }

    /// Composer and Client steps over the stored [`RepositoryInfo`].
    pub async fn generate<G>(
        &mut self,
        instructions: &str,
        api_key: &str,
        generator: &G,
    ) -> Result<&GeneratedReadme>
    where
        G: TextGenerator + ?Sized,
    {
        let info = self.repo_info.as_ref().ok_or_else(|| {
            ReadmeError::GenerationFailed("no repository has been analyzed".to_string())
        })?;

        let prompt = prompt::compose(info, instructions);
        let text = generator.generate(&prompt, api_key).await.map_err(|e| {
            error!(kind = e.kind(), error = %e, "README generation failed");
            match e {
                ReadmeError::GenerationFailed(_) => e,
                other => ReadmeError::GenerationFailed(other.to_string()),
            }
        })?;

        info!(repo = %info.name, "README stored in session");
        Ok(self.readme.insert(GeneratedReadme::new(text)))
    }
}
