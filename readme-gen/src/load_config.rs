//! `load_config` module: locates and reads the local secrets file and merges it with
//! environment variables and CLI flags into the [`Credentials`] used for one run.
//!
//! The secrets file is the only durable state of the tool. It uses simple
//! `KEY = "value"` lines (TOML):
//!
//! ```toml
//! HUGGINGFACE_API_KEY = "hf_..."
//! GITHUB_TOKEN = "ghp_..." # optional
//! ```
//!
//! On first run the file is created with placeholder values; afterwards it is only read.
//! Placeholder or blank values count as unset.
//!
//! # Precedence
//! CLI flag, then environment variable (including a `.env` file), then secrets file.
//!
//! # Errors
//! All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const DEFAULT_SECRETS_PATH: &str = ".readme-gen/secrets.toml";
pub const API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

const API_KEY_PLACEHOLDER: &str = "your-hf-key-here";
const GITHUB_TOKEN_PLACEHOLDER: &str = "your-gh-token-here";

#[derive(Debug, Default, Deserialize)]
pub struct SecretsFile {
    #[serde(rename = "HUGGINGFACE_API_KEY", default)]
    pub huggingface_api_key: Option<String>,
    #[serde(rename = "GITHUB_TOKEN", default)]
    pub github_token: Option<String>,
}

/// Credentials resolved for one run. Either may be absent; the session
/// reports a missing API key before any network call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub github_token: Option<String>,
}

/// Create the secrets file with placeholder values if it does not exist.
/// Returns `true` when the file was created.
pub fn ensure_secrets_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    let template = format!(
        "{API_KEY_VAR} = \"{API_KEY_PLACEHOLDER}\"\n{GITHUB_TOKEN_VAR} = \"{GITHUB_TOKEN_PLACEHOLDER}\" # optional\n"
    );
    fs::write(path, template)
        .with_context(|| format!("Failed to write secrets file {:?}", path))?;
    info!(secrets_path = ?path, "Created secrets file with placeholder values");
    Ok(true)
}

/// Read and parse the secrets file. A missing file yields empty secrets.
pub fn load_secrets<P: AsRef<Path>>(path: P) -> Result<SecretsFile> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!(secrets_path = ?path_ref, "No secrets file, relying on flags and environment");
        return Ok(SecretsFile::default());
    }

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, secrets_path = ?path_ref, "Failed to read secrets file");
            return Err(anyhow::anyhow!(
                "Failed to read secrets file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match toml::from_str::<SecretsFile>(&content) {
        Ok(secrets) => {
            info!(secrets_path = ?path_ref, "Parsed secrets file successfully");
            Ok(secrets)
        }
        Err(e) => {
            error!(error = ?e, secrets_path = ?path_ref, "Failed to parse secrets file");
            Err(anyhow::anyhow!("Failed to parse secrets file {:?}: {e}", path_ref))
        }
    }
}

/// Merge flags, environment and the secrets file into [`Credentials`].
pub fn load_credentials<P: AsRef<Path>>(
    api_key_flag: Option<String>,
    github_token_flag: Option<String>,
    secrets_path: P,
) -> Result<Credentials> {
    let secrets = load_secrets(secrets_path)?;

    let api_key = pick(
        api_key_flag,
        std::env::var(API_KEY_VAR).ok(),
        secrets.huggingface_api_key,
        API_KEY_PLACEHOLDER,
    );
    let github_token = pick(
        github_token_flag,
        std::env::var(GITHUB_TOKEN_VAR).ok(),
        secrets.github_token,
        GITHUB_TOKEN_PLACEHOLDER,
    );

    info!(
        api_key_set = api_key.is_some(),
        github_token_set = github_token.is_some(),
        "Credentials resolved"
    );
    Ok(Credentials {
        api_key,
        github_token,
    })
}

fn pick(
    flag: Option<String>,
    env: Option<String>,
    file: Option<String>,
    placeholder: &str,
) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty() && v != placeholder)
}
