//! GitHub REST implementation of [`RepositorySource`].
//!
//! Read-only: repository metadata, language byte counts, the root listing and
//! single file contents. Authentication is optional; without a token the
//! unauthenticated rate limit applies.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::Deserialize;

use crate::config::Settings;
use crate::contract::RepositorySource;
use crate::error::SourceError;
use crate::model::{ContentEntry, EntryKind, LanguageBytes, RepoMetadata};

const USER_AGENT: &str = concat!("readme-gen/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
    owner: OwnerResponse,
    stargazers_count: u64,
    forks_count: u64,
    license: Option<LicenseResponse>,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client. An empty or blank token counts as no token; any other
    /// value is sent unmodified.
    pub fn new(settings: &Settings, token: Option<&str>) -> Result<Self, SourceError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let token = token
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        tracing::info!(
            base_url = %settings.github_api_base_url,
            authenticated = token.is_some(),
            "Initialized GitHubClient"
        );

        Ok(Self {
            client,
            base_url: settings.github_api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn get(&self, path: &str) -> Result<Response, SourceError> {
        self.get_url(&format!("{}{}", self.base_url, path)).await
    }

    /// `/repos/{repo}/contents/{path}` with every segment of `path` percent-encoded.
    fn contents_url(&self, repo: &str, path: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&format!("{}/repos/{repo}/contents", self.base_url))
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Transport(format!("invalid base URL {}", self.base_url)))?
            .extend(path.split('/'));
        Ok(url)
    }

    async fn get_url(&self, url: &str) -> Result<Response, SourceError> {
        tracing::debug!(url = %url, "GitHub API request");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = ?e, url = %url, "GitHub API request failed");
            SourceError::Transport(e.to_string())
        })?;
        check_status(response).await
    }
}

/// Turn non-success statuses into [`SourceError`], keeping GitHub's message.
async fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| status.to_string());
    tracing::debug!(status = %status, message = %message, "GitHub API returned error");

    Err(match status {
        StatusCode::NOT_FOUND => SourceError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            SourceError::Forbidden {
                status: status.as_u16(),
                message,
            }
        }
        _ => SourceError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, SourceError> {
    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::Decode(e.to_string()))
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn get_repository(&self, repo: &str) -> Result<RepoMetadata, SourceError> {
        tracing::info!(repo, "Fetching repository metadata");
        let response = self.get(&format!("/repos/{repo}")).await?;
        let raw: RepoResponse = decode_json(response).await?;
        Ok(RepoMetadata {
            name: raw.name,
            description: raw.description,
            owner: raw.owner.login,
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            license: raw.license.map(|l| l.name),
            html_url: raw.html_url,
        })
    }

    async fn get_languages(&self, repo: &str) -> Result<LanguageBytes, SourceError> {
        tracing::info!(repo, "Fetching language breakdown");
        let response = self.get(&format!("/repos/{repo}/languages")).await?;
        decode_json(response).await
    }

    async fn list_contents(&self, repo: &str) -> Result<Vec<ContentEntry>, SourceError> {
        tracing::info!(repo, "Fetching top-level contents");
        let response = self.get(&format!("/repos/{repo}/contents/")).await?;
        let raw: Vec<ContentResponse> = decode_json(response).await?;
        Ok(raw
            .into_iter()
            .map(|item| ContentEntry {
                kind: match item.item_type.as_str() {
                    "dir" => EntryKind::Dir,
                    "file" => EntryKind::File,
                    _ => EntryKind::Other,
                },
                name: item.name,
                path: item.path,
            })
            .collect())
    }

    async fn get_file_content(&self, repo: &str, path: &str) -> Result<Vec<u8>, SourceError> {
        tracing::debug!(repo, path, "Fetching file content");
        let url = self.contents_url(repo, path)?;
        let response = self.get_url(url.as_str()).await?;
        let file: FileResponse = decode_json(response).await?;
        if file.encoding != "base64" {
            return Err(SourceError::Decode(format!(
                "unsupported encoding '{}'",
                file.encoding
            )));
        }
        BASE64
            .decode(file.content.replace('\n', ""))
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}
