// src/infrastructure/github.rs
use crate::application::NoteRepository;
use crate::constants::{API_ROOT, CONNECT_TIMEOUT_SECS, NOTES_DIR};
use crate::domain::{Config, DomainError, NoteEntry};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// One entry of a Contents API listing or file-metadata response.
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    sha: String,
    url: String,
}

impl From<ContentsEntry> for NoteEntry {
    fn from(entry: ContentsEntry) -> Self {
        NoteEntry {
            name: entry.name,
            url: entry.url,
            sha: entry.sha,
        }
    }
}

#[derive(Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    message: &'a str,
    sha: &'a str,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// GitHub Contents API adapter for the [`NoteRepository`] port.
///
/// All notes live under the fixed `notes/` path of the configured
/// repository. Requests are issued one at a time; there are no retries.
pub struct GithubNoteRepository {
    client: Client,
    config: Config,
}

impl GithubNoteRepository {
    pub fn new(config: Config) -> Result<Self, DomainError> {
        if !config.is_valid() {
            return Err(DomainError::ConfigMissing);
        }

        // The API rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(concat!("gitnotes/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        info!(
            account = %config.account,
            repository = %config.repository,
            "GitHub note repository ready"
        );
        Ok(Self { client, config })
    }

    fn contents_url(&self, name: Option<&str>) -> String {
        let base = format!(
            "{API_ROOT}/repos/{}/{}/contents/{NOTES_DIR}",
            self.config.account, self.config.repository
        );
        match name {
            Some(name) => format!("{base}/{name}"),
            None => base,
        }
    }

    fn request(&self, method: Method, url: &str, accept: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("token {}", self.config.token))
            .header(header::ACCEPT, accept)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        request
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))
    }
}

/// Map a non-2xx response to a domain error, preferring the API's own
/// `message` field over the bare status line.
async fn api_error(response: Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());

    DomainError::Http {
        status: status.as_u16(),
        message,
    }
}

/// Listing post-processing: keep only Markdown files and sort descending by
/// name. Names embed a zero-padded timestamp, so this is recency order.
fn listing_to_entries(entries: Vec<ContentsEntry>) -> Vec<NoteEntry> {
    let mut notes: Vec<NoteEntry> = entries
        .into_iter()
        .filter(|entry| entry.name.ends_with(".md"))
        .map(NoteEntry::from)
        .collect();
    notes.sort_by(|a, b| b.name.cmp(&a.name));
    notes
}

/// Decode a directory-listing body into sorted note entries.
fn parse_listing(body: &str) -> Result<Vec<NoteEntry>, DomainError> {
    let entries: Vec<ContentsEntry> =
        serde_json::from_str(body).map_err(|e| DomainError::InvalidResponse(e.to_string()))?;
    Ok(listing_to_entries(entries))
}

#[async_trait]
impl NoteRepository for GithubNoteRepository {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<NoteEntry>, DomainError> {
        let url = self.contents_url(None);
        let response = self
            .send(self.request(Method::GET, &url, ACCEPT_JSON))
            .await?;

        // The notes directory not existing yet just means no notes.
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Notes directory missing, treating as empty");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::InvalidResponse(e.to_string()))?;
        parse_listing(&body)
    }

    #[instrument(level = "debug", skip(self, entry), fields(name = %entry.name))]
    async fn read_note(&self, entry: &NoteEntry) -> Result<String, DomainError> {
        let response = self
            .send(self.request(Method::GET, &entry.url, ACCEPT_RAW))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NoteNotFound(entry.name.clone()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::InvalidResponse(e.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_entry(&self, name: &str) -> Result<NoteEntry, DomainError> {
        let url = self.contents_url(Some(name));
        let response = self
            .send(self.request(Method::GET, &url, ACCEPT_JSON))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NoteNotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let entry: ContentsEntry = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidResponse(e.to_string()))?;

        Ok(entry.into())
    }

    #[instrument(level = "debug", skip(self, content))]
    async fn put_note(
        &self,
        name: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<(), DomainError> {
        let url = self.contents_url(Some(name));
        let body = PutBody {
            message,
            content: BASE64.encode(content.as_bytes()),
            sha,
        };
        let response = self
            .send(self.request(Method::PUT, &url, ACCEPT_JSON).json(&body))
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(DomainError::Conflict(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(%name, "Note written");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, name: &str, message: &str, sha: &str) -> Result<(), DomainError> {
        let url = self.contents_url(Some(name));
        let body = DeleteBody { message, sha };
        let response = self
            .send(self.request(Method::DELETE, &url, ACCEPT_JSON).json(&body))
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(DomainError::Conflict(name.to_string()));
        }
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NoteNotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(%name, "Note deleted");
        Ok(())
    }
}
