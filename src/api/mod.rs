pub mod types;

use std::time::Duration;

use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;
use types::{ApiResponse, Character};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {detail}")]
    Status { status: u16, detail: String },
    #[error("deserialization error: {0}")]
    Deserialize(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("not an image (content type {0:?})")]
    NotAnImage(Option<String>),
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query for the first page of characters ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterQuery {
    pub order_by: &'static str,
    pub direction: &'static str,
    pub page: u32,
    pub size: u32,
}

impl Default for CharacterQuery {
    fn default() -> Self {
        Self {
            order_by: "id",
            direction: "asc",
            page: 1,
            size: 50,
        }
    }
}

impl CharacterQuery {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

pub struct FuturamaClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl FuturamaClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http_client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the full characters URL for a query.
    pub fn characters_url(&self, query: &CharacterQuery) -> Result<Url, ApiClientError> {
        let mut url = Url::parse(&format!("{}/characters", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("orderBy", query.order_by)
            .append_pair("orderByDirection", query.direction)
            .append_pair("page", &query.page.to_string())
            .append_pair("size", &query.size.to_string());
        Ok(url)
    }

    /// Fetch one page of characters.
    ///
    /// A body without `items` is an empty, successful page.
    pub async fn get_characters(
        &self,
        query: &CharacterQuery,
    ) -> Result<Vec<Character>, ApiClientError> {
        let url = self.characters_url(query)?;
        tracing::debug!(%url, "fetching characters");
        let resp = self.http_client.get(url).send().await?;
        let envelope: ApiResponse = self.handle_response(resp).await?;
        Ok(envelope.items.unwrap_or_default())
    }

    /// Check that `url` serves an image.
    pub async fn check_image(&self, url: &str) -> Result<(), ApiClientError> {
        let url = Url::parse(url)?;
        let resp = self.http_client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                detail: String::new(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        match content_type {
            Some(ref ct) if ct.starts_with("image/") => Ok(()),
            other => Err(ApiClientError::NotAnImage(other)),
        }
    }

    /// Check status and deserialize the body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: Response,
    ) -> Result<T, ApiClientError> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                detail: body,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str::<T>(&body)
            .map_err(|e| ApiClientError::Deserialize(format!("{e}: {body}")))
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single canned HTTP response on an ephemeral port.
    ///
    /// Returns the base URL and a receiver for the request head.
    pub async fn serve_once(
        status_line: &'static str,
        content_type: &'static str,
        body: impl Into<String>,
    ) -> (String, oneshot::Receiver<String>) {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{addr}"), rx)
    }
}
