use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client as HttpClient, StatusCode};
use thiserror::Error;

use crate::config::FeedConfig;

mod parse;
pub mod types;

pub use types::{FeedItem, Latest};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request timed out")]
    Timeout,
    #[error("http error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("feed returned {0}")]
    Status(StatusCode),
    #[error("malformed feed document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FeedError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { FeedError::Timeout } else { FeedError::Transport(err) }
    }

    /// Transport and status failures may clear up by the next scheduled run.
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Timeout | FeedError::Transport(_) | FeedError::Status(_))
    }
}

/// Anything that can report the latest filing for the configured entity.
#[async_trait]
pub trait FilingSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<Latest, FeedError>;
}

/// Reads the SEC submissions document over HTTPS.
#[derive(Clone)]
pub struct SecClient {
    http: HttpClient,
    url: String,
}

impl SecClient {
    pub fn new(cfg: &FeedConfig) -> Result<Self, FeedError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(FeedError::from_reqwest)?;
        Ok(Self { http, url: cfg.url() })
    }

    pub fn url(&self) -> &str { &self.url }

    async fn fetch_document(&self) -> Result<Bytes, FeedError> {
        let response = self.http.get(&self.url).send().await.map_err(FeedError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        response.bytes().await.map_err(FeedError::from_reqwest)
    }
}

#[async_trait]
impl FilingSource for SecClient {
    async fn fetch_latest(&self) -> Result<Latest, FeedError> {
        let body = self.fetch_document().await?;
        let doc = parse::parse_submissions(&body)?;
        Ok(parse::extract_latest(&doc))
    }
}
