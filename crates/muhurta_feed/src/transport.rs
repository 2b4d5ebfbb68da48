//! HTTP transport behind a trait so fetching is testable offline.

use std::time::Duration;

use crate::error::FeedError;

pub const USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches a document body by URL.
pub trait FeedTransport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Blocking `reqwest` client; any status other than 200 is a failure.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl FeedTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FeedError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| FeedError::Transport(e.to_string()))
    }
}
