//! HTTP seam used by the dispatcher.

use std::{error::Error as _, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::SUCCESS_STATUS;
use thiserror::Error;
use tracing::debug;

/// Status line and body of whatever the device answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message, timed_out }
    }
}

#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Performs one GET. Never retries.
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CommandTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) if status == SUCCESS_STATUS => return Err(err.into()),
            // the status already decides the outcome
            Err(err) => {
                debug!(status, "discarding unreadable error body: {err}");
                String::new()
            }
        };
        Ok(TransportResponse { status, body })
    }
}
