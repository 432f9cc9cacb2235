use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Http,
    Network,
}

/// Terminal failure of a single command attempt. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DispatchError {
    /// The command was never sent.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The device answered with something other than 200.
    #[error("device returned http status {0}")]
    Http(u16),
    /// Timeout, refused connection, DNS failure or a broken response body.
    #[error("network failure: {0}")]
    Network(String),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::Http(_) => ErrorKind::Http,
            DispatchError::Network(_) => ErrorKind::Network,
        }
    }

    /// Text shown to the operator for this failure.
    pub fn notification(&self) -> String {
        match self {
            DispatchError::Validation(_) => "Please enter ESP32 IP address".to_string(),
            DispatchError::Http(code) => format!("Error: Response code {code}"),
            DispatchError::Network(message) => format!("Error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command path '{0}'")]
    UnknownPath(String),
    #[error("invalid speed '{0}': expected an integer in 0..=100")]
    InvalidSpeed(String),
}
