//! Panel events and error modeling for the panel controller.

use client_core::session::DispatchOutcome;
use shared::{error::DispatchError, protocol::CommandRequest};

pub const SUCCESS_NOTIFICATION: &str = "Command sent successfully";

pub enum UiEvent {
    /// One line typed by the operator.
    Input(String),
    InputClosed,
    Info(String),
    Error(UiError),
    CommandCompleted {
        request: CommandRequest,
        outcome: DispatchOutcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Http,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Input,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("unknown command")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_dispatch(err: &DispatchError) -> Self {
        let category = match err {
            DispatchError::Validation(_) => UiErrorCategory::Validation,
            DispatchError::Http(_) => UiErrorCategory::Http,
            DispatchError::Network(_) => UiErrorCategory::Transport,
        };
        Self {
            category,
            context: UiErrorContext::Dispatch,
            message: err.notification(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Operator-facing text for a finished command.
pub fn notification_for(outcome: &DispatchOutcome) -> Result<String, UiError> {
    match outcome {
        Ok(_) => Ok(SUCCESS_NOTIFICATION.to_string()),
        Err(err) => Err(UiError::from_dispatch(err)),
    }
}

#[cfg(test)]
#[path = "../tests/events_tests.rs"]
mod tests;
