use serde::{Deserialize, Serialize};
use thiserror::Error;

const FALLBACK_STATUS: u16 = 500;

/// A normalized API failure.
///
/// Every failure of a remote read is converted into this shape before it
/// reaches the state container.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Error {status}: {message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        ApiError {
            message: message.into(),
            status,
        }
    }

    /// Convert a raw failure into an `ApiError`, using the fallback messages
    /// of the read that failed.
    pub fn normalize(failure: Failure, context: &FetchContext) -> Self {
        match failure {
            Failure::Status { code, reason } => {
                let status = if code == 0 { FALLBACK_STATUS } else { code };
                match reason.filter(|r| !r.is_empty()) {
                    Some(reason) => ApiError::new(reason, status),
                    None => ApiError::new(context.transport_message(), status),
                }
            }
            Failure::Transport(detail) => {
                tracing::debug!("No response while {}: {}", context, detail);
                ApiError::new(context.transport_message(), FALLBACK_STATUS)
            }
            Failure::Other(detail) => {
                tracing::debug!("Unexpected failure while {}: {}", context, detail);
                ApiError::new(context.unexpected_message(), FALLBACK_STATUS)
            }
        }
    }
}

/// The shape of a failure before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The server answered with a non-success status.
    Status { code: u16, reason: Option<String> },
    /// The request never got a response (connect error, timeout).
    Transport(String),
    /// Anything else, such as an undecodable body.
    Other(String),
}

/// Which read was in flight when a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchContext {
    Networks,
    Stations { network_id: String },
}

impl FetchContext {
    fn transport_message(&self) -> &'static str {
        match self {
            FetchContext::Networks => "Failed to fetch networks",
            FetchContext::Stations { .. } => "Failed to fetch stations",
        }
    }

    fn unexpected_message(&self) -> String {
        match self {
            FetchContext::Networks => {
                "An unexpected error occurred while fetching networks".to_string()
            }
            FetchContext::Stations { network_id } => format!(
                "An unexpected error occurred while fetching stations for network {}",
                network_id
            ),
        }
    }
}

impl std::fmt::Display for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchContext::Networks => write!(f, "fetching networks"),
            FetchContext::Stations { network_id } => {
                write!(f, "fetching stations for network {}", network_id)
            }
        }
    }
}
