use std::fmt;

use playground_core::{AttemptId, ExtractionResponse, PositionId};

/// One extraction request as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    pub position_id: PositionId,
    pub attempt: AttemptId,
    pub url: String,
    pub credential: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ExtractionCompleted {
        position_id: PositionId,
        attempt: AttemptId,
        result: Result<ExtractionResponse, FetchError>,
    },
}

/// Failure of a single extraction request. `message` is the underlying
/// transport, status or parse error text and is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
