use thiserror::Error;

use crate::errors::{ErrorCode, MatchError};

/// Infrastructure-level error: configuration, snapshot storage, encoding.
///
/// Game-rule failures stay [`MatchError`]; they are wrapped here only when
/// a caller mixes both (the simulator, a transport layer).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Persistence error: {detail}")]
    Persistence {
        detail: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {detail}")]
    Serialization {
        detail: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Match(#[from] MatchError),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Persistence { .. } => ErrorCode::PersistenceError,
            AppError::Serialization { .. } => ErrorCode::SerializationError,
            AppError::Match(e) => e.code(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn persistence(detail: impl Into<String>, source: std::io::Error) -> Self {
        Self::Persistence {
            detail: detail.into(),
            source,
        }
    }

    pub fn serialization(detail: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            detail: detail.into(),
            source,
        }
    }
}
