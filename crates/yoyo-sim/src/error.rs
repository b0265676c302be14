//! Error types. None of these are fatal to a session.

use thiserror::Error;

use yoyo_core::events::RejectReason;

/// A throw that did not create a yoyo.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ThrowError {
    #[error("owner already has a yoyo out")]
    AlreadyActive,
    #[error("yoyo durability exhausted")]
    ItemExhausted,
    #[error("owner is not present in the world")]
    OwnerUnavailable,
}

impl ThrowError {
    pub fn reason(self) -> RejectReason {
        match self {
            ThrowError::AlreadyActive => RejectReason::AlreadyActive,
            ThrowError::ItemExhausted => RejectReason::ItemExhausted,
            ThrowError::OwnerUnavailable => RejectReason::OwnerUnavailable,
        }
    }
}

/// An interaction that could not run.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum InteractionError {
    #[error("target vanished before the interaction ran")]
    StaleTarget,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
