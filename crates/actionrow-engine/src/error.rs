//! Error types for the action row engine.
//!
//! Most anomalies are absorbed where they are detected and only logged.
//! The one failure that reaches callers is a broken lock-check transport.

use thiserror::Error;

use crate::collaborators::TransportError;

/// Error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The lock-check call itself failed.
    #[error("Lock check failed: {0}")]
    Transport(#[from] TransportError),

    /// Descriptor or config data could not be normalized.
    #[error(transparent)]
    Core(#[from] actionrow_core::ActionRowError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
