//! Error types for the reconciliation core.
//!
//! The core distinguishes three failure classes: a malformed configuration
//! overrides blob (fatal for delta computation), a failed remote call
//! (wrapped with the name of the call that failed), and caller-driven
//! cancellation (surfaced separately so the control loop does not count a
//! cut-short call as a remote failure).

use thiserror::Error;

use crate::remote::{RemoteError, RemoteErrorKind};

/// The main error type for the reconciliation core.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The configuration overrides blob could not be encoded or decoded.
    #[error("Configuration overrides codec error: {0}")]
    Codec(#[from] CodecError),

    /// A remote API call failed.
    #[error("{call} call failed: {source}")]
    Remote {
        /// Name of the remote operation that failed.
        call: &'static str,
        /// The underlying remote error.
        source: RemoteError,
    },

    /// A remote call was cut short by the caller's deadline or cancellation.
    #[error("{call} call cancelled before completion: {message}")]
    Cancelled {
        /// Name of the remote operation that was cancelled.
        call: &'static str,
        /// Description of the cancellation.
        message: String,
    },
}

/// Errors from the configuration overrides codec.
///
/// A decode failure is fatal for the comparison that triggered it: guessing
/// a partial structure could either starve a needed update or apply an
/// unintended one.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The overrides document failed to parse.
    #[error("Failed to decode configuration overrides: {message}")]
    Decode {
        /// Description of the parse failure.
        message: String,
    },

    /// The overrides structure failed to serialize.
    #[error("Failed to encode configuration overrides: {message}")]
    Encode {
        /// Description of the serialization failure.
        message: String,
    },
}

/// Result type alias for reconciliation core operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;

impl ReconcileError {
    /// Wraps a remote error with the name of the call that produced it.
    ///
    /// Cancellation is reclassified into [`ReconcileError::Cancelled`] so it
    /// never masquerades as a remote-side failure.
    #[must_use]
    pub fn remote(call: &'static str, source: RemoteError) -> Self {
        if source.kind == RemoteErrorKind::Cancelled {
            Self::Cancelled {
                call,
                message: source.message,
            }
        } else {
            Self::Remote { call, source }
        }
    }
}
