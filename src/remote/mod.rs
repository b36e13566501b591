//! Remote collaborator interfaces.
//!
//! The core never owns a network client. It consumes the narrow interfaces
//! defined here; the surrounding framework supplies implementations (the
//! [`emr`] adapter covers the real EMR containers API). Errors cross this
//! boundary as [`RemoteError`] values carrying a machine-readable kind, so
//! callers can classify failures without parsing messages.

mod emr;

pub use emr::EmrContainersApi;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Machine-readable classification of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The remote rejected the request as invalid for the resource's
    /// current state or content.
    Validation,
    /// The target resource does not exist remotely.
    NotFound,
    /// The remote asked the caller to slow down.
    Throttled,
    /// The call was cut short by the caller's deadline.
    Cancelled,
    /// The request never reached the remote.
    Network,
    /// Anything the remote did not classify.
    Other,
}

/// An error returned by a remote API call.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct RemoteError {
    /// Machine-readable error classification.
    pub kind: RemoteErrorKind,
    /// Human-readable message from the remote.
    pub message: String,
}

/// Result type alias for remote client calls.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

impl RemoteError {
    /// Creates a new remote error.
    #[must_use]
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::NotFound => "not found",
            Self::Throttled => "throttled",
            Self::Cancelled => "cancelled",
            Self::Network => "network",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Client for the remote tagging operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagClient: Send + Sync {
    /// Adds the given tags to the resource, overwriting existing values.
    async fn add_or_update_tags(
        &self,
        resource_arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> RemoteResult<()>;

    /// Removes the given tag keys from the resource.
    async fn remove_tags(&self, resource_arn: &str, tag_keys: &[String]) -> RemoteResult<()>;

    /// Lists the tags currently attached to the resource.
    async fn list_tags(&self, resource_arn: &str) -> RemoteResult<BTreeMap<String, String>>;
}

/// Client for the remote lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LifecycleClient: Send + Sync {
    /// Requests cancellation of a job run inside a virtual cluster.
    async fn cancel_job_run(
        &self,
        virtual_cluster_id: &str,
        job_run_id: &str,
    ) -> RemoteResult<()>;
}

/// Fire-and-forget recorder for remote API call outcomes.
///
/// Recording must never block a protocol or fail its caller.
pub trait MetricsRecorder: Send + Sync {
    /// Records the outcome of one remote API call.
    fn record_api_call(&self, op_type: &str, op_id: &str, err: Option<&RemoteError>);
}

/// Metrics recorder that emits call outcomes as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetricsRecorder;

impl MetricsRecorder for TracingMetricsRecorder {
    fn record_api_call(&self, op_type: &str, op_id: &str, err: Option<&RemoteError>) {
        match err {
            Some(e) => debug!(op_type, op_id, error = %e, "remote API call failed"),
            None => debug!(op_type, op_id, "remote API call succeeded"),
        }
    }
}
