//! Lifecycle-gated job run deletion.
//!
//! A job run is "deleted" by cancelling it remotely. The remote only
//! accepts cancellation for runs that have not finished, so the call is
//! gated on the observed lifecycle state, and the race where the run
//! finishes between observation and cancellation is treated as success.

use tracing::debug;

use crate::error::{ReconcileError, Result};
use crate::remote::{LifecycleClient, MetricsRecorder, RemoteError, RemoteErrorKind};

use super::JobRunSnapshot;

/// Operation type label recorded for deletions.
const OP_TYPE_DELETE: &str = "DELETE";

/// Remote operation name for cancelling a job run.
const OP_CANCEL_JOB_RUN: &str = "CancelJobRun";

/// Message fragment the remote uses for the finished-in-the-meantime
/// rejection. Matched only after the error kind check, as a guard against
/// unrelated validation failures.
const NOT_CANCELLABLE_MARKER: &str = "not in a cancellable state";

/// Deletes a job run by cancelling it remotely.
///
/// Runs already in a non-cancellable state are treated as deleted without
/// any remote call. Returns the snapshot still pending finalization, or
/// `None` when deletion is complete from the remote's point of view.
///
/// # Errors
///
/// Returns a wrapped error when the cancel call fails for any reason other
/// than the benign finished-in-the-meantime rejection.
pub async fn delete_job_run(
    client: &dyn LifecycleClient,
    metrics: &dyn MetricsRecorder,
    latest: &JobRunSnapshot,
) -> Result<Option<JobRunSnapshot>> {
    if !latest
        .status
        .state
        .is_some_and(super::LifecycleState::is_cancellable)
    {
        debug!(state = ?latest.status.state, "job run not cancellable, nothing to do");
        return Ok(None);
    }

    let (Some(id), Some(virtual_cluster_id)) = (
        latest.status.id.as_deref(),
        latest.spec.virtual_cluster_id.as_deref(),
    ) else {
        debug!("job run has no remote identity yet, nothing to cancel");
        return Ok(None);
    };

    let result = client.cancel_job_run(virtual_cluster_id, id).await;
    metrics.record_api_call(OP_TYPE_DELETE, OP_CANCEL_JOB_RUN, result.as_ref().err());

    match result {
        Ok(()) => Ok(None),
        Err(err) if is_benign_cancel_race(&err) => {
            debug!(job_run_id = id, "job run finished before cancellation");
            Ok(None)
        }
        Err(err) => Err(ReconcileError::remote(OP_CANCEL_JOB_RUN, err)),
    }
}

/// Returns true when the error is the remote rejecting a cancel because
/// the run reached a terminal state after we last observed it.
fn is_benign_cancel_race(err: &RemoteError) -> bool {
    err.kind == RemoteErrorKind::Validation && err.message.contains(NOT_CANCELLABLE_MARKER)
}
