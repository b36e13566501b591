//! Job run resource model.
//!
//! A job run is a single submission of an analytics job into a virtual
//! cluster. Its spec is user-declared; its status is written exclusively by
//! the remote system and only ever read here.

mod delete;
mod delta;

pub use delete::delete_job_run;
pub use delta::compute_delta;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceRef;
use crate::tags::TagMap;

/// Immutable view of one job run at one point in time.
///
/// Created by the surrounding framework per reconciliation cycle and never
/// mutated; the next cycle supersedes it with a fresh snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRunSnapshot {
    /// Desired-state fields set by the user.
    pub spec: JobRunSpec,
    /// Observed-state fields set by the remote system.
    pub status: JobRunStatus,
}

/// User-declared desired state of a job run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRunSpec {
    /// Display name of the job run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ARN of the IAM role the job executes under.
    #[serde(rename = "executionRoleARN", skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
    /// Release label selecting the runtime version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_label: Option<String>,
    /// Driver that starts the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_driver: Option<JobDriver>,
    /// Configuration overrides as an opaque YAML blob. Compared in decoded
    /// form only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_overrides: Option<String>,
    /// Tags to attach to the job run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagMap>,
    /// Identifier of the virtual cluster the job runs in.
    #[serde(rename = "virtualClusterID", skip_serializing_if = "Option::is_none")]
    pub virtual_cluster_id: Option<String>,
    /// Reference to the virtual cluster resource, as an alternative to the
    /// raw identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_cluster_ref: Option<ResourceRef>,
}

/// Driver union type. Exactly one variant field is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDriver {
    /// Spark submit driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spark_submit_job_driver: Option<SparkSubmitJobDriver>,
}

/// Spark submit driver parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparkSubmitJobDriver {
    /// Entry point file or class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    /// Ordered arguments passed to the entry point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point_arguments: Option<Vec<String>>,
    /// Raw spark-submit parameter string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spark_submit_parameters: Option<String>,
}

/// Remote-written observed state of a job run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRunStatus {
    /// Opaque identifier assigned by the remote system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ARN of the job run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// Current lifecycle state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<LifecycleState>,
    /// When the remote accepted the job run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the job run reached a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Remote-reported reason for a failure, when failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Remote-authoritative run state of a job run.
///
/// Transitions are driven exclusively by the remote system; the core only
/// reads this value to decide cancellation eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Accepted by the remote, not yet scheduled.
    Submitted,
    /// Waiting for cluster capacity.
    Pending,
    /// Executing.
    Running,
    /// Cancellation requested, not yet final.
    CancelPending,
    /// Cancelled before completion.
    Cancelled,
    /// Finished unsuccessfully.
    Failed,
    /// Finished successfully.
    Completed,
}

impl LifecycleState {
    /// Returns true if a cancel call is meaningful from this state.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Submitted | Self::Pending | Self::Running)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "SUBMITTED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::CancelPending => "CANCEL_PENDING",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}
