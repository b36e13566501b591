// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # EMR Containers Reconciler
//!
//! Reconciliation core for EMR-on-EKS job runs and virtual clusters.
//!
//! ## Overview
//!
//! The crate compares a user-declared desired state against the state
//! observed from the remote API and drives the remote toward the desired
//! state, allowing you to:
//!
//! - Compute precise, path-addressed deltas between resource snapshots
//! - Synchronize resource tags idempotently with at most two remote calls
//! - Cancel job runs safely, gated on their remote lifecycle state
//!
//! ## Architecture
//!
//! The system is built around the concept of **desired state reconciliation**:
//!
//! 1. **Desired State**: Declared on the resource spec
//! 2. **Observed State**: Read back from the EMR containers API
//! 3. **Delta**: Field-level differences, computed by declarative rule tables
//! 4. **Protocols**: Tag sync and lifecycle-gated deletion applying the delta
//!
//! ## Modules
//!
//! - [`compare`]: Delta records and the declarative rule-table walker
//! - [`overrides`]: Configuration overrides model and its YAML codec
//! - [`resource`]: Resource snapshots and their kind-specific logic
//! - [`tags`]: Tag delta computation and the tag sync protocol
//! - [`remote`]: Remote client interfaces and the EMR containers adapter
//! - [`error`]: Crate-wide error types
//!
//! ## Example
//!
//! ```no_run
//! use emr_containers_reconciler::{JobRunSnapshot, compute_job_run_delta};
//!
//! # fn main() -> emr_containers_reconciler::Result<()> {
//! let desired = JobRunSnapshot::default();
//! let observed = JobRunSnapshot::default();
//!
//! let delta = compute_job_run_delta(Some(&desired), Some(&observed))?;
//! if delta.is_empty() {
//!     println!("nothing to reconcile");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod compare;
pub mod error;
pub mod overrides;
pub mod remote;
pub mod resource;
pub mod tags;

// ============================================================================
// Re-exports
// ============================================================================

pub use compare::{Delta, DeltaEntry, FieldRule, FieldValue, RuleKind, walk_rules};
pub use error::{CodecError, ReconcileError, Result};
pub use overrides::{ConfigurationOverrides, MonitoringConfiguration, PersistentAppUi};
pub use remote::{
    EmrContainersApi, LifecycleClient, MetricsRecorder, RemoteError, RemoteErrorKind,
    RemoteResult, TagClient, TracingMetricsRecorder,
};
pub use resource::ResourceRef;
pub use resource::job_run::{
    JobRunSnapshot, JobRunSpec, JobRunStatus, LifecycleState,
    compute_delta as compute_job_run_delta, delete_job_run,
};
pub use resource::virtual_cluster::{
    VirtualClusterSnapshot, VirtualClusterSpec, VirtualClusterStatus,
    compute_delta as compute_virtual_cluster_delta, update_virtual_cluster,
};
pub use tags::{TagMap, TagsDelta, compute_tags_delta, fetch_tags, sync_tags};
