//! Resource models and their kind-specific reconciliation logic.
//!
//! Each resource kind owns its snapshot types, its delta rule table, and
//! the remote protocols that apply to it.

pub mod job_run;
pub mod virtual_cluster;

use serde::{Deserialize, Serialize};

/// Reference to another managed resource by name.
///
/// Compared with full structural equality: two absent references are
/// equal, any other mismatch is a difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// Name of the referenced resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace of the referenced resource, when namespaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
