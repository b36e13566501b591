//! Virtual cluster resource model.
//!
//! A virtual cluster binds a container provider namespace to the remote
//! analytics service. Everything in its spec except tags is immutable
//! after creation, so its update path only ever synchronizes tags.

mod delta;
mod update;

pub use delta::compute_delta;
pub use update::update_virtual_cluster;

use serde::{Deserialize, Serialize};

use crate::tags::TagMap;

/// Immutable view of one virtual cluster at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualClusterSnapshot {
    /// Desired-state fields set by the user.
    pub spec: VirtualClusterSpec,
    /// Observed-state fields set by the remote system.
    pub status: VirtualClusterStatus,
}

/// User-declared desired state of a virtual cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualClusterSpec {
    /// Display name of the virtual cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Container provider backing the cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_provider: Option<ContainerProvider>,
    /// Tags to attach to the virtual cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagMap>,
}

/// Container provider the virtual cluster is bound to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProvider {
    /// Identifier of the provider, such as the backing cluster name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Provider type discriminator.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    /// Provider-specific configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ContainerInfo>,
}

/// Provider-specific configuration union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerInfo {
    /// Kubernetes provider configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eks_info: Option<EksInfo>,
}

/// Kubernetes provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EksInfo {
    /// Namespace jobs are scheduled into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Remote-written observed state of a virtual cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualClusterStatus {
    /// Opaque identifier assigned by the remote system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ARN of the virtual cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}
