//! Virtual cluster update protocol.
//!
//! The remote API exposes no field mutation for virtual clusters, so the
//! only reconcilable difference after creation is the tag set.

use tracing::debug;

use crate::compare::Delta;
use crate::error::Result;
use crate::remote::{MetricsRecorder, TagClient};
use crate::tags::{TagMap, sync_tags};

use super::VirtualClusterSnapshot;

/// Applies the reconcilable part of a virtual cluster delta.
///
/// Only a tag difference results in remote calls; every other recorded
/// difference is immutable after creation and left for the caller to
/// surface. Returns the desired snapshot as the post-update view.
///
/// # Errors
///
/// Returns a wrapped error when tag synchronization fails.
pub async fn update_virtual_cluster(
    client: &dyn TagClient,
    metrics: &dyn MetricsRecorder,
    desired: &VirtualClusterSnapshot,
    latest: &VirtualClusterSnapshot,
    delta: &Delta,
) -> Result<VirtualClusterSnapshot> {
    if delta.differs_at("Spec.Tags") {
        if let Some(arn) = latest.status.arn.as_deref() {
            let empty = TagMap::new();
            let desired_tags = desired.spec.tags.as_ref().unwrap_or(&empty);
            let observed_tags = latest.spec.tags.as_ref().unwrap_or(&empty);
            sync_tags(client, metrics, arn, desired_tags, observed_tags).await?;
        } else {
            debug!("virtual cluster has no ARN yet, deferring tag sync");
        }
    }

    Ok(desired.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockTagClient;
    use crate::remote::testing::RecordingMetrics;
    use crate::resource::virtual_cluster::{
        VirtualClusterSpec, VirtualClusterStatus, compute_delta,
    };

    fn tag_map(entries: &[(&str, &str)]) -> TagMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Some((*v).to_string())))
            .collect()
    }

    fn snapshot(tags: TagMap, arn: Option<&str>) -> VirtualClusterSnapshot {
        VirtualClusterSnapshot {
            spec: VirtualClusterSpec {
                name: Some(String::from("analytics")),
                container_provider: None,
                tags: Some(tags),
            },
            status: VirtualClusterStatus {
                id: Some(String::from("vc-123")),
                arn: arn.map(String::from),
            },
        }
    }

    #[tokio::test]
    async fn test_tag_difference_triggers_sync() {
        let desired = snapshot(tag_map(&[("team", "data")]), None);
        let latest = snapshot(tag_map(&[("team", "ops")]), Some("arn:vc"));
        let delta = compute_delta(Some(&desired), Some(&latest));

        let mut client = MockTagClient::new();
        client
            .expect_add_or_update_tags()
            .withf(|arn, tags| {
                arn == "arn:vc" && tags.get("team").map(String::as_str) == Some("data")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let metrics = RecordingMetrics::default();

        let out = update_virtual_cluster(&client, &metrics, &desired, &latest, &delta)
            .await
            .expect("update succeeds");
        assert_eq!(out.spec.tags, desired.spec.tags);
    }

    #[tokio::test]
    async fn test_no_tag_difference_issues_no_calls() {
        let desired = snapshot(tag_map(&[("team", "data")]), None);
        let mut latest = desired.clone();
        latest.status.arn = Some(String::from("arn:vc"));
        latest.spec.name = Some(String::from("renamed-remotely"));
        let delta = compute_delta(Some(&desired), Some(&latest));
        assert!(delta.differs_at("Spec.Name"));

        // No expectations set: any call would panic the mock.
        let client = MockTagClient::new();
        let metrics = RecordingMetrics::default();

        update_virtual_cluster(&client, &metrics, &desired, &latest, &delta)
            .await
            .expect("update succeeds");
        assert!(metrics.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_missing_arn_defers_sync() {
        let desired = snapshot(tag_map(&[("team", "data")]), None);
        let latest = snapshot(tag_map(&[]), None);
        let delta = compute_delta(Some(&desired), Some(&latest));
        assert!(delta.differs_at("Spec.Tags"));

        let client = MockTagClient::new();
        let metrics = RecordingMetrics::default();

        update_virtual_cluster(&client, &metrics, &desired, &latest, &delta)
            .await
            .expect("update succeeds without calls");
        assert!(metrics.recorded().is_empty());
    }
}
