//! Tag delta computation and the idempotent tag synchronization protocol.
//!
//! Synchronization issues at most two remote calls: one removing stale
//! keys, one adding or updating changed keys. The protocol is idempotent
//! but not transactional: a partial failure leaves the other call's effect
//! in place, and re-invoking with the same inputs converges to the same end
//! state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ReconcileError, Result};
use crate::remote::{MetricsRecorder, TagClient};

/// Operation type label recorded for tag mutations.
const OP_TYPE_UPDATE: &str = "UPDATE";

/// Remote operation name for adding or updating tags.
const OP_TAG_RESOURCE: &str = "TagResource";

/// Remote operation name for removing tags.
const OP_UNTAG_RESOURCE: &str = "UntagResource";

/// Remote operation name for listing tags.
const OP_LIST_TAGS: &str = "ListTagsForResource";

/// Tag key to optional value. An absent value on a desired tag means the
/// tag is never submitted; an observed key missing from the desired map
/// means the tag is removed.
pub type TagMap = BTreeMap<String, Option<String>>;

/// The two change sets derived from a desired/observed tag map pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsDelta {
    /// Keys to add or overwrite, with their desired values.
    pub added_or_updated: BTreeMap<String, String>,
    /// Keys present remotely but absent from the desired map.
    pub removed: Vec<String>,
}

impl TagsDelta {
    /// Returns true when no tag mutation is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_or_updated.is_empty() && self.removed.is_empty()
    }
}

/// Computes the add/update and remove sets between two tag maps.
///
/// A desired tag with an absent value is skipped, never submitted.
#[must_use]
pub fn compute_tags_delta(desired: &TagMap, observed: &TagMap) -> TagsDelta {
    let mut delta = TagsDelta::default();

    for (key, value) in desired {
        let Some(value) = value else { continue };
        match observed.get(key) {
            Some(Some(existing)) if existing == value => {}
            _ => {
                delta
                    .added_or_updated
                    .insert(key.clone(), value.clone());
            }
        }
    }

    for key in observed.keys() {
        if !desired.contains_key(key) {
            delta.removed.push(key.clone());
        }
    }

    delta
}

/// Synchronizes a resource's remote tags with the desired tag map.
///
/// Each remote call's outcome is recorded through the metrics collaborator
/// before its error is evaluated. When both computed sets are empty, no
/// remote call is issued and nothing is recorded.
///
/// # Errors
///
/// Returns a wrapped error identifying which remote call failed. A call
/// already issued before the failure is not rolled back.
pub async fn sync_tags(
    client: &dyn TagClient,
    metrics: &dyn MetricsRecorder,
    resource_arn: &str,
    desired: &TagMap,
    observed: &TagMap,
) -> Result<()> {
    let delta = compute_tags_delta(desired, observed);

    if delta.is_empty() {
        debug!(resource_arn, "tags already in sync");
        return Ok(());
    }

    if !delta.removed.is_empty() {
        debug!(
            resource_arn,
            count = delta.removed.len(),
            "removing stale tags"
        );
        let result = client.remove_tags(resource_arn, &delta.removed).await;
        metrics.record_api_call(OP_TYPE_UPDATE, OP_UNTAG_RESOURCE, result.as_ref().err());
        result.map_err(|e| ReconcileError::remote(OP_UNTAG_RESOURCE, e))?;
    }

    if !delta.added_or_updated.is_empty() {
        debug!(
            resource_arn,
            count = delta.added_or_updated.len(),
            "adding or updating tags"
        );
        let result = client
            .add_or_update_tags(resource_arn, &delta.added_or_updated)
            .await;
        metrics.record_api_call(OP_TYPE_UPDATE, OP_TAG_RESOURCE, result.as_ref().err());
        result.map_err(|e| ReconcileError::remote(OP_TAG_RESOURCE, e))?;
    }

    Ok(())
}

/// Reads the resource's remote tags into a [`TagMap`].
///
/// # Errors
///
/// Returns a wrapped error when the list call fails.
pub async fn fetch_tags(client: &dyn TagClient, resource_arn: &str) -> Result<TagMap> {
    let tags = client
        .list_tags(resource_arn)
        .await
        .map_err(|e| ReconcileError::remote(OP_LIST_TAGS, e))?;

    Ok(tags.into_iter().map(|(k, v)| (k, Some(v))).collect())
}
