//! EMR containers API adapter.
//!
//! Implements the remote collaborator traits over the AWS EMR containers
//! service client, translating SDK failures into the core's structured
//! [`RemoteError`] taxonomy.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_emrcontainers::Client;
use aws_sdk_emrcontainers::error::{ProvideErrorMetadata, SdkError};
use tracing::debug;

use super::{LifecycleClient, RemoteError, RemoteErrorKind, RemoteResult, TagClient};

/// Remote client backed by the EMR containers service.
#[derive(Debug, Clone)]
pub struct EmrContainersApi {
    /// EMR containers SDK client.
    client: Client,
}

impl EmrContainersApi {
    /// Creates a new adapter from the ambient AWS configuration.
    pub async fn new(region: Option<&str>) -> Self {
        let loader = aws_config::defaults(BehaviorVersion::latest());
        let config = if let Some(region_str) = region {
            loader
                .region(aws_config::Region::new(region_str.to_string()))
                .load()
                .await
        } else {
            loader.load().await
        };

        Self {
            client: Client::new(&config),
        }
    }

    /// Creates a new adapter with an existing SDK client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagClient for EmrContainersApi {
    async fn add_or_update_tags(
        &self,
        resource_arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> RemoteResult<()> {
        debug!(resource_arn, count = tags.len(), "tagging resource");

        let tags: HashMap<String, String> =
            tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        self.client
            .tag_resource()
            .resource_arn(resource_arn)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        Ok(())
    }

    async fn remove_tags(&self, resource_arn: &str, tag_keys: &[String]) -> RemoteResult<()> {
        debug!(resource_arn, count = tag_keys.len(), "untagging resource");

        self.client
            .untag_resource()
            .resource_arn(resource_arn)
            .set_tag_keys(Some(tag_keys.to_vec()))
            .send()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        Ok(())
    }

    async fn list_tags(&self, resource_arn: &str) -> RemoteResult<BTreeMap<String, String>> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_arn(resource_arn)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        Ok(output
            .tags()
            .map(|tags| {
                tags.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl LifecycleClient for EmrContainersApi {
    async fn cancel_job_run(
        &self,
        virtual_cluster_id: &str,
        job_run_id: &str,
    ) -> RemoteResult<()> {
        debug!(virtual_cluster_id, job_run_id, "cancelling job run");

        self.client
            .cancel_job_run()
            .virtual_cluster_id(virtual_cluster_id)
            .id(job_run_id)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        Ok(())
    }
}

/// Translates an SDK error into the core's structured remote error.
fn map_sdk_error<E>(err: &SdkError<E>) -> RemoteError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err {
        // A timeout means the caller's deadline fired, not a remote fault.
        SdkError::TimeoutError(_) => RemoteError::new(RemoteErrorKind::Cancelled, err.to_string()),
        SdkError::DispatchFailure(_) => {
            RemoteError::new(RemoteErrorKind::Network, err.to_string())
        }
        SdkError::ServiceError(ctx) => {
            let service_err = ctx.err();
            let kind = match service_err.code() {
                Some("ValidationException") => RemoteErrorKind::Validation,
                Some("ResourceNotFoundException") => RemoteErrorKind::NotFound,
                Some("TooManyRequestsException") => RemoteErrorKind::Throttled,
                _ => RemoteErrorKind::Other,
            };
            let message = service_err
                .message()
                .map_or_else(|| service_err.to_string(), ToString::to_string);
            RemoteError::new(kind, message)
        }
        _ => RemoteError::new(RemoteErrorKind::Other, err.to_string()),
    }
}
