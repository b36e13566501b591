//! Structured model of the configuration overrides blob.
//!
//! Job run specs carry their configuration overrides as an opaque YAML
//! string. The remote always reports a non-empty, partially defaulted
//! structure even when the user supplied nothing, so comparison must work on
//! the decoded form, never the raw string: formatting-only differences and
//! server-applied defaults are not user-intended changes.

mod codec;

pub use codec::{decode, encode};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Decoded configuration overrides for a job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationOverrides {
    /// Ordered application configuration entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_configuration: Option<Vec<Configuration>>,
    /// Monitoring configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_configuration: Option<MonitoringConfiguration>,
}

/// One application configuration entry (a classification with properties
/// and optional nested entries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Classification the properties apply to (e.g. `spark-defaults`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Properties for the classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    /// Nested configuration entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<Configuration>>,
}

/// Monitoring configuration for a job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringConfiguration {
    /// Persistent application UI toggle. The remote defaults an unset
    /// toggle to [`PersistentAppUi::Enabled`].
    ///
    /// The wire name capitalizes the acronym, which `camelCase` renaming
    /// would not produce.
    #[serde(rename = "persistentAppUI", skip_serializing_if = "Option::is_none")]
    pub persistent_app_ui: Option<PersistentAppUi>,
    /// CloudWatch log delivery configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_watch_monitoring_configuration: Option<CloudWatchMonitoringConfiguration>,
    /// S3 log delivery configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_monitoring_configuration: Option<S3MonitoringConfiguration>,
}

/// CloudWatch log delivery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudWatchMonitoringConfiguration {
    /// Destination log group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group_name: Option<String>,
    /// Prefix for log stream names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name_prefix: Option<String>,
}

/// S3 log delivery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct S3MonitoringConfiguration {
    /// Destination object-storage URI for logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
}

/// Persistent application UI toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistentAppUi {
    /// The persistent UI is enabled (the remote's default when unset).
    Enabled,
    /// The persistent UI is disabled.
    Disabled,
}
