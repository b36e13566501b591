//! Delta computation for job runs.
//!
//! Comparison runs in two phases: a pre-comparison hook that decodes both
//! configuration overrides blobs and compares them structurally (tolerating
//! the remote's documented defaults), then a declarative rule-table walk
//! over the remaining spec fields.

use serde_json::Value;
use tracing::debug;

use crate::compare::{
    Delta, FieldRule, FieldValue, RuleKind, has_presence_difference, json_of, slices_equal,
    walk_rules,
};
use crate::error::Result;
use crate::overrides::{self, MonitoringConfiguration, PersistentAppUi};

use super::{JobRunSnapshot, JobRunSpec, SparkSubmitJobDriver};

fn execution_role_arn(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.execution_role_arn.as_deref().map(FieldValue::Str)
}

fn name(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.name.as_deref().map(FieldValue::Str)
}

fn release_label(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.release_label.as_deref().map(FieldValue::Str)
}

fn tags(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.tags.as_ref().map(FieldValue::Tags)
}

fn virtual_cluster_id(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.virtual_cluster_id.as_deref().map(FieldValue::Str)
}

fn virtual_cluster_ref(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    s.virtual_cluster_ref.as_ref().map(FieldValue::Reference)
}

fn job_driver_group(s: &JobRunSpec) -> Option<Value> {
    s.job_driver.as_ref().map(json_of)
}

fn spark_driver(s: &JobRunSpec) -> Option<&SparkSubmitJobDriver> {
    s.job_driver.as_ref()?.spark_submit_job_driver.as_ref()
}

fn spark_group(s: &JobRunSpec) -> Option<Value> {
    spark_driver(s).map(json_of)
}

fn spark_entry_point(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    spark_driver(s)?.entry_point.as_deref().map(FieldValue::Str)
}

fn spark_entry_point_arguments(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    spark_driver(s)?
        .entry_point_arguments
        .as_deref()
        .map(FieldValue::StrList)
}

fn spark_submit_parameters(s: &JobRunSpec) -> Option<FieldValue<'_>> {
    spark_driver(s)?
        .spark_submit_parameters
        .as_deref()
        .map(FieldValue::Str)
}

/// Comparison rules for the job run spec, in visit order. The overrides
/// blob is deliberately absent here: it is handled by the pre-comparison
/// hook on its decoded form, never as a raw string.
static JOB_RUN_RULES: &[FieldRule<JobRunSpec>] = &[
    FieldRule {
        path: "Spec.ExecutionRoleARN",
        kind: RuleKind::Scalar(execution_role_arn),
    },
    FieldRule {
        path: "Spec.JobDriver",
        kind: RuleKind::Group {
            project: job_driver_group,
            children: &[FieldRule {
                path: "Spec.JobDriver.SparkSubmitJobDriver",
                kind: RuleKind::Group {
                    project: spark_group,
                    children: &[
                        FieldRule {
                            path: "Spec.JobDriver.SparkSubmitJobDriver.EntryPoint",
                            kind: RuleKind::Scalar(spark_entry_point),
                        },
                        FieldRule {
                            path: "Spec.JobDriver.SparkSubmitJobDriver.EntryPointArguments",
                            kind: RuleKind::AbsentAsEmpty(spark_entry_point_arguments),
                        },
                        FieldRule {
                            path: "Spec.JobDriver.SparkSubmitJobDriver.SparkSubmitParameters",
                            kind: RuleKind::Scalar(spark_submit_parameters),
                        },
                    ],
                },
            }],
        },
    },
    FieldRule {
        path: "Spec.Name",
        kind: RuleKind::Scalar(name),
    },
    FieldRule {
        path: "Spec.ReleaseLabel",
        kind: RuleKind::Scalar(release_label),
    },
    FieldRule {
        path: "Spec.Tags",
        kind: RuleKind::Scalar(tags),
    },
    FieldRule {
        path: "Spec.VirtualClusterID",
        kind: RuleKind::Scalar(virtual_cluster_id),
    },
    FieldRule {
        path: "Spec.VirtualClusterRef",
        kind: RuleKind::Structural(virtual_cluster_ref),
    },
];

/// Computes the field-level delta between a desired and an observed job
/// run snapshot.
///
/// When exactly one snapshot is absent, the delta holds a single
/// root-level record and nothing else.
///
/// # Errors
///
/// Fails only when a configuration overrides blob is malformed; the
/// comparison is aborted rather than continued on a guessed structure.
pub fn compute_delta(
    desired: Option<&JobRunSnapshot>,
    observed: Option<&JobRunSnapshot>,
) -> Result<Delta> {
    let mut delta = Delta::new();

    match (desired, observed) {
        (Some(d), Some(o)) => {
            compare_configuration_overrides(&mut delta, &d.spec, &o.spec)?;
            walk_rules(&mut delta, JOB_RUN_RULES, &d.spec, &o.spec);
            debug!(differences = delta.len(), "computed job run delta");
        }
        (None, None) => {}
        (d, o) => {
            delta.add("", json_of(&d), json_of(&o));
        }
    }

    Ok(delta)
}

/// Pre-comparison hook for the configuration overrides blob.
///
/// The remote always reports a non-empty, partially defaulted structure
/// even when the user supplied nothing, so both sides are decoded and
/// compared structurally with the known server defaults tolerated.
fn compare_configuration_overrides(
    delta: &mut Delta,
    desired: &JobRunSpec,
    observed: &JobRunSpec,
) -> Result<()> {
    let a = overrides::decode(desired.configuration_overrides.as_deref())?;
    let b = overrides::decode(observed.configuration_overrides.as_deref())?;

    compare_monitoring(
        delta,
        a.monitoring_configuration.as_ref(),
        b.monitoring_configuration.as_ref(),
    );

    let a_list = a.application_configuration.as_deref();
    let b_list = b.application_configuration.as_deref();
    // Order-sensitive on the assumption that the remote returns the
    // entries in submission order; revalidate against the service
    // contract if spurious differences ever show up here.
    if !slices_equal(a_list, b_list) {
        delta.add(
            "Spec.ApplicationConfiguration",
            json_of(&a_list),
            json_of(&b_list),
        );
    }

    Ok(())
}

fn compare_monitoring(
    delta: &mut Delta,
    a: Option<&MonitoringConfiguration>,
    b: Option<&MonitoringConfiguration>,
) {
    // An absent monitoring structure compares as an all-unset one, so a
    // remote that materializes the structure just to hold defaults does
    // not read as a user-intended change.
    let unset = MonitoringConfiguration::default();
    let a = a.unwrap_or(&unset);
    let b = b.unwrap_or(&unset);

    match (a.persistent_app_ui, b.persistent_app_ui) {
        // Unset on the desired side against ENABLED on the observed side
        // is the remote's documented default, not a user-intended change.
        (None, Some(PersistentAppUi::Enabled)) => {}
        (x, y) if x == y => {}
        (x, y) => delta.add(
            "Spec.ConfigurationOverrides.PersistentAppUI",
            json_of(&x),
            json_of(&y),
        ),
    }

    let a_cw = a.cloud_watch_monitoring_configuration.as_ref();
    let b_cw = b.cloud_watch_monitoring_configuration.as_ref();
    if has_presence_difference(a_cw, b_cw) {
        delta.add(
            "Spec.ConfigurationOverrides.CloudWatchMonitoringConfiguration",
            json_of(&a_cw),
            json_of(&b_cw),
        );
    } else if let (Some(a_cw), Some(b_cw)) = (a_cw, b_cw) {
        compare_opt_str(
            delta,
            "Spec.ConfigurationOverrides.CloudWatchMonitoringConfiguration.LogGroupName",
            a_cw.log_group_name.as_ref(),
            b_cw.log_group_name.as_ref(),
        );
        compare_opt_str(
            delta,
            "Spec.ConfigurationOverrides.CloudWatchMonitoringConfiguration.LogStreamNamePrefix",
            a_cw.log_stream_name_prefix.as_ref(),
            b_cw.log_stream_name_prefix.as_ref(),
        );
    }

    let a_s3 = a.s3_monitoring_configuration.as_ref();
    let b_s3 = b.s3_monitoring_configuration.as_ref();
    if has_presence_difference(a_s3, b_s3) {
        delta.add(
            "Spec.ConfigurationOverrides.S3MonitoringConfiguration",
            json_of(&a_s3),
            json_of(&b_s3),
        );
    } else if let (Some(a_s3), Some(b_s3)) = (a_s3, b_s3) {
        compare_opt_str(
            delta,
            "Spec.ConfigurationOverrides.S3MonitoringConfiguration.LogUri",
            a_s3.log_uri.as_ref(),
            b_s3.log_uri.as_ref(),
        );
    }
}

/// Records a delta when two optional strings differ in presence or value.
fn compare_opt_str(
    delta: &mut Delta,
    path: &'static str,
    a: Option<&String>,
    b: Option<&String>,
) {
    if a != b {
        delta.add(path, json_of(&a), json_of(&b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconcileError;
    use crate::resource::ResourceRef;
    use crate::resource::job_run::JobDriver;

    fn snapshot_with_overrides(blob: Option<&str>) -> JobRunSnapshot {
        JobRunSnapshot {
            spec: JobRunSpec {
                name: Some(String::from("daily-report")),
                execution_role_arn: Some(String::from("arn:aws:iam::123:role/exec")),
                release_label: Some(String::from("emr-6.15.0-latest")),
                job_driver: Some(JobDriver {
                    spark_submit_job_driver: Some(SparkSubmitJobDriver {
                        entry_point: Some(String::from("s3://bucket/main.py")),
                        entry_point_arguments: Some(vec![String::from("--date=today")]),
                        spark_submit_parameters: Some(String::from("--conf spark.executor.cores=2")),
                    }),
                }),
                configuration_overrides: blob.map(String::from),
                tags: Some(
                    [(String::from("team"), Some(String::from("data")))]
                        .into_iter()
                        .collect(),
                ),
                virtual_cluster_id: Some(String::from("vc-123")),
                virtual_cluster_ref: None,
            },
            status: super::super::JobRunStatus::default(),
        }
    }

    #[test]
    fn test_identical_snapshots_give_empty_delta() {
        let a = snapshot_with_overrides(None);
        let b = a.clone();

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_equivalent_blobs_with_different_formatting_are_equal() {
        let a = snapshot_with_overrides(Some(
            "monitoringConfiguration: {persistentAppUI: DISABLED}",
        ));
        let b = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: DISABLED\n",
        ));

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_persistent_app_ui_server_default_is_tolerated() {
        let desired = snapshot_with_overrides(Some(""));
        let observed = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: ENABLED\n",
        ));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_persistent_app_ui_default_tolerance_with_monitoring_on_both_sides() {
        let desired = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  s3MonitoringConfiguration:\n    logUri: s3://b/logs\n",
        ));
        let observed = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: ENABLED\n  s3MonitoringConfiguration:\n    logUri: s3://b/logs\n",
        ));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_persistent_app_ui_any_other_asymmetry_differs() {
        let desired = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: DISABLED\n",
        ));
        let observed = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: ENABLED\n",
        ));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.differs_at("Spec.ConfigurationOverrides.PersistentAppUI"));

        // Observed DISABLED against desired-unset is not the default.
        let desired = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  s3MonitoringConfiguration:\n    logUri: s3://b/logs\n",
        ));
        let observed = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  persistentAppUI: DISABLED\n  s3MonitoringConfiguration:\n    logUri: s3://b/logs\n",
        ));
        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.differs_at("Spec.ConfigurationOverrides.PersistentAppUI"));
    }

    #[test]
    fn test_cloudwatch_log_group_difference() {
        let desired = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  cloudWatchMonitoringConfiguration:\n    logGroupName: /jobs/a\n",
        ));
        let observed = snapshot_with_overrides(Some(
            "monitoringConfiguration:\n  cloudWatchMonitoringConfiguration:\n    logGroupName: /jobs/b\n",
        ));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.differs_at(
            "Spec.ConfigurationOverrides.CloudWatchMonitoringConfiguration.LogGroupName"
        ));
    }

    #[test]
    fn test_application_configuration_length_mismatch() {
        let desired = snapshot_with_overrides(Some(
            "applicationConfiguration:\n  - classification: spark-defaults\n",
        ));
        let observed = snapshot_with_overrides(Some(""));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.differs_at("Spec.ApplicationConfiguration"));
    }

    #[test]
    fn test_application_configuration_is_order_sensitive() {
        let desired = snapshot_with_overrides(Some(
            "applicationConfiguration:\n  - classification: spark-defaults\n  - classification: spark-env\n",
        ));
        let observed = snapshot_with_overrides(Some(
            "applicationConfiguration:\n  - classification: spark-env\n  - classification: spark-defaults\n",
        ));

        let delta = compute_delta(Some(&desired), Some(&observed)).expect("delta computes");
        assert!(delta.differs_at("Spec.ApplicationConfiguration"));
    }

    #[test]
    fn test_malformed_blob_aborts_comparison() {
        let desired = snapshot_with_overrides(Some("monitoringConfiguration: [unclosed"));
        let observed = snapshot_with_overrides(None);

        let err = compute_delta(Some(&desired), Some(&observed)).expect_err("decode fails");
        assert!(matches!(err, ReconcileError::Codec(_)));
    }

    #[test]
    fn test_asymmetric_existence_is_single_root_record() {
        let a = snapshot_with_overrides(None);

        let delta = compute_delta(Some(&a), None).expect("delta computes");
        assert_eq!(delta.len(), 1);
        assert!(delta.differs_at(""));

        let delta = compute_delta(None, Some(&a)).expect("delta computes");
        assert_eq!(delta.len(), 1);
        assert!(delta.differs_at(""));

        let delta = compute_delta(None, None).expect("delta computes");
        assert!(delta.is_empty());
    }

    #[test]
    fn test_scalar_field_differences() {
        let a = snapshot_with_overrides(None);
        let mut b = a.clone();
        b.spec.release_label = Some(String::from("emr-7.0.0-latest"));
        b.spec.name = None;

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.differs_at("Spec.ReleaseLabel"));
        assert!(delta.differs_at("Spec.Name"));
        assert!(!delta.differs_at("Spec.ExecutionRoleARN"));
    }

    #[test]
    fn test_tags_difference_is_queryable_at_exact_path() {
        let a = snapshot_with_overrides(None);
        let mut b = a.clone();
        b.spec.tags = Some(
            [(String::from("team"), Some(String::from("ops")))]
                .into_iter()
                .collect(),
        );

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.differs_at("Spec.Tags"));
    }

    #[test]
    fn test_nested_driver_field_difference() {
        let a = snapshot_with_overrides(None);
        let mut b = a.clone();
        if let Some(driver) = b
            .spec
            .job_driver
            .as_mut()
            .and_then(|d| d.spark_submit_job_driver.as_mut())
        {
            driver.entry_point = Some(String::from("s3://bucket/other.py"));
        }

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.differs_at("Spec.JobDriver.SparkSubmitJobDriver.EntryPoint"));
        assert!(!delta.differs_at("Spec.JobDriver"));
    }

    #[test]
    fn test_driver_presence_asymmetry_is_coarse() {
        let a = snapshot_with_overrides(None);
        let mut b = a.clone();
        b.spec.job_driver = None;

        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.differs_at("Spec.JobDriver"));
        assert!(!delta.differs_at("Spec.JobDriver.SparkSubmitJobDriver.EntryPoint"));
    }

    #[test]
    fn test_reference_uses_structural_equality() {
        let a = snapshot_with_overrides(None);
        let b = a.clone();
        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(!delta.differs_at("Spec.VirtualClusterRef"));

        let mut b = a.clone();
        b.spec.virtual_cluster_ref = Some(ResourceRef {
            name: Some(String::from("analytics-cluster")),
            namespace: None,
        });
        let delta = compute_delta(Some(&a), Some(&b)).expect("delta computes");
        assert!(delta.differs_at("Spec.VirtualClusterRef"));
    }
}
