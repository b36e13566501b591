//! Delta computation for virtual clusters.

use serde_json::Value;
use tracing::debug;

use crate::compare::{Delta, FieldRule, FieldValue, RuleKind, json_of, walk_rules};

use super::{ContainerProvider, VirtualClusterSnapshot, VirtualClusterSpec};

fn name(s: &VirtualClusterSpec) -> Option<FieldValue<'_>> {
    s.name.as_deref().map(FieldValue::Str)
}

fn tags(s: &VirtualClusterSpec) -> Option<FieldValue<'_>> {
    s.tags.as_ref().map(FieldValue::Tags)
}

fn provider(s: &VirtualClusterSpec) -> Option<&ContainerProvider> {
    s.container_provider.as_ref()
}

fn provider_group(s: &VirtualClusterSpec) -> Option<Value> {
    provider(s).map(json_of)
}

fn provider_id(s: &VirtualClusterSpec) -> Option<FieldValue<'_>> {
    provider(s)?.id.as_deref().map(FieldValue::Str)
}

fn provider_type(s: &VirtualClusterSpec) -> Option<FieldValue<'_>> {
    provider(s)?.provider_type.as_deref().map(FieldValue::Str)
}

fn provider_info_group(s: &VirtualClusterSpec) -> Option<Value> {
    provider(s)?.info.as_ref().map(json_of)
}

fn eks_info_group(s: &VirtualClusterSpec) -> Option<Value> {
    provider(s)?.info.as_ref()?.eks_info.as_ref().map(json_of)
}

fn eks_namespace(s: &VirtualClusterSpec) -> Option<FieldValue<'_>> {
    provider(s)?
        .info
        .as_ref()?
        .eks_info
        .as_ref()?
        .namespace
        .as_deref()
        .map(FieldValue::Str)
}

/// Comparison rules for the virtual cluster spec, in visit order.
static VIRTUAL_CLUSTER_RULES: &[FieldRule<VirtualClusterSpec>] = &[
    FieldRule {
        path: "Spec.ContainerProvider",
        kind: RuleKind::Group {
            project: provider_group,
            children: &[
                FieldRule {
                    path: "Spec.ContainerProvider.ID",
                    kind: RuleKind::Scalar(provider_id),
                },
                FieldRule {
                    path: "Spec.ContainerProvider.Info",
                    kind: RuleKind::Group {
                        project: provider_info_group,
                        children: &[FieldRule {
                            path: "Spec.ContainerProvider.Info.EKSInfo",
                            kind: RuleKind::Group {
                                project: eks_info_group,
                                children: &[FieldRule {
                                    path: "Spec.ContainerProvider.Info.EKSInfo.Namespace",
                                    kind: RuleKind::Scalar(eks_namespace),
                                }],
                            },
                        }],
                    },
                },
                FieldRule {
                    path: "Spec.ContainerProvider.Type",
                    kind: RuleKind::Scalar(provider_type),
                },
            ],
        },
    },
    FieldRule {
        path: "Spec.Name",
        kind: RuleKind::Scalar(name),
    },
    FieldRule {
        path: "Spec.Tags",
        kind: RuleKind::AbsentAsEmpty(tags),
    },
];

/// Computes the field-level delta between a desired and an observed
/// virtual cluster snapshot.
///
/// When exactly one snapshot is absent, the delta holds a single
/// root-level record and nothing else.
#[must_use]
pub fn compute_delta(
    desired: Option<&VirtualClusterSnapshot>,
    observed: Option<&VirtualClusterSnapshot>,
) -> Delta {
    let mut delta = Delta::new();

    match (desired, observed) {
        (Some(d), Some(o)) => {
            walk_rules(&mut delta, VIRTUAL_CLUSTER_RULES, &d.spec, &o.spec);
            debug!(differences = delta.len(), "computed virtual cluster delta");
        }
        (None, None) => {}
        (d, o) => {
            delta.add("", json_of(&d), json_of(&o));
        }
    }

    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::virtual_cluster::{ContainerInfo, EksInfo};
    use crate::tags::TagMap;

    fn snapshot() -> VirtualClusterSnapshot {
        VirtualClusterSnapshot {
            spec: VirtualClusterSpec {
                name: Some(String::from("analytics")),
                container_provider: Some(ContainerProvider {
                    id: Some(String::from("prod-cluster")),
                    provider_type: Some(String::from("EKS")),
                    info: Some(ContainerInfo {
                        eks_info: Some(EksInfo {
                            namespace: Some(String::from("spark-jobs")),
                        }),
                    }),
                }),
                tags: Some(
                    [(String::from("team"), Some(String::from("data")))]
                        .into_iter()
                        .collect(),
                ),
            },
            status: super::super::VirtualClusterStatus::default(),
        }
    }

    #[test]
    fn test_identical_snapshots_give_empty_delta() {
        let a = snapshot();
        let b = a.clone();
        let delta = compute_delta(Some(&a), Some(&b));
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_namespace_difference_at_leaf_path() {
        let a = snapshot();
        let mut b = a.clone();
        if let Some(ns) = b
            .spec
            .container_provider
            .as_mut()
            .and_then(|p| p.info.as_mut())
            .and_then(|i| i.eks_info.as_mut())
        {
            ns.namespace = Some(String::from("other"));
        }

        let delta = compute_delta(Some(&a), Some(&b));
        assert!(delta.differs_at("Spec.ContainerProvider.Info.EKSInfo.Namespace"));
        assert!(!delta.differs_at("Spec.ContainerProvider"));
    }

    #[test]
    fn test_provider_presence_asymmetry_is_coarse() {
        let a = snapshot();
        let mut b = a.clone();
        b.spec.container_provider = None;

        let delta = compute_delta(Some(&a), Some(&b));
        assert!(delta.differs_at("Spec.ContainerProvider"));
        assert!(!delta.differs_at("Spec.ContainerProvider.ID"));
    }

    #[test]
    fn test_absent_tags_equal_empty_tags() {
        let mut a = snapshot();
        let mut b = snapshot();
        a.spec.tags = None;
        b.spec.tags = Some(TagMap::new());

        let delta = compute_delta(Some(&a), Some(&b));
        assert!(delta.is_empty(), "unexpected differences: {delta}");
    }

    #[test]
    fn test_tags_difference() {
        let a = snapshot();
        let mut b = a.clone();
        b.spec.tags = Some(
            [(String::from("team"), Some(String::from("ops")))]
                .into_iter()
                .collect(),
        );

        let delta = compute_delta(Some(&a), Some(&b));
        assert!(delta.differs_at("Spec.Tags"));
    }

    #[test]
    fn test_asymmetric_existence_is_single_root_record() {
        let a = snapshot();
        let delta = compute_delta(Some(&a), None);
        assert_eq!(delta.len(), 1);
        assert!(delta.differs_at(""));
    }
}
