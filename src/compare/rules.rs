//! Declarative field-comparison rules.
//!
//! Instead of hand-unrolled per-field presence and equality checks, each
//! resource kind declares a table of [`FieldRule`]s and hands it to
//! [`walk_rules`]. The walker preserves the classic three-way sequence:
//! presence difference, then value difference, then nothing.

use serde_json::Value;

use crate::resource::ResourceRef;
use crate::tags::TagMap;

use super::{Delta, json_of};

/// Borrowed view of one comparable field on a resource spec.
#[derive(Debug, PartialEq)]
pub enum FieldValue<'a> {
    /// A string field.
    Str(&'a str),
    /// An ordered list of strings.
    StrList(&'a [String]),
    /// A tag map with optional values.
    Tags(&'a TagMap),
    /// A cross-resource reference.
    Reference(&'a ResourceRef),
}

impl FieldValue<'_> {
    /// Serializes the value for inclusion in a delta record.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String((*s).to_string()),
            Self::StrList(items) => {
                Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
            }
            Self::Tags(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| {
                        let value = v
                            .as_ref()
                            .map_or(Value::Null, |s| Value::String(s.clone()));
                        (k.clone(), value)
                    })
                    .collect(),
            ),
            Self::Reference(r) => json_of(r),
        }
    }

    /// Returns true if the value carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::StrList(items) => items.is_empty(),
            Self::Tags(map) => map.is_empty(),
            Self::Reference(_) => false,
        }
    }
}

/// Accessor extracting one field from a resource spec.
pub type Accessor<S> = fn(&S) -> Option<FieldValue<'_>>;

/// How a field's two sides are compared.
pub enum RuleKind<S: 'static> {
    /// Presence difference or value difference is a delta.
    Scalar(Accessor<S>),
    /// Like [`RuleKind::Scalar`], but an absent value compares equal to an
    /// empty one.
    AbsentAsEmpty(Accessor<S>),
    /// Whole-value structural equality, absence included: absent on both
    /// sides is equal, any other mismatch is a delta.
    Structural(Accessor<S>),
    /// A nested group of fields compared only when the group is present on
    /// both sides; a presence asymmetry yields one coarse record at the
    /// group's own path.
    Group {
        /// Serializes the group when present on the snapshot.
        project: fn(&S) -> Option<Value>,
        /// Rules for the group's nested fields.
        children: &'static [FieldRule<S>],
    },
}

/// One declarative comparison rule: a delta path plus how to compare.
pub struct FieldRule<S: 'static> {
    /// Dotted path recorded when the field differs.
    pub path: &'static str,
    /// Comparison behavior for the field.
    pub kind: RuleKind<S>,
}

/// Walks a rule table over a desired/observed spec pair, recording every
/// difference into `delta` in table order.
pub fn walk_rules<S>(delta: &mut Delta, rules: &[FieldRule<S>], desired: &S, observed: &S) {
    for rule in rules {
        match &rule.kind {
            RuleKind::Scalar(get) => {
                let a = get(desired);
                let b = get(observed);
                let equal = match (&a, &b) {
                    (Some(x), Some(y)) => x == y,
                    (None, None) => true,
                    _ => false,
                };
                if !equal {
                    delta.add(rule.path, opt_json(a.as_ref()), opt_json(b.as_ref()));
                }
            }
            RuleKind::AbsentAsEmpty(get) => {
                let a = get(desired);
                let b = get(observed);
                let equal = match (&a, &b) {
                    (Some(x), Some(y)) => x == y,
                    (Some(v), None) | (None, Some(v)) => v.is_empty(),
                    (None, None) => true,
                };
                if !equal {
                    delta.add(rule.path, opt_json(a.as_ref()), opt_json(b.as_ref()));
                }
            }
            RuleKind::Structural(get) => {
                let a = get(desired);
                let b = get(observed);
                if a != b {
                    delta.add(rule.path, opt_json(a.as_ref()), opt_json(b.as_ref()));
                }
            }
            RuleKind::Group { project, children } => {
                let a = project(desired);
                let b = project(observed);
                match (a, b) {
                    (Some(_), Some(_)) => walk_rules(delta, children, desired, observed),
                    (None, None) => {}
                    (a, b) => delta.add(
                        rule.path,
                        a.unwrap_or(Value::Null),
                        b.unwrap_or(Value::Null),
                    ),
                }
            }
        }
    }
}

/// Serializes an optional field value, mapping absence to JSON null.
fn opt_json(value: Option<&FieldValue<'_>>) -> Value {
    value.map_or(Value::Null, FieldValue::to_json)
}
