//! Field value types, default values and sort-key ordering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::core::reflect::MemberType;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

/// The declared kind of a scalar member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
}

impl ScalarKind {
    /// Zero value substituted for a missing scalar of this kind.
    ///
    /// Strings default to the empty string and timestamps to the earliest
    /// representable instant, so absent values sort before present ones in
    /// ascending order.
    pub fn default_value(self) -> FieldValue {
        match self {
            ScalarKind::String => FieldValue::String(String::new()),
            ScalarKind::Integer => FieldValue::Integer(0),
            ScalarKind::Float => FieldValue::Float(0.0),
            ScalarKind::Boolean => FieldValue::Boolean(false),
            ScalarKind::Uuid => FieldValue::Uuid(Uuid::nil()),
            ScalarKind::DateTime => FieldValue::DateTime(DateTime::<Utc>::MIN_UTC),
        }
    }
}

/// Default key for any member type.
///
/// Objects have no zero value and default to `Null`; collections are keyed by
/// their element count and therefore default to zero.
pub fn default_for(ty: MemberType) -> FieldValue {
    match ty {
        MemberType::Scalar(kind) => kind.default_value(),
        MemberType::Object(_) => FieldValue::Null,
        MemberType::Collection(_) => FieldValue::Integer(0),
    }
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert a JSON value, e.g. an equality value taken from a request body.
    ///
    /// Arrays and objects have no scalar meaning and become `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Null,
        }
    }

    /// Convert this value to the given kind for an equality comparison.
    ///
    /// Strings are parsed into the target kind, integral floats narrow to
    /// integers and integers widen to floats. `Null` stays `Null`. Returns
    /// `None` when no lossless conversion exists.
    pub fn coerce_to(&self, kind: ScalarKind) -> Option<FieldValue> {
        match (self, kind) {
            (FieldValue::Null, _) => Some(FieldValue::Null),

            (FieldValue::String(s), ScalarKind::String) => Some(FieldValue::String(s.clone())),
            (FieldValue::String(s), ScalarKind::Integer) => {
                s.trim().parse().ok().map(FieldValue::Integer)
            }
            (FieldValue::String(s), ScalarKind::Float) => {
                s.trim().parse().ok().map(FieldValue::Float)
            }
            (FieldValue::String(s), ScalarKind::Boolean) => {
                s.trim().to_ascii_lowercase().parse().ok().map(FieldValue::Boolean)
            }
            (FieldValue::String(s), ScalarKind::Uuid) => {
                Uuid::parse_str(s.trim()).ok().map(FieldValue::Uuid)
            }
            (FieldValue::String(s), ScalarKind::DateTime) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc))),

            (FieldValue::Integer(i), ScalarKind::Integer) => Some(FieldValue::Integer(*i)),
            (FieldValue::Integer(i), ScalarKind::Float) => Some(FieldValue::Float(*i as f64)),
            (FieldValue::Float(f), ScalarKind::Float) => Some(FieldValue::Float(*f)),
            (FieldValue::Float(f), ScalarKind::Integer) if f.fract() == 0.0 => {
                Some(FieldValue::Integer(*f as i64))
            }

            (FieldValue::Boolean(b), ScalarKind::Boolean) => Some(FieldValue::Boolean(*b)),
            (FieldValue::Uuid(u), ScalarKind::Uuid) => Some(FieldValue::Uuid(*u)),
            (FieldValue::Uuid(u), ScalarKind::String) => Some(FieldValue::String(u.to_string())),
            (FieldValue::DateTime(dt), ScalarKind::DateTime) => Some(FieldValue::DateTime(*dt)),

            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
            FieldValue::DateTime(_) => 5,
        }
    }

    /// Total order used for sorting.
    ///
    /// Values of different kinds order by kind:
    /// `Null < Boolean < numbers < String < Uuid < DateTime`. Integers and
    /// floats compare numerically; strings compare ordinally.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// A [`FieldValue`] ordered by [`FieldValue::total_cmp`]
#[derive(Debug, Clone)]
pub struct SortKey(pub FieldValue);

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}
