//! Attribute values and `__`-separated attribute paths.
//!
//! Metrics compare items by the attribute values extracted from them. An
//! attribute is addressed by a path whose segments are joined with `__`:
//!
//! | Path | Resolves to |
//! |------|-------------|
//! | `id` | document id |
//! | `tags__id` | `tags["id"]` |
//! | `tags__meta__lang` | `tags["meta"]["lang"]` |
//! | `scores__relevance__value` | value of the `relevance` score |
//! | `scores__values__relevance__value` | same, long form |
//! | `scores__relevance__op_name` | operator name of the `relevance` score |
//! | `evaluations__precision__value` | value of a stored evaluation |
//!
//! Anything that does not resolve yields [`AttributeValue::Null`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between path segments.
pub const PATH_SEPARATOR: &str = "__";

/// A single extracted attribute.
///
/// Equality is exact: floats compare by bit pattern and `Int(1)` is not equal to
/// `Float(1.0)`. This makes values usable as identity keys in hash sets. Use
/// [`AttributeValue::as_f64`] when a numeric reading is wanted instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Attribute absent or JSON `null`
    #[default]
    Null,
    /// Boolean attribute
    Bool(bool),
    /// Integer attribute
    Int(i64),
    /// Floating point attribute
    Float(f64),
    /// String attribute; nested JSON arrays/objects are stored as their JSON text
    Str(String),
}

impl AttributeValue {
    /// Returns the numeric reading of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttributeValue::Str(s) => s.trim().parse().ok(),
            AttributeValue::Null => None,
        }
    }

    /// Returns true for [`AttributeValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::Null, AttributeValue::Null) => true,
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Int(a), AttributeValue::Int(b)) => a == b,
            (AttributeValue::Float(a), AttributeValue::Float(b)) => a.to_bits() == b.to_bits(),
            (AttributeValue::Str(a), AttributeValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AttributeValue {}

impl Hash for AttributeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            AttributeValue::Null => {}
            AttributeValue::Bool(b) => b.hash(state),
            AttributeValue::Int(i) => i.hash(state),
            AttributeValue::Float(f) => f.to_bits().hash(state),
            AttributeValue::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&serde_json::Value> for AttributeValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => n
                    .as_f64()
                    .map(AttributeValue::Float)
                    .unwrap_or(AttributeValue::Null),
            },
            Value::String(s) => AttributeValue::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => AttributeValue::Str(value.to_string()),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

/// Splits an attribute path into its segments.
///
/// Empty segments (from leading, trailing or doubled separators) are dropped.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Walks a JSON value along `segments`.
///
/// Object keys are matched by name and array elements by decimal index.
pub fn lookup_json<'a>(
    root: &'a serde_json::Value,
    segments: &[&str],
) -> Option<&'a serde_json::Value> {
    segments.iter().try_fold(root, |current, segment| match current {
        serde_json::Value::Object(map) => map.get(*segment),
        serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("tags__id"), vec!["tags", "id"]);
        assert_eq!(split_path("id"), vec!["id"]);
        assert_eq!(
            split_path("scores__values__relevance__value"),
            vec!["scores", "values", "relevance", "value"]
        );
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_lookup_json_nested() {
        let value = json!({"meta": {"lang": "en", "ids": [3, 4]}});
        assert_eq!(lookup_json(&value, &["meta", "lang"]), Some(&json!("en")));
        assert_eq!(lookup_json(&value, &["meta", "ids", "1"]), Some(&json!(4)));
        assert_eq!(lookup_json(&value, &["meta", "missing"]), None);
    }

    #[test]
    fn test_identity_equality_is_exact() {
        assert_eq!(AttributeValue::Int(1), AttributeValue::Int(1));
        assert_ne!(AttributeValue::Int(1), AttributeValue::Float(1.0));
        assert_eq!(AttributeValue::Float(0.5), AttributeValue::Float(0.5));

        let set: HashSet<AttributeValue> =
            [AttributeValue::Int(1), AttributeValue::Int(1), AttributeValue::from("a")]
                .into_iter()
                .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(AttributeValue::from(&json!(7)), AttributeValue::Int(7));
        assert_eq!(AttributeValue::from(&json!(0.25)), AttributeValue::Float(0.25));
        assert_eq!(AttributeValue::from(&json!(null)), AttributeValue::Null);
        assert_eq!(
            AttributeValue::from(&json!([1, 2])),
            AttributeValue::Str("[1,2]".to_string())
        );
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(AttributeValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(AttributeValue::Float(0.3).as_f64(), Some(0.3));
        assert_eq!(AttributeValue::from("0.5").as_f64(), Some(0.5));
        assert_eq!(AttributeValue::Null.as_f64(), None);
    }
}
