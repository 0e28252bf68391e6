use super::attribute::{lookup_json, split_path, AttributeValue};
use super::traits::{Node, NodeMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named numeric result, e.g. a relevance score or a stored evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedScore {
    /// Numeric value
    pub value: f64,
    /// Name of the operator that produced the value (e.g. `precision`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub op_name: String,
}

impl NamedScore {
    /// Creates a score produced by `op_name`.
    pub fn new(value: f64, op_name: impl Into<String>) -> Self {
        Self {
            value,
            op_name: op_name.into(),
        }
    }
}

impl From<f64> for NamedScore {
    fn from(value: f64) -> Self {
        Self {
            value,
            op_name: String::new(),
        }
    }
}

/// A query or result document.
///
/// Queries carry their ranked results in `matches`; nested structure (chunks,
/// sub-queries) lives in `chunks`. Arbitrary metadata goes into `tags`, named
/// scores into `scores`. Evaluation results are written into `evaluations`.
///
/// # Examples
///
/// ```
/// use rankeval_core::document::{Document, Node};
/// use rankeval_core::AttributeValue;
///
/// let doc = Document::new().with_tag("id", 7).with_score("relevance", 0.8);
/// assert_eq!(doc.attribute("tags__id"), AttributeValue::Int(7));
/// assert_eq!(doc.attribute("scores__relevance__value"), AttributeValue::Float(0.8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Document identifier
    pub id: String,
    /// Free-form metadata
    pub tags: serde_json::Map<String, serde_json::Value>,
    /// Named scores attached by the ranking system or groundtruth
    pub scores: BTreeMap<String, NamedScore>,
    /// Ranked results, best first
    pub matches: Vec<Document>,
    /// Nested sub-documents
    pub chunks: Vec<Document>,
    /// Evaluation results keyed by evaluation name
    pub evaluations: BTreeMap<String, NamedScore>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Adds a named score.
    pub fn with_score(mut self, name: impl Into<String>, value: f64) -> Self {
        self.scores.insert(name.into(), NamedScore::from(value));
        self
    }

    /// Replaces the ranked results.
    pub fn with_matches(mut self, matches: Vec<Document>) -> Self {
        self.matches = matches;
        self
    }

    /// Replaces the nested sub-documents.
    pub fn with_chunks(mut self, chunks: Vec<Document>) -> Self {
        self.chunks = chunks;
        self
    }

    /// Returns a stored evaluation result.
    pub fn evaluation(&self, name: &str) -> Option<&NamedScore> {
        self.evaluations.get(name)
    }
}

/// Resolves `[values] name [field]` against a score map.
///
/// `field` defaults to `value`; `op_name` is also readable.
fn lookup_score(scores: &BTreeMap<String, NamedScore>, segments: &[&str]) -> AttributeValue {
    let segments = match segments.first() {
        Some(&"values") if segments.len() > 1 => &segments[1..],
        _ => segments,
    };
    let Some(score) = segments.first().and_then(|name| scores.get(*name)) else {
        return AttributeValue::Null;
    };
    match segments.get(1).copied() {
        None | Some("value") => AttributeValue::Float(score.value),
        Some("op_name") => AttributeValue::Str(score.op_name.clone()),
        Some(_) => AttributeValue::Null,
    }
}

impl Node for Document {
    fn matches(&self) -> &[Self] {
        &self.matches
    }

    fn children(&self) -> &[Self] {
        &self.chunks
    }

    fn attribute(&self, path: &str) -> AttributeValue {
        let segments = split_path(path);
        match segments.as_slice() {
            ["id"] => AttributeValue::Str(self.id.clone()),
            ["tags", key, rest @ ..] => self
                .tags
                .get(*key)
                .and_then(|value| lookup_json(value, rest))
                .map(AttributeValue::from)
                .unwrap_or_default(),
            ["scores", rest @ ..] => lookup_score(&self.scores, rest),
            ["evaluations", rest @ ..] => lookup_score(&self.evaluations, rest),
            _ => AttributeValue::Null,
        }
    }
}

impl NodeMut for Document {
    fn matches_mut(&mut self) -> &mut [Self] {
        &mut self.matches
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.chunks
    }

    fn set_evaluation(&mut self, name: &str, score: NamedScore) {
        self.evaluations.insert(name.to_string(), score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_paths() {
        let doc = Document::new()
            .with_id("doc-1")
            .with_tag("id", 3)
            .with_tag("meta", json!({"lang": "en"}))
            .with_score("relevance", 0.4);

        assert_eq!(doc.attribute("id"), AttributeValue::from("doc-1"));
        assert_eq!(doc.attribute("tags__id"), AttributeValue::Int(3));
        assert_eq!(doc.attribute("tags__meta__lang"), AttributeValue::from("en"));
        assert_eq!(doc.attribute("scores__relevance__value"), AttributeValue::Float(0.4));
        assert_eq!(
            doc.attribute("scores__values__relevance__value"),
            AttributeValue::Float(0.4)
        );
        assert_eq!(doc.attribute("scores__relevance"), AttributeValue::Float(0.4));
    }

    #[test]
    fn test_missing_attributes_are_null() {
        let doc = Document::new();
        assert!(doc.attribute("tags__id").is_null());
        assert!(doc.attribute("scores__relevance__value").is_null());
        assert!(doc.attribute("unknown").is_null());
        assert!(doc.attribute("").is_null());
    }

    #[test]
    fn test_attributes_preserves_order() {
        let doc = Document::new().with_tag("a", 1).with_tag("b", "x");
        let paths = vec!["tags__b".to_string(), "tags__a".to_string()];
        assert_eq!(
            doc.attributes(&paths),
            vec![AttributeValue::from("x"), AttributeValue::Int(1)]
        );
    }

    #[test]
    fn test_set_evaluation_overwrites() {
        let mut doc = Document::new();
        doc.set_evaluation("precision", NamedScore::new(0.2, "precision"));
        doc.set_evaluation("precision", NamedScore::new(0.6, "precision"));
        assert_eq!(doc.evaluations.len(), 1);
        assert_eq!(doc.evaluation("precision").map(|s| s.value), Some(0.6));
        assert_eq!(
            doc.attribute("evaluations__precision__op_name"),
            AttributeValue::from("precision")
        );
    }

    #[test]
    fn test_deserialize_nested_document() {
        let doc: Document = serde_json::from_value(json!({
            "tags": {"id": 1},
            "matches": [{"tags": {"id": 2}, "scores": {"relevance": {"value": 0.5}}}],
            "chunks": [{"id": "c0"}]
        }))
        .unwrap();

        assert_eq!(doc.matches.len(), 1);
        assert_eq!(doc.chunks[0].id, "c0");
        assert_eq!(
            doc.matches[0].attribute("scores__relevance__value"),
            AttributeValue::Float(0.5)
        );
    }
}
