//! Node capabilities consumed by the evaluator.
//!
//! The evaluator never owns documents. It reads matches, children and
//! attributes from both trees through [`Node`], and writes evaluation results
//! on the actual-side tree through [`NodeMut`].

use super::attribute::AttributeValue;
use super::types::NamedScore;

/// Read access to a ranked document tree.
pub trait Node: Sized {
    /// Ranked results for this node, best first.
    fn matches(&self) -> &[Self];

    /// Nested sub-documents (chunks), in document order.
    fn children(&self) -> &[Self];

    /// Reads one attribute by `__`-separated path.
    ///
    /// Returns [`AttributeValue::Null`] when the path does not resolve.
    fn attribute(&self, path: &str) -> AttributeValue;

    /// Reads several attributes at once, in the order given.
    fn attributes(&self, paths: &[String]) -> Vec<AttributeValue> {
        paths.iter().map(|path| self.attribute(path)).collect()
    }
}

/// Write access needed on the actual-side tree.
pub trait NodeMut: Node {
    /// Mutable ranked results.
    fn matches_mut(&mut self) -> &mut [Self];

    /// Mutable nested sub-documents.
    fn children_mut(&mut self) -> &mut [Self];

    /// Stores an evaluation result, replacing any previous value under `name`.
    fn set_evaluation(&mut self, name: &str, score: NamedScore);
}
