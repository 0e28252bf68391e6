//! Document model consumed by the evaluator.
//!
//! - [`traits`] - [`Node`] / [`NodeMut`] capabilities the evaluator relies on
//! - [`types`] - a serde-friendly [`Document`] implementing both
//! - [`attribute`] - attribute values and `__`-separated attribute paths
//!
//! Any tree type can be evaluated by implementing [`Node`] and [`NodeMut`];
//! [`Document`] is provided for callers without their own model.

pub mod attribute;
pub mod traits;
pub mod types;

pub use attribute::AttributeValue;
pub use traits::{Node, NodeMut};
pub use types::{Document, NamedScore};
