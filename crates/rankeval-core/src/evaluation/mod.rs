//! Ranking evaluation: metrics, traversal, and the evaluator that ties them together.
//!
//! # Overview
//!
//! - [`metrics`] - pure IR metrics over ranked item lists
//! - [`traversal`] - path codes selecting which node pairs get evaluated
//! - [`evaluator`] - [`RankingEvaluator`], pairing actual and groundtruth trees
//! - [`sink`] - where computed results are reported
//!
//! # Metrics Reference
//!
//! | Metric | Description | Use Case |
//! |--------|-------------|----------|
//! | `precision` | Fraction of top-k that is relevant | Result list quality |
//! | `recall` | Fraction of relevant found in top-k | Coverage |
//! | `fscore` | Weighted harmonic mean of P and R | Balanced summary |
//! | `reciprocal_rank` | 1 / rank of first relevant result | Known-item search |
//! | `average_precision` | Mean precision at each hit | Overall ranking quality |
//! | `ndcg` | Normalized Discounted Cumulative Gain | Graded relevance, position-aware |

pub mod evaluator;
pub mod metrics;
pub mod sink;
pub mod traversal;

pub use evaluator::RankingEvaluator;
pub use metrics::{
    average_precision, fscore, ndcg, precision, recall, reciprocal_rank, MetricFn, MetricKind,
    MetricParams, RankedItem,
};
pub use sink::{EvaluationRecord, EvaluationSink, NoopSink, TracingSink};
pub use traversal::{PathCode, TraversalPath, TraversalPaths, TraversalSpec};
