//! # rankeval-core
//!
//! Ranking quality evaluation for nested search results.
//!
//! Given the documents a search system returned for a batch of queries and the
//! groundtruth documents for the same queries, this crate computes rank-aware
//! IR metrics and stores each result on the evaluated document.
//!
//! ## Modules
//!
//! - [`evaluation`] - Metrics (precision, recall, F-score, RR, AP, NDCG), traversal paths, evaluator
//! - [`document`] - Node traits consumed by the evaluator and a ready-made [`Document`]
//! - [`config`] - Evaluator configuration and defaults
//! - [`error`] - Configuration and evaluation errors
//!
//! ## Example
//!
//! ```
//! use rankeval_core::{Document, EvaluatorConfig, MetricKind, RankingEvaluator, TraversalSpec};
//!
//! let query = Document::new().with_chunks(vec![
//!     Document::new().with_matches(vec![Document::new().with_tag("id", 1)]),
//! ]);
//! let truth = Document::new().with_chunks(vec![
//!     Document::new().with_matches(vec![Document::new().with_tag("id", 1)]),
//! ]);
//! let mut queries = vec![query];
//! let truths = vec![truth];
//!
//! let evaluator = RankingEvaluator::new(EvaluatorConfig::new(MetricKind::ReciprocalRank))?;
//! let chunks = TraversalSpec::parse("c")?;
//! evaluator.evaluate(Some(queries.as_mut_slice()), Some(truths.as_slice()), Some(&chunks))?;
//!
//! assert_eq!(queries[0].chunks[0].evaluation("reciprocal_rank").unwrap().value, 1.0);
//! # Ok::<(), rankeval_core::EvaluationError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod evaluation;

pub use config::EvaluatorConfig;
pub use document::{AttributeValue, Document, NamedScore, Node, NodeMut};
pub use error::{ConfigError, EvaluationError, Result};
pub use evaluation::{
    EvaluationRecord, EvaluationSink, MetricKind, MetricParams, RankedItem, RankingEvaluator,
    TraversalSpec,
};
