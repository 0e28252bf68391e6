//! Evaluator configuration and its defaults.
//!
//! [`EvaluatorConfig`] is plain data and can be deserialized from JSON; every
//! field is optional and falls back to the constants below. Validation happens
//! when the config is handed to [`RankingEvaluator::new`](crate::RankingEvaluator::new).
//!
//! # Usage
//!
//! ```
//! use rankeval_core::config::EvaluatorConfig;
//! use rankeval_core::MetricKind;
//!
//! let config: EvaluatorConfig = serde_json::from_str(
//!     r#"{"metric": "recall", "eval_at": 10, "default_traversal_path": "r,c"}"#,
//! )
//! .unwrap();
//! assert_eq!(config.metric, MetricKind::Recall);
//! assert_eq!(config.evaluation_name(), "recall@10");
//! ```

use crate::evaluation::metrics::{MetricKind, MetricParams};
use crate::evaluation::traversal::TraversalPaths;
use serde::{Deserialize, Serialize};

// =============================================================================
// Defaults
// =============================================================================

/// Metric used when none is configured.
pub const DEFAULT_METRIC: MetricKind = MetricKind::Precision;

/// F-score weight. 1.0 weighs precision and recall equally.
pub const DEFAULT_BETA: f64 = 1.0;

/// NDCG uses exponential gain (`2^rel - 1`) by default.
pub const DEFAULT_POWER_RELEVANCE: bool = true;

/// Scores are treated as relevances (higher is better) by default.
pub const DEFAULT_IS_RELEVANCE_SCORE: bool = true;

/// Attribute identifying a match: the `id` tag.
pub const DEFAULT_ATTRIBUTE_ID: &str = "tags__id";

/// Evaluate the root pairs only.
pub const DEFAULT_TRAVERSAL_PATH: &str = "r";

// =============================================================================
// EvaluatorConfig
// =============================================================================

/// Configuration of a [`RankingEvaluator`](crate::RankingEvaluator).
///
/// `attribute_fields` lists the attributes read from each match. NDCG expects
/// exactly two: the identity attribute and the relevance attribute. The other
/// metrics compare matches by the tuple of all listed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Metric to compute
    pub metric: MetricKind,
    /// Only the first `eval_at` matches are evaluated
    pub eval_at: Option<usize>,
    /// F-score weight
    pub beta: f64,
    /// NDCG exponential gain
    pub power_relevance: bool,
    /// Actual-side scores are relevances rather than distances
    pub is_relevance_score: bool,
    /// Attribute paths read from each match
    pub attribute_fields: Vec<String>,
    /// Traversal used when `evaluate` is called without an override
    pub default_traversal_path: TraversalPaths,
    /// Name results are stored under; derived from metric and cutoff when unset
    pub evaluation_name: Option<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            metric: DEFAULT_METRIC,
            eval_at: None,
            beta: DEFAULT_BETA,
            power_relevance: DEFAULT_POWER_RELEVANCE,
            is_relevance_score: DEFAULT_IS_RELEVANCE_SCORE,
            attribute_fields: vec![DEFAULT_ATTRIBUTE_ID.to_string()],
            default_traversal_path: TraversalPaths::default(),
            evaluation_name: None,
        }
    }
}

impl EvaluatorConfig {
    /// Creates a default config for `metric`.
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    /// Sets the cutoff.
    pub fn with_eval_at(mut self, eval_at: usize) -> Self {
        self.eval_at = Some(eval_at);
        self
    }

    /// Sets the F-score weight.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Enables or disables exponential NDCG gain.
    pub fn with_power_relevance(mut self, power_relevance: bool) -> Self {
        self.power_relevance = power_relevance;
        self
    }

    /// Declares whether scores are relevances (`true`) or distances (`false`).
    pub fn with_relevance_score(mut self, is_relevance_score: bool) -> Self {
        self.is_relevance_score = is_relevance_score;
        self
    }

    /// Replaces the attribute paths read from each match.
    pub fn with_attribute_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default traversal.
    pub fn with_traversal_path(mut self, paths: impl Into<TraversalPaths>) -> Self {
        self.default_traversal_path = paths.into();
        self
    }

    /// Overrides the evaluation name.
    pub fn with_evaluation_name(mut self, name: impl Into<String>) -> Self {
        self.evaluation_name = Some(name.into());
        self
    }

    /// Name results are stored under.
    ///
    /// The explicit override wins; otherwise `"{metric}@{eval_at}"` with a cutoff
    /// and plain `"{metric}"` without.
    pub fn evaluation_name(&self) -> String {
        match (&self.evaluation_name, self.eval_at) {
            (Some(name), _) => name.clone(),
            (None, Some(k)) => format!("{}@{}", self.metric, k),
            (None, None) => self.metric.to_string(),
        }
    }

    /// Metric parameters derived from this config.
    pub fn metric_params(&self) -> MetricParams {
        MetricParams {
            eval_at: self.eval_at,
            beta: self.beta,
            power_relevance: self.power_relevance,
            is_relevance_score: self.is_relevance_score,
        }
    }
}
