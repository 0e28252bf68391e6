//! Error types for rankeval-core.
//!
//! Two failure classes exist:
//! - [`ConfigError`] is raised while building a [`RankingEvaluator`](crate::RankingEvaluator)
//!   and means no evaluator was created.
//! - [`EvaluationError`] is raised by a single `evaluate` call when the actual and
//!   groundtruth trees cannot be paired.
//!
//! Degenerate metric inputs (empty lists, zero ideal DCG) are not errors; metrics
//! resolve them to `0.0`.

use thiserror::Error;

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Errors detected while validating evaluator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Metric name is not one of the supported metrics
    #[error("Evaluation metric {name} is not supported. Potential values are {supported}")]
    UnknownMetric {
        /// The rejected metric name
        name: String,
        /// Comma-separated list of accepted names
        supported: String,
    },
    /// NDCG needs an identity field and a relevance field
    #[error("Metric ndcg requires exactly two attribute fields (identity, relevance), got {0}")]
    NdcgAttributeFields(usize),
    /// No attribute field was configured
    #[error("At least one attribute field is required")]
    MissingAttributeField,
    /// A traversal path contains an unknown code or is empty
    #[error("Invalid traversal path {path:?}: {reason}")]
    InvalidTraversalPath {
        /// The offending path as written
        path: String,
        /// Why it was rejected
        reason: String,
    },
    /// F-score weight must be a positive finite number
    #[error("Invalid beta {0}: must be finite and greater than zero")]
    InvalidBeta(f64),
}

/// Errors that abort a single `evaluate` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// The two trees do not line up at a descent point
    #[error(
        "Structural mismatch at {location}: actual has {actual} nodes, groundtruth has {groundtruth}"
    )]
    StructuralMismatch {
        /// Where the mismatch was found, e.g. `root` or `path "cc" depth 2`
        location: String,
        /// Number of actual-side nodes at that point
        actual: usize,
        /// Number of groundtruth-side nodes at that point
        groundtruth: usize,
    },
    /// A traversal override given as text did not parse
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_metric_message_lists_supported() {
        let err = ConfigError::UnknownMetric {
            name: "non-existant".to_string(),
            supported: "precision, recall".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("non-existant"));
        assert!(msg.contains("precision, recall"));
    }

    #[test]
    fn test_config_error_converts_into_evaluation_error() {
        let err: EvaluationError = ConfigError::MissingAttributeField.into();
        assert!(matches!(err, EvaluationError::Config(_)));
    }

    #[test]
    fn test_structural_mismatch_message() {
        let err = EvaluationError::StructuralMismatch {
            location: "root".to_string(),
            actual: 1,
            groundtruth: 0,
        };
        assert_eq!(
            err.to_string(),
            "Structural mismatch at root: actual has 1 nodes, groundtruth has 0"
        );
    }
}
