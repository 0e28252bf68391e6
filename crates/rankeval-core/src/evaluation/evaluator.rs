//! Pairs actual and groundtruth trees and writes metric results onto the actual side.
//!
//! # Algorithm
//!
//! 1. Zip actual roots with groundtruth roots by position
//! 2. For each compiled traversal path, descend both trees in lockstep
//!    (children must line up 1:1, matches are zipped to the shorter side)
//! 3. At each terminal pair, extract the ranked items of both sides' matches
//! 4. Run the metric and store the result on the actual node
//!
//! The structure is checked for every path before anything is written, so a
//! mismatch leaves the actual tree untouched.

use super::metrics::{MetricFn, MetricKind, MetricParams, RankedItem};
use super::sink::{EvaluationRecord, EvaluationSink, TracingSink};
use super::traversal::{PathCode, TraversalPath, TraversalSpec};
use crate::config::EvaluatorConfig;
use crate::document::{NamedScore, Node, NodeMut};
use crate::error::{ConfigError, EvaluationError, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Reads ranked items off a list of matches.
#[derive(Debug, Clone, PartialEq)]
struct ItemExtractor {
    identity_fields: Vec<String>,
    relevance_field: Option<String>,
}

impl ItemExtractor {
    fn extract<N: Node>(&self, matches: &[N]) -> Vec<RankedItem> {
        matches
            .iter()
            .map(|node| RankedItem {
                identity: node.attributes(&self.identity_fields),
                relevance: self
                    .relevance_field
                    .as_deref()
                    .and_then(|field| node.attribute(field).as_f64()),
            })
            .collect()
    }
}

/// Where a terminal pair was reached.
struct VisitContext<'a> {
    query_index: usize,
    path: &'a str,
}

/// Evaluates ranked results against groundtruth.
///
/// Built once from an [`EvaluatorConfig`]; immutable afterwards, so one evaluator
/// can serve many `evaluate` calls, including from several threads on disjoint
/// query batches.
///
/// # Example
///
/// ```
/// use rankeval_core::{Document, EvaluatorConfig, MetricKind, RankingEvaluator};
///
/// let ids = |ids: &[i64]| -> Vec<Document> {
///     ids.iter().map(|&id| Document::new().with_tag("id", id)).collect()
/// };
/// let mut queries = vec![Document::new().with_matches(ids(&[0, 1, 2, 3, 4]))];
/// let groundtruth = vec![Document::new().with_matches(ids(&[1, 0, 20, 30, 40]))];
///
/// let evaluator =
///     RankingEvaluator::new(EvaluatorConfig::new(MetricKind::Precision).with_eval_at(2)).unwrap();
/// evaluator
///     .evaluate(Some(queries.as_mut_slice()), Some(groundtruth.as_slice()), None)
///     .unwrap();
///
/// assert_eq!(queries[0].evaluation("precision@2").unwrap().value, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct RankingEvaluator {
    metric: MetricKind,
    metric_fn: MetricFn,
    params: MetricParams,
    extractor: ItemExtractor,
    default_traversal: TraversalSpec,
    evaluation_name: String,
    sink: Arc<dyn EvaluationSink>,
}

impl RankingEvaluator {
    /// Builds an evaluator that reports results through `tracing`.
    pub fn new(config: EvaluatorConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Builds an evaluator that reports results to `sink`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NdcgAttributeFields`] if NDCG is not given exactly two attribute fields
    /// - [`ConfigError::MissingAttributeField`] if no attribute field is given
    /// - [`ConfigError::InvalidBeta`] if `beta` is not a positive finite number
    /// - [`ConfigError::InvalidTraversalPath`] if the default traversal does not parse
    pub fn with_sink(
        config: EvaluatorConfig,
        sink: Arc<dyn EvaluationSink>,
    ) -> std::result::Result<Self, ConfigError> {
        let fields = &config.attribute_fields;
        let extractor = if config.metric.requires_relevance() {
            match fields.as_slice() {
                [identity, relevance] => ItemExtractor {
                    identity_fields: vec![identity.clone()],
                    relevance_field: Some(relevance.clone()),
                },
                _ => return Err(ConfigError::NdcgAttributeFields(fields.len())),
            }
        } else if fields.is_empty() {
            return Err(ConfigError::MissingAttributeField);
        } else {
            ItemExtractor {
                identity_fields: fields.clone(),
                relevance_field: None,
            }
        };

        if !config.beta.is_finite() || config.beta <= 0.0 {
            return Err(ConfigError::InvalidBeta(config.beta));
        }

        let default_traversal = TraversalSpec::try_from(&config.default_traversal_path)?;
        let evaluation_name = config.evaluation_name();

        debug!(
            metric = %config.metric,
            evaluation = %evaluation_name,
            traversal = %default_traversal,
            "ranking evaluator configured"
        );

        Ok(Self {
            metric: config.metric,
            metric_fn: config.metric.function(),
            params: config.metric_params(),
            extractor,
            default_traversal,
            evaluation_name,
            sink,
        })
    }

    /// Metric this evaluator computes.
    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Name results are stored under.
    pub fn evaluation_name(&self) -> &str {
        &self.evaluation_name
    }

    /// Traversal used when `evaluate` gets no override.
    pub fn default_traversal(&self) -> &TraversalSpec {
        &self.default_traversal
    }

    /// Metric parameters passed to every computation.
    pub fn params(&self) -> &MetricParams {
        &self.params
    }

    /// Evaluates `actual` against `groundtruth` and stores the results on `actual`.
    ///
    /// Roots are paired by position. Absent or empty inputs are a no-op.
    /// `traversal` overrides the configured default traversal for this call.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::StructuralMismatch`] if the root counts differ or, along
    /// any traversal path, two paired nodes have different numbers of children.
    /// Nothing is written when an error is returned.
    pub fn evaluate<A, G>(
        &self,
        actual: Option<&mut [A]>,
        groundtruth: Option<&[G]>,
        traversal: Option<&TraversalSpec>,
    ) -> Result<()>
    where
        A: NodeMut,
        G: Node,
    {
        let (Some(actual), Some(groundtruth)) = (actual, groundtruth) else {
            trace!("missing actual or groundtruth documents, skipping evaluation");
            return Ok(());
        };
        if actual.is_empty() || groundtruth.is_empty() {
            trace!("no documents to evaluate");
            return Ok(());
        }
        if actual.len() != groundtruth.len() {
            return Err(EvaluationError::StructuralMismatch {
                location: "root".to_string(),
                actual: actual.len(),
                groundtruth: groundtruth.len(),
            });
        }

        let spec = traversal.unwrap_or(&self.default_traversal);

        for path in spec.paths() {
            for (doc, truth) in actual.iter().zip(groundtruth) {
                check_structure(doc, truth, path, 0)?;
            }
        }

        let mut evaluated = 0usize;
        for path in spec.paths() {
            let label = path.to_string();
            for (query_index, (doc, truth)) in actual.iter_mut().zip(groundtruth).enumerate() {
                let ctx = VisitContext {
                    query_index,
                    path: &label,
                };
                evaluated += self.visit(doc, truth, path.steps(), &ctx);
            }
        }

        debug!(
            evaluation = %self.evaluation_name,
            queries = actual.len(),
            traversal = %spec,
            evaluated,
            "evaluation finished"
        );
        Ok(())
    }

    /// Like [`evaluate`](Self::evaluate), with the traversal override given as
    /// text, e.g. `"r,cm"`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::Config`] if `traversal` does not parse; nothing is
    /// written in that case. Otherwise as for `evaluate`.
    pub fn evaluate_paths<A, G>(
        &self,
        actual: Option<&mut [A]>,
        groundtruth: Option<&[G]>,
        traversal: &str,
    ) -> Result<()>
    where
        A: NodeMut,
        G: Node,
    {
        let spec = TraversalSpec::parse(traversal)?;
        self.evaluate(actual, groundtruth, Some(&spec))
    }

    /// Descends along `steps` and evaluates every terminal pair. Returns the pair count.
    fn visit<A, G>(
        &self,
        actual: &mut A,
        groundtruth: &G,
        steps: &[PathCode],
        ctx: &VisitContext<'_>,
    ) -> usize
    where
        A: NodeMut,
        G: Node,
    {
        match steps.split_first() {
            None | Some((PathCode::Root, _)) => {
                self.evaluate_pair(actual, groundtruth, ctx);
                1
            }
            Some((PathCode::Children, rest)) => actual
                .children_mut()
                .iter_mut()
                .zip(groundtruth.children())
                .map(|(doc, truth)| self.visit(doc, truth, rest, ctx))
                .sum(),
            Some((PathCode::Matches, rest)) => actual
                .matches_mut()
                .iter_mut()
                .zip(groundtruth.matches())
                .map(|(doc, truth)| self.visit(doc, truth, rest, ctx))
                .sum(),
        }
    }

    fn evaluate_pair<A, G>(&self, actual: &mut A, groundtruth: &G, ctx: &VisitContext<'_>)
    where
        A: NodeMut,
        G: Node,
    {
        let ranked = self.extractor.extract(actual.matches());
        let desired = self.extractor.extract(groundtruth.matches());
        let value = (self.metric_fn)(&ranked, &desired, &self.params);

        actual.set_evaluation(
            &self.evaluation_name,
            NamedScore::new(value, self.metric.as_str()),
        );

        self.sink.record(&EvaluationRecord {
            evaluation_name: &self.evaluation_name,
            metric: self.metric.as_str(),
            query_index: ctx.query_index,
            path: ctx.path,
            actual_len: ranked.len(),
            desired_len: desired.len(),
            value,
        });
    }
}

/// Verifies that children line up along `path` below this pair.
fn check_structure<A, G>(
    actual: &A,
    groundtruth: &G,
    path: &TraversalPath,
    depth: usize,
) -> Result<()>
where
    A: Node,
    G: Node,
{
    match path.steps().get(depth) {
        None | Some(PathCode::Root) => Ok(()),
        Some(PathCode::Children) => {
            let (docs, truths) = (actual.children(), groundtruth.children());
            if docs.len() != truths.len() {
                return Err(EvaluationError::StructuralMismatch {
                    location: format!("path {:?} step {}", path.to_string(), depth + 1),
                    actual: docs.len(),
                    groundtruth: truths.len(),
                });
            }
            docs.iter()
                .zip(truths)
                .try_for_each(|(doc, truth)| check_structure(doc, truth, path, depth + 1))
        }
        Some(PathCode::Matches) => actual
            .matches()
            .iter()
            .zip(groundtruth.matches())
            .try_for_each(|(doc, truth)| check_structure(doc, truth, path, depth + 1)),
    }
}
