//! Standard Information Retrieval metrics for evaluating a ranking against groundtruth.
//!
//! This module implements metrics commonly used in IR research:
//! - Precision, Recall, F-score
//! - Reciprocal Rank
//! - Average Precision
//! - NDCG (Normalized Discounted Cumulative Gain)
//!
//! Every metric shares one contract ([`MetricFn`]): it takes the ranked items
//! returned by the system under evaluation (`actual`) and the groundtruth items
//! (`desired`), and returns a non-negative score. Empty inputs yield `0.0`.
//!
//! # References
//!
//! - Järvelin & Kekäläinen (2002). "Cumulated gain-based evaluation of IR techniques"
//! - Burges et al. (2005). "Learning to rank using gradient descent"
//! - Voorhees & Harman (2005). "TREC: Experiment and Evaluation in Information Retrieval"

use crate::document::AttributeValue;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// One entry of a ranked sequence.
///
/// `identity` decides whether two entries are the same item (exact tuple
/// equality). `relevance` is a graded score read from a separate attribute and
/// is only used by NDCG.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    /// Attribute tuple identifying the item
    pub identity: Vec<AttributeValue>,
    /// Graded relevance (actual side: the system's score; desired side: the judgment)
    pub relevance: Option<f64>,
}

impl RankedItem {
    /// Creates an item identified by a single attribute.
    pub fn new(identity: impl Into<AttributeValue>) -> Self {
        Self {
            identity: vec![identity.into()],
            relevance: None,
        }
    }

    /// Creates an item with a graded relevance.
    pub fn graded(identity: impl Into<AttributeValue>, relevance: f64) -> Self {
        Self {
            identity: vec![identity.into()],
            relevance: Some(relevance),
        }
    }
}

/// Parameters shared by all metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricParams {
    /// Only the first `eval_at` actual items are considered
    pub eval_at: Option<usize>,
    /// F-score weight; recall is weighted `beta` times as much as precision
    pub beta: f64,
    /// NDCG gain is `2^rel - 1` instead of `rel`
    pub power_relevance: bool,
    /// Actual-side scores are relevances (higher is better) rather than distances
    pub is_relevance_score: bool,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            eval_at: None,
            beta: 1.0,
            power_relevance: true,
            is_relevance_score: true,
        }
    }
}

/// Signature shared by every metric.
pub type MetricFn = fn(&[RankedItem], &[RankedItem], &MetricParams) -> f64;

/// The supported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricKind {
    /// Fraction of the top-k that is relevant
    Precision,
    /// Fraction of the relevant items found in the top-k
    Recall,
    /// Weighted harmonic mean of precision and recall
    Fscore,
    /// Inverse rank of the first relevant item
    ReciprocalRank,
    /// Mean precision at each relevant position
    AveragePrecision,
    /// Normalized discounted cumulative gain over graded relevance
    Ndcg,
}

impl MetricKind {
    /// All metrics, in declaration order.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Precision,
        MetricKind::Recall,
        MetricKind::Fscore,
        MetricKind::ReciprocalRank,
        MetricKind::AveragePrecision,
        MetricKind::Ndcg,
    ];

    /// Configuration name of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Precision => "precision",
            MetricKind::Recall => "recall",
            MetricKind::Fscore => "fscore",
            MetricKind::ReciprocalRank => "reciprocal_rank",
            MetricKind::AveragePrecision => "average_precision",
            MetricKind::Ndcg => "ndcg",
        }
    }

    /// Whether the metric reads a relevance field in addition to the identity.
    pub fn requires_relevance(&self) -> bool {
        matches!(self, MetricKind::Ndcg)
    }

    /// The implementation of this metric.
    pub fn function(&self) -> MetricFn {
        match self {
            MetricKind::Precision => precision,
            MetricKind::Recall => recall,
            MetricKind::Fscore => fscore,
            MetricKind::ReciprocalRank => reciprocal_rank,
            MetricKind::AveragePrecision => average_precision,
            MetricKind::Ndcg => ndcg,
        }
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(MetricKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMetric {
                name: s.to_string(),
                supported: Self::supported(),
            })
    }
}

impl TryFrom<String> for MetricKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricKind> for String {
    fn from(kind: MetricKind) -> Self {
        kind.as_str().to_string()
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Returns the first `eval_at` items (all of them without a cutoff).
fn top_k<'a>(actual: &'a [RankedItem], eval_at: Option<usize>) -> &'a [RankedItem] {
    match eval_at {
        Some(k) => &actual[..k.min(actual.len())],
        None => actual,
    }
}

/// Distinct identities of the groundtruth items.
fn identity_set(items: &[RankedItem]) -> HashSet<&[AttributeValue]> {
    items.iter().map(|item| item.identity.as_slice()).collect()
}

/// Number of distinct relevant identities among `top`.
fn relevant_hits(top: &[RankedItem], relevant: &HashSet<&[AttributeValue]>) -> usize {
    top.iter()
        .map(|item| item.identity.as_slice())
        .filter(|id| relevant.contains(id))
        .collect::<HashSet<_>>()
        .len()
}

// ============================================================================
// Set-Based Metrics: Precision, Recall, F-score
// ============================================================================

/// Computes Precision (at `eval_at` when set).
///
/// # Formula
///
/// ```text
/// P@k = |relevant ∩ top_k| / |top_k|
/// ```
///
/// The denominator is the number of items actually inspected, so a cutoff
/// beyond the list length gives the same result as no cutoff.
///
/// # Returns
///
/// Precision between 0.0 and 1.0. Returns 0.0 when either list is empty or the
/// cutoff is 0.
pub fn precision(actual: &[RankedItem], desired: &[RankedItem], params: &MetricParams) -> f64 {
    if actual.is_empty() || desired.is_empty() {
        return 0.0;
    }
    let top = top_k(actual, params.eval_at);
    if top.is_empty() {
        return 0.0;
    }

    let hits = relevant_hits(top, &identity_set(desired));
    hits as f64 / top.len() as f64
}

/// Computes Recall (at `eval_at` when set).
///
/// # Formula
///
/// ```text
/// R@k = |relevant ∩ top_k| / |relevant|
/// ```
///
/// # Returns
///
/// Recall between 0.0 and 1.0. Returns 0.0 if there is nothing relevant.
pub fn recall(actual: &[RankedItem], desired: &[RankedItem], params: &MetricParams) -> f64 {
    if actual.is_empty() || desired.is_empty() {
        return 0.0;
    }
    let relevant = identity_set(desired);
    let top = top_k(actual, params.eval_at);

    relevant_hits(top, &relevant) as f64 / relevant.len() as f64
}

/// Computes the F-score, the weighted harmonic mean of precision and recall.
///
/// # Formula
///
/// ```text
/// F_β = (1 + β²) * P * R / (β² * P + R)
/// ```
///
/// With `beta = 1` this is the familiar F1.
///
/// # Returns
///
/// F-score between 0.0 and 1.0. Returns 0.0 if both precision and recall are 0.
pub fn fscore(actual: &[RankedItem], desired: &[RankedItem], params: &MetricParams) -> f64 {
    let p = precision(actual, desired, params);
    let r = recall(actual, desired, params);
    let beta_sq = params.beta * params.beta;
    let denominator = beta_sq * p + r;

    if p + r == 0.0 || denominator == 0.0 {
        0.0
    } else {
        (1.0 + beta_sq) * p * r / denominator
    }
}

// ============================================================================
// Rank-Based Metrics: Reciprocal Rank, Average Precision
// ============================================================================

/// Computes Reciprocal Rank.
///
/// # Formula
///
/// ```text
/// RR = 1 / rank_of_first_relevant_result
/// ```
///
/// # Returns
///
/// Between 0.0 and 1.0. Returns 0.0 if no relevant item appears within the cutoff.
pub fn reciprocal_rank(
    actual: &[RankedItem],
    desired: &[RankedItem],
    params: &MetricParams,
) -> f64 {
    if actual.is_empty() || desired.is_empty() {
        return 0.0;
    }
    let relevant = identity_set(desired);

    top_k(actual, params.eval_at)
        .iter()
        .position(|item| relevant.contains(item.identity.as_slice()))
        .map(|i| 1.0 / (i + 1) as f64)
        .unwrap_or(0.0)
}

/// Computes Average Precision.
///
/// Average Precision is the mean of the precision values taken at each position
/// that holds a relevant result. Every relevant position contributes, while
/// precision at that position counts each identity once, so a repeated hit
/// lowers the average.
///
/// # Formula
///
/// ```text
/// AP = (1 / |hit positions|) * Σ P@i   over positions i holding a hit
/// ```
///
/// Only membership in `desired` matters, so the order of `desired` has no effect.
///
/// # Returns
///
/// Between 0.0 and 1.0. Returns 0.0 if no relevant item is found.
pub fn average_precision(
    actual: &[RankedItem],
    desired: &[RankedItem],
    params: &MetricParams,
) -> f64 {
    if actual.is_empty() || desired.is_empty() {
        return 0.0;
    }
    let relevant = identity_set(desired);
    let mut found = HashSet::new();
    let mut precision_sum = 0.0;
    let mut positions = 0usize;

    for (i, item) in top_k(actual, params.eval_at).iter().enumerate() {
        let id = item.identity.as_slice();
        if relevant.contains(id) {
            found.insert(id);
            positions += 1;
            precision_sum += found.len() as f64 / (i + 1) as f64;
        }
    }

    if positions == 0 {
        0.0
    } else {
        precision_sum / positions as f64
    }
}

// ============================================================================
// NDCG (Normalized Discounted Cumulative Gain)
// ============================================================================

/// Computes NDCG (at `eval_at` when set).
///
/// `actual` is first ordered by its own relevance field: descending when
/// `is_relevance_score` is set, ascending when the field holds distances. Each
/// ranked item then earns the groundtruth relevance of its identity (0 when
/// the identity is unknown; each groundtruth item is credited once).
///
/// # Formula
///
/// ```text
/// power_relevance:  DCG@k = Σ (2^rel_i - 1) / log₂(i + 1)
/// linear:           DCG@k = rel_1 + Σ_{i≥2} rel_i / log₂(i)
/// IDCG@k = DCG of the groundtruth relevances sorted descending
/// NDCG@k = DCG@k / IDCG@k
/// ```
///
/// Negative, missing and NaN relevances are treated as 0.
///
/// # Returns
///
/// NDCG between 0.0 and 1.0. Returns 0.0 when IDCG is 0.
///
/// # Example
///
/// ```
/// use rankeval_core::evaluation::metrics::{ndcg, MetricParams, RankedItem};
///
/// let actual = vec![RankedItem::graded(1, 0.9), RankedItem::graded(2, 0.5)];
/// let desired = vec![RankedItem::graded(1, 2.0), RankedItem::graded(2, 1.0)];
/// let score = ndcg(&actual, &desired, &MetricParams::default());
/// assert!((score - 1.0).abs() < 1e-9);
/// ```
pub fn ndcg(actual: &[RankedItem], desired: &[RankedItem], params: &MetricParams) -> f64 {
    if actual.is_empty() || desired.is_empty() {
        return 0.0;
    }

    let mut ranked: Vec<&RankedItem> = actual.iter().collect();
    ranked.sort_by(|a, b| {
        let (a, b) = (relevance_of(a), relevance_of(b));
        if params.is_relevance_score {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    });
    let k = params.eval_at.unwrap_or(ranked.len());

    let mut judgments: HashMap<&[AttributeValue], f64> = HashMap::new();
    for item in desired {
        judgments
            .entry(item.identity.as_slice())
            .or_insert(relevance_of(item));
    }

    let gains: Vec<f64> = ranked
        .iter()
        .take(k)
        .map(|item| judgments.remove(item.identity.as_slice()).unwrap_or(0.0))
        .collect();

    let mut ideal: Vec<f64> = desired
        .iter()
        .map(relevance_of)
        .collect();
    ideal.sort_by(|a, b| b.total_cmp(a));
    ideal.truncate(k);

    let idcg = dcg(&ideal, params.power_relevance);
    if idcg <= 0.0 {
        return 0.0;
    }
    dcg(&gains, params.power_relevance) / idcg
}

/// Relevance of an item; missing or NaN reads as 0.
#[inline]
fn relevance_of(item: &RankedItem) -> f64 {
    match item.relevance {
        Some(rel) if !rel.is_nan() => rel,
        _ => 0.0,
    }
}

/// Computes DCG over gains listed in rank order.
fn dcg(relevances: &[f64], power_relevance: bool) -> f64 {
    relevances
        .iter()
        .enumerate()
        .map(|(i, &rel)| gain(rel, power_relevance) / discount(i + 1, power_relevance))
        .sum()
}

/// Gain earned by a relevance level.
#[inline]
fn gain(relevance: f64, power_relevance: bool) -> f64 {
    let relevance = relevance.max(0.0);
    if power_relevance {
        relevance.exp2() - 1.0
    } else {
        relevance
    }
}

/// Discount for a 1-indexed rank.
///
/// Exponential gain pairs with `log₂(rank + 1)`; linear gain uses the original
/// Järvelin-Kekäläinen `max(1, log₂(rank))`, leaving ranks 1 and 2 undiscounted.
///
/// The linear branch must stay `max(1, log₂(rank))` rather than `log₂(rank + 1)`:
/// the reference scenario (ids `[1, 3, 4, 2]` scored `[0.0, 0.1, 0.2, 0.3]`,
/// judgments `{1: 0.8, 3: 0.4, 4: 0.1, 2: 0.0}`, k = 3) yields ≈0.279 only with
/// this discount, and `test_ndcg_graded_relevance` pins it.
#[inline]
fn discount(rank: usize, power_relevance: bool) -> f64 {
    if power_relevance {
        (rank as f64 + 1.0).log2()
    } else {
        (rank as f64).log2().max(1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
