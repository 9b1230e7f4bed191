//! Weighted scorecards: matched risk factors into score deltas.
//!
//! Each scenario carries four scorecards, one per target assumption. A card
//! is a list of weighted attributes; every attribute holds an original index
//! and the card owns a versioned, monotonic index→score lookup table. When
//! matched risk factors reference a card attribute, each match moves that
//! attribute's index by the attribute's configured `index_change`.
//! Contributions accumulate additively, so the updated total never depends
//! on factor evaluation order.

use crate::error::EngineError;
use crate::factor::RiskFactor;
use loanrisk_core::types::{AssumptionKind, ScoreCardId};
use serde::{Deserialize, Serialize};

/// Tolerance for the weight-sum configuration check.
const WEIGHT_SUM_EPS: f64 = 1e-9;

/// One point of an index→score lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexScorePoint {
    /// Index value.
    pub index: i64,
    /// Score assigned at this index.
    pub score: f64,
}

/// Versioned, monotonic index→score lookup table owned by one scorecard.
///
/// Lookups floor to the greatest configured index not above the query and
/// clamp at both ends, so any integer index resolves to a score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexScoreMap {
    /// Configuration version of this table.
    pub version: u32,
    /// Points sorted by strictly increasing index, scores non-decreasing.
    pub entries: Vec<IndexScorePoint>,
}

impl IndexScoreMap {
    /// Builds a map from `(index, score)` pairs.
    pub fn new(version: u32, points: impl IntoIterator<Item = (i64, f64)>) -> Self {
        Self {
            version,
            entries: points
                .into_iter()
                .map(|(index, score)| IndexScorePoint { index, score })
                .collect(),
        }
    }

    /// Checks the table invariants: non-empty, strictly increasing indexes,
    /// non-decreasing scores.
    pub fn validate(&self) -> Result<(), String> {
        if self.entries.is_empty() {
            return Err("index-score map is empty".to_string());
        }
        for pair in self.entries.windows(2) {
            if pair[1].index <= pair[0].index {
                return Err(format!(
                    "index-score map indexes not strictly increasing at index {}",
                    pair[1].index
                ));
            }
            if pair[1].score < pair[0].score {
                return Err(format!(
                    "index-score map not monotonic at index {}",
                    pair[1].index
                ));
            }
        }
        Ok(())
    }

    /// Score for an index: floor lookup, clamped to the table's ends.
    pub fn score(&self, index: i64) -> f64 {
        debug_assert!(!self.entries.is_empty());
        match self.entries.binary_search_by_key(&index, |p| p.index) {
            Ok(i) => self.entries[i].score,
            Err(0) => self.entries[0].score,
            Err(i) => self.entries[i - 1].score,
        }
    }
}

/// One weighted line item of a scorecard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreCardAttribute {
    /// Loan attribute name this line item scores.
    pub attribute: String,
    /// Contribution weight, in `[0, 1]`.
    pub weight: f64,
    /// Configured baseline index.
    pub original_index: i64,
    /// Index movement contributed by each matched factor referencing this
    /// attribute.
    pub index_change: i64,
}

/// Weighted scoring sheet for one assumption kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Scorecard identifier.
    pub id: ScoreCardId,
    /// The assumption this card adjusts.
    pub adjusted_assumption: AssumptionKind,
    /// The card's index→score table.
    pub index_score_map: IndexScoreMap,
    /// Ordered line items.
    pub attributes: Vec<ScoreCardAttribute>,
}

impl ScoreCard {
    /// Checks the card's static configuration.
    ///
    /// Weights must each lie in `[0, 1]` and sum to at most 1 across the
    /// card; the index→score table must be monotonic. Violations are
    /// configuration errors reported before any evaluation starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        let config_err = |reason: String| EngineError::ScoreCardConfig {
            card: self.id,
            kind: self.adjusted_assumption,
            reason,
        };

        self.index_score_map.validate().map_err(config_err)?;

        let mut sum = 0.0;
        for attr in &self.attributes {
            if !(0.0..=1.0).contains(&attr.weight) {
                return Err(config_err(format!(
                    "attribute '{}' has weight {} outside [0, 1]",
                    attr.attribute, attr.weight
                )));
            }
            sum += attr.weight;
        }
        if sum > 1.0 + WEIGHT_SUM_EPS {
            return Err(config_err(format!("weights sum to {} (> 1)", sum)));
        }
        Ok(())
    }

    /// Baseline weighted total: Σ weight × score(original_index).
    pub fn total_score(&self) -> f64 {
        self.attributes
            .iter()
            .map(|a| a.weight * self.index_score_map.score(a.original_index))
            .sum()
    }

    /// Applies matched factors and recomputes the weighted total.
    ///
    /// Each matched factor whose `attribute` names a line item moves that
    /// item's index by the item's `index_change`; several factors on the
    /// same attribute accumulate additively. Factors naming attributes not
    /// on this card contribute nothing.
    pub fn score(&self, matched: &[&RiskFactor]) -> ScoreOutcome {
        let mut attributes = Vec::with_capacity(self.attributes.len());
        let mut total = 0.0;
        let mut updated_total = 0.0;

        for attr in &self.attributes {
            let hits = matched
                .iter()
                .filter(|f| f.attribute == attr.attribute)
                .count() as i64;
            let updated_index = attr.original_index + hits * attr.index_change;
            let original_score = self.index_score_map.score(attr.original_index);
            let updated_score = self.index_score_map.score(updated_index);

            total += attr.weight * original_score;
            updated_total += attr.weight * updated_score;
            attributes.push(AttributeScore {
                attribute: attr.attribute.clone(),
                weight: attr.weight,
                original_index: attr.original_index,
                original_score,
                updated_index,
                updated_score,
            });
        }

        ScoreOutcome {
            kind: self.adjusted_assumption,
            total_score: total,
            updated_total_score: updated_total,
            attributes,
        }
    }
}

/// Per-attribute detail of one scorecard evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeScore {
    /// Line-item attribute name.
    pub attribute: String,
    /// Contribution weight.
    pub weight: f64,
    /// Baseline index.
    pub original_index: i64,
    /// Baseline score.
    pub original_score: f64,
    /// Index after applying matched factors.
    pub updated_index: i64,
    /// Score at the updated index.
    pub updated_score: f64,
}

/// Result of evaluating one scorecard for one loan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreOutcome {
    /// The assumption kind the card targets.
    pub kind: AssumptionKind,
    /// Baseline weighted total.
    pub total_score: f64,
    /// Weighted total after matched factors.
    pub updated_total_score: f64,
    /// Per-attribute detail.
    pub attributes: Vec<AttributeScore>,
}
