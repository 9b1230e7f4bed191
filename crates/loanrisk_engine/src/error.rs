//! Engine error types.
//!
//! Configuration errors (unknown ids, malformed conditionals, invalid
//! scorecard weights) fail a scenario run before evaluation begins. Data
//! mismatches during matching are deliberately *not* errors; they surface as
//! diagnostics on the evaluation result. Store failures are isolated to the
//! (loan, scenario) pair that hit them.

use crate::conditional::ConditionalParseError;
use crate::store::StoreError;
use loanrisk_core::types::{
    AssumptionKind, AssumptionProfileId, RiskFactorId, RiskProfileId, ScenarioId, ScoreCardId,
    ScoreCardProfileId,
};
use thiserror::Error;

/// Errors raised while resolving or running a scenario.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested scenario id does not exist in the catalog.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(ScenarioId),

    /// A scenario references an assumption profile that does not exist.
    #[error("assumption profile not found: {0}")]
    AssumptionProfileNotFound(AssumptionProfileId),

    /// A scenario references a scorecard profile that does not exist.
    #[error("scorecard profile not found: {0}")]
    ScoreCardProfileNotFound(ScoreCardProfileId),

    /// A scorecard profile references a scorecard that does not exist.
    #[error("scorecard not found: {0}")]
    ScoreCardNotFound(ScoreCardId),

    /// A scenario references a risk profile that does not exist.
    #[error("risk profile not found: {0}")]
    RiskProfileNotFound(RiskProfileId),

    /// A risk factor was authored without any conditionals.
    #[error("risk factor {0} has no conditionals")]
    EmptyRiskFactor(RiskFactorId),

    /// A risk factor targets an assumption the engine does not know.
    #[error("risk factor {factor}: unknown changing_assumption '{kind}'")]
    UnknownAssumptionKind {
        /// The offending factor.
        factor: RiskFactorId,
        /// The authored assumption name.
        kind: String,
    },

    /// A risk factor's conditional text could not be compiled.
    #[error("risk factor {factor}: {source}")]
    Conditional {
        /// The offending factor.
        factor: RiskFactorId,
        /// The underlying parse failure.
        source: ConditionalParseError,
    },

    /// A scorecard's static configuration is invalid (weights, score map).
    #[error("scorecard {card} ({kind}): {reason}")]
    ScoreCardConfig {
        /// The offending scorecard.
        card: ScoreCardId,
        /// The assumption kind the card targets.
        kind: AssumptionKind,
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A result-store write failed after retries.
    #[error(transparent)]
    Store(#[from] StoreError),
}
