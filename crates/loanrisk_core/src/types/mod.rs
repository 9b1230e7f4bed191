//! Shared primitive types: entity identifiers, assumption kinds, and the
//! attribute-value representation used by the conditional matcher.

mod ids;
mod kind;
mod value;

pub use ids::{
    AssumptionProfileId, LoanId, PortfolioId, RiskFactorId, RiskProfileId, ScenarioId,
    ScoreCardId, ScoreCardProfileId, SnapshotId,
};
pub use kind::AssumptionKind;
pub use value::{AttributeType, AttributeValue};
