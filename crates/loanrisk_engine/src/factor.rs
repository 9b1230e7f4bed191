//! Compiled risk factors and risk profiles.
//!
//! These are the in-memory, fully-materialised forms the matcher runs
//! against. The raw authored rows (freeform conditional text) live in
//! [`crate::catalog`]; compilation happens once, in the resolver, and
//! evaluation happens in [`crate::matcher`].

use crate::conditional::Conditional;
use loanrisk_core::types::{AssumptionKind, RiskFactorId, RiskProfileId};
use serde::{Deserialize, Serialize};

/// One conditional adjustment rule, compiled and ready to match.
///
/// A factor applies to a loan iff every conditional holds. `percentage_change`
/// is the authored magnitude retained from the source row; the numeric
/// adjustment itself flows through the scorecards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor identifier.
    pub id: RiskFactorId,
    /// The owning risk profile.
    pub risk_profile_id: RiskProfileId,
    /// The loan attribute this factor is keyed on; also names the scorecard
    /// attribute it contributes to.
    pub attribute: String,
    /// Which assumption this factor adjusts.
    pub changing_assumption: AssumptionKind,
    /// Authored percentage magnitude, kept for diagnostics and reporting.
    pub percentage_change: f64,
    /// Compiled predicates; all must hold (AND).
    pub conditionals: Vec<Conditional>,
}

/// A named bundle of compiled risk factors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Profile identifier.
    pub id: RiskProfileId,
    /// Display name, e.g. "FICO Scores Above 500".
    pub name: String,
    /// Factors in authored order.
    pub factors: Vec<RiskFactor>,
}
