//! Identifier types for domain entities.
//!
//! This module provides strongly-typed identifiers for loans, snapshots,
//! portfolios, scenarios, and risk/scorecard configuration entities. Using
//! newtypes ensures type safety and prevents accidental misuse of
//! identifiers (e.g. passing a loan id where a snapshot id is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from its raw numeric value.
            #[inline]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric value.
            #[inline]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a portfolio.
    PortfolioId
);
entity_id!(
    /// Unique identifier for a loan's immutable origination record.
    LoanId
);
entity_id!(
    /// Unique identifier for a point-in-time loan snapshot.
    SnapshotId
);
entity_id!(
    /// Unique identifier for a stress scenario.
    ScenarioId
);
entity_id!(
    /// Unique identifier for a baseline assumption profile.
    AssumptionProfileId
);
entity_id!(
    /// Unique identifier for a risk profile (bundle of risk factors).
    RiskProfileId
);
entity_id!(
    /// Unique identifier for a single risk factor.
    RiskFactorId
);
entity_id!(
    /// Unique identifier for a scorecard-profile bundle.
    ScoreCardProfileId
);
entity_id!(
    /// Unique identifier for one weighted scorecard.
    ScoreCardId
);
