//! # Loanrisk Core (Domain Layer)
//!
//! Domain entities for the loanrisk MBS risk-management platform.
//!
//! This crate provides:
//! - Loan origination facts and point-in-time snapshots
//! - Portfolio containers with recomputable aggregate statistics
//! - Baseline macro-economic assumption profiles
//! - Scenario and scorecard-profile references
//! - Strongly-typed entity identifiers and the loan attribute bag
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           loanrisk_core                 │
//! ├─────────────────────────────────────────┤
//! │  loan/        - LoanStatic, Snapshot    │
//! │  portfolio/   - Portfolio, stats cache  │
//! │  assumptions/ - AssumptionProfile       │
//! │  scenario/    - Scenario, card profile  │
//! │  types/       - ids, attribute values   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The crate is dependency-light on purpose: the adjustment engine lives in
//! `loanrisk_engine` and consumes these entities read-only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod assumptions;
pub mod fixtures;
pub mod loan;
pub mod portfolio;
pub mod scenario;
pub mod types;

// Re-export commonly used types
pub use assumptions::{AssumptionProfile, AssumptionProfileBuilder};
pub use loan::{LoanRecord, LoanSnapshot, LoanStatic, LoanStatus, LoanView};
pub use portfolio::{Portfolio, PortfolioStats};
pub use scenario::{Scenario, ScoreCardProfile};
pub use types::{
    AssumptionKind, AssumptionProfileId, AttributeType, AttributeValue, LoanId, PortfolioId,
    RiskFactorId, RiskProfileId, ScenarioId, ScoreCardId, ScoreCardProfileId, SnapshotId,
};
