//! # Loanrisk Engine (Scenario Adjustment)
//!
//! The scenario adjustment engine: given a resolved scenario configuration
//! and a loan's attributes, produce the adjusted CDR/CPR/recovery/lag
//! assumptions that feed downstream cash-flow projection.
//!
//! This crate provides:
//! - Risk-profile resolution: materialising a scenario's risk factors with
//!   compiled conditionals and validated scorecards
//! - Conditional matching of risk factors against loan attribute bags
//! - Scorecard evaluation: matched factors into weighted score deltas
//! - Adjustment calculation: baseline × scorecard delta, domain-clamped
//! - A rayon worker pool over (loan snapshot, scenario) work items
//! - The result-store boundary with idempotent upserts and retry
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            loanrisk_engine                   │
//! ├──────────────────────────────────────────────┤
//! │  resolver/   - ResolvedScenario              │
//! │  matcher/    - conditional matching          │
//! │  scorecard/  - weighted score deltas         │
//! │  adjust/     - adjusted assumption assembly  │
//! │  engine/     - parallel scenario runner      │
//! │  store/      - ResultStore boundary          │
//! └──────────────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────────────┐
//! │            loanrisk_core                     │
//! │  loans, portfolios, scenarios, assumptions   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Evaluation is embarrassingly parallel: each (loan snapshot, scenario)
//! pair reads only the shared, immutable [`resolver::ResolvedScenario`] and
//! writes exactly one output record.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod adjust;
pub mod catalog;
pub mod conditional;
pub mod engine;
pub mod error;
pub mod factor;
pub mod matcher;
pub mod resolver;
pub mod scorecard;
pub mod store;

// Re-export commonly used types
pub use adjust::{AdjustmentWarning, LoanAdjustedAssumption};
pub use catalog::{
    risk_profile_record, InMemoryCatalog, RiskConditionalRecord, RiskFactorRecord,
    RiskProfileRecord, ScenarioCatalog,
};
pub use conditional::{ConditionValue, Conditional, ConditionalParseError, Operator, Scalar};
pub use engine::{
    evaluate_loan, run_to_completion, LoanEvaluation, ParallelConfig, RunSummary, ScenarioRunner,
    DEFAULT_BATCH_SIZE,
};
pub use error::EngineError;
pub use factor::{RiskFactor, RiskProfile};
pub use matcher::{match_factors, MatchDiagnostic, MatchOutcome, SkipReason};
pub use resolver::{resolve, ResolvedScenario};
pub use scorecard::{AttributeScore, IndexScoreMap, ScoreCard, ScoreCardAttribute, ScoreOutcome};
pub use store::{InMemoryResultStore, ResultStore, RetryingStore, StoreError};
