//! Parallel scenario runner.
//!
//! Evaluation is embarrassingly parallel across (loan snapshot, scenario)
//! work items: every evaluation reads only the shared, immutable
//! [`ResolvedScenario`] and writes exactly one output record. The runner
//! processes loans in rayon batches above a configurable threshold, isolates
//! store failures to the pair that hit them, and honours a cancellation
//! flag at batch granularity; records already written stay valid.

use crate::adjust::{self, AdjustmentWarning, LoanAdjustedAssumption};
use crate::matcher::{match_factors, MatchDiagnostic};
use crate::resolver::ResolvedScenario;
use crate::store::{ResultStore, StoreError};
use loanrisk_core::loan::LoanRecord;
use loanrisk_core::types::{AssumptionKind, SnapshotId};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Batch size for parallel processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug)]
pub struct ParallelConfig {
    /// Work items per rayon batch.
    pub batch_size: usize,
    /// Minimum loan count before parallelism is used.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: 100,
        }
    }
}

impl ParallelConfig {
    /// Creates a configuration; the batch size is floored at 1.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Whether to use the parallel path for the given loan count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Everything produced by evaluating one loan under one scenario.
#[derive(Clone, Debug)]
pub struct LoanEvaluation {
    /// The adjusted-assumption record to persist.
    pub record: LoanAdjustedAssumption,
    /// Data-mismatch diagnostics from matching.
    pub diagnostics: Vec<MatchDiagnostic>,
    /// Domain-clamp warnings from adjustment.
    pub warnings: Vec<AdjustmentWarning>,
}

/// Evaluates one loan: match factors, run the four scorecards, adjust.
///
/// Pure with respect to its inputs; calling it twice with the same inputs
/// yields identical adjusted values.
pub fn evaluate_loan(resolved: &ResolvedScenario, loan: &LoanRecord) -> LoanEvaluation {
    let view = loan.view();
    let matches = match_factors(&view, &resolved.profiles);

    let outcomes = [
        resolved.cards[AssumptionKind::Cdr.index()].score(matches.matched(AssumptionKind::Cdr)),
        resolved.cards[AssumptionKind::Cpr.index()].score(matches.matched(AssumptionKind::Cpr)),
        resolved.cards[AssumptionKind::Recovery.index()]
            .score(matches.matched(AssumptionKind::Recovery)),
        resolved.cards[AssumptionKind::Lag.index()].score(matches.matched(AssumptionKind::Lag)),
    ];

    let (record, warnings) = adjust::assemble(
        view.snapshot_id(),
        resolved.scenario_id,
        &resolved.assumptions,
        &outcomes,
    );

    LoanEvaluation {
        record,
        diagnostics: matches.diagnostics,
        warnings,
    }
}

/// Outcome of one scenario run over a loan set.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Loans evaluated (excludes loans skipped by cancellation).
    pub evaluated: usize,
    /// Records successfully upserted.
    pub written: usize,
    /// Store failures, isolated per (snapshot, scenario) pair.
    pub failures: Vec<(SnapshotId, StoreError)>,
    /// Data-mismatch diagnostics across all loans.
    pub diagnostics: Vec<MatchDiagnostic>,
    /// Domain-clamp warnings across all loans.
    pub warnings: Vec<AdjustmentWarning>,
    /// True when the run was aborted by the cancellation flag.
    pub cancelled: bool,
}

impl RunSummary {
    fn merge(mut self, other: RunSummary) -> RunSummary {
        self.evaluated += other.evaluated;
        self.written += other.written;
        self.failures.extend(other.failures);
        self.diagnostics.extend(other.diagnostics);
        self.warnings.extend(other.warnings);
        self.cancelled |= other.cancelled;
        self
    }
}

/// Runs a resolved scenario over loan sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScenarioRunner {
    parallel: ParallelConfig,
}

impl ScenarioRunner {
    /// Creates a runner with the given parallel configuration.
    pub fn new(parallel: ParallelConfig) -> Self {
        Self { parallel }
    }

    /// Evaluates every loan and upserts the results.
    ///
    /// The resolved scenario is shared read-only across workers. A store
    /// failure fails only its own (loan, scenario) pair; sibling work items
    /// proceed. Setting `cancel` aborts remaining batches; records already
    /// written remain valid.
    pub fn run(
        &self,
        resolved: &ResolvedScenario,
        loans: &[LoanRecord],
        store: &dyn ResultStore,
        cancel: &AtomicBool,
    ) -> RunSummary {
        let summary = if self.parallel.should_parallelize(loans.len()) {
            loans
                .par_chunks(self.parallel.batch_size)
                .map(|batch| self.run_batch(resolved, batch, store, cancel))
                .reduce(RunSummary::default, RunSummary::merge)
        } else {
            self.run_batch(resolved, loans, store, cancel)
        };

        info!(
            scenario = %resolved.scenario_id,
            evaluated = summary.evaluated,
            written = summary.written,
            failures = summary.failures.len(),
            diagnostics = summary.diagnostics.len(),
            warnings = summary.warnings.len(),
            cancelled = summary.cancelled,
            "scenario run finished"
        );
        summary
    }

    fn run_batch(
        &self,
        resolved: &ResolvedScenario,
        batch: &[LoanRecord],
        store: &dyn ResultStore,
        cancel: &AtomicBool,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        if cancel.load(Ordering::Relaxed) {
            summary.cancelled = true;
            return summary;
        }

        for loan in batch {
            let evaluation = evaluate_loan(resolved, loan);
            summary.evaluated += 1;
            summary.diagnostics.extend(evaluation.diagnostics);
            summary.warnings.extend(evaluation.warnings);

            let snapshot_id = evaluation.record.loan_snapshot_id;
            match store.upsert(evaluation.record) {
                Ok(()) => summary.written += 1,
                Err(err) => {
                    warn!(
                        snapshot = %snapshot_id,
                        scenario = %resolved.scenario_id,
                        %err,
                        "result upsert failed for this pair, continuing"
                    );
                    summary.failures.push((snapshot_id, err));
                }
            }
        }
        summary
    }
}

/// Convenience for callers without a cancellation source.
pub fn run_to_completion(
    runner: &ScenarioRunner,
    resolved: &ResolvedScenario,
    loans: &[LoanRecord],
    store: &dyn ResultStore,
) -> RunSummary {
    let cancel = AtomicBool::new(false);
    runner.run(resolved, loans, store, &cancel)
}
