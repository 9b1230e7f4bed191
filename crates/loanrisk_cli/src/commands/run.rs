//! Run command implementation
//!
//! Resolves a scenario from a catalog file, evaluates a loan file against
//! it, and writes the adjusted-assumption records as JSON.

use loanrisk_core::types::ScenarioId;
use loanrisk_engine::{
    resolve, run_to_completion, InMemoryResultStore, ParallelConfig, ScenarioRunner,
};
use tracing::{info, warn};

use crate::input::{load_catalog, load_loans};
use crate::Result;

/// Run the run command.
pub fn run(
    catalog_path: &str,
    loans_path: &str,
    scenario_id: u64,
    batch_size: usize,
    output: Option<&str>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let loans = load_loans(loans_path)?;
    info!("Loaded {} loans from {}", loans.len(), loans_path);

    let resolved = resolve(&catalog, ScenarioId::new(scenario_id))?;
    info!(
        "Resolved scenario '{}' with {} risk factors",
        resolved.scenario_name,
        resolved.factor_count()
    );

    let runner = ScenarioRunner::new(ParallelConfig {
        batch_size,
        ..ParallelConfig::default()
    });
    let store = InMemoryResultStore::new();
    let summary = run_to_completion(&runner, &resolved, &loans, &store);

    for (snapshot, err) in &summary.failures {
        warn!("Write failed for snapshot {}: {}", snapshot, err);
    }
    info!(
        "Evaluated {} loans, wrote {} records ({} diagnostics, {} warnings)",
        summary.evaluated,
        summary.written,
        summary.diagnostics.len(),
        summary.warnings.len()
    );

    let records = store.into_records();
    let rendered = serde_json::to_string_pretty(&records)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Results written to {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
