//! Validate command implementation
//!
//! Resolves a scenario without running it, surfacing configuration errors
//! (missing entities, invalid scorecards, malformed conditionals) before a
//! full portfolio run is attempted.

use loanrisk_core::types::ScenarioId;
use loanrisk_engine::resolve;
use tracing::info;

use crate::input::load_catalog;
use crate::Result;

/// Run the validate command.
pub fn run(catalog_path: &str, scenario_id: u64) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let resolved = resolve(&catalog, ScenarioId::new(scenario_id))?;

    info!("Scenario '{}' is valid", resolved.scenario_name);
    info!("  Risk profiles: {}", resolved.profiles.len());
    info!("  Risk factors:  {}", resolved.factor_count());
    println!(
        "Scenario '{}': {} risk profiles, {} risk factors, 4 scorecards OK",
        resolved.scenario_name,
        resolved.profiles.len(),
        resolved.factor_count()
    );

    Ok(())
}
