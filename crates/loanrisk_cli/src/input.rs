//! Input file formats.
//!
//! The CLI bulk-loads authored configuration and loan tapes from JSON
//! files: a catalog file holding the scenario configuration tables, and a
//! loan file holding the portfolio records to evaluate.

use crate::{CliError, Result};
use loanrisk_core::assumptions::AssumptionProfile;
use loanrisk_core::loan::LoanRecord;
use loanrisk_core::scenario::{Scenario, ScoreCardProfile};
use loanrisk_engine::{InMemoryCatalog, RiskProfileRecord, ScoreCard};
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of a catalog file: the configuration tables as arrays.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Authored scenarios.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    /// Authored assumption profiles.
    #[serde(default)]
    pub assumption_profiles: Vec<AssumptionProfile>,
    /// Authored scorecard profiles.
    #[serde(default)]
    pub score_card_profiles: Vec<ScoreCardProfile>,
    /// Authored scorecards.
    #[serde(default)]
    pub score_cards: Vec<ScoreCard>,
    /// Authored risk profiles with factor rows.
    #[serde(default)]
    pub risk_profiles: Vec<RiskProfileRecord>,
}

impl CatalogFile {
    /// Loads the tables into an in-process catalog.
    pub fn into_catalog(self) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for scenario in self.scenarios {
            catalog.add_scenario(scenario);
        }
        for profile in self.assumption_profiles {
            catalog.add_assumption_profile(profile);
        }
        for profile in self.score_card_profiles {
            catalog.add_score_card_profile(profile);
        }
        for card in self.score_cards {
            catalog.add_score_card(card);
        }
        for profile in self.risk_profiles {
            catalog.add_risk_profile(profile);
        }
        catalog
    }
}

fn read_to_string(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &str) -> Result<InMemoryCatalog> {
    let raw = read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)?;
    Ok(file.into_catalog())
}

/// Reads and parses a loan file: a JSON array of loan records.
pub fn load_loans(path: &str) -> Result<Vec<LoanRecord>> {
    let raw = read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanrisk_core::types::ScenarioId;
    use loanrisk_engine::ScenarioCatalog;

    #[test]
    fn test_empty_catalog_file_parses() {
        let file: CatalogFile = serde_json::from_str("{}").unwrap();
        let catalog = file.into_catalog();
        assert!(catalog.scenario(ScenarioId::new(1)).is_none());
    }

    #[test]
    fn test_catalog_file_loads_scenarios() {
        let json = r#"{
            "scenarios": [{
                "id": 1,
                "name": "Stress",
                "date_created": "2026-08-24T00:00:00Z",
                "last_updated": "2026-08-24T00:00:00Z",
                "assumption_profile_id": 1,
                "score_card_profile_id": 1,
                "risk_profile_ids": [2, 3]
            }]
        }"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        let catalog = file.into_catalog();
        let scenario = catalog.scenario(ScenarioId::new(1)).unwrap();
        assert_eq!(scenario.name, "Stress");
        assert_eq!(scenario.risk_profile_ids.len(), 2);
    }
}
