//! Baseline macro-economic assumption profiles.
//!
//! An [`AssumptionProfile`] pairs the macro inputs of a stress scenario
//! (GDP growth, unemployment, home-price growth, high-yield spread) with the
//! baseline loss and prepayment assumptions the adjustment engine starts
//! from. Baselines may be authored directly or derived from the macro
//! inputs with the platform's equal-weight blend formulas; the builder
//! handles both paths. Profiles are immutable once a production scenario
//! references them.

use crate::types::{AssumptionKind, AssumptionProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Baseline macro assumptions for one scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssumptionProfile {
    /// Profile identifier.
    pub id: AssumptionProfileId,
    /// Display name, e.g. "GDP Growing at 3%".
    pub name: String,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
    /// Annual GDP growth, percent.
    pub gdp_growth: f64,
    /// Unemployment rate, percent.
    pub unemployment_rate: f64,
    /// National home-price-index growth, percent.
    pub national_home_price_index_growth: f64,
    /// High-yield credit spread, percent.
    pub high_yield_spread: f64,
    /// Baseline constant default rate, percent.
    pub constant_default_rate: f64,
    /// Baseline constant prepayment rate, percent.
    pub constant_prepayment_rate: f64,
    /// Baseline recovery, percent of defaulted balance.
    pub recovery: f64,
    /// Baseline recovery lag, months.
    pub lag: f64,
}

impl AssumptionProfile {
    /// Baseline value for one assumption kind.
    #[inline]
    pub fn baseline(&self, kind: AssumptionKind) -> f64 {
        match kind {
            AssumptionKind::Cdr => self.constant_default_rate,
            AssumptionKind::Cpr => self.constant_prepayment_rate,
            AssumptionKind::Recovery => self.recovery,
            AssumptionKind::Lag => self.lag,
        }
    }
}

/// CDR derived from GDP growth and unemployment, equal-weight blend.
pub fn derived_cdr(gdp_growth: f64, unemployment_rate: f64) -> f64 {
    (gdp_growth * -1.0 + 6.5) + (unemployment_rate * 1.2 - 5.5)
}

/// CPR derived from the high-yield spread.
pub fn derived_cpr(high_yield_spread: f64) -> f64 {
    high_yield_spread * -10.0 / 9.0 + 245.0 / 9.0
}

/// Recovery derived from home-price-index growth.
pub fn derived_recovery(hpi_growth: f64) -> f64 {
    hpi_growth * 2.5 + 50.0
}

/// Builder for [`AssumptionProfile`].
///
/// Macro inputs and lag are required; CDR, CPR, and recovery baselines are
/// optional and fall back to the derived formulas when not authored.
#[derive(Clone, Debug)]
pub struct AssumptionProfileBuilder {
    id: AssumptionProfileId,
    name: String,
    gdp_growth: f64,
    unemployment_rate: f64,
    national_home_price_index_growth: f64,
    high_yield_spread: f64,
    lag: f64,
    constant_default_rate: Option<f64>,
    constant_prepayment_rate: Option<f64>,
    recovery: Option<f64>,
}

impl AssumptionProfileBuilder {
    /// Starts a builder from the required macro inputs and lag.
    pub fn new(
        id: AssumptionProfileId,
        name: impl Into<String>,
        gdp_growth: f64,
        unemployment_rate: f64,
        national_home_price_index_growth: f64,
        high_yield_spread: f64,
        lag: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            gdp_growth,
            unemployment_rate,
            national_home_price_index_growth,
            high_yield_spread,
            lag,
            constant_default_rate: None,
            constant_prepayment_rate: None,
            recovery: None,
        }
    }

    /// Authors an explicit baseline CDR instead of the derived value.
    pub fn constant_default_rate(mut self, cdr: f64) -> Self {
        self.constant_default_rate = Some(cdr);
        self
    }

    /// Authors an explicit baseline CPR instead of the derived value.
    pub fn constant_prepayment_rate(mut self, cpr: f64) -> Self {
        self.constant_prepayment_rate = Some(cpr);
        self
    }

    /// Authors an explicit baseline recovery instead of the derived value.
    pub fn recovery(mut self, recovery: f64) -> Self {
        self.recovery = Some(recovery);
        self
    }

    /// Finishes the profile, deriving any baseline not authored.
    pub fn build(self) -> AssumptionProfile {
        let now = Utc::now();
        AssumptionProfile {
            id: self.id,
            name: self.name,
            date_created: now,
            last_updated: now,
            constant_default_rate: self
                .constant_default_rate
                .unwrap_or_else(|| derived_cdr(self.gdp_growth, self.unemployment_rate)),
            constant_prepayment_rate: self
                .constant_prepayment_rate
                .unwrap_or_else(|| derived_cpr(self.high_yield_spread)),
            recovery: self
                .recovery
                .unwrap_or_else(|| derived_recovery(self.national_home_price_index_growth)),
            gdp_growth: self.gdp_growth,
            unemployment_rate: self.unemployment_rate,
            national_home_price_index_growth: self.national_home_price_index_growth,
            high_yield_spread: self.high_yield_spread,
            lag: self.lag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn builder() -> AssumptionProfileBuilder {
        AssumptionProfileBuilder::new(
            AssumptionProfileId::new(1),
            "U.S. Economy Growing 3%",
            3.2,
            8.5,
            3.7,
            5.2,
            128.0,
        )
    }

    #[test]
    fn test_derived_cdr_formula() {
        // (3.2 * -1 + 6.5) + (8.5 * 1.2 - 5.5) = 3.3 + 4.7 = 8.0
        assert_relative_eq!(derived_cdr(3.2, 8.5), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derived_cpr_formula() {
        // 5.2 * -10/9 + 245/9 = (245 - 52)/9 = 193/9 = 21.444...
        assert_relative_eq!(derived_cpr(5.2), 193.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derived_recovery_formula() {
        assert_relative_eq!(derived_recovery(3.7), 59.25, epsilon = 1e-12);
    }

    #[test]
    fn test_builder_derives_unauthored_baselines() {
        let profile = builder().build();
        assert_relative_eq!(profile.constant_default_rate, 8.0, epsilon = 1e-12);
        assert_relative_eq!(profile.constant_prepayment_rate, 193.0 / 9.0, epsilon = 1e-12);
        assert_relative_eq!(profile.recovery, 59.25, epsilon = 1e-12);
        assert_relative_eq!(profile.lag, 128.0);
    }

    #[test]
    fn test_builder_keeps_authored_baselines() {
        let profile = builder()
            .constant_default_rate(10.98)
            .recovery(45.0)
            .build();
        assert_relative_eq!(profile.constant_default_rate, 10.98);
        assert_relative_eq!(profile.recovery, 45.0);
        // CPR still derived
        assert_relative_eq!(profile.constant_prepayment_rate, 193.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_baseline_accessor() {
        let profile = builder().build();
        assert_eq!(
            profile.baseline(AssumptionKind::Lag),
            profile.lag
        );
        assert_eq!(
            profile.baseline(AssumptionKind::Cdr),
            profile.constant_default_rate
        );
    }
}
