//! Portfolios and their derived aggregate statistics.
//!
//! Aggregates (total balance, weighted-average coupon and score) are a
//! cache recomputable from the member loans at any time. They are refreshed
//! by an explicit [`Portfolio::recompute_stats`] call when the loan set
//! changes; nothing maintains them incrementally.

use crate::loan::LoanRecord;
use crate::types::PortfolioId;
use serde::{Deserialize, Serialize};

/// Derived aggregate statistics for a portfolio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Number of member loans.
    pub loan_count: usize,
    /// Sum of current principal balances.
    pub total_loan_balance: f64,
    /// Balance-weighted average current note rate, percent.
    pub weighted_average_coupon: f64,
    /// Balance-weighted average current credit score.
    pub weighted_average_fico: f64,
}

impl PortfolioStats {
    /// Computes aggregates from a loan set.
    ///
    /// Zero-balance portfolios yield zero weighted averages rather than NaN.
    pub fn compute(loans: &[LoanRecord]) -> Self {
        let total: f64 = loans
            .iter()
            .map(|l| l.snapshot.current_principal_balance)
            .sum();
        if total <= 0.0 {
            return Self {
                loan_count: loans.len(),
                ..Self::default()
            };
        }
        let wac = loans
            .iter()
            .map(|l| l.snapshot.current_principal_balance * l.snapshot.current_interest_rate)
            .sum::<f64>()
            / total;
        let wafico = loans
            .iter()
            .map(|l| l.snapshot.current_principal_balance * l.snapshot.current_fico_score as f64)
            .sum::<f64>()
            / total;
        Self {
            loan_count: loans.len(),
            total_loan_balance: total,
            weighted_average_coupon: wac,
            weighted_average_fico: wafico,
        }
    }
}

/// A named collection of loans evaluated together under a scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio identifier.
    pub id: PortfolioId,
    /// Display name.
    pub name: String,
    /// Member loans with their current snapshots.
    pub loans: Vec<LoanRecord>,
    /// Cached aggregates; refresh with [`Portfolio::recompute_stats`].
    pub stats: PortfolioStats,
}

impl Portfolio {
    /// Creates a portfolio and computes its initial aggregates.
    pub fn new(id: PortfolioId, name: impl Into<String>, loans: Vec<LoanRecord>) -> Self {
        let stats = PortfolioStats::compute(&loans);
        Self {
            id,
            name: name.into(),
            loans,
            stats,
        }
    }

    /// Recomputes the aggregate cache from the current loan set.
    pub fn recompute_stats(&mut self) {
        self.stats = PortfolioStats::compute(&self.loans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_snapshot, sample_static};
    use approx::assert_relative_eq;

    fn two_loan_portfolio() -> Portfolio {
        let mut a = LoanRecord {
            origination: sample_static(),
            snapshot: sample_snapshot(),
        };
        a.snapshot.current_principal_balance = 100_000.0;
        a.snapshot.current_interest_rate = 4.0;
        a.snapshot.current_fico_score = 700;

        let mut b = a.clone();
        b.snapshot.current_principal_balance = 300_000.0;
        b.snapshot.current_interest_rate = 6.0;
        b.snapshot.current_fico_score = 600;

        Portfolio::new(PortfolioId::new(1), "Test Pool", vec![a, b])
    }

    #[test]
    fn test_stats_weighted_averages() {
        let p = two_loan_portfolio();
        assert_eq!(p.stats.loan_count, 2);
        assert_relative_eq!(p.stats.total_loan_balance, 400_000.0);
        // 100k@4% + 300k@6% -> 5.5%
        assert_relative_eq!(p.stats.weighted_average_coupon, 5.5);
        assert_relative_eq!(p.stats.weighted_average_fico, 625.0);
    }

    #[test]
    fn test_stats_recompute_after_change() {
        let mut p = two_loan_portfolio();
        p.loans.pop();
        p.recompute_stats();
        assert_eq!(p.stats.loan_count, 1);
        assert_relative_eq!(p.stats.total_loan_balance, 100_000.0);
        assert_relative_eq!(p.stats.weighted_average_coupon, 4.0);
    }

    #[test]
    fn test_stats_empty_portfolio_no_nan() {
        let stats = PortfolioStats::compute(&[]);
        assert_eq!(stats.loan_count, 0);
        assert_eq!(stats.weighted_average_coupon, 0.0);
    }
}
