//! The four assumption kinds adjusted by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four assumptions a scenario adjusts per loan.
///
/// Every risk factor targets exactly one kind, and a scorecard profile
/// carries exactly one scorecard per kind.
///
/// # Examples
///
/// ```rust
/// use loanrisk_core::types::AssumptionKind;
///
/// assert_eq!(AssumptionKind::Cdr.name(), "CDR");
/// assert_eq!(AssumptionKind::ALL.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssumptionKind {
    /// Constant default rate (annualised, percent).
    Cdr,
    /// Constant prepayment rate (annualised, percent).
    Cpr,
    /// Fraction of defaulted balance recovered (percent).
    Recovery,
    /// Months between default and loss recognition.
    Lag,
}

impl AssumptionKind {
    /// All four kinds, in canonical order.
    pub const ALL: [AssumptionKind; 4] = [
        AssumptionKind::Cdr,
        AssumptionKind::Cpr,
        AssumptionKind::Recovery,
        AssumptionKind::Lag,
    ];

    /// Canonical short name as used in authored risk-factor rows.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            AssumptionKind::Cdr => "CDR",
            AssumptionKind::Cpr => "CPR",
            AssumptionKind::Recovery => "Recovery",
            AssumptionKind::Lag => "Lag",
        }
    }

    /// Position in [`AssumptionKind::ALL`], usable as a dense array index.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            AssumptionKind::Cdr => 0,
            AssumptionKind::Cpr => 1,
            AssumptionKind::Recovery => 2,
            AssumptionKind::Lag => 3,
        }
    }

    /// Parses the names found in authored rows, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cdr" => Some(AssumptionKind::Cdr),
            "cpr" => Some(AssumptionKind::Cpr),
            "recovery" => Some(AssumptionKind::Recovery),
            "lag" => Some(AssumptionKind::Lag),
            _ => None,
        }
    }
}

impl fmt::Display for AssumptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in AssumptionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!(AssumptionKind::parse("CDR"), Some(AssumptionKind::Cdr));
        assert_eq!(AssumptionKind::parse("recovery"), Some(AssumptionKind::Recovery));
        assert_eq!(AssumptionKind::parse("Lag"), Some(AssumptionKind::Lag));
        assert_eq!(AssumptionKind::parse("wam"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", AssumptionKind::Cpr), "CPR");
    }
}
