//! Canned domain records for tests and demos.
//!
//! A representative fixed-rate New Jersey loan, used across the workspace's
//! test suites so every crate exercises the same realistic record.

use crate::loan::{LoanRecord, LoanSnapshot, LoanStatic, LoanStatus};
use crate::types::{LoanId, PortfolioId, SnapshotId};
use chrono::NaiveDate;

/// Origination facts for the sample loan: $200k fixed-rate purchase, NJ,
/// FICO 620.
pub fn sample_static() -> LoanStatic {
    LoanStatic {
        id: LoanId::new(1),
        portfolio_id: PortfolioId::new(1),
        as_of_date: NaiveDate::from_ymd_opt(2015, 10, 30).unwrap(),
        property_type_code: "SFR".to_string(),
        occupancy_code: "OWNER".to_string(),
        product_type: "FIXED".to_string(),
        purpose: "PURCHASE".to_string(),
        mortgage_type: "CONV".to_string(),
        lien_position: 1,
        original_rate: 6.25,
        original_appraisal_amount: 250_000,
        original_date: NaiveDate::from_ymd_opt(2008, 4, 1).unwrap(),
        first_payment_date: NaiveDate::from_ymd_opt(2008, 6, 1).unwrap(),
        original_amount: 200_000,
        original_term: 360,
        original_ltv: 80,
        pmi: false,
        city: "Newark".to_string(),
        state: "NJ".to_string(),
        zip_code: "07102".to_string(),
        fico: 620,
        gross_margin: None,
        lcap: None,
        lfloor: None,
        icap: None,
        pcap: None,
        interest_reset_interval: None,
        reset_index: None,
        first_interest_rate_adjustment_date: None,
        recast_frequency: None,
        negam_initial_minimum_payment_period: None,
        negam_payment_reset_frequency: None,
    }
}

/// Current snapshot for the sample loan: performing, LTV 85.
pub fn sample_snapshot() -> LoanSnapshot {
    LoanSnapshot {
        id: SnapshotId::new(10),
        loan_id: LoanId::new(1),
        status: LoanStatus::Current,
        remaining_term: 270,
        amortized_term: 360,
        io_term: 0,
        deferred_balance: 0.0,
        modification_date: None,
        foreclosure_referral_date: None,
        current_property_value: 210_000,
        current_value_date: NaiveDate::from_ymd_opt(2015, 9, 30).unwrap(),
        current_ltv: 85,
        current_principal_balance: 178_500.0,
        current_interest_rate: 6.25,
        last_payment_received: Some(NaiveDate::from_ymd_opt(2015, 10, 1).unwrap()),
        current_fico_score: 615,
        bk_flag: false,
        msr: true,
        senior_lien_balance: None,
        senior_lien_date: None,
        junior_lien_balance: None,
        junior_lien_date: None,
        second_lien_piggyback_flag: false,
        sf: 25,
    }
}

/// The sample loan as an evaluation-ready record.
pub fn sample_record() -> LoanRecord {
    LoanRecord {
        origination: sample_static(),
        snapshot: sample_snapshot(),
    }
}

/// The sample record with the origination FICO overridden.
pub fn sample_record_with_fico(fico: u32) -> LoanRecord {
    let mut record = sample_record();
    record.origination.fico = fico;
    record
}
