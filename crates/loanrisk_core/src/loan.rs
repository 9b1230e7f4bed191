//! Loan records: immutable origination facts and point-in-time snapshots.
//!
//! [`LoanStatic`] holds the facts fixed at origination; [`LoanSnapshot`]
//! holds the state as of a reporting date. The pair is what the adjustment
//! engine evaluates: [`LoanView`] exposes both as a single attribute bag
//! keyed by the persisted field names, which is how risk-factor conditionals
//! reference loan data.

use crate::types::{AttributeType, AttributeValue, LoanId, PortfolioId, SnapshotId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Servicing status of a loan as of a snapshot date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Performing, current on payments.
    Current,
    /// Behind on payments.
    Delinquent,
    /// Terms modified by the servicer.
    Modified,
    /// In the foreclosure pipeline.
    Foreclosure,
    /// Real-estate owned after completed foreclosure.
    Reo,
    /// Fully repaid.
    PaidOff,
}

impl LoanStatus {
    /// The persisted status string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Current => "current",
            LoanStatus::Delinquent => "delinquent",
            LoanStatus::Modified => "modified",
            LoanStatus::Foreclosure => "foreclosure",
            LoanStatus::Reo => "reo",
            LoanStatus::PaidOff => "paid_off",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable origination facts for one loan.
///
/// One row per loan, referenced by at least one snapshot. ARM and neg-am
/// fields are optional; fixed-rate loans leave them unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanStatic {
    /// Loan identifier.
    pub id: LoanId,
    /// Owning portfolio.
    pub portfolio_id: PortfolioId,
    /// Tape as-of date.
    pub as_of_date: NaiveDate,
    /// Property type code (e.g. SFR, condo).
    pub property_type_code: String,
    /// Occupancy code (owner, investor, second home).
    pub occupancy_code: String,
    /// Product type (fixed, ARM, IO).
    pub product_type: String,
    /// Loan purpose (purchase, refi, cash-out).
    pub purpose: String,
    /// Mortgage type (conventional, FHA, VA).
    pub mortgage_type: String,
    /// Lien position (1 = first lien).
    pub lien_position: u32,
    /// Note rate at origination, percent.
    pub original_rate: f64,
    /// Appraised value at origination, whole dollars.
    pub original_appraisal_amount: i64,
    /// Origination date.
    pub original_date: NaiveDate,
    /// First scheduled payment date.
    pub first_payment_date: NaiveDate,
    /// Original balance, whole dollars.
    pub original_amount: i64,
    /// Original term, months.
    pub original_term: u32,
    /// Loan-to-value at origination, percent.
    #[serde(rename = "original_LTV")]
    pub original_ltv: u32,
    /// Whether private mortgage insurance is attached.
    #[serde(rename = "PMI")]
    pub pmi: bool,
    /// Property city.
    pub city: String,
    /// Property state, two-letter code.
    pub state: String,
    /// Property ZIP code.
    pub zip_code: String,
    /// Borrower credit score at origination.
    #[serde(rename = "FICO")]
    pub fico: u32,
    /// ARM gross margin over the reset index, percent.
    pub gross_margin: Option<f64>,
    /// ARM lifetime rate cap, percent.
    #[serde(rename = "LCAP")]
    pub lcap: Option<f64>,
    /// ARM lifetime rate floor, percent.
    #[serde(rename = "LFLOOR")]
    pub lfloor: Option<f64>,
    /// ARM initial-period rate cap, percent.
    #[serde(rename = "ICAP")]
    pub icap: Option<f64>,
    /// ARM periodic rate cap, percent.
    #[serde(rename = "PCAP")]
    pub pcap: Option<f64>,
    /// Months between ARM rate resets.
    pub interest_reset_interval: Option<u32>,
    /// Name of the ARM reset index.
    pub reset_index: Option<String>,
    /// First ARM rate adjustment date.
    pub first_interest_rate_adjustment_date: Option<NaiveDate>,
    /// Months between payment recasts, for recasting products.
    pub recast_frequency: Option<u32>,
    /// Neg-am initial minimum-payment period, months.
    pub negam_initial_minimum_payment_period: Option<u32>,
    /// Neg-am payment reset frequency, months.
    pub negam_payment_reset_frequency: Option<u32>,
}

/// Point-in-time state of one loan.
///
/// Belongs to exactly one [`LoanStatic`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    /// Snapshot identifier.
    pub id: SnapshotId,
    /// The loan this snapshot belongs to.
    pub loan_id: LoanId,
    /// Servicing status as of the snapshot date.
    pub status: LoanStatus,
    /// Remaining term, months.
    pub remaining_term: u32,
    /// Amortisation term, months.
    pub amortized_term: u32,
    /// Remaining interest-only period, months.
    #[serde(rename = "IO_term")]
    pub io_term: u32,
    /// Deferred (non-interest-bearing) balance.
    pub deferred_balance: f64,
    /// Date of the most recent modification, if modified.
    pub modification_date: Option<NaiveDate>,
    /// Foreclosure referral date, if referred.
    pub foreclosure_referral_date: Option<NaiveDate>,
    /// Current property value, whole dollars.
    pub current_property_value: i64,
    /// Date of the current valuation.
    pub current_value_date: NaiveDate,
    /// Current loan-to-value, percent.
    #[serde(rename = "current_LTV")]
    pub current_ltv: u32,
    /// Current principal balance.
    pub current_principal_balance: f64,
    /// Current note rate, percent.
    pub current_interest_rate: f64,
    /// Date the last payment was received.
    pub last_payment_received: Option<NaiveDate>,
    /// Refreshed borrower credit score.
    #[serde(rename = "current_FICO_score")]
    pub current_fico_score: u32,
    /// Whether the borrower is in bankruptcy.
    #[serde(rename = "BK_flag")]
    pub bk_flag: bool,
    /// Whether mortgage servicing rights are retained.
    #[serde(rename = "MSR")]
    pub msr: bool,
    /// Senior lien balance, for junior liens.
    pub senior_lien_balance: Option<f64>,
    /// As-of date of the senior lien balance.
    pub senior_lien_date: Option<NaiveDate>,
    /// Junior lien balance, for loans with subordinate debt.
    pub junior_lien_balance: Option<f64>,
    /// As-of date of the junior lien balance.
    pub junior_lien_date: Option<NaiveDate>,
    /// Whether a piggyback second lien was present at origination.
    pub second_lien_piggyback_flag: bool,
    /// Servicing fee, basis points.
    #[serde(rename = "SF")]
    pub sf: u32,
}

/// An origination record paired with one of its snapshots.
///
/// This is the unit of work for the adjustment engine: one evaluation per
/// (`LoanRecord`, scenario) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Immutable origination facts.
    pub origination: LoanStatic,
    /// Point-in-time state.
    pub snapshot: LoanSnapshot,
}

impl LoanRecord {
    /// Borrows both halves as a single attribute bag.
    #[inline]
    pub fn view(&self) -> LoanView<'_> {
        LoanView {
            origination: &self.origination,
            snapshot: &self.snapshot,
        }
    }
}

/// Read-only attribute bag over one loan's static and snapshot records.
///
/// Attributes are looked up by their persisted field names,
/// e.g. `"FICO"` (origination score), `"current_FICO_score"`,
/// `"state"`, `"status"`, `"current_LTV"`. Optional fields that are unset
/// resolve to `None`, which the matcher treats as a non-match.
#[derive(Clone, Copy, Debug)]
pub struct LoanView<'a> {
    /// Origination facts.
    pub origination: &'a LoanStatic,
    /// Snapshot state.
    pub snapshot: &'a LoanSnapshot,
}

/// Every persisted field name the attribute bag can resolve, with its
/// declared value type.
///
/// Kept in sync with [`LoanView::attribute`]. The matcher uses it to
/// distinguish a schema mismatch (unknown name) from a null value; the
/// conditional compiler uses it to type comparison values, so `zip_code`
/// stays text even when authored as digits.
pub const LOAN_SCHEMA: &[(&str, AttributeType)] = &[
    ("portfolio_id", AttributeType::Number),
    ("as_of_date", AttributeType::Date),
    ("property_type_code", AttributeType::Text),
    ("occupancy_code", AttributeType::Text),
    ("product_type", AttributeType::Text),
    ("purpose", AttributeType::Text),
    ("mortgage_type", AttributeType::Text),
    ("lien_position", AttributeType::Number),
    ("original_rate", AttributeType::Number),
    ("original_appraisal_amount", AttributeType::Number),
    ("original_date", AttributeType::Date),
    ("first_payment_date", AttributeType::Date),
    ("original_amount", AttributeType::Number),
    ("original_term", AttributeType::Number),
    ("original_LTV", AttributeType::Number),
    ("PMI", AttributeType::Flag),
    ("city", AttributeType::Text),
    ("state", AttributeType::Text),
    ("zip_code", AttributeType::Text),
    ("FICO", AttributeType::Number),
    ("gross_margin", AttributeType::Number),
    ("LCAP", AttributeType::Number),
    ("LFLOOR", AttributeType::Number),
    ("ICAP", AttributeType::Number),
    ("PCAP", AttributeType::Number),
    ("interest_reset_interval", AttributeType::Number),
    ("reset_index", AttributeType::Text),
    ("first_interest_rate_adjustment_date", AttributeType::Date),
    ("recast_frequency", AttributeType::Number),
    ("negam_initial_minimum_payment_period", AttributeType::Number),
    ("negam_payment_reset_frequency", AttributeType::Number),
    ("status", AttributeType::Text),
    ("remaining_term", AttributeType::Number),
    ("amortized_term", AttributeType::Number),
    ("IO_term", AttributeType::Number),
    ("deferred_balance", AttributeType::Number),
    ("modification_date", AttributeType::Date),
    ("foreclosure_referral_date", AttributeType::Date),
    ("current_property_value", AttributeType::Number),
    ("current_value_date", AttributeType::Date),
    ("current_LTV", AttributeType::Number),
    ("current_principal_balance", AttributeType::Number),
    ("current_interest_rate", AttributeType::Number),
    ("last_payment_received", AttributeType::Date),
    ("current_FICO_score", AttributeType::Number),
    ("BK_flag", AttributeType::Flag),
    ("MSR", AttributeType::Flag),
    ("senior_lien_balance", AttributeType::Number),
    ("senior_lien_date", AttributeType::Date),
    ("junior_lien_balance", AttributeType::Number),
    ("junior_lien_date", AttributeType::Date),
    ("second_lien_piggyback_flag", AttributeType::Flag),
    ("SF", AttributeType::Number),
];

impl LoanView<'_> {
    /// True when `name` is a field of the loan schema.
    #[inline]
    pub fn is_known_attribute(name: &str) -> bool {
        Self::attribute_type(name).is_some()
    }

    /// Declared value type of a schema field; `None` for unknown names.
    pub fn attribute_type(name: &str) -> Option<AttributeType> {
        LOAN_SCHEMA
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, ty)| *ty)
    }

    /// Looks up one attribute by its persisted field name.
    ///
    /// Returns `None` when the name is unknown or the underlying optional
    /// field is unset.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        let s = self.origination;
        let c = self.snapshot;
        match name {
            // Origination facts
            "portfolio_id" => Some((s.portfolio_id.value() as i64).into()),
            "as_of_date" => Some(s.as_of_date.into()),
            "property_type_code" => Some(s.property_type_code.as_str().into()),
            "occupancy_code" => Some(s.occupancy_code.as_str().into()),
            "product_type" => Some(s.product_type.as_str().into()),
            "purpose" => Some(s.purpose.as_str().into()),
            "mortgage_type" => Some(s.mortgage_type.as_str().into()),
            "lien_position" => Some(s.lien_position.into()),
            "original_rate" => Some(s.original_rate.into()),
            "original_appraisal_amount" => Some(s.original_appraisal_amount.into()),
            "original_date" => Some(s.original_date.into()),
            "first_payment_date" => Some(s.first_payment_date.into()),
            "original_amount" => Some(s.original_amount.into()),
            "original_term" => Some(s.original_term.into()),
            "original_LTV" => Some(s.original_ltv.into()),
            "PMI" => Some(s.pmi.into()),
            "city" => Some(s.city.as_str().into()),
            "state" => Some(s.state.as_str().into()),
            "zip_code" => Some(s.zip_code.as_str().into()),
            "FICO" => Some(s.fico.into()),
            "gross_margin" => s.gross_margin.map(Into::into),
            "LCAP" => s.lcap.map(Into::into),
            "LFLOOR" => s.lfloor.map(Into::into),
            "ICAP" => s.icap.map(Into::into),
            "PCAP" => s.pcap.map(Into::into),
            "interest_reset_interval" => s.interest_reset_interval.map(Into::into),
            "reset_index" => s.reset_index.as_deref().map(Into::into),
            "first_interest_rate_adjustment_date" => {
                s.first_interest_rate_adjustment_date.map(Into::into)
            }
            "recast_frequency" => s.recast_frequency.map(Into::into),
            "negam_initial_minimum_payment_period" => {
                s.negam_initial_minimum_payment_period.map(Into::into)
            }
            "negam_payment_reset_frequency" => s.negam_payment_reset_frequency.map(Into::into),

            // Snapshot state
            "status" => Some(c.status.as_str().into()),
            "remaining_term" => Some(c.remaining_term.into()),
            "amortized_term" => Some(c.amortized_term.into()),
            "IO_term" => Some(c.io_term.into()),
            "deferred_balance" => Some(c.deferred_balance.into()),
            "modification_date" => c.modification_date.map(Into::into),
            "foreclosure_referral_date" => c.foreclosure_referral_date.map(Into::into),
            "current_property_value" => Some(c.current_property_value.into()),
            "current_value_date" => Some(c.current_value_date.into()),
            "current_LTV" => Some(c.current_ltv.into()),
            "current_principal_balance" => Some(c.current_principal_balance.into()),
            "current_interest_rate" => Some(c.current_interest_rate.into()),
            "last_payment_received" => c.last_payment_received.map(Into::into),
            "current_FICO_score" => Some(c.current_fico_score.into()),
            "BK_flag" => Some(c.bk_flag.into()),
            "MSR" => Some(c.msr.into()),
            "senior_lien_balance" => c.senior_lien_balance.map(Into::into),
            "senior_lien_date" => c.senior_lien_date.map(Into::into),
            "junior_lien_balance" => c.junior_lien_balance.map(Into::into),
            "junior_lien_date" => c.junior_lien_date.map(Into::into),
            "second_lien_piggyback_flag" => Some(c.second_lien_piggyback_flag.into()),
            "SF" => Some(c.sf.into()),

            _ => None,
        }
    }

    /// Snapshot identifier, the loan half of the output key.
    #[inline]
    pub fn snapshot_id(&self) -> SnapshotId {
        self.snapshot.id
    }
}
