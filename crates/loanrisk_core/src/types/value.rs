//! Dynamically-typed loan attribute values.
//!
//! The conditional matcher evaluates predicates against loan fields by name.
//! [`AttributeValue`] is the common representation a loan exposes for each of
//! its fields: numeric, date, categorical text, or boolean flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value type of a loan attribute, as declared by the loan schema.
///
/// Conditional comparison values are parsed against the named attribute's
/// declared type, so a ZIP code authored as `07102` stays categorical text
/// rather than becoming the number 7102.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// Numeric attribute.
    Number,
    /// Date attribute.
    Date,
    /// Categorical text attribute.
    Text,
    /// Boolean flag attribute.
    Flag,
}

impl AttributeType {
    /// Short type tag used in diagnostics.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Number => "number",
            AttributeType::Date => "date",
            AttributeType::Text => "text",
            AttributeType::Flag => "flag",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single loan attribute value as seen by the conditional matcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric attribute (balances, rates, scores, terms).
    Number(f64),
    /// Date attribute (origination, payment, valuation dates).
    Date(NaiveDate),
    /// Categorical attribute (status, state, product codes).
    Text(String),
    /// Boolean flag attribute (BK flag, PMI, piggyback flag).
    Flag(bool),
}

impl AttributeValue {
    /// Convenience constructor for text values.
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        AttributeValue::Text(s.into())
    }

    /// Returns the numeric value, if this is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the date value, if this is a date.
    #[inline]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            AttributeValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the text value, if this is categorical.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag value, if this is a boolean.
    #[inline]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// The declared type of this value.
    #[inline]
    pub fn value_type(&self) -> AttributeType {
        match self {
            AttributeValue::Number(_) => AttributeType::Number,
            AttributeValue::Date(_) => AttributeType::Date,
            AttributeValue::Text(_) => AttributeType::Text,
            AttributeValue::Flag(_) => AttributeType::Flag,
        }
    }

    /// Short type tag used in diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<u32> for AttributeValue {
    fn from(n: u32) -> Self {
        AttributeValue::Number(n as f64)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Number(n as f64)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(d: NaiveDate) -> Self {
        AttributeValue::Date(d)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Date(d) => write!(f, "{}", d),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(AttributeValue::Number(620.0).as_number(), Some(620.0));
        assert_eq!(AttributeValue::Number(620.0).as_text(), None);
        assert_eq!(AttributeValue::text("NJ").as_text(), Some("NJ"));
        assert_eq!(AttributeValue::Flag(true).as_flag(), Some(true));

        let d = NaiveDate::from_ymd_opt(2015, 10, 30).unwrap();
        assert_eq!(AttributeValue::Date(d).as_date(), Some(d));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(AttributeValue::from(85u32), AttributeValue::Number(85.0));
        assert_eq!(AttributeValue::from("REO"), AttributeValue::text("REO"));
        assert_eq!(AttributeValue::from(false), AttributeValue::Flag(false));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AttributeValue::Number(6.25)), "6.25");
        assert_eq!(format!("{}", AttributeValue::text("NJ")), "NJ");
    }
}
