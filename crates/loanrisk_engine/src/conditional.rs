//! Compiled risk-factor conditionals.
//!
//! Authored conditional rows store the operator and comparison value as
//! freeform text (e.g. `"<"`, `"650"`). They are compiled exactly once, at
//! risk-profile load time, into a [`Conditional`] with a tagged operator and
//! a typed value; per-loan matching never re-parses text.
//!
//! Comparison values are typed by the named attribute's declared schema
//! type, not guessed from their spelling: `zip_code = 07102` compiles to
//! the text `"07102"` because `zip_code` is a text attribute. Attributes
//! outside the loan schema fall back to spelling-based typing.
//!
//! Evaluation is fail-safe: a type mismatch between the conditional's value
//! and the loan attribute evaluates to *not matched* rather than erroring.

use loanrisk_core::loan::LoanView;
use loanrisk_core::types::{AttributeType, AttributeValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Comparison operator of a conditional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Inclusive range test.
    Between,
    /// Set membership.
    In,
}

impl Operator {
    /// Parses the operator spellings found in authored rows.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Some(Operator::Eq),
            "!=" | "<>" | "ne" => Some(Operator::Ne),
            "<" | "lt" => Some(Operator::Lt),
            "<=" | "le" => Some(Operator::Le),
            ">" | "gt" => Some(Operator::Gt),
            ">=" | "ge" => Some(Operator::Ge),
            "between" | "range" => Some(Operator::Between),
            "in" => Some(Operator::In),
            _ => None,
        }
    }
}

/// A single typed comparison value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Numeric value.
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Categorical text.
    Text(String),
    /// Boolean flag.
    Flag(bool),
}

impl Scalar {
    /// Parses a scalar from authored text by guessing its type from the
    /// spelling: number, ISO date, boolean, or (as a fallback) text.
    ///
    /// Only used for attributes outside the loan schema; known attributes
    /// go through [`Scalar::parse_as`] with their declared type.
    pub fn parse(s: &str) -> Scalar {
        let s = s.trim();
        if let Ok(n) = s.parse::<f64>() {
            return Scalar::Number(n);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Scalar::Date(d);
        }
        match s.to_ascii_lowercase().as_str() {
            "true" => Scalar::Flag(true),
            "false" => Scalar::Flag(false),
            _ => Scalar::Text(s.to_string()),
        }
    }

    /// Parses a scalar as one declared attribute type.
    ///
    /// Returns `None` when the text is not a valid value of that type;
    /// text always parses.
    pub fn parse_as(s: &str, ty: AttributeType) -> Option<Scalar> {
        let s = s.trim();
        match ty {
            AttributeType::Number => s.parse::<f64>().ok().map(Scalar::Number),
            AttributeType::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(Scalar::Date),
            AttributeType::Flag => match s.to_ascii_lowercase().as_str() {
                "true" => Some(Scalar::Flag(true)),
                "false" => Some(Scalar::Flag(false)),
                _ => None,
            },
            AttributeType::Text => Some(Scalar::Text(s.to_string())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Date(d) => write!(f, "{}", d),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// The comparison value of a compiled conditional.
///
/// The shape is fixed by the operator: ordering and equality operators take
/// a [`ConditionValue::Scalar`], `Between` a [`ConditionValue::Range`], and
/// `In` a [`ConditionValue::Set`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConditionValue {
    /// Single comparison value.
    Scalar(Scalar),
    /// Inclusive lower and upper bounds.
    Range(Scalar, Scalar),
    /// Membership set.
    Set(Vec<Scalar>),
}

/// Failures compiling a freeform conditional row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionalParseError {
    /// The operator text is not a known spelling.
    #[error("unknown conditional operator '{0}'")]
    UnknownOperator(String),

    /// A `between` value did not contain exactly two bounds.
    #[error("between conditional needs two bounds, got '{0}'")]
    BadRange(String),

    /// The two bounds of a range have different types.
    #[error("between conditional bounds have mixed types: '{0}'")]
    MixedRangeTypes(String),

    /// An `in` value contained no members.
    #[error("in conditional needs at least one member")]
    EmptySet,

    /// A value could not be parsed as the attribute's declared type.
    #[error("value '{value}' is not a valid {expected} for attribute '{attribute}'")]
    TypeMismatch {
        /// The attribute the conditional is keyed on.
        attribute: String,
        /// The attribute's declared type.
        expected: AttributeType,
        /// The authored value text.
        value: String,
    },
}

/// One compiled predicate on a loan attribute.
///
/// A risk factor matches a loan iff **every** one of its conditionals
/// evaluates true (conjunctive semantics).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// The loan attribute the predicate reads (persisted field name).
    pub attribute: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Typed comparison value.
    pub value: ConditionValue,
}

impl Conditional {
    /// Compiles an authored conditional row.
    ///
    /// `op_text` and `value_text` are the freeform columns of the stored
    /// row; `attribute` is the owning risk factor's attribute name. The
    /// value is parsed as the attribute's declared schema type; attributes
    /// outside the schema fall back to spelling-based typing. Range bounds
    /// are separated by `..` or `,`; set members by `,`.
    pub fn parse(
        attribute: impl Into<String>,
        op_text: &str,
        value_text: &str,
    ) -> Result<Self, ConditionalParseError> {
        let attribute = attribute.into();
        let operator = Operator::parse(op_text)
            .ok_or_else(|| ConditionalParseError::UnknownOperator(op_text.to_string()))?;

        let declared = LoanView::attribute_type(&attribute);
        let scalar = |text: &str| -> Result<Scalar, ConditionalParseError> {
            match declared {
                Some(ty) => Scalar::parse_as(text, ty).ok_or_else(|| {
                    ConditionalParseError::TypeMismatch {
                        attribute: attribute.clone(),
                        expected: ty,
                        value: text.trim().to_string(),
                    }
                }),
                None => Ok(Scalar::parse(text)),
            }
        };

        let value = match operator {
            Operator::Between => {
                let parts: Vec<&str> = if value_text.contains("..") {
                    value_text.splitn(2, "..").collect()
                } else {
                    value_text.splitn(2, ',').collect()
                };
                if parts.len() != 2 || parts.iter().any(|p| p.trim().is_empty()) {
                    return Err(ConditionalParseError::BadRange(value_text.to_string()));
                }
                let lo = scalar(parts[0])?;
                let hi = scalar(parts[1])?;
                if std::mem::discriminant(&lo) != std::mem::discriminant(&hi) {
                    return Err(ConditionalParseError::MixedRangeTypes(
                        value_text.to_string(),
                    ));
                }
                ConditionValue::Range(lo, hi)
            }
            Operator::In => {
                let members: Vec<Scalar> = value_text
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(scalar)
                    .collect::<Result<_, _>>()?;
                if members.is_empty() {
                    return Err(ConditionalParseError::EmptySet);
                }
                ConditionValue::Set(members)
            }
            _ => ConditionValue::Scalar(scalar(value_text)?),
        };

        Ok(Self {
            attribute,
            operator,
            value,
        })
    }

    /// Evaluates the predicate against one loan attribute value.
    ///
    /// Type mismatches evaluate to `false`.
    pub fn matches(&self, actual: &AttributeValue) -> bool {
        match (&self.operator, &self.value) {
            (Operator::Eq, ConditionValue::Scalar(expected)) => scalar_eq(actual, expected),
            (Operator::Ne, ConditionValue::Scalar(expected)) => {
                comparable(actual, expected) && !scalar_eq(actual, expected)
            }
            (Operator::Lt, ConditionValue::Scalar(expected)) => {
                scalar_cmp(actual, expected).is_some_and(|o| o == std::cmp::Ordering::Less)
            }
            (Operator::Le, ConditionValue::Scalar(expected)) => {
                scalar_cmp(actual, expected).is_some_and(|o| o != std::cmp::Ordering::Greater)
            }
            (Operator::Gt, ConditionValue::Scalar(expected)) => {
                scalar_cmp(actual, expected).is_some_and(|o| o == std::cmp::Ordering::Greater)
            }
            (Operator::Ge, ConditionValue::Scalar(expected)) => {
                scalar_cmp(actual, expected).is_some_and(|o| o != std::cmp::Ordering::Less)
            }
            (Operator::Between, ConditionValue::Range(lo, hi)) => {
                scalar_cmp(actual, lo).is_some_and(|o| o != std::cmp::Ordering::Less)
                    && scalar_cmp(actual, hi).is_some_and(|o| o != std::cmp::Ordering::Greater)
            }
            (Operator::In, ConditionValue::Set(members)) => {
                members.iter().any(|m| scalar_eq(actual, m))
            }
            // Operator/value shape mismatch is unreachable through parse();
            // treat it as a non-match if constructed by hand.
            _ => false,
        }
    }
}

/// True when the attribute and scalar have comparable types.
fn comparable(actual: &AttributeValue, expected: &Scalar) -> bool {
    matches!(
        (actual, expected),
        (AttributeValue::Number(_), Scalar::Number(_))
            | (AttributeValue::Date(_), Scalar::Date(_))
            | (AttributeValue::Text(_), Scalar::Text(_))
            | (AttributeValue::Flag(_), Scalar::Flag(_))
    )
}

fn scalar_eq(actual: &AttributeValue, expected: &Scalar) -> bool {
    match (actual, expected) {
        (AttributeValue::Number(a), Scalar::Number(e)) => a == e,
        (AttributeValue::Date(a), Scalar::Date(e)) => a == e,
        (AttributeValue::Text(a), Scalar::Text(e)) => a.eq_ignore_ascii_case(e),
        (AttributeValue::Flag(a), Scalar::Flag(e)) => a == e,
        _ => false,
    }
}

/// Ordering between an attribute and a scalar; `None` on type mismatch or
/// for types without a meaningful order (text, flags).
fn scalar_cmp(actual: &AttributeValue, expected: &Scalar) -> Option<std::cmp::Ordering> {
    match (actual, expected) {
        (AttributeValue::Number(a), Scalar::Number(e)) => a.partial_cmp(e),
        (AttributeValue::Date(a), Scalar::Date(e)) => Some(a.cmp(e)),
        _ => None,
    }
}
