//! Filter operators.
//!
//! The [`Operator`] enum is the fixed vocabulary of the explorer's filter
//! builder. Operator names travel as lowercase strings; a name outside the
//! vocabulary is kept as [`Operator::Unknown`] rather than rejected, and an
//! unknown operator lets every record through.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Comparison operator for a filter condition.
///
/// Operators are grouped by how they coerce the field value:
/// - **Text**: `Eq`, `Neq`, `Contains`, `StartsWith`, `In`
/// - **Numeric**: `Gt`, `Gte`, `Lt`, `Lte`, `Between`
/// - **Date**: `DateRange`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Equal, compared as text.
    Eq,
    /// Not equal, compared as text.
    Neq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Case-insensitive substring.
    Contains,
    /// Case-insensitive prefix.
    StartsWith,
    /// Membership in a list of values.
    In,
    /// Inclusive numeric range between `value` and `value2`.
    Between,
    /// Inclusive date range between `value` and `value2`.
    DateRange,
    /// Unrecognized operator name. Always matches.
    Unknown(String),
}

impl Operator {
    /// Returns the wire name of this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
            Operator::StartsWith => "startswith",
            Operator::In => "in",
            Operator::Between => "between",
            Operator::DateRange => "daterange",
            Operator::Unknown(name) => name,
        }
    }

    /// Returns `true` if the operator coerces the field to a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte | Operator::Between
        )
    }

    /// Returns `true` if the operator reads `value2` as an upper bound.
    pub fn is_range(&self) -> bool {
        matches!(self, Operator::Between | Operator::DateRange)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Operator::Unknown(_))
    }
}

impl FromStr for Operator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "contains" => Operator::Contains,
            "startswith" => Operator::StartsWith,
            "in" => Operator::In,
            "between" => Operator::Between,
            "daterange" => Operator::DateRange,
            other => Operator::Unknown(other.to_string()),
        })
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Operator::from(s.to_string())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(Operator::from("eq"), Operator::Eq);
        assert_eq!(Operator::from("neq"), Operator::Neq);
        assert_eq!(Operator::from("startswith"), Operator::StartsWith);
        assert_eq!(Operator::from("daterange"), Operator::DateRange);
    }

    #[test]
    fn unknown_names_are_preserved() {
        let op = Operator::from("regex");
        assert_eq!(op, Operator::Unknown("regex".to_string()));
        assert!(op.is_unknown());
        assert_eq!(op.to_string(), "regex");

        // Names are case-sensitive
        assert!(Operator::from("EQ").is_unknown());
    }

    #[test]
    fn operator_groups() {
        assert!(Operator::Gt.is_numeric());
        assert!(Operator::Between.is_numeric());
        assert!(!Operator::Contains.is_numeric());
        assert!(Operator::Between.is_range());
        assert!(Operator::DateRange.is_range());
        assert!(!Operator::Eq.is_range());
    }

    #[test]
    fn serde_uses_wire_names() {
        let op: Operator = serde_json::from_str(r#""contains""#).unwrap();
        assert_eq!(op, Operator::Contains);
        assert_eq!(serde_json::to_string(&Operator::StartsWith).unwrap(), r#""startswith""#);
        assert_eq!(
            serde_json::to_string(&Operator::Unknown("like".into())).unwrap(),
            r#""like""#
        );
    }
}
