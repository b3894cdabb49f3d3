//! Filter conditions and their evaluation.
//!
//! A [`FilterCondition`] names a column, an [`Operator`] and one or two
//! comparison values. Conditions never fail: a value that cannot be coerced
//! for the operator simply does not match.

use serde::{Deserialize, Serialize};

use crate::op::Operator;
use crate::value::{
    format_number, number_of, parse_number, parse_timestamp, text_of, timestamp_of, FieldValue,
    Record,
};

/// Comparison value carried by a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
    /// List of values (for `in`).
    List(Vec<ConditionValue>),
}

impl ConditionValue {
    /// Text form, coerced the same way as field values.
    pub fn to_text(&self) -> String {
        match self {
            ConditionValue::Bool(b) => b.to_string(),
            ConditionValue::Number(n) => format_number(*n),
            ConditionValue::Text(s) => s.clone(),
            ConditionValue::List(items) => items
                .iter()
                .map(ConditionValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Numeric form, `NaN` when it has none.
    pub fn to_number(&self) -> f64 {
        match self {
            ConditionValue::Bool(b) => f64::from(u8::from(*b)),
            ConditionValue::Number(n) => *n,
            ConditionValue::Text(s) => parse_number(s),
            ConditionValue::List(_) => parse_number(&self.to_text()),
        }
    }

    /// Date form in epoch milliseconds.
    pub fn to_timestamp(&self) -> Option<i64> {
        match self {
            ConditionValue::Number(n) if n.is_finite() => Some(*n as i64),
            ConditionValue::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Extracts the list members, if this is a list.
    pub fn as_list(&self) -> Option<&[ConditionValue]> {
        match self {
            ConditionValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::Text(s)
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Bool(b)
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<i64> for ConditionValue {
    fn from(n: i64) -> Self {
        ConditionValue::Number(n as f64)
    }
}

impl From<i32> for ConditionValue {
    fn from(n: i32) -> Self {
        ConditionValue::Number(n as f64)
    }
}

impl<T: Into<ConditionValue>> From<Vec<T>> for ConditionValue {
    fn from(items: Vec<T>) -> Self {
        ConditionValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// A single column/operator/value constraint.
///
/// # Example
///
/// ```
/// use crm_seeker::{FilterCondition, Operator, Record};
///
/// let active = FilterCondition::new("status", Operator::Eq, "active");
/// let record = Record::new().with("status", "active");
/// assert!(active.matches(&record));
///
/// let mid_range = FilterCondition::range("score", Operator::Between, 10, 20);
/// assert!(mid_range.matches(&Record::new().with("score", 15)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// The field to compare.
    pub column: String,
    /// How to compare.
    pub operator: Operator,
    /// What to compare against (lower bound for range operators).
    pub value: ConditionValue,
    /// Upper bound for range operators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<ConditionValue>,
}

impl FilterCondition {
    /// Creates a single-value condition.
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        FilterCondition {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
            value2: None,
        }
    }

    /// Creates a two-bound condition for `between` and `daterange`.
    pub fn range(
        column: impl Into<String>,
        operator: impl Into<Operator>,
        low: impl Into<ConditionValue>,
        high: impl Into<ConditionValue>,
    ) -> Self {
        FilterCondition {
            value2: Some(high.into()),
            ..FilterCondition::new(column, operator, low)
        }
    }

    /// Evaluates this condition against a record.
    pub fn matches(&self, record: &Record) -> bool {
        let field = record.get(&self.column);
        match &self.operator {
            Operator::Eq => text_of(field) == self.value.to_text(),
            Operator::Neq => text_of(field) != self.value.to_text(),
            Operator::Gt => compare_numbers(field, &self.value, |a, b| a > b),
            Operator::Gte => compare_numbers(field, &self.value, |a, b| a >= b),
            Operator::Lt => compare_numbers(field, &self.value, |a, b| a < b),
            Operator::Lte => compare_numbers(field, &self.value, |a, b| a <= b),
            Operator::Contains => text_of(field)
                .to_lowercase()
                .contains(&self.value.to_text().to_lowercase()),
            Operator::StartsWith => text_of(field)
                .to_lowercase()
                .starts_with(&self.value.to_text().to_lowercase()),
            Operator::In => self.match_in(field),
            Operator::Between => self.match_between(field),
            Operator::DateRange => self.match_date_range(field),
            Operator::Unknown(_) => true,
        }
    }

    fn match_in(&self, field: Option<&FieldValue>) -> bool {
        let Some(members) = self.value.as_list() else {
            return false;
        };
        let text = text_of(field);
        members.iter().any(|m| m.to_text() == text)
    }

    fn match_between(&self, field: Option<&FieldValue>) -> bool {
        let Some(high) = &self.value2 else {
            return false;
        };
        let n = number_of(field);
        // NaN on any side fails both comparisons
        n >= self.value.to_number() && n <= high.to_number()
    }

    fn match_date_range(&self, field: Option<&FieldValue>) -> bool {
        let bounds = (
            timestamp_of(field),
            self.value.to_timestamp(),
            self.value2.as_ref().and_then(ConditionValue::to_timestamp),
        );
        match bounds {
            (Some(ts), Some(start), Some(end)) => start <= ts && ts <= end,
            _ => false,
        }
    }
}

fn compare_numbers(
    field: Option<&FieldValue>,
    value: &ConditionValue,
    cmp: impl Fn(f64, f64) -> bool,
) -> bool {
    cmp(number_of(field), value.to_number())
}

/// Keeps the records that satisfy every condition.
///
/// An empty condition list keeps everything.
pub fn apply_filters(records: Vec<Record>, conditions: &[FilterCondition]) -> Vec<Record> {
    if conditions.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| conditions.iter().all(|c| c.matches(record)))
        .collect()
}
