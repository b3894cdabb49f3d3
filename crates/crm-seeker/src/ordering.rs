//! Sort order and record comparison.
//!
//! Provides [`SortOrder`] for direction, [`OrderBy`] for a field/direction
//! pair, and [`sort_records`] which orders open records by a single field.
//!
//! Comparison rules, applied before the direction:
//!
//! - Null and absent values are the smallest value. They come first when
//!   ascending and last when descending.
//! - When both values coerce to numbers they compare numerically.
//! - When neither does they compare as text, case-insensitively and with
//!   accents folded, lowercase before uppercase on ties.
//! - A numeric value sorts before a non-numeric one, which keeps mixed
//!   columns in a consistent total order.

use std::cmp::Ordering;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::value::{FieldValue, Record};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    pub fn is_asc(self) -> bool {
        matches!(self, SortOrder::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, SortOrder::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field and the direction to sort it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub order: SortOrder,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        OrderBy {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, SortOrder::Desc)
    }

    /// Compares two records on this ordering's field.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.order
            .apply(compare_values(a.get(&self.field), b.get(&self.field)))
    }
}

/// Compares two field values in ascending order.
///
/// This is a total order over any mix of values, so it is safe to hand to a
/// sort routine.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let (na, nb) = (a.to_number(), b.to_number());
            match (na.is_nan(), nb.is_nan()) {
                (false, false) => na.total_cmp(&nb),
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (true, true) => compare_text(&a.to_text(), &b.to_text()),
            }
        }
    }
}

/// Locale-style text comparison.
///
/// Primary key is the transliterated, lowercased text; ties go to the
/// string whose letters are lowercase first, then to raw code point order.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let primary = deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase());
    primary
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
        .then_with(|| a.cmp(b))
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Returns the records ordered by `field`, leaving the input untouched.
///
/// The sort is stable: records comparing equal keep their relative order.
pub fn sort_records(records: &[Record], field: &str, order: SortOrder) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, &OrderBy::new(field, order));
    sorted
}

pub(crate) fn sort_in_place(records: &mut [Record], order_by: &OrderBy) {
    records.sort_by(|a, b| order_by.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue(values: &[Option<f64>]) -> Vec<Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new().with("id", i).with("annualRevenue", *v))
            .collect()
    }

    fn column(records: &[Record], field: &str) -> Vec<String> {
        records
            .iter()
            .map(|r| crate::value::text_of(r.get(field)))
            .collect()
    }

    #[test]
    fn sort_order_apply() {
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn nulls_first_ascending() {
        let sorted = sort_records(
            &revenue(&[Some(500.0), None, Some(100.0)]),
            "annualRevenue",
            SortOrder::Asc,
        );
        assert_eq!(column(&sorted, "annualRevenue"), ["null", "100", "500"]);
    }

    #[test]
    fn nulls_last_descending() {
        let sorted = sort_records(
            &revenue(&[None, Some(500.0), Some(100.0)]),
            "annualRevenue",
            SortOrder::Desc,
        );
        assert_eq!(column(&sorted, "annualRevenue"), ["500", "100", "null"]);
    }

    #[test]
    fn absent_fields_sort_like_null() {
        let records = vec![
            Record::new().with("score", 2),
            Record::new(),
            Record::new().with("score", 1),
        ];
        let sorted = sort_records(&records, "score", SortOrder::Asc);
        assert_eq!(column(&sorted, "score"), ["undefined", "1", "2"]);
    }

    #[test]
    fn numeric_strings_sort_numerically() {
        let records: Vec<Record> = ["10", "9", "100"]
            .iter()
            .map(|v| Record::new().with("n", *v))
            .collect();
        let sorted = sort_records(&records, "n", SortOrder::Asc);
        assert_eq!(column(&sorted, "n"), ["9", "10", "100"]);
    }

    #[test]
    fn numbers_sort_before_text() {
        let records: Vec<Record> = ["1a", "10", "9"]
            .iter()
            .map(|v| Record::new().with("code", *v))
            .collect();
        let sorted = sort_records(&records, "code", SortOrder::Asc);
        assert_eq!(column(&sorted, "code"), ["9", "10", "1a"]);
    }

    #[test]
    fn text_sorts_case_insensitively() {
        let records: Vec<Record> = ["banana", "Apple", "cherry", "apple", "Éclair"]
            .iter()
            .map(|v| Record::new().with("name", *v))
            .collect();
        let sorted = sort_records(&records, "name", SortOrder::Asc);
        assert_eq!(
            column(&sorted, "name"),
            ["apple", "Apple", "banana", "cherry", "Éclair"]
        );
    }

    #[test]
    fn sort_is_stable() {
        let records: Vec<Record> = (0..6)
            .map(|i| Record::new().with("id", i).with("group", i % 2))
            .collect();
        let sorted = sort_records(&records, "group", SortOrder::Asc);
        assert_eq!(column(&sorted, "id"), ["0", "2", "4", "1", "3", "5"]);

        let desc = sort_records(&records, "group", SortOrder::Desc);
        assert_eq!(column(&desc, "id"), ["1", "3", "5", "0", "2", "4"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = revenue(&[Some(3.0), Some(1.0), Some(2.0)]);
        let before = records.clone();
        let _ = sort_records(&records, "annualRevenue", SortOrder::Asc);
        assert_eq!(records, before);
    }

    #[test]
    fn serde_direction_names() {
        let order: SortOrder = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(order, SortOrder::Desc);
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), r#""asc""#);
    }
}
