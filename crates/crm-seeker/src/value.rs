//! Open record model and value coercions.
//!
//! A [`Record`] is an ordered, string-keyed map of [`FieldValue`]s. No schema
//! is enforced: every stage of the pipeline looks fields up by name and
//! coerces whatever it finds. The coercion helpers in this module
//! ([`text_of`], [`number_of`], [`timestamp_of`]) define how a value compares
//! as text, as a number and as a date, and are shared by filtering, search
//! and sorting so all stages agree.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value. Integers are stored as `f64` as well.
    Number(f64),
    /// String value.
    String(String),
    /// Array of strings (tags, option lists).
    List(Vec<String>),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list value, if present.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text form of the value.
    ///
    /// Numbers print without a trailing fraction when integral, lists are
    /// joined with `,` and null prints as `null`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::String(s) => s.clone(),
            FieldValue::List(items) => items.join(","),
        }
    }

    /// Numeric form of the value, `NaN` when it has none.
    pub fn to_number(&self) -> f64 {
        match self {
            FieldValue::Null => f64::NAN,
            FieldValue::Bool(true) => 1.0,
            FieldValue::Bool(false) => 0.0,
            FieldValue::Number(n) => *n,
            FieldValue::String(s) => parse_number(s),
            FieldValue::List(items) => parse_number(&items.join(",")),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) if is_safe_integer(*n) => serializer.serialize_i64(*n as i64),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<usize> for FieldValue {
    fn from(n: usize) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// An open, ordered record: field name to [`FieldValue`].
///
/// Field order is insertion order and is observable: it decides the column
/// list, the inferred schema order and CSV headers.
///
/// # Example
///
/// ```
/// use crm_seeker::{FieldValue, Record};
///
/// let record = Record::new()
///     .with("id", 1)
///     .with("company", "Acme Corp")
///     .with("tags", vec!["vip", "trial"]);
///
/// assert_eq!(record.keys().collect::<Vec<_>>(), ["id", "company", "tags"]);
/// assert_eq!(record.get("company"), Some(&FieldValue::from("Acme Corp")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a field. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(idx).1)
    }

    /// Looks a field up by name.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Field values in order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    /// `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to scalar or string-array values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Text form of a possibly absent field. Absent fields read as `undefined`.
pub fn text_of(value: Option<&FieldValue>) -> String {
    match value {
        Some(v) => v.to_text(),
        None => "undefined".to_string(),
    }
}

/// Numeric form of a possibly absent field. Absent fields are `NaN`.
pub fn number_of(value: Option<&FieldValue>) -> f64 {
    value.map(FieldValue::to_number).unwrap_or(f64::NAN)
}

/// Date form of a possibly absent field, in milliseconds since the Unix epoch.
///
/// Numbers are taken as epoch milliseconds and strings go through
/// [`parse_timestamp`]. Anything else has no date.
pub fn timestamp_of(value: Option<&FieldValue>) -> Option<i64> {
    match value? {
        FieldValue::Number(n) if n.is_finite() => Some(*n as i64),
        FieldValue::String(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Parses a date or date-time string into epoch milliseconds.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`, with offset), offset-less
/// date-times (read as UTC, `T` or space separated) and bare dates (UTC
/// midnight).
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Parses a numeric literal the lenient way form inputs expect.
///
/// Surrounding whitespace is ignored and an empty string is zero. Decimal,
/// exponent, `0x`/`0o`/`0b` and `Infinity` forms are accepted; anything else
/// is `NaN`.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    let well_formed = s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way it reads in a form field: `500`, `1.5`, `NaN`.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent form
/// (`1e-7`, `2.5e+21`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_991.0
}
