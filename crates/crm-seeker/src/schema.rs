//! Display schema inference.
//!
//! Records carry no schema, so the explorer derives one for each page it
//! serves by looking at the values themselves. The default
//! ([`SchemaMode::FirstRecord`]) inspects only the first record of the page;
//! [`SchemaMode::PageUnion`] walks the whole page and keeps the first type
//! seen for each field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::{FieldValue, Record};

static ISO_DATE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T").expect("static regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])").expect("static regex"));

/// Inferred display type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// Structured values (string arrays).
    Json,
    /// ISO-8601 date-time strings.
    Date,
}

impl FieldType {
    /// Infers the display type of a single value.
    pub fn of(value: &FieldValue) -> FieldType {
        match value {
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Bool(_) => FieldType::Boolean,
            FieldValue::List(_) => FieldType::Json,
            FieldValue::String(s) if ISO_DATE_TIME.is_match(s) => FieldType::Date,
            FieldValue::String(_) | FieldValue::Null => FieldType::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Json => "json",
            FieldType::Date => "date",
        }
    }
}

/// Display metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human label, e.g. `Annual Revenue` for `annualRevenue`.
    pub display_name: String,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let display_name = display_name(&name);
        FieldSchema {
            name,
            field_type,
            display_name,
        }
    }
}

/// How a page's schema is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Fields of the first record only.
    #[default]
    FirstRecord,
    /// Every field present anywhere on the page, in first-seen order.
    PageUnion,
}

/// Turns a camelCase key into a title: `annualRevenue` -> `Annual Revenue`.
pub fn display_name(key: &str) -> String {
    let spaced = UPPERCASE.replace_all(key, " $1");
    let mut chars = spaced.chars();
    let titled: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    titled.trim().to_string()
}

/// Schema of a single record, in field order.
pub fn infer_schema(record: &Record) -> Vec<FieldSchema> {
    record
        .iter()
        .map(|(name, value)| FieldSchema::new(name, FieldType::of(value)))
        .collect()
}

/// Schema of a page. An empty page has an empty schema.
pub fn infer_page_schema(records: &[Record], mode: SchemaMode) -> Vec<FieldSchema> {
    match mode {
        SchemaMode::FirstRecord => records.first().map(infer_schema).unwrap_or_default(),
        SchemaMode::PageUnion => {
            let mut schema: Vec<FieldSchema> = Vec::new();
            for record in records {
                for (name, value) in record.iter() {
                    if !schema.iter().any(|f| f.name == name) {
                        schema.push(FieldSchema::new(name, FieldType::of(value)));
                    }
                }
            }
            schema
        }
    }
}

/// Column names of a page, matching [`infer_page_schema`].
pub fn page_columns(records: &[Record], mode: SchemaMode) -> Vec<String> {
    match mode {
        SchemaMode::FirstRecord => records
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default(),
        SchemaMode::PageUnion => infer_page_schema(records, mode)
            .into_iter()
            .map(|f| f.name)
            .collect(),
    }
}
