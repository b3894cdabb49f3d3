//! Request and response envelopes.
//!
//! These are the JSON shapes exchanged with the dashboard. Field names are
//! camelCase on the wire.

use std::fmt;
use std::str::FromStr;

use crm_seeker::{FieldSchema, FilterCondition, Record, SortOrder};
use serde::{Deserialize, Serialize};

/// A paged explorer query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Required. Validated by the explorer, not by deserialization.
    #[serde(default)]
    pub object_type: Option<String>,
    /// 1-based page, defaults to 1.
    #[serde(default)]
    pub page: Option<i64>,
    /// Defaults to the configured page size.
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub filter_conditions: Option<Vec<FilterCondition>>,
    #[serde(default)]
    pub search: Option<String>,
}

impl QueryRequest {
    pub fn new(object_type: impl Into<String>) -> Self {
        QueryRequest {
            object_type: Some(object_type.into()),
            ..QueryRequest::default()
        }
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.filter_conditions
            .get_or_insert_with(Vec::new)
            .push(condition);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// One page of explorer results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub records: Vec<Record>,
    pub total_records: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub columns: Vec<String>,
    pub schema: Vec<FieldSchema>,
    /// Wall-clock handling time, rounded to two decimals.
    pub query_time_ms: f64,
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("format must be 'json' or 'csv', got '{}'", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An export of a whole (optionally filtered) collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub object_type: Option<String>,
    /// Required; `json` or `csv`. Kept as text so a bad value is a
    /// validation error rather than a parse failure.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub filter_conditions: Option<Vec<FilterCondition>>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl ExportRequest {
    pub fn new(object_type: impl Into<String>, format: ExportFormat) -> Self {
        ExportRequest {
            object_type: Some(object_type.into()),
            format: Some(format.as_str().to_string()),
            ..ExportRequest::default()
        }
    }
}

/// A rendered export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub format: ExportFormat,
    pub content_type: &'static str,
    /// Suggested download name, e.g. `contacts-export.csv`.
    pub file_name: String,
    pub record_count: usize,
    pub body: String,
}

/// A single-record lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl LookupRequest {
    pub fn new(object_type: impl Into<String>, id: impl Into<String>) -> Self {
        LookupRequest {
            object_type: Some(object_type.into()),
            id: Some(id.into()),
        }
    }
}
