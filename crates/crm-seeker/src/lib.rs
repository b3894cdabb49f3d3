//! Seeker - filter, search, sort and page open CRM records.
//!
//! CRM objects (contacts, tags, custom fields, deals) arrive as open
//! key/value [`Record`]s with no enforced schema. This crate provides the
//! query stages the record explorer runs over them:
//!
//! - Filter conditions with a fixed operator vocabulary, combined with AND
//! - Case-insensitive free-text search across every field
//! - Single-field sorting that detects numeric vs. text comparison
//! - Pagination with clamped page numbers
//! - Display schema inference from record values
//!
//! # Quick Start
//!
//! ```rust
//! use crm_seeker::{FilterCondition, Operator, Record, RecordQuery, SortOrder};
//!
//! let contacts = vec![
//!     Record::new().with("company", "Acme Corp").with("status", "active").with("score", 80),
//!     Record::new().with("company", "Globex").with("status", "inactive").with("score", 95),
//!     Record::new().with("company", "Acme Labs").with("status", "active").with("score", 60),
//! ];
//!
//! let page = RecordQuery::new()
//!     .filter(FilterCondition::new("status", Operator::Eq, "active"))
//!     .search("acme")
//!     .order_by("score", SortOrder::Desc)
//!     .execute(contacts)
//!     .unwrap();
//!
//! assert_eq!(page.total_records, 2);
//! assert_eq!(page.records[0].get("company").unwrap().to_text(), "Acme Corp");
//! ```
//!
//! # Operators
//!
//! | Operator | Comparison |
//! |----------|------------|
//! | `eq`, `neq` | Text equality |
//! | `gt`, `gte`, `lt`, `lte` | Numeric, `NaN` never matches |
//! | `contains`, `startswith` | Case-insensitive text |
//! | `in` | Text membership in a list value |
//! | `between` | Inclusive numeric range over `value`..`value2` |
//! | `daterange` | Inclusive date range over `value`..`value2` |
//! | anything else | Always matches |

mod clause;
mod error;
mod op;
mod ordering;
mod page;
mod query;
mod schema;
mod search;
mod value;

// Re-export public API
pub use clause::{apply_filters, ConditionValue, FilterCondition};
pub use error::{Result, SeekerError};
pub use op::Operator;
pub use ordering::{compare_text, compare_values, sort_records, OrderBy, SortOrder};
pub use page::{paginate, safe_page, total_pages, Page};
pub use query::{RecordQuery, DEFAULT_PAGE_SIZE};
pub use schema::{
    display_name, infer_page_schema, infer_schema, page_columns, FieldSchema, FieldType,
    SchemaMode,
};
pub use search::{apply_search, is_blank, record_matches};
pub use value::{
    format_number, number_of, parse_number, parse_timestamp, text_of, timestamp_of, FieldValue,
    Record,
};
