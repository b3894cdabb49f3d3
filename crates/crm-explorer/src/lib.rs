//! Record explorer for CRM objects.
//!
//! The explorer answers the dashboard's "Data Explorer" requests: page
//! through contacts, tags, custom fields or deals with filters, free-text
//! search and sorting, and get back the page together with display schema
//! and timing. It also exports whole collections as JSON or CSV and looks up
//! single records by id.
//!
//! Query stages come from [`crm_seeker`]; this crate adds request
//! validation, dataset loading, schema/column derivation, export rendering,
//! configuration and the error taxonomy.
//!
//! # Example
//!
//! ```rust
//! use crm_explorer::{Explorer, QueryRequest};
//! use crm_seeker::{FilterCondition, Operator, SortOrder};
//!
//! let explorer = Explorer::mock();
//! let request = QueryRequest::new("contacts")
//!     .filter(FilterCondition::new("status", Operator::Eq, "active"))
//!     .sort("annualRevenue", SortOrder::Desc)
//!     .page_size(10);
//!
//! let response = explorer.query(&request).unwrap();
//! assert_eq!(response.records.len(), 10);
//! assert_eq!(response.columns[0], "id");
//! ```
//!
//! # Errors
//!
//! Every operation returns [`ExplorerError`], which maps to a status code:
//! 400 for validation failures, 404 for missing records and 500 for
//! anything unexpected. Internal errors never expose their cause in the
//! message; it is logged through `tracing` and kept as the error source.

mod config;
pub mod dataset;
mod error;
pub mod export;
mod explorer;
mod request;

pub use config::ExplorerConfig;
pub use dataset::{DatasetProvider, MockDatasetProvider, ObjectType};
pub use error::{ConfigError, DatasetError, ExplorerError, Result};
pub use explorer::Explorer;
pub use request::{
    ExportFormat, ExportOutput, ExportRequest, LookupRequest, QueryRequest, QueryResponse,
};
