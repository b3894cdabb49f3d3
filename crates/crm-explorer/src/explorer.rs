//! Request handling.
//!
//! [`Explorer`] validates requests, loads the dataset for the requested
//! object type and runs the seeker pipeline over it. Each call is
//! self-contained: the dataset is fetched fresh from the provider and
//! dropped when the response is built.

use std::time::Instant;

use crm_seeker::{infer_page_schema, page_columns, text_of, Record, RecordQuery};
use tracing::{debug, error, warn};

use crate::config::ExplorerConfig;
use crate::dataset::{DatasetProvider, MockDatasetProvider};
use crate::error::{ExplorerError, Result};
use crate::export::render;
use crate::request::{
    ExportFormat, ExportOutput, ExportRequest, LookupRequest, QueryRequest, QueryResponse,
};

/// Serves explorer requests against a dataset provider.
///
/// # Example
///
/// ```
/// use crm_explorer::{Explorer, QueryRequest};
///
/// let explorer = Explorer::mock();
/// let response = explorer.query(&QueryRequest::new("contacts").page_size(50)).unwrap();
///
/// assert_eq!(response.records.len(), 50);
/// assert_eq!(response.total_pages, 3);
/// assert!(response.has_next_page);
/// ```
#[derive(Debug, Clone)]
pub struct Explorer<P = MockDatasetProvider> {
    provider: P,
    config: ExplorerConfig,
}

impl Explorer<MockDatasetProvider> {
    /// Explorer over the demo dataset with default settings.
    pub fn mock() -> Self {
        Explorer::new(MockDatasetProvider::new(), ExplorerConfig::default())
    }
}

impl<P: DatasetProvider> Explorer<P> {
    pub fn new(provider: P, config: ExplorerConfig) -> Self {
        Explorer { provider, config }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Object types served natively.
    pub fn object_types(&self) -> Vec<String> {
        self.provider.object_types()
    }

    /// Runs a paged query.
    ///
    /// Stages run in a fixed order: load, filter, search, sort, paginate,
    /// then schema inference on the served page.
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let started = Instant::now();

        let object_type = required("objectType", request.object_type.as_deref())?;
        let page_size = request.page_size.unwrap_or(self.config.default_page_size);
        if page_size == 0 {
            return Err(ExplorerError::validation("pageSize must be at least 1"));
        }

        let records = self.load(object_type)?;
        let loaded = records.len();

        let mut query = RecordQuery::new()
            .filters(request.filter_conditions.iter().flatten().cloned())
            .page(request.page.unwrap_or(1))
            .page_size(page_size);
        if let Some(term) = &request.search {
            query = query.search(term.as_str());
        }
        if let Some(sort_by) = &request.sort_by {
            query = query.order_by(sort_by, request.sort_order.unwrap_or_default());
        }

        let page = query.execute(records).map_err(|e| self.fail(object_type, e))?;

        let columns = page_columns(&page.records, self.config.schema_mode);
        let schema = infer_page_schema(&page.records, self.config.schema_mode);
        let query_time_ms = round_two(started.elapsed().as_secs_f64() * 1000.0);

        debug!(
            object_type,
            loaded,
            matched = page.total_records,
            page = page.page,
            query_time_ms,
            "explorer query served"
        );

        Ok(QueryResponse {
            has_next_page: page.has_next_page(),
            has_prev_page: page.has_prev_page(),
            total_records: page.total_records,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            records: page.records,
            columns,
            schema,
            query_time_ms,
        })
    }

    /// Exports the whole collection, optionally filtered, searched and sorted.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportOutput> {
        let object_type = required("objectType", request.object_type.as_deref())?;
        let format: ExportFormat = required("format", request.format.as_deref())?
            .parse()
            .map_err(ExplorerError::Validation)?;

        let mut query = RecordQuery::new()
            .filters(request.filter_conditions.iter().flatten().cloned());
        if let Some(term) = &request.search {
            query = query.search(term.as_str());
        }
        if let Some(sort_by) = &request.sort_by {
            query = query.order_by(sort_by, request.sort_order.unwrap_or_default());
        }

        let records = query.filter_records(self.load(object_type)?);
        let body = render(&records, format).map_err(|e| self.fail(object_type, e))?;

        debug!(object_type, %format, records = records.len(), "explorer export rendered");

        Ok(ExportOutput {
            format,
            content_type: format.content_type(),
            file_name: format!("{}-export.{}", object_type, format.as_str()),
            record_count: records.len(),
            body,
        })
    }

    /// Finds one record by its `id` field.
    pub fn lookup(&self, request: &LookupRequest) -> Result<Record> {
        let object_type = required("objectType", request.object_type.as_deref())?;
        let id = required("id", request.id.as_deref())?;

        self.load(object_type)?
            .into_iter()
            .find(|record| text_of(record.get("id")) == id)
            .ok_or_else(|| ExplorerError::NotFound {
                object_type: object_type.to_string(),
                id: id.to_string(),
            })
    }

    fn load(&self, object_type: &str) -> Result<Vec<Record>> {
        if !self.provider.knows(object_type) {
            if self.config.strict_object_types {
                return Err(ExplorerError::validation(format!(
                    "unknown objectType '{}'",
                    object_type
                )));
            }
            warn!(object_type, "unknown object type, using provider fallback");
        }
        self.provider
            .dataset(object_type)
            .map_err(|e| self.fail(object_type, e))
    }

    fn fail(
        &self,
        object_type: &str,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> ExplorerError {
        error!(object_type, error = %cause, "explorer request failed");
        ExplorerError::internal(cause)
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ExplorerError::validation(format!("{} is required", name))),
    }
}

/// Rounds to two decimals, halves away from zero.
fn round_two(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
