//! Query builder and executor.
//!
//! [`RecordQuery`] bundles the filter, search, sort and page parameters of
//! one explorer request and runs them in a fixed order:
//!
//! ```text
//! filters (AND) -> search -> sort -> paginate
//! ```
//!
//! Each stage only ever narrows or reorders the working set produced by the
//! previous one, so the order is not configurable.

use crate::clause::{apply_filters, ConditionValue, FilterCondition};
use crate::error::Result;
use crate::op::Operator;
use crate::ordering::{sort_in_place, OrderBy, SortOrder};
use crate::page::{paginate, Page};
use crate::search::{apply_search, is_blank};
use crate::value::Record;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A query over a collection of open records.
///
/// # Example
///
/// ```
/// use crm_seeker::{Record, RecordQuery, SortOrder};
///
/// let records: Vec<Record> = (1..=5)
///     .map(|i| Record::new().with("id", i).with("status", if i % 2 == 0 { "active" } else { "lead" }))
///     .collect();
///
/// let page = RecordQuery::new()
///     .and_eq("status", "lead")
///     .order_by("id", SortOrder::Desc)
///     .page_size(2)
///     .execute(records)
///     .unwrap();
///
/// assert_eq!(page.total_records, 3);
/// assert_eq!(page.total_pages, 2);
/// assert_eq!(page.records[0].get("id").unwrap().to_text(), "5");
/// ```
#[derive(Debug, Clone)]
pub struct RecordQuery {
    conditions: Vec<FilterCondition>,
    search: Option<String>,
    order_by: Option<OrderBy>,
    page: i64,
    page_size: usize,
}

impl Default for RecordQuery {
    fn default() -> Self {
        RecordQuery {
            conditions: Vec::new(),
            search: None,
            order_by: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RecordQuery {
    /// Creates a query that matches everything and serves the first page.
    pub fn new() -> Self {
        RecordQuery::default()
    }

    // ========================================================================
    // Filter conditions
    // ========================================================================

    /// Adds a prepared condition.
    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds several prepared conditions.
    pub fn filters(mut self, conditions: impl IntoIterator<Item = FilterCondition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Adds a condition. All conditions must match.
    pub fn and(
        self,
        column: &str,
        operator: impl Into<Operator>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.filter(FilterCondition::new(column, operator, value))
    }

    pub fn and_eq(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Eq, value)
    }

    pub fn and_neq(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Neq, value)
    }

    pub fn and_gt(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Gt, value)
    }

    pub fn and_gte(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Gte, value)
    }

    pub fn and_lt(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Lt, value)
    }

    pub fn and_lte(self, column: &str, value: impl Into<ConditionValue>) -> Self {
        self.and(column, Operator::Lte, value)
    }

    pub fn and_contains(self, column: &str, value: &str) -> Self {
        self.and(column, Operator::Contains, value)
    }

    pub fn and_startswith(self, column: &str, value: &str) -> Self {
        self.and(column, Operator::StartsWith, value)
    }

    /// Adds a membership condition.
    pub fn and_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let list: Vec<ConditionValue> = values.into_iter().map(Into::into).collect();
        self.and(column, Operator::In, ConditionValue::List(list))
    }

    /// Adds an inclusive numeric range condition.
    pub fn and_between(
        self,
        column: &str,
        low: impl Into<ConditionValue>,
        high: impl Into<ConditionValue>,
    ) -> Self {
        self.filter(FilterCondition::range(column, Operator::Between, low, high))
    }

    /// Adds an inclusive date range condition.
    pub fn and_daterange(self, column: &str, start: &str, end: &str) -> Self {
        self.filter(FilterCondition::range(column, Operator::DateRange, start, end))
    }

    // ========================================================================
    // Search, ordering, paging
    // ========================================================================

    /// Sets the free-text search term. Blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if is_blank(&term) { None } else { Some(term) };
        self
    }

    /// Sets the sort field and direction.
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by = Some(OrderBy::new(field, order));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, SortOrder::Asc)
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, SortOrder::Desc)
    }

    /// Sets the requested page (1-based). Clamped at execution time.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn get_page(&self) -> i64 {
        self.page
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `true` if the query keeps every record.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.search.is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs filters, search and sort, without paging.
    pub fn filter_records(&self, records: Vec<Record>) -> Vec<Record> {
        let mut records = apply_filters(records, &self.conditions);
        if let Some(term) = &self.search {
            records = apply_search(records, term);
        }
        if let Some(order_by) = &self.order_by {
            sort_in_place(&mut records, order_by);
        }
        records
    }

    /// Counts the records the query keeps.
    pub fn count(&self, records: Vec<Record>) -> usize {
        let records = apply_filters(records, &self.conditions);
        match &self.search {
            Some(term) => apply_search(records, term).len(),
            None => records.len(),
        }
    }

    /// Runs the whole pipeline and returns the requested page.
    pub fn execute(&self, records: Vec<Record>) -> Result<Page<Record>> {
        paginate(self.filter_records(records), self.page, self.page_size)
    }
}
