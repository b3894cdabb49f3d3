//! Page slicing with clamped page numbers.

use serde::Serialize;

use crate::error::{Result, SeekerError};

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, at most `page_size`.
    pub records: Vec<T>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub page_size: usize,
    /// Size of the whole result set before slicing.
    pub total_records: usize,
    /// Always at least 1, even for an empty result set.
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Number of pages needed for `total` items, never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn safe_page(requested: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages).unwrap_or(i64::MAX);
    requested.clamp(1, last) as usize
}

/// Slices `items` down to the requested page.
///
/// Out-of-range pages are clamped rather than rejected: page 0 or below
/// serves the first page and anything past the end serves the last.
///
/// # Example
///
/// ```
/// use crm_seeker::paginate;
///
/// let items: Vec<u32> = (0..120).collect();
/// let page = paginate(items, 9, 50).unwrap();
/// assert_eq!(page.page, 3);
/// assert_eq!(page.records.len(), 20);
/// assert!(!page.has_next_page());
/// ```
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: usize) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(SeekerError::InvalidPageSize(page_size));
    }
    let total_records = items.len();
    let total_pages = total_pages(total_records, page_size);
    let page = safe_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_records);
    let records = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Ok(Page {
        records,
        page,
        page_size,
        total_records,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_many() {
        let page = paginate((0..120).collect::<Vec<_>>(), 1, 50).unwrap();
        assert_eq!(page.records.len(), 50);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page());
        assert!(!page.has_prev_page());
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate((0..120).collect::<Vec<_>>(), 3, 50).unwrap();
        assert_eq!(page.records, (100..120).collect::<Vec<_>>());
        assert!(!page.has_next_page());
        assert!(page.has_prev_page());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<_> = (0..10).collect();
        assert_eq!(paginate(items.clone(), 0, 4).unwrap().page, 1);
        assert_eq!(paginate(items.clone(), -3, 4).unwrap().page, 1);
        let past_end = paginate(items, 99, 4).unwrap();
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.records, vec![8, 9]);
    }

    #[test]
    fn empty_input_has_one_page() {
        let page = paginate(Vec::<u8>::new(), 5, 50).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
        assert!(!page.has_next_page());
        assert!(!page.has_prev_page());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            paginate(vec![1, 2, 3], 1, 0),
            Err(SeekerError::InvalidPageSize(0))
        );
    }
}
