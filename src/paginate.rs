//! Offset/limit pagination.
//!
//! A [`PageWindow`] turns "`total` items starting at `offset`, at most
//! `chunk_size` per call" into the exact request sequence: `ceil(total / chunk_size)`
//! pages at increasing offsets, the last one carrying the remainder.
//! There is no retry: the first failing page aborts the whole run.

use crate::error::{ExtractError, Result};
use serde_json::Value;

/// Default number of records requested per page.
pub const DEFAULT_CHUNK_SIZE: u64 = 250;

/// One paginated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    total: u64,
    chunk_size: u64,
    offset: u64,
}

impl PageWindow {
    /// Fails with `InvalidArgument` unless `total_items > 0`, `chunk_size > 0`
    /// and the last requested item index fits in a `u64`.
    pub fn new(total_items: i64, chunk_size: u64, offset: u64) -> Result<Self> {
        if total_items <= 0 {
            return Err(ExtractError::invalid(format!(
                "nr_items has to be larger than 0 (got {})",
                total_items
            )));
        }
        if chunk_size == 0 {
            return Err(ExtractError::invalid("chunk_size has to be larger than 0"));
        }

        let total = total_items as u64;
        if offset.checked_add(total).is_none() {
            return Err(ExtractError::invalid(format!(
                "offset {} plus nr_items {} exceeds the addressable range",
                offset, total
            )));
        }

        Ok(PageWindow {
            total,
            chunk_size,
            offset,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.chunk_size)
    }

    pub fn pages(&self) -> Pages {
        Pages {
            next_offset: self.offset,
            remaining: self.total,
            chunk_size: self.chunk_size,
        }
    }
}

/// Iterator over the requests of a [`PageWindow`].
#[derive(Debug, Clone)]
pub struct Pages {
    next_offset: u64,
    remaining: u64,
    chunk_size: u64,
}

impl Iterator for Pages {
    type Item = PageRequest;

    fn next(&mut self) -> Option<PageRequest> {
        if self.remaining == 0 {
            return None;
        }

        let limit = self.remaining.min(self.chunk_size);
        let request = PageRequest {
            offset: self.next_offset,
            limit,
        };

        self.remaining -= limit;
        self.next_offset += limit;
        Some(request)
    }
}

/// Issue every page of `window` in order, stopping at the first error.
pub fn for_each_page<F>(window: &PageWindow, mut handle_page: F) -> Result<()>
where
    F: FnMut(PageRequest) -> Result<()>,
{
    for request in window.pages() {
        handle_page(request)?;
    }
    Ok(())
}

/// Fetch `total_items` records in chunks and return them in page order.
///
/// A page returning more records than its limit is truncated to the limit,
/// so the result never exceeds `total_items`. A failing page discards
/// everything fetched so far.
pub fn paginate<F>(total_items: i64, chunk_size: u64, offset: u64, mut fetch_page: F) -> Result<Vec<Value>>
where
    F: FnMut(PageRequest) -> Result<Vec<Value>>,
{
    let window = PageWindow::new(total_items, chunk_size, offset)?;
    let mut records = Vec::with_capacity(capacity_hint(&window));

    for_each_page(&window, |request| {
        let page = fetch_page(request)?;
        records.extend(page.into_iter().take(request.limit as usize));
        Ok(())
    })?;

    Ok(records)
}

/// Pre-allocation size for a window's results, bounded so huge requests do not
/// reserve memory up front.
pub(crate) fn capacity_hint(window: &PageWindow) -> usize {
    const MAX_PREALLOC: u64 = 10_000;
    window.total().min(MAX_PREALLOC) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requests(total: i64, chunk: u64, offset: u64) -> Vec<(u64, u64)> {
        PageWindow::new(total, chunk, offset)
            .unwrap()
            .pages()
            .map(|p| (p.offset, p.limit))
            .collect()
    }

    #[test]
    fn test_single_partial_page() {
        assert_eq!(requests(3, 250, 0), vec![(0, 3)]);
    }

    #[test]
    fn test_remainder_page() {
        assert_eq!(requests(300, 250, 0), vec![(0, 250), (250, 50)]);
    }

    #[test]
    fn test_evenly_divisible() {
        assert_eq!(requests(500, 250, 10), vec![(10, 250), (260, 250)]);
        assert_eq!(requests(1, 1, 0), vec![(0, 1)]);
    }

    #[test]
    fn test_page_count_matches_requests() {
        for total in 1..40_i64 {
            for chunk in 1..12_u64 {
                let window = PageWindow::new(total, chunk, 7).unwrap();
                let pages: Vec<PageRequest> = window.pages().collect();

                assert_eq!(pages.len() as u64, window.page_count());
                assert_eq!(pages.len() as u64, (total as u64 + chunk - 1) / chunk);
                assert_eq!(pages.iter().map(|p| p.limit).sum::<u64>(), total as u64);
                for (i, page) in pages.iter().enumerate() {
                    assert_eq!(page.offset, 7 + i as u64 * chunk);
                }
            }
        }
    }

    #[test]
    fn test_invalid_window() {
        assert!(matches!(PageWindow::new(0, 250, 0), Err(ExtractError::InvalidArgument(_))));
        assert!(matches!(PageWindow::new(-5, 250, 0), Err(ExtractError::InvalidArgument(_))));
        assert!(matches!(PageWindow::new(5, 0, 0), Err(ExtractError::InvalidArgument(_))));
    }

    #[test]
    fn test_offset_near_upper_bound() {
        let err = PageWindow::new(5, 2, u64::MAX - 1).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidArgument(_)));

        // the window ending exactly at u64::MAX is still addressable
        let window = PageWindow::new(5, 2, u64::MAX - 5).unwrap();
        let pages: Vec<PageRequest> = window.pages().collect();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2], PageRequest { offset: u64::MAX - 1, limit: 1 });
    }

    #[test]
    fn test_paginate_concatenates_in_order() {
        let mut seen = Vec::new();
        let records = paginate(5, 2, 0, |request| {
            seen.push(request);
            Ok((0..request.limit).map(|i| json!(request.offset + i)).collect())
        })
        .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(records, (0..5).map(|i| json!(i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_paginate_truncates_oversized_pages() {
        let records = paginate(3, 250, 0, |_| Ok(vec![json!(1); 10])).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_paginate_fails_fast() {
        let mut calls = 0;
        let result = paginate(10, 2, 0, |request| {
            calls += 1;
            if request.offset == 2 {
                return Err(ExtractError::Api { status: 503, body: "unavailable".to_string() });
            }
            Ok(vec![json!({}); 2])
        });

        assert!(matches!(result, Err(ExtractError::Api { status: 503, .. })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_paginate_rejects_before_fetching() {
        let mut calls = 0;
        let result = paginate(0, 250, 0, |_| {
            calls += 1;
            Ok(vec![])
        });
        assert!(matches!(result, Err(ExtractError::InvalidArgument(_))));
        assert_eq!(calls, 0);
    }
}
