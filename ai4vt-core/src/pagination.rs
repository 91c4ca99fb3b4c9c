//! Page-based slicing for the history table.

use thiserror::Error;

use crate::domain::DailyRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Current page of a table, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page_size, page: 1 })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`; zero for an empty table.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Jump to `page`, clamped to `[1, total_pages(len)]`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.total_pages(len).max(1));
    }

    pub fn next(&mut self, len: usize) {
        self.go_to(self.page + 1, len);
    }

    pub fn prev(&mut self, len: usize) {
        self.go_to(self.page.saturating_sub(1), len);
    }

    /// Re-clamp after the underlying data changed size.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.page, len);
    }

    /// Index range of the current page within a table of `len` rows.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

/// History ordered for the table: newest date first.
pub fn newest_first(history: &[DailyRecord]) -> Vec<&DailyRecord> {
    let mut rows: Vec<&DailyRecord> = history.iter().collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}
