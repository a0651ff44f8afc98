//! Offset/limit pagination for list endpoints
//!
//! An omitted offset starts at the first row; an omitted limit means
//! "no limit". Both are bound explicitly so the SQL never depends on a
//! driver default.

use serde::Deserialize;

/// Pagination window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Rows to skip
    pub offset: u32,
    /// Maximum rows to return, `None` for all remaining rows
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit,
        }
    }

    /// SQL OFFSET value.
    pub fn sql_offset(&self) -> i64 {
        i64::from(self.offset)
    }

    /// SQL LIMIT value; `None` binds as `LIMIT NULL` (unbounded).
    pub fn sql_limit(&self) -> Option<i64> {
        self.limit.map(i64::from)
    }

    /// Apply the window to an already ordered iterator.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.offset as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}

/// `?offset=&limit=` for list endpoints without other filters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        Self::new(params.offset, params.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_values_mean_everything() {
        let p = Pagination::new(None, None);
        assert_eq!(p.sql_offset(), 0);
        assert_eq!(p.sql_limit(), None);
        assert_eq!(p.apply(1..=5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn offset_and_limit_window() {
        let p = Pagination::new(Some(1), Some(2));
        assert_eq!(p.sql_offset(), 1);
        assert_eq!(p.sql_limit(), Some(2));
        assert_eq!(p.apply(1..=5), vec![2, 3]);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let p = Pagination::new(Some(10), None);
        assert!(p.apply(1..=5).is_empty());
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let p = Pagination::new(None, Some(0));
        assert!(p.apply(1..=5).is_empty());
    }
}
