//! Page count strategies

/// Turns a row count and a page size into the number reported to callers
pub trait Paginate: Send + Sync {
    fn paginate(&self, count: i64, limit: i64) -> i64;
}

/// Number of pages: `ceil(count / limit)`, or the raw count when the limit
/// is not positive
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPaginate;

impl Paginate for DefaultPaginate {
    fn paginate(&self, count: i64, limit: i64) -> i64 {
        if limit > 0 {
            (count + limit - 1) / limit
        } else {
            count
        }
    }
}

/// Reports the total row count, for "load more" style clients
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadPaginate;

impl Paginate for LoadPaginate {
    fn paginate(&self, count: i64, _limit: i64) -> i64 {
        count
    }
}
