//! Statement LIMIT/OFFSET operations

use super::builder::Statement;

impl Statement {
    /// Add LIMIT clause
    pub fn limit(mut self, count: i64) -> Self {
        self.limit_count = Some(count);
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, count: i64) -> Self {
        self.offset_value = Some(count);
        self
    }

    /// Remove the LIMIT clause
    pub fn clear_limit(mut self) -> Self {
        self.limit_count = None;
        self
    }

    /// Remove the OFFSET clause
    pub fn clear_offset(mut self) -> Self {
        self.offset_value = None;
        self
    }
}
