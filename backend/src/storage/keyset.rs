//! Keyset page queries: the SQL half of [`crate::domain::pagination`].
//!
//! ```text
//! <select> [WHERE <column> = ? [AND ...]] [AND id > ?] ORDER BY id ASC LIMIT ?
//! ```
//!
//! `id` is a TEXT primary key with the default BINARY collation, so the order
//! is bytewise and total.

use sqlx::{QueryBuilder, Sqlite};

use crate::domain::pagination::PageRequest;

pub struct KeysetQuery<'args> {
    builder: QueryBuilder<'args, Sqlite>,
    has_condition: bool,
}

impl<'args> KeysetQuery<'args> {
    /// `select` is everything up to (not including) the WHERE clause
    pub fn new(select: &str) -> Self {
        Self {
            builder: QueryBuilder::new(select),
            has_condition: false,
        }
    }

    /// Restrict the scan to rows where `column = value`
    pub fn filter_eq(mut self, column: &str, value: String) -> Self {
        self.push_condition();
        self.builder.push(column).push(" = ").push_bind(value);
        self
    }

    /// Append the cursor bound, ordering and limit
    pub fn page(mut self, page: &PageRequest) -> QueryBuilder<'args, Sqlite> {
        if let Some(cursor) = page.starting_after() {
            self.push_condition();
            self.builder.push("id > ").push_bind(cursor.to_string());
        }
        self.builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(i64::from(page.limit()));
        self.builder
    }

    fn push_condition(&mut self) {
        self.builder
            .push(if self.has_condition { " AND " } else { " WHERE " });
        self.has_condition = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageLimits;

    fn page(limit: i64, cursor: Option<&str>) -> PageRequest {
        PageRequest::new(&PageLimits::default(), Some(limit), cursor.map(String::from)).unwrap()
    }

    #[test]
    fn test_first_page_sql() {
        let builder = KeysetQuery::new("SELECT id FROM users").page(&page(10, None));
        assert_eq!(builder.sql(), "SELECT id FROM users ORDER BY id ASC LIMIT ?");
    }

    #[test]
    fn test_cursor_page_sql() {
        let builder = KeysetQuery::new("SELECT id FROM users").page(&page(10, Some("user_abc")));
        assert_eq!(
            builder.sql(),
            "SELECT id FROM users WHERE id > ? ORDER BY id ASC LIMIT ?"
        );
    }

    #[test]
    fn test_scoped_cursor_page_sql() {
        let builder = KeysetQuery::new("SELECT id FROM transactions")
            .filter_eq("user_id", "user_abc".to_string())
            .page(&page(5, Some("txn_def")));
        assert_eq!(
            builder.sql(),
            "SELECT id FROM transactions WHERE user_id = ? AND id > ? ORDER BY id ASC LIMIT ?"
        );
    }
}
