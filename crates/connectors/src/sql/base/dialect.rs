//! Database-specific SQL syntax.

use model::pagination::offset::PageWindow;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Appends a row window to a SELECT statement.
    fn paginate(&self, sql: &str, window: PageWindow) -> String {
        format!("{sql} LIMIT {} OFFSET {}", window.limit, window.offset)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_quotes_with_backticks() {
        assert_eq!(MySql.quote_identifier("orders"), "`orders`");
        assert_eq!(MySql.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_paginate_appends_limit_and_offset() {
        let sql = MySql.paginate(
            "SELECT * FROM `orders`",
            PageWindow {
                offset: 40,
                limit: 20,
            },
        );
        assert_eq!(sql, "SELECT * FROM `orders` LIMIT 20 OFFSET 40");
    }
}
