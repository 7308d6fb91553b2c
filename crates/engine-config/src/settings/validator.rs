use crate::{
    error::ConfigError,
    settings::{
        DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_POLL_INTERVAL,
        interval::parse_interval,
        source::{RawSourceConfig, SourceConfig, SourceQuery},
    },
};
use tracing::warn;

const LARGE_BATCH_SIZE: usize = 100_000;

/// Turns a [`RawSourceConfig`] into a [`SourceConfig`], applying defaults.
#[derive(Debug, Default)]
pub struct SourceConfigValidator;

impl SourceConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, raw: RawSourceConfig) -> Result<SourceConfig, ConfigError> {
        let connection_string = non_blank(raw.connection_string)
            .ok_or(ConfigError::MissingProperty("connection_string"))?;

        let table = non_blank(raw.table);
        let query = match (non_blank(raw.query), table.as_deref()) {
            (Some(query), _) => SourceQuery::Custom(self.validate_query(&query)?),
            (None, Some(table)) => SourceQuery::Table(self.validate_table(table)?),
            (None, None) => return Err(ConfigError::MissingProperty("table or query")),
        };

        Ok(SourceConfig {
            connection_string,
            table: table.unwrap_or_default(),
            query,
            batch_size: self.validate_batch_size(raw.batch_size),
            poll_interval: parse_interval(
                "poll_interval",
                raw.poll_interval.as_deref(),
                DEFAULT_POLL_INTERVAL,
            ),
            connect_timeout: parse_interval(
                "connect_timeout",
                raw.connect_timeout.as_deref(),
                DEFAULT_CONNECT_TIMEOUT,
            ),
        })
    }

    fn validate_batch_size(&self, batch_size: Option<i64>) -> usize {
        match batch_size {
            Some(size) if size > 0 => {
                let size = usize::try_from(size).unwrap_or(usize::MAX);
                if size > LARGE_BATCH_SIZE {
                    warn!(batch_size = size, "Batch size is very large, may cause memory issues");
                }
                size
            }
            _ => DEFAULT_BATCH_SIZE,
        }
    }

    /// Accepts a single statement that starts with the `SELECT` keyword. A
    /// trailing semicolon is dropped so a LIMIT/OFFSET clause can be appended;
    /// any other `;` outside a quoted literal or identifier is rejected.
    ///
    /// The check is lexical: `WITH ... SELECT` and queries opening with a
    /// comment are refused, since the appended window only applies cleanly to
    /// a plain SELECT.
    fn validate_query(&self, query: &str) -> Result<String, ConfigError> {
        let query = query.trim().trim_end_matches(';').trim_end();

        let starts_with_select = query
            .get(..6)
            .is_some_and(|kw| kw.eq_ignore_ascii_case("select"))
            && query[6..].starts_with(|c: char| c.is_whitespace() || c == '*');

        if !starts_with_select || has_unquoted_semicolon(query) {
            return Err(ConfigError::InvalidQuery(query.to_string()));
        }

        Ok(query.to_string())
    }

    /// Accepts `table` or `schema.table`, each part non-empty and free of
    /// whitespace and control characters.
    fn validate_table(&self, table: &str) -> Result<String, ConfigError> {
        let parts: Vec<&str> = table.split('.').collect();
        let valid = parts.len() <= 2
            && parts.iter().all(|part| {
                !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c.is_control())
            });

        if !valid {
            return Err(ConfigError::InvalidTable(table.to_string()));
        }

        Ok(table.to_string())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Quotes are ', " and `; a backslash escapes the next character inside the
// first two, matching MySQL's default SQL mode.
fn has_unquoted_semicolon(query: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut chars = query.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('\'') | Some('"') if c == '\\' => {
                chars.next();
            }
            Some(_) => {}
            None if matches!(c, '\'' | '"' | '`') => quote = Some(c),
            None if c == ';' => return true,
            None => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ConfigError,
        settings::{
            DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_POLL_INTERVAL,
            parse_source_config, source::SourceQuery,
        },
    };
    use std::time::Duration;
    use super::has_unquoted_semicolon;
    use tracing_test::traced_test;

    #[test]
    fn test_minimal_table_config_gets_defaults() {
        let config =
            parse_source_config(br#"{"connection_string": "mysql://u:p@db/shop", "table": "orders"}"#)
                .expect("valid config");

        assert_eq!(config.table(), "orders");
        assert_eq!(config.query, SourceQuery::Table("orders".into()));
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_non_positive_batch_size_is_normalized() {
        for size in [0, -1, -500] {
            let raw = format!(
                r#"{{"connection_string": "mysql://db/shop", "table": "t", "batch_size": {size}}}"#
            );
            let config = parse_source_config(raw.as_bytes()).expect("valid config");
            assert_eq!(config.batch_size(), 100, "batch_size {size}");
        }
    }

    #[test]
    fn test_explicit_settings_are_kept() {
        let config = parse_source_config(
            br#"{
                "connection_string": "mysql://db/shop",
                "table": "orders",
                "batch_size": 2,
                "poll_interval": "250ms",
                "connect_timeout": "3s"
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.batch_size(), 2);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_unparsable_poll_interval_is_normalized() {
        let config = parse_source_config(
            br#"{"connection_string": "mysql://db/shop", "table": "t", "poll_interval": "every now and then"}"#,
        )
        .expect("valid config");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_dsn_alias_is_accepted() {
        let config = parse_source_config(br#"{"dsn": "mysql://db/shop", "table": "t"}"#)
            .expect("valid config");
        assert_eq!(config.connection_string, "mysql://db/shop");
    }

    #[test]
    fn test_missing_connection_string() {
        let err = parse_source_config(br#"{"table": "orders"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty("connection_string")));

        let err = parse_source_config(br#"{"connection_string": "  ", "table": "orders"}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty("connection_string")));
    }

    #[test]
    fn test_missing_table_and_query() {
        let err = parse_source_config(br#"{"connection_string": "mysql://db/shop"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty("table or query")));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_source_config(b"{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = parse_source_config(b"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = parse_source_config(
            br#"{"connection_string": "mysql://db/shop", "table": "t", "batch_size": "ten"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_custom_query_overrides_table() {
        let config = parse_source_config(
            br#"{
                "connection_string": "mysql://db/shop",
                "table": "orders",
                "query": "  SELECT id, total FROM orders ORDER BY id;  "
            }"#,
        )
        .expect("valid config");

        assert_eq!(
            config.query,
            SourceQuery::Custom("SELECT id, total FROM orders ORDER BY id".into())
        );
        assert_eq!(config.table(), "orders");
    }

    #[test]
    fn test_query_only_config_has_empty_table() {
        let config = parse_source_config(
            br#"{"connection_string": "mysql://db/shop", "query": "select * from orders"}"#,
        )
        .expect("valid config");
        assert_eq!(config.table(), "");
    }

    #[test]
    fn test_rejects_non_select_queries() {
        for query in [
            "DELETE FROM orders",
            "selection",
            "SELECT 1; DROP TABLE orders",
            "UPDATE orders SET total = 0",
        ] {
            let raw = format!(r#"{{"connection_string": "mysql://db/shop", "query": "{query}"}}"#);
            let err = parse_source_config(raw.as_bytes()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidQuery(_)), "{query}");
        }
    }

    #[test]
    fn test_semicolons_inside_literals_are_allowed() {
        for query in [
            "SELECT 'a;b' FROM t",
            "SELECT `odd;name` FROM t WHERE note <> ';'",
        ] {
            let raw = format!(r#"{{"connection_string": "mysql://db/shop", "query": "{query};"}}"#);
            let config = parse_source_config(raw.as_bytes()).expect(query);
            assert_eq!(config.query, SourceQuery::Custom(query.into()));
        }

        assert!(!has_unquoted_semicolon(r"SELECT 'it\'s;' FROM t"));
        assert!(!has_unquoted_semicolon(r#"SELECT "x;y" FROM t"#));
        assert!(has_unquoted_semicolon("SELECT 'a'; SELECT 'b'"));
    }

    #[test]
    fn test_only_plain_select_is_accepted() {
        for query in [
            "WITH recent AS (SELECT id FROM orders) SELECT * FROM recent",
            "/* nightly */ SELECT * FROM orders",
        ] {
            let raw = format!(r#"{{"connection_string": "mysql://db/shop", "query": "{query}"}}"#);
            let err = parse_source_config(raw.as_bytes()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidQuery(_)), "{query}");
        }
    }

    #[test]
    fn test_table_names() {
        let ok = parse_source_config(
            br#"{"connection_string": "mysql://db/shop", "table": "shop.orders"}"#,
        )
        .expect("valid config");
        assert_eq!(ok.query, SourceQuery::Table("shop.orders".into()));

        for table in ["a.b.c", "orders.", "my table"] {
            let raw = format!(r#"{{"connection_string": "mysql://db/shop", "table": "{table}"}}"#);
            let err = parse_source_config(raw.as_bytes()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTable(_)), "{table}");
        }
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let config = parse_source_config(
            br#"{"connection_string": "mysql://app:s3cret@db/shop", "table": "t"}"#,
        )
        .expect("valid config");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("mysql://app:***@db/shop"));
    }

    #[traced_test]
    #[test]
    fn test_validation_does_not_log_config() {
        parse_source_config(br#"{"connection_string": "mysql://app:s3cret@db/shop", "table": "t"}"#)
            .expect("valid config");
        assert!(!logs_contain("db/shop"));
    }
}
