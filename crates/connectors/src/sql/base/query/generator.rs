use crate::sql::base::dialect::Dialect;
use model::pagination::offset::PageWindow;

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// `SELECT * FROM <table>`, quoting `table` or `schema.table` part by part.
    pub fn select_all(&self, table: &str) -> String {
        let table_ref = table
            .split('.')
            .map(|part| self.dialect.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".");
        format!("SELECT * FROM {table_ref}")
    }

    /// Restricts `base` to the rows of `window`. Without an ORDER BY in
    /// `base`, which rows land in which window is up to the database.
    pub fn paginate(&self, base: &str, window: PageWindow) -> String {
        self.dialect.paginate(base, window)
    }
}
