use crate::sql::mysql::data_type;
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use mysql_async::Row as MySqlRow;

/// A driver row borrowed from a result set.
pub enum DbRow<'a> {
    MySqlRow(&'a MySqlRow),
}

impl DbRow<'_> {
    /// Decodes every column, in result-set order, into a [`RowData`].
    pub fn to_row_data(&self, entity: &str) -> RowData {
        let field_values = self
            .columns()
            .into_iter()
            .enumerate()
            .map(|(idx, name)| FieldValue::new(name, self.value_at(idx)))
            .collect();

        RowData::new(entity, field_values)
    }

    pub fn columns(&self) -> Vec<String> {
        match self {
            DbRow::MySqlRow(row) => row
                .columns_ref()
                .iter()
                .map(|col| col.name_str().into_owned())
                .collect(),
        }
    }

    pub fn value_at(&self, idx: usize) -> Value {
        match self {
            DbRow::MySqlRow(row) => row
                .columns_ref()
                .get(idx)
                .zip(row.as_ref(idx))
                .map(|(col, value)| {
                    data_type::to_value(value, col.column_type(), col.decimals())
                })
                .unwrap_or(Value::Null),
        }
    }
}
