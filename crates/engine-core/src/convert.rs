use crate::error::ConversionError;
use bytes::Bytes;
use model::{
    core::value::Value,
    records::{record::Record, row::RowData},
};
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

/// Encodes result rows into self-describing record payloads.
///
/// A payload is a JSON object keyed by column name. Keys are emitted in
/// sorted order so identical rows always encode to identical bytes. Byte
/// sequences are decoded as UTF-8 text; no other value is coerced.
#[derive(Debug, Clone)]
pub struct RowConverter {
    source: String,
    table: String,
}

impl RowConverter {
    pub fn new(source: &str, table: &str) -> Self {
        Self {
            source: source.to_string(),
            table: table.to_string(),
        }
    }

    pub fn convert(&self, row: &RowData) -> Result<Record, ConversionError> {
        let payload = encode_row(row)?;
        Ok(Record::new(&self.source, &self.table, payload))
    }

    /// Converts a whole page. The first failing row fails the page.
    pub fn convert_all(&self, rows: &[RowData]) -> Result<Vec<Record>, ConversionError> {
        rows.iter().map(|row| self.convert(row)).collect()
    }
}

/// Serializes one row as a canonical JSON object. When a column name repeats,
/// the last value wins.
pub fn encode_row(row: &RowData) -> Result<Bytes, ConversionError> {
    let mut object = BTreeMap::new();
    for field in &row.field_values {
        object.insert(field.name.as_str(), to_json(&field.name, &field.value)?);
    }

    let payload = serde_json::to_vec(&object)?;
    Ok(Bytes::from(payload))
}

fn to_json(column: &str, value: &Value) -> Result<JsonValue, ConversionError> {
    let json = match value {
        Value::Null => JsonValue::Null,
        Value::Int(v) => JsonValue::from(*v),
        Value::Uint(v) => JsonValue::from(*v),
        Value::Float(v) => Number::from_f64(*v).map(JsonValue::Number).ok_or_else(|| {
            ConversionError::NonFiniteFloat {
                column: column.to_string(),
                value: *v,
            }
        })?,
        Value::Boolean(v) => JsonValue::Bool(*v),
        Value::String(_) | Value::Bytes(_) => {
            JsonValue::String(value.as_text().unwrap_or_default())
        }
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::FieldValue;

    fn row(fields: Vec<(&str, Value)>) -> RowData {
        RowData::new(
            "users",
            fields
                .into_iter()
                .map(|(name, value)| FieldValue::new(name, value))
                .collect(),
        )
    }

    #[test]
    fn test_record_metadata() {
        let converter = RowConverter::new("mysql", "users");
        let record = converter
            .convert(&row(vec![("id", Value::Int(1))]))
            .expect("convert");

        assert_eq!(record.source(), Some("mysql"));
        assert_eq!(record.table(), Some("users"));
        assert_eq!(record.payload, Bytes::from_static(br#"{"id":1}"#));
    }

    #[test]
    fn test_payload_is_canonical() {
        let forward = row(vec![
            ("name", Value::String("ada".into())),
            ("id", Value::Int(7)),
            ("active", Value::Boolean(true)),
        ]);
        let reversed = row(vec![
            ("active", Value::Boolean(true)),
            ("id", Value::Int(7)),
            ("name", Value::String("ada".into())),
        ]);

        let a = encode_row(&forward).expect("encode");
        let b = encode_row(&reversed).expect("encode");
        assert_eq!(a, b);
        assert_eq!(a, Bytes::from_static(br#"{"active":true,"id":7,"name":"ada"}"#));
    }

    #[test]
    fn test_bytes_are_encoded_as_text() {
        let text = "Grüße, 世界";
        let payload = encode_row(&row(vec![("note", Value::Bytes(text.as_bytes().to_vec()))]))
            .expect("encode");

        let decoded: JsonValue = serde_json::from_slice(&payload).expect("json");
        assert_eq!(decoded["note"], JsonValue::String(text.to_string()));
    }

    #[test]
    fn test_values_keep_their_types() {
        let payload = encode_row(&row(vec![
            ("a", Value::Null),
            ("b", Value::Int(-1)),
            ("c", Value::Uint(u64::MAX)),
            ("d", Value::Float(1.5)),
            ("e", Value::String("12".into())),
        ]))
        .expect("encode");

        assert_eq!(
            payload,
            Bytes::from(format!(
                r#"{{"a":null,"b":-1,"c":{},"d":1.5,"e":"12"}}"#,
                u64::MAX
            ))
        );
    }

    #[test]
    fn test_duplicate_column_keeps_last_value() {
        let payload = encode_row(&row(vec![("id", Value::Int(1)), ("id", Value::Int(2))]))
            .expect("encode");
        assert_eq!(payload, Bytes::from_static(br#"{"id":2}"#));
    }

    #[test]
    fn test_non_finite_float_fails_the_page() {
        let converter = RowConverter::new("mysql", "metrics");
        let rows = vec![
            row(vec![("ratio", Value::Float(0.5))]),
            row(vec![("ratio", Value::Float(f64::NAN))]),
        ];

        let err = converter.convert_all(&rows).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::NonFiniteFloat { ref column, .. } if column == "ratio"
        ));
    }
}
