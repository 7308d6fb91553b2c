use serde::{Deserialize, Serialize};

/// A dynamically typed column value, as decoded from a driver row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Boolean(bool),
    String(String),
    Bytes(Vec<u8>),
    Null,
}

impl Value {
    /// Text view of the value. Byte sequences are decoded as UTF-8, with
    /// invalid sequences replaced by U+FFFD.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(v) => Some(v.clone()),
            Value::Bytes(v) => Some(String::from_utf8_lossy(v).into_owned()),
            _ => None,
        }
    }
}

/// One named column value within a row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        FieldValue {
            name: name.into(),
            value,
        }
    }
}
