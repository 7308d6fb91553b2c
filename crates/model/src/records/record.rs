use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const META_SOURCE: &str = "source";
pub const META_TABLE: &str = "table";

/// One converted row: provenance tags plus the encoded row payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub metadata: BTreeMap<String, String>,
    pub payload: Bytes,
}

impl Record {
    pub fn new(source: &str, table: &str, payload: Bytes) -> Self {
        let metadata = BTreeMap::from([
            (META_SOURCE.to_string(), source.to_string()),
            (META_TABLE.to_string(), table.to_string()),
        ]);
        Record { metadata, payload }
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).map(String::as_str)
    }

    pub fn table(&self) -> Option<&str> {
        self.metadata.get(META_TABLE).map(String::as_str)
    }

    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }
}
