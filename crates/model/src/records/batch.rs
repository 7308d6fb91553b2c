use crate::records::record::{META_TABLE, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The output of one poll. An empty batch is the "caught up, nothing new"
/// signal and carries no context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub records: Vec<Record>,
    pub context: BTreeMap<String, String>,
}

impl Batch {
    pub fn new(records: Vec<Record>) -> Self {
        Batch {
            records,
            context: BTreeMap::new(),
        }
    }

    pub fn empty() -> Self {
        Batch::default()
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn table(&self) -> Option<&str> {
        self.context.get(META_TABLE).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.records.iter().map(|r| r.size_bytes()).sum()
    }
}
