use crate::error::CliError;
use model::records::batch::Batch;
use serde::Serialize;
use serde_json::Value;
use std::{collections::BTreeMap, io::Write};

#[derive(Serialize)]
struct BatchLine<'a> {
    context: &'a BTreeMap<String, String>,
    records: Vec<RecordLine<'a>>,
}

#[derive(Serialize)]
struct RecordLine<'a> {
    metadata: &'a BTreeMap<String, String>,
    payload: Value,
}

/// Writes `batch` as a single JSON line. Payloads that are JSON documents are
/// embedded as such; anything else is written as a string.
pub fn write_batch(out: &mut impl Write, batch: &Batch) -> Result<(), CliError> {
    let records = batch
        .records
        .iter()
        .map(|record| RecordLine {
            metadata: &record.metadata,
            payload: serde_json::from_slice(&record.payload).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&record.payload).into_owned())
            }),
        })
        .collect();

    let line = BatchLine {
        context: &batch.context,
        records,
    };

    serde_json::to_writer(&mut *out, &line)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
