//! Upload parsing boundary: CSV and JSON files into record collections.
//!
//! Parsing is the only fallible stage of the pipeline. Failures (unsupported
//! extension, malformed content, empty result) surface as one descriptive
//! error; there is no partial success, the caller re-selects a file.

use super::types::Record;
use anyhow::{Context as _, Result};
use serde_json::Value;
use std::path::Path;

/// Load a record collection from an uploaded file, dispatching on extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext != "csv" && ext != "json" {
        anyhow::bail!("Unsupported file extension: {ext}");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if ext == "csv" {
        parse_csv_records(&content)
            .with_context(|| format!("Failed to parse CSV {}", path.display()))
    } else {
        parse_json_records(&content)
            .with_context(|| format!("Failed to parse JSON {}", path.display()))
    }
}

/// Parse CSV text with a required header row. Cells are auto-typed: empty
/// becomes null, `true`/`false` (any case) become booleans, numeric text
/// becomes a number, everything else stays a string.
pub fn parse_csv_records(content: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Failed to read CSV row")?;
        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = row.get(i).unwrap_or("");
            record.insert(header.clone(), type_cell(cell));
        }
        records.push(record);
    }

    if records.is_empty() {
        anyhow::bail!("File contained a header but no data rows");
    }
    Ok(records)
}

/// Parse a JSON array of flat objects.
pub fn parse_json_records(content: &str) -> Result<Vec<Record>> {
    let parsed: Value = serde_json::from_str(content).context("Malformed JSON")?;

    let Value::Array(rows) = parsed else {
        anyhow::bail!("Expected a JSON array of objects");
    };
    if rows.is_empty() {
        anyhow::bail!("JSON array is empty");
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(record) => Ok(record),
            other => Err(anyhow::anyhow!(
                "Row {i} is not an object (found {other})"
            )),
        })
        .collect()
}

/// Auto-type one CSV cell.
fn type_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = cell.parse::<f64>() {
        // from_f64 rejects NaN/infinity, which parse::<f64> accepts ("NaN").
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_owned())
}
