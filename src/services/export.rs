//! Write labeled datasets back to disk.
//!
//! The output format follows the destination extension, mirroring the import
//! side: `.csv`, `.json`, `.yaml`/`.yml`. JSON and YAML are written as an array
//! of objects keyed by column name in column order.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::models::{Cell, Dataset};
use crate::SentiscopeError;

/// Write `dataset` to `path`, choosing the format from the extension.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), SentiscopeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rendered = match extension.as_str() {
        "csv" => to_csv_string(dataset)?,
        "json" => serde_json::to_string_pretty(&to_records(dataset))?,
        "yaml" | "yml" => serde_yaml_ng::to_string(&to_records(dataset)).map_err(|e| {
            SentiscopeError::Dataset {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?,
        other => {
            return Err(SentiscopeError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Render as CSV with a header row. Every record is fitted to the header:
/// short rows are padded with empty fields and extra fields are dropped.
pub fn to_csv_string(dataset: &Dataset) -> Result<String, SentiscopeError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&dataset.columns)?;

    let width = dataset.columns.len();
    for row in &dataset.rows {
        let mut fields: Vec<String> = row.iter().take(width).map(Cell::to_text).collect();
        fields.resize(width, String::new());
        writer.write_record(&fields)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| SentiscopeError::Config(e.to_string()))
}

/// One JSON object per row.
pub fn to_records(dataset: &Dataset) -> Vec<Value> {
    dataset
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (i, column) in dataset.columns.iter().enumerate() {
                let cell = row.get(i).cloned().unwrap_or(Cell::Empty);
                object.insert(column.clone(), cell_to_value(cell));
            }
            Value::Object(object)
        })
        .collect()
}

fn cell_to_value(cell: Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Bool(b) => Value::Bool(b),
        Cell::Integer(i) => Value::from(i),
        Cell::Float(f) => Value::from(f),
        Cell::Text(s) => Value::String(s),
    }
}
