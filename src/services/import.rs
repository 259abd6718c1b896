//! Read tabular feedback files into a [`Dataset`].
//!
//! Supported formats, chosen by extension:
//! - `.csv`: header row, then one row per record
//! - `.json`: array of objects (key order is column order) or array of arrays
//!   (first array is the header)
//! - `.yaml` / `.yml`: same shapes as JSON
//! - `.xlsx` / `.xlsm` / `.xls` / `.ods`: first worksheet, first row is the
//!   header
//! - `.txt`: one feedback item per line, column `feedback`; blank lines stay as
//!   empty rows

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde_json::Value;
use tracing::info;

use crate::models::{Cell, Dataset};
use crate::SentiscopeError;

/// Column name used for plain-text input.
pub const TEXT_COLUMN: &str = "feedback";

const TEXT_EXTENSIONS: [&str; 5] = ["csv", "json", "yaml", "yml", "txt"];
const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Load a dataset from a file, dispatching on its extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, SentiscopeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let dataset_error = |message: String| SentiscopeError::Dataset {
        path: path.display().to_string(),
        message,
    };

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        std::fs::metadata(path)?;
        let dataset = read_spreadsheet(path).map_err(dataset_error)?;
        log_loaded(&dataset, path);
        return Ok(dataset);
    }

    if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(SentiscopeError::UnsupportedFormat { extension });
    }

    let contents = std::fs::read_to_string(path)?;
    let dataset = match extension.as_str() {
        "csv" => parse_csv(&contents).map_err(dataset_error)?,
        "json" => {
            let value: Value =
                serde_json::from_str(&contents).map_err(|e| dataset_error(e.to_string()))?;
            dataset_from_value(&value).map_err(dataset_error)?
        }
        "yaml" | "yml" => {
            let value: Value =
                serde_yaml_ng::from_str(&contents).map_err(|e| dataset_error(e.to_string()))?;
            dataset_from_value(&value).map_err(dataset_error)?
        }
        _ => parse_lines(&contents),
    };

    log_loaded(&dataset, path);
    Ok(dataset)
}

fn log_loaded(dataset: &Dataset, path: &Path) {
    info!(
        "Loaded {} rows from {} (text column: {})",
        dataset.len(),
        path.display(),
        dataset.text_column().unwrap_or("<none>")
    );
}

/// Read the first worksheet of a workbook.
fn read_spreadsheet(path: &Path) -> Result<Dataset, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Workbook has no worksheets".to_string())?
        .map_err(|e| e.to_string())?;
    Ok(dataset_from_range(&range))
}

/// First row is the header; every later row becomes a record.
pub fn dataset_from_range(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header.iter().map(|h| data_to_cell(h).to_text()).collect(),
        None => return Dataset::default(),
    };
    let rows = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();
    Dataset::new(columns, rows).with_generated_columns()
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Integer(*i),
        // xlsx stores every number as a float
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Cell::Integer(*f as i64)
        }
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Parse CSV text with a header row. Ragged rows are accepted; cells past the
/// header get generated column names.
pub fn parse_csv(contents: &str) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| format!("Invalid CSV header: {}", e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("Invalid CSV record {}: {}", line + 1, e))?;
        rows.push(record.iter().map(Cell::infer).collect());
    }

    Ok(Dataset::new(columns, rows).with_generated_columns())
}

/// One row per line. Blank lines become empty rows that still get a label.
pub fn parse_lines(contents: &str) -> Dataset {
    Dataset::new(
        vec![TEXT_COLUMN.to_string()],
        contents
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    vec![Cell::Empty]
                } else {
                    vec![Cell::Text(line.to_string())]
                }
            })
            .collect(),
    )
}

/// Build a dataset from an array of objects or an array of arrays.
pub fn dataset_from_value(value: &Value) -> Result<Dataset, String> {
    let items = value
        .as_array()
        .ok_or_else(|| "Expected a top-level array of rows".to_string())?;

    match items.first() {
        None => Ok(Dataset::default()),
        Some(Value::Object(_)) => rows_from_objects(items),
        Some(Value::Array(header)) => {
            let columns = header.iter().map(value_to_header).collect();
            let rows = items[1..]
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    row.as_array()
                        .map(|cells| cells.iter().map(value_to_cell).collect())
                        .ok_or_else(|| format!("Row {} is not an array", i + 1))
                })
                .collect::<Result<Vec<Vec<Cell>>, String>>()?;
            Ok(Dataset::new(columns, rows).with_generated_columns())
        }
        Some(_) => Ok(Dataset::new(
            vec![TEXT_COLUMN.to_string()],
            items.iter().map(|v| vec![value_to_cell(v)]).collect(),
        )),
    }
}

/// Objects may disagree on keys; columns are the union in first-seen order.
fn rows_from_objects(items: &[Value]) -> Result<Dataset, String> {
    let mut columns: Vec<String> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or_else(|| format!("Row {} is not an object", i))?;
        for key in object.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|object| {
            columns
                .iter()
                .map(|c| object.get(c).map(value_to_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn value_to_header(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Integer(i),
            None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Empty),
        },
        Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}
