//! Tabular feedback input.
//!
//! A [`Dataset`] is an ordered list of rows with named columns. Only the first
//! column is treated as feedback text; its name does not matter.

use serde::{Deserialize, Serialize};

/// Name of the column appended by batch labeling.
pub const SENTIMENT_COLUMN: &str = "Sentiment";

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Infer a cell from raw text the way spreadsheet readers do:
    /// blank → Empty, then integer, float, boolean, and finally text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Cell::Float(f);
            }
        }
        match trimmed {
            "true" | "TRUE" | "True" => Cell::Bool(true),
            "false" | "FALSE" | "False" => Cell::Bool(false),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Textual representation fed to the classifier. Never fails.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Integer(i) => i.to_string(),
            Cell::Float(f) => format!("{:?}", f),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// Ordered rows of cells under a header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Single-column dataset from plain strings.
    pub fn from_texts<I, S>(column: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: vec![column.to_string()],
            rows: texts
                .into_iter()
                .map(|t| vec![Cell::Text(t.into())])
                .collect(),
        }
    }

    /// Name unnamed trailing cells: when a row is wider than the header, add
    /// `column_N` headers (1-based position) until every cell has a column.
    pub fn with_generated_columns(mut self) -> Self {
        let widest = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        for position in self.columns.len()..widest {
            self.columns.push(format!("column_{}", position + 1));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the text-bearing column, if the header has one.
    pub fn text_column(&self) -> Option<&str> {
        self.columns.first().map(|c| c.as_str())
    }

    /// First-column value of every row, stringified. Short rows yield "".
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .map(|row| row.first().map(Cell::to_text).unwrap_or_default())
    }

    /// Return a copy with `name` appended as the last column.
    ///
    /// `values` must have one entry per row. Each row is first fitted to the
    /// header width (short rows padded with [`Cell::Empty`], cells past the
    /// last named column dropped) so the new value lands in its column.
    pub fn with_column(&self, name: &str, values: Vec<Cell>) -> Self {
        let width = self.columns.len();
        let mut columns = self.columns.clone();
        columns.push(name.to_string());

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.resize(width, Cell::Empty);
                row.push(value);
                row
            })
            .collect();

        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_cell_types() {
        assert_eq!(Cell::infer(""), Cell::Empty);
        assert_eq!(Cell::infer("   "), Cell::Empty);
        assert_eq!(Cell::infer("42"), Cell::Integer(42));
        assert_eq!(Cell::infer("4.5"), Cell::Float(4.5));
        assert_eq!(Cell::infer("TRUE"), Cell::Bool(true));
        assert_eq!(Cell::infer("great"), Cell::Text("great".to_string()));
    }

    #[test]
    fn test_infer_keeps_nan_as_text() {
        assert_eq!(Cell::infer("nan"), Cell::Text("nan".to_string()));
    }

    #[test]
    fn test_to_text_stringifies_every_variant() {
        assert_eq!(Cell::Integer(7).to_text(), "7");
        assert_eq!(Cell::Float(3.0).to_text(), "3.0");
        assert_eq!(Cell::Bool(false).to_text(), "false");
        assert_eq!(Cell::Empty.to_text(), "");
        assert_eq!(Cell::from("ok").to_text(), "ok");
    }

    #[test]
    fn test_texts_reads_first_column_only() {
        let ds = Dataset::new(
            vec!["comment".into(), "rating".into()],
            vec![
                vec![Cell::from("good"), Cell::Integer(5)],
                vec![Cell::Integer(3), Cell::from("ignored")],
                vec![],
            ],
        );
        let texts: Vec<String> = ds.texts().collect();
        assert_eq!(texts, vec!["good", "3", ""]);
    }

    #[test]
    fn test_with_column_appends_and_preserves_original() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::from("x")], vec![Cell::from("y"), Cell::Integer(1)]],
        );
        let labeled = ds.with_column(
            SENTIMENT_COLUMN,
            vec![Cell::from("Positive"), Cell::from("Neutral")],
        );

        assert_eq!(labeled.columns, vec!["a", "b", "Sentiment"]);
        assert_eq!(
            labeled.rows[0],
            vec![Cell::from("x"), Cell::Empty, Cell::from("Positive")]
        );
        assert_eq!(labeled.rows[1][2], Cell::from("Neutral"));
        assert_eq!(ds.columns.len(), 2, "source dataset must not change");
    }

    #[test]
    fn test_generated_columns_cover_wide_rows() {
        let ds = Dataset::new(
            vec!["a".into()],
            vec![vec![Cell::from("x")], vec![Cell::from("y"), Cell::Empty, Cell::Integer(3)]],
        )
        .with_generated_columns();
        assert_eq!(ds.columns, vec!["a", "column_2", "column_3"]);
    }

    #[test]
    fn test_with_column_drops_cells_past_header() {
        let ds = Dataset::new(
            vec!["comment".into()],
            vec![vec![Cell::from("terrible"), Cell::Integer(1), Cell::from("extra")]],
        );
        let labeled = ds.with_column(SENTIMENT_COLUMN, vec![Cell::from("Negative")]);
        assert_eq!(
            labeled.rows[0],
            vec![Cell::from("terrible"), Cell::from("Negative")]
        );
    }
}
