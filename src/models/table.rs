use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a table, keyed by column name.
pub type Record = HashMap<String, String>;

/// Read a cell, treating an absent key as an empty string.
pub fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

/// Parsed tabular data: an ordered list of distinct headers and the rows
/// keyed by those headers. A row may omit any header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

/// The table produced by one conversion.
pub type ConversionResult = Table;

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Cells of one row in header order.
    pub fn ordered_values<'a>(&'a self, record: &'a Record) -> Vec<&'a str> {
        self.headers.iter().map(|h| cell(record, h)).collect()
    }
}

/// File information shown after a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub headers: Vec<String>,
}

impl TableSummary {
    pub fn summary(&self) -> String {
        format!(
            "File: {}\nRows: {}\nColumns: {}\nColumn names: {}",
            self.file_name,
            self.row_count,
            self.column_count,
            self.headers.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_absent_cell_reads_as_empty() {
        let row = record(&[("id", "1")]);
        assert_eq!(cell(&row, "id"), "1");
        assert_eq!(cell(&row, "coord"), "");
    }

    #[test]
    fn test_ordered_values_follow_headers() {
        let table = Table::new(
            vec!["b".to_string(), "a".to_string(), "c".to_string()],
            vec![record(&[("a", "1"), ("b", "2")])],
        );
        assert_eq!(table.ordered_values(&table.rows[0]), vec!["2", "1", ""]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Table::default().is_empty());
        assert!(Table::new(vec!["id".to_string()], vec![]).is_empty());
        assert!(!Table::new(vec!["id".to_string()], vec![record(&[("id", "1")])]).is_empty());
    }
}
