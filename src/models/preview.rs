use crate::models::{cell, Table};
use crate::utils::constants::is_coordinate_field;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewColumn {
    pub name: String,
    pub highlighted: bool,
}

/// The first rows of a table laid out by its header list, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub columns: Vec<PreviewColumn>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl Preview {
    pub fn from_table(table: &Table, max_rows: usize) -> Self {
        let columns = table
            .headers
            .iter()
            .map(|name| PreviewColumn {
                name: name.clone(),
                highlighted: is_coordinate_field(name),
            })
            .collect();

        let rows = table
            .rows
            .iter()
            .take(max_rows)
            .map(|record| {
                table
                    .headers
                    .iter()
                    .map(|h| cell(record, h).to_string())
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows,
            total_rows: table.row_count(),
        }
    }

    /// Plain-text rendering; highlighted columns are wrapped in brackets.
    pub fn summary(&self) -> String {
        let header = self
            .columns
            .iter()
            .map(|c| {
                if c.highlighted {
                    format!("[{}]", c.name)
                } else {
                    c.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");

        let mut lines = vec![header];
        lines.extend(self.rows.iter().map(|row| row.join(" | ")));

        if self.total_rows > self.rows.len() {
            lines.push(format!(
                "... ({} of {} rows shown)",
                self.rows.len(),
                self.total_rows
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn table() -> Table {
        let rows = (1..=3)
            .map(|i| {
                let mut r = Record::new();
                r.insert("id".to_string(), i.to_string());
                r.insert("緯度".to_string(), format!("{}.5", i));
                r
            })
            .collect();
        Table::new(
            vec!["id".to_string(), "緯度".to_string(), "経度".to_string()],
            rows,
        )
    }

    #[test]
    fn test_preview_flags_coordinate_columns() {
        let preview = Preview::from_table(&table(), 5);
        let flags: Vec<bool> = preview.columns.iter().map(|c| c.highlighted).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_preview_limits_rows_and_fills_gaps() {
        let preview = Preview::from_table(&table(), 2);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.rows[0], vec!["1", "1.5", ""]);
    }

    #[test]
    fn test_summary_rendering() {
        let preview = Preview::from_table(&table(), 1);
        assert_eq!(
            preview.summary(),
            "id | [緯度] | [経度]\n1 | 1.5 | \n... (1 of 3 rows shown)"
        );
    }
}
