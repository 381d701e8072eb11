use crate::models::{cell, ConversionResult, Layout, LayoutKind, Record};
use crate::utils::constants::{COORDINATE_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD};
use crate::utils::coordinates::{join_coordinate, split_coordinate};

/// Reshapes rows between the one-column and two-column coordinate layouts.
///
/// The converter does not validate its inputs: the source layout must name
/// existing, distinct columns. Output rows are always fresh copies, so the
/// result can be modified without touching the loaded table.
pub struct FormatConverter;

impl FormatConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(
        &self,
        rows: &[Record],
        headers: &[String],
        source: &Layout,
        target: LayoutKind,
    ) -> ConversionResult {
        match (source, target) {
            (Layout::OneColumn { column }, LayoutKind::TwoColumn) => {
                self.split_column(rows, headers, column)
            }
            (Layout::TwoColumn { lat, lon }, LayoutKind::OneColumn) => {
                self.join_columns(rows, headers, lat, lon)
            }
            _ => {
                tracing::debug!("source and target layouts match, passing rows through");
                ConversionResult::new(headers.to_vec(), rows.to_vec())
            }
        }
    }

    /// One column → two columns.
    fn split_column(&self, rows: &[Record], headers: &[String], column: &str) -> ConversionResult {
        let generated = [LATITUDE_FIELD, LONGITUDE_FIELD];
        let kept = kept_headers(headers, &[column], &generated);

        let mut new_headers = kept.clone();
        new_headers.extend(generated.iter().map(|h| h.to_string()));

        let new_rows = rows
            .iter()
            .map(|row| {
                let mut record = copy_fields(row, &kept);
                let (lat, lon) = split_coordinate(cell(row, column));
                record.insert(LATITUDE_FIELD.to_string(), lat);
                record.insert(LONGITUDE_FIELD.to_string(), lon);
                record
            })
            .collect();

        ConversionResult::new(new_headers, new_rows)
    }

    /// Two columns → one column.
    fn join_columns(
        &self,
        rows: &[Record],
        headers: &[String],
        lat: &str,
        lon: &str,
    ) -> ConversionResult {
        let kept = kept_headers(headers, &[lat, lon], &[COORDINATE_FIELD]);

        let mut new_headers = kept.clone();
        new_headers.push(COORDINATE_FIELD.to_string());

        let new_rows = rows
            .iter()
            .map(|row| {
                let mut record = copy_fields(row, &kept);
                record.insert(
                    COORDINATE_FIELD.to_string(),
                    join_coordinate(cell(row, lat), cell(row, lon)),
                );
                record
            })
            .collect();

        ConversionResult::new(new_headers, new_rows)
    }
}

impl Default for FormatConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers surviving a conversion. A pre-existing column that shares a
/// generated name is dropped so output headers stay distinct.
fn kept_headers(headers: &[String], consumed: &[&str], generated: &[&str]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !consumed.contains(&h.as_str()))
        .filter(|h| {
            let clash = generated.contains(&h.as_str());
            if clash {
                tracing::warn!(column = %h, "existing column replaced by generated coordinate column");
            }
            !clash
        })
        .cloned()
        .collect()
}

fn copy_fields(row: &Record, columns: &[String]) -> Record {
    columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
        .collect()
}
