use crate::error::{ProcessingError, Result};
use crate::models::Table;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// Serializes a table as comma-separated text: header row first, one row per
/// line joined by `\n`, cells laid out by the header list. No newline follows
/// the last row.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, table: &Table, mut writer: W) -> Result<()> {
        let mut buffer = Vec::new();
        {
            let mut csv_writer = WriterBuilder::new()
                .delimiter(b',')
                .quote_style(QuoteStyle::Necessary)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(&mut buffer);

            csv_writer.write_record(&table.headers)?;
            for record in &table.rows {
                csv_writer.write_record(table.ordered_values(record))?;
            }
            csv_writer.flush()?;
        }

        // a cell ending in a newline is always quoted, so this is the terminator
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }

        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_string(&self, table: &Table) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(table, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            ProcessingError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
