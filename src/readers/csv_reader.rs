use crate::error::{ProcessingError, Result};
use crate::models::{Record, Table};
use crate::utils::constants::CANDIDATE_DELIMITERS;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, SHIFT_JIS};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses delimited text into a [`Table`].
///
/// By default the first row holds the headers, the delimiter is sniffed from
/// the first line and the encoding is UTF-8 with a Shift_JIS fallback.
pub struct CsvReader {
    delimiter: Option<u8>,
    has_headers: bool,
    encoding: Option<&'static Encoding>,
}

impl CsvReader {
    pub fn new() -> Self {
        Self {
            delimiter: None,
            has_headers: true,
            encoding: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Force a specific encoding by its WHATWG label (e.g. `shift_jis`, `utf-8`).
    pub fn with_encoding(mut self, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ProcessingError::ParseFailure(format!("unknown encoding '{}'", label))
        })?;
        self.encoding = Some(encoding);
        Ok(self)
    }

    pub fn read_path(&self, path: &Path) -> Result<Table> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let content = self.decode(bytes);
        self.parse_str(&content)
    }

    /// Decode raw file content to text.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        if let Some(encoding) = self.encoding {
            let (text, used, had_errors) = encoding.decode(bytes);
            if had_errors {
                tracing::warn!(encoding = used.name(), "input contained malformed sequences");
            }
            return text;
        }

        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => {
                tracing::debug!("input is not valid UTF-8, decoding as Shift_JIS");
                let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
                if had_errors {
                    tracing::warn!("input contained sequences invalid in Shift_JIS");
                }
                text
            }
        }
    }

    pub fn parse_str(&self, content: &str) -> Result<Table> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(content));
        tracing::debug!(delimiter = ?(delimiter as char), "parsing CSV");

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(describe_csv_error)?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            records.push(record);
        }

        let headers = if self.has_headers {
            if records.is_empty() {
                return Ok(Table::default());
            }
            let header_record = records.remove(0);
            check_distinct(&header_record)?
        } else {
            let width = records.iter().map(StringRecord::len).max().unwrap_or(0);
            (1..=width).map(|i| format!("column{}", i)).collect()
        };

        let rows = records
            .iter()
            .map(|record| to_row(record, &headers))
            .collect::<Result<Vec<_>>>()?;

        Ok(Table::new(headers, rows))
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the candidate delimiter that appears most often in the first
/// non-empty line. Falls back to a comma.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut best = (b',', 0);
    for &candidate in CANDIDATE_DELIMITERS {
        let count = first_line.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }

    best.0
}

fn check_distinct(header_record: &StringRecord) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(header_record.len());

    for name in header_record.iter() {
        if !seen.insert(name) {
            return Err(ProcessingError::ParseFailure(format!(
                "duplicate column name '{}'",
                name
            )));
        }
        headers.push(name.to_string());
    }

    Ok(headers)
}

/// Short rows leave their trailing keys absent; a row wider than the header
/// row is rejected rather than truncated.
fn to_row(record: &StringRecord, headers: &[String]) -> Result<Record> {
    if record.len() > headers.len() {
        let line = record
            .position()
            .map(|p| format!("line {}: ", p.line()))
            .unwrap_or_default();
        return Err(ProcessingError::ParseFailure(format!(
            "{}expected {} fields but found {}",
            line,
            headers.len(),
            record.len()
        )));
    }

    Ok(headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| (header.clone(), value.to_string()))
        .collect())
}

fn describe_csv_error(error: csv::Error) -> ProcessingError {
    match error.position() {
        Some(position) => {
            ProcessingError::ParseFailure(format!("line {}: {}", position.line(), error))
        }
        None => ProcessingError::ParseFailure(error.to_string()),
    }
}
