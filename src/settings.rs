use crate::error::{ProcessingError, Result};
use crate::readers::CsvReader;
use crate::utils::constants::{DEFAULT_CONFIG_FILE, DEFAULT_PREVIEW_ROWS, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings, layered as defaults, then an optional TOML file, then
/// `LATLON_*` environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(range(min = 1, max = 1000))]
    pub preview_rows: usize,

    /// Input delimiter; sniffed from the first line when unset.
    #[validate(length(equal = 1))]
    pub delimiter: Option<String>,

    pub has_headers: bool,

    /// Input encoding label; UTF-8 with a Shift_JIS fallback when unset.
    #[validate(length(min = 1))]
    pub encoding: Option<String>,

    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; otherwise the default
    /// file in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("preview_rows", DEFAULT_PREVIEW_ROWS as i64)?
            .set_default("has_headers", true)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        tracing::debug!(?settings, "loaded settings");

        Ok(settings)
    }

    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self.delimiter.as_deref() {
            None => Ok(None),
            Some(d) if d.len() == 1 => Ok(d.bytes().next()),
            Some(d) => Err(ProcessingError::InvalidDelimiter(format!(
                "'{}' is not a single ASCII character",
                d
            ))),
        }
    }

    /// A reader configured from these settings.
    pub fn csv_reader(&self) -> Result<CsvReader> {
        let mut reader = CsvReader::new().with_has_headers(self.has_headers);
        if let Some(delimiter) = self.delimiter_byte()? {
            reader = reader.with_delimiter(delimiter);
        }
        if let Some(ref label) = self.encoding {
            reader = reader.with_encoding(label)?;
        }
        Ok(reader)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            delimiter: None,
            has_headers: true,
            encoding: None,
            output_dir: None,
        }
    }
}
