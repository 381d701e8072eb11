/// Output column names
pub const LATITUDE_FIELD: &str = "緯度";
pub const LONGITUDE_FIELD: &str = "経度";
pub const COORDINATE_FIELD: &str = "座標";

/// Header names recognised by the detector (compared case-insensitively)
pub const LATITUDE_PATTERNS: &[&str] = &["lat", "latitude", "緯度", "ラット"];
pub const LONGITUDE_PATTERNS: &[&str] = &["lon", "longitude", "経度", "ロン"];

/// Separator inside a combined coordinate cell
pub const COORDINATE_SEPARATOR: char = ',';

/// Delimiters considered during auto-detection, in tie-break order
pub const CANDIDATE_DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

/// Export file naming
pub const CSV_EXTENSION: &str = ".csv";
pub const TWO_COLUMN_SUFFIX: &str = "_2col";
pub const ONE_COLUMN_SUFFIX: &str = "_1col";

/// Processing defaults
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_CONFIG_FILE: &str = "latlon-columns.toml";
pub const ENV_PREFIX: &str = "LATLON";

/// Fields that renderers should highlight
pub fn is_coordinate_field(name: &str) -> bool {
    name == LATITUDE_FIELD || name == LONGITUDE_FIELD || name == COORDINATE_FIELD
}
