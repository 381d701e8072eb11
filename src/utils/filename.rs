use crate::models::LayoutKind;
use crate::utils::constants::{CSV_EXTENSION, ONE_COLUMN_SUFFIX, TWO_COLUMN_SUFFIX};

/// Generate the export file name: `{stem}_2col.csv` for one-to-two
/// conversions, `{stem}_1col.csv` otherwise. A trailing `.csv` is stripped
/// case-insensitively before the suffix is appended.
pub fn suggested_file_name(original: &str, source: LayoutKind, target: LayoutKind) -> String {
    let stem = strip_csv_extension(original);
    let suffix = if source == LayoutKind::OneColumn && target == LayoutKind::TwoColumn {
        TWO_COLUMN_SUFFIX
    } else {
        ONE_COLUMN_SUFFIX
    };

    format!("{}{}{}", stem, suffix, CSV_EXTENSION)
}

fn strip_csv_extension(name: &str) -> &str {
    let split_at = name.len().saturating_sub(CSV_EXTENSION.len());
    match (name.get(..split_at), name.get(split_at..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(CSV_EXTENSION) => stem,
        _ => name,
    }
}
