use crate::error::{ProcessingError, Result};
use crate::models::{
    ConversionResult, Layout, LayoutKind, LayoutSelection, Preview, Table, TableSummary,
};
use crate::processors::column_detector::{ColumnDetector, DetectedColumns};
use crate::processors::format_converter::FormatConverter;
use crate::utils::filename::suggested_file_name;
use crate::writers::CsvWriter;

/// Serialized conversion output plus the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug)]
struct LoadedTable {
    file_name: String,
    table: Table,
    detected: DetectedColumns,
}

/// Holds one loaded table, the user's layout declarations and the latest
/// conversion result.
///
/// Every failing operation leaves the session exactly as it was.
#[derive(Debug)]
pub struct ConversionSession {
    loaded: Option<LoadedTable>,
    source: LayoutSelection,
    target: LayoutKind,
    result: Option<ConversionResult>,
    /// Layout pair that produced `result`, used for the export name.
    converted_as: Option<(LayoutKind, LayoutKind)>,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self {
            loaded: None,
            source: LayoutSelection::default(),
            target: LayoutKind::TwoColumn,
            result: None,
            converted_as: None,
        }
    }

    /// Replace the current table. Selections and any previous result are
    /// discarded; latitude/longitude guesses are taken from the new headers.
    pub fn load(&mut self, file_name: impl Into<String>, table: Table) -> Result<&DetectedColumns> {
        if table.is_empty() {
            return Err(ProcessingError::EmptySource);
        }

        let file_name = file_name.into();
        let detected = ColumnDetector::new().detect(table.headers.as_slice());
        tracing::info!(
            file = %file_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );

        self.source = LayoutSelection::default();
        self.target = LayoutKind::TwoColumn;
        self.result = None;
        self.converted_as = None;

        let loaded = self.loaded.insert(LoadedTable {
            file_name,
            table,
            detected,
        });
        Ok(&loaded.detected)
    }

    pub fn set_source_layout(&mut self, selection: impl Into<LayoutSelection>) {
        self.source = selection.into();
    }

    pub fn set_target_layout(&mut self, target: LayoutKind) {
        self.target = target;
    }

    pub fn source_layout(&self) -> &LayoutSelection {
        &self.source
    }

    pub fn target_layout(&self) -> LayoutKind {
        self.target
    }

    pub fn table(&self) -> Option<&Table> {
        self.loaded.as_ref().map(|l| &l.table)
    }

    pub fn detected_columns(&self) -> Option<&DetectedColumns> {
        self.loaded.as_ref().map(|l| &l.detected)
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn summary(&self) -> Option<TableSummary> {
        self.loaded.as_ref().map(|l| TableSummary {
            file_name: l.file_name.clone(),
            row_count: l.table.row_count(),
            column_count: l.table.column_count(),
            headers: l.table.headers.clone(),
        })
    }

    pub fn source_preview(&self, max_rows: usize) -> Option<Preview> {
        self.table().map(|t| Preview::from_table(t, max_rows))
    }

    pub fn result_preview(&self, max_rows: usize) -> Option<Preview> {
        self.result.as_ref().map(|t| Preview::from_table(t, max_rows))
    }

    /// Validate the selections, convert the loaded table and keep the result.
    pub fn convert(&mut self) -> Result<&ConversionResult> {
        let loaded = self.loaded.as_ref().ok_or(ProcessingError::NoTableLoaded)?;
        let source = resolve_selection(&self.source, loaded)?;

        tracing::info!(
            source = %source.kind(),
            target = %self.target,
            rows = loaded.table.row_count(),
            "converting"
        );

        let converted = FormatConverter::new().convert(
            &loaded.table.rows,
            &loaded.table.headers,
            &source,
            self.target,
        );

        self.converted_as = Some((source.kind(), self.target));
        Ok(&*self.result.insert(converted))
    }

    /// Serialize the latest result and suggest a file name for it.
    pub fn export_result(&self) -> Result<ExportedFile> {
        let (result, (source, target)) = match (&self.result, self.converted_as) {
            (Some(result), Some(kinds)) => (result, kinds),
            _ => return Err(ProcessingError::NoResultToExport),
        };
        let original = self
            .loaded
            .as_ref()
            .map(|l| l.file_name.as_str())
            .unwrap_or_default();

        let content = CsvWriter::new().write_to_string(result)?;
        let file_name = suggested_file_name(original, source, target);
        tracing::info!(file = %file_name, rows = result.row_count(), "exported result");

        Ok(ExportedFile { file_name, content })
    }
}

impl Default for ConversionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a possibly incomplete selection into a usable layout.
fn resolve_selection(selection: &LayoutSelection, loaded: &LoadedTable) -> Result<Layout> {
    let layout = match selection {
        LayoutSelection::OneColumn { column } => Layout::OneColumn {
            column: chosen(column.as_ref(), None).ok_or_else(|| {
                ProcessingError::MissingSelection("select the coordinate column".to_string())
            })?,
        },
        LayoutSelection::TwoColumn { lat, lon } => {
            let lat = chosen(lat.as_ref(), loaded.detected.lat.as_ref());
            let lon = chosen(lon.as_ref(), loaded.detected.lon.as_ref());
            match (lat, lon) {
                (Some(lat), Some(lon)) if lat == lon => {
                    return Err(ProcessingError::DuplicateSelection { column: lat });
                }
                (Some(lat), Some(lon)) => Layout::TwoColumn { lat, lon },
                _ => {
                    return Err(ProcessingError::MissingSelection(
                        "select both the latitude and longitude columns".to_string(),
                    ));
                }
            }
        }
    };

    if let Some(column) = layout.columns().into_iter().find(|c| !loaded.table.has_column(c)) {
        return Err(ProcessingError::UnknownColumn {
            column: column.to_string(),
        });
    }

    Ok(layout)
}

/// An explicit choice wins over the fallback; an empty name means "not chosen".
fn chosen(explicit: Option<&String>, fallback: Option<&String>) -> Option<String> {
    explicit
        .or(fallback)
        .filter(|name| !name.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{cell, Record};
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|pairs| {
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<Record>()
                })
                .collect(),
        )
    }

    fn latlon_table() -> Table {
        table(
            &["id", "lat", "lon"],
            &[&[("id", "1"), ("lat", "10"), ("lon", "20")]],
        )
    }

    #[test]
    fn test_load_detects_two_column_defaults() {
        let mut session = ConversionSession::new();
        let detected = session.load("points.csv", latlon_table()).unwrap().clone();

        assert_eq!(detected.lat.as_deref(), Some("lat"));
        assert_eq!(detected.lon.as_deref(), Some("lon"));
        assert_eq!(session.source_layout(), &LayoutSelection::default());
        assert_eq!(session.target_layout(), LayoutKind::TwoColumn);
    }

    #[test]
    fn test_load_rejects_empty_table_and_keeps_state() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::two_column("lat", "lon"));
        session.set_target_layout(LayoutKind::OneColumn);
        let converted = session.convert().unwrap().clone();

        let err = session
            .load("empty.csv", table(&["id"], &[]))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::EmptySource));
        assert_eq!(session.summary().unwrap().file_name, "points.csv");
        assert_eq!(session.result(), Some(&converted));
        assert_eq!(
            session.source_layout(),
            &LayoutSelection::two_column("lat", "lon")
        );
        assert_eq!(session.target_layout(), LayoutKind::OneColumn);
        assert_eq!(session.export_result().unwrap().file_name, "points_1col.csv");
    }

    #[test]
    fn test_convert_with_detected_columns() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::TwoColumn { lat: None, lon: None });
        session.set_target_layout(LayoutKind::OneColumn);

        let result = session.convert().unwrap();
        assert_eq!(result.headers, vec!["id".to_string(), "座標".to_string()]);
        assert_eq!(cell(&result.rows[0], "座標"), "10,20");
    }

    #[test]
    fn test_convert_requires_selection() {
        let mut session = ConversionSession::new();
        session
            .load("c.csv", table(&["id", "coord"], &[&[("coord", "1,2")]]))
            .unwrap();

        assert!(matches!(
            session.convert(),
            Err(ProcessingError::MissingSelection(_))
        ));

        session.set_source_layout(LayoutSelection::TwoColumn { lat: None, lon: None });
        assert!(matches!(
            session.convert(),
            Err(ProcessingError::MissingSelection(_))
        ));

        session.set_source_layout(LayoutSelection::one_column(""));
        assert!(matches!(
            session.convert(),
            Err(ProcessingError::MissingSelection(_))
        ));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_duplicate_selection_fails_before_conversion() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::two_column("lat", "lat"));
        session.set_target_layout(LayoutKind::OneColumn);

        match session.convert() {
            Err(ProcessingError::DuplicateSelection { column }) => assert_eq!(column, "lat"),
            other => panic!("expected duplicate selection, got {:?}", other),
        }
        assert!(session.result().is_none());
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::one_column("coords"));

        assert!(matches!(
            session.convert(),
            Err(ProcessingError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_failed_convert_keeps_previous_result() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::two_column("lat", "lon"));
        session.set_target_layout(LayoutKind::OneColumn);
        session.convert().unwrap();

        session.set_source_layout(LayoutSelection::two_column("lon", "lon"));
        assert!(session.convert().is_err());
        assert_eq!(
            session.result().unwrap().headers,
            vec!["id".to_string(), "座標".to_string()]
        );
    }

    #[test]
    fn test_convert_without_table() {
        let mut session = ConversionSession::new();
        assert!(matches!(
            session.convert(),
            Err(ProcessingError::NoTableLoaded)
        ));
    }

    #[test]
    fn test_export_requires_result() {
        let mut session = ConversionSession::new();
        assert!(matches!(
            session.export_result(),
            Err(ProcessingError::NoResultToExport)
        ));

        session.load("points.csv", latlon_table()).unwrap();
        assert!(matches!(
            session.export_result(),
            Err(ProcessingError::NoResultToExport)
        ));
    }

    #[test]
    fn test_export_one_to_two() {
        let mut session = ConversionSession::new();
        session
            .load(
                "Points.CSV",
                table(&["id", "coord"], &[&[("id", "1"), ("coord", "10, 20")]]),
            )
            .unwrap();
        session.set_source_layout(LayoutSelection::one_column("coord"));
        session.convert().unwrap();

        let exported = session.export_result().unwrap();
        assert_eq!(exported.file_name, "Points_2col.csv");
        assert_eq!(exported.content, "id,緯度,経度\n1,10,20");
    }

    #[test]
    fn test_reload_discards_result() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::two_column("lat", "lon"));
        session.set_target_layout(LayoutKind::OneColumn);
        session.convert().unwrap();

        session.load("other.csv", latlon_table()).unwrap();
        assert!(session.result().is_none());
        assert_eq!(session.source_layout(), &LayoutSelection::default());
        assert!(session.export_result().is_err());
    }

    #[test]
    fn test_result_is_independent_of_loaded_table() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        session.set_source_layout(LayoutSelection::two_column("lat", "lon"));
        session.set_target_layout(LayoutKind::TwoColumn);

        let result = session.convert().unwrap().clone();
        assert_eq!(&result, session.table().unwrap());

        let exported = session.export_result().unwrap();
        assert_eq!(exported.file_name, "points_1col.csv");
    }

    #[test]
    fn test_previews_flag_generated_columns() {
        let mut session = ConversionSession::new();
        session.load("points.csv", latlon_table()).unwrap();
        assert!(session.result_preview(5).is_none());

        let source = session.source_preview(5).unwrap();
        assert!(source.columns.iter().all(|c| !c.highlighted));

        session.set_source_layout(LayoutSelection::two_column("lat", "lon"));
        session.set_target_layout(LayoutKind::OneColumn);
        session.convert().unwrap();

        let preview = session.result_preview(5).unwrap();
        assert_eq!(preview.rows, vec![vec!["1".to_string(), "10,20".to_string()]]);
        assert!(preview.columns[1].highlighted);
    }
}
