pub mod column_detector;
pub mod format_converter;
pub mod session;

pub use column_detector::{ColumnDetector, DetectedColumns};
pub use format_converter::FormatConverter;
pub use session::{ConversionSession, ExportedFile};
