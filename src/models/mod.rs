pub mod layout;
pub mod preview;
pub mod table;

pub use layout::{Layout, LayoutKind, LayoutSelection};
pub use preview::{Preview, PreviewColumn};
pub use table::{cell, ConversionResult, Record, Table, TableSummary};
