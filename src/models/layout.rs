use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shape of the coordinate data, without column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
    OneColumn,
    TwoColumn,
}

impl LayoutKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutKind::OneColumn => "one column (lat,lon)",
            LayoutKind::TwoColumn => "two columns (lat / lon)",
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one" | "1" | "single" | "one-column" => Ok(LayoutKind::OneColumn),
            "two" | "2" | "double" | "two-column" => Ok(LayoutKind::TwoColumn),
            other => Err(format!(
                "unknown layout '{}', expected 'one' or 'two'",
                other
            )),
        }
    }
}

/// A fully resolved coordinate layout with its column names.
///
/// For `TwoColumn`, `lat` and `lon` always name different columns; the
/// session guarantees this before handing a layout to the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    OneColumn { column: String },
    TwoColumn { lat: String, lon: String },
}

impl Layout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Layout::OneColumn { .. } => LayoutKind::OneColumn,
            Layout::TwoColumn { .. } => LayoutKind::TwoColumn,
        }
    }

    /// Columns consumed by this layout, in declaration order.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Layout::OneColumn { column } => vec![column.as_str()],
            Layout::TwoColumn { lat, lon } => vec![lat.as_str(), lon.as_str()],
        }
    }
}

/// The user's source declaration, possibly still incomplete.
///
/// Two-column names left as `None` fall back to the detector's guesses;
/// `Some("")` means the user explicitly cleared the choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutSelection {
    OneColumn {
        column: Option<String>,
    },
    TwoColumn {
        lat: Option<String>,
        lon: Option<String>,
    },
}

impl LayoutSelection {
    pub fn one_column(column: impl Into<String>) -> Self {
        LayoutSelection::OneColumn {
            column: Some(column.into()),
        }
    }

    pub fn two_column(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        LayoutSelection::TwoColumn {
            lat: Some(lat.into()),
            lon: Some(lon.into()),
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            LayoutSelection::OneColumn { .. } => LayoutKind::OneColumn,
            LayoutSelection::TwoColumn { .. } => LayoutKind::TwoColumn,
        }
    }
}

impl Default for LayoutSelection {
    fn default() -> Self {
        LayoutSelection::OneColumn { column: None }
    }
}

impl From<Layout> for LayoutSelection {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::OneColumn { column } => LayoutSelection::OneColumn {
                column: Some(column),
            },
            Layout::TwoColumn { lat, lon } => LayoutSelection::TwoColumn {
                lat: Some(lat),
                lon: Some(lon),
            },
        }
    }
}
