use crate::utils::constants::{LATITUDE_PATTERNS, LONGITUDE_PATTERNS};
use serde::Serialize;

/// Best-guess latitude/longitude column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectedColumns {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

pub struct ColumnDetector {
    lat_patterns: Vec<String>,
    lon_patterns: Vec<String>,
}

impl ColumnDetector {
    pub fn new() -> Self {
        Self {
            lat_patterns: LATITUDE_PATTERNS.iter().map(|p| p.to_lowercase()).collect(),
            lon_patterns: LONGITUDE_PATTERNS.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Scan headers in order; each role keeps the last header whose whole
    /// name matches one of its patterns, ignoring case.
    pub fn detect<S: AsRef<str>>(&self, headers: &[S]) -> DetectedColumns {
        let mut detected = DetectedColumns::default();

        for header in headers {
            let header = header.as_ref();
            let lowered = header.to_lowercase();

            if self.lat_patterns.contains(&lowered) {
                detected.lat = Some(header.to_string());
            }
            if self.lon_patterns.contains(&lowered) {
                detected.lon = Some(header.to_string());
            }
        }

        tracing::debug!(lat = ?detected.lat, lon = ?detected.lon, "detected coordinate columns");
        detected
    }
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new()
    }
}
