use crate::utils::constants::COORDINATE_SEPARATOR;

/// Split a combined coordinate cell into latitude and longitude.
///
/// Pieces are trimmed; a missing piece becomes an empty string and anything
/// after the second piece is discarded. Values are not checked for being
/// numeric.
///
/// # Examples
/// ```
/// use latlon_columns::utils::split_coordinate;
///
/// assert_eq!(split_coordinate("35.6, 139.7"), ("35.6".to_string(), "139.7".to_string()));
/// assert_eq!(split_coordinate("35.6"), ("35.6".to_string(), String::new()));
/// ```
pub fn split_coordinate(value: &str) -> (String, String) {
    let mut parts = value.split(COORDINATE_SEPARATOR).map(str::trim);
    let lat = parts.next().unwrap_or("").to_string();
    let lon = parts.next().unwrap_or("").to_string();
    (lat, lon)
}

/// Join latitude and longitude into a combined cell, with no space after the
/// separator even when either side is empty.
pub fn join_coordinate(lat: &str, lon: &str) -> String {
    format!("{}{}{}", lat, COORDINATE_SEPARATOR, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(lat: &str, lon: &str) -> (String, String) {
        (lat.to_string(), lon.to_string())
    }

    #[test]
    fn test_split_coordinate() {
        assert_eq!(split_coordinate("35.6,139.7"), pair("35.6", "139.7"));
        assert_eq!(split_coordinate("  35.6 ,\t139.7 "), pair("35.6", "139.7"));
    }

    #[test]
    fn test_split_missing_and_extra_pieces() {
        assert_eq!(split_coordinate("35.6"), pair("35.6", ""));
        assert_eq!(split_coordinate(""), pair("", ""));
        assert_eq!(split_coordinate(",139.7"), pair("", "139.7"));
        assert_eq!(split_coordinate("1,2,3"), pair("1", "2"));
    }

    #[test]
    fn test_split_keeps_non_numeric_text() {
        assert_eq!(split_coordinate("north, east"), pair("north", "east"));
    }

    #[test]
    fn test_join_coordinate() {
        assert_eq!(join_coordinate("10", "20"), "10,20");
        assert_eq!(join_coordinate("", "-122.4"), ",-122.4");
        assert_eq!(join_coordinate("35.6", ""), "35.6,");
        assert_eq!(join_coordinate("", ""), ",");
    }

    #[test]
    fn test_trimming_is_lossy_on_round_trip() {
        let (lat, lon) = split_coordinate("35.6, 139.7");
        assert_eq!(join_coordinate(&lat, &lon), "35.6,139.7");
    }
}
