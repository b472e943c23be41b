//! Parser for restaurant data files.
//!
//! Format, one record per line:
//! `style::name::vegetarian::openHour::closeHour`
//!
//! Blank lines and lines starting with `#` are skipped. Lines are parsed in
//! parallel with Rayon; the output keeps file order.

use crate::error::{DataLoadError, Result};
use crate::types::RestaurantRecord;
use chrono::NaiveTime;
use rayon::prelude::*;
use std::path::Path;

const FIELD_COUNT: usize = 5;

/// Parse a restaurants file from disk
pub fn parse_restaurants(path: &Path) -> Result<Vec<RestaurantRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_restaurants_str(&content, &file)
}

/// Parse restaurant records from already-loaded text.
///
/// `file` is only used for error messages.
pub fn parse_restaurants_str(content: &str, file: &str) -> Result<Vec<RestaurantRecord>> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    // collect() into Result keeps the original order and stops at an error
    lines
        .par_iter()
        .map(|&(line_no, line)| parse_line(line, line_no, file))
        .collect()
}

fn parse_line(line: &str, line_no: usize, file: &str) -> Result<RestaurantRecord> {
    let parts: Vec<&str> = line.split("::").map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(DataLoadError::FieldCountMismatch {
            expected: FIELD_COUNT,
            found: parts.len(),
            line: line_no,
        });
    }

    let style = parts[0];
    let name = parts[1];
    if style.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing style".to_string(),
        });
    }
    if name.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing name".to_string(),
        });
    }

    Ok(RestaurantRecord {
        style: style.to_string(),
        name: name.to_string(),
        vegetarian: parse_bool(parts[2])?,
        open_hour: parse_hour("openHour", parts[3])?,
        close_hour: parse_hour("closeHour", parts[4])?,
    })
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DataLoadError::InvalidValue {
            field: "vegetarian".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Hours must be exactly `HH:MM` so that lexical comparison matches clock order.
pub(crate) fn is_hh_mm(s: &str) -> bool {
    s.len() == 5 && NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}

fn parse_hour(field: &str, s: &str) -> Result<String> {
    if !is_hh_mm(s) {
        return Err(DataLoadError::InvalidValue {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_lines() {
        let content = "\
# style::name::vegetarian::openHour::closeHour
italian::Trattoria Roma::true::09:00::22:00

sushi::Kaiten::FALSE::11:30::23:00
";
        let records = parse_restaurants_str(content, "restaurants.dat").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Trattoria Roma");
        assert!(records[0].vegetarian);
        assert_eq!(records[1].style, "sushi");
        assert!(!records[1].vegetarian);
        assert_eq!(records[1].open_hour, "11:30");
    }

    #[test]
    fn test_field_count_mismatch_reports_line() {
        let content = "italian::Trattoria::true::09:00::22:00\nthai::Baan::true::09:00\n";
        let err = parse_restaurants_str(content, "restaurants.dat").unwrap_err();

        assert!(matches!(
            err,
            DataLoadError::FieldCountMismatch { expected: 5, found: 4, line: 2 }
        ));
    }

    #[test]
    fn test_rejects_unpadded_hour() {
        let err = parse_restaurants_str("thai::Baan::true::9:00::22:00", "f").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "openHour"));
    }

    #[test]
    fn test_rejects_bad_vegetarian_flag() {
        let err = parse_restaurants_str("thai::Baan::yes::09:00::22:00", "f").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "vegetarian"));
    }

    #[test]
    fn test_hh_mm_check() {
        assert!(is_hh_mm("00:00"));
        assert!(is_hh_mm("23:59"));
        assert!(!is_hh_mm("24:00"));
        assert!(!is_hh_mm("9:00"));
        assert!(!is_hh_mm("09-00"));
        assert!(!is_hh_mm("09:60"));
        assert!(!is_hh_mm("9:005"));
    }

    #[test]
    fn test_missing_style() {
        let err = parse_restaurants_str("::Baan::true::09:00::22:00", "f").unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::ParseError { line: 1, ref reason, .. } if reason == "Missing style"
        ));
    }

    #[test]
    fn test_missing_name() {
        let err = parse_restaurants_str("thai::::true::09:00::22:00", "f").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_restaurants(Path::new("does/not/exist.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
