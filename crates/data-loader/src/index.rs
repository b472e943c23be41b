//! RestaurantTable building and validation.
//!
//! Steps when loading from disk:
//! - Parse the data file
//! - Insert every record into its style partition
//! - Validate the resulting table

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl RestaurantTable {
    /// Load a restaurant table from a `.dat` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading restaurants from {:?}", path);

        let records = parser::parse_restaurants(path)?;
        let table: RestaurantTable = records.into_iter().collect();

        table.validate()?;

        info!(
            "Loaded {} restaurants across {} styles",
            table.len(),
            table.partitions.len()
        );
        Ok(table)
    }

    /// Validate data integrity
    ///
    /// Records inserted directly (not through the parser) must still carry
    /// zero-padded `HH:MM` hours.
    pub fn validate(&self) -> Result<()> {
        for record in self.partitions.values().flatten() {
            for (field, value) in [("openHour", &record.open_hour), ("closeHour", &record.close_hour)] {
                if !parser::is_hh_mm(value) {
                    return Err(DataLoadError::InvalidValue {
                        field: field.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_hours() {
        let mut table = RestaurantTable::new();
        table.insert(RestaurantRecord::new("thai", "Baan", true, "9am", "22:00"));

        assert!(matches!(
            table.validate(),
            Err(DataLoadError::InvalidValue { ref field, .. }) if field == "openHour"
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_close_hour() {
        let mut table = RestaurantTable::new();
        table.insert(RestaurantRecord::new("thai", "Baan", true, "09:00", "24:30"));

        assert!(matches!(
            table.validate(),
            Err(DataLoadError::InvalidValue { ref field, .. }) if field == "closeHour"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurants.dat");
        std::fs::write(
            &path,
            "italian::Trattoria::false::09:00::22:00\nitalian::Verde::true::10:00::21:00\n",
        )
        .unwrap();

        let table = RestaurantTable::load_from_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_partition("italian")[1].name, "Verde");
    }

    #[test]
    fn test_load_from_file_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurants.dat");
        std::fs::write(&path, "italian::Trattoria::false::09:00::22:00\nthai::Baan::true::9:00::22:00\n")
            .unwrap();

        let err = RestaurantTable::load_from_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "openHour"));
    }
}
