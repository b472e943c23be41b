//! Core domain types for the restaurant dataset.
//!
//! This module defines the record type served by the recommendation
//! service and the in-memory table that stores those records partitioned
//! by cuisine style.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Cuisine style of a restaurant (e.g. "italian", "sushi").
///
/// This is the partition key of the restaurant table.
pub type Style = String;

// =============================================================================
// Restaurant Record
// =============================================================================

/// A single restaurant as stored in the table.
///
/// Opening hours are kept as 24-hour `HH:MM` strings. They are compared
/// lexically, which is why they must always be zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub style: Style,
    pub name: String,
    pub vegetarian: bool,
    pub open_hour: String,
    pub close_hour: String,
}

impl RestaurantRecord {
    /// Convenience constructor used heavily by tests and fixtures.
    pub fn new(
        style: impl Into<Style>,
        name: impl Into<String>,
        vegetarian: bool,
        open_hour: impl Into<String>,
        close_hour: impl Into<String>,
    ) -> Self {
        Self {
            style: style.into(),
            name: name.into(),
            vegetarian,
            open_hour: open_hour.into(),
            close_hour: close_hour.into(),
        }
    }
}

// =============================================================================
// RestaurantTable - The In-Memory Partitioned Store
// =============================================================================

/// Restaurant records partitioned by style.
///
/// Within a partition, records keep the order in which they were inserted.
/// Lookups by partition key never scan other partitions.
#[derive(Debug, Default)]
pub struct RestaurantTable {
    pub(crate) partitions: HashMap<Style, Vec<RestaurantRecord>>,
}

impl RestaurantTable {
    /// Creates a new, empty table
    pub fn new() -> Self {
        Self {
            partitions: HashMap::new(),
        }
    }

    /// Insert a record into its style partition
    pub fn insert(&mut self, record: RestaurantRecord) {
        self.partitions
            .entry(record.style.clone())
            .or_default()
            .push(record);
    }

    /// Get every record stored under a style.
    ///
    /// Returns an empty slice for unknown styles.
    pub fn get_partition(&self, style: &str) -> &[RestaurantRecord] {
        self.partitions
            .get(style)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All styles with their record counts, sorted by style
    pub fn style_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .partitions
            .iter()
            .map(|(style, records)| (style.as_str(), records.len()))
            .collect();
        counts.sort_by(|a, b| a.0.cmp(b.0));
        counts
    }

    /// Total number of records across all partitions
    pub fn len(&self) -> usize {
        self.partitions.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<RestaurantRecord> for RestaurantTable {
    fn from_iter<I: IntoIterator<Item = RestaurantRecord>>(iter: I) -> Self {
        let mut table = RestaurantTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
