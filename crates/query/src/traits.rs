//! Core traits for the filtering pipeline.

use anyhow::Result;
use data_loader::RestaurantRecord;

/// Core trait for filtering candidate records.
///
/// Filters take ownership of the candidates and return the survivors in
/// their original relative order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    fn apply(&self, candidates: Vec<RestaurantRecord>) -> Result<Vec<RestaurantRecord>>;
}
