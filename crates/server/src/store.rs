//! Store access for the query executor.
//!
//! The executor only needs a partition-key equality lookup with an optional
//! conjunctive filter pass. Anything a concrete store needs on top of that
//! (attribute-name escaping, paging, retries) stays inside its adapter.

use std::sync::Arc;

use data_loader::{RestaurantRecord, RestaurantTable};
use query::{matches_all, FilterTerm, PartitionKeyTerm};
use thiserror::Error;
use tracing::debug;

/// Faults raised by a store while serving a lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to reach store: {0}")]
    Connection(String),

    #[error("Request throttled by store: {0}")]
    Throttled(String),

    #[error("Malformed response from store: {0}")]
    MalformedResponse(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),
}

/// A key-partitioned restaurant store.
pub trait RestaurantStore: Send + Sync {
    /// Returns the name of the backing table (for logging)
    fn name(&self) -> &str;

    /// Whether `query` honours its `filter` argument.
    ///
    /// When this is false the executor passes no filter terms and applies
    /// them itself after retrieval.
    fn supports_server_side_filter(&self) -> bool;

    /// Return every record in the partition that satisfies all of `filter`,
    /// in store order.
    fn query(
        &self,
        key: &PartitionKeyTerm,
        filter: &[FilterTerm],
    ) -> Result<Vec<RestaurantRecord>, StoreError>;
}

/// Serves lookups from an in-memory `RestaurantTable`.
#[derive(Clone)]
pub struct TableStore {
    table_name: String,
    table: Arc<RestaurantTable>,
    server_side_filter: bool,
}

impl TableStore {
    pub fn new(table_name: impl Into<String>, table: Arc<RestaurantTable>) -> Self {
        Self {
            table_name: table_name.into(),
            table,
            server_side_filter: true,
        }
    }

    /// Configure whether filter terms are evaluated inside the store (default: true)
    pub fn with_server_side_filter(mut self, enabled: bool) -> Self {
        self.server_side_filter = enabled;
        self
    }
}

impl RestaurantStore for TableStore {
    fn name(&self) -> &str {
        &self.table_name
    }

    fn supports_server_side_filter(&self) -> bool {
        self.server_side_filter
    }

    fn query(
        &self,
        key: &PartitionKeyTerm,
        filter: &[FilterTerm],
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        let partition = self.table.get_partition(&key.value);
        let items: Vec<RestaurantRecord> = partition
            .iter()
            .filter(|record| matches_all(filter, record))
            .cloned()
            .collect();

        debug!(
            "{}: scanned {} items in partition {:?}, returned {}",
            self.table_name,
            partition.len(),
            key.value,
            items.len()
        );
        Ok(items)
    }
}
