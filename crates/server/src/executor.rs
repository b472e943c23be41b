//! # Query Executor
//!
//! Runs a compiled `AbstractQuery` against a `RestaurantStore` and reduces
//! the result to at most one recommendation:
//! 1. Partition-key lookup, pushing filter terms down when the store can
//!    evaluate them
//! 2. Client-side filter pass otherwise
//! 3. First remaining record in store order, or none
//!
//! No tie-break is imposed when several records survive; the store's
//! return order decides.

use std::sync::Arc;
use std::time::Instant;

use data_loader::RestaurantRecord;
use query::{AbstractQuery, FilterPipeline, FilterTerm};
use thiserror::Error;
use tracing::debug;

use crate::store::{RestaurantStore, StoreError};

/// The lookup failed. The cause is diagnostic text only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{cause}")]
pub struct ExecutionError {
    pub cause: String,
}

impl ExecutionError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self { cause: cause.into() }
    }
}

impl From<StoreError> for ExecutionError {
    fn from(err: StoreError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn RestaurantStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Execute a query. `Ok(None)` means nothing matched.
    pub fn execute(&self, query: &AbstractQuery) -> Result<Option<RestaurantRecord>, ExecutionError> {
        let start_time = Instant::now();
        let server_side = self.store.supports_server_side_filter();
        let pushed_down: &[FilterTerm] = if server_side { &query.filters } else { &[] };

        let candidates = self.store.query(&query.key, pushed_down)?;
        debug!(
            "{} returned {} candidates for {} (server-side filter: {})",
            self.store.name(),
            candidates.len(),
            query.key,
            server_side
        );

        let candidates = if server_side {
            candidates
        } else {
            FilterPipeline::from_terms(&query.filters)
                .apply(candidates)
                .map_err(|e| ExecutionError::new(format!("{:#}", e)))?
        };

        debug!(
            "Query executed in {:.2?}, {} candidates remaining",
            start_time.elapsed(),
            candidates.len()
        );
        Ok(candidates.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TableStore;
    use data_loader::RestaurantTable;
    use query::{compile, RequestFilters};

    struct FailingStore(StoreError);

    impl RestaurantStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        fn supports_server_side_filter(&self) -> bool {
            true
        }

        fn query(
            &self,
            _key: &query::PartitionKeyTerm,
            _filter: &[FilterTerm],
        ) -> Result<Vec<RestaurantRecord>, StoreError> {
            Err(self.0.clone())
        }
    }

    fn table() -> Arc<RestaurantTable> {
        Arc::new(
            vec![
                RestaurantRecord::new("italian", "Closed Now", true, "17:00", "23:00"),
                RestaurantRecord::new("italian", "First Open", false, "09:00", "22:00"),
                RestaurantRecord::new("italian", "Second Open", true, "08:00", "22:00"),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn italian_at_ten(vegetarian: Option<&str>) -> AbstractQuery {
        compile(&RequestFilters::new(
            Some("italian".into()),
            vegetarian.map(String::from),
            "10:00".parse().unwrap(),
        ))
        .unwrap()
    }

    #[test]
    fn test_selects_first_in_store_order() {
        let executor = QueryExecutor::new(Arc::new(TableStore::new("Restaurants", table())));
        let found = executor.execute(&italian_at_ten(None)).unwrap().unwrap();
        assert_eq!(found.name, "First Open");
    }

    #[test]
    fn test_client_side_filter_matches_server_side() {
        let server = QueryExecutor::new(Arc::new(TableStore::new("Restaurants", table())));
        let client = QueryExecutor::new(Arc::new(
            TableStore::new("Restaurants", table()).with_server_side_filter(false),
        ));

        for vegetarian in [None, Some("true"), Some("false")] {
            let query = italian_at_ten(vegetarian);
            assert_eq!(server.execute(&query).unwrap(), client.execute(&query).unwrap());
        }
    }

    #[test]
    fn test_not_found_is_not_an_error() {
        let executor = QueryExecutor::new(Arc::new(TableStore::new("Restaurants", table())));
        let query = compile(&RequestFilters::new(Some("sushi".into()), None, "10:00".parse().unwrap())).unwrap();
        assert_eq!(executor.execute(&query).unwrap(), None);
    }

    #[test]
    fn test_store_fault_becomes_execution_error() {
        let executor = QueryExecutor::new(Arc::new(FailingStore(StoreError::Throttled(
            "rate exceeded".into(),
        ))));
        let err = executor.execute(&italian_at_ten(None)).unwrap_err();
        assert_eq!(err.cause, "Request throttled by store: rate exceeded");
    }
}
