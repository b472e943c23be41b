//! Server crate for the open-now restaurant recommendation service.
//!
//! This crate contains the query executor, the store seam it runs
//! against, and the request handler that maps outcomes to responses.

pub mod executor;
pub mod handler;
pub mod store;

pub use executor::{ExecutionError, QueryExecutor};
pub use handler::{
    Clock, FixedClock, RecommendationError, RecommendationHandler, Response, SystemClock,
};
pub use store::{RestaurantStore, StoreError, TableStore};
