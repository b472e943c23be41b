//! # Recommendation Handler
//!
//! Entry point for a single "open now" request:
//! 1. Read the current time of day from the injected clock
//! 2. Compile the query parameters into an `AbstractQuery`
//! 3. Execute it against the store
//! 4. Map the outcome to a status-bearing response
//!
//! Each call is independent. The handler only holds shared, immutable
//! collaborators, so clones can serve requests concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use data_loader::RestaurantRecord;
use query::{compile, RequestFilters, TimeOfDay, ValidationError};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::executor::{ExecutionError, QueryExecutor};

pub const NOT_FOUND_MESSAGE: &str = "No matching restaurant found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Source of the request's "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> TimeOfDay;
}

/// Reads the UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_time(Utc::now().time())
    }
}

/// Always reports the same time of day.
#[derive(Debug, Clone)]
pub struct FixedClock(pub TimeOfDay);

impl Clock for FixedClock {
    fn now(&self) -> TimeOfDay {
        self.0.clone()
    }
}

/// Why a request produced no recommendation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Status code plus JSON body, ready for whatever transport hosts the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Response {
    pub fn ok(record: &RestaurantRecord) -> Self {
        Self {
            status_code: 200,
            body: json!({ "restaurantRecommendation": record }),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status_code: 404,
            body: json!({ "message": NOT_FOUND_MESSAGE }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: json!({ "message": message.into() }),
        }
    }

    pub fn internal_error(cause: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: json!({ "message": INTERNAL_ERROR_MESSAGE, "error": cause.into() }),
        }
    }

    pub fn body_string(&self) -> String {
        self.body.to_string()
    }
}

impl From<Result<Option<RestaurantRecord>, RecommendationError>> for Response {
    fn from(outcome: Result<Option<RestaurantRecord>, RecommendationError>) -> Self {
        match outcome {
            Ok(Some(record)) => Response::ok(&record),
            Ok(None) => Response::not_found(),
            Err(RecommendationError::Validation(e)) => Response::bad_request(e.to_string()),
            Err(RecommendationError::Execution(e)) => Response::internal_error(e.cause),
        }
    }
}

#[derive(Clone)]
pub struct RecommendationHandler {
    executor: QueryExecutor,
    clock: Arc<dyn Clock>,
}

impl RecommendationHandler {
    pub fn new(executor: QueryExecutor, clock: Arc<dyn Clock>) -> Self {
        Self { executor, clock }
    }

    /// Find one open restaurant matching the parameters.
    pub fn recommend(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Option<RestaurantRecord>, RecommendationError> {
        let filters = RequestFilters::from_params(params, self.clock.now());
        let query = compile(&filters)?;
        Ok(self.executor.execute(&query)?)
    }

    /// Handle a request end to end, logging the outcome.
    pub fn handle(&self, params: &HashMap<String, String>) -> Response {
        let start_time = Instant::now();
        let outcome = self.recommend(params);

        match &outcome {
            Ok(Some(record)) => info!(
                "Recommended {:?} ({}) in {:.2?}",
                record.name,
                record.style,
                start_time.elapsed()
            ),
            Ok(None) => info!("No matching restaurant in {:.2?}", start_time.elapsed()),
            Err(RecommendationError::Validation(e)) => warn!("Rejected request: {}", e),
            Err(RecommendationError::Execution(e)) => error!(
                cause = %e.cause,
                "Lookup against {} failed",
                self.executor.store_name()
            ),
        }

        Response::from(outcome)
    }
}
