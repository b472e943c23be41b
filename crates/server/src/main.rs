//! Simple test harness for the recommendation handler.
//!
//! Loads the restaurant table and runs one request per style, so the whole
//! path from query parameters to response can be checked by hand.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::RestaurantTable;
use server::{QueryExecutor, RecommendationHandler, SystemClock, TableStore};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,query=debug")
        .init();

    info!("Starting open-now server test harness");

    let path = Path::new("data/restaurants.dat");
    let table = Arc::new(
        RestaurantTable::load_from_file(path).context("Failed to load restaurant table")?,
    );

    let store = TableStore::new("Restaurants", table.clone());
    let handler = RecommendationHandler::new(
        QueryExecutor::new(Arc::new(store)),
        Arc::new(SystemClock),
    );

    for (style, _) in table.style_counts() {
        let params = HashMap::from([("style".to_string(), style.to_string())]);
        let response = handler.handle(&params);
        info!("style={} -> {} {}", style, response.status_code, response.body_string());
    }

    Ok(())
}
