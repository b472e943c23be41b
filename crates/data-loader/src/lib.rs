//! # Data Loader Crate
//!
//! This crate loads restaurant records and keeps them in an in-memory
//! table partitioned by cuisine style.
//!
//! ## Main Components
//!
//! - **types**: `RestaurantRecord` and the partitioned `RestaurantTable`
//! - **parser**: Parse `restaurants.dat` files into records
//! - **index**: Load and validate a `RestaurantTable`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RestaurantTable;
//! use std::path::Path;
//!
//! let table = RestaurantTable::load_from_file(Path::new("data/restaurants.dat"))?;
//! for record in table.get_partition("italian") {
//!     println!("{} ({} - {})", record.name, record.open_hour, record.close_hour);
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{RestaurantRecord, RestaurantTable, Style};
