//! Query construction and predicate evaluation for restaurant lookups.
//!
//! This crate provides:
//! - The abstract query model (partition-key term plus a conjunction of filter terms)
//! - The predicate compiler that validates request filters and builds queries
//! - A Filter trait and FilterPipeline for evaluating filter terms client-side
//!
//! ## Example Usage
//! ```ignore
//! use query::{compile, RequestFilters, TimeOfDay, FilterPipeline};
//!
//! let now: TimeOfDay = "10:00".parse()?;
//! let filters = RequestFilters::new(Some("italian".into()), Some("true".into()), now);
//! let query = compile(&filters)?;
//!
//! // Stores without a server-side filter pass
//! let open_now = FilterPipeline::from_terms(&query.filters).apply(candidates)?;
//! ```

pub mod compiler;
pub mod filter_pipeline;
pub mod filters;
pub mod terms;
pub mod time;
pub mod traits;

// Re-export main types
pub use compiler::{compile, RequestFilters, ValidationError};
pub use filter_pipeline::FilterPipeline;
pub use terms::{matches_all, AbstractQuery, CompareOp, Field, FilterTerm, PartitionKeyTerm, TermValue};
pub use time::{InvalidTimeOfDay, TimeOfDay};
pub use traits::Filter;
