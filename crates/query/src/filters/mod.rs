//! Filter implementations for the candidate pipeline.

pub mod term;

pub use term::TermFilter;
