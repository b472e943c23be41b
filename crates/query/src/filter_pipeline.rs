//! The FilterPipeline chains filters together.
//!
//! It is the client-side counterpart of a store's server-side filter pass:
//! given the terms of an `AbstractQuery`, it produces the same survivors.

use crate::filters::TermFilter;
use crate::terms::FilterTerm;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::RestaurantRecord;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::from_terms(&query.filters);
/// let open_now = pipeline.apply(candidates)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// One `TermFilter` per term, in term order.
    pub fn from_terms(terms: &[FilterTerm]) -> Self {
        terms
            .iter()
            .cloned()
            .fold(Self::new(), |pipeline, term| pipeline.add_filter(TermFilter::new(term)))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Survivors keep their input order. Stops at the first failing filter.
    pub fn apply(&self, candidates: Vec<RestaurantRecord>) -> Result<Vec<RestaurantRecord>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
