//! Filter that keeps records satisfying a single filter term.

use crate::terms::FilterTerm;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::RestaurantRecord;

pub struct TermFilter {
    term: FilterTerm,
    name: String,
}

impl TermFilter {
    pub fn new(term: FilterTerm) -> Self {
        let name = format!("TermFilter({})", term);
        Self { term, name }
    }
}

impl Filter for TermFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, candidates: Vec<RestaurantRecord>) -> Result<Vec<RestaurantRecord>> {
        Ok(candidates
            .into_iter()
            .filter(|record| self.term.matches(record))
            .collect())
    }
}
