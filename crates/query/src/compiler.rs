//! Predicate compiler.
//!
//! Turns the raw, per-request parameters into a validated `AbstractQuery`.
//! Compilation is pure: the current time is supplied by the caller.

use crate::terms::{AbstractQuery, CompareOp, Field, FilterTerm, PartitionKeyTerm, TermValue};
use crate::time::TimeOfDay;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const STYLE_PARAM: &str = "style";
pub const VEGETARIAN_PARAM: &str = "vegetarian";

/// Caller input that cannot be compiled into a query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for parameter: {0}. Use 'true' or 'false'.")]
    InvalidParameter(String),
}

impl ValidationError {
    /// Name of the offending parameter
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::MissingParameter(p) | ValidationError::InvalidParameter(p) => p,
        }
    }
}

/// Raw filters for a single request, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilters {
    pub style: Option<String>,
    /// Absent, or present with whatever text the caller sent
    pub vegetarian: Option<String>,
    pub now: TimeOfDay,
}

impl RequestFilters {
    pub fn new(style: Option<String>, vegetarian: Option<String>, now: TimeOfDay) -> Self {
        Self { style, vegetarian, now }
    }

    /// Pick the known keys out of an inbound query-parameter map.
    /// Unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>, now: TimeOfDay) -> Self {
        Self {
            style: params.get(STYLE_PARAM).cloned(),
            vegetarian: params.get(VEGETARIAN_PARAM).cloned(),
            now,
        }
    }
}

/// Validate and compile request filters.
///
/// Validation order: `style` first, then `vegetarian`.
pub fn compile(filters: &RequestFilters) -> Result<AbstractQuery, ValidationError> {
    let style = filters
        .style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::MissingParameter(STYLE_PARAM.to_string()))?;

    let vegetarian = filters
        .vegetarian
        .as_deref()
        .map(parse_vegetarian)
        .transpose()?;

    let now = TermValue::Text(filters.now.as_str().to_string());
    let mut terms = vec![
        FilterTerm::new(Field::OpenHour, CompareOp::Le, now.clone()),
        FilterTerm::new(Field::CloseHour, CompareOp::Ge, now),
    ];
    if let Some(flag) = vegetarian {
        terms.push(FilterTerm::new(Field::Vegetarian, CompareOp::Eq, TermValue::Bool(flag)));
    }

    let query = AbstractQuery {
        key: PartitionKeyTerm { value: style.to_string() },
        filters: terms,
    };
    debug!("Compiled query: {}", query);
    Ok(query)
}

fn parse_vegetarian(raw: &str) -> Result<bool, ValidationError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValidationError::InvalidParameter(VEGETARIAN_PARAM.to_string()))
    }
}
