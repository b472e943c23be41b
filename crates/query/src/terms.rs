//! The abstract query model.
//!
//! An `AbstractQuery` is one partition-key equality term plus a conjunction
//! of filter terms. There is no way to express OR or negation.

use data_loader::RestaurantRecord;
use std::fmt;

/// Record attributes a term can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Style,
    Name,
    Vegetarian,
    OpenHour,
    CloseHour,
}

impl Field {
    /// Attribute name as stored in the table
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Field::Style => "style",
            Field::Name => "name",
            Field::Vegetarian => "vegetarian",
            Field::OpenHour => "openHour",
            Field::CloseHour => "closeHour",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Le,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    fn holds<T: Ord + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Le => left <= right,
            CompareOp::Ge => left >= right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermValue {
    Text(String),
    Bool(bool),
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Text(s) => write!(f, "{:?}", s),
            TermValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Equality on the partition key. Always targets `style`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKeyTerm {
    pub value: String,
}

impl PartitionKeyTerm {
    pub fn field(&self) -> Field {
        Field::Style
    }
}

impl fmt::Display for PartitionKeyTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.field(), self.value)
    }
}

/// A `(field, operator, value)` predicate applied after partition lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterTerm {
    pub field: Field,
    pub op: CompareOp,
    pub value: TermValue,
}

impl FilterTerm {
    pub fn new(field: Field, op: CompareOp, value: TermValue) -> Self {
        Self { field, op, value }
    }

    /// Evaluate this term against a record.
    ///
    /// Text compares lexically against string attributes. Booleans only
    /// support equality against `vegetarian`. Any type mismatch is `false`.
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        match (&self.value, self.field) {
            (TermValue::Bool(expected), Field::Vegetarian) => {
                self.op == CompareOp::Eq && record.vegetarian == *expected
            }
            (TermValue::Bool(_), _) | (TermValue::Text(_), Field::Vegetarian) => false,
            (TermValue::Text(expected), field) => {
                let actual = match field {
                    Field::Style => &record.style,
                    Field::Name => &record.name,
                    Field::OpenHour => &record.open_hour,
                    Field::CloseHour => &record.close_hour,
                    Field::Vegetarian => return false,
                };
                self.op.holds(actual.as_str(), expected.as_str())
            }
        }
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// A compiled lookup: exactly one partition-key term and an ordered
/// conjunction of filter terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbstractQuery {
    pub key: PartitionKeyTerm,
    pub filters: Vec<FilterTerm>,
}

/// True when every term holds for the record (an empty conjunction holds).
///
/// The partition key is not part of `terms`; stores route on it first.
pub fn matches_all(terms: &[FilterTerm], record: &RestaurantRecord) -> bool {
    terms.iter().all(|term| term.matches(record))
}

impl fmt::Display for AbstractQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        for term in &self.filters {
            write!(f, " AND {}", term)?;
        }
        Ok(())
    }
}
