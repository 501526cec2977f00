//! Predicate algebra

use serde::{Deserialize, Serialize};

use crate::value::Scalar;

/// Comparison operation against a scalar operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Scalar),
    /// Greater than: field > value
    Gt(Scalar),
    /// Greater than or equal: field >= value
    Gte(Scalar),
    /// Less than: field < value
    Lt(Scalar),
    /// Less than or equal: field <= value
    Lte(Scalar),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        !self.is_equality()
    }

    /// Returns the operand
    pub fn operand(&self) -> &Scalar {
        match self {
            FilterOp::Eq(v) | FilterOp::Gt(v) | FilterOp::Gte(v) | FilterOp::Lt(v) | FilterOp::Lte(v) => v,
        }
    }

    /// Returns the operation name
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }
}

/// A single-field predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field name (dotted paths allowed)
    pub field: String,
    /// Comparison
    pub op: FilterOp,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: FilterOp) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }
}

/// Composable filter tree.
///
/// JSON form: `"all"`, `{"match": {"field": "age", "op": {"gt": 18}}}`,
/// `{"and": [..]}`, `{"or": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Always true
    #[default]
    All,
    /// Single-field comparison
    Match(Predicate),
    /// All operands hold
    And(Vec<Filter>),
    /// At least one operand holds; empty is never true
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Match(Predicate::new(field, FilterOp::Eq(value.into())))
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Match(Predicate::new(field, FilterOp::Gt(value.into())))
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Match(Predicate::new(field, FilterOp::Gte(value.into())))
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Match(Predicate::new(field, FilterOp::Lt(value.into())))
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Filter::Match(Predicate::new(field, FilterOp::Lte(value.into())))
    }

    /// Conjunction of `self` and `other`
    pub fn and(self, other: Filter) -> Self {
        Self::all_of(vec![self, other])
    }

    /// Conjunction of all filters.
    ///
    /// `All` operands are dropped and nested `And`s flattened;
    /// an empty conjunction is `All`.
    pub fn all_of(filters: Vec<Filter>) -> Self {
        let mut parts = Vec::with_capacity(filters.len());
        for filter in filters {
            match filter {
                Filter::All => {}
                Filter::And(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }

        match parts.len() {
            0 => Filter::All,
            1 => parts.swap_remove(0),
            _ => Filter::And(parts),
        }
    }

    /// Disjunction of all filters.
    ///
    /// Nested `Or`s are flattened; any `All` operand makes the result `All`.
    pub fn any_of(filters: Vec<Filter>) -> Self {
        let mut parts = Vec::with_capacity(filters.len());
        for filter in filters {
            match filter {
                Filter::All => return Filter::All,
                Filter::Or(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }

        match parts.len() {
            1 => parts.swap_remove(0),
            _ => Filter::Or(parts),
        }
    }

    /// Returns true for the always-true filter
    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

/// Caller-owned source of the base (non-pagination) filter.
///
/// The pager never inspects the result, it only conjoins it with the
/// seek predicate.
pub trait BaseFilter {
    fn build_filter(&self) -> Filter;
}

impl BaseFilter for Filter {
    fn build_filter(&self) -> Filter {
        self.clone()
    }
}
