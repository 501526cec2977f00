//! Filter evaluation against documents
//!
//! Comparisons use `Scalar::total_cmp`, the same order stores sort by,
//! so a seek predicate selects exactly the rows after the cursor.
//! A missing field compares as null.

use std::cmp::Ordering;

use super::ast::{Filter, FilterOp, Predicate};
use crate::value::{Document, Scalar};

/// Evaluates filters against documents
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Checks if a document matches the filter
    pub fn matches<D: Document>(document: &D, filter: &Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Match(predicate) => Self::matches_predicate(document, predicate),
            Filter::And(filters) => filters.iter().all(|f| Self::matches(document, f)),
            Filter::Or(filters) => filters.iter().any(|f| Self::matches(document, f)),
        }
    }

    /// Checks if a document matches a single predicate
    fn matches_predicate<D: Document>(document: &D, predicate: &Predicate) -> bool {
        let actual = document.field(&predicate.field).unwrap_or(Scalar::Null);
        let ordering = actual.total_cmp(predicate.op.operand());

        match predicate.op {
            FilterOp::Eq(_) => ordering == Ordering::Equal,
            FilterOp::Gt(_) => ordering == Ordering::Greater,
            FilterOp::Gte(_) => ordering != Ordering::Less,
            FilterOp::Lt(_) => ordering == Ordering::Less,
            FilterOp::Lte(_) => ordering != Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_match() {
        let doc = json!({"name": "Alice", "age": 30});

        assert!(FilterEvaluator::matches(&doc, &Filter::eq("name", "Alice")));
        assert!(!FilterEvaluator::matches(&doc, &Filter::eq("name", "Bob")));
    }

    #[test]
    fn test_no_string_number_coercion() {
        let doc = json!({"value": 123});

        assert!(!FilterEvaluator::matches(&doc, &Filter::eq("value", "123")));
        assert!(FilterEvaluator::matches(&doc, &Filter::eq("value", 123)));
        // numeric equality across int and float
        assert!(FilterEvaluator::matches(&doc, &Filter::eq("value", 123.0)));
    }

    #[test]
    fn test_range_predicates() {
        let doc = json!({"age": 25});

        assert!(FilterEvaluator::matches(&doc, &Filter::gte("age", 18)));
        assert!(FilterEvaluator::matches(&doc, &Filter::lte("age", 30)));
        assert!(FilterEvaluator::matches(&doc, &Filter::gte("age", 25)));
        assert!(!FilterEvaluator::matches(&doc, &Filter::gt("age", 25)));
        assert!(!FilterEvaluator::matches(&doc, &Filter::lt("age", 25)));
    }

    #[test]
    fn test_and_or() {
        let doc = json!({"age": 25, "active": true});

        let both = Filter::gte("age", 18).and(Filter::eq("active", true));
        assert!(FilterEvaluator::matches(&doc, &both));

        let not_both = Filter::gte("age", 18).and(Filter::eq("active", false));
        assert!(!FilterEvaluator::matches(&doc, &not_both));

        let either = Filter::any_of(vec![Filter::eq("active", false), Filter::lt("age", 30)]);
        assert!(FilterEvaluator::matches(&doc, &either));

        assert!(!FilterEvaluator::matches(&doc, &Filter::Or(vec![])));
        assert!(FilterEvaluator::matches(&doc, &Filter::All));
    }

    #[test]
    fn test_missing_field_compares_as_null() {
        let doc = json!({"name": "Alice"});

        assert!(!FilterEvaluator::matches(&doc, &Filter::eq("age", 30)));
        assert!(FilterEvaluator::matches(&doc, &Filter::eq("age", Scalar::Null)));
        assert!(FilterEvaluator::matches(&doc, &Filter::lt("age", 0)));
    }

    #[test]
    fn test_cross_type_follows_rank_order() {
        let doc = json!({"key": "abc"});

        // strings rank above numbers
        assert!(FilterEvaluator::matches(&doc, &Filter::gt("key", 1_000_000)));
        assert!(!FilterEvaluator::matches(&doc, &Filter::lt("key", 1_000_000)));
    }
}
