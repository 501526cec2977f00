//! Seek predicate composition

use super::ast::Filter;
use crate::sort::{SortDirection, SortSpec};
use crate::token::SeekPosition;

/// Builds the "strictly after the last-seen row" predicate
pub struct SeekComposer;

impl SeekComposer {
    /// Builds the seek predicate for `position` under `sort`.
    ///
    /// Emits one level per sort criterion whose field is present in the
    /// position, in sort order: equality on every earlier present key and a
    /// strict range on this key. Criteria missing from the position are
    /// skipped entirely, so a partial position resumes on the keys it has.
    ///
    /// Returns `None` when no criterion has a value, meaning the position
    /// carries nothing to seek on.
    pub fn seek_predicate(sort: &SortSpec, position: &SeekPosition) -> Option<Filter> {
        let mut levels = Vec::with_capacity(sort.len());
        let mut previous_equalities: Vec<Filter> = Vec::with_capacity(sort.len());

        for criterion in sort.iter() {
            let Some(last) = position.get(&criterion.field) else {
                continue;
            };

            let range = match criterion.direction {
                SortDirection::Asc => Filter::gt(criterion.field.as_str(), last.clone()),
                SortDirection::Desc => Filter::lt(criterion.field.as_str(), last.clone()),
            };

            let mut level = previous_equalities.clone();
            level.push(range);
            levels.push(Filter::all_of(level));

            previous_equalities.push(Filter::eq(criterion.field.as_str(), last.clone()));
        }

        if levels.is_empty() {
            None
        } else {
            Some(Filter::any_of(levels))
        }
    }

    /// Conjoins `base` with the seek predicate for `position`.
    ///
    /// `base` is returned unchanged for the first page (`None`) or when the
    /// position has no field in common with the sort spec.
    pub fn compose(base: Filter, sort: &SortSpec, position: Option<&SeekPosition>) -> Filter {
        match position.and_then(|p| Self::seek_predicate(sort, p)) {
            Some(seek) => base.and(seek),
            None => base,
        }
    }
}
