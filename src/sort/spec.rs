//! Sort criteria and the non-empty sort spec

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{SortError, SortResult};
use crate::value::{Document, Scalar};

/// Primary identifier field name
pub const ID_FIELD: &str = "_id";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Applies this direction to an ascending ordering
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(SortError::InvalidDirection(s.to_string())),
        }
    }
}

/// One (field, direction) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Parses `field` or `field:asc` / `field:desc`
impl FromStr for SortCriterion {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (s, SortDirection::Asc),
        };

        if field.is_empty() {
            return Err(SortError::EmptyField);
        }

        Ok(Self::new(field, direction))
    }
}

/// Ordered, non-empty list of sort criteria.
///
/// Built once per query pattern and reused across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    criteria: Vec<SortCriterion>,
}

impl SortSpec {
    /// Creates a spec from criteria, rejecting empty or duplicate fields
    pub fn new(criteria: Vec<SortCriterion>) -> SortResult<Self> {
        if criteria.is_empty() {
            return Err(SortError::Empty);
        }

        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in &criteria {
            if criterion.field.is_empty() {
                return Err(SortError::EmptyField);
            }
            if !seen.insert(criterion.field.as_str()) {
                return Err(SortError::DuplicateField(criterion.field.clone()));
            }
        }

        Ok(Self { criteria })
    }

    /// Single ascending sort on `_id`
    pub fn by_id() -> Self {
        Self {
            criteria: vec![SortCriterion::asc(ID_FIELD)],
        }
    }

    /// Criteria in priority order
    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    /// Iterates over criteria in priority order
    pub fn iter(&self) -> impl Iterator<Item = &SortCriterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Always false for a constructed spec
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Returns true if the spec sorts by `field`
    pub fn contains(&self, field: &str) -> bool {
        self.criteria.iter().any(|c| c.field == field)
    }

    /// Compares two documents under this spec.
    ///
    /// Missing fields compare as null. Equal key tuples return `Equal`,
    /// so callers needing stability must use a stable sort.
    pub fn compare<D: Document>(&self, a: &D, b: &D) -> Ordering {
        for criterion in &self.criteria {
            let a_val = a.field(&criterion.field).unwrap_or(Scalar::Null);
            let b_val = b.field(&criterion.field).unwrap_or(Scalar::Null);

            let ordering = criterion.direction.apply(a_val.total_cmp(&b_val));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Fluent builder for sort specs
#[derive(Debug, Clone, Default)]
pub struct SortBuilder {
    sorts: Vec<SortCriterion>,
}

impl SortBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_asc(self) -> Self {
        self.with(ID_FIELD, SortDirection::Asc)
    }

    pub fn with_id_desc(self) -> Self {
        self.with(ID_FIELD, SortDirection::Desc)
    }

    pub fn with_property_asc(self, name: impl Into<String>) -> Self {
        self.with(name, SortDirection::Asc)
    }

    pub fn with_property_desc(self, name: impl Into<String>) -> Self {
        self.with(name, SortDirection::Desc)
    }

    /// Adds a criterion with an explicit direction
    pub fn with(mut self, name: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.push(SortCriterion::new(name, direction));
        self
    }

    /// Builds the spec; fails if empty or a field repeats
    pub fn build(self) -> SortResult<SortSpec> {
        SortSpec::new(self.sorts)
    }
}
