//! Decoded seek position: field name to last-seen value

use std::collections::BTreeMap;

use crate::sort::SortSpec;
use crate::value::{Document, Scalar};

/// Last-seen sort-key values of the previous page.
///
/// Keys are kept sorted so encoding the same position always produces
/// the same token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeekPosition {
    values: BTreeMap<String, Scalar>,
}

impl SeekPosition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the sort-key values of `doc`.
    ///
    /// A field absent from the document is recorded as `Null`, the value it
    /// sorts and filters as, so every sort key is present in the position.
    pub fn from_document<D: Document>(doc: &D, sort: &SortSpec) -> Self {
        sort.iter()
            .map(|c| (c.field.clone(), doc.field(&c.field).unwrap_or(Scalar::Null)))
            .collect()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Scalar>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Scalar)> {
        self.values.iter()
    }

    pub(crate) fn values(&self) -> &BTreeMap<String, Scalar> {
        &self.values
    }
}

impl<K: Into<String>> FromIterator<(K, Scalar)> for SeekPosition {
    fn from_iter<I: IntoIterator<Item = (K, Scalar)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
