//! In-memory document store
//!
//! Query flow (strict order):
//! 1. Check the deadline
//! 2. Filter documents with `FilterEvaluator`
//! 3. Stable sort by the sort spec
//! 4. Apply limit

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{DocumentStore, FindQuery};
use crate::filter::FilterEvaluator;
use crate::value::Document;

/// Vec-backed store. Insertion order is the tie-break for equal sort keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<D> {
    documents: Vec<D>,
}

impl<D> MemoryStore<D> {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    pub fn from_documents(documents: Vec<D>) -> Self {
        Self { documents }
    }

    pub fn insert(&mut self, document: D) {
        self.documents.push(document);
    }

    /// Removes every document for which `pred` returns true
    pub fn remove_where<F: FnMut(&D) -> bool>(&mut self, mut pred: F) {
        self.documents.retain(|d| !pred(d));
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl MemoryStore<Value> {
    /// Loads a JSON-lines file: one object per line, blank lines skipped
    pub fn load_jsonl(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_jsonl(&content)
    }

    /// Parses JSON-lines content
    pub fn parse_jsonl(content: &str) -> StoreResult<Self> {
        let mut documents = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let doc: Value =
                serde_json::from_str(line).map_err(|e| StoreError::InvalidDocument {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;

            if !doc.is_object() {
                return Err(StoreError::InvalidDocument {
                    line: idx + 1,
                    reason: "expected a JSON object".to_string(),
                });
            }

            documents.push(doc);
        }

        Ok(Self { documents })
    }
}

impl<D: Document + Clone> DocumentStore for MemoryStore<D> {
    type Document = D;

    fn find(&self, query: &FindQuery<'_>) -> StoreResult<Vec<D>> {
        if let Some(deadline) = query.deadline {
            if Instant::now() >= deadline {
                return Err(StoreError::DeadlineExceeded);
            }
        }

        let mut candidates: Vec<&D> = self
            .documents
            .iter()
            .filter(|doc| FilterEvaluator::matches(*doc, query.filter))
            .collect();

        // sort_by is stable
        candidates.sort_by(|a, b| query.sort.compare(*a, *b));
        candidates.truncate(query.limit);

        Ok(candidates.into_iter().cloned().collect())
    }
}
