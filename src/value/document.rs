//! Field access on stored documents

use std::collections::BTreeMap;

use serde_json::Value;

use super::scalar::Scalar;

/// A typed record: field name to scalar
pub type Record = BTreeMap<String, Scalar>;

/// Read access to a document's scalar fields.
///
/// `None` means the field is absent or not a scalar.
pub trait Document {
    fn field(&self, path: &str) -> Option<Scalar>;
}

/// JSON documents. Dotted paths walk nested objects.
impl Document for Value {
    fn field(&self, path: &str) -> Option<Scalar> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Scalar::from_json(current)
    }
}

impl Document for Record {
    fn field(&self, path: &str) -> Option<Scalar> {
        self.get(path).cloned()
    }
}
