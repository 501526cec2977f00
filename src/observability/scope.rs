//! ObservationScope for begin/complete logging around an operation
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` on `complete`, with elapsed time
//! - Logs `{name}_FAILED` on `fail`
//! - Logs `{name}_INCOMPLETE` if dropped without either

use std::cell::Cell;
use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs start and end events for one operation
///
/// ```ignore
/// let scope = ObservationScope::with_fields("PAGE_FETCH", &[("page_size", "20")]);
/// // ... do work ...
/// scope.complete_with_fields(&[("rows", "20")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    start: Instant,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope; logs `{name}_BEGIN` at TRACE
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields repeated on every event
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let fields: Vec<(&'a str, String)> =
            fields.iter().map(|(k, v)| (*k, v.to_string())).collect();

        let scope = Self {
            name,
            completed: Cell::new(false),
            fields,
            start: Instant::now(),
        };
        scope.emit(Severity::Trace, "BEGIN", &[]);
        scope
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as completed, adding result fields
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.elapsed_us();
        let mut fields: Vec<(&str, &str)> = extra_fields.to_vec();
        fields.push(("elapsed_us", elapsed.as_str()));
        self.emit(Severity::Info, "COMPLETE", &fields);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        self.emit(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn elapsed_us(&self) -> String {
        self.start.elapsed().as_micros().to_string()
    }

    fn emit(&self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        if !Logger::enabled(severity) {
            return;
        }
        let event = format!("{}_{}", self.name, suffix);
        let mut fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fields.extend(extra.iter().copied());
        Logger::log(severity, &event, &fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            self.emit(
                Severity::Warn,
                "INCOMPLETE",
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
