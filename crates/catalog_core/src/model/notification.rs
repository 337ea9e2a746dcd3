//! Validation notification.
//!
//! # Responsibility
//! - Accumulate field-scoped validation messages for one command execution.
//!
//! # Invariants
//! - A fresh notification has no errors.
//! - Messages for one field keep insertion order.
//! - Revalidating a field replaces its messages instead of appending stale ones.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> ordered validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Per-entity accumulator of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notification {
    errors: FieldErrors,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message to `field`, skipping exact duplicates.
    pub fn add_error(&mut self, message: impl Into<String>, field: &str) {
        let message = message.into();
        let messages = self.errors.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Replaces all messages of `field`.
    ///
    /// An empty `messages` list removes the field entirely.
    pub fn set_error(&mut self, messages: Vec<String>, field: &str) {
        if messages.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), messages);
        }
    }

    /// Drops messages previously recorded for `field`.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Merges every message from `other` into `self`.
    pub fn copy_errors(&mut self, other: &Notification) {
        for (field, messages) in &other.errors {
            for message in messages {
                self.add_error(message.clone(), field);
            }
        }
    }

    /// Consumes the notification and returns its messages.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}
