//! Field rules and the command-boundary validation error.
//!
//! # Responsibility
//! - Provide small reusable checks that report into a `Notification`.
//! - Turn a non-empty notification into `EntityValidationError` when a command
//!   requires a valid entity before it proceeds.
//!
//! # Invariants
//! - Rules never fail; they only record messages.
//! - Applying a rule set replaces the field's earlier messages.

use crate::model::entity::Entity;
use crate::model::notification::{FieldErrors, Notification};
use thiserror::Error;

/// Aggregate error carrying every field's messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Entity Validation Error ({} invalid field(s))", .errors.len())]
pub struct EntityValidationError {
    pub errors: FieldErrors,
}

impl EntityValidationError {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            errors: notification.errors().clone(),
        }
    }

    /// Returns `Err` with the full message list when `entity` has errors.
    pub fn ensure_valid<E: Entity>(entity: &E) -> Result<(), Self> {
        let notification = entity.notification();
        if notification.has_errors() {
            return Err(Self::from_notification(notification));
        }
        Ok(())
    }
}

/// Rule chain for one text field.
///
/// ```
/// use catalog_core::model::notification::Notification;
/// use catalog_core::model::validation::TextRules;
///
/// let mut notification = Notification::new();
/// let valid = TextRules::new("name", Some(""))
///     .required()
///     .max_length(255)
///     .apply(&mut notification);
/// assert!(!valid);
/// assert_eq!(notification.field_errors("name"), ["name should not be empty"]);
/// ```
#[derive(Debug)]
pub struct TextRules<'a> {
    field: &'static str,
    value: Option<&'a str>,
    messages: Vec<String>,
}

impl<'a> TextRules<'a> {
    pub fn new(field: &'static str, value: Option<&'a str>) -> Self {
        Self {
            field,
            value,
            messages: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        if self.value.map_or(true, str::is_empty) {
            self.messages
                .push(format!("{} should not be empty", self.field));
        }
        self
    }

    /// Counts characters, not bytes. Absent values are left to `required`.
    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(value) = self.value {
            if value.chars().count() > max {
                self.messages.push(format!(
                    "{} must be shorter than or equal to {max} characters",
                    self.field
                ));
            }
        }
        self
    }

    /// Writes the collected messages into `notification`.
    ///
    /// Returns `true` when the field passed every rule.
    pub fn apply(self, notification: &mut Notification) -> bool {
        let valid = self.messages.is_empty();
        notification.set_error(self.messages, self.field);
        valid
    }
}
