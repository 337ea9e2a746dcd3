//! Entity contract shared by every aggregate.

use crate::model::notification::Notification;
use crate::model::value_object::ValueObject;
use std::fmt::{Debug, Display};

/// Domain object with an identity distinct from its field values.
///
/// Concrete entities own one `Notification` that their validating
/// operations write into. Callers inspect it through [`Entity::notification`];
/// the entity itself never fails on invalid field values.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Identity type, usually [`crate::Identifier`].
    type Id: ValueObject + Display;

    /// Human-readable kind used in error messages (e.g. `Category`).
    const KIND: &'static str;

    fn entity_id(&self) -> &Self::Id;

    fn notification(&self) -> &Notification;
}
