//! Domain model shared by every aggregate.
//!
//! # Responsibility
//! - Define identity (`Identifier`) and value-object semantics.
//! - Provide the validation notification carried by each entity.
//! - Host concrete aggregates built on top of those primitives.
//!
//! # Invariants
//! - Every entity is identified by a stable `Identifier`.
//! - Ordinary invalid input is recorded in a `Notification`, never raised.

pub mod category;
pub mod entity;
pub mod identifier;
pub mod notification;
pub mod validation;
pub mod value_object;
