//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into command/query entry points.
//! - Act as the command boundary that raises accumulated validation errors.

pub mod category_service;
