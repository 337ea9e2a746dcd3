//! Category <-> persisted record mapping.
//!
//! # Invariants
//! - `from_record(to_record(c)) == c` for every valid category `c`.
//! - The identifier is stored as its string value.
//! - `created_at` is stored as Unix epoch milliseconds.
//! - Records that fail identity parsing or entity validation are rejected.

use crate::model::category::{Category, CategoryProps};
use crate::model::identifier::Identifier;
use crate::model::validation::EntityValidationError;
use crate::repo::repository::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage shape of a category; field set mirrors the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

pub fn to_record(category: &Category) -> CategoryRecord {
    CategoryRecord {
        category_id: category.category_id().to_string(),
        name: category.name().to_string(),
        description: category.description().map(str::to_string),
        is_active: category.is_active(),
        created_at: category.created_at().timestamp_millis(),
    }
}

/// Rehydrates a category from storage.
///
/// # Errors
/// - `RepoError::InvalidData` for a malformed id or timestamp.
/// - `RepoError::Validation` when the rehydrated entity breaks its rules.
pub fn from_record(record: CategoryRecord) -> RepoResult<Category> {
    let category_id = Identifier::parse(record.category_id.as_str()).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{}` in categories.category_id",
            record.category_id
        ))
    })?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(record.created_at).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{}` in categories.created_at",
            record.created_at
        ))
    })?;

    let mut category = Category::new(CategoryProps {
        category_id: Some(category_id),
        name: record.name,
        description: record.description,
        is_active: Some(record.is_active),
        created_at: Some(created_at),
    });
    category.validate(None);
    EntityValidationError::ensure_valid(&category)?;
    Ok(category)
}
