//! Generic repository contracts and the errors they report.
//!
//! # Responsibility
//! - Define async CRUD (`Repository`) and search (`SearchableRepository`)
//!   contracts keyed by entity identity.
//! - Define the error taxonomy shared by every store.
//!
//! # Invariants
//! - Identifier and not-found failures are raised where they are detected.
//! - Validation failures are only raised at a command boundary.

use crate::db::DbError;
use crate::model::entity::Entity;
use crate::model::identifier::InvalidIdentifierError;
use crate::model::validation::EntityValidationError;
use crate::repo::search::{SearchParams, SearchResult};
use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// A lookup by id targeted records that do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity_kind} Not Found using ID {}", .ids.join(", "))]
pub struct NotFoundError {
    pub ids: Vec<String>,
    pub entity_kind: &'static str,
}

impl NotFoundError {
    pub fn new(id: impl Display, entity_kind: &'static str) -> Self {
        Self {
            ids: vec![id.to_string()],
            entity_kind,
        }
    }

    pub fn many<I>(ids: I, entity_kind: &'static str) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        Self {
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
            entity_kind,
        }
    }

    /// Not-found error for one id of entity type `E`.
    pub fn for_entity<E: Entity>(id: &E::Id) -> Self {
        Self::new(id, E::KIND)
    }
}

/// Error returned by repository and service operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Validation(#[from] EntityValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract keyed by entity identity.
///
/// Mutations take `&mut self`; implementations are single-writer.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn insert(&mut self, entity: &E) -> RepoResult<()>;

    /// Partial-failure policy is store-defined.
    async fn bulk_insert(&mut self, entities: &[E]) -> RepoResult<()>;

    /// Replaces the stored value with the same id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `entity`'s id.
    async fn update(&mut self, entity: &E) -> RepoResult<()>;

    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    async fn delete(&mut self, id: &E::Id) -> RepoResult<()>;

    async fn find_by_id(&self, id: &E::Id) -> RepoResult<Option<E>>;

    async fn find_all(&self) -> RepoResult<Vec<E>>;
}

/// Repository that also exposes filter + sort + paginate as one operation.
#[async_trait]
pub trait SearchableRepository<E: Entity>: Repository<E> {
    type Filter: Send + Sync;

    /// Field names accepted by `SearchParams::sort`.
    fn sortable_fields(&self) -> &'static [&'static str];

    async fn search(&self, params: &SearchParams<Self::Filter>) -> RepoResult<SearchResult<E>>;
}

#[cfg(test)]
mod tests {
    use super::NotFoundError;

    #[test]
    fn not_found_message_lists_ids() {
        let single = NotFoundError::new("abc", "Category");
        assert_eq!(single.to_string(), "Category Not Found using ID abc");

        let many = NotFoundError::many(["a", "b"], "Category");
        assert_eq!(many.to_string(), "Category Not Found using ID a, b");
    }
}
