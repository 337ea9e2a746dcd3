//! Persistence core for the catalog.
//! Entities, validation and the searchable repository contract live here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig, DatabaseConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, CategoryProps, CreateCategoryCommand};
pub use model::entity::Entity;
pub use model::identifier::{Identifier, InvalidIdentifierError};
pub use model::notification::{FieldErrors, Notification};
pub use model::validation::EntityValidationError;
pub use model::value_object::ValueObject;
pub use repo::category_repo::{
    CategoryInMemoryRepository, CategoryRepository, CategorySearchParams, CategorySearchResult,
};
pub use repo::in_memory::InMemoryRepository;
pub use repo::repository::{
    NotFoundError, RepoError, RepoResult, Repository, SearchableRepository,
};
pub use repo::search::{SearchInput, SearchParams, SearchResult, SortDirection};
pub use repo::sqlite_category_repo::SqliteCategoryRepository;
pub use service::category_service::{
    CategoryOutput, CategoryService, CreateCategoryInput, ListCategoriesInput, PaginationOutput,
    UpdateCategoryInput,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
