//! Category use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete entry points over any Category store.
//! - Translate raw ids into identifiers and validation notifications into
//!   `EntityValidationError`.
//!
//! # Invariants
//! - Malformed ids fail before any repository call.
//! - An entity with notification errors is never persisted.
//! - The service stays storage-agnostic.

use crate::model::category::{Category, CategoryId, CreateCategoryCommand};
use crate::model::validation::EntityValidationError;
use crate::repo::category_repo::{CategoryRepository, CategorySearchParams};
use crate::repo::repository::{NotFoundError, RepoResult};
use crate::repo::search::{SearchInput, SearchResult, DEFAULT_PER_PAGE};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

/// Input of [`CategoryService::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Patch-style input of [`CategoryService::update`].
///
/// `description: Some(None)` clears the description; `None` leaves it as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateCategoryInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub type ListCategoriesInput = SearchInput;

/// Read model returned by every category use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.category_id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

/// Page of outputs with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
}

impl<T> From<SearchResult<T>> for PaginationOutput<T> {
    fn from(result: SearchResult<T>) -> Self {
        let total = result.total();
        let current_page = result.current_page();
        let last_page = result.last_page();
        let per_page = result.per_page();
        Self {
            items: result.into_items(),
            total,
            current_page,
            last_page,
            per_page,
        }
    }
}

/// Use-case service over a Category repository.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
    default_per_page: u32,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Overrides the page size used when `list` input omits `per_page`.
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page.max(1);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Creates and persists a category.
    ///
    /// # Errors
    /// - `RepoError::Validation` with every field message when the input is invalid.
    pub async fn create(&mut self, input: CreateCategoryInput) -> RepoResult<CategoryOutput> {
        let category = Category::create(CreateCategoryCommand {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
        });
        ensure_valid(&category, "create")?;

        self.repo.insert(&category).await?;
        info!(
            "event=category_create module=service status=ok id={}",
            category.category_id()
        );
        Ok(CategoryOutput::from(&category))
    }

    /// # Errors
    /// - `RepoError::InvalidIdentifier` for a malformed id.
    /// - `RepoError::NotFound` when no category has that id.
    pub async fn get(&self, id: &str) -> RepoResult<CategoryOutput> {
        let id = CategoryId::parse(id)?;
        let category = self.load(&id).await?;
        Ok(CategoryOutput::from(&category))
    }

    /// Searches with loosely typed paging input.
    pub async fn list(
        &self,
        input: ListCategoriesInput,
    ) -> RepoResult<PaginationOutput<CategoryOutput>> {
        let params = CategorySearchParams::from_input(input, self.default_per_page);
        let result = self.repo.search(&params).await?;
        Ok(result.map(|category| CategoryOutput::from(&category)).into())
    }

    /// Applies a patch to an existing category.
    ///
    /// # Errors
    /// - `RepoError::InvalidIdentifier`, `RepoError::NotFound` as for `get`.
    /// - `RepoError::Validation` when the patched entity is invalid; nothing
    ///   is persisted in that case.
    pub async fn update(&mut self, input: UpdateCategoryInput) -> RepoResult<CategoryOutput> {
        let id = CategoryId::parse(input.id)?;
        let mut category = self.load(&id).await?;

        if let Some(name) = input.name {
            category.change_name(name);
        }
        if let Some(description) = input.description {
            category.change_description(description);
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }
        ensure_valid(&category, "update")?;

        self.repo.update(&category).await?;
        info!("event=category_update module=service status=ok id={id}");
        Ok(CategoryOutput::from(&category))
    }

    /// # Errors
    /// - `RepoError::InvalidIdentifier`, `RepoError::NotFound` as for `get`.
    pub async fn delete(&mut self, id: &str) -> RepoResult<()> {
        let id = CategoryId::parse(id)?;
        self.repo.delete(&id).await?;
        info!("event=category_delete module=service status=ok id={id}");
        Ok(())
    }

    async fn load(&self, id: &CategoryId) -> RepoResult<Category> {
        let category = self.repo.find_by_id(id).await?;
        category.ok_or_else(|| NotFoundError::for_entity::<Category>(id).into())
    }
}

fn ensure_valid(category: &Category, command: &str) -> Result<(), EntityValidationError> {
    EntityValidationError::ensure_valid(category).inspect_err(|err| {
        warn!(
            "event=category_{command} module=service status=error error_code=validation_failed fields={}",
            err.errors.len()
        );
    })
}

/// Distinguishes an explicit `null` from an absent field.
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
