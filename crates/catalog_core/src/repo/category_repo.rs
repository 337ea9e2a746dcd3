//! Category repository contract and in-memory search policy.
//!
//! # Responsibility
//! - Name the repository shape every Category store implements.
//! - Supply the allow-listed sort comparators and the filter predicate.
//!
//! # Invariants
//! - Only `name` and `created_at` are sortable; anything else sorts by
//!   `created_at` descending.
//! - `name` sorts case-sensitively (binary order), in every store.
//! - The filter is a case-insensitive substring match on `name`.

use crate::model::category::Category;
use crate::repo::in_memory::InMemoryRepository;
use crate::repo::repository::{RepoResult, SearchableRepository};
use crate::repo::search::{
    resolve_sort, text_or_number_matches, Comparator, SearchParams, SearchResult, SortDirection,
};
use async_trait::async_trait;
use std::cmp::Ordering;

pub type CategoryFilter = String;
pub type CategorySearchParams = SearchParams<CategoryFilter>;
pub type CategorySearchResult = SearchResult<Category>;
pub type CategoryInMemoryRepository = InMemoryRepository<Category>;

pub const CATEGORY_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Any searchable Category store.
pub trait CategoryRepository: SearchableRepository<Category, Filter = CategoryFilter> {}

impl<T> CategoryRepository for T where T: SearchableRepository<Category, Filter = CategoryFilter> {}

/// Ascending comparator for an allow-listed field.
pub fn category_comparator(field: &str) -> Option<Comparator<Category>> {
    match field {
        "name" => Some(by_name as Comparator<Category>),
        "created_at" => Some(by_created_at as Comparator<Category>),
        _ => None,
    }
}

/// Category filter predicate shared by in-process stores.
pub fn category_matches(category: &Category, filter: &str) -> bool {
    text_or_number_matches(category.name(), None, filter)
}

fn by_name(a: &Category, b: &Category) -> Ordering {
    a.name().cmp(b.name())
}

fn by_created_at(a: &Category, b: &Category) -> Ordering {
    a.created_at().cmp(&b.created_at())
}

#[async_trait]
impl SearchableRepository<Category> for InMemoryRepository<Category> {
    type Filter = CategoryFilter;

    fn sortable_fields(&self) -> &'static [&'static str] {
        CATEGORY_SORTABLE_FIELDS
    }

    async fn search(&self, params: &CategorySearchParams) -> RepoResult<CategorySearchResult> {
        let order = resolve_sort(
            params.sort(),
            params.sort_dir(),
            CATEGORY_SORTABLE_FIELDS,
            category_comparator,
            (by_created_at as Comparator<Category>, SortDirection::Desc),
        );
        Ok(self.search_with(
            params,
            |category, filter: &CategoryFilter| category_matches(category, filter),
            order,
        ))
    }
}
