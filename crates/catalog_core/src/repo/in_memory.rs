//! In-memory reference repository.
//!
//! # Responsibility
//! - Implement the CRUD contract over a process-local `Vec`.
//! - Run the filter/sort/paginate pipeline for concrete searchable stores.
//!
//! # Invariants
//! - `find_all` returns items in insertion order.
//! - No internal locking: one writer at a time, enforced by `&mut self`.
//! - Operations complete without suspending.

use crate::model::entity::Entity;
use crate::repo::repository::{NotFoundError, RepoResult, Repository};
use crate::repo::search::{
    apply_filter, apply_pagination, apply_sort, Comparator, SearchParams, SearchResult,
    SortDirection,
};
use async_trait::async_trait;
use log::debug;

#[derive(Debug, Clone)]
pub struct InMemoryRepository<E> {
    items: Vec<E>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, keeping the given order.
    pub fn with_items(items: Vec<E>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Runs filter, then sort, then paginate over borrowed items.
    ///
    /// `total` is the filtered count before pagination. Only the returned
    /// page is cloned.
    pub fn search_with<F>(
        &self,
        params: &SearchParams<F>,
        matches: impl Fn(&E, &F) -> bool,
        order: (Comparator<E>, SortDirection),
    ) -> SearchResult<E> {
        let filtered = apply_filter(
            self.items.iter().collect::<Vec<&E>>(),
            params.filter(),
            |item: &&E, filter: &F| matches(*item, filter),
        );
        let total = filtered.len();
        let (compare, direction) = order;
        let sorted = apply_sort(filtered, |a: &&E, b: &&E| compare(*a, *b), direction);
        let page: Vec<E> = apply_pagination(sorted, params.page(), params.per_page())
            .into_iter()
            .cloned()
            .collect();

        debug!(
            "event=repo_search module=repo status=ok store=memory entity={} page={} per_page={} total={total}",
            E::KIND,
            params.page(),
            params.per_page()
        );
        SearchResult::new(page, total, params.page(), params.per_page())
    }

    fn position(&self, id: &E::Id) -> Option<usize> {
        self.items.iter().position(|item| item.entity_id() == id)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn insert(&mut self, entity: &E) -> RepoResult<()> {
        self.items.push(entity.clone());
        debug!(
            "event=repo_insert module=repo status=ok store=memory entity={} id={}",
            E::KIND,
            entity.entity_id()
        );
        Ok(())
    }

    async fn bulk_insert(&mut self, entities: &[E]) -> RepoResult<()> {
        self.items.extend_from_slice(entities);
        debug!(
            "event=repo_bulk_insert module=repo status=ok store=memory entity={} count={}",
            E::KIND,
            entities.len()
        );
        Ok(())
    }

    async fn update(&mut self, entity: &E) -> RepoResult<()> {
        let id = entity.entity_id();
        let index = self
            .position(id)
            .ok_or_else(|| NotFoundError::for_entity::<E>(id))?;
        self.items[index] = entity.clone();
        Ok(())
    }

    async fn delete(&mut self, id: &E::Id) -> RepoResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| NotFoundError::for_entity::<E>(id))?;
        self.items.remove(index);
        Ok(())
    }

    async fn find_by_id(&self, id: &E::Id) -> RepoResult<Option<E>> {
        Ok(self
            .items
            .iter()
            .find(|item| item.entity_id() == id)
            .cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<E>> {
        Ok(self.items.clone())
    }
}
