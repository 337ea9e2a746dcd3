//! Repository contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD and search contracts every aggregate uses.
//! - Provide the in-memory reference store and the SQLite store.
//! - Keep the filter/sort/paginate pipeline reusable across stores.
//!
//! # Invariants
//! - `update`/`delete` on an absent id fail with `NotFoundError`.
//! - `find_by_id` reports absence as `None`, never as an error.
//! - `SearchResult::total` counts matches after filtering, before pagination.

pub mod category_record;
pub mod category_repo;
pub mod in_memory;
pub mod repository;
pub mod search;
pub mod sqlite_category_repo;
