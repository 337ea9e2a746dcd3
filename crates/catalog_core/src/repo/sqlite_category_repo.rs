//! SQLite-backed Category repository.
//!
//! # Responsibility
//! - Implement the Category repository contract over the `categories` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Missing rows on update/delete surface as `NotFoundError`.
//! - `name` sorts with `COLLATE BINARY`, matching the in-memory store.
//! - Ties fall back to insertion order (`rowid ASC`) in both directions.
//! - The filter folds case with Rust's Unicode lowercase on both sides of
//!   `LIKE`, matching the in-memory predicate.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::category::{Category, CategoryId};
use crate::model::entity::Entity;
use crate::repo::category_record::{from_record, to_record, CategoryRecord};
use crate::repo::category_repo::{
    CategoryFilter, CategorySearchParams, CategorySearchResult, CATEGORY_SORTABLE_FIELDS,
};
use crate::repo::repository::{
    NotFoundError, RepoError, RepoResult, Repository, SearchableRepository,
};
use crate::repo::search::SortDirection;
use async_trait::async_trait;
use log::debug;
use rusqlite::types::Value;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Mutex, MutexGuard};

const CATEGORY_SELECT_SQL: &str = "SELECT
    category_id,
    name,
    description,
    is_active,
    created_at
FROM categories";

const INSERT_SQL: &str = "INSERT INTO categories (
    category_id,
    name,
    description,
    is_active,
    created_at
) VALUES (?1, ?2, ?3, ?4, ?5);";

/// SQLite Category store owning one connection.
///
/// The connection sits behind a `Mutex` so shared reads are `Sync`; the lock
/// is held only for the duration of one statement batch.
pub struct SqliteCategoryRepository {
    conn: Mutex<Connection>,
}

impl SqliteCategoryRepository {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `DbError::UninitializedConnection` when migrations were not applied.
    /// - `DbError::MissingRequiredTable` when `categories` is absent.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(&conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(DbError::UninitializedConnection {
                expected_version,
                actual_version,
            }
            .into());
        }
        if !table_exists(&conn, "categories")? {
            return Err(DbError::MissingRequiredTable("categories").into());
        }
        register_lower_unicode(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Returns the underlying connection.
    pub fn into_inner(self) -> RepoResult<Connection> {
        self.conn
            .into_inner()
            .map_err(|_| RepoError::Db(DbError::LockPoisoned))
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::Db(DbError::LockPoisoned))
    }

    fn conn_mut(&mut self) -> RepoResult<&mut Connection> {
        self.conn
            .get_mut()
            .map_err(|_| RepoError::Db(DbError::LockPoisoned))
    }

    fn search_blocking(&self, query: &CategorySearchParams) -> RepoResult<CategorySearchResult> {
        let conn = self.conn()?;

        let mut where_sql = String::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(filter) = query.filter() {
            where_sql.push_str(" WHERE lower_unicode(name) LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(format!(
                "%{}%",
                escape_like(&filter.to_lowercase())
            )));
        }

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM categories{where_sql};"),
            params_from_iter(bind_values.iter()),
            |row| row.get(0),
        )?;

        let per_page = i64::from(query.per_page());
        let mut items = Vec::new();
        // Offsets past `i64::MAX` cannot match a row.
        if let Some(offset) = i64::from(query.page() - 1).checked_mul(per_page) {
            let sql = format!(
                "{CATEGORY_SELECT_SQL}{where_sql} ORDER BY {}, rowid ASC LIMIT ? OFFSET ?;",
                order_by_clause(query.sort(), query.sort_dir())
            );
            bind_values.push(Value::Integer(per_page));
            bind_values.push(Value::Integer(offset));

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            while let Some(row) = rows.next()? {
                items.push(from_record(parse_category_row(row)?)?);
            }
        }

        let total = usize::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{total}`")))?;
        debug!(
            "event=repo_search module=repo status=ok store=sqlite entity={} page={} per_page={} total={total}",
            Category::KIND,
            query.page(),
            query.per_page()
        );
        Ok(CategorySearchResult::new(
            items,
            total,
            query.page(),
            query.per_page(),
        ))
    }
}

#[async_trait]
impl Repository<Category> for SqliteCategoryRepository {
    async fn insert(&mut self, entity: &Category) -> RepoResult<()> {
        let record = to_record(entity);
        self.conn_mut()?.execute(
            INSERT_SQL,
            params![
                record.category_id,
                record.name,
                record.description,
                bool_to_int(record.is_active),
                record.created_at,
            ],
        )?;
        debug!(
            "event=repo_insert module=repo status=ok store=sqlite entity={} id={}",
            Category::KIND,
            record.category_id
        );
        Ok(())
    }

    async fn bulk_insert(&mut self, entities: &[Category]) -> RepoResult<()> {
        let tx = self.conn_mut()?.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for entity in entities {
                let record = to_record(entity);
                stmt.execute(params![
                    record.category_id,
                    record.name,
                    record.description,
                    bool_to_int(record.is_active),
                    record.created_at,
                ])?;
            }
        }
        tx.commit()?;
        debug!(
            "event=repo_bulk_insert module=repo status=ok store=sqlite entity={} count={}",
            Category::KIND,
            entities.len()
        );
        Ok(())
    }

    async fn update(&mut self, entity: &Category) -> RepoResult<()> {
        let record = to_record(entity);
        let changed = self.conn_mut()?.execute(
            "UPDATE categories
             SET
                name = ?2,
                description = ?3,
                is_active = ?4,
                created_at = ?5
             WHERE category_id = ?1;",
            params![
                record.category_id,
                record.name,
                record.description,
                bool_to_int(record.is_active),
                record.created_at,
            ],
        )?;

        if changed == 0 {
            return Err(NotFoundError::for_entity::<Category>(entity.category_id()).into());
        }
        Ok(())
    }

    async fn delete(&mut self, id: &CategoryId) -> RepoResult<()> {
        let changed = self
            .conn_mut()?
            .execute("DELETE FROM categories WHERE category_id = ?1;", [id.as_str()])?;

        if changed == 0 {
            return Err(NotFoundError::for_entity::<Category>(id).into());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> RepoResult<Option<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} WHERE category_id = ?1;"))?;
        let mut rows = stmt.query([id.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(from_record(parse_category_row(row)?)?));
        }
        Ok(None)
    }

    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(from_record(parse_category_row(row)?)?);
        }
        Ok(categories)
    }
}

#[async_trait]
impl SearchableRepository<Category> for SqliteCategoryRepository {
    type Filter = CategoryFilter;

    fn sortable_fields(&self) -> &'static [&'static str] {
        CATEGORY_SORTABLE_FIELDS
    }

    async fn search(&self, params: &CategorySearchParams) -> RepoResult<CategorySearchResult> {
        self.search_blocking(params)
    }
}

fn order_by_clause(sort: Option<&str>, direction: SortDirection) -> String {
    let dir = match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    match sort.filter(|field| CATEGORY_SORTABLE_FIELDS.contains(field)) {
        Some("name") => format!("name COLLATE BINARY {dir}"),
        Some("created_at") => format!("created_at {dir}"),
        _ => "created_at DESC".to_string(),
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<CategoryRecord> {
    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in categories.is_active"
            )));
        }
    };

    Ok(CategoryRecord {
        category_id: row.get("category_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        is_active,
        created_at: row.get("created_at")?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Registers `lower_unicode(text)`; SQLite's built-in `lower` is ASCII-only.
fn register_lower_unicode(conn: &Connection) -> RepoResult<()> {
    conn.create_scalar_function(
        "lower_unicode",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

#[cfg(test)]
mod tests {
    use super::{escape_like, order_by_clause};
    use crate::repo::search::SortDirection;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn order_by_uses_allow_list() {
        assert_eq!(
            order_by_clause(Some("name"), SortDirection::Desc),
            "name COLLATE BINARY DESC"
        );
        assert_eq!(
            order_by_clause(Some("created_at"), SortDirection::Asc),
            "created_at ASC"
        );
        assert_eq!(
            order_by_clause(Some("description"), SortDirection::Asc),
            "created_at DESC"
        );
        assert_eq!(order_by_clause(None, SortDirection::Asc), "created_at DESC");
    }
}
