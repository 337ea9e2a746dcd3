use catalog_core::db::migrations::{current_user_version, latest_version};
use catalog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "categories");
    assert_index_exists(&conn, "idx_categories_created_at");
    assert_index_exists(&conn, "idx_categories_name");
}

#[test]
fn reopening_a_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let first = open_db(&path).unwrap();
    assert_eq!(current_user_version(&first).unwrap(), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(current_user_version(&second).unwrap(), latest_version());
    assert_table_exists(&second, "categories");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn is_active_column_rejects_non_boolean_values() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO categories (category_id, name, is_active, created_at)
         VALUES ('8b5c9d2e-1f3a-4b6c-9d7e-0a1b2c3d4e5f', 'x', 2, 0);",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, name: &str) {
    assert!(sqlite_master_has(conn, "table", name), "table {name} does not exist");
}

fn assert_index_exists(conn: &Connection, name: &str) {
    assert!(sqlite_master_has(conn, "index", name), "index {name} does not exist");
}

fn sqlite_master_has(conn: &Connection, kind: &str, name: &str) -> bool {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    exists == 1
}
