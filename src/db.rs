use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

use crate::constants::EXPECTED_DB_VERSION;
use crate::queries::{ddl, metadata};

pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Open a file-based database pool for production use
/// Enables WAL mode and foreign keys, creating the file if needed
pub async fn open_database_pool(db_path: impl AsRef<Path>) -> Result<SqlitePool, DynError> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create tables and indexes, and record the schema version if absent.
/// Safe to run on every startup, all statements are IF NOT EXISTS.
pub async fn init_database_schema(pool: &SqlitePool) -> Result<(), DynError> {
    for sql in [
        ddl::create_metadata_table(),
        ddl::create_pieces_table(),
        ddl::create_exercises_table(),
        ddl::create_training_sessions_table(),
        ddl::create_session_exercises_table(),
        ddl::create_session_new_pieces_table(),
        ddl::create_session_repertoire_pieces_table(),
        ddl::create_session_exercises_index(),
        ddl::create_session_new_pieces_index(),
        ddl::create_session_repertoire_pieces_index(),
        ddl::create_training_sessions_date_index(),
    ] {
        sqlx::query(&sql).execute(pool).await?;
    }

    let sql = metadata::insert_if_absent("version", EXPECTED_DB_VERSION);
    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}

/// Read the schema version recorded in the metadata table
pub async fn query_schema_version(pool: &SqlitePool) -> Result<Option<String>, DynError> {
    let sql = metadata::select_by_key("version");
    let row = sqlx::query(&sql).fetch_optional(pool).await?;
    Ok(row.map(|r| r.get(0)))
}

/// Verify the database was written by a compatible binary
pub async fn check_schema_version(pool: &SqlitePool) -> Result<(), DynError> {
    match query_schema_version(pool).await? {
        Some(version) if version == EXPECTED_DB_VERSION => Ok(()),
        Some(version) => Err(format!(
            "Unsupported database version: '{}'. This application only supports version '{}'",
            version, EXPECTED_DB_VERSION
        )
        .into()),
        None => Err("Database has no version record, run `init` first".into()),
    }
}

/// Create an in-memory database pool for testing.
/// Pinned to a single long-lived connection, since an in-memory database
/// disappears with the connection that owns it.
pub async fn create_test_pool_in_memory() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse in-memory connection string")
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory database")
}
