use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;

// helper method to open a sqlite connection for the given store
pub fn build_connection(store: RepositoryStore, path: impl AsRef<Path>) -> LibraryResult<Connection> {
    match store {
        RepositoryStore::Sqlite => {
            let conn = Connection::open(path)?;
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            Ok(conn)
        }
        RepositoryStore::InMemorySqlite => {
            Ok(Connection::open_in_memory()?)
        }
    }
}

pub fn create_table(conn: &Connection, ddl: &str) -> LibraryResult<()> {
    conn.execute_batch(ddl)?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table_name: &str) -> LibraryResult<bool> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table_name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name.is_some())
}

pub fn setup_tracing(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        .try_init();
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::{build_connection, create_table, table_exists};

    #[tokio::test]
    async fn test_should_create_table_in_memory() {
        let conn = build_connection(RepositoryStore::InMemorySqlite, "").expect("should open");
        assert!(!table_exists(&conn, "shelves").expect("should query"));
        create_table(&conn, "CREATE TABLE IF NOT EXISTS shelves (id INTEGER PRIMARY KEY)").expect("should create");
        assert!(table_exists(&conn, "shelves").expect("should query"));
    }

    #[tokio::test]
    async fn test_should_open_file_store() {
        let tmp = TempDir::new().expect("tmp");
        let db_path = tmp.path().join("books.db");
        {
            let conn = build_connection(RepositoryStore::Sqlite, &db_path).expect("should open");
            create_table(&conn, "CREATE TABLE IF NOT EXISTS shelves (id INTEGER PRIMARY KEY)").expect("should create");
        }
        let conn = build_connection(RepositoryStore::Sqlite, &db_path).expect("should reopen");
        assert!(table_exists(&conn, "shelves").expect("should query"));
    }
}
