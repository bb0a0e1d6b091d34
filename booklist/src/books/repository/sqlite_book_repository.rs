use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::sqlite::{create_table, table_exists};

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug)]
pub struct SqliteBookRepository {
    conn: Mutex<Connection>,
}

impl SqliteBookRepository {
    pub fn new(conn: Connection) -> LibraryResult<Self> {
        if !table_exists(&conn, "books")? {
            info!("creating books table");
            create_table(&conn, SCHEMA)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> LibraryResult<MutexGuard<'_, Connection>> {
        self.conn.lock()
            .map_err(|err| LibraryError::runtime(format!("books connection poisoned {}", err).as_str(), None))
    }
}

#[async_trait]
impl Repository<BookEntity> for SqliteBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO books (title, author, rating) VALUES (?1, ?2, ?3)",
            params![entity.title, entity.author, entity.rating],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE books SET title = ?1, author = ?2, rating = ?3 WHERE id = ?4",
            params![entity.title, entity.author, entity.rating, entity.id],
        )?;
        if updated == 0 {
            return Err(LibraryError::not_found(format!("book not found for {}", entity.id).as_str()));
        }
        Ok(updated)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, title, author, rating FROM books WHERE id = ?1",
            params![id],
            map_to_book,
        )
            .optional()?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let conn = self.lock()?;
        Ok(conn.execute("DELETE FROM books WHERE id = ?1", params![id])?)
    }

    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, author, rating FROM books ORDER BY author ASC, title ASC, id ASC")?;
        let rows = stmt.query_map([], map_to_book)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn count(&self) -> LibraryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn map_to_book(row: &Row<'_>) -> rusqlite::Result<BookEntity> {
    Ok(BookEntity {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        rating: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::sqlite::build_connection;

    fn build_repo() -> SqliteBookRepository {
        let conn = build_connection(RepositoryStore::InMemorySqlite, "").expect("should open");
        SqliteBookRepository::new(conn).expect("should create repository")
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = build_repo();
        let book = BookEntity::new("Harry Potter", "Rowling, J. K.", 9.3);
        let id = books_repo.create(&book).await.expect("should create book");
        assert!(id > 0);

        let loaded = books_repo.get(id).await.expect("should return book");
        assert_eq!(id, loaded.id);
        assert_eq!(book.title, loaded.title);
        assert_eq!(book.author, loaded.author);
        assert_eq!(book.rating, loaded.rating);
    }

    #[tokio::test]
    async fn test_should_assign_unique_ids() {
        let books_repo = build_repo();
        let first = books_repo.create(&BookEntity::new("a", "b", 1.0)).await.expect("should create book");
        let second = books_repo.create(&BookEntity::new("a", "b", 1.0)).await.expect("should create book");
        assert_ne!(first, second);
        assert_eq!(2, books_repo.count().await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = build_repo();
        let mut book = BookEntity::new("Harry Potter", "Rowling, J. K.", 9.3);
        book.id = books_repo.create(&book).await.expect("should create book");

        book.title = "Harry Potter and the Goblet of Fire".to_string();
        book.rating = 8.1;
        let size = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.id).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_not_update_missing_books() {
        let books_repo = build_repo();
        let mut book = BookEntity::new("Ghost", "Nobody", 1.0);
        book.id = 404;
        let res = books_repo.update(&book).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        assert_eq!(0, books_repo.count().await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_list_books_by_author_then_title() {
        let books_repo = build_repo();
        books_repo.create(&BookEntity::new("Slaughterhouse Five", "Vonnegut, Kurt", 10.0)).await.expect("should create book");
        books_repo.create(&BookEntity::new("Harry Potter", "Rowling, J. K.", 9.3)).await.expect("should create book");
        books_repo.create(&BookEntity::new("Cat's Cradle", "Vonnegut, Kurt", 8.0)).await.expect("should create book");

        let books = books_repo.list_all().await.expect("should list books");
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["Harry Potter", "Cat's Cradle", "Slaughterhouse Five"], titles);
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = build_repo();
        let id = books_repo.create(&BookEntity::new("Dune", "Herbert, Frank", 8.5)).await.expect("should create book");

        let deleted = books_repo.delete(id).await.expect("should delete book");
        assert_eq!(1, deleted);

        let loaded = books_repo.get(id).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { .. })));

        let deleted = books_repo.delete(id).await.expect("should ignore missing book");
        assert_eq!(0, deleted);
    }

    #[tokio::test]
    async fn test_should_persist_books_in_file() {
        let tmp = TempDir::new().expect("tmp");
        let db_path = tmp.path().join("books.db");
        let id = {
            let conn = build_connection(RepositoryStore::Sqlite, &db_path).expect("should open");
            let books_repo = SqliteBookRepository::new(conn).expect("should create repository");
            books_repo.create(&BookEntity::new("Dune", "Herbert, Frank", 8.5)).await.expect("should create book")
        };

        let conn = build_connection(RepositoryStore::Sqlite, &db_path).expect("should reopen");
        let books_repo = SqliteBookRepository::new(conn).expect("should create repository");
        let loaded = books_repo.get(id).await.expect("should return book");
        assert_eq!("Dune", loaded.title.as_str());
    }
}
