use std::sync::Mutex;

use async_trait::async_trait;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

/// Book store whose writes land but are reported as failed, like a store
/// that loses the acknowledgement. Reads always succeed, so anything that
/// re-reads after a failed write would pick the change up.
pub(crate) struct FailingBookRepository {
    books: Mutex<Vec<BookEntity>>,
}

impl FailingBookRepository {
    pub(crate) fn with_books(books: &[(&str, &str, f64)]) -> Self {
        let books = books.iter().enumerate()
            .map(|(i, (title, author, rating))| {
                let mut book = BookEntity::new(title, author, *rating);
                book.id = i as i64 + 1;
                book
            })
            .collect();
        Self {
            books: Mutex::new(books),
        }
    }

    fn books(&self) -> LibraryResult<std::sync::MutexGuard<'_, Vec<BookEntity>>> {
        self.books.lock().map_err(|_| LibraryError::runtime("books poisoned", None))
    }

    fn unavailable() -> LibraryError {
        LibraryError::database("disk I/O error at /var/lib/books.db", Some("SystemIoFailure".to_string()), false)
    }
}

#[async_trait]
impl Repository<BookEntity> for FailingBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let mut books = self.books()?;
        let mut book = entity.clone();
        book.id = books.len() as i64 + 1;
        books.push(book);
        Err(Self::unavailable())
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books()?;
        if let Some(book) = books.iter_mut().find(|b| b.id == entity.id) {
            *book = entity.clone();
        }
        Err(Self::unavailable())
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.books()?.iter().find(|b| b.id == id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        self.books()?.retain(|b| b.id != id);
        Err(Self::unavailable())
    }

    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books()?.clone())
    }
}

#[async_trait]
impl BookRepository for FailingBookRepository {
    async fn count(&self) -> LibraryResult<usize> {
        Ok(self.books()?.len())
    }
}
