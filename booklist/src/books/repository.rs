pub mod sqlite_book_repository;
#[cfg(test)]
pub(crate) mod failing_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    async fn count(&self) -> LibraryResult<usize>;
}
