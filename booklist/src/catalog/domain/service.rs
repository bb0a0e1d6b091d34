use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::form::check_book;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

pub struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    snapshot: RwLock<Vec<BookDto>>,
}

impl CatalogServiceImpl {
    pub fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
            snapshot: RwLock::new(vec![]),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_books(&self) -> Vec<BookDto> {
        self.snapshot.read().await.clone()
    }

    // the snapshot is rebuilt from the store as a whole, never patched
    async fn refresh_books(&self) -> LibraryResult<Vec<BookDto>> {
        let mut books: Vec<BookDto> = self.book_repository.list_all().await?
            .iter().map(BookDto::from).collect();
        books.sort_by(|a, b| a.author.cmp(&b.author).then_with(|| a.title.cmp(&b.title)));
        debug!("refreshed catalog with {} books", books.len());
        *self.snapshot.write().await = books.clone();
        Ok(books)
    }

    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let book = check_book(book)?;
        let id = self.book_repository.create(&BookEntity::from(&book)).await
            .map_err(|err| write_failed("add", err))?;
        let added = book.with_id(id);
        info!("added book {} {:?} by {:?}", added.id, added.title, added.author);
        self.refresh_books().await?;
        Ok(added)
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let book = check_book(book)?;
        let _ = self.book_repository.update(&BookEntity::from(&book)).await
            .map_err(|err| write_failed("update", err))?;
        info!("updated book {} {:?} by {:?}", book.id, book.title, book.author);
        self.refresh_books().await?;
        Ok(book)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let removed = self.book_repository.delete(id).await
            .map_err(|err| write_failed("remove", err))?;
        if removed == 0 {
            debug!("no book {} to remove", id);
        } else {
            info!("removed book {}", id);
        }
        self.refresh_books().await?;
        Ok(())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }
}

// a failed write leaves the snapshot as it was
fn write_failed(action: &str, err: LibraryError) -> LibraryError {
    match err {
        LibraryError::NotFound { .. } | LibraryError::Validation { .. } => {}
        _ if err.retryable() => warn!("{} book failed, store busy {}", action, err),
        _ => error!("{} book failed {}", action, err),
    }
    err
}
