use crate::books::repository::BookRepository;
use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::utils::sqlite::build_connection;

pub async fn create_book_repository(config: &Configuration, store: RepositoryStore) -> LibraryResult<Box<dyn BookRepository>> {
    let conn = build_connection(store, config.db_path.as_str())?;
    Ok(Box::new(SqliteBookRepository::new(conn)?))
}
