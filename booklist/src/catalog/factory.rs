use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::factory;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;

pub const SAMPLE_TITLE: &str = "Slaughterhouse Five";
pub const SAMPLE_AUTHOR: &str = "Vonnegut, Kurt";
pub const SAMPLE_RATING: f64 = 10.0;

pub async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> LibraryResult<Box<dyn CatalogService>> {
    let book_repo = factory::create_book_repository(config, store).await?;
    if config.seed_sample {
        seed_sample_book(&*book_repo).await?;
    }
    let svc = CatalogServiceImpl::new(config, book_repo);
    svc.refresh_books().await?;
    Ok(Box::new(svc))
}

// only an empty catalog receives the sample, so restarts never duplicate it
async fn seed_sample_book(book_repo: &dyn BookRepository) -> LibraryResult<()> {
    if book_repo.count().await? == 0 {
        let id = book_repo.create(&BookEntity::new(SAMPLE_TITLE, SAMPLE_AUTHOR, SAMPLE_RATING)).await?;
        info!("seeded sample book {}", id);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_config() -> Configuration {
    let mut config = Configuration::new("test");
    config.seed_sample = false;
    config
}

#[cfg(test)]
pub(crate) async fn test_catalog() -> std::sync::Arc<dyn CatalogService> {
    let svc = create_catalog_service(&test_config(), RepositoryStore::InMemorySqlite).await
        .expect("should create catalog");
    std::sync::Arc::from(svc)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use crate::catalog::factory::{create_catalog_service, test_config, SAMPLE_AUTHOR, SAMPLE_TITLE};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_start_empty_without_seed() {
        let svc = create_catalog_service(&test_config(), RepositoryStore::InMemorySqlite).await.expect("should create catalog");
        assert!(svc.list_books().await.is_empty());
    }

    #[tokio::test]
    async fn test_should_seed_sample_book_once() {
        let tmp = TempDir::new().expect("tmp");
        let mut config = test_config();
        config.db_path = tmp.path().join("books.db").to_string_lossy().to_string();
        config.seed_sample = true;

        let svc = create_catalog_service(&config, RepositoryStore::Sqlite).await.expect("should create catalog");
        let books = svc.list_books().await;
        assert_eq!(1, books.len());
        assert_eq!(SAMPLE_TITLE, books[0].title.as_str());
        assert_eq!(SAMPLE_AUTHOR, books[0].author.as_str());
        drop(svc);

        let svc = create_catalog_service(&config, RepositoryStore::Sqlite).await.expect("should reopen catalog");
        assert_eq!(1, svc.list_books().await.len());
    }
}
