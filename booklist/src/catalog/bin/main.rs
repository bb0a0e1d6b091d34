use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use booklist::catalog::controller::router;
use booklist::catalog::factory::create_catalog_service;
use booklist::core::controller::AppState;
use booklist::core::domain::Configuration;
use booklist::core::repository::RepositoryStore;
use booklist::utils::sqlite::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Configuration::from_env("catalog");
    setup_tracing(config.tracing_level());

    let catalog = create_catalog_service(&config, RepositoryStore::Sqlite).await?;
    let state = AppState::new(Arc::from(catalog));
    let app = router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    info!("serving {} from {} on http://{}", config.app_name, config.db_path, addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
