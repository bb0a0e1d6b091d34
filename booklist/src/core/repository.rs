use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity and return the id assigned by the store
    async fn create(&self, entity: &Entity) -> LibraryResult<i64>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity, returns number of removed rows
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // all entities in the store's natural listing order
    async fn list_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    Sqlite,
    InMemorySqlite,
}
