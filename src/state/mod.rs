// State management module
// Handles SQLite persistence and database file placement

pub mod db;
pub mod models;
pub mod queries;
pub mod storage;

pub use db::{CatalogStore, DbError, DbResult};
pub use models::{CoffeeFields, CoffeeItem, GrindType, RoastDegree};
pub use storage::{resolve_db_path, StorageError, StorageLayout, StorageResult};
