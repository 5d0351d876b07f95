// Runtime configuration
// Resolved once at startup and passed down; never mutated afterwards

use std::ffi::OsString;
use std::path::PathBuf;

use crate::state::storage::{self, StorageLayout, StorageResult};

/// Environment variable that points the catalog at a specific database file.
pub const DB_PATH_ENV: &str = "COFFEE_CATALOG_DB";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database file every store operation opens
    pub db_path: PathBuf,
    pub layout: StorageLayout,
}

impl AppConfig {
    /// Resolve configuration from command-line overrides and the process environment.
    ///
    /// An explicit path wins over [`DB_PATH_ENV`], which wins over the layout's
    /// own placement.
    pub fn resolve(
        db_override: Option<PathBuf>,
        layout: Option<StorageLayout>,
    ) -> StorageResult<Self> {
        Self::resolve_with_env(db_override, std::env::var_os(DB_PATH_ENV), layout)
    }

    pub fn resolve_with_env(
        db_override: Option<PathBuf>,
        env_path: Option<OsString>,
        layout: Option<StorageLayout>,
    ) -> StorageResult<Self> {
        let layout = layout.unwrap_or_else(StorageLayout::for_build);
        let env_path = env_path.filter(|p| !p.is_empty()).map(PathBuf::from);

        let db_path = match db_override.or(env_path) {
            Some(path) => path,
            None => storage::resolve_db_path(layout)?,
        };

        log::debug!(
            "Resolved {} layout database path {}",
            layout.name(),
            db_path.display()
        );

        Ok(Self { db_path, layout })
    }
}
