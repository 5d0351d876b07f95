// Database file placement
// Resolves where the catalog file lives and seeds a writable copy on first bundled launch

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the catalog database, both in development and beside a bundle.
pub const DB_FILE_NAME: &str = "coffee.sqlite";

/// Directory beside the executable that ships the initial database.
pub const SEED_DIR_NAME: &str = "resources";

const APP_DIR_NAME: &str = "coffee-catalog";
const PROBE_FILE_NAME: &str = ".coffee-catalog-write-probe";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to get app data directory")]
    NoAppDataDir,
    #[error("Failed to locate the executable directory")]
    NoExecutableDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Where the database file is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageLayout {
    /// Fixed relative path in the working directory
    Development,
    /// Writable copy beside the distributed executable
    Bundled,
}

impl StorageLayout {
    /// Debug builds run from a checkout, release builds are distributed.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            StorageLayout::Development
        } else {
            StorageLayout::Bundled
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageLayout::Development => "development",
            StorageLayout::Bundled => "bundled",
        }
    }
}

/// Resolve the database path for a layout.
///
/// Bundled builds place the database beside the executable, falling back to the
/// per-user data directory when the executable directory is read-only.
pub fn resolve_db_path(layout: StorageLayout) -> StorageResult<PathBuf> {
    match layout {
        StorageLayout::Development => Ok(PathBuf::from(DB_FILE_NAME)),
        StorageLayout::Bundled => resolve_bundled(&get_executable_dir()?, get_app_data_dir),
    }
}

/// Pick the bundled database location: beside the executable in `exe_dir` when
/// that directory is writable, otherwise in the directory `fallback_dir`
/// returns. The seed always comes from the bundle in `exe_dir`.
pub fn resolve_bundled<F>(exe_dir: &Path, fallback_dir: F) -> StorageResult<PathBuf>
where
    F: FnOnce() -> StorageResult<PathBuf>,
{
    let target_dir = if is_dir_writable(exe_dir) {
        exe_dir.to_path_buf()
    } else {
        log::warn!(
            "Executable directory {} is not writable, using app data directory",
            exe_dir.display()
        );
        fallback_dir()?
    };
    prepare_bundled_db(exe_dir, &target_dir)
}

/// Return the writable database path in `target_dir`, copying the seed shipped
/// in `bundle_dir` there if no database exists yet. An existing database is
/// never overwritten.
pub fn prepare_bundled_db(bundle_dir: &Path, target_dir: &Path) -> StorageResult<PathBuf> {
    let target = target_dir.join(DB_FILE_NAME);
    if target.exists() {
        return Ok(target);
    }

    let seed = seed_path(bundle_dir);
    if seed.is_file() {
        fs::create_dir_all(target_dir)?;
        let bytes = fs::copy(&seed, &target)?;
        log::info!(
            "Seeded catalog database {} from {} ({} bytes)",
            target.display(),
            seed.display(),
            bytes
        );
    } else {
        log::debug!(
            "No seed database at {}, a fresh one will be created",
            seed.display()
        );
    }

    Ok(target)
}

/// Location of the initial database shipped with a bundle.
pub fn seed_path(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join(SEED_DIR_NAME).join(DB_FILE_NAME)
}

/// Get the app data directory for the catalog
pub fn get_app_data_dir() -> StorageResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoAppDataDir)?;
    let app_dir = data_dir.join(APP_DIR_NAME);
    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the directory containing the running executable
pub fn get_executable_dir() -> StorageResult<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or(StorageError::NoExecutableDir)
}

fn is_dir_writable(dir: &Path) -> bool {
    let probe = dir.join(PROBE_FILE_NAME);
    match OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        // A leftover probe from an interrupted run still proves the directory is writable
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => fs::remove_file(&probe).is_ok(),
        Err(_) => false,
    }
}
