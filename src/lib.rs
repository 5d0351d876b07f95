// Coffee Catalog - inventory of coffee sorts backed by SQLite
// Module declarations

use clap::Parser;
use std::process::ExitCode;

pub mod cli;
pub mod config;
pub mod presenter;
pub mod state;

use cli::Cli;
use config::AppConfig;
use state::CatalogStore;

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    init_logging(cli.requested_log_level(), default_level);

    let layout = cli.layout.map(Into::into);
    let config = match AppConfig::resolve(cli.db.clone(), layout) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to resolve database location: {}", e);
            eprintln!("Error: failed to resolve database location: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // The catalog cannot run without a usable database file
    let store = CatalogStore::from_config(&config);
    if let Err(e) = store.ensure_schema() {
        log::error!("Failed to initialize database: {}", e);
        eprintln!(
            "Error: cannot open catalog database at {}: {}",
            config.db_path.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    log::info!(
        "Coffee catalog initialized at {} ({} layout)",
        store.path().display(),
        config.layout.name()
    );

    cli::dispatch(cli.command, cli.format, &store, &config)
}

/// Install the env_logger backend. An explicit level wins; otherwise RUST_LOG is
/// honored when set, falling back to `default_level`.
fn init_logging(requested: Option<log::LevelFilter>, default_level: log::LevelFilter) {
    let mut builder = env_logger::Builder::from_default_env();
    let level = requested
        .or_else(|| std::env::var_os("RUST_LOG").is_none().then_some(default_level));
    if let Some(level) = level {
        builder.filter_level(level);
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
