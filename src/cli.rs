//! Command-line definitions and dispatch for the coffee catalog

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::AppConfig;
use crate::presenter::{
    CatalogPresenter, CatalogView, CoffeeForm, CommandResult, EditOutcome, FormEdits, JsonView,
    TableView,
};
use crate::state::{CatalogStore, GrindType, RoastDegree, StorageLayout};

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Database placement
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    /// coffee.sqlite in the working directory
    Dev,
    /// coffee.sqlite beside the executable, seeded on first launch
    Bundled,
}

impl From<LayoutArg> for StorageLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Dev => StorageLayout::Development,
            LayoutArg::Bundled => StorageLayout::Bundled,
        }
    }
}

/// Output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Coffee catalog - inventory of coffee sorts backed by SQLite
#[derive(Parser)]
#[command(name = "coffee-catalog")]
#[command(about = "Coffee catalog inventory manager")]
#[command(version)]
pub struct Cli {
    /// Database file (overrides COFFEE_CATALOG_DB and --layout)
    #[arg(long = "db", global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Where to place the database when no path is given
    #[arg(long, global = true, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level requested on the command line, if any
    pub fn requested_log_level(&self) -> Option<log::LevelFilter> {
        if self.verbose {
            Some(log::LevelFilter::Debug)
        } else {
            self.log_level.map(LogLevel::to_level_filter)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create the catalog table if needed and print the database path
    Init,

    /// Show every coffee record
    List,

    /// Show one coffee record
    Show {
        /// Record id
        id: i64,
    },

    /// Add a coffee record
    Add {
        /// Sort name
        #[arg(long)]
        name: String,

        /// Roast degree (Light, Medium, Dark)
        #[arg(long)]
        degree: String,

        /// Grind type (Ground, Whole Bean)
        #[arg(long = "type")]
        coffee_type: String,

        /// Flavor description
        #[arg(long)]
        description: Option<String>,

        /// Price
        #[arg(long, allow_hyphen_values = true)]
        price: String,

        /// Package volume
        #[arg(long, allow_hyphen_values = true)]
        size: String,
    },

    /// Edit a coffee record; omitted fields keep their stored value
    Edit {
        /// Record id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        degree: Option<String>,

        #[arg(long = "type")]
        coffee_type: Option<String>,

        /// New description, empty to clear it
        #[arg(long)]
        description: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        size: Option<String>,
    },

    /// List the roast degrees and grind types the form accepts
    Choices,
}

/// Run a parsed command against an initialized store
pub fn dispatch(
    command: Commands,
    format: OutputFormat,
    store: &CatalogStore,
    config: &AppConfig,
) -> ExitCode {
    match command {
        Commands::Init => {
            println!("Catalog database ready at {}", config.db_path.display());
            ExitCode::SUCCESS
        }
        Commands::Choices => {
            let degrees: Vec<&str> = RoastDegree::ALL.iter().map(|d| d.label()).collect();
            let grinds: Vec<&str> = GrindType::ALL.iter().map(|g| g.label()).collect();
            println!("Roast degree: {}", degrees.join(", "));
            println!("Type: {}", grinds.join(", "));
            ExitCode::SUCCESS
        }
        Commands::List => execute(store, format, |p| p.refresh()),
        Commands::Show { id } => execute(store, format, |p| p.show_item(id).map(|_| ())),
        Commands::Add {
            name,
            degree,
            coffee_type,
            description,
            price,
            size,
        } => {
            let form = CoffeeForm {
                sort_name: name,
                degree,
                coffee_type,
                description: description.unwrap_or_default(),
                price,
                size,
            };
            execute(store, format, |p| p.open_add_form(form).map(|_| ()))
        }
        Commands::Edit {
            id,
            name,
            degree,
            coffee_type,
            description,
            price,
            size,
        } => {
            let edits = FormEdits {
                sort_name: name,
                degree,
                coffee_type,
                description,
                price,
                size,
            };
            execute(store, format, |p| {
                if p.open_edit_form(id, edits)? == EditOutcome::NotFound {
                    log::info!("Edit form closed without saving");
                }
                Ok(())
            })
        }
    }
}

fn make_view(format: OutputFormat) -> Box<dyn CatalogView> {
    match format {
        OutputFormat::Table => Box::new(TableView::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonView::new(std::io::stdout())),
    }
}

fn execute<F>(store: &CatalogStore, format: OutputFormat, action: F) -> ExitCode
where
    F: FnOnce(&mut CatalogPresenter<'_, Box<dyn CatalogView>>) -> CommandResult<()>,
{
    let mut presenter = CatalogPresenter::new(store, make_view(format));
    match action(&mut presenter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Command failed: {}", e.message());
            presenter.report_error(e.message());
            ExitCode::FAILURE
        }
    }
}
