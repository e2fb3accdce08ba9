//! StaffDB CLI
//!
//! Creates, lists and appends to StaffDB employee database files.
//!
//! # Usage
//!
//! ```text
//! staffdb -n -f employees.db                      # create a new database
//! staffdb -f employees.db -a "Ada,Main St,40"     # append an employee
//! staffdb -f employees.db -l                      # list employees
//! staffdb -f employees.db -l --format json
//! ```

mod commands;
mod error;

use clap::{Parser, ValueEnum};
use error::CliError;
use staffdb_core::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// StaffDB employee database tool.
#[derive(Parser, Debug)]
#[command(name = "staffdb")]
#[command(author, version, long_version = long_version(), about, long_about = None)]
struct Cli {
    /// Path to the database file
    #[arg(short, long, value_parser = non_empty_path)]
    file: PathBuf,

    /// Create a new database file (fails if the file exists)
    #[arg(short, long)]
    new: bool,

    /// Append an employee given as "name,address,hours"
    #[arg(short, long, value_name = "NAME,ADDRESS,HOURS")]
    add: Option<String>,

    /// List all employees
    #[arg(short, long)]
    list: bool,

    /// Listing format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Take an exclusive advisory lock on the file
    #[arg(long)]
    lock: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{}\nStaffDB Core v{}",
            env!("CARGO_PKG_VERSION"),
            staffdb_core::VERSION
        )
    })
}

/// How `--list` renders employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per employee
    Text,
    /// A JSON array
    Json,
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        Err("file path cannot be empty".to_string())
    } else {
        Ok(PathBuf::from(value))
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = Config::default()
        .lock(cli.lock)
        .read_only(!cli.new && cli.add.is_none());

    let mut db = commands::open::run(&cli.file, cli.new, config)?;

    if let Some(input) = &cli.add {
        commands::add::run(&mut db, input)?;
    }

    if cli.list {
        commands::list::run(&db, cli.format)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
