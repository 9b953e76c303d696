//! `flatdb` command-line front end.
//!
//! Every invocation loads the data file, runs one command and saves again
//! when the command changed the table.
//!
//! ```bash
//! flatdb create id name age
//! flatdb insert 1 alice 30
//! flatdb search --column 1 alise
//! flatdb sort --column 2 --desc
//! flatdb analyze --column 2
//! flatdb show
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use flatdb::{SortDirection, StoreConfig, StoreError, TableStore};

/// Single-table flat-file database
#[derive(Parser, Debug)]
#[command(name = "flatdb", version)]
struct Args {
    /// Data file (defaults to the config value, then `database.txt`)
    #[arg(short, long, env = "FLATDB_FILE", value_name = "FILE")]
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Define the table columns; the first column is the primary key
    Create {
        #[arg(required = true, allow_negative_numbers = true)]
        columns: Vec<String>,
        /// Replace a table that already holds rows
        #[arg(long)]
        force: bool,
    },
    /// Insert one row, one value per column
    Insert {
        #[arg(required = true, allow_negative_numbers = true)]
        cells: Vec<String>,
    },
    /// Print every row
    Show,
    /// Approximate search on one column
    Search {
        #[arg(short, long)]
        column: usize,
        #[arg(allow_negative_numbers = true)]
        keyword: String,
    },
    /// Sort the table on one column and save it
    Sort {
        #[arg(short, long)]
        column: usize,
        /// Descending order
        #[arg(long)]
        desc: bool,
    },
    /// Count, sum, average, max and min of one column
    Analyze {
        #[arg(short, long)]
        column: usize,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("flatdb=debug")
        } else {
            EnvFilter::new("flatdb=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<StoreConfig> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    if let Some(file) = &args.file {
        config.data_file = file.clone();
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    info!(data_file = %config.data_file.display(), "using data file");
    let mut store = TableStore::with_config(config);

    match args.command {
        Command::Create { columns, force } => {
            open_if_present(&mut store)?;
            if store.has_rows() && !force {
                bail!(
                    "{} already holds {} rows; pass --force to replace them",
                    store.data_file().display(),
                    store.row_count()
                );
            }
            store.create_schema(columns)?;
            store.save()?;
            println!("table created in {}", store.data_file().display());
        }
        Command::Insert { cells } => {
            open(&mut store)?;
            let idx = store.insert_row(cells)?;
            store.save()?;
            println!("inserted row {idx}");
        }
        Command::Show => {
            open(&mut store)?;
            println!("{}", store.display_all()?);
        }
        Command::Search { column, keyword } => {
            open(&mut store)?;
            let results = store.fuzzy_search(column, &keyword)?;
            println!("{} matches", results.len());
            for result in results {
                if let Some(row) = store.row(result.row_index) {
                    println!("{} (distance {})", row.join(" "), result.distance);
                }
            }
        }
        Command::Sort { column, desc } => {
            open(&mut store)?;
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            store.sort_table(column, direction)?;
            store.save()?;
            println!("sorted {} rows", store.row_count());
        }
        Command::Analyze { column } => {
            open(&mut store)?;
            println!("{}", store.analyze_column(column)?);
        }
    }
    Ok(())
}

/// Loads the data file, which must exist.
fn open(store: &mut TableStore) -> Result<()> {
    let summary = store
        .load()
        .context("run `flatdb create` first or pass --file")?;
    info!(columns = summary.columns, rows = summary.rows, "loaded");
    Ok(())
}

/// Loads the data file if there is one.
fn open_if_present(store: &mut TableStore) -> Result<()> {
    match store.load() {
        Ok(_) | Err(StoreError::FileNotFound { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
