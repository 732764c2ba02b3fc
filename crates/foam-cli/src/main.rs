//! foam-cli
//!
//! Command-line tool for inspecting CFD monitoring `.dat` and `.xy` tables.

use clap::{Parser, Subcommand};
use foam_core::{count_columns, header_boundary, infer_names, load, LoadOptions, Table};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "foam-cli")]
#[command(about = "CFD monitoring table inspector", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a .dat/.xy file (or a directory of .dat files) and print it
    Load {
        /// File or directory to load
        path: PathBuf,

        /// Data-column positions to keep (comma-separated, 1-based)
        #[arg(short, long, value_delimiter = ',')]
        usecols: Vec<usize>,

        /// Keep only every Nth data row
        #[arg(short = 'n', long)]
        use_nth: Option<usize>,

        /// JSON file with load options; flags take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Print the whole table as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Count the columns on one line of a file
    Columns {
        /// Path to the data file
        path: PathBuf,

        /// Column separator
        #[arg(long, default_value_t = '\t')]
        sep: char,

        /// Line to inspect (1-based)
        #[arg(long, default_value_t = 1)]
        line: usize,
    },

    /// Show the column names inferred for a file stem
    Names {
        /// File stem, fields joined by '_'
        stem: String,

        /// Number of columns in the file
        count: usize,
    },

    /// Show where the comment header of a .dat file ends
    Header {
        /// Path to the .dat file
        path: PathBuf,

        /// Comment marker
        #[arg(long, default_value = "#")]
        marker: String,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("foam_core={level},foam_cli={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(command: Commands) -> foam_core::Result<()> {
    match command {
        Commands::Load {
            path,
            usecols,
            use_nth,
            config,
            limit,
            json,
        } => {
            let options = load_options(config.as_deref(), usecols, use_nth)?;
            cmd_load(&path, &options, limit, json)
        }
        Commands::Columns { path, sep, line } => cmd_columns(&path, sep, line),
        Commands::Names { stem, count } => cmd_names(&stem, count),
        Commands::Header { path, marker } => cmd_header(&path, &marker),
    }
}

fn load_options(
    config: Option<&Path>,
    usecols: Vec<usize>,
    use_nth: Option<usize>,
) -> foam_core::Result<LoadOptions> {
    let mut options = match config {
        Some(path) => LoadOptions::load(path)?,
        None => LoadOptions::new(),
    };

    if !usecols.is_empty() {
        options.usecols = Some(usecols);
    }
    if use_nth.is_some() {
        options.use_nth = use_nth;
    }

    debug!("Load options: {:?}", options);
    Ok(options)
}

fn cmd_load(path: &Path, options: &LoadOptions, limit: usize, json: bool) -> foam_core::Result<()> {
    let table = load(path, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Source: {}", path.display());
    println!("Files: {}", table.sources.len());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();
    print_table(&table, limit);

    Ok(())
}

fn print_table(table: &Table, limit: usize) {
    // Print header
    let mut header = vec![table.index.name.as_str()];
    header.extend(table.column_names());
    println!("{}", header.join("\t"));
    println!("{}", "-".repeat(header.len() * 12));

    // Print rows
    for row in (0..table.row_count()).filter_map(|r| table.row(r)).take(limit) {
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", values.join("\t"));
    }

    if table.row_count() > limit {
        println!("... ({} more rows)", table.row_count() - limit);
    }
}

fn cmd_columns(path: &Path, sep: char, line: usize) -> foam_core::Result<()> {
    let count = count_columns(path, sep, line)?;
    println!("{}", count);
    Ok(())
}

fn cmd_names(stem: &str, count: usize) -> foam_core::Result<()> {
    for name in infer_names(stem, count)? {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_header(path: &Path, marker: &str) -> foam_core::Result<()> {
    let boundary = header_boundary(path, marker)?;
    println!("Column names on line {} (0-based)", boundary);
    Ok(())
}
