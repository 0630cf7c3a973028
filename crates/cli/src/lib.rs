mod config;
mod discover;
mod logging;
mod normalize;
mod parse;
mod schema;

pub use config::{OutputArgs, RosettaConfig};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "rosetta",
    version,
    about = "Generic type references for Java API descriptions",
    long_about = "Rosetta parses Java type expressions, discovers classes from a host snapshot \
                  and writes them as JSON documents whose nested types can be pooled in a \
                  per-document type dictionary."
)]
pub struct Cli {
    /// Directory for rolling log files. Also read from ROSETTA_LOG_DIR.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a type expression and print its canonical form and payload
    Parse {
        /// Type expression, e.g. "java.util.Map<K, java.util.List<? extends V>>"
        #[arg(value_name = "EXPR")]
        expr: String,

        /// Fully qualified name that resolves as a concrete type (repeatable)
        #[arg(long = "known", value_name = "NAME")]
        known: Vec<String>,

        /// Write the full compiled form of structured types
        #[arg(long)]
        full: bool,
    },
    /// Describe classes from a snapshot as a document
    #[command(
        long_about = "Reads a JSON snapshot of host classes, discovers the requested classes \
                      (with their enclosing classes and, if configured, their supertypes) and \
                      writes the resulting document."
    )]
    Discover {
        /// JSON snapshot of host classes
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Fully qualified class names to discover. Defaults to every class of the snapshot.
        #[arg(value_name = "CLASS")]
        classes: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load a document and save it again with the given settings
    #[command(
        long_about = "Loads a saved document, validating every entry and type payload, and \
                      writes it back. Use this to switch dictionary modes or check a document."
    )]
    Normalize {
        /// Saved document
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the JSON schema of the snapshot format
    Schema,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Parse { .. } => "parse",
        Commands::Discover { .. } => "discover",
        Commands::Normalize { .. } => "normalize",
        Commands::Schema => "schema",
    };
    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| std::env::var_os(logging::LOG_DIR_ENV).map(PathBuf::from));
    let _guard = logging::init_logging(component, log_dir.as_deref());

    match cli.command {
        Commands::Parse { expr, known, full } => parse::run(&expr, &known, full),
        Commands::Discover {
            snapshot,
            classes,
            output,
        } => discover::run(&snapshot, &classes, &output),
        Commands::Normalize { document, output } => normalize::run(&document, &output),
        Commands::Schema => schema::run(),
    }
}

/// Pretty-prints `value` to `path`, or to stdout when no path is given.
fn write_json(value: &Value, path: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
