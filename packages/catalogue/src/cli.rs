//! Command-line interface for the catalogue parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalogue::CatalogueParser;
use crate::config::CatalogueConfig;
use crate::error::{CatalogueError, Result};
use crate::source::open_source;
use crate::table::write_entries;

/// EiP Catalogue - Parse the Euclid-in-Print catalogue into an entry table.
#[derive(Parser)]
#[command(name = "eip-catalogue")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a catalogue document (.docx or .txt) and write a CSV table.
    Parse {
        /// Catalogue document
        input: PathBuf,

        /// Output CSV file (default: input file with .csv extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML file overriding vocabulary, region markers or languages
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extract entries in parallel
        #[arg(long)]
        parallel: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            config,
            parallel,
        } => parse_command(&input, output.as_deref(), config.as_deref(), parallel),
    }
}

/// Default output path: the input with a `.csv` extension.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Execute the parse command.
fn parse_command(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    parallel: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => CatalogueConfig::from_yaml_file(path)?,
        None => CatalogueConfig::default(),
    };

    let output_path = output.map_or_else(|| default_output(input), Path::to_path_buf);

    // Validate output directory before the (slow) parse
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.is_dir() {
            return Err(CatalogueError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", dir.display()),
            )));
        }
    }

    let source = open_source(input)?;

    println!(
        "{} {}",
        style("Parsing").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message("Loading language models...");
    let parser = match CatalogueParser::with_lingua(config) {
        Ok(parser) => parser.with_parallelism(parallel),
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Parsing entries...");
    let run = match parser.parse_source(source.as_ref()) {
        Ok(run) => run,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing table...");
    if let Err(e) = write_entries(&output_path, &run.entries) {
        pb.finish_and_clear();
        return Err(e);
    }

    pb.finish_and_clear();

    println!("  Entries: {}", style(run.entry_count()).green());
    if !run.skipped.is_empty() {
        println!("  Skipped: {}", style(run.skipped_count()).yellow().bold());
        for skipped in &run.skipped {
            println!(
                "    {} {}",
                style(skipped.header_text()).yellow(),
                style(&skipped.error).dim()
            );
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
