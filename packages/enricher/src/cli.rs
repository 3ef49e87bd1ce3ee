//! Command-line interface for the enricher.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use eip_catalogue::table::{read_entries, write_entries};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::EnrichmentConfig;
use crate::enricher::{Enricher, EnrichmentOptions, EnrichmentReport};
use crate::error::{EnrichError, Result};

/// EiP Enricher - Translate and annotate a parsed catalogue table.
#[derive(Parser)]
#[command(name = "eip-enricher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Entry table written by eip-catalogue
    pub table: PathBuf,

    /// Translate title, colophon and imprint of non-English entries
    #[arg(long)]
    pub translate: bool,

    /// Extract the verbs of French titles
    #[arg(long)]
    pub title_verbs: bool,

    /// Extract the publisher from the title page
    #[arg(long)]
    pub publisher: bool,

    /// Extract structured title-page features as JSON
    #[arg(long)]
    pub title_features: bool,

    /// Output table (default: overwrite the input table)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> EnrichmentOptions {
        EnrichmentOptions {
            translate: self.translate,
            title_verbs: self.title_verbs,
            publisher: self.publisher,
            title_features: self.title_features,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.options();
    let output = cli.output.as_deref().unwrap_or(&cli.table);
    enrich_command(&cli.table, output, options, &EnrichmentConfig::from_env())
}

/// Execute the enrichment.
fn enrich_command(
    table: &Path,
    output: &Path,
    options: EnrichmentOptions,
    config: &EnrichmentConfig,
) -> Result<()> {
    if !options.any() {
        return Err(EnrichError::Config(
            "No enrichment selected. Use --translate, --title-verbs, --publisher or --title-features"
                .to_string(),
        ));
    }

    let mut entries = read_entries(table)?;
    let enricher = Enricher::from_config(config, options)?;

    println!(
        "{} {} ({} entries)",
        style("Enriching").bold(),
        style(table.display()).cyan(),
        entries.len()
    );
    println!();

    let pb = ProgressBar::new(entries.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut report = EnrichmentReport::default();
    for entry in entries.iter_mut() {
        pb.set_message(entry.key.clone());
        enricher.enrich_entry(entry, &mut report);
        pb.inc(1);
    }
    pb.finish_and_clear();

    write_entries(output, &entries)?;

    println!("  Entries: {}", report.entries);
    println!("  Translated: {}", style(report.translated).green());
    println!("  LLM calls: {}", report.llm_calls);
    if report.failed_calls > 0 {
        println!("  Failed calls: {}", style(report.failed_calls).yellow().bold());
    }

    println!();
    println!("{} {}", style("Saved to:").green().bold(), output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eip_catalogue::CatalogueEntry;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from([
            "eip-enricher",
            "EiP.csv",
            "--translate",
            "--title-features",
            "-o",
            "enriched.csv",
        ]);

        assert_eq!(cli.table, PathBuf::from("EiP.csv"));
        assert_eq!(cli.output, Some(PathBuf::from("enriched.csv")));
        assert_eq!(
            cli.options(),
            EnrichmentOptions {
                translate: true,
                title_verbs: false,
                publisher: false,
                title_features: true,
            }
        );
    }

    #[test]
    fn test_no_step_selected() {
        let err = enrich_command(
            Path::new("EiP.csv"),
            Path::new("EiP.csv"),
            EnrichmentOptions::default(),
            &EnrichmentConfig::builder().build(),
        )
        .unwrap_err();
        assert!(matches!(err, EnrichError::Config(_)));
    }

    #[test]
    fn test_unconfigured_run_rewrites_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let table = dir.path().join("EiP.csv");
        let output = dir.path().join("enriched.csv");
        let entries = vec![CatalogueEntry {
            key: "Basel 1533".to_string(),
            title: "Euclidis elementorum libri XV".to_string(),
            language: "LATIN".to_string(),
            ..Default::default()
        }];
        write_entries(&table, &entries).unwrap();

        enrich_command(
            &table,
            &output,
            EnrichmentOptions {
                translate: true,
                publisher: true,
                ..Default::default()
            },
            &EnrichmentConfig::builder().build(),
        )
        .unwrap();

        assert_eq!(read_entries(&output).unwrap(), entries);
    }
}
