//! `secop-taxonomy` — classify SECOP II public-works contracts.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the rule tables ([`config::load_config`]) and validate them
//!    ([`pipeline::ClassificationPipeline::new`]).
//! 3. Obtain records: download them (`--fetch`, [`source`]) or read INPUT ([`store`]).
//! 4. Prefilter, normalize, classify and roll up ([`pipeline`]).
//! 5. Write the retained contracts ([`store`]).
//! 6. Render the requested report ([`report`]).

mod cli;
mod config;
mod errors;
mod models;
mod pipeline;
mod report;
mod source;
mod store;
mod taxonomy;
mod text;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use pipeline::ClassificationPipeline;
use source::socrata::SocrataClient;
use store::store_for;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let pipeline = ClassificationPipeline::new(&config).context("invalid configuration")?;

    // Resolve the output store before any slow work so a bad extension fails fast
    let output_store = store_for(&cli.output)?;

    let records = if cli.fetch {
        if cli.from_year > cli.to_year {
            bail!("--from-year {} is after --to-year {}", cli.from_year, cli.to_year);
        }
        let client = SocrataClient::new(&config.source)?;
        let records = client
            .fetch_years(cli.from_year..=cli.to_year, cli.quiet)
            .await?;

        if let Some(raw) = &cli.raw_output {
            store_for(raw)?.write_records(raw, &records)?;
            if !cli.quiet {
                eprintln!("  {} raw records saved to {}", "→".cyan(), raw.display());
            }
        }
        records
    } else {
        let Some(input) = cli.input.as_deref() else {
            bail!("no INPUT file given (or use --fetch)");
        };
        store_for(input)?.read(input)?
    };

    if !cli.quiet {
        eprintln!("  {} {} records loaded", "→".cyan(), records.len());
    }

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} classifying",
                )?
                .progress_chars("#>-"),
        );
        pb
    };
    let outcome = pipeline.run(records, !cli.no_prefilter, &progress);

    output_store.write_classified(&cli.output, &outcome.retained)?;
    if !cli.quiet {
        eprintln!(
            "  {} {} contracts written to {}",
            "→".cyan(),
            outcome.retained.len(),
            cli.output.display()
        );
    }

    let summary = report::summarize(&outcome);
    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &summary,
                &outcome.discarded,
                &cli.output,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `-v` / `-q`.
fn init_tracing(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(false, false), "info");
        assert_eq!(default_log_level(true, false), "debug");
        assert_eq!(default_log_level(false, true), "warn");
    }
}
