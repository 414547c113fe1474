//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest product scraper.

use anyhow::Context;
use catalog_harvest::config::{load_config_with_hash, Config};
use catalog_harvest::crawler::{build_http_client, discover_categories, run_scrape};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: scrape the webscraper.io e-commerce demo into CSV files
///
/// Discovers every category and subcategory, renders each one in a headless
/// browser until all products are loaded, and writes one CSV file per
/// category. Running without arguments scrapes the default catalog into the
/// current directory.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "Scrape an e-commerce demo catalog into CSV files", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write CSV files to (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discover categories and list them without launching a browser
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    if cli.dry_run {
        handle_dry_run(&config).await
    } else {
        handle_scrape(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("catalog_harvest=info,warn"),
                1 => EnvFilter::new("catalog_harvest=debug,info"),
                2 => EnvFilter::new("catalog_harvest=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be scraped
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Catalog-Harvest Dry Run ===\n");
    println!("Home: {}", config.site.home_url);
    println!("Output directory: {}", config.output.directory.display());
    println!(
        "Load more: every {}ms, at most {} clicks per page\n",
        config.render.poll_interval_ms, config.render.max_load_more_clicks
    );

    let client = build_http_client(&config.http)?;
    let links = discover_categories(&client, config).await?;

    println!("Categories ({}):", links.len());
    for link in &links {
        println!("  {:<20} {}", link.file_name, link.url);
    }

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    match run_scrape(config).await {
        Ok(summary) => {
            if !summary.categories_skipped.is_empty() {
                tracing::warn!(
                    "{} categories skipped: {}",
                    summary.categories_skipped.len(),
                    summary.categories_skipped.join(", ")
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
