//! text-scraper main entry point
//!
//! This is the command-line interface for the text-scraper site crawler.

use clap::Parser;
use std::path::PathBuf;
use text_scraper::config::{load_config_with_hash, validate, Config};
use text_scraper::crawler::{crawl, user_agent_string};
use text_scraper::output::print_report;
use text_scraper::url::CrawlScope;
use tracing_subscriber::EnvFilter;

/// text-scraper: a polite single-site text crawler
///
/// text-scraper starts from a seed URL, follows links within the seed's
/// origin in discovery order, respects robots.txt and a page budget, and
/// appends the visible text of every page to `<host>.txt`.
#[derive(Parser, Debug)]
#[command(name = "text-scraper")]
#[command(version)]
#[command(about = "A polite single-site text crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL, overriding the configuration file
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Page budget, overriding the configuration file
    #[arg(short, long, value_name = "N")]
    max_pages: Option<usize>,

    /// Output directory, overriding the configuration file
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);

    // Overrides are validated like the file itself
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("text_scraper=info,warn"),
            1 => EnvFilter::new("text_scraper=debug,info"),
            2 => EnvFilter::new("text_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.url {
        config.crawler.seed_url = url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.directory = output_dir.clone();
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let scope = CrawlScope::new(&config.crawler.seed_url, config.crawler.max_pages)?;

    println!("=== text-scraper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", scope.seed());
    println!("  Origin: {}", scope.origin());
    println!("  Max pages: {}", scope.max_pages());
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!(
        "  Excluded extensions: {}",
        config.crawler.excluded_extensions.join(" ")
    );

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nOutput:");
    println!(
        "  Store: {}",
        PathBuf::from(&config.output.directory)
            .join(scope.store_name())
            .display()
    );

    println!("\nEffective configuration:\n");
    println!("{}", toml::to_string_pretty(config)?);

    println!("✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} (max {} pages) into {}",
        config.crawler.seed_url,
        config.crawler.max_pages,
        config.output.directory
    );

    match crawl(config).await {
        Ok(report) => {
            tracing::info!("Crawl completed successfully");
            if quiet {
                println!("Total pages crawled: {}", report.pages_processed);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
