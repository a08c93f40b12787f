// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env (if there is one) so JINA_API_TOKEN can live in a file
// 2. Parse command-line arguments using clap (this validates the seed URL)
// 3. Set up logging
// 4. Open the document directory, build the proxy client, run the scrape
// 5. Print the outcome and exit with a proper code
//    (0 = success, 1 = scrape failed, 2 = error before the scrape could run)
// =============================================================================

mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - settings from args + environment
mod discover;  // src/discover/ - finding doc links in the seed page
mod fetch;     // src/fetch/ - proxy client and fetch-with-retry
mod logging;   // src/logging.rs - tracing setup
mod scrape;    // src/scrape/ - the scrape pipeline
mod store;     // src/store/ - file names and the document directory

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands, ScrapeArgs};
use config::Config;
use fetch::{Fetcher, ProxyClient};
use scrape::{ScrapeOutcome, Scraper};
use store::DocumentStore;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = scrape completed
//   Ok(1) = scrape ran but reported failure (seed unreachable, no links)
//   Err   = could not even start
async fn run() -> Result<i32> {
    // A missing .env file is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Scrape(args) => handle_scrape(&args).await,
    }
}

// Handles the 'scrape' subcommand
async fn handle_scrape(args: &ScrapeArgs) -> Result<i32> {
    let config = Config::from_args(args);

    if !args.json {
        println!("🔍 Scraping documentation from: {}", args.url);
    }

    // The directory must exist before the first document is written
    let store = DocumentStore::open(&config.docs_dir)
        .await
        .context("Failed to prepare the document directory")?;
    let docs_dir = store.dir().to_path_buf();

    let client = ProxyClient::new(&config.proxy)?;
    let fetcher = Fetcher::new(client, config.proxy.base_url.clone(), config.retry);
    let scraper = Scraper::new(fetcher, store, config.pace);

    let outcome = scraper.scrape_documentation(&args.url).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome, &docs_dir.display().to_string());
    }

    Ok(if outcome.success { 0 } else { 1 })
}

// Prints a human-readable report of the outcome
fn print_summary(outcome: &ScrapeOutcome, docs_dir: &str) {
    println!();

    if outcome.success {
        println!("✅ {}", outcome.message);
    } else {
        println!("❌ {}", outcome.message);
    }

    if let Some(error) = &outcome.error {
        println!("   Reason: {}", error);
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Documents saved: {}", outcome.processed_links);
    println!("   📁 Directory: {}", docs_dir);
}
