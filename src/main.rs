use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use hot_deals_reader::aggregate::{category_labels, category_tally, store_tally, top_stores};
use hot_deals_reader::config::{self, AppConfig, DEFAULT_PAGES, MAX_PAGES};
use hot_deals_reader::export::export_category_log;
use hot_deals_reader::extract::extract_deals;
use hot_deals_reader::{logging, views, DealRecord, FetchCache, FetchError};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<FetchError>().is_some() {
                println!("\n-> an HTTP error occurred");
            } else {
                println!("\n-> an error occurred");
            }
            println!("-> {:#}", err);
            println!("-> Exiting...");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = config::load_config()?;
    logging::init_tracing(&config.log_level);

    println!("\n-> Welcome to Hot Deals Reader");
    let pages = match config.pages {
        Some(pages) => pages,
        None => {
            let input = prompt(&format!(
                "\n-> How many pages would you like to scrape (maximum {}): ",
                MAX_PAGES
            ))?
            .unwrap_or_default();
            config::page_count(&input).unwrap_or_else(|| {
                println!("\n-> Invalid response. Scraping {} pages (by default)", DEFAULT_PAGES);
                DEFAULT_PAGES
            })
        }
    };

    let mut cache =
        FetchCache::from_config(&config, pages).context("failed to create HTTP client")?;
    info!(target: "app", origin = %config.origin, pages, "reader started");

    loop {
        print!("{}", views::menu());
        let Some(choice) = prompt("Enter your choice (1 to 5): ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => display_latest_deals(&mut cache)?,
            "2" => analyze_deals_by_category(&mut cache)?,
            "3" => find_top_stores(&mut cache)?,
            "4" => log_deal_information(&mut cache, &config)?,
            "5" => {
                println!("\n-> Exiting. Thanks for using Hot Deals Reader");
                return Ok(());
            }
            _ => println!("\n-> Invalid choice, please try again"),
        }
    }
}

/// Print `message` and read one line. `None` on end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    Ok(if read == 0 { None } else { Some(line) })
}

fn current_deals(cache: &mut FetchCache) -> Result<Vec<DealRecord>, FetchError> {
    let origin = cache.origin().to_string();
    let documents = cache.documents()?;
    Ok(extract_deals(&origin, documents))
}

fn display_latest_deals(cache: &mut FetchCache) -> Result<()> {
    let deals = current_deals(cache)?;
    print!("{}", views::latest_deals(&deals));
    Ok(())
}

fn analyze_deals_by_category(cache: &mut FetchCache) -> Result<()> {
    let deals = current_deals(cache)?;
    print!("{}", views::categories(&category_tally(&deals)));
    Ok(())
}

fn find_top_stores(cache: &mut FetchCache) -> Result<()> {
    let deals = current_deals(cache)?;
    let available = store_tally(&deals).len();

    let input = prompt("How many top stores to display: ")?.unwrap_or_default();
    let limit = match input.trim().parse::<usize>() {
        Ok(n) if n <= available => Some(n),
        _ => {
            println!("\n-> Invalid response. Printing all stores...");
            None
        }
    };

    print!("{}", views::top_stores(&top_stores(&deals, limit)));
    Ok(())
}

fn log_deal_information(cache: &mut FetchCache, config: &AppConfig) -> Result<()> {
    let deals = current_deals(cache)?;
    let categories = category_labels(&deals);
    print!("{}", views::category_picker(&categories));

    let input = prompt("Enter category number you want to log: ")?.unwrap_or_default();
    let selected = input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| categories.get(i).map(|label| (i + 1, label)));
    let Some((number, category)) = selected else {
        println!("\n-> Not a valid selection. Going back to main menu...");
        return Ok(());
    };

    match export_category_log(&config.logs_dir, category, &deals) {
        Ok(summary) => {
            let file_name = summary
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!(
                "\n-> Successfully logged {} links with category \"[#{}] {}\" as {}",
                summary.deals, number, category, file_name
            );
        }
        Err(err) => {
            tracing::error!(target: "export", error = %err, "deal log failed");
            println!("\n-> File operation failed: {}", err);
        }
    }
    Ok(())
}
