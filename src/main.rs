//! # Energy Digest
//!
//! Collects energy and climate news published this month from a fixed set of
//! public sites, removes duplicate headlines, sorts what is left into topical
//! categories, and prints the digest (optionally emailing it as HTML and
//! writing it as JSON).
//!
//! ## Usage
//!
//! ```sh
//! energy_digest --full-month --send-email
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: each source pages through its listing for the window
//! 2. **Post-processing**: keyword filter, link repair, dedup, categorization
//! 3. **Output**: console digest, plus optional JSON file and HTML email
//!
//! Scraping failures only ever shrink the digest; the run itself always
//! completes.

use clap::Parser;
use futures::future::join_all;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dates;
mod fetch;
mod mail;
mod models;
mod outputs;
mod postprocess;
mod scrapers;

use cli::Cli;
use fetch::HttpFetcher;
use mail::MailSettings;
use models::{Article, DateRange};
use outputs::{console, html, json};
use postprocess::PostProcessor;
use postprocess::categories::Categorizer;
use postprocess::keywords::KeywordFilter;
use scrapers::SourceExtractor;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("energy_digest starting up");

    let args = Cli::parse();
    debug!(
        send_email = args.send_email,
        full_month = args.full_month,
        json_output_dir = ?args.json_output_dir,
        "Parsed CLI arguments"
    );

    let range = DateRange::current(args.full_month);
    let month = range.month_label();
    info!(start = %range.start, end = %range.end, "Reporting window");

    // ---- Scrape every source ----
    let fetcher = HttpFetcher::new()?;
    let sources = SourceExtractor::all();
    let batches = join_all(
        sources
            .iter()
            .map(|source| source.extract(&fetcher, &range)),
    )
    .await;

    for (source, articles) in sources.iter().zip(&batches) {
        info!(source = source.name(), count = articles.len(), "Source finished");
    }

    // ---- Merge and classify ----
    let processor = PostProcessor::new(KeywordFilter::default(), Categorizer::default());
    let articles = processor.run(sources.into_iter().zip(batches).collect());

    // ---- Output ----
    print!("{}", console::render(&articles, &month));

    if let Some(dir) = args.json_output_dir.as_deref() {
        if let Err(e) = json::write_digest(&articles, &range, dir).await {
            error!(path = %dir, error = %e, "Failed to write JSON digest");
        }
    }

    if args.send_email {
        email_digest(&args, &articles, &month).await;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = articles.len(),
        "Execution complete"
    );

    Ok(())
}

/// Render and send the HTML digest. Missing configuration or a failed
/// delivery is logged and otherwise ignored.
async fn email_digest(args: &Cli, articles: &[Article], month: &str) {
    let settings = match MailSettings::from_parts(
        args.email_sender.clone(),
        args.email_receiver.clone(),
        args.email_password.clone(),
    ) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Email configuration incomplete; not sending digest");
            return;
        }
    };

    let subject = html::subject(month);
    let body = html::render(articles, month);
    match mail::send_digest(&subject, &body, &settings).await {
        Ok(()) => info!(receiver = %settings.receiver, "Digest emailed"),
        Err(e) => error!(error = %e, "Failed to send digest email"),
    }
}
