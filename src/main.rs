mod catalog;
mod download;
mod fetch;
mod normalize;
mod pacing;
mod page;
mod parser;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use serde::Serialize;
use tracing::info;

use catalog::LinkRecord;
use report::Report;

#[derive(Parser)]
#[command(name = "enem_scraper", about = "ENEM exam/answer-key downloader for the gov.br listing page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the years with published documents
    Years {
        /// Listing page to scan
        #[arg(long, default_value = fetch::BASE_URL)]
        url: String,
    },
    /// Identify download links without downloading anything
    Extract {
        /// Restrict to a single year
        #[arg(short, long)]
        year: Option<String>,
        /// Print a JSON manifest instead of a table
        #[arg(long)]
        json: bool,
        /// Listing page to scan
        #[arg(long, default_value = fetch::BASE_URL)]
        url: String,
    },
    /// Identify and download all documents, year by year
    Run {
        /// Restrict to a single year
        #[arg(short, long)]
        year: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = "data")]
        out: PathBuf,
        /// Max years to process (newest first)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Listing page to scan
        #[arg(long, default_value = fetch::BASE_URL)]
        url: String,
    },
}

#[derive(Serialize)]
struct Manifest<'a> {
    extracted_at: DateTime<Utc>,
    records: &'a [LinkRecord],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Years { url } => {
            let client = fetch::client()?;
            let html = fetch::fetch_page(&client, &url).await?;
            let doc = Html::parse_document(&html);
            let years = page::available_years(&doc);
            if years.is_empty() {
                println!("No year tabs found.");
            } else {
                for year in &years {
                    println!("{year}");
                }
            }
            Ok(())
        }
        Commands::Extract { year, json, url } => {
            let client = fetch::client()?;
            let mut report = Report::new();
            let html = fetch::fetch_page(&client, &url).await?;
            let doc = Html::parse_document(&html);
            let mut years = page::available_years(&doc);
            if let Some(y) = &year {
                years.retain(|v| v == y);
            }
            if years.is_empty() {
                anyhow::bail!("no year tabs found on the listing page");
            }

            let mut records = Vec::new();
            for year in &years {
                match page::year_scope(&doc, year) {
                    Some(scope) => records.extend(parser::extract_all(scope, year, &mut report)),
                    None => report.error(format!("Tab content for {year} not found on the page.")),
                }
            }

            if json {
                let manifest = Manifest {
                    extracted_at: Utc::now(),
                    records: &records,
                };
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                println!("{:<6} | {:<28} | {:<11} | URL", "Year", "Category", "Kind");
                println!("{}", "-".repeat(72));
                for r in &records {
                    println!(
                        "{:<6} | {:<28} | {:<11} | {}",
                        r.year,
                        r.category_key,
                        r.kind.as_str(),
                        r.url
                    );
                }
                println!("\n{} link(s) across {} year(s)", records.len(), years.len());
            }
            report.print_summary();
            Ok(())
        }
        Commands::Run { year, out, limit, url } => run(year, out, limit, url).await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run(
    year: Option<String>,
    out: PathBuf,
    limit: Option<usize>,
    url: String,
) -> anyhow::Result<()> {
    let client = fetch::client()?;
    let mut report = Report::new();

    let html = match fetch::fetch_page(&client, &url).await {
        Ok(html) => html,
        Err(e) => {
            report.critical(format!("Failed to load listing page {url}: {e:#}"));
            report.print_summary();
            return Err(e);
        }
    };
    let doc = Html::parse_document(&html);

    let mut years = page::available_years(&doc);
    if let Some(y) = &year {
        years.retain(|v| v == y);
    }
    if let Some(n) = limit {
        years.truncate(n);
    }
    if years.is_empty() {
        report.critical("No year tabs found on the listing page.".into());
        report.print_summary();
        anyhow::bail!("no years to process");
    }
    info!("Years to process: {}", years.join(", "));
    pacing::pause(2.0, 5.0).await;

    let mut downloaded = 0usize;
    let mut skipped = 0usize;

    for year in &years {
        info!("--- Processing {} ---", year);
        pacing::pause(3.0, 7.0).await;

        let Some(scope) = page::year_scope(&doc, year) else {
            report.error(format!("Tab content for {year} not found on the page."));
            continue;
        };

        let records = parser::extract_all(scope, year, &mut report);
        if records.is_empty() {
            report.warn(format!("No relevant links found for {year}."));
            continue;
        }

        let year_dir = out.join(year);
        std::fs::create_dir_all(&year_dir)
            .with_context(|| format!("Failed to create {}", year_dir.display()))?;

        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );

        for record in &records {
            let dest = download::dest_path(&out, record);
            pb.set_message(
                dest.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
            );

            if dest.exists() {
                info!("File already exists, skipping download: {}", dest.display());
                skipped += 1;
                pb.inc(1);
                continue;
            }

            let result = download::download(
                &client,
                &record.url,
                &dest,
                download::DEFAULT_MAX_ATTEMPTS,
                download::DEFAULT_RETRY_DELAY,
            )
            .await;
            if result.success {
                downloaded += 1;
            } else {
                report.error(format!(
                    "Failed to download {} after {} attempt(s): {}",
                    dest.file_name().unwrap_or_default().to_string_lossy(),
                    result.attempts,
                    result.last_error.unwrap_or_else(|| "unknown error".into()),
                ));
            }
            pb.inc(1);
            pacing::pause(1.0, 4.0).await;
        }
        pb.finish_and_clear();
        info!("--- Finished {} ---", year);
    }

    println!("Downloaded {downloaded} file(s), skipped {skipped} already present.");
    report.print_summary();
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
