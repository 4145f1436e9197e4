use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::catalog::LinkRecord;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

// Most documents are PDFs; a few years link without a file extension.
const DEFAULT_EXTENSION: &str = ".pdf";

/// Failure taxonomy for one download attempt. Transient failures are worth
/// retrying; permanent ones are not and end the download immediately.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("connection/timeout error: {0}")]
    Transient(String),
    #[error("request failed: {0}")]
    Permanent(String),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            DownloadError::Transient(err.to_string())
        } else {
            DownloadError::Permanent(err.to_string())
        }
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::Permanent(err.to_string())
    }
}

/// Outcome of one `download` call, logged and discarded by the caller.
#[derive(Debug)]
pub struct DownloadResult {
    pub success: bool,
    pub attempts: u32,
    pub last_error: Option<String>,
}

/// Stream `url` to `dest`, retrying transient failures with a fixed delay.
///
/// The body is written to `<dest>.part` and renamed into place on success,
/// so an interrupted run never leaves a truncated file under the final name
/// (a re-run would skip it as already downloaded). Callers skip the call
/// entirely when `dest` already exists.
pub async fn download(
    client: &Client,
    url: &str,
    dest: &Path,
    max_attempts: u32,
    retry_delay: Duration,
) -> DownloadResult {
    let name = dest.file_name().unwrap_or_default().to_string_lossy().into_owned();
    retry_loop(&name, max_attempts, retry_delay, || {
        fetch_to_file(client, url, dest)
    })
    .await
}

/// Attempt loop: transient errors retry after `retry_delay` while attempts
/// remain; a permanent error stops immediately without consuming the rest.
async fn retry_loop<F, Fut>(
    name: &str,
    max_attempts: u32,
    retry_delay: Duration,
    mut attempt: F,
) -> DownloadResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), DownloadError>>,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        attempts += 1;
        info!("Downloading (attempt {}/{}): {}", attempts, max_attempts, name);

        match attempt().await {
            Ok(()) => {
                info!("Downloaded: {}", name);
                return DownloadResult {
                    success: true,
                    attempts,
                    last_error,
                };
            }
            Err(DownloadError::Transient(e)) => {
                warn!(
                    "Connection/timeout error downloading {} (attempt {}/{}): {}",
                    name, attempts, max_attempts, e
                );
                last_error = Some(e);
                if attempts < max_attempts {
                    info!("Waiting {:.0}s before retrying...", retry_delay.as_secs_f64());
                    tokio::time::sleep(retry_delay).await;
                }
            }
            Err(DownloadError::Permanent(e)) => {
                warn!("Request error downloading {}: {}", name, e);
                return DownloadResult {
                    success: false,
                    attempts,
                    last_error: Some(e),
                };
            }
        }
    }

    DownloadResult {
        success: false,
        attempts,
        last_error,
    }
}

/// One attempt: GET, check status, stream chunks to the partial file,
/// rename into place.
async fn fetch_to_file(client: &Client, url: &str, dest: &Path) -> Result<(), DownloadError> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    let partial = part_path(dest);
    let mut file = fs::File::create(&partial).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    fs::rename(&partial, dest).await?;
    Ok(())
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Extension of the URL's trailing path segment, default `.pdf` when the
/// segment has none.
pub fn infer_extension(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or("");
    let segment = segment.split(['?', '#']).next().unwrap_or(segment);
    match segment.rfind('.') {
        Some(i) if i > 0 && i + 1 < segment.len() => segment[i..].to_string(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Destination layout: `<root>/<year>/ENEM_<year>_<category_key><ext>`.
pub fn dest_path(root: &Path, record: &LinkRecord) -> PathBuf {
    root.join(&record.year).join(format!(
        "ENEM_{}_{}{}",
        record.year,
        record.category_key,
        infer_extension(&record.url)
    ))
}
