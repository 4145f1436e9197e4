use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

pub const BASE_URL: &str = "https://www.gov.br/inep/pt-br/areas-de-atuacao/avaliacao-e-exames-educacionais/enem/provas-e-gabaritos";

// gov.br serves a challenge page to clients without a browser user-agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for the page fetch and all downloads.
pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch the tabbed listing page. All year subtrees ship in the initial
/// HTML, so one GET covers the whole run. Failure here is fatal to the run.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info!("Fetching page: {}", url);
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .context("Failed to fetch listing page")?;
    info!("Page fetched ({} bytes)", html.len());
    Ok(html)
}
