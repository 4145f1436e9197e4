use std::time::Duration;

use rand::Rng;
use tracing::info;

/// Sleep for a random interval in `[min_secs, max_secs)`. The site watches
/// for automated access patterns; every step between years and downloads
/// goes through here.
pub async fn pause(min_secs: f64, max_secs: f64) {
    let secs = rand::rng().random_range(min_secs..max_secs);
    info!("Waiting {:.2}s...", secs);
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}
