use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

/// Builds the shared HTTP client; the timeout covers both the analysis and
/// completion calls.
pub fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?)
}
