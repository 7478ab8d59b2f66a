use crate::retry::{with_retry, RetryConfig};
use anyhow::{Context, Result};
use tracing::debug;

/// Check that the network is reachable before any work starts.
///
/// Any HTTP response counts as connected, whatever its status; only
/// transport failures (DNS, refused connection, TLS) count as offline.
pub async fn check_connectivity(client: &reqwest::Client, url: &str) -> Result<()> {
    check_connectivity_with(client, url, &RetryConfig::connectivity()).await
}

pub async fn check_connectivity_with(
    client: &reqwest::Client,
    url: &str,
    retry: &RetryConfig,
) -> Result<()> {
    let status = with_retry(retry, "Connectivity check", || async {
        client.head(url).send().await.map(|r| r.status())
    })
    .await
    .context("No internet connection. Please check your network and try again.")?;

    debug!("Connectivity check against {} answered {}", url, status);
    Ok(())
}
