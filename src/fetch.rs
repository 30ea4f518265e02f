//! FDSN event query: one GET, cache the body, parse it.

use crate::cache::CacheFile;
use crate::config::QueryConfig;
use crate::model::QuakeCatalog;
use anyhow::Context;
use reqwest::Client;
use tracing::{debug, info};

/// Fetch the catalog described by `query`, overwriting `cache` with the raw body.
pub async fn fetch_catalog(
    client: &Client,
    query: &QueryConfig,
    cache: &CacheFile,
) -> anyhow::Result<QuakeCatalog> {
    let url = query.to_url().context("Invalid query URL")?;
    info!("Fetching earthquakes from {}", url);

    let resp = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await
        .context("Failed to send request")?
        .error_for_status()
        .context("Non-success status from event service")?;

    let text = resp.text().await.context("Failed to read response body")?;
    debug!("Total response size: {} bytes", text.len());

    cache.write(&text)?;
    info!("Saved raw response to {}", cache.path().display());

    parse_catalog(&text)
}

pub fn parse_catalog(text: &str) -> anyhow::Result<QuakeCatalog> {
    let catalog: QuakeCatalog =
        serde_json::from_str(text).context("Failed to parse event service response")?;

    debug!(
        title = catalog.title().unwrap_or(""),
        url = catalog.source_url().unwrap_or(""),
        generated = catalog.generated_ms(),
        "Parsed catalog"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::SAMPLE_RESPONSE;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(SAMPLE_RESPONSE).unwrap();
        assert_eq!(catalog.count_earthquakes(), 6);
        assert_eq!(catalog.quakes().len(), 6);
    }

    #[test]
    fn test_parse_catalog_malformed() {
        let err = parse_catalog("{\"metadata\": ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_parse_catalog_wrong_shape() {
        // an error document from the service has no metadata block
        assert!(parse_catalog("{\"error\": \"bad request\"}").is_err());
    }
}
