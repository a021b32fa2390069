//! HTTP client for the run-info catalog.

use super::{RunInfoSource, RunMetadata};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::run::RunNumber;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// Blocking catalog client.
///
/// Each lookup is `GET {base_url}/runs/{run}`, answered with a JSON object
/// of metadata fields.
pub struct HttpRunCatalog {
    base_url: String,
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRunCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRunCatalog")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpRunCatalog {
    /// Create a client from catalog settings.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        let runtime = Runtime::new().map_err(|e| Error::Internal {
            message: format!("Failed to create async runtime: {e}"),
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            runtime,
        })
    }

    /// Catalog base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn run_url(&self, run: RunNumber) -> String {
        format!("{}/runs/{run}", self.base_url)
    }

    async fn fetch(&self, url: &str) -> Result<Map<String, Value>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::CatalogRequest {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        if !response.status().is_success() {
            return Err(Error::CatalogResponse {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response
            .json::<Map<String, Value>>()
            .await
            .map_err(|e| Error::CatalogResponse {
                url: url.to_string(),
                reason: format!("expected a JSON object of metadata: {e}"),
            })
    }
}

impl RunInfoSource for HttpRunCatalog {
    fn run_metadata(&self, run: RunNumber) -> Result<RunMetadata> {
        let url = self.run_url(run);
        debug!("Fetching run metadata: {}", url);
        let body = self.runtime.block_on(self.fetch(&url))?;
        Ok(metadata_from_json(run, body))
    }
}

/// Flatten a catalog JSON object into string fields.
///
/// Strings are kept as-is, scalars and nested values are rendered as JSON
/// text, nulls are dropped.
fn metadata_from_json(run: RunNumber, body: Map<String, Value>) -> RunMetadata {
    let fields: BTreeMap<String, String> = body
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect();
    RunMetadata::new(run, fields)
}
