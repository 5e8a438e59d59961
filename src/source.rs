//! Data source abstraction over the read-only provider endpoints.
//!
//! Everything the SDK fetches goes through a [`DataSource`], which keeps the
//! loaders independent of the transport: the live CDN via [`HttpSource`],
//! nothing at all via [`NoopSource`], or canned fixtures in tests.

use crate::error::{CatalogError, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

/// Read-only GET access to JSON documents and image bytes.
pub trait DataSource: Send + Sync {
    /// Fetch and parse a JSON document.
    fn get_json(&self, url: &str) -> Result<Value>;

    /// Fetch raw bytes (image artwork).
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP source backed by `reqwest`.
pub struct HttpSource {
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response> {
        tracing::debug!(url, "GET");
        let resp = self.client()?.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

impl DataSource for HttpSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        Ok(self.send(url)?.json()?)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.send(url)?.bytes()?.to_vec())
    }
}

/// A source that refuses every request. Used when the catalog is offline.
pub struct NoopSource;

impl DataSource for NoopSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        Err(CatalogError::NotFound(format!(
            "{} (offline mode is enabled)",
            url
        )))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.get_json(url).map(|_| Vec::new())
    }
}
