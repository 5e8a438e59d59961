//! Async wrapper around [`SkinCatalog`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every catalog operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use skin_catalog_sdk::AsyncSkinCatalog;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = AsyncSkinCatalog::builder().build().await.unwrap();
//!     let report = catalog.load().await.unwrap();
//!     let details = catalog.wait_for_details().await.unwrap();
//!
//!     // Run any sync catalog method via closure
//!     let skins = catalog.run(|c| c.cosmetics_for("Ahri")).await.unwrap();
//!     let total = catalog.total_cost().await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::aggregator::FavoritesSummary;
use crate::config::{self, Endpoints};
use crate::detail_cache::PrefetchReport;
use crate::error::{CatalogError, Result};
use crate::source::DataSource;
use crate::{SkinCatalog, StartupReport};

// ---------------------------------------------------------------------------
// AsyncSkinCatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSkinCatalog`] instance.
pub struct AsyncSkinCatalogBuilder {
    data_dir: Option<PathBuf>,
    endpoints: Endpoints,
    timeout: Duration,
    detail_concurrency: usize,
    source: Option<Arc<dyn DataSource>>,
    offline: bool,
}

impl Default for AsyncSkinCatalogBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            endpoints: Endpoints::default(),
            timeout: config::DEFAULT_TIMEOUT,
            detail_concurrency: config::DEFAULT_DETAIL_CONCURRENCY,
            source: None,
            offline: false,
        }
    }
}

impl AsyncSkinCatalogBuilder {
    /// Set the directory the favorites file is stored in.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn detail_concurrency(mut self, n: usize) -> Self {
        self.detail_concurrency = n;
        self
    }

    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Build the async catalog.
    ///
    /// Favorites hydration reads from disk, so this runs on the blocking
    /// thread pool.
    pub async fn build(self) -> Result<AsyncSkinCatalog> {
        tokio::task::spawn_blocking(move || {
            let mut builder = SkinCatalog::builder()
                .endpoints(self.endpoints)
                .timeout(self.timeout)
                .detail_concurrency(self.detail_concurrency)
                .offline(self.offline);
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(source) = self.source {
                builder = builder.source(source);
            }
            let catalog = builder.build()?;
            Ok(AsyncSkinCatalog {
                inner: Arc::new(Mutex::new(catalog)),
            })
        })
        .await
        .map_err(|e| CatalogError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSkinCatalog
// ---------------------------------------------------------------------------

/// Async wrapper around [`SkinCatalog`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`SkinCatalog`] is
/// protected by a [`Mutex`] since loading and toggling need `&mut`.
pub struct AsyncSkinCatalog {
    inner: Arc<Mutex<SkinCatalog>>,
}

impl AsyncSkinCatalog {
    /// Create a new builder for configuring the async catalog.
    pub fn builder() -> AsyncSkinCatalogBuilder {
        AsyncSkinCatalogBuilder::default()
    }

    /// Run a sync catalog operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut SkinCatalog` and returns a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SkinCatalog) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let catalog = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = catalog
                .lock()
                .map_err(|_| CatalogError::InvalidArgument("catalog lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| CatalogError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run the startup fetches asynchronously.
    ///
    /// Resolves once the roster and pricing settle; details keep loading in
    /// the background.
    pub async fn load(&self) -> Result<StartupReport> {
        self.run(|c| Ok(c.load())).await
    }

    /// Wait for the background detail prefetch without holding up the runtime.
    ///
    /// The catalog is not locked while waiting, so other calls proceed.
    pub async fn wait_for_details(&self) -> Result<PrefetchReport> {
        let handle = {
            let mut guard = self
                .inner
                .lock()
                .map_err(|_| CatalogError::InvalidArgument("catalog lock poisoned".into()))?;
            guard.take_prefetch()
        };
        let Some(handle) = handle else {
            return Ok(PrefetchReport::default());
        };
        tokio::task::spawn_blocking(move || handle.join().unwrap_or_default())
            .await
            .map_err(|e| CatalogError::InvalidArgument(format!("Task join error: {e}")))
    }

    pub async fn toggle_favorite(&self, character_id: &str, cosmetic_id: u64) -> Result<bool> {
        let character_id = character_id.to_string();
        self.run(move |c| c.toggle_favorite(&character_id, cosmetic_id))
            .await
    }

    pub async fn total_cost(&self) -> Result<u64> {
        self.run(|c| Ok(c.total_cost())).await
    }

    pub async fn summary(&self) -> Result<FavoritesSummary> {
        self.run(|c| Ok(c.summary())).await
    }
}
