//! In-memory artwork cache with blocking preloads and fire-and-forget warming.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::source::DataSource;

/// How a batch of image loads settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub loaded: usize,
    pub failed: Vec<String>,
}

impl PreloadReport {
    pub fn settled(&self) -> usize {
        self.loaded + self.failed.len()
    }
}

/// Shared URL → image bytes map. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    images: Arc<RwLock<HashMap<String, Arc<Vec<u8>>>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    pub fn insert(&self, url: &str, bytes: Vec<u8>) {
        self.images
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(bytes));
    }

    pub fn len(&self) -> usize {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load every URL into the cache on `pool` and wait for all of them to
/// settle.
///
/// Never fails: a failed load counts as settled and is reported, so one bad
/// image cannot hold up the rest. URLs already cached count as loaded.
pub fn preload_all(
    pool: &ThreadPool,
    source: &dyn DataSource,
    cache: &ImageCache,
    urls: &[String],
) -> PreloadReport {
    let pending: Vec<&String> = urls.iter().filter(|u| !cache.contains(u)).collect();
    let cached = urls.len() - pending.len();
    if pending.is_empty() {
        return PreloadReport {
            loaded: cached,
            failed: Vec::new(),
        };
    }

    let failed: Vec<String> = pool.install(|| {
        pending
            .par_iter()
            .filter_map(|url| match source.get_bytes(url) {
                Ok(bytes) => {
                    cache.insert(url, bytes);
                    None
                }
                Err(e) => {
                    tracing::debug!(url = url.as_str(), error = %e, "image load failed");
                    Some((*url).clone())
                }
            })
            .collect()
    });

    PreloadReport {
        loaded: cached + pending.len() - failed.len(),
        failed,
    }
}

/// Preload `urls` in the background and return at once.
///
/// The handle may be dropped; nothing depends on the warm completing.
pub fn warm(
    pool: Arc<ThreadPool>,
    source: Arc<dyn DataSource>,
    cache: ImageCache,
    urls: Vec<String>,
) -> JoinHandle<PreloadReport> {
    thread::spawn(move || {
        let report = preload_all(&pool, source.as_ref(), &cache, &urls);
        tracing::debug!(
            loaded = report.loaded,
            failed = report.failed.len(),
            "image warm finished"
        );
        report
    })
}
