//! Session-scoped cache of per-character cosmetic lists.
//!
//! Entries are inserted as background fetches complete and are never evicted
//! or replaced. A miss means "not loaded yet"; callers fall back to
//! [`DetailCache::fetch_on_demand`], whose result is deliberately kept out of
//! the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use rayon::prelude::*;
use rayon::ThreadPool;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::{CatalogError, Result};
use crate::models::CharacterDetail;
use crate::source::DataSource;

/// Outcome of a background prefetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    pub loaded: usize,
    pub failed: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DetailCache {
    entries: RwLock<HashMap<String, CharacterDetail>>,
    /// Character ids in the order their fetches completed.
    order: Mutex<Vec<String>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, character_id: &str) -> Option<CharacterDetail> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(character_id)
            .cloned()
    }

    pub fn contains(&self, character_id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(character_id)
    }

    /// Insert a detail record. Returns `false` and keeps the existing record
    /// if the character is already cached.
    pub fn insert(&self, detail: CharacterDetail) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(&detail.id) {
            return false;
        }
        let id = detail.id.clone();
        entries.insert(id.clone(), detail);
        // Push while still holding the map lock so order matches visibility.
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached character ids in fetch-completion order.
    pub fn load_order(&self) -> Vec<String> {
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch every character's detail on `pool`, inserting each record as
    /// its fetch completes. The pool's thread count bounds the number of
    /// requests in flight.
    ///
    /// Already-cached characters are skipped. Failures are logged and leave
    /// the entry absent; they never abort the rest of the run.
    pub fn prefetch(
        &self,
        pool: &ThreadPool,
        source: &dyn DataSource,
        endpoints: &Endpoints,
        version: &str,
        character_ids: &[String],
    ) -> PrefetchReport {
        let pending: Vec<&String> = character_ids
            .iter()
            .filter(|id| !self.contains(id))
            .collect();
        if pending.is_empty() {
            return PrefetchReport::default();
        }

        let outcomes: Vec<std::result::Result<(), String>> = pool.install(|| {
            pending
                .par_iter()
                .map(|id| match fetch_detail(source, endpoints, version, id) {
                    Ok(detail) => {
                        self.insert(detail);
                        Ok(())
                    }
                    Err(e) => {
                        tracing::warn!(character = id.as_str(), error = %e, "detail fetch failed");
                        Err((*id).clone())
                    }
                })
                .collect()
        });

        let failed: Vec<String> = outcomes.into_iter().filter_map(|o| o.err()).collect();
        let report = PrefetchReport {
            loaded: pending.len() - failed.len(),
            failed,
        };
        tracing::info!(
            loaded = report.loaded,
            failed = report.failed.len(),
            "detail prefetch finished"
        );
        report
    }

    /// Run [`prefetch`](Self::prefetch) in the background and return at once.
    ///
    /// Entries become visible through the shared cache as they land; join the
    /// handle for the final report.
    pub fn spawn_prefetch(
        self: &Arc<Self>,
        pool: Arc<ThreadPool>,
        source: Arc<dyn DataSource>,
        endpoints: Endpoints,
        version: String,
        character_ids: Vec<String>,
    ) -> JoinHandle<PrefetchReport> {
        let cache = Arc::clone(self);
        thread::spawn(move || {
            cache.prefetch(&pool, source.as_ref(), &endpoints, &version, &character_ids)
        })
    }

    /// Single-character fallback for a cache miss.
    ///
    /// Hits the same endpoint as the prefetch but the result is returned to
    /// the caller only; the cache is left untouched.
    pub fn fetch_on_demand(
        &self,
        source: &dyn DataSource,
        endpoints: &Endpoints,
        version: &str,
        character_id: &str,
    ) -> Result<CharacterDetail> {
        tracing::debug!(character = character_id, "detail cache miss; fetching on demand");
        fetch_detail(source, endpoints, version, character_id)
    }
}

fn fetch_detail(
    source: &dyn DataSource,
    endpoints: &Endpoints,
    version: &str,
    character_id: &str,
) -> Result<CharacterDetail> {
    let doc = source.get_json(&endpoints.detail_url(version, character_id))?;
    parse_detail(&doc, character_id)
}

/// Extract one character's record from a detail document.
///
/// The document is keyed by character id under `data`; a document carrying a
/// single record under another key is accepted as well.
pub fn parse_detail(doc: &Value, character_id: &str) -> Result<CharacterDetail> {
    let data = doc
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| CatalogError::NotFound(format!("no detail data for {}", character_id)))?;
    let record = data
        .get(character_id)
        .or_else(|| (data.len() == 1).then(|| data.values().next()).flatten())
        .ok_or_else(|| CatalogError::NotFound(format!("no detail record for {}", character_id)))?;
    let mut detail: CharacterDetail = serde_json::from_value(record.clone())?;
    // Cache keys must stay roster ids.
    if detail.id != character_id {
        tracing::debug!(requested = character_id, got = detail.id.as_str(), "detail id mismatch");
        detail.id = character_id.to_string();
    }
    Ok(detail)
}
