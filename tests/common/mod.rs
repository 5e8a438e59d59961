//! Shared test fixtures for the skin catalog integration tests.
//!
//! Provides `FixtureSource`, an in-memory `DataSource` keyed by URL, and
//! `sample_source()` which serves a small three-character dataset for
//! version 14.1.1 at the default endpoints.

#![allow(dead_code)]

use serde_json::{json, Value};
use skin_catalog_sdk::{CatalogError, DataSource, Endpoints, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Condvar, Mutex};

pub const VERSION: &str = "14.1.1";

/// Fetch pool of `threads` workers, as the session builds one.
pub fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap()
}

/// In-memory data source. Unknown URLs answer with a 404 status error.
#[derive(Default)]
pub struct FixtureSource {
    json: HashMap<String, Value>,
    bytes: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: impl Into<String>, value: Value) -> Self {
        self.json.insert(url.into(), value);
        self
    }

    pub fn with_bytes(mut self, url: impl Into<String>, bytes: &[u8]) -> Self {
        self.bytes.insert(url.into(), bytes.to_vec());
        self
    }

    pub fn without(mut self, url: &str) -> Self {
        self.json.remove(url);
        self.bytes.remove(url);
        self
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| *u == url).count()
    }

    pub fn distinct_requests(&self) -> HashSet<String> {
        self.requests().into_iter().collect()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }

    fn missing(url: &str) -> CatalogError {
        CatalogError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

impl DataSource for FixtureSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.record(url);
        self.json.get(url).cloned().ok_or_else(|| Self::missing(url))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.record(url);
        self.bytes.get(url).cloned().ok_or_else(|| Self::missing(url))
    }
}

/// Wraps a `FixtureSource` and holds the first request for one URL until
/// [`release`](GatedSource::release) is called. Later requests for the same
/// URL pass straight through.
pub struct GatedSource {
    inner: FixtureSource,
    gated: String,
    state: Mutex<Gate>,
    changed: Condvar,
}

#[derive(Default)]
struct Gate {
    arrived: bool,
    released: bool,
}

impl GatedSource {
    pub fn new(inner: FixtureSource, gated: impl Into<String>) -> Self {
        Self {
            inner,
            gated: gated.into(),
            state: Mutex::new(Gate::default()),
            changed: Condvar::new(),
        }
    }

    /// Block until the gated request has arrived and is being held.
    pub fn wait_until_held(&self) {
        let mut gate = self.state.lock().unwrap();
        while !gate.arrived {
            gate = self.changed.wait(gate).unwrap();
        }
    }

    pub fn release(&self) {
        self.state.lock().unwrap().released = true;
        self.changed.notify_all();
    }

    pub fn fixture(&self) -> &FixtureSource {
        &self.inner
    }

    fn hold(&self, url: &str) {
        if url != self.gated {
            return;
        }
        let mut gate = self.state.lock().unwrap();
        if gate.arrived {
            return;
        }
        gate.arrived = true;
        self.changed.notify_all();
        while !gate.released {
            gate = self.changed.wait(gate).unwrap();
        }
    }
}

impl DataSource for GatedSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.hold(url);
        self.inner.get_json(url)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.hold(url);
        self.inner.get_bytes(url)
    }
}

pub fn character_json(id: &str, key: &str, name: &str, title: &str) -> Value {
    json!({
        "version": VERSION,
        "id": id,
        "key": key,
        "name": name,
        "title": title,
        "blurb": format!("{} blurb", name),
        "tags": ["Fighter"]
    })
}

pub fn detail_json(id: &str, key: &str, name: &str, skins: Value) -> Value {
    json!({
        "type": "champion",
        "format": "standAloneComplex",
        "version": VERSION,
        "data": {
            id: {
                "id": id,
                "key": key,
                "name": name,
                "title": "",
                "skins": skins
            }
        }
    })
}

pub fn summary_json() -> Value {
    // Deliberately not alphabetical: provider order must survive.
    json!({
        "type": "champion",
        "format": "standAloneComplex",
        "version": VERSION,
        "data": {
            "Zed": character_json("Zed", "238", "Zed", "the Master of Shadows"),
            "Aatrox": character_json("Aatrox", "266", "Aatrox", "the Darkin Blade"),
            "Ahri": character_json("Ahri", "103", "Ahri", "the Nine-Tailed Fox")
        }
    })
}

pub fn pricing_json() -> Value {
    json!({
        "266001": { "cost": 520, "saleCost": -1, "rarityGem": "kNoRarity" },
        "266002": { "cost": -1, "saleCost": 975, "rarityGem": "kEpic" },
        "103001": { "cost": 1350, "saleCost": 675, "rarityGem": "kLegendary" },
        "103002": { "cost": -1, "saleCost": -1, "rarityGem": "kMythic" },
        "238001": { "cost": 3250, "saleCost": -1, "rarityGem": "kUltimate" }
    })
}

pub fn aatrox_skins() -> Value {
    json!([
        { "id": "266000", "num": 0, "name": "default", "chromas": false },
        { "id": "266001", "num": 1, "name": "Justicar Aatrox", "chromas": false },
        { "id": "266002", "num": 2, "name": "Mecha Aatrox", "chromas": true },
        { "id": "266003", "num": 3, "name": "Sea Hunter Aatrox", "chromas": false }
    ])
}

pub fn ahri_skins() -> Value {
    json!([
        { "id": "103000", "num": 0, "name": "default", "chromas": false },
        { "id": "103001", "num": 1, "name": "Dynasty Ahri", "chromas": false },
        { "id": "103002", "num": 2, "name": "Midnight Ahri", "chromas": true }
    ])
}

pub fn zed_skins() -> Value {
    json!([
        { "id": "238000", "num": 0, "name": "default", "chromas": false },
        { "id": "238001", "num": 1, "name": "Shockblade Zed", "chromas": false }
    ])
}

/// Full dataset at the default endpoints, including every splash and
/// centered image.
pub fn sample_source() -> FixtureSource {
    let ep = Endpoints::default();
    let mut source = FixtureSource::new()
        .with_json(ep.versions_url(), json!([VERSION, "14.0.1", "13.24.1"]))
        .with_json(ep.summary_url(VERSION), summary_json())
        .with_json(ep.pricing_url(), pricing_json())
        .with_json(
            ep.detail_url(VERSION, "Aatrox"),
            detail_json("Aatrox", "266", "Aatrox", aatrox_skins()),
        )
        .with_json(
            ep.detail_url(VERSION, "Ahri"),
            detail_json("Ahri", "103", "Ahri", ahri_skins()),
        )
        .with_json(
            ep.detail_url(VERSION, "Zed"),
            detail_json("Zed", "238", "Zed", zed_skins()),
        );

    for (id, count) in [("Aatrox", 4), ("Ahri", 3), ("Zed", 2)] {
        for num in 0..count {
            source = source
                .with_bytes(ep.splash_url(id, num), b"splash")
                .with_bytes(ep.centered_url(id, num), b"centered");
        }
    }
    source
}
