//! Pricing index built from the third-party cosmetic pricing feed.
//!
//! The feed is an object keyed by cosmetic identifier (as a string) whose
//! values carry `cost`, `saleCost` and `rarityGem`. A cost of `-1` means
//! "not applicable".

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{PricingEntry, Rarity};
use crate::source::DataSource;

/// Provider sentinel for a cost that does not apply.
pub const NOT_APPLICABLE: i64 = -1;

/// Mapping from cosmetic identifier to its price and rarity.
///
/// A cosmetic absent from the index has unknown pricing, which is not the
/// same as a price of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingIndex {
    entries: HashMap<u64, PricingEntry>,
}

impl PricingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the feed once and build the index.
    ///
    /// Never fails: a transport error or a feed of the wrong shape is logged
    /// and leaves the index empty.
    pub fn fetch(source: &dyn DataSource, url: &str) -> Self {
        match source.get_json(url) {
            Ok(feed) => {
                let index = Self::from_feed(&feed);
                tracing::info!(entries = index.len(), "pricing index built");
                index
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "pricing feed unavailable; prices disabled");
                Self::default()
            }
        }
    }

    /// Build the index from an already-parsed feed.
    pub fn from_feed(feed: &Value) -> Self {
        let Some(records) = feed.as_object() else {
            tracing::warn!("pricing feed is not an object; ignoring");
            return Self::default();
        };

        let mut entries = HashMap::with_capacity(records.len());
        for (key, record) in records {
            let Ok(id) = key.trim().parse::<u64>() else {
                tracing::debug!(key = key.as_str(), "skipping non-numeric pricing key");
                continue;
            };
            if let Some(entry) = price_record(record) {
                entries.insert(id, entry);
            }
        }
        Self { entries }
    }

    pub fn insert(&mut self, cosmetic_id: u64, entry: PricingEntry) {
        self.entries.insert(cosmetic_id, entry);
    }

    pub fn get(&self, cosmetic_id: u64) -> Option<&PricingEntry> {
        self.entries.get(&cosmetic_id)
    }

    pub fn price_of(&self, cosmetic_id: u64) -> Option<u32> {
        self.get(cosmetic_id).map(|e| e.price)
    }

    pub fn rarity_of(&self, cosmetic_id: u64) -> Option<&Rarity> {
        self.get(cosmetic_id).map(|e| &e.rarity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive a pricing entry from one feed record.
///
/// The record needs a defined `cost`; the price is `cost` unless that is the
/// sentinel, in which case `saleCost` is used. Records where neither applies
/// are dropped.
fn price_record(record: &Value) -> Option<PricingEntry> {
    let cost = record.get("cost").and_then(whole_number)?;
    let sale = record
        .get("saleCost")
        .and_then(whole_number)
        .unwrap_or(NOT_APPLICABLE);

    let price = if cost != NOT_APPLICABLE { cost } else { sale };
    if price == NOT_APPLICABLE {
        return None;
    }
    let price = u32::try_from(price).ok()?;

    let rarity = record
        .get("rarityGem")
        .and_then(Value::as_str)
        .map(Rarity::from_gem)
        .unwrap_or_default();

    Some(PricingEntry { price, rarity })
}

/// Integer value of a JSON number. Floats count only when they carry no
/// fractional part (`1350.0`).
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}
