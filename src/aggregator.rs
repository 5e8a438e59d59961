//! Derived totals over the favorites list.
//!
//! Every function here recomputes from its inputs; nothing is accumulated
//! between calls.

use serde::{Deserialize, Serialize};

use crate::models::FavoriteEntry;
use crate::pricing::PricingIndex;

/// Total price of all favorites. Unpriced favorites contribute zero.
pub fn total_cost(favorites: &[FavoriteEntry], pricing: &PricingIndex) -> u64 {
    favorites
        .iter()
        .filter_map(|f| pricing.price_of(f.id))
        .map(u64::from)
        .sum()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FavoritesSummary {
    pub count: usize,
    pub priced: usize,
    pub unpriced: usize,
    pub total: u64,
}

pub fn summarize(favorites: &[FavoriteEntry], pricing: &PricingIndex) -> FavoritesSummary {
    let priced = favorites
        .iter()
        .filter(|f| pricing.get(f.id).is_some())
        .count();
    FavoritesSummary {
        count: favorites.len(),
        priced,
        unpriced: favorites.len() - priced,
        total: total_cost(favorites, pricing),
    }
}

/// Per-character totals, ordered by each character's first favorite.
pub fn cost_by_character(
    favorites: &[FavoriteEntry],
    pricing: &PricingIndex,
) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    for fav in favorites {
        let price = pricing.price_of(fav.id).map(u64::from).unwrap_or(0);
        match totals.iter_mut().find(|(id, _)| *id == fav.character_id) {
            Some((_, sum)) => *sum += price,
            None => totals.push((fav.character_id.clone(), price)),
        }
    }
    totals
}
