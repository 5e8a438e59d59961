//! Aggregator tests: totals and summaries recomputed from current inputs.

use skin_catalog_sdk::aggregator::{cost_by_character, summarize, total_cost};
use skin_catalog_sdk::models::{FavoriteEntry, PricingEntry, Rarity};
use skin_catalog_sdk::PricingIndex;

fn fav(id: u64, character: &str) -> FavoriteEntry {
    FavoriteEntry {
        id,
        num: 1,
        name: format!("skin {}", id),
        chromas: false,
        character_id: character.into(),
        character_name: character.into(),
    }
}

fn priced(pairs: &[(u64, u32)]) -> PricingIndex {
    let mut index = PricingIndex::new();
    for &(id, price) in pairs {
        index.insert(
            id,
            PricingEntry {
                price,
                rarity: Rarity::None,
            },
        );
    }
    index
}

#[test]
fn unpriced_favorites_contribute_zero() {
    let favorites = vec![fav(10, "Ahri"), fav(20, "Ahri")];
    let pricing = priced(&[(10, 1350)]);
    assert_eq!(total_cost(&favorites, &pricing), 1350);
}

#[test]
fn empty_inputs_total_zero() {
    assert_eq!(total_cost(&[], &priced(&[(1, 520)])), 0);
    assert_eq!(total_cost(&[fav(1, "Zed")], &PricingIndex::new()), 0);
}

#[test]
fn total_follows_the_current_list() {
    let pricing = priced(&[(1, 520), (2, 975), (3, 1820)]);
    let mut favorites = vec![fav(1, "Zed"), fav(2, "Zed"), fav(3, "Ahri")];
    assert_eq!(total_cost(&favorites, &pricing), 3315);

    favorites.remove(1);
    assert_eq!(total_cost(&favorites, &pricing), 2340);
}

#[test]
fn large_totals_do_not_overflow() {
    let pricing = priced(&[(1, u32::MAX), (2, u32::MAX)]);
    let favorites = vec![fav(1, "Zed"), fav(2, "Zed")];
    assert_eq!(total_cost(&favorites, &pricing), 2 * u64::from(u32::MAX));
}

#[test]
fn summary_counts_priced_and_unpriced() {
    let pricing = priced(&[(10, 1350), (30, 0)]);
    let favorites = vec![fav(10, "Ahri"), fav(20, "Ahri"), fav(30, "Zed")];

    let summary = summarize(&favorites, &pricing);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.priced, 2);
    assert_eq!(summary.unpriced, 1);
    assert_eq!(summary.total, 1350);
}

#[test]
fn cost_by_character_in_first_appearance_order() {
    let pricing = priced(&[(1, 520), (2, 975), (3, 1350)]);
    let favorites = vec![fav(3, "Zed"), fav(1, "Ahri"), fav(2, "Zed"), fav(4, "Aatrox")];

    let totals = cost_by_character(&favorites, &pricing);
    assert_eq!(
        totals,
        vec![
            ("Zed".to_string(), 2325),
            ("Ahri".to_string(), 520),
            ("Aatrox".to_string(), 0),
        ]
    );
}
