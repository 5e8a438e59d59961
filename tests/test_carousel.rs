//! Carousel tests: cyclic navigation and preload gating.

mod common;

use common::{detail_json, pool, sample_source};
use skin_catalog_sdk::detail_cache::parse_detail;
use skin_catalog_sdk::models::Cosmetic;
use skin_catalog_sdk::{Carousel, Endpoints, ImageCache};

fn cosmetics(n: u32) -> Vec<Cosmetic> {
    (0..n)
        .map(|num| Cosmetic {
            id: 1000 + u64::from(num),
            num,
            name: format!("skin {}", num),
            chromas: false,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// navigation
// ---------------------------------------------------------------------------

#[test]
fn starts_at_default_variant() {
    let carousel = Carousel::new("Aatrox", cosmetics(4)).unwrap();
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.current().num, 0);
}

#[test]
fn next_wraps_around() {
    let mut carousel = Carousel::new("Aatrox", cosmetics(4)).unwrap();
    carousel.next();
    carousel.next();
    carousel.next();
    assert_eq!(carousel.index(), 3);
    carousel.next();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn previous_from_zero_goes_to_last() {
    let mut carousel = Carousel::new("Aatrox", cosmetics(4)).unwrap();
    let cosmetic = carousel.previous();
    assert_eq!(cosmetic.num, 3);
    assert_eq!(carousel.index(), 3);
}

#[test]
fn single_cosmetic_stays_put() {
    let mut carousel = Carousel::new("Aatrox", cosmetics(1)).unwrap();
    carousel.next();
    assert_eq!(carousel.index(), 0);
    carousel.previous();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn next_then_previous_is_identity() {
    let mut carousel = Carousel::new("Aatrox", cosmetics(5)).unwrap();
    for _ in 0..7 {
        let before = carousel.index();
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.index(), before);
        carousel.next();
    }
}

#[test]
fn jump_to_checks_bounds() {
    let mut carousel = Carousel::new("Aatrox", cosmetics(3)).unwrap();
    assert_eq!(carousel.jump_to(2).unwrap().num, 2);
    assert!(carousel.jump_to(3).is_err());
    assert_eq!(carousel.index(), 2);
}

#[test]
fn empty_cosmetic_list_is_rejected() {
    assert!(Carousel::new("Nobody", Vec::new()).is_err());
}

// ---------------------------------------------------------------------------
// prepare
// ---------------------------------------------------------------------------

#[test]
fn prepare_preloads_every_splash() {
    let source = sample_source();
    let ep = Endpoints::default();
    let cache = ImageCache::new();
    let detail = parse_detail(
        &detail_json("Aatrox", "266", "Aatrox", common::aatrox_skins()),
        "Aatrox",
    )
    .unwrap();

    let (carousel, report) = Carousel::prepare(&detail, &pool(2), &source, &ep, &cache).unwrap();

    assert_eq!(carousel.len(), 4);
    assert_eq!(report.loaded, 4);
    assert!(report.failed.is_empty());
    for num in 0..4 {
        assert!(cache.contains(&ep.splash_url("Aatrox", num)));
    }
}

#[test]
fn failed_preload_still_settles() {
    let ep = Endpoints::default();
    let source = sample_source().without(&ep.splash_url("Aatrox", 2));
    let cache = ImageCache::new();
    let detail = parse_detail(
        &detail_json("Aatrox", "266", "Aatrox", common::aatrox_skins()),
        "Aatrox",
    )
    .unwrap();

    let (carousel, report) = Carousel::prepare(&detail, &pool(4), &source, &ep, &cache).unwrap();

    assert_eq!(carousel.index(), 0);
    assert_eq!(report.settled(), 4);
    assert_eq!(report.failed, vec![ep.splash_url("Aatrox", 2)]);
    assert!(!cache.contains(&ep.splash_url("Aatrox", 2)));
}

#[test]
fn cached_images_are_not_refetched() {
    let source = sample_source();
    let ep = Endpoints::default();
    let cache = ImageCache::new();
    let detail = parse_detail(
        &detail_json("Aatrox", "266", "Aatrox", common::aatrox_skins()),
        "Aatrox",
    )
    .unwrap();

    Carousel::prepare(&detail, &pool(4), &source, &ep, &cache).unwrap();
    let (_, report) = Carousel::prepare(&detail, &pool(4), &source, &ep, &cache).unwrap();

    assert_eq!(report.loaded, 4);
    assert_eq!(source.request_count(&ep.splash_url("Aatrox", 0)), 1);
}
