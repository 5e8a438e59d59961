//! Skin catalog SDK for Rust.
//!
//! Provides a session client for browsing a game's character roster and the
//! cosmetic variants ("skins") of each character, tracking favorite skins on
//! disk, and pricing them. Roster and detail data come from the public Data
//! Dragon CDN; prices and rarities come from a third-party pricing feed.
//! Everything fetched is read-only and cached for the lifetime of the session.
//!
//! # Quick start
//!
//! ```no_run
//! use skin_catalog_sdk::SkinCatalog;
//!
//! let mut catalog = SkinCatalog::builder().build().unwrap();
//! let report = catalog.load();
//! println!("{} characters on {:?}", report.characters, report.version);
//!
//! // Details arrive in the background; block only if you need all of them
//! let details = catalog.wait_for_details();
//! println!("{} details cached", details.loaded);
//!
//! // Browse one character's skins
//! let (mut carousel, _) = catalog.prepare_carousel("Aatrox").unwrap();
//! carousel.next();
//!
//! // Favorite the current skin and price the list
//! let skin_id = carousel.current().id;
//! catalog.toggle_favorite("Aatrox", skin_id).unwrap();
//! println!("total: {}", catalog.total_cost());
//! ```

pub mod aggregator;
#[cfg(feature = "async")]
pub mod async_client;
pub mod carousel;
pub mod config;
pub mod detail_cache;
pub mod error;
pub mod favorites;
pub mod images;
pub mod models;
pub mod pricing;
pub mod roster;
pub mod source;

pub use aggregator::FavoritesSummary;
#[cfg(feature = "async")]
pub use async_client::AsyncSkinCatalog;
pub use carousel::Carousel;
pub use config::Endpoints;
pub use detail_cache::{DetailCache, PrefetchReport};
pub use error::{CatalogError, Result};
pub use favorites::FavoritesStore;
pub use images::{ImageCache, PreloadReport};
pub use pricing::PricingIndex;
pub use roster::{Roster, RosterLoader, RosterState};
pub use source::{DataSource, HttpSource, NoopSource};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rayon::ThreadPool;

use models::{Character, CharacterDetail};

// ---------------------------------------------------------------------------
// SkinCatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SkinCatalog`] session.
///
/// Use [`SkinCatalog::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SkinCatalogBuilder::build) to create the session.
pub struct SkinCatalogBuilder {
    data_dir: Option<PathBuf>,
    endpoints: Endpoints,
    timeout: Duration,
    detail_concurrency: usize,
    source: Option<Arc<dyn DataSource>>,
    offline: bool,
}

impl Default for SkinCatalogBuilder {
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

impl SkinCatalogBuilder {
    /// Set the directory the favorites file is stored in.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/skin-catalog-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Point the session at different provider endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    ///
    /// Ignored when a custom [`source`](Self::source) is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Size of the session's fetch pool, which bounds the number of detail
    /// and image requests in flight. Defaults to 8.
    pub fn detail_concurrency(mut self, n: usize) -> Self {
        self.detail_concurrency = n;
        self
    }

    /// Fetch through a custom [`DataSource`] instead of HTTP.
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, no request leaves the process: the roster fails to load,
    /// prices stay empty, and only the persisted favorites are available.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Build the session, creating the data directory, the fetch pool and
    /// hydrating favorites.
    ///
    /// Does **not** touch the network; call [`SkinCatalog::load`] for that.
    pub fn build(self) -> Result<SkinCatalog> {
        if self.detail_concurrency == 0 {
            return Err(CatalogError::InvalidArgument(
                "detail_concurrency must be at least 1".into(),
            ));
        }
        let data_dir = self.data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&data_dir)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.detail_concurrency)
            .thread_name(|i| format!("skin-fetch-{}", i))
            .build()?;

        let source: Arc<dyn DataSource> = if self.offline {
            Arc::new(NoopSource)
        } else {
            self.source
                .unwrap_or_else(|| Arc::new(HttpSource::new(self.timeout)))
        };

        Ok(SkinCatalog {
            favorites: FavoritesStore::open(config::favorites_path(&data_dir)),
            data_dir,
            source,
            endpoints: self.endpoints,
            pool: Arc::new(pool),
            offline: self.offline,
            roster: RosterState::Pending,
            pricing: PricingIndex::default(),
            details: Arc::new(DetailCache::new()),
            images: ImageCache::new(),
            prefetch: None,
            warming: None,
        })
    }
}

// ---------------------------------------------------------------------------
// StartupReport
// ---------------------------------------------------------------------------

/// What [`SkinCatalog::load`] managed to fetch before returning.
///
/// Detail records are still arriving when this is produced; see
/// [`SkinCatalog::wait_for_details`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Resolved data version, `None` if the version registry failed.
    pub version: Option<String>,
    pub characters: usize,
    pub priced_cosmetics: usize,
    /// Characters queued for the background detail prefetch.
    pub details_queued: usize,
}

// ---------------------------------------------------------------------------
// SkinCatalog
// ---------------------------------------------------------------------------

/// The session context: owns every store and the data source.
///
/// Roster, pricing and details are loaded once per session and only ever
/// grow. Favorites are the single user-mutable state and are changed only
/// through [`toggle_favorite`](Self::toggle_favorite).
pub struct SkinCatalog {
    data_dir: PathBuf,
    source: Arc<dyn DataSource>,
    endpoints: Endpoints,
    pool: Arc<ThreadPool>,
    offline: bool,
    roster: RosterState,
    pricing: PricingIndex,
    details: Arc<DetailCache>,
    favorites: FavoritesStore,
    images: ImageCache,
    prefetch: Option<JoinHandle<PrefetchReport>>,
    warming: Option<JoinHandle<PreloadReport>>,
}

impl SkinCatalog {
    /// Create a new builder for configuring the session.
    pub fn builder() -> SkinCatalogBuilder {
        SkinCatalogBuilder::default()
    }

    // -- Startup -----------------------------------------------------------

    /// Run the startup fetches.
    ///
    /// The pricing feed and the roster are fetched concurrently, and this
    /// returns as soon as both settle. Every character's detail is then
    /// prefetched in the background on the session's fetch pool, and the
    /// persisted favorites' artwork is warmed. Until a detail lands,
    /// [`cosmetics_for`](Self::cosmetics_for) falls back to an on-demand
    /// fetch. Failures degrade the corresponding state and are logged; this
    /// method itself never fails.
    pub fn load(&mut self) -> StartupReport {
        let source = self.source.as_ref();
        let endpoints = &self.endpoints;

        let (pricing, roster) = self.pool.install(|| {
            rayon::join(
                || PricingIndex::fetch(source, endpoints.pricing_url()),
                || RosterLoader::new(source, endpoints).load(),
            )
        });
        self.pricing = pricing;
        self.roster = roster;

        let mut report = StartupReport {
            priced_cosmetics: self.pricing.len(),
            ..StartupReport::default()
        };
        if let Some(roster) = self.roster.roster() {
            let ids: Vec<String> = roster
                .ids()
                .into_iter()
                .filter(|id| !self.details.contains(id))
                .collect();
            report.version = Some(roster.version.clone());
            report.characters = roster.len();
            report.details_queued = ids.len();
            self.prefetch = Some(self.details.spawn_prefetch(
                self.pool.clone(),
                self.source.clone(),
                self.endpoints.clone(),
                roster.version.clone(),
                ids,
            ));
        }
        if !self.favorites.is_empty() {
            self.warming = Some(self.warm_favorites());
        }
        report
    }

    /// Block until the background detail prefetch started by
    /// [`load`](Self::load) has settled, and return its report.
    ///
    /// Returns an empty report when no prefetch is running.
    pub fn wait_for_details(&mut self) -> PrefetchReport {
        match self.take_prefetch().map(JoinHandle::join) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                tracing::warn!("detail prefetch panicked");
                PrefetchReport::default()
            }
            None => PrefetchReport::default(),
        }
    }

    pub(crate) fn take_prefetch(&mut self) -> Option<JoinHandle<PrefetchReport>> {
        self.prefetch.take()
    }

    /// Block until the most recent favorites warm has settled.
    ///
    /// Returns an empty report when nothing is warming.
    pub fn wait_for_warm(&mut self) -> PreloadReport {
        match self.warming.take().map(JoinHandle::join) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                tracing::warn!("favorites warm panicked");
                PreloadReport::default()
            }
            None => PreloadReport::default(),
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn roster_state(&self) -> &RosterState {
        &self.roster
    }

    /// The loaded roster, if the version registry resolved.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.roster()
    }

    pub fn version(&self) -> Option<&str> {
        self.roster().map(|r| r.version.as_str())
    }

    pub fn pricing(&self) -> &PricingIndex {
        &self.pricing
    }

    pub fn details(&self) -> &DetailCache {
        &self.details
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // -- Characters and cosmetics ------------------------------------------

    pub fn character(&self, character_id: &str) -> Result<&Character> {
        let roster = self.roster().ok_or_else(|| self.roster_unavailable())?;
        roster
            .get(character_id)
            .ok_or_else(|| CatalogError::NotFound(format!("character {}", character_id)))
    }

    /// A character's detail record: from the cache when prefetched, otherwise
    /// fetched on demand without populating the cache.
    pub fn cosmetics_for(&self, character_id: &str) -> Result<CharacterDetail> {
        if let Some(detail) = self.details.get(character_id) {
            return Ok(detail);
        }
        let version = self.version().ok_or_else(|| self.roster_unavailable())?;
        self.details
            .fetch_on_demand(self.source.as_ref(), &self.endpoints, version, character_id)
    }

    /// Load a character's skins into a carousel once all splash art settled.
    pub fn prepare_carousel(&self, character_id: &str) -> Result<(Carousel, PreloadReport)> {
        let detail = self.cosmetics_for(character_id)?;
        Carousel::prepare(
            &detail,
            &self.pool,
            self.source.as_ref(),
            &self.endpoints,
            &self.images,
        )
    }

    // -- Favorites ---------------------------------------------------------

    /// Toggle one of a character's skins in the favorites list.
    ///
    /// Returns whether the skin is a favorite afterwards. On change, the
    /// centered artwork of every favorite is warmed in the background; join
    /// it with [`wait_for_warm`](Self::wait_for_warm).
    ///
    /// Removing a favorite works from the stored entry alone, so it needs
    /// neither the roster nor the network.
    pub fn toggle_favorite(&mut self, character_id: &str, cosmetic_id: u64) -> Result<bool> {
        let stored = self
            .favorites
            .entries()
            .iter()
            .find(|e| e.id == cosmetic_id)
            .cloned();
        let now_favorite = match stored {
            Some(entry) => self.favorites.toggle(&entry.cosmetic(), &entry.owner())?,
            None => {
                let character = self.character(character_id)?.clone();
                let detail = self.cosmetics_for(character_id)?;
                let cosmetic = detail.cosmetic(cosmetic_id).ok_or_else(|| {
                    CatalogError::NotFound(format!("cosmetic {} of {}", cosmetic_id, character_id))
                })?;
                self.favorites.toggle(cosmetic, &character)?
            }
        };
        self.warming = Some(self.warm_favorites());
        Ok(now_favorite)
    }

    /// Preload centered artwork for every favorite in the background.
    pub fn warm_favorites(&self) -> JoinHandle<PreloadReport> {
        let urls = self
            .favorites
            .entries()
            .iter()
            .map(|f| self.endpoints.centered_url(&f.character_id, f.num))
            .collect();
        images::warm(
            self.pool.clone(),
            self.source.clone(),
            self.images.clone(),
            urls,
        )
    }

    /// Total price of all favorites; unpriced favorites count as zero.
    pub fn total_cost(&self) -> u64 {
        aggregator::total_cost(self.favorites.entries(), &self.pricing)
    }

    pub fn summary(&self) -> FavoritesSummary {
        aggregator::summarize(self.favorites.entries(), &self.pricing)
    }

    fn roster_unavailable(&self) -> CatalogError {
        match &self.roster {
            RosterState::Failed(reason) => CatalogError::VersionUnavailable(reason.clone()),
            _ => CatalogError::VersionUnavailable("roster has not been loaded".into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SkinCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SkinCatalog(data_dir={}, version={}, characters={}, details={}, favorites={}, offline={})",
            self.data_dir.display(),
            self.version().unwrap_or("-"),
            self.roster().map_or(0, Roster::len),
            self.details.len(),
            self.favorites.len(),
            self.offline
        )
    }
}
