//! Cyclic carousel over a character's cosmetics.

use rayon::ThreadPool;

use crate::config::Endpoints;
use crate::error::{CatalogError, Result};
use crate::images::{self, ImageCache, PreloadReport};
use crate::models::{CharacterDetail, Cosmetic};
use crate::source::DataSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    character_id: String,
    cosmetics: Vec<Cosmetic>,
    index: usize,
}

impl Carousel {
    /// Start at index 0, the default appearance. An empty list is rejected.
    pub fn new(character_id: impl Into<String>, cosmetics: Vec<Cosmetic>) -> Result<Self> {
        let character_id = character_id.into();
        if cosmetics.is_empty() {
            return Err(CatalogError::InvalidArgument(format!(
                "character {} has no cosmetics",
                character_id
            )));
        }
        Ok(Self {
            character_id,
            cosmetics,
            index: 0,
        })
    }

    /// Preload every variant's splash art, then build the carousel.
    ///
    /// Waits for all loads to settle; failed images are reported but do not
    /// prevent the carousel from being returned.
    pub fn prepare(
        detail: &CharacterDetail,
        pool: &ThreadPool,
        source: &dyn DataSource,
        endpoints: &Endpoints,
        cache: &ImageCache,
    ) -> Result<(Self, PreloadReport)> {
        let carousel = Self::new(detail.id.clone(), detail.cosmetics.clone())?;
        let urls: Vec<String> = carousel
            .cosmetics
            .iter()
            .map(|c| endpoints.splash_url(&detail.id, c.num))
            .collect();
        let report = images::preload_all(pool, source, cache, &urls);
        if !report.failed.is_empty() {
            tracing::debug!(
                character = detail.id.as_str(),
                failed = report.failed.len(),
                "some splash images failed to preload"
            );
        }
        Ok((carousel, report))
    }

    pub fn character_id(&self) -> &str {
        &self.character_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cosmetics.len()
    }

    pub fn current(&self) -> &Cosmetic {
        &self.cosmetics[self.index]
    }

    pub fn cosmetics(&self) -> &[Cosmetic] {
        &self.cosmetics
    }

    pub fn next(&mut self) -> &Cosmetic {
        self.index = (self.index + 1) % self.cosmetics.len();
        self.current()
    }

    pub fn previous(&mut self) -> &Cosmetic {
        let n = self.cosmetics.len();
        self.index = (self.index + n - 1) % n;
        self.current()
    }

    pub fn jump_to(&mut self, index: usize) -> Result<&Cosmetic> {
        if index >= self.cosmetics.len() {
            return Err(CatalogError::InvalidArgument(format!(
                "index {} out of range for {} cosmetics",
                index,
                self.cosmetics.len()
            )));
        }
        self.index = index;
        Ok(self.current())
    }
}
