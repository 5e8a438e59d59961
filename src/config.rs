use std::path::PathBuf;
use std::time::Duration;

pub const DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const PRICING_URL: &str =
    "https://cdn.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/v1/skin-prices.json";

/// Storage key the favorites list is persisted under (`<key>.json` in the data dir).
pub const FAVORITES_KEY: &str = "favorites";

pub const DEFAULT_DETAIL_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint set used to build every provider URL.
///
/// The defaults point at the public Data Dragon CDN. Override them to use a
/// mirror or a local fixture server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub locale: String,
    pub pricing: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DDRAGON_BASE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            pricing: PRICING_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Version registry, newest first.
    pub fn versions_url(&self) -> String {
        format!("{}/api/versions.json", self.base)
    }

    pub fn summary_url(&self, version: &str) -> String {
        format!("{}/cdn/{}/data/{}/champion.json", self.base, version, self.locale)
    }

    pub fn detail_url(&self, version: &str, character_id: &str) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion/{}.json",
            self.base, version, self.locale, character_id
        )
    }

    /// Full-size splash art for a variant; the primary carousel image.
    pub fn splash_url(&self, character_id: &str, num: u32) -> String {
        format!("{}/cdn/img/champion/splash/{}_{}.jpg", self.base, character_id, num)
    }

    /// Centered crop of the splash art, used for hover previews.
    pub fn centered_url(&self, character_id: &str, num: u32) -> String {
        format!("{}/cdn/img/champion/centered/{}_{}.jpg", self.base, character_id, num)
    }

    pub fn tile_url(&self, character_id: &str, num: u32) -> String {
        format!("{}/cdn/img/champion/tiles/{}_{}.jpg", self.base, character_id, num)
    }

    pub fn icon_url(&self, version: &str, character_id: &str) -> String {
        format!("{}/cdn/{}/img/champion/{}.png", self.base, version, character_id)
    }

    pub fn pricing_url(&self) -> &str {
        &self.pricing
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("skin-catalog-sdk")
    } else {
        PathBuf::from(".skin-catalog-sdk")
    }
}

pub fn favorites_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(format!("{}.json", FAVORITES_KEY))
}
