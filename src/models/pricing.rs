use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Rarity — Provider rarity tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    None,
    Epic,
    Legendary,
    Mythic,
    Ultimate,
    Transcendent,
    Exalted,
    Other(String),
}

impl Rarity {
    /// Parse the provider's gem string (`kEpic`, `kNoRarity`, `Legendary`, ...).
    pub fn from_gem(gem: &str) -> Self {
        let trimmed = gem.trim();
        let bare = trimmed
            .strip_prefix('k')
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(trimmed);
        match bare.to_ascii_lowercase().as_str() {
            "" | "none" | "norarity" | "default" => Rarity::None,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "mythic" => Rarity::Mythic,
            "ultimate" => Rarity::Ultimate,
            "transcendent" => Rarity::Transcendent,
            "exalted" => Rarity::Exalted,
            _ => Rarity::Other(trimmed.to_string()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Rarity::None)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::None => f.write_str("None"),
            Rarity::Epic => f.write_str("Epic"),
            Rarity::Legendary => f.write_str("Legendary"),
            Rarity::Mythic => f.write_str("Mythic"),
            Rarity::Ultimate => f.write_str("Ultimate"),
            Rarity::Transcendent => f.write_str("Transcendent"),
            Rarity::Exalted => f.write_str("Exalted"),
            Rarity::Other(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// PricingEntry — Price and rarity for one cosmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub price: u32,
    pub rarity: Rarity,
}
