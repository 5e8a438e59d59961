use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Character — Roster entry from the character summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blurb: String,
}

// ---------------------------------------------------------------------------
// Cosmetic — One skin variant of a character
// ---------------------------------------------------------------------------

/// Name the provider gives the base appearance (variant 0).
pub const DEFAULT_VARIANT_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    pub num: u32,
    pub name: String,
    #[serde(default)]
    pub chromas: bool,
}

impl Cosmetic {
    pub fn is_default(&self) -> bool {
        self.num == 0 || self.name == DEFAULT_VARIANT_NAME
    }

    /// Name to show for this variant; the default variant takes the
    /// character's own name.
    pub fn display_name<'a>(&'a self, character_name: &'a str) -> &'a str {
        if self.is_default() {
            character_name
        } else {
            &self.name
        }
    }
}

// ---------------------------------------------------------------------------
// CharacterDetail — Full cosmetic list for one character
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetail {
    pub id: String,
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(rename = "skins", default)]
    pub cosmetics: Vec<Cosmetic>,
}

impl CharacterDetail {
    pub fn cosmetic(&self, cosmetic_id: u64) -> Option<&Cosmetic> {
        self.cosmetics.iter().find(|c| c.id == cosmetic_id)
    }
}

/// Accept a cosmetic identifier as either a JSON number or a numeric string.
fn numeric_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
