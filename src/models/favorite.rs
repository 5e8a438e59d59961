use serde::{Deserialize, Serialize};

use super::character::{Character, Cosmetic};

// ---------------------------------------------------------------------------
// FavoriteEntry — A favorited cosmetic tagged with its owning character
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: u64,
    pub num: u32,
    pub name: String,
    #[serde(default)]
    pub chromas: bool,
    pub character_id: String,
    pub character_name: String,
}

impl FavoriteEntry {
    pub fn new(cosmetic: &Cosmetic, owner: &Character) -> Self {
        Self {
            id: cosmetic.id,
            num: cosmetic.num,
            name: cosmetic.name.clone(),
            chromas: cosmetic.chromas,
            character_id: owner.id.clone(),
            character_name: owner.name.clone(),
        }
    }

    pub fn cosmetic(&self) -> Cosmetic {
        Cosmetic {
            id: self.id,
            num: self.num,
            name: self.name.clone(),
            chromas: self.chromas,
        }
    }

    /// The owning character as far as the entry records it. Only the id and
    /// name are stored; the other fields are empty.
    pub fn owner(&self) -> Character {
        Character {
            id: self.character_id.clone(),
            key: String::new(),
            name: self.character_name.clone(),
            title: String::new(),
            blurb: String::new(),
        }
    }
}
