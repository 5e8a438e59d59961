//! Roster loader: resolves the latest data version and fetches the
//! character summary for it.

use serde_json::Value;

use crate::config::Endpoints;
use crate::error::{CatalogError, Result};
use crate::models::Character;
use crate::source::DataSource;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The character list for one data version, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub version: String,
    pub characters: Vec<Character>,
}

impl Roster {
    pub fn get(&self, character_id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == character_id)
    }

    /// Characters whose display name contains `needle`, case-insensitively.
    pub fn search(&self, needle: &str) -> Vec<&Character> {
        let needle = needle.to_lowercase();
        self.characters
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RosterState
// ---------------------------------------------------------------------------

/// Loading state of the roster.
///
/// `Failed` is terminal: the version registry could not be read and there is
/// no fallback version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RosterState {
    #[default]
    Pending,
    Loaded(Roster),
    Failed(String),
}

impl RosterState {
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            RosterState::Loaded(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RosterState::Failed(_))
    }
}

// ---------------------------------------------------------------------------
// RosterLoader
// ---------------------------------------------------------------------------

pub struct RosterLoader<'a> {
    source: &'a dyn DataSource,
    endpoints: &'a Endpoints,
}

impl<'a> RosterLoader<'a> {
    pub fn new(source: &'a dyn DataSource, endpoints: &'a Endpoints) -> Self {
        Self { source, endpoints }
    }

    /// Resolve the latest version: the first registry entry.
    ///
    /// The registry is published newest-first, so no sorting is done here.
    pub fn latest_version(&self) -> Result<String> {
        let url = self.endpoints.versions_url();
        let registry = self.source.get_json(&url)?;
        registry
            .as_array()
            .and_then(|versions| versions.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                CatalogError::VersionUnavailable(format!("empty or malformed registry at {}", url))
            })
    }

    /// Fetch the character summary for `version`, preserving provider order.
    pub fn characters(&self, version: &str) -> Result<Vec<Character>> {
        let url = self.endpoints.summary_url(version);
        let summary = self.source.get_json(&url)?;
        let data = summary
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| CatalogError::NotFound(format!("no character data in {}", url)))?;

        let mut characters = Vec::with_capacity(data.len());
        for (key, value) in data {
            match serde_json::from_value::<Character>(value.clone()) {
                Ok(character) => characters.push(character),
                Err(e) => tracing::debug!(key = key.as_str(), error = %e, "skipping character"),
            }
        }
        Ok(characters)
    }

    /// Resolve the version, then fetch the roster for it.
    ///
    /// A registry failure is terminal. A summary failure still yields a
    /// loaded, empty roster for the resolved version.
    pub fn load(&self) -> RosterState {
        let version = match self.latest_version() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "version registry unavailable; roster will not load");
                return RosterState::Failed(e.to_string());
            }
        };
        tracing::info!(version = version.as_str(), "resolved data version");

        let characters = match self.characters(&version) {
            Ok(chars) => chars,
            Err(e) => {
                tracing::warn!(version = version.as_str(), error = %e, "character summary unavailable");
                Vec::new()
            }
        };
        RosterState::Loaded(Roster {
            version,
            characters,
        })
    }
}
