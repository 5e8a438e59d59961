//! Durable, ordered favorites list.
//!
//! The whole list is rewritten to a single JSON file on every change. Loading
//! never fails on bad content: a missing, unreadable or malformed file yields
//! an empty list.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Character, Cosmetic, FavoriteEntry};

#[derive(Debug, Default)]
pub struct FavoritesStore {
    entries: Vec<FavoriteEntry>,
    path: Option<PathBuf>,
}

impl FavoritesStore {
    /// A store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store persisted at `path`, hydrating it from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => decode(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "favorites unreadable; starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = entries.len(), "favorites hydrated");
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Add the cosmetic if absent, remove it if present.
    ///
    /// Returns whether the cosmetic is a favorite afterwards. The full list
    /// is persisted before returning; if that write fails the change is
    /// undone and the error returned.
    pub fn toggle(&mut self, cosmetic: &Cosmetic, owner: &Character) -> Result<bool> {
        let now_favorite = match self.entries.iter().position(|e| e.id == cosmetic.id) {
            Some(pos) => {
                let removed = self.entries.remove(pos);
                if let Err(e) = self.persist() {
                    self.entries.insert(pos, removed);
                    return Err(e);
                }
                false
            }
            None => {
                self.entries.push(FavoriteEntry::new(cosmetic, owner));
                if let Err(e) = self.persist() {
                    self.entries.pop();
                    return Err(e);
                }
                true
            }
        };
        Ok(now_favorite)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn contains(&self, cosmetic_id: u64) -> bool {
        self.entries.iter().any(|e| e.id == cosmetic_id)
    }

    pub fn entries_for(&self, character_id: &str) -> Vec<&FavoriteEntry> {
        self.entries
            .iter()
            .filter(|e| e.character_id == character_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the full list to disk via a temp file and rename, so a crash
    /// mid-write never leaves a truncated file behind.
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(encode(&self.entries)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Serialize a favorites list in its persisted form.
pub fn encode(entries: &[FavoriteEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Parse a persisted favorites list.
///
/// Anything that is not a JSON list of favorite records decodes to an empty
/// list. Repeated cosmetic ids keep their first occurrence.
pub fn decode(contents: &str) -> Vec<FavoriteEntry> {
    let parsed: Vec<FavoriteEntry> = match serde_json::from_str(contents) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "stored favorites are malformed; resetting");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(parsed.len());
    parsed.into_iter().filter(|e| seen.insert(e.id)).collect()
}
