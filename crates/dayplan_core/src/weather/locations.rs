//! Saved weather lookup locations.
//!
//! # Responsibility
//! - Persist the user's last-used locations as a JSON blob in the data
//!   directory, replacing the browser local-storage slot.
//!
//! # Invariants
//! - The list is capped; saving beyond the cap evicts the oldest entry.
//! - The most recently saved location is always first.
//! - Saving a name that already exists moves it to the front with the new
//!   coordinates instead of duplicating it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const MAX_SAVED_LOCATIONS: usize = 5;

/// One remembered lookup location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: Uuid,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// File-backed, capped list of saved locations.
pub struct SavedLocations {
    path: PathBuf,
    locations: Vec<SavedLocation>,
}

impl SavedLocations {
    /// Loads the list from disk; a missing or corrupt file yields an
    /// empty list.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let locations = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, locations }
    }

    /// Conventional location inside the app data directory.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::load(data_dir.join("saved_locations.json"))
    }

    pub fn list(&self) -> &[SavedLocation] {
        &self.locations
    }

    /// Saves a location at the front of the list and persists the blob.
    pub fn save(&mut self, name: impl Into<String>, lat: f64, lon: f64) -> Result<&SavedLocation, String> {
        let name = name.into();
        self.locations.retain(|loc| loc.name != name);
        self.locations.insert(
            0,
            SavedLocation {
                id: Uuid::new_v4(),
                name,
                lat,
                lon,
            },
        );
        self.locations.truncate(MAX_SAVED_LOCATIONS);
        self.persist()?;
        Ok(&self.locations[0])
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), String> {
        self.locations.retain(|loc| loc.id != id);
        self.persist()
    }

    fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("cannot create locations dir: {err}"))?;
        }
        let raw = serde_json::to_string(&self.locations)
            .map_err(|err| format!("cannot encode locations: {err}"))?;
        fs::write(&self.path, raw).map_err(|err| format!("cannot write locations: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{SavedLocations, MAX_SAVED_LOCATIONS};

    #[test]
    fn save_reorders_and_caps_the_list() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("saved_locations.json");
        let mut store = SavedLocations::load(&path);

        for i in 0..(MAX_SAVED_LOCATIONS + 2) {
            store
                .save(format!("place-{i}"), i as f64, -(i as f64))
                .expect("save succeeds");
        }
        assert_eq!(store.list().len(), MAX_SAVED_LOCATIONS);
        assert_eq!(store.list()[0].name, "place-6");

        // Re-saving an existing name moves it to the front, no duplicate.
        store.save("place-4", 1.0, 1.0).expect("save succeeds");
        assert_eq!(store.list()[0].name, "place-4");
        let count = store.list().iter().filter(|l| l.name == "place-4").count();
        assert_eq!(count, 1);

        // Round-trips through disk.
        let reloaded = SavedLocations::load(&path);
        assert_eq!(reloaded.list(), store.list());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SavedLocations::load(dir.path().join("absent.json"));
        assert!(store.list().is_empty());
    }
}
