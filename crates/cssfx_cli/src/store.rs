//! Animation snapshots stored as JSON files

use anyhow::{Context, Result};
use cssfx_animation::{AnimationSnapshot, AnimationStore};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error};

/// Saves every snapshot to one JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<AnimationSnapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        AnimationSnapshot::from_json(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    pub fn write(&self, snapshot: &AnimationSnapshot) -> Result<()> {
        let json = snapshot
            .to_json_pretty()
            .context("Failed to serialize animation")?;

        // Write to a sibling file first so a failed write keeps the old snapshot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl AnimationStore for JsonFileStore {
    fn save_animation(&mut self, snapshot: AnimationSnapshot) {
        match self.write(&snapshot) {
            Ok(()) => debug!("Saved animation to {}", self.path.display()),
            Err(e) => error!("Failed to save animation: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssfx_core::FilterEntry;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cssfx-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_write_then_read() {
        let path = temp_path("write-read");
        let store = JsonFileStore::new(&path);
        let snapshot = AnimationSnapshot {
            filters: vec![FilterEntry {
                name: "blur".into(),
                kind: "blur".into(),
                active: true,
            }],
            ..AnimationSnapshot::default()
        };

        store.write(&snapshot).unwrap();
        assert_eq!(store.read().unwrap(), snapshot);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let store = JsonFileStore::new(temp_path("missing"));
        let err = store.read().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_failed_save_is_logged_not_raised() {
        let mut store = JsonFileStore::new("/nonexistent-dir/animation.json");
        store.save_animation(AnimationSnapshot::default());
    }
}
