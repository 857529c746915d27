//! One JSON record holding the key of the last notified filing.
//!
//! `load` never fails. A missing or unreadable file reads as "nothing seen yet", which at
//! worst re-sends one notification. `save` replaces the file atomically.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

use crate::detect::ItemKey;

pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenState {
    pub last: Option<ItemKey>,
}

impl SeenState {
    pub fn with_last(key: ItemKey) -> Self {
        Self { last: Some(key) }
    }
}

// On-disk record. `version` is absent in files written before it existed.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    last: Option<String>,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state io at {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("state encode: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn load(&self) -> SeenState {
        let data = match fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SeenState::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state unreadable; treating as empty");
                return SeenState::default();
            }
        };
        match serde_json::from_str::<StateFile>(&data) {
            Ok(file) => {
                if let Some(v) = file.version.filter(|v| *v > STATE_VERSION) {
                    warn!(path = %self.path.display(), version = v, "state written by a newer version; reading `last` only");
                }
                SeenState { last: file.last.map(ItemKey::from_raw) }
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state corrupt; treating as empty");
                SeenState::default()
            }
        }
    }

    pub fn save(&self, state: &SeenState) -> Result<(), StateError> {
        let file = StateFile { version: Some(STATE_VERSION), last: state.last.as_ref().map(|k| k.as_str().to_string()) };
        let content = serde_json::to_string(&file)?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source: std::io::Error| StateError::Io { path: self.path.clone(), source };
        fs::create_dir_all(&parent).map_err(io_err)?;

        // temp file in the same directory, then rename over the target
        let mut tmp = NamedTempFile::new_in(&parent).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join("last_seen.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), SeenState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let key = ItemKey::from_raw("A002_10-Q_2024-02-01");
        store.save(&SeenState::with_last(key.clone())).unwrap();
        assert_eq!(store.load().last, Some(key));

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["last"], "A002_10-Q_2024-02-01");
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&SeenState::with_last(ItemKey::from_raw("A001_10-K_2024-01-01"))).unwrap();
        store.save(&SeenState::default()).unwrap();
        assert_eq!(store.load(), SeenState::default());
        // no temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        for junk in ["", "not json", "[1,2,3]", r#"{"last": 42}"#, r#"{"last": "A00"#] {
            fs::write(store.path(), junk).unwrap();
            assert_eq!(store.load(), SeenState::default(), "content {junk:?}");
        }
    }

    #[test]
    fn legacy_unversioned_file_loads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"last": "A001_10-K_2024-01-01"}"#).unwrap();
        assert_eq!(store.load().last, Some(ItemKey::from_raw("A001_10-K_2024-01-01")));
        fs::write(store.path(), r#"{"last": null}"#).unwrap();
        assert_eq!(store.load().last, None);
    }

    #[test]
    fn newer_version_with_extra_fields_still_loads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"version": 7, "last": "K", "history": ["J"]}"#).unwrap();
        assert_eq!(store.load().last, Some(ItemKey::from_raw("K")));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("nested/state/last_seen.json"));
        store.save(&SeenState::with_last(ItemKey::from_raw("K"))).unwrap();
        assert_eq!(store.load().last, Some(ItemKey::from_raw("K")));
    }
}
