//! Disk persistence for history, favorites and settings.
//!
//! Three JSON files in one data directory, each wrapped in a versioned
//! envelope. Loads never fail: a missing, unreadable, corrupt or
//! wrong-version file yields the documented default and a log line.
//! Saves do fail, and callers decide whether that matters.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{EngineConfig, ProblemSession};

const STORE_VERSION: u32 = 1;
const MAX_HISTORY: usize = 100;

const HISTORY_FILE: &str = "history.json";
const FAVORITES_FILE: &str = "favorites.json";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    sessions: Vec<ProblemSession>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesFile {
    version: u32,
    principle_ids: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    version: u32,
    config: EngineConfig,
}

pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::new(Self::default_location())
    }

    /// Platform data dir plus an app segment, or `./data` when the
    /// platform dir cannot be determined.
    pub fn default_location() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("triz-advisor"))
            .unwrap_or_else(|| PathBuf::from("./data"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_history(&self) -> Vec<ProblemSession> {
        match self.read_json::<HistoryFile>(HISTORY_FILE) {
            Some(file) if file.version == STORE_VERSION => file.sessions,
            Some(file) => {
                warn!(
                    "{HISTORY_FILE} has version {}, expected {STORE_VERSION}; starting empty",
                    file.version
                );
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Persist history, keeping only the most recent entries.
    pub fn save_history(&self, sessions: &[ProblemSession]) -> Result<()> {
        let start = sessions.len().saturating_sub(MAX_HISTORY);
        let file = HistoryFile {
            version: STORE_VERSION,
            sessions: sessions[start..].to_vec(),
        };
        self.write_json(HISTORY_FILE, &file)
    }

    pub fn load_favorites(&self) -> BTreeSet<u8> {
        match self.read_json::<FavoritesFile>(FAVORITES_FILE) {
            Some(file) if file.version == STORE_VERSION => file.principle_ids.into_iter().collect(),
            Some(file) => {
                warn!(
                    "{FAVORITES_FILE} has version {}, expected {STORE_VERSION}; starting empty",
                    file.version
                );
                BTreeSet::new()
            }
            None => BTreeSet::new(),
        }
    }

    pub fn save_favorites(&self, favorites: &BTreeSet<u8>) -> Result<()> {
        let file = FavoritesFile {
            version: STORE_VERSION,
            principle_ids: favorites.iter().copied().collect(),
        };
        self.write_json(FAVORITES_FILE, &file)
    }

    pub fn load_config(&self) -> EngineConfig {
        match self.read_json::<ConfigFile>(CONFIG_FILE) {
            Some(file) if file.version == STORE_VERSION => file.config.clamped(),
            Some(file) => {
                warn!(
                    "{CONFIG_FILE} has version {}, expected {STORE_VERSION}; using defaults",
                    file.version
                );
                EngineConfig::default()
            }
            None => EngineConfig::default(),
        }
    }

    pub fn save_config(&self, config: &EngineConfig) -> Result<()> {
        let file = ConfigFile {
            version: STORE_VERSION,
            config: config.clone(),
        };
        self.write_json(CONFIG_FILE, &file)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found, using defaults", path.display());
                return None;
            }
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("failed to parse {}: {err}", path.display());
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(&path, raw).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TrizEngine;
    use crate::types::Solution;
    use tempfile::{tempdir, TempDir};

    fn setup_store() -> (Store, TempDir) {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf()).unwrap();
        (store, dir)
    }

    fn sample_session(problem: &str) -> ProblemSession {
        let solution = Solution {
            principle_name: "Segmentation".to_string(),
            principle_id: 1,
            description: "desc".to_string(),
            detailed_explanation: "detail".to_string(),
            examples: vec!["example".to_string()],
            confidence: 0.7,
            relevance_score: 0.2,
            category: "Structure Optimization".to_string(),
            tags: vec!["module".to_string()],
        };
        ProblemSession::new(
            problem.to_string(),
            "weight".to_string(),
            "strength".to_string(),
            vec![solution],
        )
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let (store, _dir) = setup_store();
        assert!(store.load_history().is_empty());
        assert!(store.load_favorites().is_empty());
        assert_eq!(store.load_config(), EngineConfig::default());
    }

    #[test]
    fn history_round_trips() {
        let (store, _dir) = setup_store();
        let sessions = vec![sample_session("p1"), sample_session("p2")];
        store.save_history(&sessions).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].problem, "p1");
        assert_eq!(loaded[1].solutions[0].principle_id, 1);
        assert_eq!(loaded[0].session_id, sessions[0].session_id);
    }

    #[test]
    fn history_is_truncated_to_the_most_recent_hundred() {
        let (store, _dir) = setup_store();
        let sessions: Vec<ProblemSession> =
            (0..105).map(|i| sample_session(&format!("p{i}"))).collect();
        store.save_history(&sessions).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 100);
        assert_eq!(loaded[0].problem, "p5");
        assert_eq!(loaded[99].problem, "p104");
    }

    #[test]
    fn corrupt_files_load_as_defaults() {
        let (store, dir) = setup_store();
        fs::write(dir.path().join(HISTORY_FILE), "not json at all {").unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[1, 2, 3]").unwrap();
        fs::write(dir.path().join(FAVORITES_FILE), "").unwrap();

        assert!(store.load_history().is_empty());
        assert!(store.load_favorites().is_empty());
        assert_eq!(store.load_config(), EngineConfig::default());
    }

    #[test]
    fn version_mismatch_loads_as_defaults() {
        let (store, dir) = setup_store();
        fs::write(
            dir.path().join(FAVORITES_FILE),
            r#"{"version": 99, "principleIds": [1, 2]}"#,
        )
        .unwrap();
        assert!(store.load_favorites().is_empty());
    }

    #[test]
    fn favorites_round_trip() {
        let (store, _dir) = setup_store();
        let favorites: BTreeSet<u8> = [40, 1, 8].into_iter().collect();
        store.save_favorites(&favorites).unwrap();
        assert_eq!(store.load_favorites(), favorites);

        let raw = fs::read_to_string(store.dir().join(FAVORITES_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["principleIds"], serde_json::json!([1, 8, 40]));
    }

    #[test]
    fn loaded_config_is_clamped() {
        let (store, dir) = setup_store();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"version": 1, "config": {"maxSolutions": 99}}"#,
        )
        .unwrap();
        let config = store.load_config();
        assert_eq!(config.max_solutions, 10);
        assert!(config.enable_history);
    }

    #[test]
    fn engine_state_survives_reopen() {
        let dir = tempdir().unwrap();

        let store = Store::new(dir.path().to_path_buf()).unwrap();
        let mut engine = TrizEngine::with_store(store);
        engine.analyze_problem("设备重量太大但强度必须保持", "", "");
        assert!(engine.add_to_favorites("Segmentation"));
        drop(engine);

        let store = Store::new(dir.path().to_path_buf()).unwrap();
        let engine = TrizEngine::with_store(store);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].improving_param, "weight");
        assert!(engine.is_favorite(1));
    }
}
