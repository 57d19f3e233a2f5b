//! Loading and saving of the game configuration and statistics files.
//!
//! The configuration is a pretty-printed JSON record. Statistics are stored
//! as base64-encoded JSON. Both loaders are tolerant: fields that do not
//! parse are skipped or defaulted instead of failing the whole record.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::engine::{Difficulty, GameConfig, GameEngine, HelperKind, Statistics};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    pub language: Option<String>,
    pub categories: BTreeSet<String>,
    pub difficulty: Option<Difficulty>,
}

impl PersistedConfig {
    /// Keeps every field of `value` that parses and drops the rest.
    pub fn from_json(value: &Value) -> Self {
        Self {
            language: value
                .get("language")
                .and_then(Value::as_str)
                .map(str::to_string),
            categories: value
                .get("categories")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            difficulty: value.get("difficulty").and_then(parse_difficulty),
        }
    }

    /// Applies language, then categories, then difficulty.
    pub fn apply(&self, engine: &mut dyn GameEngine) {
        if let Some(language) = &self.language {
            if let Err(e) = engine.set_language(Some(language)) {
                log::warn!("ignoring saved language: {e}");
            }
        }
        for category in &self.categories {
            if let Err(e) = engine.add_category(category) {
                log::warn!("ignoring saved category: {e}");
            }
        }
        if let Some(difficulty) = self.difficulty {
            engine.set_difficulty(difficulty);
        }
    }
}

impl From<&GameConfig> for PersistedConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            language: config.language.clone(),
            categories: config.categories.clone(),
            difficulty: config.difficulty,
        }
    }
}

fn parse_difficulty(value: &Value) -> Option<Difficulty> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| Difficulty::from_index(i as usize)),
        Value::String(s) => serde_json::from_value(Value::String(s.to_lowercase())).ok(),
        _ => None,
    }
}

/// Statistics as written to disk.
///
/// Helper counts are kept verbatim: they are a mapping rather than a scalar
/// and are only interpreted when converted into [`Statistics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStatistics {
    pub rounds: u64,
    pub wins: u64,
    pub lost: u64,
    pub consecutive_wins: u64,
    pub highest_consecutive_wins: u64,
    pub correct_letter_count: u64,
    pub wrong_letter_count: u64,
    pub no_wrong_letters_count: u64,
    pub helpers_count: BTreeMap<String, Value>,
}

impl PersistedStatistics {
    /// Reads each counter on its own so one odd field never costs the rest.
    /// `correctLeterCount` is the legacy spelling and only used as a fallback.
    pub fn from_json(value: &Value) -> Self {
        let count = |key: &str| value.get(key).map(coerce_count).unwrap_or(0);
        let correct = value
            .get("correctLetterCount")
            .or_else(|| value.get("correctLeterCount"))
            .map(coerce_count)
            .unwrap_or(0);
        Self {
            rounds: count("rounds"),
            wins: count("wins"),
            lost: count("lost"),
            consecutive_wins: count("consecutiveWins"),
            highest_consecutive_wins: count("highestConsecutiveWins"),
            correct_letter_count: correct,
            wrong_letter_count: count("wrongLetterCount"),
            no_wrong_letters_count: count("noWrongLettersCount"),
            helpers_count: match value.get("helpersCount") {
                Some(Value::Object(map)) => map.clone().into_iter().collect(),
                _ => BTreeMap::new(),
            },
        }
    }

    pub fn encode(&self) -> Result<String, PersistError> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(text: &str) -> Result<Self, PersistError> {
        let bytes = STANDARD.decode(text.trim())?;
        let json = String::from_utf8(bytes)?;
        let value: Value = serde_json::from_str(&json)?;
        Ok(Self::from_json(&value))
    }
}

/// Numbers pass through, numeric strings are parsed by their leading digits,
/// anything else becomes 0.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

impl From<&Statistics> for PersistedStatistics {
    fn from(stats: &Statistics) -> Self {
        Self {
            rounds: stats.rounds,
            wins: stats.wins,
            lost: stats.lost,
            consecutive_wins: stats.consecutive_wins,
            highest_consecutive_wins: stats.highest_consecutive_wins,
            correct_letter_count: stats.correct_letter_count,
            wrong_letter_count: stats.wrong_letter_count,
            no_wrong_letters_count: stats.no_wrong_letters_count,
            helpers_count: stats
                .helpers_count
                .iter()
                .map(|(kind, count)| (kind.as_str().to_string(), Value::from(*count)))
                .collect(),
        }
    }
}

impl From<&PersistedStatistics> for Statistics {
    fn from(saved: &PersistedStatistics) -> Self {
        Self {
            rounds: saved.rounds,
            wins: saved.wins,
            lost: saved.lost,
            consecutive_wins: saved.consecutive_wins,
            highest_consecutive_wins: saved.highest_consecutive_wins,
            correct_letter_count: saved.correct_letter_count,
            wrong_letter_count: saved.wrong_letter_count,
            no_wrong_letters_count: saved.no_wrong_letters_count,
            helpers_count: saved
                .helpers_count
                .iter()
                .filter_map(|(name, count)| Some((HelperKind::from_name(name)?, count.as_u64()?)))
                .collect(),
        }
    }
}

pub trait ConfigStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedConfig>, PersistError>;
    fn save(&self, cfg: &PersistedConfig) -> Result<(), PersistError>;
}

pub trait StatisticsStore {
    fn load(&self) -> Result<Option<PersistedStatistics>, PersistError>;
    fn save(&self, stats: &PersistedStatistics) -> Result<(), PersistError>;
}

fn write_whole(path: &Path, data: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Option<PersistedConfig>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(Some(PersistedConfig::from_json(&value)))
    }

    fn save(&self, cfg: &PersistedConfig) -> Result<(), PersistError> {
        let data = serde_json::to_vec_pretty(cfg)?;
        write_whole(&self.path, &data)
    }
}

#[derive(Debug, Clone)]
pub struct FileStatisticsStore {
    path: PathBuf,
}

impl FileStatisticsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::statistics_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileStatisticsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsStore for FileStatisticsStore {
    fn load(&self) -> Result<Option<PersistedStatistics>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        PersistedStatistics::decode(&text).map(Some)
    }

    fn save(&self, stats: &PersistedStatistics) -> Result<(), PersistError> {
        write_whole(&self.path, stats.encode()?.as_bytes())
    }
}

/// Front door used by the session: failures are logged, never returned.
pub struct Persistence {
    config: Box<dyn ConfigStore>,
    statistics: Box<dyn StatisticsStore>,
}

impl Persistence {
    pub fn new(
        config: impl ConfigStore + 'static,
        statistics: impl StatisticsStore + 'static,
    ) -> Self {
        Self {
            config: Box::new(config),
            statistics: Box::new(statistics),
        }
    }

    /// Reads the saved configuration and applies it to `engine`.
    pub fn load_config(&self, engine: &mut dyn GameEngine) -> Option<PersistedConfig> {
        match self.config.load() {
            Ok(Some(cfg)) => {
                cfg.apply(engine);
                log::info!("restored configuration");
                Some(cfg)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("failed to load configuration: {e}");
                None
            }
        }
    }

    pub fn load_statistics(&self) -> Option<PersistedStatistics> {
        match self.statistics.load() {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("failed to load statistics: {e}");
                None
            }
        }
    }

    /// Saves the engine configuration, if the engine has any.
    pub fn save_config(&self, engine: &dyn GameEngine) {
        let Some(config) = engine.config() else {
            return;
        };
        if let Err(e) = self.config.save(&PersistedConfig::from(&config)) {
            log::warn!("failed to save configuration: {e}");
        }
    }

    pub fn save_statistics(&self, engine: &dyn GameEngine) {
        let Some(stats) = engine.statistics() else {
            return;
        };
        if let Err(e) = self.statistics.save(&PersistedStatistics::from(stats)) {
            log::warn!("failed to save statistics: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stub::StubEngine;
    use assert_matches::assert_matches;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_stats() -> PersistedStatistics {
        PersistedStatistics {
            rounds: 12,
            wins: 8,
            lost: 4,
            consecutive_wins: 2,
            highest_consecutive_wins: 5,
            correct_letter_count: 40,
            wrong_letter_count: 17,
            no_wrong_letters_count: 3,
            helpers_count: BTreeMap::from([("reveal_hint".to_string(), json!(2))]),
        }
    }

    #[test]
    fn statistics_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let store = FileStatisticsStore::with_path(dir.path().join("statistics.txt"));
        let stats = sample_stats();
        store.save(&stats).unwrap();
        assert_eq!(store.load().unwrap(), Some(stats));
    }

    #[test]
    fn statistics_file_is_not_plain_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("statistics.txt");
        FileStatisticsStore::with_path(&path)
            .save(&sample_stats())
            .unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("wins"));
    }

    #[test]
    fn non_numeric_counters_default_to_zero() {
        let blob = STANDARD.encode(r#"{"wins":"abc","lost":"3","rounds":null,"consecutiveWins":-2}"#);
        let stats = PersistedStatistics::decode(&blob).unwrap();
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.lost, 3);
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.consecutive_wins, 0);
        assert_eq!(stats.highest_consecutive_wins, 0);
    }

    #[test]
    fn misspelled_correct_letter_key_is_accepted() {
        let blob = STANDARD.encode(r#"{"correctLeterCount":9}"#);
        assert_eq!(
            PersistedStatistics::decode(&blob).unwrap().correct_letter_count,
            9
        );
    }

    #[test]
    fn both_spellings_of_correct_letters_keep_the_record() {
        let blob = STANDARD.encode(
            r#"{"wins":5,"rounds":9,"correctLeterCount":2,"correctLetterCount":3}"#,
        );
        let stats = PersistedStatistics::decode(&blob).unwrap();
        assert_eq!(stats.wins, 5);
        assert_eq!(stats.rounds, 9);
        assert_eq!(stats.correct_letter_count, 3);
    }

    #[test]
    fn duplicate_keys_do_not_reject_the_record() {
        let blob = STANDARD.encode(r#"{"wins":5,"lost":1,"lost":2}"#);
        let stats = PersistedStatistics::decode(&blob).unwrap();
        assert_eq!(stats.wins, 5);
        assert_eq!(stats.lost, 2);
    }

    #[test]
    fn helper_counts_are_kept_verbatim() {
        let blob = STANDARD.encode(r#"{"helpersCount":{"reveal_letter":"x","0":4}}"#);
        let stats = PersistedStatistics::decode(&blob).unwrap();
        assert_eq!(stats.helpers_count.get("reveal_letter"), Some(&json!("x")));
        assert_eq!(stats.helpers_count.get("0"), Some(&json!(4)));

        let engine_stats = Statistics::from(&stats);
        assert!(engine_stats.helpers_count.is_empty());
    }

    #[test]
    fn garbage_statistics_fail_to_decode() {
        assert_matches!(
            PersistedStatistics::decode("!!not base64!!"),
            Err(PersistError::Base64(_))
        );
    }

    #[test]
    fn missing_files_load_as_none() {
        let dir = tempdir().unwrap();
        let config = FileConfigStore::with_path(dir.path().join("none.json"));
        let stats = FileStatisticsStore::with_path(dir.path().join("none.txt"));
        assert_matches!(config.load(), Ok(None));
        assert_matches!(stats.load(), Ok(None));
    }

    #[test]
    fn config_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = PersistedConfig {
            language: Some("es".into()),
            categories: BTreeSet::from(["animales".to_string()]),
            difficulty: Some(Difficulty::Hard),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), Some(cfg));
    }

    #[test]
    fn partial_config_keeps_what_parses() {
        let cfg = PersistedConfig::from_json(&json!({
            "language": 42,
            "categories": ["food", 7, "animals"],
            "difficulty": 1
        }));
        assert_eq!(cfg.language, None);
        assert_eq!(cfg.categories.len(), 2);
        assert_eq!(cfg.difficulty, Some(Difficulty::Normal));

        let named = PersistedConfig::from_json(&json!({ "difficulty": "Hard" }));
        assert_eq!(named.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn apply_sets_language_categories_and_difficulty() {
        let mut engine = StubEngine::new();
        let cfg = PersistedConfig {
            language: Some("en".into()),
            categories: BTreeSet::from(["food".to_string()]),
            difficulty: Some(Difficulty::Easy),
        };
        cfg.apply(&mut engine);
        assert_eq!(engine.language.as_deref(), Some("en"));
        assert_eq!(engine.selected, vec!["food".to_string()]);
        assert_eq!(engine.difficulty, Some(Difficulty::Easy));
        assert_eq!(
            engine.calls,
            vec!["set_language", "add_category", "set_difficulty"]
        );
    }

    #[test]
    fn corrupt_files_degrade_to_none() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let stats_path = dir.path().join("statistics.txt");
        fs::write(&config_path, "{ not json").unwrap();
        fs::write(&stats_path, "%%%").unwrap();
        let persistence = Persistence::new(
            FileConfigStore::with_path(&config_path),
            FileStatisticsStore::with_path(&stats_path),
        );
        let mut engine = StubEngine::new();
        assert!(persistence.load_config(&mut engine).is_none());
        assert!(persistence.load_statistics().is_none());
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn engine_statistics_roundtrip() {
        let mut stats = Statistics {
            wins: 3,
            ..Statistics::default()
        };
        stats.helpers_count.insert(HelperKind::DiscardLetter, 2);
        let saved = PersistedStatistics::from(&stats);
        assert_eq!(Statistics::from(&saved), stats);
    }
}
