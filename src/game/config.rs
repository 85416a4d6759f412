use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{self, CatalogError, LevelCatalog, LevelDefinition};
use super::timer::Countdown;

const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Tunables of a game. Missing fields fall back to the reference values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub levels: Vec<LevelDefinition>,
    /// Clock value at the start of every timed level.
    pub countdown: Countdown,
    /// Pause before a failed pair turns back over, and before a finished board
    /// is reported.
    pub reveal_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            levels: catalog::reference_levels(),
            countdown: Countdown::default(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.catalog()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn catalog(&self) -> Result<LevelCatalog, CatalogError> {
        LevelCatalog::new(self.levels.clone())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Symbol;

    #[test]
    fn empty_object_yields_reference_values() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.catalog().unwrap(), LevelCatalog::reference());
        assert_eq!(config.reveal_delay(), Duration::from_secs(1));
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let raw = r#"{
            "levels": [{ "symbols": ["🐱", "🐶"], "max_moves": 4 }],
            "countdown": { "minutes": 1, "seconds": 30 }
        }"#;
        let config = GameConfig::from_json_str(raw).unwrap();
        assert_eq!(config.levels.len(), 1);
        assert_eq!(config.levels[0].symbols[1], Symbol::from("🐶"));
        assert_eq!(config.countdown, Countdown::new(1, 30));
        assert_eq!(config.reveal_delay_ms, DEFAULT_REVEAL_DELAY_MS);
    }

    #[test]
    fn countdown_may_name_a_single_field() {
        let config = GameConfig::from_json_str(r#"{"countdown":{"seconds":30}}"#).unwrap();
        assert_eq!(config.countdown, Countdown::new(0, 30));
        assert_eq!(config.levels, catalog::reference_levels());
    }

    #[test]
    fn countdown_seconds_past_a_minute_are_carried() {
        let config =
            GameConfig::from_json_str(r#"{"countdown":{"minutes":0,"seconds":90}}"#).unwrap();
        assert_eq!(config.countdown, Countdown { minutes: 1, seconds: 30 });
    }

    #[test]
    fn load_reads_a_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = GameConfig {
            countdown: Countdown::new(2, 15),
            reveal_delay_ms: 400,
            ..GameConfig::default()
        };
        fs::write(&path, config.to_json_pretty().unwrap()).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn pretty_json_reloads_identically() {
        let config = GameConfig::default();
        let raw = config.to_json_pretty().unwrap();
        assert_eq!(GameConfig::from_json_str(&raw).unwrap(), config);
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let raw = r#"{ "levels": [{ "symbols": ["a", "a"], "max_moves": 2 }] }"#;
        let err = GameConfig::from_json_str(raw).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(CatalogError::DuplicateSymbol { index: 0, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GameConfig::from_json_str("{ levels: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load(Path::new("/nonexistent/memoria/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
