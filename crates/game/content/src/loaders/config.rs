//! Game configuration loader.

use std::path::Path;

use aerial_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`GameConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("debounce_ticks = 8\n").unwrap();

        assert_eq!(config.debounce_ticks, 8);
        assert_eq!(config.tick_rate_hz, GameConfig::DEFAULT_TICK_RATE_HZ);
        assert_eq!(config.starting_money, GameConfig::DEFAULT_STARTING_MONEY);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ConfigLoader::parse("tick_rate_hz = \"fast\"").is_err());
    }
}
