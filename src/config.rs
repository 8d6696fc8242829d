use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the active configuration (loaded once on first call).
pub fn current() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the list `get_default` should prefer over the store's own
    /// default.
    pub default_calendar: Option<String>,
    pub access_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_calendar: None,
            access_timeout_secs: 60,
            fetch_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(raw.into_config())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("remindkit").join("config.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    default_calendar: Option<String>,
    access_timeout_secs: Option<u64>,
    fetch_timeout_secs: Option<u64>,
}

impl RawConfig {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        config.default_calendar = self.default_calendar;
        if let Some(secs) = self.access_timeout_secs {
            config.access_timeout_secs = secs;
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config.fetch_timeout_secs = secs;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let raw: RawConfig = toml::from_str("").unwrap();
        let config = raw.into_config();
        assert_eq!(config.default_calendar, None);
        assert_eq!(config.access_timeout_secs, 60);
        assert_eq!(config.fetch_timeout_secs, 60);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let raw: RawConfig = toml::from_str(
            "default_calendar = \"Work\"\nfetch_timeout_secs = 10\n",
        )
        .unwrap();
        let config = raw.into_config();
        assert_eq!(config.default_calendar.as_deref(), Some("Work"));
        assert_eq!(config.access_timeout_secs, 60);
        assert_eq!(config.fetch_timeout_secs, 10);
    }
}
