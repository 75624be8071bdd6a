//! Endpoint and file settings, with an optional `shop.toml` overlay

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SHEET_ID: &str = "1MxjocKFqa4Chv9HHiOeom3LlGLbdicZXaR_41arPEkk";
pub const DEFAULT_WEBHOOK_URL: &str = "https://discord.com/api/webhooks/1426471170437550162/rEwrlOkvyX38VSzOaWBu3AM-tXsinIhf-kHfQc9K2VWTC0BWywR6V-MMNJRt633Ytm3";
pub const DEFAULT_LOG_FILE: &str = "purchases.log";

const CONFIG_FILE_NAME: &str = "shop.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Could not encode settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub sheet_id: String,
    /// Empty disables order notifications
    pub webhook_url: String,
    pub log_file: PathBuf,
    pub http_timeout_secs: u64,
    pub notify_attempts: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            http_timeout_secs: 10,
            notify_attempts: 2,
        }
    }
}

impl ShopConfig {
    /// Defaults, overlaid by the user config dir file, then by `./shop.toml`
    pub fn load() -> Self {
        let mut config = Self::default();
        let candidates = [user_config_path(), Some(PathBuf::from(CONFIG_FILE_NAME))];

        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(loaded) => {
                    log::info!("Configuration loaded from {}", path.display());
                    config = loaded;
                }
                Err(e) => log::error!("{}", e),
            }
        }

        config
    }

    /// Read one config file. Keys it leaves out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the whole config as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, contents).map_err(write_err)?;
        log::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Where settings get saved: the working directory file when one is
    /// already there (it wins on load), otherwise the user config dir.
    pub fn save_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }
        user_config_path().unwrap_or(local)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("block-shop").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sheet_id = \"abc\"\nnotify_attempts = 5").unwrap();

        let config = ShopConfig::from_file(file.path()).unwrap();
        assert_eq!(config.sheet_id, "abc");
        assert_eq!(config.notify_attempts, 5);
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.log_file, PathBuf::from("purchases.log"));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "notify_attempts = \"many\"").unwrap();

        assert!(matches!(ShopConfig::from_file(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shop.toml");
        let config = ShopConfig {
            sheet_id: "sheet-42".to_string(),
            webhook_url: String::new(),
            ..ShopConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(ShopConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_save_into_unwritable_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file can't be a parent directory
        let path = file.path().join("shop.toml");

        let result = ShopConfig::default().save_to(&path);
        assert!(matches!(result, Err(ConfigError::Write { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShopConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
