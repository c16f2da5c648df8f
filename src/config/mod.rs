//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ReminderDefaults, RemoteSettings, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub reminder: ReminderDefaults,
}

impl Config {
    /// Directory holding challenge data for the configured backend
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StorageBackend;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.reminder.hour, 20);
    }

    #[test]
    fn test_sections_parse() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            backend = "sqlite"
            data_dir = "/tmp/sixtysix"

            [remote]
            enabled = true
            base_url = "https://example.test"
            api_key = "anon"
            user_id = "user-1"

            [reminder]
            hour = 7
            minute = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/sixtysix"));
        assert!(config.remote.is_ready());
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.reminder.minute, 30);
    }

    #[test]
    fn test_remote_needs_url_and_key() {
        let mut config = Config::default();
        config.remote.enabled = true;
        assert!(!config.remote.is_ready());
        config.remote.base_url = "https://example.test".into();
        config.remote.api_key = "anon".into();
        assert!(config.remote.is_ready());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[storage]\nbackend = \"redis\"\n");
        assert!(result.is_err());
    }
}
