//! Configuration sections

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::StorageBackend;

/// Local storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Backend for challenge data: "json", "sqlite" or "memory"
    #[serde(default)]
    pub backend: StorageBackend,

    /// Data directory (defaults to ~/.sixtysix/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Remote mirror settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Project URL of the table API, without the `/rest/v1` suffix
    #[serde(default)]
    pub base_url: String,

    /// Public API key, sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,

    /// Signed-in user. Empty means signed out and nothing is mirrored.
    #[serde(default)]
    pub user_id: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: String::new(),
            user_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteSettings {
    /// Enabled and pointing somewhere
    pub fn is_ready(&self) -> bool {
        self.enabled && !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Default reminder time used by `remind set` without arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDefaults {
    #[serde(default = "default_reminder_hour")]
    pub hour: u32,

    #[serde(default)]
    pub minute: u32,
}

fn default_reminder_hour() -> u32 {
    20
}

impl Default for ReminderDefaults {
    fn default() -> Self {
        Self {
            hour: default_reminder_hour(),
            minute: 0,
        }
    }
}
