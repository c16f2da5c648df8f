//! Configuration file I/O operations

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.sixtysix/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sixtysix")
    }

    /// Get the global config file path (~/.sixtysix/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path`, or the global config when `None`. A missing file gives
    /// the defaults; an unreadable one is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Write raw config text to `path`.
    ///
    /// The text must parse as a [`Config`], so comments in a template are
    /// kept as written. Writers serialize on `<path>.lock`, and the new text
    /// is staged in `<path>.tmp` before replacing the file, so readers see
    /// either the old file or the new one.
    pub fn write_file(path: &Path, content: &str) -> Result<()> {
        toml::from_str::<Config>(content)
            .with_context(|| format!("Refusing to write invalid config to {}", path.display()))?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let guard_path = path.with_extension("toml.lock");
        let guard = File::create(&guard_path)
            .with_context(|| format!("Failed to open {}", guard_path.display()))?;
        guard
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {}", guard_path.display()))?;

        let staged = path.with_extension("toml.tmp");
        let mut file =
            File::create(&staged).with_context(|| format!("Failed to open {}", staged.display()))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .with_context(|| format!("Failed to write {}", staged.display()))?;
        drop(file);

        fs::rename(&staged, path)
            .with_context(|| format!("Failed to replace config: {}", path.display()))
    }
}
