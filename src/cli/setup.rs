//! Config file commands

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use sixtysix::config::Config;

/// Default configuration content for `sixtysix config init`
pub const DEFAULT_CONFIG: &str = r#"# sixtysix configuration
# ======================

# Where challenge data lives.
#   backend  - "json" (one file per key), "sqlite" or "memory" (nothing kept)
#   data_dir - defaults to ~/.sixtysix/data
[storage]
backend = "json"
# data_dir = "/path/to/data"

# Optional copy of stats and activity to a remote table API.
# Writes are best effort: failures are logged and dropped.
# Leave user_id empty to stay signed out (nothing is sent).
[remote]
enabled = false
base_url = ""
api_key = ""
user_id = ""
timeout_secs = 10

# Default time for `sixtysix remind set`
[reminder]
hour = 20
minute = 0
"#;

/// Write a default config file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if path.exists() && !force {
        bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::write_file(&path, DEFAULT_CONFIG)?;

    info!("Created config at {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print the effective configuration
pub fn show_command(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to serialize config")?;

    println!("# data dir: {}", config.data_dir().display());
    print!("{}", rendered);
    Ok(())
}
