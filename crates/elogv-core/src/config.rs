//! Configuration types for elogv.
//!
//! [`Config::load`] reads `~/.config/elogv/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[elog]
# Empty: $PORT_LOGDIR/elog, falling back to /var/log/portage/elog
dir = ""

[state]
# Empty: $XDG_STATE_HOME/elogv/state.json
path = ""
"#;

const DEFAULT_PORT_LOGDIR: &str = "/var/log/portage";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/elogv/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub elog: ElogConfig,
    #[serde(default)]
    pub state: StateConfig,
}

/// `[elog]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElogConfig {
    #[serde(default)]
    pub dir: String,
}

/// `[state]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/elogv/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The elog directory to scan: the configured one, or auto-detected.
    pub fn elog_dir(&self) -> PathBuf {
        if !self.elog.dir.is_empty() {
            return PathBuf::from(&self.elog.dir);
        }
        let logdir = std::env::var("PORT_LOGDIR")
            .ok()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_PORT_LOGDIR.to_string());
        resolve_elog_dir(Path::new(&logdir))
    }

    /// Where the read/important flag sets are persisted.
    pub fn state_path(&self) -> PathBuf {
        if !self.state.path.is_empty() {
            return PathBuf::from(&self.state.path);
        }
        xdg_dir("XDG_STATE_HOME", &[".local", "state"])
            .join("elogv")
            .join("state.json")
    }
}

/// Portage writes elogs to `$PORT_LOGDIR/elog/`; accept either the log dir
/// itself or that subdirectory.
pub fn resolve_elog_dir(logdir: &Path) -> PathBuf {
    let nested = logdir.join("elog");
    if nested.is_dir() {
        nested
    } else {
        logdir.to_path_buf()
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
        .join("elogv")
        .join("config.toml")
}

fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()));
            fallback.iter().fold(home, |p, c| p.join(c))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
