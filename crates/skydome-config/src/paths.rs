//! Platform directories for the persisted config and log files.

use std::path::PathBuf;

use crate::error::ConfigError;

const APP_NAME: &str = "skydome";

/// Resolved per-user directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkydomeDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `skydome.log` in debug builds.
    pub log_dir: PathBuf,
}

impl SkydomeDirs {
    /// Resolve directories from the OS conventions, e.g.
    /// `~/.config/skydome/` on Linux.
    pub fn resolve() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::under(base.join(APP_NAME)))
    }

    /// Lay the directories out under an explicit root (e.g. `--config`).
    pub fn under(root: PathBuf) -> Self {
        Self {
            log_dir: root.join("logs"),
            config_dir: root,
        }
    }
}
