//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level sky preview configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Atmosphere and sun settings.
    pub sky: SkyConfig,
    /// Preview image settings.
    pub preview: PreviewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Atmosphere and sun configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Atmospheric turbidity, 1 (clear) to 10 (hazy).
    pub turbidity: f32,
    /// Ground albedo per color channel.
    pub albedo: [f32; 3],
    /// Sun elevation above the horizon in radians.
    pub sun_elevation: f32,
    /// Sun azimuth about the zenith in radians.
    pub sun_azimuth: f32,
    /// RON coefficient dataset to solve the model parameters from.
    pub dataset: Option<PathBuf>,
    /// Explicit parameters A..I, Z. Takes precedence over `dataset`.
    pub coefficients: Option<[[f32; 3]; 10]>,
}

/// How the preview maps pixels to view directions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ProjectionMode {
    /// Full sphere: longitude across, latitude down.
    #[default]
    Equirectangular,
    /// Pinhole view through the sky camera.
    Perspective,
}

/// Preview image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub projection: ProjectionMode,
    /// Vertical field of view for the perspective projection.
    pub fov_y_degrees: f32,
    /// Camera yaw in radians (perspective only).
    pub yaw: f32,
    /// Camera pitch in radians (perspective only).
    pub pitch: f32,
    /// Linear exposure applied before tone mapping.
    pub exposure: f32,
    /// Output PNG path.
    pub output: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            turbidity: 4.0,
            albedo: [0.1; 3],
            sun_elevation: 0.5,
            sun_azimuth: 0.0,
            dataset: None,
            coefficients: None,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            projection: ProjectionMode::Equirectangular,
            fov_y_degrees: 70.0,
            yaw: 0.0,
            pitch: 0.0,
            exposure: 1.0,
            output: PathBuf::from("sky.png"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `config.ron` and compare it with `self`.
    ///
    /// Returns `Some(new_config)` when the file on disk differs and `None`
    /// when it does not. The `skydome` binary renders once and never calls
    /// this; it is for hosts that keep a sky alive across edits and poll the
    /// file between frames. Unlike [`Config::load_or_create`], a missing file
    /// is an error and is not recreated.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
