//! Configuration for the sky preview.
//!
//! Settings persist to disk as RON files, can be overridden from the command
//! line via clap, and support hot-reload detection.

mod cli;
mod config;
mod error;
mod paths;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, PreviewConfig, ProjectionMode, SkyConfig,
};
pub use error::ConfigError;
pub use paths::SkydomeDirs;
