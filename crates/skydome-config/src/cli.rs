//! Command-line argument parsing for the sky preview.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ProjectionMode};

/// Sky preview command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skydome", about = "Render a Hosek-Wilkie sky preview")]
pub struct CliArgs {
    /// Atmospheric turbidity (1-10).
    #[arg(long)]
    pub turbidity: Option<f32>,

    /// Sun elevation in radians.
    #[arg(long, allow_negative_numbers = true)]
    pub sun_elevation: Option<f32>,

    /// Sun azimuth in radians.
    #[arg(long, allow_negative_numbers = true)]
    pub sun_azimuth: Option<f32>,

    /// RON coefficient dataset.
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Convert a published `ArHosekSkyModelData_RGB.h` and install it as the
    /// default dataset in the config directory.
    #[arg(long, value_name = "HEADER")]
    pub import_header: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Image width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Pixel-to-direction mapping.
    #[arg(long, value_enum)]
    pub projection: Option<ProjectionMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(t) = args.turbidity {
            self.sky.turbidity = t;
        }
        if let Some(e) = args.sun_elevation {
            self.sky.sun_elevation = e;
        }
        if let Some(a) = args.sun_azimuth {
            self.sky.sun_azimuth = a;
        }
        if let Some(ref path) = args.dataset {
            self.sky.dataset = Some(path.clone());
        }
        if let Some(ref path) = args.output {
            self.preview.output = path.clone();
        }
        if let Some(w) = args.width {
            self.preview.width = w;
        }
        if let Some(h) = args.height {
            self.preview.height = h;
        }
        if let Some(p) = args.projection {
            self.preview.projection = p;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
