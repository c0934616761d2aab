//! Sky preview: solves Hosek-Wilkie coefficients for the configured sky and
//! renders them through the reference shader stages into a PNG.

mod coefficients;
mod error;
mod output;
mod render;
mod tonemap;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use skydome_config::{CliArgs, Config, SkydomeDirs};
use skydome_model::{CoefficientDataset, DATASET_FILE_NAME};

use crate::error::PreviewError;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => SkydomeDirs::under(root.clone()),
        None => match SkydomeDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve config directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    skydome_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let result = locate_dataset(&mut config, &dirs, args.import_header.as_deref())
        .and_then(|()| run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Install an imported header as the default dataset, and point the sky at
/// the installed dataset when the config names no coefficient source.
fn locate_dataset(
    config: &mut Config,
    dirs: &SkydomeDirs,
    import_header: Option<&Path>,
) -> Result<(), PreviewError> {
    let installed = dirs.config_dir.join(DATASET_FILE_NAME);

    if let Some(header) = import_header {
        CoefficientDataset::load_arhosek_header(header)?.save(&installed)?;
        tracing::info!("Installed coefficient dataset at {}", installed.display());
    }

    if config.sky.coefficients.is_none() && config.sky.dataset.is_none() && installed.exists() {
        tracing::debug!("Using installed dataset {}", installed.display());
        config.sky.dataset = Some(installed);
    }
    Ok(())
}

/// Render the configured sky to `config.preview.output`.
fn run(config: &Config) -> Result<(), PreviewError> {
    let uniforms = coefficients::resolve_uniforms(&config.sky)?;
    let image = render::render_hdr(&config.preview, &uniforms)?;
    let rgba = tonemap::to_rgba8(&image, config.preview.exposure);
    output::write_png(&config.preview.output, image.width, image.height, &rgba)?;

    tracing::info!(
        width = image.width,
        height = image.height,
        "Wrote sky preview to {}",
        config.preview.output.display()
    );
    Ok(())
}
