//! Resolve the fragment uniforms for a configured sky.

use glam::Vec3;
use skydome_config::SkyConfig;
use skydome_model::{CoefficientDataset, FragmentUniforms, HosekWilkieParams, SkyState, solve};

use crate::error::PreviewError;

/// Build the fragment uniforms for `sky`.
///
/// Explicit coefficients are used as given; otherwise they are solved from
/// the configured dataset.
pub fn resolve_uniforms(sky: &SkyConfig) -> Result<FragmentUniforms, PreviewError> {
    let state = SkyState::from_angles(
        sky.turbidity,
        Vec3::from_array(sky.albedo),
        sky.sun_elevation,
        sky.sun_azimuth,
    );

    let params = if let Some(coefficients) = sky.coefficients {
        tracing::debug!("Using explicit sky coefficients");
        HosekWilkieParams::from_rgb_arrays(coefficients)
    } else if let Some(path) = &sky.dataset {
        let dataset = CoefficientDataset::load(path)?;
        let params = solve(&state, &dataset)?;
        tracing::info!(
            turbidity = sky.turbidity,
            sun_elevation = sky.sun_elevation,
            "Solved sky coefficients from {}",
            path.display()
        );
        params
    } else {
        return Err(PreviewError::NoCoefficientSource);
    };

    Ok(FragmentUniforms {
        params,
        sun_direction: state.sun_direction,
    })
}
