//! Coefficient solver: turns turbidity, ground albedo and sun position into the
//! ten coefficient vectors bound to the fragment stage.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::dataset::{
    COEFFICIENTS_PER_POINT, CoefficientDataset, DatasetError, SPLINE_POINTS, TURBIDITY_LEVELS,
};
use crate::params::{Coefficient, HosekWilkieParams};
use crate::radiance::hosek_wilkie;
use crate::sun::{sun_direction, sun_zenith_angle};

/// Rec. 709 luminance weights used to normalize the zenith radiance.
pub const LUMINANCE_WEIGHTS: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// Dataset coefficient slot for each distribution coefficient. The tables
/// store I before H.
const DATASET_SLOTS: [(Coefficient, usize); COEFFICIENTS_PER_POINT] = [
    (Coefficient::A, 0),
    (Coefficient::B, 1),
    (Coefficient::C, 2),
    (Coefficient::D, 3),
    (Coefficient::E, 4),
    (Coefficient::F, 5),
    (Coefficient::G, 6),
    (Coefficient::H, 8),
    (Coefficient::I, 7),
];

/// Atmosphere and sun configuration the coefficients are solved for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyState {
    /// Atmospheric turbidity, meaningful over 1..=10.
    pub turbidity: f32,
    /// Ground albedo per channel, 0..=1.
    pub albedo: Vec3,
    /// Unit vector pointing at the sun.
    pub sun_direction: Vec3,
}

impl SkyState {
    /// State with the sun placed by elevation and azimuth in radians.
    pub fn from_angles(turbidity: f32, albedo: Vec3, elevation: f32, azimuth: f32) -> Self {
        Self {
            turbidity,
            albedo,
            sun_direction: sun_direction(elevation, azimuth),
        }
    }
}

/// Quintic Bézier through six control points spaced `stride` apart.
pub fn evaluate_spline(dataset: &[f32], start: usize, stride: usize, value: f32) -> f32 {
    let inv = 1.0 - value;
    let point = |i: usize| dataset[start + i * stride];

    1.0 * inv.powi(5) * point(0)
        + 5.0 * inv.powi(4) * value * point(1)
        + 10.0 * inv.powi(3) * value.powi(2) * point(2)
        + 10.0 * inv.powi(2) * value.powi(3) * point(3)
        + 5.0 * inv * value.powi(4) * point(4)
        + 1.0 * value.powi(5) * point(5)
}

/// Interpolate one coefficient from a table slice that starts at that
/// coefficient's first entry.
///
/// The splines are parameterized by the cube root of the sun elevation; the
/// result is blended linearly between the two neighboring integer turbidity
/// levels and between the albedo-0 and albedo-1 tables.
pub fn evaluate(dataset: &[f32], stride: usize, turbidity: f32, albedo: f32, sun_theta: f32) -> f32 {
    let elevation_k = (1.0 - sun_theta / FRAC_PI_2).max(0.0).powf(1.0 / 3.0);

    let turbidity0 = (turbidity as usize).clamp(1, TURBIDITY_LEVELS);
    let turbidity1 = (turbidity0 + 1).min(TURBIDITY_LEVELS);
    let turbidity_k = (turbidity - turbidity0 as f32).clamp(0.0, 1.0);

    let level = stride * SPLINE_POINTS;
    let albedo0 = 0;
    let albedo1 = level * TURBIDITY_LEVELS;

    let a0t0 = evaluate_spline(dataset, albedo0 + level * (turbidity0 - 1), stride, elevation_k);
    let a1t0 = evaluate_spline(dataset, albedo1 + level * (turbidity0 - 1), stride, elevation_k);
    let a0t1 = evaluate_spline(dataset, albedo0 + level * (turbidity1 - 1), stride, elevation_k);
    let a1t1 = evaluate_spline(dataset, albedo1 + level * (turbidity1 - 1), stride, elevation_k);

    a0t0 * (1.0 - albedo) * (1.0 - turbidity_k)
        + a1t0 * albedo * (1.0 - turbidity_k)
        + a0t1 * (1.0 - albedo) * turbidity_k
        + a1t1 * albedo * turbidity_k
}

/// Exposure factor applied to the zenith radiance; brightens the sky as the
/// sun climbs.
pub fn exposure_scale(sun_y: f32) -> f32 {
    0.6 + 0.45 * (sun_y / FRAC_PI_2)
}

/// Solve the ten coefficient vectors for a sky state.
///
/// The zenith radiance is normalized so the sky luminance towards the sun
/// (without the disk) is one, then scaled by [`exposure_scale`].
pub fn solve(state: &SkyState, dataset: &CoefficientDataset) -> Result<HosekWilkieParams, DatasetError> {
    dataset.validate()?;

    let sun = state.sun_direction.normalize();
    let sun_theta = sun_zenith_angle(sun);
    let mut params = HosekWilkieParams::default();

    for channel in 0..3 {
        let albedo = state.albedo[channel];
        let table = &dataset.rgb[channel];

        for (slot, offset) in DATASET_SLOTS {
            params.values[slot.index()][channel] = evaluate(
                &table[offset..],
                COEFFICIENTS_PER_POINT,
                state.turbidity,
                albedo,
                sun_theta,
            );
        }

        params.values[Coefficient::Z.index()][channel] = evaluate(
            &dataset.radiance[channel],
            1,
            state.turbidity,
            albedo,
            sun_theta,
        );
    }

    let toward_sun = params.zenith() * hosek_wilkie(sun_theta.cos(), 0.0, 1.0, &params);
    let luminance = toward_sun.dot(LUMINANCE_WEIGHTS);
    let zenith = params.zenith() / luminance * exposure_scale(sun.y);
    params.set(Coefficient::Z, zenith);

    log::debug!(
        "Solved sky coefficients: turbidity={} sun_theta={:.4} luminance={:.4}",
        state.turbidity,
        sun_theta,
        luminance
    );

    Ok(params)
}
