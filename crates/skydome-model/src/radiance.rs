//! The Hosek-Wilkie radiance distribution, evaluated per color channel.

use glam::Vec3;

use crate::params::{Coefficient, HosekWilkieParams};

/// Bias added to `cos_theta` in the `B` exponent so the term stays finite at
/// the horizon. Reference output depends on this exact value.
pub const HORIZON_EPSILON: f32 = 0.01;

/// Mie-like phase term of the model:
/// `(1 + cos_gamma²) / (1 + H² − 2·cos_gamma·H)^1.5`, per channel.
pub fn chi(h: Vec3, cos_gamma: f32) -> Vec3 {
    let denominator = Vec3::ONE + h * h - 2.0 * cos_gamma * h;
    (1.0 + cos_gamma * cos_gamma) / denominator.powf(1.5)
}

/// Dimensionless Hosek-Wilkie distribution `F(θ, γ)`.
///
/// `cos_theta` must already be clamped to `[0, 1]`; `gamma` is the angle
/// between view and sun in radians and `cos_gamma` its cosine. The zenith
/// radiance `Z` is not applied here.
pub fn hosek_wilkie(cos_theta: f32, gamma: f32, cos_gamma: f32, params: &HosekWilkieParams) -> Vec3 {
    let a = params.get(Coefficient::A);
    let b = params.get(Coefficient::B);
    let c = params.get(Coefficient::C);
    let d = params.get(Coefficient::D);
    let e = params.get(Coefficient::E);
    let f = params.get(Coefficient::F);
    let g = params.get(Coefficient::G);
    let h = params.get(Coefficient::H);
    let i = params.get(Coefficient::I);

    let chi = chi(h, cos_gamma);

    let zenith_falloff = Vec3::ONE + a * (b / (cos_theta + HORIZON_EPSILON)).exp();
    let sun_glow = c
        + d * (e * gamma).exp()
        + f * (cos_gamma * cos_gamma)
        + g * chi
        + i * cos_theta.sqrt();

    zenith_falloff * sun_glow
}

/// Absolute sky radiance `Z · F(θ, γ)` without the sun disk.
pub fn sky_radiance(cos_theta: f32, gamma: f32, cos_gamma: f32, params: &HosekWilkieParams) -> Vec3 {
    params.zenith() * hosek_wilkie(cos_theta, gamma, cos_gamma, params)
}
