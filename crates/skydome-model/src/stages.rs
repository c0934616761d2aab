//! CPU reference of the sky vertex and fragment stages.
//!
//! These functions mirror `vs_sky` / `fs_sky` in the WGSL shader one
//! operation at a time, so the GPU output can be checked against them and the
//! preview tool can render without a device. Uniform state is passed
//! explicitly per draw call instead of living in globals.

use glam::{Mat4, Vec3, Vec4};

use crate::params::HosekWilkieParams;
use crate::radiance::sky_radiance;
use crate::sun::sun_disk;

/// The up axis of the sky dome; `theta` is measured from it.
pub const ZENITH: Vec3 = Vec3::Y;

/// Camera transforms bound to the vertex stage for one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexUniforms {
    /// Perspective projection.
    pub projection: Mat4,
    /// View rotation without translation, so the dome stays centered on the eye.
    pub orientation: Mat4,
}

impl VertexUniforms {
    /// Combined `projection * orientation` transform.
    pub fn clip_from_object(&self) -> Mat4 {
        self.projection * self.orientation
    }
}

impl Default for VertexUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            orientation: Mat4::IDENTITY,
        }
    }
}

/// Sky model inputs bound to the fragment stage for one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentUniforms {
    /// Coefficients A..I and zenith radiance Z, in uniform order.
    pub params: HosekWilkieParams,
    /// Unit vector pointing at the sun.
    pub sun_direction: Vec3,
}

/// Everything bound for one sky draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyUniforms {
    pub vertex: VertexUniforms,
    pub fragment: FragmentUniforms,
}

/// Outputs of the vertex stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexOutput {
    /// Clip-space position, before the perspective divide.
    pub clip_position: Vec4,
    /// Unit object-space direction, interpolated by the rasterizer.
    pub frag_pos: Vec3,
}

/// Transform one dome vertex.
///
/// A zero `position` produces a NaN `frag_pos`; the mesh must not contain the
/// dome center.
pub fn vertex_stage(position: Vec3, uniforms: &VertexUniforms) -> VertexOutput {
    VertexOutput {
        clip_position: uniforms.clip_from_object() * position.extend(1.0),
        frag_pos: position.normalize(),
    }
}

/// Angles between a view direction, the sun and the zenith.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewAngles {
    /// Cosine of the zenith angle, clamped to `[0, 1]`.
    pub cos_theta: f32,
    /// Angle between view and sun in radians, in `[0, π]`.
    pub gamma: f32,
    /// Cosine of `gamma`, unclamped.
    pub cos_gamma: f32,
}

impl ViewAngles {
    /// Angles for unit `view` and `sun` vectors about an arbitrary `up` axis.
    pub fn new(view: Vec3, sun: Vec3, up: Vec3) -> Self {
        let cos_gamma = view.dot(sun);
        Self {
            // Below the horizon the model is not defined; clamp instead of rejecting.
            cos_theta: view.dot(up).clamp(0.0, 1.0),
            // The dot product of unit vectors can round past ±1.
            gamma: cos_gamma.clamp(-1.0, 1.0).acos(),
            cos_gamma,
        }
    }
}

/// Breakdown of one fragment evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkySample {
    pub angles: ViewAngles,
    /// `Z · F(θ, γ)`.
    pub sky: Vec3,
    /// Sun-disk term added to every channel.
    pub sun_disk: f32,
}

impl SkySample {
    /// Final HDR radiance.
    pub fn radiance(&self) -> Vec3 {
        self.sky + Vec3::splat(self.sun_disk)
    }

    /// Final fragment color with opaque alpha.
    pub fn color(&self) -> Vec4 {
        self.radiance().extend(1.0)
    }
}

/// Evaluate the fragment stage and keep the intermediate terms.
pub fn sample_sky(frag_pos: Vec3, uniforms: &FragmentUniforms) -> SkySample {
    // Interpolation across a triangle shortens the vector; renormalize.
    let view = frag_pos.normalize();
    let angles = ViewAngles::new(view, uniforms.sun_direction, ZENITH);

    SkySample {
        angles,
        sky: sky_radiance(
            angles.cos_theta,
            angles.gamma,
            angles.cos_gamma,
            &uniforms.params,
        ),
        sun_disk: sun_disk(angles.cos_gamma),
    }
}

/// Fragment stage: HDR sky color for an interpolated direction.
pub fn fragment_stage(frag_pos: Vec3, uniforms: &FragmentUniforms) -> Vec4 {
    sample_sky(frag_pos, uniforms).color()
}
