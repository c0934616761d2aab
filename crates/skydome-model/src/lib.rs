//! Hosek-Wilkie sky model: CPU reference of the sky-dome shader stages and the
//! coefficient solver that feeds them.

pub mod dataset;
pub mod params;
pub mod radiance;
pub mod solver;
pub mod stages;
pub mod sun;

pub use dataset::{CoefficientDataset, DATASET_FILE_NAME, DatasetError};
pub use params::{Coefficient, HosekWilkieParams, PARAM_COUNT};
pub use radiance::{HORIZON_EPSILON, chi, hosek_wilkie, sky_radiance};
pub use solver::{SkyState, evaluate, evaluate_spline, exposure_scale, solve};
pub use stages::{
    FragmentUniforms, SkySample, SkyUniforms, VertexOutput, VertexUniforms, ViewAngles, ZENITH,
    fragment_stage, sample_sky, vertex_stage,
};
pub use sun::{SUN_DISK_EXPONENT, SUN_DISK_INTENSITY, sun_direction, sun_disk, sun_zenith_angle};
