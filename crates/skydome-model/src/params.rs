//! The ten RGB coefficient vectors consumed by the sky fragment stage.

use glam::Vec3;

/// Number of coefficient vectors bound to the fragment stage.
pub const PARAM_COUNT: usize = 10;

/// Named slots of the coefficient array. The discriminant is the uniform index,
/// and the order is part of the shader contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coefficient {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    /// Radiance at zenith; rescales the distribution into absolute radiance.
    Z = 9,
}

impl Coefficient {
    /// All slots in uniform order.
    pub const ALL: [Coefficient; PARAM_COUNT] = [
        Coefficient::A,
        Coefficient::B,
        Coefficient::C,
        Coefficient::D,
        Coefficient::E,
        Coefficient::F,
        Coefficient::G,
        Coefficient::H,
        Coefficient::I,
        Coefficient::Z,
    ];

    /// Index of this slot in the `params` uniform array.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Hosek-Wilkie coefficients A..I plus the zenith radiance Z, one `Vec3` per
/// slot with one component per color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HosekWilkieParams {
    pub values: [Vec3; PARAM_COUNT],
}

impl HosekWilkieParams {
    /// Wrap an ordered coefficient array (A,B,C,D,E,F,G,H,I,Z).
    pub fn new(values: [Vec3; PARAM_COUNT]) -> Self {
        Self { values }
    }

    /// Build from plain `[r, g, b]` triples, e.g. as read from a config file.
    pub fn from_rgb_arrays(values: [[f32; 3]; PARAM_COUNT]) -> Self {
        Self {
            values: values.map(Vec3::from_array),
        }
    }

    /// Plain `[r, g, b]` triples in uniform order.
    pub fn to_rgb_arrays(&self) -> [[f32; 3]; PARAM_COUNT] {
        self.values.map(|v| v.to_array())
    }

    /// Coefficient vector for the given slot.
    pub fn get(&self, slot: Coefficient) -> Vec3 {
        self.values[slot.index()]
    }

    /// Replace the coefficient vector for the given slot.
    pub fn set(&mut self, slot: Coefficient, value: Vec3) {
        self.values[slot.index()] = value;
    }

    /// Radiance at zenith (`params[9]`).
    pub fn zenith(&self) -> Vec3 {
        self.get(Coefficient::Z)
    }
}

impl Default for HosekWilkieParams {
    fn default() -> Self {
        Self {
            values: [Vec3::ZERO; PARAM_COUNT],
        }
    }
}

impl From<[[f32; 3]; PARAM_COUNT]> for HosekWilkieParams {
    fn from(values: [[f32; 3]; PARAM_COUNT]) -> Self {
        Self::from_rgb_arrays(values)
    }
}
