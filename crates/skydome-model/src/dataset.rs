//! Hosek-Wilkie RGB coefficient tables, loaded from RON.
//!
//! A dataset holds the fitted spline control points the solver interpolates.
//! Each color channel has a coefficient table and a radiance table laid out as
//! `[albedo 0..2][turbidity 1..=10][control point 0..6][coefficient 0..9]`
//! (the radiance table has a single coefficient).
//!
//! The fitted values are published by Hosek and Wilkie as C arrays in
//! `ArHosekSkyModelData_RGB.h`; [`CoefficientDataset::from_arhosek_header`]
//! converts that header into this layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Number of albedo tables (albedo 0 and albedo 1).
pub const ALBEDO_TABLES: usize = 2;
/// Number of integer turbidity levels, 1 through 10.
pub const TURBIDITY_LEVELS: usize = 10;
/// Control points per quintic spline.
pub const SPLINE_POINTS: usize = 6;
/// Coefficients per control point in the coefficient table.
pub const COEFFICIENTS_PER_POINT: usize = 9;

/// Floats per channel in the coefficient table.
pub const COEFFICIENT_TABLE_LEN: usize =
    ALBEDO_TABLES * TURBIDITY_LEVELS * SPLINE_POINTS * COEFFICIENTS_PER_POINT;
/// Floats per channel in the radiance table.
pub const RADIANCE_TABLE_LEN: usize = ALBEDO_TABLES * TURBIDITY_LEVELS * SPLINE_POINTS;

/// Conventional file name of an installed dataset.
pub const DATASET_FILE_NAME: &str = "hosek_rgb.ron";

/// Names of the per-channel coefficient arrays in `ArHosekSkyModelData_RGB.h`.
pub const ARHOSEK_RGB_ARRAYS: [&str; 3] = ["datasetRGB1", "datasetRGB2", "datasetRGB3"];
/// Names of the per-channel radiance arrays in `ArHosekSkyModelData_RGB.h`.
pub const ARHOSEK_RADIANCE_ARRAYS: [&str; 3] = ["datasetRGBRad1", "datasetRGBRad2", "datasetRGBRad3"];

/// Errors raised while loading a coefficient dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Failed to read the dataset file from disk.
    #[error("failed to read dataset: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse dataset: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to write the dataset file.
    #[error("failed to write dataset: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to serialize the dataset to RON.
    #[error("failed to serialize dataset: {0}")]
    SerializeError(#[source] ron::Error),

    /// A C header lacks one of the expected array definitions.
    #[error("header has no `{0}[]` array")]
    MissingArray(&'static str),

    /// A C header array holds something other than a number.
    #[error("array `{array}` has a non-numeric entry `{token}`")]
    InvalidNumber { array: &'static str, token: String },

    /// A table does not have the expected number of entries.
    #[error("{table} table for channel {channel} has {actual} entries, expected {expected}")]
    TableLength {
        table: &'static str,
        channel: usize,
        expected: usize,
        actual: usize,
    },
}

/// Per-channel (R, G, B) spline tables of the Hosek-Wilkie model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientDataset {
    /// Coefficient tables, one per channel.
    pub rgb: [Vec<f32>; 3],
    /// Zenith radiance tables, one per channel.
    pub radiance: [Vec<f32>; 3],
}

impl CoefficientDataset {
    /// Parse and validate a dataset from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, DatasetError> {
        let dataset: CoefficientDataset = ron::from_str(source).map_err(DatasetError::ParseError)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load and validate a dataset file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path).map_err(DatasetError::ReadError)?;
        let dataset = Self::from_ron_str(&contents)?;
        log::info!("Loaded sky coefficient dataset from {}", path.display());
        Ok(dataset)
    }

    /// Convert the arrays of a published `ArHosekSkyModelData_RGB.h`.
    ///
    /// Only the six arrays named in [`ARHOSEK_RGB_ARRAYS`] and
    /// [`ARHOSEK_RADIANCE_ARRAYS`] are read; comments, the spectral and XYZ
    /// tables and the pointer tables are skipped. Values are narrowed from
    /// `double` to `f32`.
    pub fn from_arhosek_header(source: &str) -> Result<Self, DatasetError> {
        let source = strip_c_comments(source);
        let mut rgb: [Vec<f32>; 3] = Default::default();
        let mut radiance: [Vec<f32>; 3] = Default::default();
        for channel in 0..3 {
            rgb[channel] = parse_c_array(&source, ARHOSEK_RGB_ARRAYS[channel])?;
            radiance[channel] = parse_c_array(&source, ARHOSEK_RADIANCE_ARRAYS[channel])?;
        }

        let dataset = Self { rgb, radiance };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read and convert a published C header file.
    pub fn load_arhosek_header(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path).map_err(DatasetError::ReadError)?;
        let dataset = Self::from_arhosek_header(&contents)?;
        log::info!("Converted sky coefficient header {}", path.display());
        Ok(dataset)
    }

    /// Write the dataset as RON, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(DatasetError::WriteError)?;
        }
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(DatasetError::SerializeError)?;
        std::fs::write(path, serialized).map_err(DatasetError::WriteError)?;
        Ok(())
    }

    /// Check every table has the layout the solver indexes into.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (channel, table) in self.rgb.iter().enumerate() {
            if table.len() != COEFFICIENT_TABLE_LEN {
                return Err(DatasetError::TableLength {
                    table: "coefficient",
                    channel,
                    expected: COEFFICIENT_TABLE_LEN,
                    actual: table.len(),
                });
            }
        }
        for (channel, table) in self.radiance.iter().enumerate() {
            if table.len() != RADIANCE_TABLE_LEN {
                return Err(DatasetError::TableLength {
                    table: "radiance",
                    channel,
                    expected: RADIANCE_TABLE_LEN,
                    actual: table.len(),
                });
            }
        }
        Ok(())
    }

    /// A dataset whose every spline is flat: coefficient `k` of channel `c`
    /// equals `coefficients[k][c]` and the radiance equals `radiance[c]`,
    /// regardless of turbidity, albedo or sun elevation.
    pub fn uniform(coefficients: [[f32; 3]; COEFFICIENTS_PER_POINT], radiance: [f32; 3]) -> Self {
        let rgb = std::array::from_fn(|channel| {
            (0..COEFFICIENT_TABLE_LEN)
                .map(|i| coefficients[i % COEFFICIENTS_PER_POINT][channel])
                .collect()
        });
        let radiance = std::array::from_fn(|channel| vec![radiance[channel]; RADIANCE_TABLE_LEN]);
        Self { rgb, radiance }
    }
}

/// Remove `//` line comments and `/* */` block comments.
fn strip_c_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(pos) = rest.find('/') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("//") {
            rest = after.find('\n').map_or("", |end| &after[end..]);
        } else if let Some(after) = tail.strip_prefix("/*") {
            out.push(' ');
            rest = after.find("*/").map_or("", |end| &after[end + 2..]);
        } else {
            out.push('/');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Numbers inside the braces of `name[] = { ... };`.
fn parse_c_array(source: &str, name: &'static str) -> Result<Vec<f32>, DatasetError> {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';

    let mut search = 0;
    let body = loop {
        let Some(found) = source[search..].find(name) else {
            return Err(DatasetError::MissingArray(name));
        };
        let start = search + found;
        let end = start + name.len();
        search = end;

        let standalone = !source[..start].ends_with(is_ident)
            && !source[end..].starts_with(is_ident);
        if !standalone || !source[end..].trim_start().starts_with('[') {
            continue;
        }
        // Only `[N] =` may sit between the name and the initializer.
        let Some(open) = source[end..].find('{') else {
            return Err(DatasetError::MissingArray(name));
        };
        let declarator = &source[end..end + open];
        if !declarator
            .chars()
            .all(|c| c.is_whitespace() || c.is_ascii_digit() || matches!(c, '[' | ']' | '='))
        {
            continue;
        }
        let body_start = end + open + 1;
        let Some(close) = source[body_start..].find('}') else {
            return Err(DatasetError::MissingArray(name));
        };
        break &source[body_start..body_start + close];
    };

    body.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map(|value| value as f32)
                .map_err(|_| DatasetError::InvalidNumber {
                    array: name,
                    token: token.to_string(),
                })
        })
        .collect()
}
