//! Preview error types.

use std::path::PathBuf;

use skydome_model::DatasetError;

/// Errors that abort a preview run.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("coefficient dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Neither explicit coefficients nor a dataset is configured or installed.
    #[error(
        "no sky coefficients: set `sky.coefficients` or `sky.dataset`, pass --dataset, \
         or install the published tables with --import-header ArHosekSkyModelData_RGB.h"
    )]
    NoCoefficientSource,

    #[error("invalid preview size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG: {0}")]
    EncodeError(#[from] png::EncodingError),
}
