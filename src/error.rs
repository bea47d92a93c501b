use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelfile operations.
///
/// Exports are not transactional: when one output fails, outputs written
/// before it stay on disk.
#[derive(Debug, Error)]
pub enum LabelFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid label '{label}': {message}")]
    LabelParse { label: String, message: String },

    #[error("Shape '{label}' has {actual} point(s); ordering requires exactly {expected}")]
    PointCount {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("Shape '{label}' has no points")]
    EmptyShape { label: String },

    #[error("Rotated shape '{label}' has no center point")]
    MissingCenter { label: String },

    #[error("Rotated shape '{label}' needs at least {expected} points, got {actual}")]
    InsufficientPoints {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("Image path {path} has no file name")]
    InvalidImagePath { path: PathBuf },

    #[error("Failed to write LabelMe JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse shape list from {path}: {source}")]
    ShapesJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse Pascal VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Failed to write Pascal VOC XML to {path}: {message}")]
    VocWrite { path: PathBuf, message: String },
}
