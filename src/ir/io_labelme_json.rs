//! LabelMe-compatible JSON export.
//!
//! Every shape becomes a `polygon` entry. Key order follows the LabelMe
//! schema so that tools comparing documents textually stay happy.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::image_probe::ImageShape;
use super::order::export_points;
use super::shape::Shape;
use super::Point;
use crate::error::LabelFileError;

/// File extension of LabelMe annotation files.
pub const JSON_EXTENSION: &str = "json";

/// LabelMe release whose schema the documents follow.
pub const LABELME_VERSION: &str = "5.2.1";

const POLYGON_SHAPE_TYPE: &str = "polygon";

/// A LabelMe annotation document for one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMeDocument {
    pub version: String,
    pub flags: BTreeMap<String, bool>,
    pub image_path: String,
    pub image_height: u32,
    pub image_width: u32,
    pub shapes: Vec<LabelMeShape>,
}

/// One LabelMe shape entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelMeShape {
    pub group_id: Option<u64>,
    pub description: Option<String>,
    pub shape_type: String,
    pub flags: BTreeMap<String, bool>,
    pub label: String,
    pub points: Vec<Point>,
}

/// Builds the document for `shapes` drawn on the image `image_path`.
pub fn build_labelme_document(
    image_path: impl Into<String>,
    image_shape: ImageShape,
    shapes: &[Shape],
) -> Result<LabelMeDocument, LabelFileError> {
    let shapes = shapes
        .iter()
        .map(|shape| {
            let (label, points) = export_points(shape)?;
            Ok(LabelMeShape {
                group_id: None,
                description: None,
                shape_type: POLYGON_SHAPE_TYPE.to_string(),
                flags: BTreeMap::new(),
                label,
                points,
            })
        })
        .collect::<Result<Vec<_>, LabelFileError>>()?;

    Ok(LabelMeDocument {
        version: LABELME_VERSION.to_string(),
        flags: BTreeMap::new(),
        image_path: image_path.into(),
        image_height: image_shape.height,
        image_width: image_shape.width,
        shapes,
    })
}

/// Writes a LabelMe document to `path` (compact, UTF-8).
pub fn write_labelme_json(path: &Path, document: &LabelMeDocument) -> Result<(), LabelFileError> {
    let file = File::create(path).map_err(LabelFileError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, document).map_err(|source| LabelFileError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(LabelFileError::Io)
}

/// Serializes a LabelMe document to a string.
///
/// Useful for testing without file I/O.
pub fn to_labelme_json_string(document: &LabelMeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

/// Parses a LabelMe document from a string.
pub fn from_labelme_json_str(json: &str) -> Result<LabelMeDocument, serde_json::Error> {
    serde_json::from_str(json)
}
