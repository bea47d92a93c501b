//! Plain-text polygon export.
//!
//! One line per shape: flattened corner coordinates, the display label and a
//! difficulty flag, all space-separated:
//!
//! ```text
//! x1 y1 x2 y2 x3 y3 x4 y4 label difficult
//! ```
//!
//! Coordinates are truncated to integers. Labels carrying an ordering suffix
//! have their corners canonicalized first and are written without the suffix.

use std::fs;
use std::path::Path;

use super::order::export_points;
use super::shape::Shape;
use crate::error::LabelFileError;

/// File extension of text annotation files.
pub const TXT_EXTENSION: &str = "txt";

/// Formats one shape as a text line, including the trailing newline.
pub fn shape_to_txt_line(shape: &Shape) -> Result<String, LabelFileError> {
    let (name, points) = export_points(shape)?;

    // Truncation toward zero, matching integer casts in labelImg's exporter.
    let mut fields: Vec<String> = points
        .iter()
        .flat_map(|point| [(point.x as i64).to_string(), (point.y as i64).to_string()])
        .collect();
    fields.push(name);
    fields.push(u8::from(shape.difficult).to_string());

    Ok(format!("{}\n", fields.join(" ")))
}

/// Formats all shapes as the contents of a text annotation file.
pub fn to_txt_string(shapes: &[Shape]) -> Result<String, LabelFileError> {
    let mut out = String::new();
    for shape in shapes {
        out.push_str(&shape_to_txt_line(shape)?);
    }
    Ok(out)
}

/// Writes all shapes to `path`, one line each.
pub fn write_txt(path: &Path, shapes: &[Shape]) -> Result<(), LabelFileError> {
    let contents = to_txt_string(shapes)?;
    fs::write(path, contents).map_err(LabelFileError::Io)
}
