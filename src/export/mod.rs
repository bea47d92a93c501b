//! Exporting one image's shapes to VOC XML, text and LabelMe JSON.
//!
//! All three outputs land next to the caller's target path and are named after
//! the image: exporting `photos/img1.png` with target `out/img1.xml` writes
//! `out/img1.xml`, `out/img1.txt` and `out/img1.json`.
//!
//! Writes are independent. If the text file fails, the XML written before it
//! stays on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::LabelFileError;
use crate::ir::io_labelme_json::{build_labelme_document, write_labelme_json, JSON_EXTENSION};
use crate::ir::io_txt::{write_txt, TXT_EXTENSION};
use crate::ir::io_voc_xml::{VocWriter, DEFAULT_DATABASE, VOC_XML_EXTENSION};
use crate::ir::{points_to_bbox, probe_image, shape_to_rotated_bbox, Shape};

/// Settings that apply to a whole export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Mark the VOC document as verified.
    pub verified: bool,
    /// Value for `<source><database>`.
    pub database: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            verified: false,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// Paths of the three files an export produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFiles {
    pub xml: PathBuf,
    pub txt: PathBuf,
    pub json: PathBuf,
}

impl ExportedFiles {
    /// Derives the output paths for `image_path` next to `target_path`.
    pub fn for_image(target_path: &Path, image_path: &Path) -> Result<Self, LabelFileError> {
        let base = image_path
            .file_stem()
            .ok_or_else(|| LabelFileError::InvalidImagePath {
                path: image_path.to_path_buf(),
            })?;
        let dir = target_path.parent().unwrap_or_else(|| Path::new(""));
        // Appended rather than `with_extension` so stems like `frame.0001` survive.
        let sibling = |extension: &str| {
            let mut name = base.to_os_string();
            name.push(".");
            name.push(extension);
            dir.join(name)
        };

        Ok(Self {
            xml: sibling(VOC_XML_EXTENSION),
            txt: sibling(TXT_EXTENSION),
            json: sibling(JSON_EXTENSION),
        })
    }
}

/// Exporter state carried across saves by a labeling session.
///
/// The only state is the verification flag (plus the database name), which
/// the host toggles between exports.
#[derive(Clone, Debug, Default)]
pub struct LabelFile {
    options: ExportOptions,
}

impl LabelFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn is_verified(&self) -> bool {
        self.options.verified
    }

    pub fn set_verified(&mut self, verified: bool) {
        self.options.verified = verified;
    }

    /// Flips the verification flag.
    pub fn toggle_verify(&mut self) {
        self.options.verified = !self.options.verified;
    }

    /// Returns true if `path` looks like an annotation file this exporter writes.
    pub fn is_label_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(VOC_XML_EXTENSION))
            .unwrap_or(false)
    }

    /// Exports `shapes` drawn on `image_path` using the current flag state.
    pub fn save(
        &self,
        target_path: &Path,
        shapes: &[Shape],
        image_path: &Path,
    ) -> Result<ExportedFiles, LabelFileError> {
        export_annotations(target_path, shapes, image_path, &self.options)
    }
}

/// Writes the VOC XML, text and LabelMe JSON files for one image.
///
/// Image size and depth are read from `image_path` on disk.
pub fn export_annotations(
    target_path: &Path,
    shapes: &[Shape],
    image_path: &Path,
    options: &ExportOptions,
) -> Result<ExportedFiles, LabelFileError> {
    let outputs = ExportedFiles::for_image(target_path, image_path)?;
    let image_shape = probe_image(image_path)?;

    let folder_name = image_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base_name = image_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let image_file_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!(
        image = %image_path.display(),
        width = image_shape.width,
        height = image_shape.height,
        depth = image_shape.depth,
        shapes = shapes.len(),
        verified = options.verified,
        "exporting annotations"
    );

    let mut writer = VocWriter::new(folder_name, base_name, image_shape)
        .with_local_img_path(image_path.to_string_lossy())
        .with_database(options.database.clone());
    writer.set_verified(options.verified);

    for shape in shapes {
        if shape.is_rotated {
            let rbox = shape_to_rotated_bbox(shape)?;
            debug!(label = %shape.label, ?rbox, "rotated box");
            writer.add_rotated_bnd_box(rbox, shape.label.clone(), shape.difficult);
        } else {
            let bbox = points_to_bbox(&shape.label, &shape.points)?;
            debug!(label = %shape.label, ?bbox, "axis-aligned box");
            writer.add_bnd_box(bbox, shape.label.clone(), shape.difficult);
        }
    }

    writer.save(&outputs.xml)?;
    write_txt(&outputs.txt, shapes)?;

    let document = build_labelme_document(image_file_name, image_shape, shapes)?;
    write_labelme_json(&outputs.json, &document)?;

    info!(
        xml = %outputs.xml.display(),
        txt = %outputs.txt.display(),
        json = %outputs.json.display(),
        "annotations written"
    );

    Ok(outputs)
}
