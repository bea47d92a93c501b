//! Pascal VOC XML writer and reader.
//!
//! The layout matches labelImg/roLabelImg annotation files: one XML document
//! per image, with `<bndbox>` objects for axis-aligned boxes and `<robndbox>`
//! objects (center, size, angle) for rotated ones.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use super::bbox::{BoundingBox, RotatedBoundingBox};
use super::image_probe::ImageShape;
use crate::error::LabelFileError;

/// File extension of Pascal VOC annotation files.
pub const VOC_XML_EXTENSION: &str = "xml";

/// Value written to `<source><database>` when the caller has none.
pub const DEFAULT_DATABASE: &str = "Unknown";

const DEFAULT_POSE: &str = "Unspecified";

/// Geometry of one VOC object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VocBox {
    Bnd(BoundingBox),
    Rotated(RotatedBoundingBox),
}

impl VocBox {
    /// The `<type>` tag value for this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            VocBox::Bnd(_) => "bndbox",
            VocBox::Rotated(_) => "robndbox",
        }
    }
}

/// One `<object>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct VocObject {
    pub name: String,
    pub difficult: bool,
    pub truncated: bool,
    pub geometry: VocBox,
}

/// Accumulates boxes for one image and serializes them as a VOC document.
#[derive(Clone, Debug)]
pub struct VocWriter {
    folder: String,
    filename: String,
    image_shape: ImageShape,
    local_img_path: Option<String>,
    database: String,
    verified: bool,
    objects: Vec<VocObject>,
}

impl VocWriter {
    /// Creates a writer for the image `filename` (usually without extension)
    /// living in `folder`.
    pub fn new(
        folder: impl Into<String>,
        filename: impl Into<String>,
        image_shape: ImageShape,
    ) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            image_shape,
            local_img_path: None,
            database: DEFAULT_DATABASE.to_string(),
            verified: false,
            objects: Vec::new(),
        }
    }

    /// Records the on-disk image path in `<path>`.
    pub fn with_local_img_path(mut self, path: impl Into<String>) -> Self {
        self.local_img_path = Some(path.into());
        self
    }

    /// Overrides the `<source><database>` value.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn objects(&self) -> &[VocObject] {
        &self.objects
    }

    /// Adds an axis-aligned box. Boxes touching the image border are marked
    /// truncated.
    pub fn add_bnd_box(&mut self, bbox: BoundingBox, name: impl Into<String>, difficult: bool) {
        let truncated = bbox.touches_border(self.image_shape.width, self.image_shape.height);
        self.objects.push(VocObject {
            name: name.into(),
            difficult,
            truncated,
            geometry: VocBox::Bnd(bbox),
        });
    }

    /// Adds a rotated box. Rotated boxes are never marked truncated.
    pub fn add_rotated_bnd_box(
        &mut self,
        rbox: RotatedBoundingBox,
        name: impl Into<String>,
        difficult: bool,
    ) {
        self.objects.push(VocObject {
            name: name.into(),
            difficult,
            truncated: false,
            geometry: VocBox::Rotated(rbox),
        });
    }

    /// Renders the document.
    pub fn to_xml_string(&self) -> Result<String, LabelFileError> {
        if self.filename.is_empty() {
            return Err(LabelFileError::VocWrite {
                path: PathBuf::from("<memory>"),
                message: "missing image filename".to_string(),
            });
        }

        let mut xml = String::new();
        self.render(&mut xml).map_err(|_| LabelFileError::VocWrite {
            path: PathBuf::from("<memory>"),
            message: "failed to format XML".to_string(),
        })?;
        Ok(xml)
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: &Path) -> Result<(), LabelFileError> {
        let xml = self.to_xml_string().map_err(|err| match err {
            LabelFileError::VocWrite { message, .. } => LabelFileError::VocWrite {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        fs::write(path, xml).map_err(LabelFileError::Io)
    }

    fn render(&self, xml: &mut String) -> fmt::Result {
        writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        if self.verified {
            writeln!(xml, "<annotation verified=\"yes\">")?;
        } else {
            writeln!(xml, "<annotation>")?;
        }
        writeln!(xml, "  <folder>{}</folder>", xml_escape(&self.folder))?;
        writeln!(xml, "  <filename>{}</filename>", xml_escape(&self.filename))?;
        if let Some(path) = &self.local_img_path {
            writeln!(xml, "  <path>{}</path>", xml_escape(path))?;
        }
        writeln!(xml, "  <source>")?;
        writeln!(xml, "    <database>{}</database>", xml_escape(&self.database))?;
        writeln!(xml, "  </source>")?;
        writeln!(xml, "  <size>")?;
        writeln!(xml, "    <width>{}</width>", self.image_shape.width)?;
        writeln!(xml, "    <height>{}</height>", self.image_shape.height)?;
        writeln!(xml, "    <depth>{}</depth>", self.image_shape.depth)?;
        writeln!(xml, "  </size>")?;
        writeln!(xml, "  <segmented>0</segmented>")?;

        for object in &self.objects {
            writeln!(xml, "  <object>")?;
            writeln!(xml, "    <type>{}</type>", object.geometry.type_name())?;
            writeln!(xml, "    <name>{}</name>", xml_escape(&object.name))?;
            writeln!(xml, "    <pose>{DEFAULT_POSE}</pose>")?;
            writeln!(xml, "    <truncated>{}</truncated>", u8::from(object.truncated))?;
            writeln!(xml, "    <difficult>{}</difficult>", u8::from(object.difficult))?;
            match object.geometry {
                VocBox::Bnd(bbox) => {
                    writeln!(xml, "    <bndbox>")?;
                    writeln!(xml, "      <xmin>{}</xmin>", bbox.xmin)?;
                    writeln!(xml, "      <ymin>{}</ymin>", bbox.ymin)?;
                    writeln!(xml, "      <xmax>{}</xmax>", bbox.xmax)?;
                    writeln!(xml, "      <ymax>{}</ymax>", bbox.ymax)?;
                    writeln!(xml, "    </bndbox>")?;
                }
                VocBox::Rotated(rbox) => {
                    writeln!(xml, "    <robndbox>")?;
                    writeln!(xml, "      <cx>{}</cx>", rbox.cx)?;
                    writeln!(xml, "      <cy>{}</cy>", rbox.cy)?;
                    writeln!(xml, "      <w>{}</w>", rbox.w)?;
                    writeln!(xml, "      <h>{}</h>", rbox.h)?;
                    writeln!(xml, "      <angle>{}</angle>", rbox.angle)?;
                    writeln!(xml, "    </robndbox>")?;
                }
            }
            writeln!(xml, "  </object>")?;
        }

        writeln!(xml, "</annotation>")
    }
}

/// A parsed VOC annotation file.
#[derive(Clone, Debug, PartialEq)]
pub struct VocAnnotation {
    pub verified: bool,
    pub folder: Option<String>,
    pub filename: String,
    pub path: Option<String>,
    pub database: Option<String>,
    pub size: ImageShape,
    pub objects: Vec<VocObject>,
}

/// Read a VOC annotation file written by [`VocWriter`] (or labelImg).
pub fn read_voc_xml(path: &Path) -> Result<VocAnnotation, LabelFileError> {
    let xml = fs::read_to_string(path).map_err(LabelFileError::Io)?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a UTF-8 string.
pub fn from_voc_xml_str(xml: &str) -> Result<VocAnnotation, LabelFileError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8. Primarily useful for fuzzing.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocAnnotation, LabelFileError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| LabelFileError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocAnnotation, LabelFileError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| LabelFileError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(LabelFileError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let verified = annotation.attribute("verified") == Some("yes");
    let filename = required_child_text(annotation, "filename", path, "<annotation>")?;
    let folder = optional_child_text(annotation, "folder");
    let image_path = optional_child_text(annotation, "path");
    let database = child_element(annotation, "source")
        .and_then(|source| optional_child_text(source, "database"));

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required::<u32>(size, "width", path, "<size>")?;
    let height = parse_required::<u32>(size, "height", path, "<size>")?;
    let depth = match optional_child_text(size, "depth") {
        Some(raw) => raw.parse::<u8>().map_err(|_| LabelFileError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!("invalid <depth> value '{raw}' in <size>; expected u8"),
        })?,
        None => 3,
    };

    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let difficult = parse_flag(object, "difficult");
        let truncated = parse_flag(object, "truncated");

        let geometry = if let Some(rbox) = child_element(object, "robndbox") {
            VocBox::Rotated(RotatedBoundingBox {
                cx: parse_required::<f64>(rbox, "cx", path, "<robndbox>")?,
                cy: parse_required::<f64>(rbox, "cy", path, "<robndbox>")?,
                w: parse_required::<f64>(rbox, "w", path, "<robndbox>")?,
                h: parse_required::<f64>(rbox, "h", path, "<robndbox>")?,
                angle: parse_required::<f64>(rbox, "angle", path, "<robndbox>")?,
            })
        } else {
            let bndbox = required_child_element(object, "bndbox", path, "<object>")?;
            // labelImg tolerates float coordinates here and truncates them.
            VocBox::Bnd(BoundingBox::new(
                parse_required::<f64>(bndbox, "xmin", path, "<bndbox>")? as i64,
                parse_required::<f64>(bndbox, "ymin", path, "<bndbox>")? as i64,
                parse_required::<f64>(bndbox, "xmax", path, "<bndbox>")? as i64,
                parse_required::<f64>(bndbox, "ymax", path, "<bndbox>")? as i64,
            ))
        };

        objects.push(VocObject {
            name,
            difficult,
            truncated,
            geometry,
        });
    }

    Ok(VocAnnotation {
        verified,
        folder,
        filename,
        path: image_path,
        database,
        size: ImageShape::new(width, height, depth),
        objects,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, LabelFileError> {
    child_element(node, tag).ok_or_else(|| LabelFileError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, LabelFileError> {
    optional_child_text(node, tag).ok_or_else(|| LabelFileError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required<T: std::str::FromStr>(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<T, LabelFileError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<T>().map_err(|_| LabelFileError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!(
            "invalid <{tag}> value '{raw}' in {context}; expected {}",
            std::any::type_name::<T>()
        ),
    })
}

fn parse_flag(node: Node<'_, '_>, tag: &str) -> bool {
    optional_child_text(node, tag)
        .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
