//! Annotation model and format writers for labelfile.
//!
//! Shapes come in from the labeling GUI in image coordinates (origin at the
//! top-left, y growing downward) and leave as one of three formats:
//!
//! - [`io_voc_xml`]: Pascal VOC with the `robndbox` rotated-box extension,
//! - [`io_txt`]: one polygon per line,
//! - [`io_labelme_json`]: LabelMe polygon documents.
//!
//! # Example
//!
//! ```
//! use labelfile::ir::{order_points, Point};
//!
//! let square = [
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ];
//!
//! // bottom-left, top-left, top-right, bottom-right
//! let ordered = order_points(&square, 0, false);
//! assert_eq!(ordered[0], Point::new(0.0, 10.0));
//! assert_eq!(ordered[2], Point::new(10.0, 0.0));
//! ```

mod bbox;
mod coord;
mod image_probe;
pub mod io_labelme_json;
pub mod io_txt;
pub mod io_voc_xml;
mod label;
mod order;
mod shape;

// Re-export core types for convenient access
pub use bbox::{
    normalize_angle, points_to_bbox, shape_to_rotated_bbox, BoundingBox, RotatedBoundingBox,
    MIN_BOX_COORD,
};
pub use coord::Point;
pub use image_probe::{probe_image, ImageShape};
pub use label::{LabelDirective, OrderDirective};
pub use order::{export_points, order_points, order_shape_points, QUAD_CORNERS};
pub use shape::Shape;
