//! User-drawn annotation shapes handed to the exporter.

use serde::{Deserialize, Serialize};

use super::coord::Point;

/// One annotated region, as produced by the labeling GUI.
///
/// Axis-aligned boxes and rotated boxes share this record; `is_rotated`
/// decides which VOC element the shape becomes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Corner points in drawing order (four for boxes).
    pub points: Vec<Point>,

    /// Label text, possibly carrying an ordering suffix such as `car_1_1`.
    pub label: String,

    /// Whether the object is marked difficult.
    #[serde(default)]
    pub difficult: bool,

    /// Rotation of the box in radians.
    #[serde(default)]
    pub direction: f64,

    /// Whether the shape is a rotated box.
    #[serde(default, rename = "isRotated")]
    pub is_rotated: bool,

    /// Center of a rotated box. Axis-aligned shapes leave this empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
}

impl Shape {
    /// Creates an axis-aligned shape from its corner points.
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            points,
            label: label.into(),
            difficult: false,
            direction: 0.0,
            is_rotated: false,
            center: None,
        }
    }

    /// Creates a rotated shape with the given center and direction.
    pub fn rotated(
        label: impl Into<String>,
        points: Vec<Point>,
        center: Point,
        direction: f64,
    ) -> Self {
        Self {
            points,
            label: label.into(),
            difficult: false,
            direction,
            is_rotated: true,
            center: Some(center),
        }
    }

    /// Marks the shape as difficult.
    pub fn with_difficult(mut self, difficult: bool) -> Self {
        self.difficult = difficult;
        self
    }

    /// Builds the axis-aligned box spanned by the four corners.
    pub fn from_xyxy(label: impl Into<String>, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(
            label,
            vec![
                Point::new(xmin, ymin),
                Point::new(xmax, ymin),
                Point::new(xmax, ymax),
                Point::new(xmin, ymax),
            ],
        )
    }
}
