//! Box types written to Pascal VOC and the conversions that produce them.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::coord::Point;
use super::shape::Shape;
use crate::error::LabelFileError;

/// Smallest value written for `xmin`/`ymin`.
///
/// Zero-valued box corners break some Faster R-CNN training pipelines, so
/// minimum coordinates are clamped to one.
pub const MIN_BOX_COORD: i64 = 1;

const SIZE_DECIMALS: i32 = 4;
const ANGLE_DECIMALS: i32 = 6;

/// An axis-aligned box in integer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BoundingBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Returns true if the box touches an edge of a `width` x `height` image.
    pub fn touches_border(&self, width: u32, height: u32) -> bool {
        self.ymin == MIN_BOX_COORD
            || self.xmin == MIN_BOX_COORD
            || self.ymax == i64::from(height)
            || self.xmax == i64::from(width)
    }
}

/// A rotated box: center, side lengths and angle in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotatedBoundingBox {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
    /// Rotation in `[0, π)`.
    pub angle: f64,
}

/// Computes the axis-aligned box spanned by `points`.
///
/// Minimum coordinates are clamped to [`MIN_BOX_COORD`]; all values are
/// truncated toward zero. Maximum coordinates never fall below the clamped
/// minimums, so the result is always ordered.
///
/// # Errors
/// Returns [`LabelFileError::EmptyShape`] when `points` is empty.
pub fn points_to_bbox(label: &str, points: &[Point]) -> Result<BoundingBox, LabelFileError> {
    if points.is_empty() {
        return Err(LabelFileError::EmptyShape {
            label: label.to_string(),
        });
    }

    let mut xmin = f64::INFINITY;
    let mut ymin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for point in points {
        xmin = xmin.min(point.x);
        ymin = ymin.min(point.y);
        xmax = xmax.max(point.x);
        ymax = ymax.max(point.y);
    }

    let xmin = (xmin.max(MIN_BOX_COORD as f64) as i64).max(MIN_BOX_COORD);
    let ymin = (ymin.max(MIN_BOX_COORD as f64) as i64).max(MIN_BOX_COORD);
    let xmax = (xmax as i64).max(xmin);
    let ymax = (ymax as i64).max(ymin);

    Ok(BoundingBox::new(xmin, ymin, xmax, ymax))
}

/// Converts a rotated shape into its VOC `robndbox` form.
///
/// The center comes from the shape itself, not from its points. Width is the
/// length of the first edge (`p0`-`p1`), height the second (`p1`-`p2`).
///
/// # Errors
/// Returns [`LabelFileError::MissingCenter`] if the shape has no center and
/// [`LabelFileError::InsufficientPoints`] if it has fewer than three points.
pub fn shape_to_rotated_bbox(shape: &Shape) -> Result<RotatedBoundingBox, LabelFileError> {
    let center = shape.center.ok_or_else(|| LabelFileError::MissingCenter {
        label: shape.label.clone(),
    })?;

    let [p0, p1, p2] = match shape.points.as_slice() {
        [p0, p1, p2, ..] => [p0, p1, p2],
        other => {
            return Err(LabelFileError::InsufficientPoints {
                label: shape.label.clone(),
                expected: 3,
                actual: other.len(),
            });
        }
    };

    Ok(RotatedBoundingBox {
        cx: round_to(center.x, SIZE_DECIMALS),
        cy: round_to(center.y, SIZE_DECIMALS),
        w: round_to(p0.distance(p1), SIZE_DECIMALS),
        h: round_to(p2.distance(p1), SIZE_DECIMALS),
        angle: normalize_angle(shape.direction),
    })
}

/// Reduces `direction` into `[0, π)` and rounds it to six decimals.
pub fn normalize_angle(direction: f64) -> f64 {
    let angle = round_to(direction.rem_euclid(PI), ANGLE_DECIMALS);
    // Rounding a value just below π can land on or above π.
    if angle >= PI {
        0.0
    } else {
        angle
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn bbox_clamps_zero_minimums() {
        let bbox = points_to_bbox("car", &square(0.0, 0.0, 10.0, 10.0)).expect("bbox");
        assert_eq!(bbox, BoundingBox::new(1, 1, 10, 10));
    }

    #[test]
    fn bbox_truncates_instead_of_rounding() {
        let bbox = points_to_bbox("car", &square(5.9, 7.5, 20.99, 30.5)).expect("bbox");
        assert_eq!(bbox, BoundingBox::new(5, 7, 20, 30));
    }

    #[test]
    fn bbox_stays_ordered_for_tiny_shapes() {
        let bbox = points_to_bbox("dot", &square(0.1, 0.2, 0.4, 0.6)).expect("bbox");
        assert_eq!(bbox, BoundingBox::new(1, 1, 1, 1));
        assert!(bbox.is_ordered());
    }

    #[test]
    fn bbox_rejects_empty_points() {
        assert!(matches!(
            points_to_bbox("ghost", &[]),
            Err(LabelFileError::EmptyShape { .. })
        ));
    }

    #[test]
    fn bbox_border_detection() {
        let bbox = BoundingBox::new(1, 5, 50, 60);
        assert!(bbox.touches_border(200, 100));
        assert!(BoundingBox::new(5, 5, 200, 60).touches_border(200, 100));
        assert!(!BoundingBox::new(5, 5, 50, 60).touches_border(200, 100));
    }

    #[test]
    fn rotated_box_uses_shape_center_and_edges() {
        let shape = Shape::rotated(
            "plane",
            square(0.0, 0.0, 30.0, 10.0),
            Point::new(15.123456, 5.000049),
            0.25,
        );
        let rbox = shape_to_rotated_bbox(&shape).expect("rotated");
        assert_eq!(rbox.cx, 15.1235);
        assert_eq!(rbox.cy, 5.0);
        assert_eq!(rbox.w, 30.0);
        assert_eq!(rbox.h, 10.0);
        assert_eq!(rbox.angle, 0.25);
    }

    #[test]
    fn rotated_box_requires_center() {
        let mut shape = Shape::new("plane", square(0.0, 0.0, 30.0, 10.0));
        shape.is_rotated = true;
        assert!(matches!(
            shape_to_rotated_bbox(&shape),
            Err(LabelFileError::MissingCenter { .. })
        ));
    }

    #[test]
    fn rotated_box_requires_three_points() {
        let shape = Shape::rotated(
            "plane",
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            Point::new(0.5, 0.0),
            0.0,
        );
        assert!(matches!(
            shape_to_rotated_bbox(&shape),
            Err(LabelFileError::InsufficientPoints { actual: 2, .. })
        ));
    }

    #[test]
    fn angle_is_reduced_modulo_pi() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(PI + 0.5), round_to(0.5, 6));
        assert_eq!(normalize_angle(-0.5), round_to(PI - 0.5, 6));
        assert_eq!(normalize_angle(PI), 0.0);
        assert_eq!(normalize_angle(PI - 1e-9), 0.0);
    }
}
