//! Canonical corner ordering for quadrilaterals.
//!
//! The canonical cycle is `[bottom-left, top-left, top-right, bottom-right]`
//! in image coordinates (y grows downward, so "bottom" means larger y).

use super::coord::Point;
use super::label::{LabelDirective, OrderDirective};
use super::shape::Shape;
use crate::error::LabelFileError;

/// Number of corners the ordering operates on.
pub const QUAD_CORNERS: usize = 4;

/// Reorders four corners into the canonical cycle, rotated by `start` and
/// optionally reversed after the first point.
///
/// Corners are sorted by ascending x (ties: descending y). The two leftmost
/// become bottom-left then top-left, the two rightmost top-right then
/// bottom-right. When a pair shares a y, the later of the two in x order is
/// bottom-left and the earlier is top-right.
///
/// A non-negative `start` rotates left, a negative one rotates right by its
/// magnitude. Magnitudes of 4 or more leave the cycle unrotated.
///
/// Degenerate quads (duplicate points, three or more sharing an x) still get
/// a deterministic answer, but it may not match the visual corners.
pub fn order_points(
    points: &[Point; QUAD_CORNERS],
    start: i64,
    reverse: bool,
) -> [Point; QUAD_CORNERS] {
    let mut sorted = *points;
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| b.y.total_cmp(&a.y)));
    let [l0, l1, r0, r1] = sorted;

    let (bottom_left, top_left) = if l0.y.total_cmp(&l1.y).is_gt() {
        (l0, l1)
    } else {
        (l1, l0)
    };
    let (top_right, bottom_right) = if r0.y.total_cmp(&r1.y).is_le() {
        (r0, r1)
    } else {
        (r1, r0)
    };

    let mut cycle = [bottom_left, top_left, top_right, bottom_right];
    match usize::try_from(start.unsigned_abs()) {
        Ok(shift) if shift < QUAD_CORNERS && start >= 0 => cycle.rotate_left(shift),
        Ok(shift) if shift < QUAD_CORNERS => cycle.rotate_right(shift),
        _ => {}
    }
    if reverse {
        cycle[1..].reverse();
    }
    cycle
}

/// Applies an [`OrderDirective`] to a shape's point list.
///
/// # Errors
/// Returns [`LabelFileError::PointCount`] unless the shape has exactly four
/// points.
pub fn order_shape_points(
    label: &str,
    points: &[Point],
    directive: OrderDirective,
) -> Result<Vec<Point>, LabelFileError> {
    let quad: &[Point; QUAD_CORNERS] =
        points
            .try_into()
            .map_err(|_| LabelFileError::PointCount {
                label: label.to_string(),
                expected: QUAD_CORNERS,
                actual: points.len(),
            })?;

    Ok(order_points(quad, directive.start, directive.reverse).to_vec())
}

/// Resolves the label and point order a shape is exported with.
///
/// Labels without an ordering suffix keep their points in drawing order.
pub fn export_points(shape: &Shape) -> Result<(String, Vec<Point>), LabelFileError> {
    let directive = LabelDirective::parse(&shape.label)?;
    let points = match directive.order {
        Some(order) => order_shape_points(&shape.label, &shape.points, order)?,
        None => shape.points.clone(),
    };
    Ok((directive.name, points))
}
