#![allow(dead_code)]

use labelfile::ir::{Point, Shape};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A rotated rectangle with its corners named in image coordinates (y down).
#[derive(Clone, Debug)]
pub struct NamedQuad {
    pub bottom_left: Point,
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    /// The same four corners in a random order.
    pub shuffled: [Point; 4],
}

impl NamedQuad {
    pub fn canonical(&self) -> [Point; 4] {
        [
            self.bottom_left,
            self.top_left,
            self.top_right,
            self.bottom_right,
        ]
    }
}

/// Rectangles tilted by at most 0.3 rad with aspect ratio >= 0.5.
///
/// Within those bounds the two leftmost corners are always the left edge, so
/// the corner names are unambiguous.
pub fn arb_tilted_rect() -> BoxedStrategy<NamedQuad> {
    (
        50.0f64..950.0,
        50.0f64..950.0,
        5.0f64..100.0,
        0.5f64..4.0,
        -0.3f64..0.3,
    )
        .prop_flat_map(|(cx, cy, half_h, ratio, theta)| {
            let half_w = half_h * ratio;
            let (sin, cos) = theta.sin_cos();
            let corner = |dx: f64, dy: f64| {
                Point::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
            };

            let top_left = corner(-half_w, -half_h);
            let top_right = corner(half_w, -half_h);
            let bottom_right = corner(half_w, half_h);
            let bottom_left = corner(-half_w, half_h);

            Just(vec![top_left, top_right, bottom_right, bottom_left])
                .prop_shuffle()
                .prop_map(move |points| NamedQuad {
                    bottom_left,
                    top_left,
                    top_right,
                    bottom_right,
                    shuffled: [points[0], points[1], points[2], points[3]],
                })
        })
        .boxed()
}

pub fn arb_point() -> BoxedStrategy<Point> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0)
        .prop_map(|(x, y)| Point::new(x, y))
        .boxed()
}

/// Any four points, including degenerate ones.
pub fn arb_quad() -> BoxedStrategy<[Point; 4]> {
    proptest::array::uniform4(arb_point()).boxed()
}

pub fn arb_points(max_len: usize) -> BoxedStrategy<Vec<Point>> {
    proptest::collection::vec(
        (0.0f64..4096.0, 0.0f64..4096.0).prop_map(|(x, y)| Point::new(x, y)),
        1..=max_len,
    )
    .boxed()
}

pub fn arb_label_name() -> BoxedStrategy<String> {
    proptest::string::string_regex("[a-z]{1,12}")
        .expect("valid label regex")
        .boxed()
}

/// Axis-aligned shapes inside a `width` x `height` image.
pub fn arb_shape_within(width: u32, height: u32) -> BoxedStrategy<Shape> {
    (
        arb_label_name(),
        0.0..f64::from(width),
        0.0..f64::from(width),
        0.0..f64::from(height),
        0.0..f64::from(height),
        any::<bool>(),
    )
        .prop_map(|(label, x0, x1, y0, y1, difficult)| {
            Shape::from_xyxy(label, x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
                .with_difficult(difficult)
        })
        .boxed()
}
