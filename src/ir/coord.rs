//! Image-space points.
//!
//! Coordinates follow the image convention: the origin is the top-left corner
//! and y grows downward.

use serde::{Deserialize, Serialize};

/// A 2D point in image pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// Points travel as `[x, y]` pairs, the layout LabelMe and most GUI shape dumps use.
impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PointData {
            Pair([f64; 2]),
            Object { x: f64, y: f64 },
        }

        Ok(match PointData::deserialize(deserializer)? {
            PointData::Pair([x, y]) => Point::new(x, y),
            PointData::Object { x, y } => Point::new(x, y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, 2.0)).expect("serialize");
        assert_eq!(json, "[1.5,2.0]");
    }

    #[test]
    fn test_point_deserializes_pair_or_object() {
        let pair: Point = serde_json::from_str("[3, 4]").expect("pair");
        assert_eq!(pair, Point::new(3.0, 4.0));

        let object: Point = serde_json::from_str(r#"{"x": 5.5, "y": 6}"#).expect("object");
        assert_eq!(object, Point::new(5.5, 6.0));
    }
}
