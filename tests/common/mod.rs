#![allow(dead_code)]

use std::fs;
use std::path::Path;

use labelfile::ir::Point;

pub fn write_rgb_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::RgbImage::new(width, height)
        .save(path)
        .expect("write rgb png");
}

pub fn write_gray_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::GrayImage::new(width, height)
        .save(path)
        .expect("write gray png");
}

pub fn json_points(value: &serde_json::Value) -> Vec<Point> {
    value
        .as_array()
        .expect("points array")
        .iter()
        .map(|pair| {
            let pair = pair.as_array().expect("point pair");
            Point::new(
                pair[0].as_f64().expect("x"),
                pair[1].as_f64().expect("y"),
            )
        })
        .collect()
}
