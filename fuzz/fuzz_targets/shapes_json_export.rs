//! Fuzz target for shape-list JSON through the text and LabelMe renderers.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelfile::ir::io_labelme_json::build_labelme_document;
use labelfile::ir::io_txt::to_txt_string;
use labelfile::ir::{ImageShape, Shape};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(shapes) = serde_json::from_slice::<Vec<Shape>>(data) else {
        return;
    };

    let _ = to_txt_string(&shapes);
    let _ = build_labelme_document("fuzz.png", ImageShape::new(64, 64, 3), &shapes);
});
