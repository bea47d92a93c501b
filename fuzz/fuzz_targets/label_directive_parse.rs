//! Fuzz target for label ordering directives.
//!
//! Parses arbitrary labels and, when they carry a directive, applies it to a
//! fixed quad.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelfile::ir::{order_points, LabelDirective, Point};

fuzz_target!(|data: &[u8]| {
    let Ok(label) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(directive) = LabelDirective::parse(label) {
        if let Some(order) = directive.order {
            let quad = [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ];
            let _ = order_points(&quad, order.start, order.reverse);
        }
    }
});
