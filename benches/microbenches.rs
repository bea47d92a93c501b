//! Criterion microbenches for labelfile's per-shape work.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Corner canonicalization (order_points)
//! - Text and LabelMe JSON rendering for a batch of shapes
//! - VOC XML rendering and parsing

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use labelfile::ir::io_labelme_json::{build_labelme_document, to_labelme_json_string};
use labelfile::ir::io_txt::to_txt_string;
use labelfile::ir::io_voc_xml::{from_voc_xml_str, VocWriter};
use labelfile::ir::{order_points, points_to_bbox, ImageShape, Point, Shape};

const SHAPE_COUNT: usize = 200;

fn sample_shapes() -> Vec<Shape> {
    (0..SHAPE_COUNT)
        .map(|i| {
            let offset = (i % 50) as f64 * 12.0;
            let label = match i % 3 {
                0 => "car".to_string(),
                1 => "bus_1".to_string(),
                _ => "sign_2_1".to_string(),
            };
            Shape::from_xyxy(label, offset, offset + 3.0, offset + 40.0, offset + 25.0)
        })
        .collect()
}

/// Benchmark corner canonicalization for a single quad.
fn bench_order_points(c: &mut Criterion) {
    let quad = [
        Point::new(50.0, 10.0),
        Point::new(20.0, 40.0),
        Point::new(55.0, 90.0),
        Point::new(80.0, 45.0),
    ];

    c.bench_function("order_points", |b| {
        b.iter(|| black_box(order_points(black_box(&quad), black_box(1), black_box(true))))
    });
}

/// Benchmark text and JSON rendering for a batch of shapes.
fn bench_render_formats(c: &mut Criterion) {
    let shapes = sample_shapes();
    let image_shape = ImageShape::new(1920, 1080, 3);

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(shapes.len() as u64));

    group.bench_function("txt", |b| {
        b.iter(|| black_box(to_txt_string(black_box(&shapes)).unwrap()))
    });

    group.bench_function("labelme_json", |b| {
        b.iter(|| {
            let document =
                build_labelme_document("frame.png", image_shape, black_box(&shapes)).unwrap();
            black_box(to_labelme_json_string(&document).unwrap())
        })
    });

    group.finish();
}

/// Benchmark VOC XML writing and parsing.
fn bench_voc_xml(c: &mut Criterion) {
    let shapes = sample_shapes();
    let mut writer = VocWriter::new("frames", "frame", ImageShape::new(1920, 1080, 3));
    for shape in &shapes {
        let bbox = points_to_bbox(&shape.label, &shape.points).unwrap();
        writer.add_bnd_box(bbox, shape.label.clone(), shape.difficult);
    }
    let xml = writer.to_xml_string().unwrap();

    let mut group = c.benchmark_group("voc_xml");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("to_xml_string", |b| {
        b.iter(|| black_box(writer.to_xml_string().unwrap()))
    });

    group.bench_function("from_voc_xml_str", |b| {
        b.iter(|| black_box(from_voc_xml_str(black_box(&xml)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_order_points,
    bench_render_formats,
    bench_voc_xml
);
criterion_main!(benches);
