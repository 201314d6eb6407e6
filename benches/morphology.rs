use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pdf417_scan::utils::binarization::binarize_gradient;
use pdf417_scan::utils::gradient::gradient_field;
use pdf417_scan::utils::morphology::{StructuringElement, close, shape_regions};

mod common;

fn bench_close_medium(c: &mut Criterion) {
    let mask = binarize_gradient(&gradient_field(&common::synthetic_photo(640, 480).view()));
    let kernel = StructuringElement::rect(7, 21);
    c.bench_function("close_7x21_640x480", |b| {
        b.iter(|| close(black_box(&mask), black_box(kernel)))
    });
}

fn bench_shape_regions_medium(c: &mut Criterion) {
    let mask = binarize_gradient(&gradient_field(&common::synthetic_photo(640, 480).view()));
    let kernel = StructuringElement::rect(7, 21);
    c.bench_function("shape_regions_7x21x4_640x480", |b| {
        b.iter(|| shape_regions(black_box(&mask), black_box(kernel), black_box(4)))
    });
}

fn bench_shape_regions_large(c: &mut Criterion) {
    let mask = binarize_gradient(&gradient_field(&common::synthetic_photo(1920, 1080).view()));
    let kernel = StructuringElement::rect(7, 21);
    c.bench_function("shape_regions_7x21x4_1920x1080", |b| {
        b.iter(|| shape_regions(black_box(&mask), black_box(kernel), black_box(4)))
    });
}

criterion_group!(
    benches,
    bench_close_medium,
    bench_shape_regions_medium,
    bench_shape_regions_large
);
criterion_main!(benches);
