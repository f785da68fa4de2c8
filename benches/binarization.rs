use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::GrayImage;
use unblack::utils::binarization::{otsu_binarize, otsu_threshold, threshold_binarize};

fn gradient(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| image::Luma([((x + y) % 256) as u8]))
}

fn bench_otsu_binarize_small(c: &mut Criterion) {
    let gray = gradient(100, 100);
    c.bench_function("otsu_binarize_100x100", |b| {
        b.iter(|| otsu_binarize(black_box(&gray)))
    });
}

fn bench_otsu_binarize_large(c: &mut Criterion) {
    let gray = gradient(1920, 1080);
    c.bench_function("otsu_binarize_1920x1080", |b| {
        b.iter(|| otsu_binarize(black_box(&gray)))
    });
}

fn bench_otsu_threshold_only(c: &mut Criterion) {
    let gray = gradient(1920, 1080);
    c.bench_function("otsu_threshold_1920x1080", |b| {
        b.iter(|| otsu_threshold(black_box(gray.as_raw())))
    });
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = gradient(640, 480);
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| threshold_binarize(black_box(&gray), black_box(128)))
    });
}

criterion_group!(
    benches,
    bench_otsu_binarize_small,
    bench_otsu_binarize_large,
    bench_otsu_threshold_only,
    bench_threshold_binarize_medium
);
criterion_main!(benches);
