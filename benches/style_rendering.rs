// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_studio::domain::generation::Style;
use iced_studio::media::{data_url, preprocess, stylize};
use image_rs::{DynamicImage, Rgba, RgbaImage};
use std::hint::black_box;

fn sample(width: u32, height: u32) -> DynamicImage {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    DynamicImage::ImageRgba8(image)
}

fn style_rendering_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("style_rendering");
    let source = sample(800, 600);

    for style in Style::ALL {
        group.bench_function(format!("compose_{}", style.as_tag()), |b| {
            b.iter(|| black_box(stylize::compose(black_box(&source), Some(style))));
        });
    }

    let preview = data_url::encode_jpeg(&source.to_rgba8(), 80).expect("encode preview");
    group.bench_function("render_vintage_from_data_url", |b| {
        b.iter(|| black_box(stylize::render(black_box(&preview), Some(Style::Vintage))));
    });

    group.finish();
}

fn preprocessing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");
    let mut png = Vec::new();
    sample(2400, 1600)
        .write_to(&mut std::io::Cursor::new(&mut png), image_rs::ImageFormat::Png)
        .expect("encode png");

    group.bench_function("preprocess_large_png", |b| {
        b.iter(|| black_box(preprocess::preprocess_bytes(black_box(&png))));
    });

    group.finish();
}

criterion_group!(benches, style_rendering_benchmark, preprocessing_benchmark);
criterion_main!(benches);
