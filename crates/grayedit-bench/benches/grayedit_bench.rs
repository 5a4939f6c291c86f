//! Benchmarks for grayedit operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use grayedit_color::ColorSample;
use grayedit_core::{Channel, PixelBuffer};
use grayedit_io::gb7;
use grayedit_ops::resize::{bilinear, nearest_neighbor};
use grayedit_ops::{apply_kernel, composite, BlendMode, KernelPreset, Layer, LayerStack, ToneCurve};

fn noise(width: u32, height: u32) -> PixelBuffer {
    let mut state = 0x2545_f491_u32;
    let data = (0..width as usize * height as usize * 4)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    PixelBuffer::from_raw(width, height, data).unwrap()
}

/// Benchmark 3x3 convolution.
fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution");

    for size in [128u32, 512].iter() {
        let img = noise(*size, *size);
        group.throughput(Throughput::Elements((*size as u64).pow(2)));
        for preset in [KernelPreset::GaussianBlur, KernelPreset::Sharpen] {
            let kernel = preset.kernel();
            group.bench_with_input(BenchmarkId::new(preset.name(), size), &img, |b, img| {
                b.iter(|| apply_kernel(black_box(img), &kernel))
            });
        }
    }

    group.finish();
}

/// Benchmark resampling to half and double size.
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    let img = noise(512, 512);

    for target in [256u32, 1024].iter() {
        group.throughput(Throughput::Elements((*target as u64).pow(2)));
        group.bench_with_input(BenchmarkId::new("nearest", target), target, |b, &t| {
            b.iter(|| nearest_neighbor(black_box(&img), t, t).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("bilinear", target), target, |b, &t| {
            b.iter(|| bilinear(black_box(&img), t, t).unwrap())
        });
    }

    group.finish();
}

/// Benchmark flattening a full layer stack.
fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    let size = 512u32;
    group.throughput(Throughput::Elements((size as u64).pow(2)));

    let mut stack = LayerStack::with_base(noise(size, size), 6);
    for (i, mode) in BlendMode::ALL.into_iter().enumerate() {
        let mut layer = Layer::image(mode.name(), noise(size, size));
        layer.blend_mode = mode;
        layer.opacity = 0.25 + i as f64 * 0.2;
        stack = stack.push(layer).unwrap().0;
    }
    group.bench_function("five_layers", |b| b.iter(|| composite(black_box(&stack))));

    let mut small = Layer::image("stretched", noise(size / 4, size / 4));
    small.blend_mode = BlendMode::Overlay;
    let stretched = LayerStack::with_base(noise(size, size), 6).push(small).unwrap().0;
    group.bench_function("stretched_layer", |b| b.iter(|| composite(black_box(&stretched))));

    group.finish();
}

/// Benchmark tone curve LUT build and apply.
fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("curves");
    let img = noise(512, 512);
    let curve = ToneCurve::new(64, 32, 192, 224);
    group.throughput(Throughput::Elements(512 * 512));

    group.bench_function("build_lut", |b| b.iter(|| black_box(curve).build_lut()));
    let lut = curve.build_lut();
    group.bench_function("apply_rgb", |b| b.iter(|| lut.apply(black_box(&img), Channel::Rgb)));

    group.finish();
}

/// Benchmark the GB7 codec.
fn bench_gb7(c: &mut Criterion) {
    let mut group = c.benchmark_group("gb7");
    let img = noise(1024, 1024);
    let bytes = gb7::encode(&img).unwrap();
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("encode", |b| b.iter(|| gb7::encode(black_box(&img)).unwrap()));
    group.bench_function("decode", |b| b.iter(|| gb7::decode(black_box(&bytes)).unwrap()));

    group.finish();
}

/// Benchmark eyedropper sampling.
fn bench_color(c: &mut Criterion) {
    let img = noise(64, 64);
    c.bench_function("color_sample", |b| {
        b.iter(|| ColorSample::at(black_box(&img), 31, 17).unwrap())
    });
}

criterion_group!(
    benches,
    bench_convolution,
    bench_resize,
    bench_composite,
    bench_curves,
    bench_gb7,
    bench_color,
);

criterion_main!(benches);
