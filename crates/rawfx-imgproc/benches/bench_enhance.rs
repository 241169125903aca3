use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use rawfx_frame::{Frame, Mask};
use rawfx_imgproc::{
    arith::blend,
    color::hsv_from_rgb,
    enhance::{autostretch_hsv, color_enhance},
};

fn bench_enhance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Enhance");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(640, 480), (1280, 720), (1920, 1080)].iter() {
        let mut data = vec![0u8; width * height * 3];
        rng.fill(&mut data[..]);
        let src = Frame::<3>::new([*width, *height].into(), data).unwrap();
        let dst = Frame::<3>::from_size_val(src.size(), 0).unwrap();

        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));
        let parameter_string = format!("{}x{}", width, height);

        group.bench_with_input(
            BenchmarkId::new("hsv_from_rgb", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(hsv_from_rgb(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("autostretch_hsv", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(autostretch_hsv(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("color_enhance", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(color_enhance(src, &mut dst)))
            },
        );

        let ratio = Mask::from_size_val(src.size(), 128).unwrap();
        group.bench_with_input(
            BenchmarkId::new("blend", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(blend(src, src, &ratio, &mut dst)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_enhance);
criterion_main!(benches);
