use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use rawfx_frame::{Frame, FrameSize, PlanarFrame};
use rawfx_imgproc::{
    edge::{sobel_magnitude, SobelConfig},
    sharpen::{unsharp_mask, UnsharpConfig},
};

fn bench_sobel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sobel");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(640, 480), (1280, 720), (1920, 1080)].iter() {
        let size = FrameSize {
            width: *width,
            height: *height,
        };
        let mut src = PlanarFrame::from_size_val(size, 0, 0).unwrap();
        rng.fill(src.as_slice_mut());
        let dst = PlanarFrame::from_size_val(size, 0, 0).unwrap();

        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));
        let parameter_string = format!("{}x{}", width, height);

        for (name, config) in [
            ("sqrt_mirror", SobelConfig::new()),
            ("abs_mirror", SobelConfig::new().with_absolute_magnitude(true)),
            ("sqrt_zero_border", SobelConfig::new().with_mirror_border(false)),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &(&src, &dst),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(sobel_magnitude(src, &mut dst, &config)))
                },
            );
        }
    }
    group.finish();
}

fn bench_unsharp(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unsharp");
    let mut rng = StdRng::seed_from_u64(1);

    let (width, height) = (640, 480);
    let mut data = vec![0u8; width * height * 4];
    rng.fill(&mut data[..]);
    let src = Frame::<4>::new([width, height].into(), data).unwrap();
    let dst = Frame::<4>::from_size_val(src.size(), 0).unwrap();

    for sigma in [1.0f32, -1.0, 3.0].iter() {
        let config = UnsharpConfig::new().with_sigma(*sigma);
        group.bench_with_input(
            BenchmarkId::new("unsharp_mask", format!("{}x{}x{}", width, height, sigma)),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(unsharp_mask(src, &mut dst, &config)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sobel, bench_unsharp);
criterion_main!(benches);
