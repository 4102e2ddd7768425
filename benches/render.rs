use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pattern_gen::compositor::render_seeded;
use pattern_gen::{evaluate, PatternKind, Raster, RenderParameters};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for kind in PatternKind::ALL {
        group.bench_function(kind.id(), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for i in 0..64 {
                    let x = -2.0 + i as f64 / 16.0;
                    acc += evaluate(black_box(kind), x, black_box(0.37), black_box(1.0));
                }
                acc
            })
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut raster = Raster::new(300, 100);
    let plain = RenderParameters::default();
    let noisy = RenderParameters::default()
        .with_randomness(0.3)
        .with_distortion(0.3);

    c.bench_function("render_mandelbrot_300x100", |b| {
        b.iter(|| render_seeded(&mut raster, black_box(&plain), 1).unwrap())
    });
    c.bench_function("render_mandelbrot_noisy_300x100", |b| {
        b.iter(|| render_seeded(&mut raster, black_box(&noisy), 1).unwrap())
    });

    #[cfg(feature = "parallel")]
    c.bench_function("render_parallel_mandelbrot_300x100", |b| {
        b.iter(|| pattern_gen::compositor::render_parallel(&mut raster, black_box(&plain), 1).unwrap())
    });
}

criterion_group!(benches, bench_evaluate, bench_render);
criterion_main!(benches);
