//! Benchmarks for landscape evaluation and frame composition.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use evo_trace::{
    animation::Canvas,
    compute::{CoordinateGrid, Landscape, Surface},
    schema::Bounds,
};

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");

    for resolution in [100, 250, 500, 1000] {
        let grid = CoordinateGrid::new(Bounds::default(), resolution);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", resolution, resolution)),
            &resolution,
            |b, _| {
                b.iter(|| {
                    Surface::evaluate(black_box(grid), Landscape::CrossInTrayAsRendered).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_landscapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("landscape");
    let grid = CoordinateGrid::new(Bounds::default(), 250);

    for landscape in [
        Landscape::CrossInTrayAsRendered,
        Landscape::CrossInTray,
        Landscape::DropWave,
        Landscape::Rastrigin,
        Landscape::StyblinskiTang,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(landscape.name()),
            &landscape,
            |b, &landscape| {
                b.iter(|| Surface::evaluate(black_box(grid), landscape).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_frame_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let surface = Surface::evaluate(
        CoordinateGrid::new(Bounds::default(), 500),
        Landscape::default(),
    )
    .unwrap();

    for population in [10, 80, 500] {
        let canvas = Canvas::new(Bounds::default(), 800, 800, 4);
        let background = canvas.draw_heatmap(&surface);
        let points: Vec<(f64, f64)> = (0..population)
            .map(|i| {
                let t = i as f64 / population as f64;
                (20.0 * t - 10.0, 10.0 - 20.0 * t)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, _| {
                b.iter(|| {
                    let mut image = background.clone();
                    canvas.draw_markers(&mut image, black_box(&points));
                    image
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_surface,
    bench_landscapes,
    bench_frame_composition
);
criterion_main!(benches);
