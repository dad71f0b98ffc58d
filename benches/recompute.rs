
use criterion::{criterion_group, criterion_main, Criterion};
use shape_distance_field::prelude::*;
use vek::Vec2;

fn ring(center: f32, radius: f32, vertices: usize) -> Vec<Vec2<f32>> {
    (0..vertices)
        .map(|i| {
            let angle = i as f32 / vertices as f32 * std::f32::consts::TAU;
            Vec2::new(center + radius * angle.cos(), center + radius * angle.sin())
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("update_recompute_512", |bencher| {
        let mut field = f32_field(512).unwrap();
        field
            .add_shape("ring", ring(256.0, 180.0, 64), Some(42))
            .unwrap();
        field
            .add_shape("dot", vec![Vec2::new(40.0, 470.0)], Some(7))
            .unwrap();

        bencher.iter(|| {
            // every update re-rasterizes and re-transforms the whole grid
            field.update_shape("ring", ring(256.0, 170.0, 64)).unwrap();
            field.get_distance(0, 0)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
