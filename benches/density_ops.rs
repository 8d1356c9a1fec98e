//! Benchmarks for texel density operations.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Point2, Point3};
use texelkit::algo::batch::normalize_objects;
use texelkit::prelude::*;

fn create_grid_mesh(n: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut uvs = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
            uvs.push(Point2::new(i as f64 / n as f64, j as f64 / n as f64));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces, &uvs).unwrap()
}

fn bench_estimate(c: &mut Criterion) {
    let mesh = create_grid_mesh(100);

    c.bench_function("estimate_density_grid_100x100", |b| {
        b.iter(|| estimate_density(&mesh, 4096.0).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mesh = create_grid_mesh(100);

    c.bench_function("normalize_to_target_grid_100x100", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut m| normalize_to_target(&mut m, 20.48, 4096.0).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });

    c.bench_function("normalize_objects_10_grids_30x30", |b| {
        let config = DensityConfig::default();
        b.iter_batched(
            || {
                (0..10)
                    .map(|i| MeshObject::new(format!("Grid.{:03}", i), create_grid_mesh(30)))
                    .collect::<Vec<_>>()
            },
            |mut objects| normalize_objects(&mut objects, &config),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_estimate, bench_normalize);
criterion_main!(benches);
