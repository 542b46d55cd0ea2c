//! Benchmarks for ROI extraction.
//!
//! Run with: cargo bench -p mesh-region

#![allow(missing_docs, clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_region::{RoiBox, extract_roi};
use mesh_types::{IndexedMesh, Vertex};

/// A `n x n` quad grid on the unit square with a gentle height ripple.
fn create_grid(n: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(((n + 1) * (n + 1)) as usize, (2 * n * n) as usize);
    let step = 1.0 / f64::from(n);

    for j in 0..=n {
        for i in 0..=n {
            let x = f64::from(i) * step;
            let y = f64::from(j) * step;
            let z = 0.05 * (x * 12.0).sin() * (y * 12.0).cos();
            mesh.vertices.push(Vertex::from_coords(x, y, z));
        }
    }

    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.faces.push([a, b, d]);
            mesh.faces.push([a, d, c]);
        }
    }

    mesh
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("RoiExtraction");

    let boxes = [
        ("quarter", RoiBox::new(0.0, 0.5, 0.0, 0.5, -1.0, 1.0)),
        ("center", RoiBox::new(0.25, 0.75, 0.25, 0.75, -1.0, 1.0)),
        ("all", RoiBox::new(-1.0, 2.0, -1.0, 2.0, -1.0, 1.0)),
        ("outside", RoiBox::new(5.0, 6.0, 5.0, 6.0, 5.0, 6.0)),
    ];

    for n in [32, 128, 256] {
        let mesh = create_grid(n);
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for (name, roi) in &boxes {
            let id = format!("{name}_{}tri", mesh.faces.len());
            group.bench_with_input(BenchmarkId::new("extract_roi", id), &mesh, |b, mesh| {
                b.iter(|| extract_roi(black_box(mesh), black_box(roi)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
