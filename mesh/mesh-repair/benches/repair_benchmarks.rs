//! Benchmarks for boundary detection, hole capping and validation.
//!
//! Run with: cargo bench -p mesh-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-repair -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-repair -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_repair::{
    FillParams, MeshAdjacency, close_all_holes_with_params, find_boundary_loops, validate_mesh,
    weld_vertices,
};
use mesh_types::{IndexedMesh, Vertex};
use std::collections::HashMap;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create an icosphere mesh with specified subdivision level.
fn create_sphere(subdivisions: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();

    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_verts = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    for v in &ico_verts {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        mesh.vertices
            .push(Vertex::from_coords(v[0] / len, v[1] / len, v[2] / len));
    }

    let ico_faces: [[u32; 3]; 20] = [
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    for f in &ico_faces {
        mesh.faces.push(*f);
    }

    for _ in 0..subdivisions {
        mesh = subdivide_sphere(&mesh);
    }

    mesh
}

fn subdivide_sphere(mesh: &IndexedMesh) -> IndexedMesh {
    let mut new_mesh = IndexedMesh::new();
    new_mesh.vertices = mesh.vertices.clone();

    let mut edge_midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for face in &mesh.faces {
        let v0 = face[0];
        let v1 = face[1];
        let v2 = face[2];

        let m01 = get_midpoint(v0, v1, &mut new_mesh.vertices, &mut edge_midpoints);
        let m12 = get_midpoint(v1, v2, &mut new_mesh.vertices, &mut edge_midpoints);
        let m20 = get_midpoint(v2, v0, &mut new_mesh.vertices, &mut edge_midpoints);

        new_mesh.faces.push([v0, m01, m20]);
        new_mesh.faces.push([v1, m12, m01]);
        new_mesh.faces.push([v2, m20, m12]);
        new_mesh.faces.push([m01, m12, m20]);
    }

    new_mesh
}

fn get_midpoint(
    v1: u32,
    v2: u32,
    vertices: &mut Vec<Vertex>,
    edge_midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };

    if let Some(&idx) = edge_midpoints.get(&key) {
        return idx;
    }

    let p1 = &vertices[v1 as usize];
    let p2 = &vertices[v2 as usize];

    let mx = (p1.position.x + p2.position.x) / 2.0;
    let my = (p1.position.y + p2.position.y) / 2.0;
    let mz = (p1.position.z + p2.position.z) / 2.0;
    let len = (mx * mx + my * my + mz * mz).sqrt();

    let idx = vertices.len() as u32;
    vertices.push(Vertex::from_coords(mx / len, my / len, mz / len));
    edge_midpoints.insert(key, idx);
    idx
}

/// Remove every face lying entirely above `z = cut` or below `z = -cut`,
/// leaving two polar holes.
fn punch_polar_holes(mesh: &IndexedMesh, cut: f64) -> IndexedMesh {
    let mut open = mesh.clone();
    open.faces.retain(|face| {
        let z = face.map(|v| mesh.vertices[v as usize].position.z);
        !(z.iter().all(|&z| z > cut) || z.iter().all(|&z| z < -cut))
    });
    open
}

fn holed_spheres() -> Vec<(String, IndexedMesh)> {
    (2..=5)
        .map(|level| {
            let open = punch_polar_holes(&create_sphere(level), 0.8);
            (format!("sphere_{}tri", open.faces.len()), open)
        })
        .collect()
}

// =============================================================================
// Detection Benchmarks
// =============================================================================

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("Detection");

    for (name, mesh) in &holed_spheres() {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("adjacency", name), mesh, |b, mesh| {
            b.iter(|| MeshAdjacency::build(black_box(&mesh.faces)));
        });

        group.bench_with_input(BenchmarkId::new("boundary_loops", name), mesh, |b, mesh| {
            b.iter(|| find_boundary_loops(black_box(mesh)));
        });
    }

    group.finish();
}

// =============================================================================
// Hole Filling Benchmarks
// =============================================================================

fn bench_hole_filling(c: &mut Criterion) {
    let mut group = c.benchmark_group("HoleFilling");

    let presets = [
        ("exact", FillParams::default()),
        ("scans", FillParams::for_scans()),
    ];

    for (name, mesh) in &holed_spheres() {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for (preset, params) in &presets {
            let id = format!("{preset}_{name}");
            group.bench_with_input(BenchmarkId::new("close_all_holes", id), mesh, |b, mesh| {
                b.iter(|| close_all_holes_with_params(black_box(mesh), black_box(params)));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Consolidation Benchmarks
// =============================================================================

fn bench_weld(c: &mut Criterion) {
    let mut group = c.benchmark_group("Weld");

    for level in [2, 3, 4] {
        let mesh = create_sphere(level);
        let name = format!("sphere_{}tri", mesh.faces.len());
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));

        for (mode, epsilon) in [("exact", 0.0), ("tolerance", 1e-6)] {
            let id = format!("{mode}_{name}");
            group.bench_with_input(BenchmarkId::new("weld_vertices", id), &mesh, |b, mesh| {
                b.iter_batched(
                    || mesh.clone(),
                    |mut m| weld_vertices(&mut m, epsilon),
                    criterion::BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

// =============================================================================
// Validation Benchmarks
// =============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Validation");

    for level in [1, 2, 3, 4] {
        let mesh = create_sphere(level);
        let name = format!("sphere_{}tri", mesh.faces.len());
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("validate", name), &mesh, |b, mesh| {
            b.iter(|| validate_mesh(black_box(mesh)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(
    benches,
    bench_detection,
    bench_hole_filling,
    bench_weld,
    bench_validation
);
criterion_main!(benches);
