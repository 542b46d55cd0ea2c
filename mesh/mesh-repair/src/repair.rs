//! Vertex consolidation.
//!
//! After capping, coincident vertices are merged and faces that collapsed
//! under the merge are dropped. Merging never moves a vertex: the earliest
//! index of each cluster survives with its exact position.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::debug;

/// Lookup of vertex positions for merge and coincidence queries.
///
/// With a zero epsilon, positions are matched on their exact bit patterns.
/// Otherwise a spatial hash with `2 * epsilon` cells is searched over the
/// 3x3x3 neighborhood around the query.
#[derive(Debug)]
pub(crate) enum SpatialIndex {
    Exact(HashMap<[u64; 3], u32>),
    Grid {
        epsilon: f64,
        cell_size: f64,
        cells: HashMap<(i64, i64, i64), Vec<(u32, Point3<f64>)>>,
    },
}

impl SpatialIndex {
    pub(crate) fn new(epsilon: f64) -> Self {
        if epsilon > 0.0 && epsilon.is_finite() {
            Self::Grid {
                epsilon,
                cell_size: epsilon * 2.0,
                cells: HashMap::new(),
            }
        } else {
            Self::Exact(HashMap::new())
        }
    }

    /// Index every finite vertex position of `mesh`, earliest index first.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
    pub(crate) fn from_mesh(mesh: &IndexedMesh, epsilon: f64) -> Self {
        let mut index = Self::new(epsilon);
        for (idx, vertex) in mesh.vertices.iter().enumerate() {
            if index.find(&vertex.position).is_none() {
                index.insert(idx as u32, &vertex.position);
            }
        }
        index
    }

    /// Smallest indexed vertex coinciding with `pos`, if any.
    ///
    /// Non-finite positions never match.
    pub(crate) fn find(&self, pos: &Point3<f64>) -> Option<u32> {
        if !is_finite(pos) {
            return None;
        }

        match self {
            Self::Exact(map) => map.get(&exact_key(pos)).copied(),
            Self::Grid {
                epsilon,
                cell_size,
                cells,
            } => {
                let cell = pos_to_cell(pos, *cell_size);
                let mut best: Option<u32> = None;

                // Check 3x3x3 neighborhood
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let neighbor_cell = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                            let Some(candidates) = cells.get(&neighbor_cell) else {
                                continue;
                            };
                            for &(idx, other) in candidates {
                                if (*pos - other).norm() <= *epsilon
                                    && best.is_none_or(|b| idx < b)
                                {
                                    best = Some(idx);
                                }
                            }
                        }
                    }
                }

                best
            }
        }
    }

    /// Add a vertex. Non-finite positions are ignored.
    pub(crate) fn insert(&mut self, idx: u32, pos: &Point3<f64>) {
        if !is_finite(pos) {
            return;
        }

        match self {
            Self::Exact(map) => {
                map.entry(exact_key(pos)).or_insert(idx);
            }
            Self::Grid {
                cell_size, cells, ..
            } => {
                cells
                    .entry(pos_to_cell(pos, *cell_size))
                    .or_default()
                    .push((idx, *pos));
            }
        }
    }
}

fn is_finite(pos: &Point3<f64>) -> bool {
    pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite()
}

/// Bit pattern key; adding `0.0` folds `-0.0` into `+0.0`.
fn exact_key(pos: &Point3<f64>) -> [u64; 3] {
    [
        (pos.x + 0.0).to_bits(),
        (pos.y + 0.0).to_bits(),
        (pos.z + 0.0).to_bits(),
    ]
}

/// Convert position to spatial hash cell.
#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}

/// Merge coincident vertices and compact the vertex array.
///
/// Each vertex is mapped to the earliest vertex within `epsilon` of it
/// (exact equality when `epsilon` is 0). Merged-away vertices are removed,
/// faces are re-indexed, and surviving vertices keep their positions and
/// relative order. Vertices that no face references are kept.
///
/// Returns the number of vertices merged away.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::weld_vertices;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0)); // Exact duplicate of vertex 1
/// mesh.faces.push([0, 1, 2]);
/// mesh.faces.push([3, 0, 2]);
///
/// let merged = weld_vertices(&mut mesh, 0.0);
/// assert_eq!(merged, 1);
/// assert_eq!(mesh.vertices.len(), 3);
/// assert_eq!(mesh.faces[1], [1, 0, 2]);
/// ```
#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
pub fn weld_vertices(mesh: &mut IndexedMesh, epsilon: f64) -> usize {
    if mesh.vertices.is_empty() {
        return 0;
    }

    let mut index = SpatialIndex::new(epsilon);
    let mut vertex_remap: Vec<u32> = Vec::with_capacity(mesh.vertices.len());

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        let idx = idx as u32;
        if let Some(canonical) = index.find(&vertex.position) {
            vertex_remap.push(canonical);
        } else {
            index.insert(idx, &vertex.position);
            vertex_remap.push(idx);
        }
    }

    let merged_count = vertex_remap
        .iter()
        .enumerate()
        .filter(|&(idx, &target)| target as usize != idx)
        .count();

    if merged_count == 0 {
        return 0;
    }

    // Compact: canonical vertices keep their relative order.
    let mut compacted: Vec<u32> = vec![0; mesh.vertices.len()];
    let mut new_vertices = Vec::with_capacity(mesh.vertices.len() - merged_count);
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        if vertex_remap[idx] as usize == idx {
            compacted[idx] = new_vertices.len() as u32;
            new_vertices.push(*vertex);
        }
    }

    for face in &mut mesh.faces {
        for v in face.iter_mut() {
            *v = compacted[vertex_remap[*v as usize] as usize];
        }
    }
    mesh.vertices = new_vertices;

    debug!("Merged {} coincident vertices", merged_count);
    merged_count
}

/// Remove faces that reference fewer than three distinct vertices.
///
/// Returns the number of faces removed.
pub fn remove_collapsed_faces(mesh: &mut IndexedMesh) -> usize {
    let before = mesh.faces.len();
    mesh.faces
        .retain(|&[i0, i1, i2]| i0 != i1 && i1 != i2 && i0 != i2);
    let removed = before - mesh.faces.len();
    if removed > 0 {
        debug!("Removed {} collapsed faces", removed);
    }
    removed
}
