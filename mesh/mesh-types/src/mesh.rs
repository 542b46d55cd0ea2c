//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A face referencing a vertex that does not exist.
///
/// Returned by [`IndexedMesh::validate_indices`]. Downstream crates wrap
/// this in their own error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("face {face} references vertex {index}, but mesh has only {vertex_count} vertices")]
pub struct InvalidFaceIndex {
    /// Index of the offending face.
    pub face: usize,
    /// The out-of-range vertex index.
    pub index: u32,
    /// Number of vertices in the mesh.
    pub vertex_count: usize,
}

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Every mesh operation in this workspace takes an
/// `&IndexedMesh` and hands back a new one; the input is never mutated.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
/// Boundary tracing treats faces as unoriented, but copies and extensions
/// keep the winding of every face they touch.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.validate_indices().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let mesh = IndexedMesh::new();
    /// assert!(mesh.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    ///
    /// No validation happens here; call [`validate_indices`](Self::validate_indices)
    /// when the faces come from an untrusted source.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat coordinate and index buffers.
    ///
    /// This is the shape mesh readers usually hand over:
    /// `positions = [x0, y0, z0, x1, ...]` and `indices = [a0, b0, c0, a1, ...]`.
    /// Returns an empty mesh if either buffer length is not a multiple of 3.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let indices = [0, 1, 2];
    ///
    /// let mesh = IndexedMesh::from_raw(&positions, &indices);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();

        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self { vertices, faces }
    }

    /// Check that every face index points at an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns the first offending face (in face order) as an
    /// [`InvalidFaceIndex`].
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let mesh = IndexedMesh::from_parts(
    ///     vec![Vertex::from_coords(0.0, 0.0, 0.0)],
    ///     vec![[0, 0, 7]],
    /// );
    /// let err = mesh.validate_indices().unwrap_err();
    /// assert_eq!(err.face, 0);
    /// assert_eq!(err.index, 7);
    /// ```
    pub fn validate_indices(&self) -> Result<(), InvalidFaceIndex> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(InvalidFaceIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Sum of the signed origin tetrahedra of all faces.
    ///
    /// For a closed mesh this is the enclosed volume: positive when faces
    /// wind outward, negative when the mesh is inside-out. For an open mesh
    /// the value depends on where the origin sits and means little.
    ///
    /// # Panics
    ///
    /// Panics if a face references a missing vertex. Validate untrusted
    /// meshes with [`validate_indices`](Self::validate_indices) first.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let at = |i: u32| self.vertices[i as usize].position;
                Triangle::new(at(a), at(b), at(c)).signed_volume_to_origin()
            })
            .sum()
    }

    /// Magnitude of [`signed_volume`](Self::signed_volume).
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Whether the signed volume is negative.
    #[inline]
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.signed_volume() < 0.0
    }

    /// Reverse the winding of every face.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Helper function to create a unit cube mesh.
///
/// Creates a closed cube from (0,0,0) to (1,1,1) with outward-facing normals.
/// Faces come in pairs per side, in the order bottom, top, front, back,
/// left, right.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// assert!((cube.volume() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let vertices = vec![
        Vertex::from_coords(0.0, 0.0, 0.0), // 0
        Vertex::from_coords(1.0, 0.0, 0.0), // 1
        Vertex::from_coords(1.0, 1.0, 0.0), // 2
        Vertex::from_coords(0.0, 1.0, 0.0), // 3
        Vertex::from_coords(0.0, 0.0, 1.0), // 4
        Vertex::from_coords(1.0, 0.0, 1.0), // 5
        Vertex::from_coords(1.0, 1.0, 1.0), // 6
        Vertex::from_coords(0.0, 1.0, 1.0), // 7
    ];

    let faces = vec![
        // Bottom (z=0)
        [0, 2, 1],
        [0, 3, 2],
        // Top (z=1)
        [4, 5, 6],
        [4, 6, 7],
        // Front (y=0)
        [0, 1, 5],
        [0, 5, 4],
        // Back (y=1)
        [3, 7, 6],
        [3, 6, 2],
        // Left (x=0)
        [0, 4, 7],
        [0, 7, 3],
        // Right (x=1)
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(vertices, faces)
}
