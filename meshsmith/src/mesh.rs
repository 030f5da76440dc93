//! Mesh container
//!
//! Append-only vertices plus 32-bit triangle indices. Fields are private so
//! the container always satisfies:
//! - `indices.len() % 3 == 0`
//! - every index is `< vertices.len()`

use glam::Vec3;

use crate::error::{GeometryError, GeometryResult};
use crate::subdivide;
use crate::vertex::Vertex;

/// Triangle mesh produced by the generators
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty mesh with room for the given number of vertices and indices
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Build a mesh from raw buffers, checking the index invariants
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> GeometryResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::MalformedIndices { len: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GeometryError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// Consume the mesh and return its vertex and index buffers
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Append a triangle
    ///
    /// # Panics
    /// Panics if any index does not refer to an existing vertex. Generators
    /// only emit indices for vertices they already pushed, so a panic here
    /// is a bug in the generator, not bad input.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        let count = self.vertices.len();
        assert!(
            (i0 as usize) < count && (i1 as usize) < count && (i2 as usize) < count,
            "triangle ({i0}, {i1}, {i2}) references a vertex past {count}"
        );
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Positions of the three corners of every triangle
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.triangles().map(|[a, b, c]| {
            [
                self.vertices[a as usize].position,
                self.vertices[b as usize].position,
                self.vertices[c as usize].position,
            ]
        })
    }

    /// Narrow the index buffer to 16 bits
    ///
    /// Fails when the mesh has more vertices than a `u16` index can address
    /// instead of silently truncating.
    pub fn indices16(&self) -> GeometryResult<Vec<u16>> {
        if self.vertices.len() > u16::MAX as usize {
            return Err(GeometryError::IndexOverflow {
                vertex_count: self.vertices.len(),
            });
        }
        Ok(self.indices.iter().map(|&i| i as u16).collect())
    }

    /// Vertex buffer as raw bytes (44 bytes per vertex)
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes (u32 per index)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Apply `passes` rounds of midpoint subdivision, clamped to
    /// [`MAX_SUBDIVISIONS`](crate::subdivide::MAX_SUBDIVISIONS)
    pub fn subdivided(self, passes: u32) -> Mesh {
        let passes = subdivide::clamp_passes("subdivided", passes);
        (0..passes).fold(self, |mesh, _| subdivide::subdivide(mesh))
    }

    /// Axis-aligned bounds as (min, max), or `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.min(v.position), hi.max(v.position))
        }))
    }
}
