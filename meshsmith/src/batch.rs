//! Shared vertex/index buffers for many meshes
//!
//! Meshes pushed into a [`GeometryBatch`] are concatenated into one vertex
//! buffer and one index buffer so a renderer can upload them once and issue
//! one indexed draw per [`Submesh`].
//!
//! Indices are kept mesh-local. A draw binds the shared buffers and passes
//! `start_index`, `index_count` and `base_vertex`, so the combined buffer may
//! hold more vertices than a 16-bit index can reach as long as every single
//! submesh fits.

use hashbrown::HashMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Draw arguments for one mesh inside a [`GeometryBatch`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Submesh {
    pub index_count: u32,
    pub start_index: u32,
    pub base_vertex: u32,
    pub vertex_count: u32,
}

/// Concatenated geometry with named submeshes
#[derive(Clone, Debug, Default)]
pub struct GeometryBatch {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    /// Insertion order
    entries: Vec<(String, Submesh)>,
    lookup: HashMap<String, usize>,
}

impl GeometryBatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a mesh under `name` and return where it landed
    ///
    /// Fails on a duplicate name, or when the batch would outgrow `u32`
    /// offsets.
    pub fn push(&mut self, name: impl Into<String>, mesh: &Mesh) -> GeometryResult<Submesh> {
        let name = name.into();
        if self.lookup.contains_key(&name) {
            return Err(GeometryError::DuplicateSubmesh(name));
        }

        let submesh = self.place(&name, mesh.vertex_count(), mesh.indices().len())?;

        self.vertices.extend_from_slice(mesh.vertices());
        self.indices.extend_from_slice(mesh.indices());

        debug!(
            "{}: '{}' at vertex {}, index {} ({} indices)",
            self.name, name, submesh.base_vertex, submesh.start_index, submesh.index_count
        );

        self.lookup.insert(name.clone(), self.entries.len());
        self.entries.push((name, submesh));
        Ok(submesh)
    }

    /// Draw arguments for a mesh appended after the current contents
    ///
    /// Both buffers must stay addressable by `u32` offsets once the mesh is
    /// in, so a draw's `start_index + index_count` never wraps.
    fn place(
        &self,
        name: &str,
        vertex_count: usize,
        index_count: usize,
    ) -> GeometryResult<Submesh> {
        let overflow = || GeometryError::BatchOverflow {
            batch: self.name.clone(),
            submesh: name.to_string(),
        };
        let offset = |n: usize| u32::try_from(n).map_err(|_| overflow());

        let submesh = Submesh {
            index_count: offset(index_count)?,
            start_index: offset(self.indices.len())?,
            base_vertex: offset(self.vertices.len())?,
            vertex_count: offset(vertex_count)?,
        };
        submesh
            .start_index
            .checked_add(submesh.index_count)
            .zip(submesh.base_vertex.checked_add(submesh.vertex_count))
            .ok_or_else(overflow)?;
        Ok(submesh)
    }

    /// Look up a submesh by name
    pub fn submesh(&self, name: &str) -> GeometryResult<Submesh> {
        self.lookup
            .get(name)
            .map(|&i| self.entries[i].1)
            .ok_or_else(|| GeometryError::UnknownSubmesh(name.to_string()))
    }

    /// Submeshes in insertion order
    pub fn submeshes(&self) -> impl Iterator<Item = (&str, Submesh)> + '_ {
        self.entries.iter().map(|(name, s)| (name.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Narrow the shared index buffer to 16 bits
    ///
    /// Fails if any single submesh has more vertices than a `u16` index can
    /// address. The total may exceed that, since indices are relative to
    /// each submesh's `base_vertex`.
    pub fn indices16(&self) -> GeometryResult<Vec<u16>> {
        if let Some((_, s)) = self
            .entries
            .iter()
            .find(|(_, s)| s.vertex_count as usize > u16::MAX as usize)
        {
            return Err(GeometryError::IndexOverflow {
                vertex_count: s.vertex_count as usize,
            });
        }
        Ok(self.indices.iter().map(|&i| i as u16).collect())
    }

    /// Vertex buffer as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes (u32 per index)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
