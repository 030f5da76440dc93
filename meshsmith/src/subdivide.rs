//! Midpoint subdivision
//!
//! Every triangle (v0, v1, v2) is split into four using the edge midpoints
//! m0 = mid(v0, v1), m1 = mid(v1, v2), m2 = mid(v0, v2):
//!
//! ```text
//!        v1
//!        *
//!       / \
//!   m0 *---* m1
//!     / \ / \
//!    *---*---*
//!   v0   m2   v2
//! ```
//!
//! Two flavours are provided:
//! - [`subdivide`] gives every triangle private copies of its corners and
//!   midpoints (6 vertices per input triangle). Shared edges produce
//!   duplicate vertices; this is the layout all generators rely on.
//! - [`subdivide_welded`] keeps the input vertices and shares one midpoint
//!   per undirected edge, which keeps smooth meshes indexed.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Upper bound on subdivision passes accepted by any generator
///
/// Six passes of a 12-triangle box already yield 98,304 vertices.
pub const MAX_SUBDIVISIONS: u32 = 6;

/// Clamp a requested pass count to [`MAX_SUBDIVISIONS`], logging when it is reduced
pub(crate) fn clamp_passes(caller: &str, passes: u32) -> u32 {
    if passes > MAX_SUBDIVISIONS {
        warn!(
            "{}: {} subdivisions requested, clamping to {}",
            caller, passes, MAX_SUBDIVISIONS
        );
        MAX_SUBDIVISIONS
    } else {
        passes
    }
}

/// Perform a single subdivision pass
///
/// The output has 4x the triangles and exactly 6 vertices per input
/// triangle. For triangle `t` the vertices are written as
/// `[v0, v1, v2, m0, m1, m2]` starting at `6 * t`.
pub fn subdivide(mesh: Mesh) -> Mesh {
    let vertices = mesh.vertices();
    let mut out = Mesh::with_capacity(mesh.triangle_count() * 6, mesh.indices().len() * 4);

    for [i0, i1, i2] in mesh.triangles() {
        let v0 = vertices[i0 as usize];
        let v1 = vertices[i1 as usize];
        let v2 = vertices[i2 as usize];

        let m0 = Vertex::midpoint(&v0, &v1);
        let m1 = Vertex::midpoint(&v1, &v2);
        let m2 = Vertex::midpoint(&v0, &v2);

        let base = out.add_vertex(v0);
        out.add_vertex(v1);
        out.add_vertex(v2);
        out.add_vertex(m0);
        out.add_vertex(m1);
        out.add_vertex(m2);

        let [v0, v1, v2, m0, m1, m2] = [0, 1, 2, 3, 4, 5].map(|k| base + k);
        out.add_triangle(v0, m0, m2);
        out.add_triangle(m0, m1, m2);
        out.add_triangle(m2, m1, v2);
        out.add_triangle(m0, v1, m1);
    }

    debug!(
        "subdivide: {} -> {} triangles, {} vertices",
        mesh.triangle_count(),
        out.triangle_count(),
        out.vertex_count()
    );
    out
}

/// Apply `passes` subdivision passes, clamped to [`MAX_SUBDIVISIONS`]
pub fn subdivide_passes(mesh: Mesh, passes: u32) -> Mesh {
    mesh.subdivided(passes)
}

/// Perform a single subdivision pass that shares midpoints across edges
///
/// Input vertices keep their indices; one midpoint is appended per
/// undirected edge. Triangle order and winding match [`subdivide`].
pub fn subdivide_welded(mesh: Mesh) -> Mesh {
    // Edge key: sorted pair of vertex indices
    type EdgeKey = (u32, u32);
    fn make_edge_key(a: u32, b: u32) -> EdgeKey {
        if a < b { (a, b) } else { (b, a) }
    }

    let triangles: Vec<[u32; 3]> = mesh.triangles().collect();
    let (vertices, _) = mesh.into_parts();
    let source = vertices.clone();

    let mut out = Mesh::with_capacity(
        vertices.len() + triangles.len() * 3 / 2,
        triangles.len() * 12,
    );
    for v in vertices {
        out.add_vertex(v);
    }

    // Map from edge to midpoint vertex index
    let mut edge_midpoints: HashMap<EdgeKey, u32> = HashMap::new();
    let mut midpoint = |out: &mut Mesh, a: u32, b: u32| -> u32 {
        *edge_midpoints.entry(make_edge_key(a, b)).or_insert_with(|| {
            out.add_vertex(Vertex::midpoint(&source[a as usize], &source[b as usize]))
        })
    };

    for [v0, v1, v2] in triangles {
        let m0 = midpoint(&mut out, v0, v1);
        let m1 = midpoint(&mut out, v1, v2);
        let m2 = midpoint(&mut out, v0, v2);

        out.add_triangle(v0, m0, m2);
        out.add_triangle(m0, m1, m2);
        out.add_triangle(m2, m1, v2);
        out.add_triangle(m0, v1, m1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        for (p, uv) in [
            (Vec3::new(0.0, 0.0, 0.0), Vec2::new(0.0, 1.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.0, 0.0)),
            (Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 0.0)),
            (Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 1.0)),
        ] {
            mesh.add_vertex(Vertex::new(p, Vec3::NEG_Z, Vec3::X, uv));
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        mesh
    }

    #[test]
    fn test_subdivide_quadruples_triangles() {
        let mesh = subdivide(quad());
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.vertex_count(), 12);
    }

    #[test]
    fn test_subdivide_vertex_layout() {
        let input = quad();
        let out = subdivide(input.clone());
        let v = out.vertices();

        // First triangle (0, 1, 2): corners then midpoints
        assert_eq!(v[0].position, input.vertices()[0].position);
        assert_eq!(v[1].position, input.vertices()[1].position);
        assert_eq!(v[2].position, input.vertices()[2].position);
        assert_eq!(v[3].position, 0.5 * (v[0].position + v[1].position));
        assert_eq!(v[4].position, 0.5 * (v[1].position + v[2].position));
        assert_eq!(v[5].position, 0.5 * (v[0].position + v[2].position));

        assert_eq!(&out.indices()[..12], &[0, 3, 5, 3, 4, 5, 5, 4, 2, 3, 1, 4]);
    }

    #[test]
    fn test_subdivide_preserves_winding() {
        let input = quad();
        let expected = {
            let [a, b, c] = input.triangle_positions().next().unwrap();
            (b - a).cross(c - a).normalize()
        };
        for [a, b, c] in subdivide(input).triangle_positions() {
            let n = (b - a).cross(c - a).normalize();
            assert!(n.abs_diff_eq(expected, 1e-6));
        }
    }

    #[test]
    fn test_subdivide_interpolates_uvs_and_keeps_unit_normals() {
        let out = subdivide(quad());
        assert_eq!(out.vertices()[3].tex_coord, Vec2::new(0.0, 0.5));
        for v in out.vertices() {
            assert!((v.normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_subdivide_empty_mesh() {
        let out = subdivide(Mesh::new());
        assert_eq!(out.vertex_count(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_subdivide_passes_clamped() {
        let mesh = subdivide_passes(quad(), 9);
        assert_eq!(mesh.triangle_count(), 2 * 4usize.pow(MAX_SUBDIVISIONS));
    }

    #[test]
    fn test_clamp_passes() {
        assert_eq!(clamp_passes("test", 3), 3);
        assert_eq!(clamp_passes("test", 7), MAX_SUBDIVISIONS);
    }

    #[test]
    fn test_subdivide_welded_shares_midpoints() {
        let mesh = subdivide_welded(quad());
        // 4 corners + 5 unique edges
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 8);
        for &idx in mesh.indices() {
            assert!((idx as usize) < mesh.vertex_count());
        }
    }

    #[test]
    fn test_subdivide_welded_matches_unwelded_geometry() {
        let welded = subdivide_welded(quad());
        let split = subdivide(quad());
        let a: Vec<[Vec3; 3]> = welded.triangle_positions().collect();
        let b: Vec<[Vec3; 3]> = split.triangle_positions().collect();
        assert_eq!(a, b);
    }
}
