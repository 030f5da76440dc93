//! Flat-faced primitives (box, grid, screen quad)

use glam::{Vec2, Vec3};
use tracing::debug;

use super::{ensure_count, ensure_finite, ensure_size};
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// One box face: normal, tangent, corner signs (scaled by half-extents), UVs
type BoxFace = (Vec3, Vec3, [[f32; 3]; 4], [[f32; 2]; 4]);

const BOX_FACES: [BoxFace; 6] = [
    // Front (-Z)
    (
        Vec3::NEG_Z,
        Vec3::X,
        [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
        [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
    ),
    // Back (+Z)
    (
        Vec3::Z,
        Vec3::NEG_X,
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
    ),
    // Top (+Y)
    (
        Vec3::Y,
        Vec3::X,
        [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
        [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
    ),
    // Bottom (-Y)
    (
        Vec3::NEG_Y,
        Vec3::NEG_X,
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
    ),
    // Left (-X)
    (
        Vec3::NEG_X,
        Vec3::NEG_Z,
        [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]],
        [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
    ),
    // Right (+X)
    (
        Vec3::X,
        Vec3::Z,
        [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
        [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
    ),
];

/// Generate a box centered at the origin
///
/// # Arguments
/// * `width`, `height`, `depth` - Full extents along X, Y, Z. Negative values
///   mirror the box; they are not rejected.
/// * `subdivisions` - Midpoint subdivision passes (clamped to 6)
///
/// # Returns
/// 24 vertices (4 per face, no sharing across faces since normals differ)
/// and 36 indices before subdivision.
pub fn create_box(width: f32, height: f32, depth: f32, subdivisions: u32) -> GeometryResult<Mesh> {
    let half = Vec3::new(
        0.5 * ensure_finite("box", "width", width)?,
        0.5 * ensure_finite("box", "height", height)?,
        0.5 * ensure_finite("box", "depth", depth)?,
    );

    let mut mesh = Mesh::with_capacity(24, 36);
    for (normal, tangent, corners, uvs) in &BOX_FACES {
        let base = mesh.vertex_count() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            mesh.add_vertex(Vertex::new(
                Vec3::from_array(*corner) * half,
                *normal,
                *tangent,
                Vec2::from_array(*uv),
            ));
        }

        // Two triangles per face
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    let mesh = mesh.subdivided(subdivisions);
    debug!(
        "create_box: {} vertices, {} indices",
        mesh.vertex_count(),
        mesh.indices().len()
    );
    Ok(mesh)
}

/// Generate an `rows x cols` lattice on the XZ plane (Y=0), centered at the origin
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `rows` - Vertex rows along Z (min 2)
/// * `cols` - Vertex columns along X (min 2)
///
/// # UV Mapping
/// - U maps 0→1 along X (left to right)
/// - V maps 0→1 along -Z (back row first)
pub fn create_grid(width: f32, depth: f32, rows: u32, cols: u32) -> GeometryResult<Mesh> {
    let width = ensure_finite("grid", "width", width)?;
    let depth = ensure_finite("grid", "depth", depth)?;
    let m = ensure_count("grid", "rows", rows, 2)?;
    let n = ensure_count("grid", "cols", cols, 2)?;

    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;

    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;
    let du = 1.0 / (n - 1) as f32;
    let dv = 1.0 / (m - 1) as f32;

    let (vertex_count, index_count) = ensure_size(
        "grid",
        "rows * cols",
        m.checked_mul(n),
        (m - 1).checked_mul(n - 1).and_then(|cells| cells.checked_mul(6)),
    )?;
    let mut mesh = Mesh::with_capacity(vertex_count, index_count);

    for i in 0..m {
        let z = half_depth - i as f32 * dz;
        for j in 0..n {
            let x = -half_width + j as f32 * dx;
            mesh.add_vertex(Vertex::new(
                Vec3::new(x, 0.0, z),
                Vec3::Y,
                Vec3::X,
                Vec2::new(j as f32 * du, i as f32 * dv),
            ));
        }
    }

    // Two triangles per quad cell
    for i in 0..m - 1 {
        for j in 0..n - 1 {
            let i0 = i * n + j;
            let i1 = i0 + 1;
            let i2 = (i + 1) * n + j;
            let i3 = i2 + 1;

            mesh.add_triangle(i0, i1, i2);
            mesh.add_triangle(i2, i1, i3);
        }
    }

    debug!("create_grid: {}x{} -> {} triangles", m, n, mesh.triangle_count());
    Ok(mesh)
}

/// Generate a screen-space rectangle facing -Z
///
/// `(x, y)` is the top-left corner; the quad extends `width` to the right and
/// `height` downward at constant `depth`. Intended for overlay and
/// post-process geometry, so it is never subdivided.
pub fn create_quad(x: f32, y: f32, width: f32, height: f32, depth: f32) -> GeometryResult<Mesh> {
    let x = ensure_finite("quad", "x", x)?;
    let y = ensure_finite("quad", "y", y)?;
    let w = ensure_finite("quad", "width", width)?;
    let h = ensure_finite("quad", "height", height)?;
    let depth = ensure_finite("quad", "depth", depth)?;

    let corners = [
        (Vec3::new(x, y - h, depth), Vec2::new(0.0, 1.0)),
        (Vec3::new(x, y, depth), Vec2::new(0.0, 0.0)),
        (Vec3::new(x + w, y, depth), Vec2::new(1.0, 0.0)),
        (Vec3::new(x + w, y - h, depth), Vec2::new(1.0, 1.0)),
    ];

    let mut mesh = Mesh::with_capacity(4, 6);
    for (position, uv) in corners {
        mesh.add_vertex(Vertex::new(position, Vec3::NEG_Z, Vec3::X, uv));
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);

    debug!("create_quad: {}x{} at ({}, {}, {})", w, h, x, y, depth);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    #[test]
    fn test_box_counts() {
        let mesh = create_box(1.0, 1.0, 1.0, 0).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices().len(), 36);
    }

    #[test]
    fn test_box_first_vertex() {
        let mesh = create_box(2.0, 2.0, 2.0, 0).unwrap();
        assert_eq!(mesh.vertices()[0].position, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(mesh.vertices()[0].normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_box_face_normals_match_positions() {
        let mesh = create_box(2.0, 4.0, 6.0, 0).unwrap();
        for v in mesh.vertices() {
            // Each vertex lies on the face plane its normal points out of
            let extent = v.position.dot(v.normal);
            let expected = (Vec3::new(1.0, 2.0, 3.0) * v.normal.abs()).length();
            assert!((extent - expected).abs() < 1e-6);
            assert!(v.normal.dot(v.tangent).abs() < 1e-6);
        }
    }

    #[test]
    fn test_box_subdivision_counts() {
        let mesh = create_box(1.0, 1.0, 1.0, 3).unwrap();
        // 12 * 4^2 triangles feed the last pass, 6 vertices each
        assert_eq!(mesh.vertex_count(), 12 * 16 * 6);
        assert_eq!(mesh.indices().len(), 36 * 64);
    }

    #[test]
    fn test_box_subdivision_clamped() {
        let clamped = create_box(1.0, 1.0, 1.0, 50).unwrap();
        let max = create_box(1.0, 1.0, 1.0, 6).unwrap();
        assert_eq!(clamped, max);
        assert_eq!(max.vertex_count(), 12 * 4usize.pow(5) * 6);
    }

    #[test]
    fn test_box_negative_dimensions_mirror() {
        let mesh = create_box(-2.0, 2.0, 2.0, 0).unwrap();
        assert_eq!(mesh.vertices()[0].position, Vec3::new(1.0, -1.0, -1.0));
        assert!(create_box(f32::NAN, 1.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_grid_counts() {
        let mesh = create_grid(2.0, 2.0, 3, 3).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.indices().len(), 24);
        assert_eq!(mesh.vertices()[4].position, Vec3::ZERO);
    }

    #[test]
    fn test_grid_uv_stretch() {
        let mesh = create_grid(10.0, 4.0, 5, 3).unwrap();
        let first = mesh.vertices()[0];
        let last = mesh.vertices()[mesh.vertex_count() - 1];

        assert_eq!(first.tex_coord, Vec2::new(0.0, 0.0));
        assert_eq!(last.tex_coord, Vec2::new(1.0, 1.0));
        assert_eq!(first.position, Vec3::new(-5.0, 0.0, 2.0));
        assert_eq!(last.position, Vec3::new(5.0, 0.0, -2.0));
    }

    #[test]
    fn test_grid_rejects_degenerate_lattice() {
        assert_eq!(
            create_grid(1.0, 1.0, 1, 3),
            Err(GeometryError::CountTooSmall {
                shape: "grid",
                param: "rows",
                min: 2,
                value: 1,
            })
        );
        assert!(create_grid(1.0, 1.0, 3, 0).is_err());
    }

    #[test]
    fn test_grid_rejects_overflowing_lattice() {
        assert_eq!(
            create_grid(1.0, 1.0, 70_000, 70_000),
            Err(GeometryError::TooLarge {
                shape: "grid",
                param: "rows * cols",
            })
        );
        // Vertex count fits, index count does not
        assert!(matches!(
            create_grid(1.0, 1.0, 2, 1 << 30),
            Err(GeometryError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_quad_layout() {
        let mesh = create_quad(-1.0, 1.0, 2.0, 2.0, 0.0).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices()[0].position, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(mesh.vertices()[2].position, Vec3::new(1.0, 1.0, 0.0));
        for v in mesh.vertices() {
            assert_eq!(v.normal, Vec3::NEG_Z);
            assert_eq!(v.tangent, Vec3::X);
        }
    }
}
