//! Sphere generators (UV sphere and icosahedron-based geosphere)

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use tracing::debug;

use super::{ensure_count, ensure_positive, ensure_size};
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::subdivide::clamp_passes;
use crate::vertex::Vertex;

/// Icosahedron vertex coordinates (unit circumradius)
const ICO_X: f32 = 0.525731;
const ICO_Z: f32 = 0.850651;

const ICOSAHEDRON_POSITIONS: [[f32; 3]; 12] = [
    [-ICO_X, 0.0, ICO_Z],
    [ICO_X, 0.0, ICO_Z],
    [-ICO_X, 0.0, -ICO_Z],
    [ICO_X, 0.0, -ICO_Z],
    [0.0, ICO_Z, ICO_X],
    [0.0, ICO_Z, -ICO_X],
    [0.0, -ICO_Z, ICO_X],
    [0.0, -ICO_Z, -ICO_X],
    [ICO_Z, ICO_X, 0.0],
    [-ICO_Z, ICO_X, 0.0],
    [ICO_Z, -ICO_X, 0.0],
    [-ICO_Z, -ICO_X, 0.0],
];

const ICOSAHEDRON_TRIANGLES: [[u32; 3]; 20] = [
    [1, 4, 0],
    [4, 9, 0],
    [4, 5, 9],
    [8, 5, 4],
    [1, 8, 4],
    [1, 10, 8],
    [10, 3, 8],
    [8, 3, 5],
    [3, 2, 5],
    [3, 7, 2],
    [3, 10, 7],
    [10, 6, 7],
    [6, 11, 7],
    [6, 0, 11],
    [6, 1, 0],
    [10, 1, 6],
    [11, 0, 9],
    [2, 11, 9],
    [5, 2, 9],
    [11, 2, 7],
];

/// Unit tangent along increasing θ for a point at spherical angles (θ, φ)
///
/// Zero at the poles (sin φ = 0), where +X is used instead.
fn sphere_tangent(theta: f32, phi: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(-sin_phi * theta.sin(), 0.0, sin_phi * theta.cos())
        .try_normalize()
        .unwrap_or(Vec3::X)
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius (> 0)
/// * `slice_count` - Segments around the Y axis (min 3)
/// * `stack_count` - Segments from pole to pole (min 2)
///
/// # Returns
/// `2 + (stack_count - 1) * (slice_count + 1)` vertices: one vertex per pole
/// plus interior rings with the seam column duplicated.
///
/// # UV Mapping
/// - U = θ / 2π around the Y axis (0 and 1 both present at the seam)
/// - V = φ / π from the top pole (0) to the bottom pole (1)
pub fn create_sphere(radius: f32, slice_count: u32, stack_count: u32) -> GeometryResult<Mesh> {
    let radius = ensure_positive("sphere", "radius", radius)?;
    let slices = ensure_count("sphere", "slice_count", slice_count, 3)?;
    let stacks = ensure_count("sphere", "stack_count", stack_count, 2)?;

    let ring_count = stacks - 1;
    let (vertex_count, index_count) = ensure_size(
        "sphere",
        "slice_count * stack_count",
        slices
            .checked_add(1)
            .and_then(|len| ring_count.checked_mul(len))
            .and_then(|ring_vertices| ring_vertices.checked_add(2)),
        slices.checked_mul(ring_count).and_then(|quads| quads.checked_mul(6)),
    )?;
    let ring_len = slices + 1;
    let mut mesh = Mesh::with_capacity(vertex_count, index_count);

    let phi_step = PI / stacks as f32;
    let theta_step = TAU / slices as f32;

    // North pole
    mesh.add_vertex(Vertex::new(
        Vec3::new(0.0, radius, 0.0),
        Vec3::Y,
        Vec3::X,
        Vec2::new(0.0, 0.0),
    ));

    // Interior rings; the poles are not rings
    for i in 1..stacks {
        let phi = i as f32 * phi_step;
        for j in 0..=slices {
            let theta = j as f32 * theta_step;
            let direction = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());

            mesh.add_vertex(Vertex::new(
                radius * direction,
                direction.normalize(),
                sphere_tangent(theta, phi),
                Vec2::new(theta / TAU, phi / PI),
            ));
        }
    }

    // South pole
    let south = mesh.add_vertex(Vertex::new(
        Vec3::new(0.0, -radius, 0.0),
        Vec3::NEG_Y,
        Vec3::X,
        Vec2::new(0.0, 1.0),
    ));

    // Top fan
    for j in 1..=slices {
        mesh.add_triangle(0, j + 1, j);
    }

    // Bands between consecutive rings
    let base = 1;
    for i in 0..ring_count - 1 {
        for j in 0..slices {
            let upper = base + i * ring_len + j;
            let lower = base + (i + 1) * ring_len + j;

            mesh.add_triangle(upper, upper + 1, lower);
            mesh.add_triangle(lower, upper + 1, lower + 1);
        }
    }

    // Bottom fan, wound the other way round
    let last_ring = south - ring_len;
    for j in 0..slices {
        mesh.add_triangle(south, last_ring + j, last_ring + j + 1);
    }

    debug!(
        "create_sphere: {} slices, {} stacks -> {} vertices",
        slices,
        stacks,
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Generate a geodesic sphere by subdividing an icosahedron
///
/// # Arguments
/// * `radius` - Sphere radius (> 0)
/// * `subdivisions` - Midpoint subdivision passes (clamped to 6)
///
/// Subdivided vertices are pushed back onto the sphere and every attribute
/// is recomputed from the projected position; interpolated attributes from
/// the subdivision passes are discarded.
pub fn create_geosphere(radius: f32, subdivisions: u32) -> GeometryResult<Mesh> {
    let radius = ensure_positive("geosphere", "radius", radius)?;
    let passes = clamp_passes("create_geosphere", subdivisions);

    let mut seed = Mesh::with_capacity(12, 60);
    for p in ICOSAHEDRON_POSITIONS {
        seed.add_vertex(Vertex::from_position(Vec3::from_array(p)));
    }
    for [a, b, c] in ICOSAHEDRON_TRIANGLES {
        seed.add_triangle(a, b, c);
    }

    let (mut vertices, indices) = seed.subdivided(passes).into_parts();
    for v in &mut vertices {
        *v = project_to_sphere(v.position, radius);
    }

    let mesh = Mesh::from_parts(vertices, indices)?;
    debug!(
        "create_geosphere: {} passes -> {} triangles",
        passes,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Rebuild a vertex on the sphere of `radius` along the direction of `position`
fn project_to_sphere(position: Vec3, radius: f32) -> Vertex {
    let normal = position.normalize();
    let position = radius * normal;

    let mut theta = position.z.atan2(position.x);
    if theta < 0.0 {
        theta += TAU;
    }
    let phi = (position.y / radius).clamp(-1.0, 1.0).acos();

    Vertex::new(
        position,
        normal,
        sphere_tangent(theta, phi),
        Vec2::new(theta / TAU, phi / PI),
    )
}
