//! Cylinder and frustum generator

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use tracing::debug;

use super::{ensure_count, ensure_finite, ensure_nonzero, ensure_size};
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Generate a cylinder along the Y axis, centered at the origin
///
/// Differing radii produce a frustum; the side normals tilt to follow the
/// slant. Both ends are closed with flat caps.
///
/// # Arguments
/// * `bottom_radius` - Radius at y = -height/2
/// * `top_radius` - Radius at y = +height/2
/// * `height` - Extent along Y (non-zero)
/// * `slice_count` - Segments around the Y axis (min 3)
/// * `stack_count` - Bands along the height (min 1)
///
/// # Returns
/// `(stack_count + 1) * (slice_count + 1)` side vertices followed by
/// `slice_count + 2` vertices per cap (top cap first).
pub fn create_cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    slice_count: u32,
    stack_count: u32,
) -> GeometryResult<Mesh> {
    let bottom_radius = ensure_finite("cylinder", "bottom_radius", bottom_radius)?;
    let top_radius = ensure_finite("cylinder", "top_radius", top_radius)?;
    let height = ensure_nonzero("cylinder", "height", height)?;
    let slices = ensure_count("cylinder", "slice_count", slice_count, 3)?;
    let stacks = ensure_count("cylinder", "stack_count", stack_count, 1)?;

    // Side rings plus one ring and a center per cap; both caps together
    // index as many triangles as one extra band
    let (vertex_count, index_count) = ensure_size(
        "cylinder",
        "slice_count * stack_count",
        slices
            .checked_add(1)
            .zip(stacks.checked_add(3))
            .and_then(|(len, rings)| rings.checked_mul(len))
            .and_then(|ring_vertices| ring_vertices.checked_add(2)),
        stacks
            .checked_add(1)
            .and_then(|bands| bands.checked_mul(slices))
            .and_then(|quads| quads.checked_mul(6)),
    )?;
    let ring_len = slices + 1;
    let mut mesh = Mesh::with_capacity(vertex_count, index_count);

    let stack_height = height / stacks as f32;
    let radius_step = (top_radius - bottom_radius) / stacks as f32;
    let theta_step = TAU / slices as f32;

    for i in 0..=stacks {
        let y = -0.5 * height + i as f32 * stack_height;
        let r = bottom_radius + i as f32 * radius_step;

        for j in 0..=slices {
            let theta = j as f32 * theta_step;
            let (s, c) = theta.sin_cos();

            // Tangent is dP/dθ; the bitangent carries the slant of the frustum
            let tangent = Vec3::new(-s, 0.0, c);
            let dr = bottom_radius - top_radius;
            let bitangent = Vec3::new(dr * c, -height, dr * s);
            let normal = tangent.cross(bitangent).normalize();

            mesh.add_vertex(Vertex::new(
                Vec3::new(r * c, y, r * s),
                normal,
                tangent,
                Vec2::new(j as f32 / slices as f32, 1.0 - i as f32 / stacks as f32),
            ));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let lower = i * ring_len + j;
            let upper = (i + 1) * ring_len + j;

            mesh.add_triangle(lower, upper, upper + 1);
            mesh.add_triangle(lower, upper + 1, lower + 1);
        }
    }

    build_top_cap(&mut mesh, top_radius, height, slices);
    build_bottom_cap(&mut mesh, bottom_radius, height, slices);

    debug!(
        "create_cylinder: r={}..{}, {} slices, {} stacks -> {} vertices",
        bottom_radius,
        top_radius,
        slices,
        stacks,
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Append a cap ring plus center vertex at height `y` and return
/// (index of the first ring vertex, index of the center)
///
/// Cap UVs project (x, z) scaled by 1/height so texel density roughly
/// tracks the side.
fn push_cap_vertices(
    mesh: &mut Mesh,
    radius: f32,
    y: f32,
    height: f32,
    normal: Vec3,
    slices: u32,
) -> (u32, u32) {
    let base = mesh.vertex_count() as u32;
    let theta_step = TAU / slices as f32;

    for i in 0..=slices {
        let (s, c) = (i as f32 * theta_step).sin_cos();
        let x = radius * c;
        let z = radius * s;

        mesh.add_vertex(Vertex::new(
            Vec3::new(x, y, z),
            normal,
            Vec3::X,
            Vec2::new(x / height + 0.5, z / height + 0.5),
        ));
    }

    let center = mesh.add_vertex(Vertex::new(
        Vec3::new(0.0, y, 0.0),
        normal,
        Vec3::X,
        Vec2::new(0.5, 0.5),
    ));
    (base, center)
}

fn build_top_cap(mesh: &mut Mesh, radius: f32, height: f32, slices: u32) {
    let (base, center) = push_cap_vertices(mesh, radius, 0.5 * height, height, Vec3::Y, slices);
    for i in 0..slices {
        mesh.add_triangle(center, base + i + 1, base + i);
    }
}

fn build_bottom_cap(mesh: &mut Mesh, radius: f32, height: f32, slices: u32) {
    let (base, center) =
        push_cap_vertices(mesh, radius, -0.5 * height, height, Vec3::NEG_Y, slices);
    for i in 0..slices {
        mesh.add_triangle(center, base + i, base + i + 1);
    }
}
