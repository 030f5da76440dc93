//! Coarse faceted solids built from hand-authored tables
//!
//! Each shape is a [`Polyhedron`]: a handful of corner positions plus a
//! constant triangle list. [`Polyhedron::build`] turns the table into a mesh
//! with exact flat shading, then subdivides it [`POLYHEDRON_SUBDIVISIONS`]
//! times for denser topology.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use tracing::debug;

use super::ensure_nonzero;
use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Subdivision passes applied to every coarse polyhedron
pub const POLYHEDRON_SUBDIVISIONS: u32 = 3;

/// Corners around an octagonal ring (cone base, diamond rings)
const OCTAGON_SIDES: u32 = 8;

/// Declarative description of a faceted solid
#[derive(Clone, Debug, PartialEq)]
pub struct Polyhedron {
    pub positions: Vec<Vec3>,
    /// Triangles wound so `(b - a) x (c - a)` points outward
    pub triangles: &'static [[u32; 3]],
}

impl Polyhedron {
    pub fn new(positions: Vec<Vec3>, triangles: &'static [[u32; 3]]) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Expand the table into a flat-shaded mesh without subdivision
    ///
    /// Faces do not share vertices: each triangle gets three vertices
    /// carrying its face normal and a tangent along its first edge, with
    /// texture coordinates (0,0), (1,0), (0,1). Degenerate faces get zero
    /// normal and tangent.
    pub fn assemble(&self) -> GeometryResult<Mesh> {
        let corner = |index: u32| -> GeometryResult<Vec3> {
            self.positions
                .get(index as usize)
                .copied()
                .ok_or(GeometryError::IndexOutOfBounds {
                    index,
                    vertex_count: self.positions.len(),
                })
        };

        let mut mesh = Mesh::with_capacity(self.triangles.len() * 3, self.triangles.len() * 3);
        for &[a, b, c] in self.triangles {
            let (pa, pb, pc) = (corner(a)?, corner(b)?, corner(c)?);
            let normal = (pb - pa).cross(pc - pa).normalize_or_zero();
            let tangent = (pb - pa).normalize_or_zero();

            let i0 = mesh.add_vertex(Vertex::new(pa, normal, tangent, Vec2::new(0.0, 0.0)));
            let i1 = mesh.add_vertex(Vertex::new(pb, normal, tangent, Vec2::new(1.0, 0.0)));
            let i2 = mesh.add_vertex(Vertex::new(pc, normal, tangent, Vec2::new(0.0, 1.0)));
            mesh.add_triangle(i0, i1, i2);
        }
        Ok(mesh)
    }

    /// Assemble and subdivide [`POLYHEDRON_SUBDIVISIONS`] times
    pub fn build(&self) -> GeometryResult<Mesh> {
        Ok(self.assemble()?.subdivided(POLYHEDRON_SUBDIVISIONS))
    }
}

/// Points on a horizontal octagon, starting one step past +X
fn octagon(radius: f32, y: f32) -> impl Iterator<Item = Vec3> {
    (1..=OCTAGON_SIDES).map(move |k| {
        let (s, c) = (k as f32 * TAU / OCTAGON_SIDES as f32).sin_cos();
        Vec3::new(radius * c, y, radius * s)
    })
}

fn finish(shape: &str, polyhedron: Polyhedron) -> GeometryResult<Mesh> {
    let mesh = polyhedron.build()?;
    debug!(
        "{}: {} faces -> {} triangles",
        shape,
        polyhedron.triangles.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

const CONE_TRIANGLES: &[[u32; 3]] = &[
    // Base fan around vertex 0
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 6],
    [0, 6, 7],
    [0, 7, 8],
    [0, 8, 1],
    // Side fan around the apex
    [9, 2, 1],
    [9, 1, 8],
    [9, 8, 7],
    [9, 7, 6],
    [9, 6, 5],
    [9, 5, 4],
    [9, 4, 3],
    [9, 3, 2],
];

/// Generate an octagonal cone along Y, centered at the origin
///
/// # Arguments
/// * `height` - Base to apex distance (non-zero)
/// * `radius` - Base radius (non-zero)
pub fn create_cone(height: f32, radius: f32) -> GeometryResult<Mesh> {
    let half = 0.5 * ensure_nonzero("cone", "height", height)?;
    let radius = ensure_nonzero("cone", "radius", radius)?;

    let mut positions = Vec::with_capacity(10);
    positions.push(Vec3::new(0.0, -half, 0.0));
    positions.extend(octagon(radius, -half));
    positions.push(Vec3::new(0.0, half, 0.0));

    finish("create_cone", Polyhedron::new(positions, CONE_TRIANGLES))
}

const WEDGE_TRIANGLES: &[[u32; 3]] = &[
    // Bottom
    [0, 2, 1],
    [2, 3, 1],
    // Right end
    [4, 3, 2],
    // Left end
    [5, 0, 1],
    // Slope
    [2, 0, 5],
    [2, 5, 4],
    // Back (vertical, +Z)
    [5, 1, 3],
    [5, 3, 4],
];

/// Generate a wedge: a box whose top is cut diagonally from its top edge
/// at +Z down to its bottom edge at -Z
///
/// # Arguments
/// * `width`, `depth`, `height` - Full extents along X, Z, Y (non-zero)
pub fn create_wedge(width: f32, depth: f32, height: f32) -> GeometryResult<Mesh> {
    let w = 0.5 * ensure_nonzero("wedge", "width", width)?;
    let d = 0.5 * ensure_nonzero("wedge", "depth", depth)?;
    let h = 0.5 * ensure_nonzero("wedge", "height", height)?;

    let positions = vec![
        Vec3::new(-w, -h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
    ];

    finish("create_wedge", Polyhedron::new(positions, WEDGE_TRIANGLES))
}

const PYRAMID_TRIANGLES: &[[u32; 3]] = &[
    // Base
    [1, 3, 4],
    [1, 4, 2],
    // Sides
    [0, 2, 4],
    [0, 3, 1],
    [0, 4, 3],
    [0, 1, 2],
];

/// Generate a square-based pyramid with its apex above the base center
///
/// # Arguments
/// * `width`, `depth` - Base extents along X and Z (non-zero)
/// * `height` - Base to apex distance (non-zero)
pub fn create_pyramid(width: f32, depth: f32, height: f32) -> GeometryResult<Mesh> {
    let w = 0.5 * ensure_nonzero("pyramid", "width", width)?;
    let d = 0.5 * ensure_nonzero("pyramid", "depth", depth)?;
    let h = 0.5 * ensure_nonzero("pyramid", "height", height)?;

    let positions = vec![
        Vec3::new(0.0, h, 0.0),
        Vec3::new(-w, -h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, -h, d),
    ];

    finish("create_pyramid", Polyhedron::new(positions, PYRAMID_TRIANGLES))
}

const TRUNCATED_PYRAMID_TRIANGLES: &[[u32; 3]] = &[
    // Bottom
    [0, 2, 1],
    [2, 3, 1],
    // Right (+X)
    [2, 6, 3],
    [3, 6, 7],
    // Left (-X)
    [1, 5, 0],
    [0, 5, 4],
    // Back (-Z)
    [0, 4, 2],
    [2, 4, 6],
    // Front (+Z)
    [3, 7, 1],
    [1, 7, 5],
    // Top
    [4, 5, 6],
    [6, 5, 7],
];

/// Generate a pyramid frustum with rectangular top and bottom faces
///
/// # Arguments
/// * `bottom_width`, `bottom_depth` - Bottom face extents (non-zero)
/// * `top_width`, `top_depth` - Top face extents (non-zero)
/// * `height` - Distance between the faces (non-zero)
pub fn create_truncated_pyramid(
    bottom_width: f32,
    bottom_depth: f32,
    top_width: f32,
    top_depth: f32,
    height: f32,
) -> GeometryResult<Mesh> {
    const SHAPE: &str = "truncated_pyramid";
    let bw = 0.5 * ensure_nonzero(SHAPE, "bottom_width", bottom_width)?;
    let bd = 0.5 * ensure_nonzero(SHAPE, "bottom_depth", bottom_depth)?;
    let tw = 0.5 * ensure_nonzero(SHAPE, "top_width", top_width)?;
    let td = 0.5 * ensure_nonzero(SHAPE, "top_depth", top_depth)?;
    let h = 0.5 * ensure_nonzero(SHAPE, "height", height)?;

    let positions = vec![
        Vec3::new(-bw, -h, -bd),
        Vec3::new(-bw, -h, bd),
        Vec3::new(bw, -h, -bd),
        Vec3::new(bw, -h, bd),
        Vec3::new(-tw, h, -td),
        Vec3::new(-tw, h, td),
        Vec3::new(tw, h, -td),
        Vec3::new(tw, h, td),
    ];

    finish(
        "create_truncated_pyramid",
        Polyhedron::new(positions, TRUNCATED_PYRAMID_TRIANGLES),
    )
}

/// Fixed Y of the diamond's lower tip
const DIAMOND_TIP_Y: f32 = 0.25;
const DIAMOND_WIDE_RADIUS: f32 = 0.75;
const DIAMOND_NARROW_RADIUS: f32 = 0.25;

const DIAMOND_TRIANGLES: &[[u32; 3]] = &[
    // Lower fan from the tip to the wide ring
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 6],
    [0, 6, 7],
    [0, 7, 8],
    [0, 8, 1],
    // Band from the wide ring up to the narrow ring
    [1, 9, 2],
    [2, 9, 10],
    [2, 10, 3],
    [3, 10, 11],
    [3, 11, 4],
    [4, 11, 12],
    [4, 12, 5],
    [5, 12, 13],
    [5, 13, 6],
    [6, 13, 14],
    [6, 14, 7],
    [7, 14, 15],
    [7, 15, 8],
    [8, 15, 16],
    [8, 16, 1],
    [1, 16, 9],
];

/// Generate a gem shape: a point at y = 0.25 widening to an octagon of
/// radius 0.75 at `0.75 * height`, then narrowing to an octagon of radius
/// 0.25 at `height`
///
/// The narrow top octagon is left open.
pub fn create_diamond(height: f32) -> GeometryResult<Mesh> {
    let height = ensure_nonzero("diamond", "height", height)?;

    let mut positions = Vec::with_capacity(17);
    positions.push(Vec3::new(0.0, DIAMOND_TIP_Y, 0.0));
    positions.extend(octagon(DIAMOND_WIDE_RADIUS, 0.75 * height));
    positions.extend(octagon(DIAMOND_NARROW_RADIUS, height));

    finish("create_diamond", Polyhedron::new(positions, DIAMOND_TRIANGLES))
}

const TRIANGULAR_PRISM_TRIANGLES: &[[u32; 3]] = &[
    // Ends
    [0, 2, 1],
    [3, 4, 5],
    // Bottom
    [0, 1, 4],
    [0, 4, 3],
    // Right slope
    [1, 2, 5],
    [1, 5, 4],
    // Left slope
    [0, 3, 5],
    [0, 5, 2],
];

/// Generate a prism with an isosceles triangle cross-section in XY,
/// extruded along Z
///
/// # Arguments
/// * `width` - Base of the triangle along X (non-zero)
/// * `depth` - Extrusion length along Z (non-zero)
/// * `height` - Triangle height along Y (non-zero)
pub fn create_triangular_prism(width: f32, depth: f32, height: f32) -> GeometryResult<Mesh> {
    let w = 0.5 * ensure_nonzero("triangular_prism", "width", width)?;
    let d = 0.5 * ensure_nonzero("triangular_prism", "depth", depth)?;
    let h = 0.5 * ensure_nonzero("triangular_prism", "height", height)?;

    let positions = vec![
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(0.0, h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(0.0, h, d),
    ];

    finish(
        "create_triangular_prism",
        Polyhedron::new(positions, TRIANGULAR_PRISM_TRIANGLES),
    )
}

const TETRAHEDRON_TRIANGLES: &[[u32; 3]] = &[[0, 1, 2], [0, 3, 1], [1, 3, 2], [2, 3, 0]];

/// Generate a tetrahedron with an equilateral base and its apex above the
/// base centroid
///
/// # Arguments
/// * `width` - Side length of the base triangle (non-zero)
/// * `height` - Base to apex distance (non-zero)
pub fn create_tetrahedron(width: f32, height: f32) -> GeometryResult<Mesh> {
    let width = ensure_nonzero("tetrahedron", "width", width)?;
    let h = 0.5 * ensure_nonzero("tetrahedron", "height", height)?;

    // Inradius and circumradius of the base triangle
    let inner = width / (2.0 * 3f32.sqrt());
    let outer = width / 3f32.sqrt();
    let half_side = 0.5 * width;

    let positions = vec![
        Vec3::new(-half_side, -h, -inner),
        Vec3::new(half_side, -h, -inner),
        Vec3::new(0.0, -h, outer),
        Vec3::new(0.0, h, 0.0),
    ];

    finish("create_tetrahedron", Polyhedron::new(positions, TETRAHEDRON_TRIANGLES))
}
