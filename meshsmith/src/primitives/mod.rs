//! Procedural primitive generators
//!
//! Every generator is a pure function of its parameters and returns a fresh
//! [`Mesh`](crate::Mesh). Triangles are wound so that `(b - a) x (c - a)`
//! points out of the solid.

mod box_grid;
mod cylinder;
mod polyhedra;
mod sphere;


pub use box_grid::{create_box, create_grid, create_quad};
pub use cylinder::create_cylinder;
pub use polyhedra::{
    POLYHEDRON_SUBDIVISIONS, Polyhedron, create_cone, create_diamond, create_pyramid,
    create_tetrahedron, create_triangular_prism, create_truncated_pyramid, create_wedge,
};
pub use sphere::{create_geosphere, create_sphere};

use crate::error::{GeometryError, GeometryResult};

/// Reject a count below the generator's minimum
pub(crate) fn ensure_count(
    shape: &'static str,
    param: &'static str,
    value: u32,
    min: u32,
) -> GeometryResult<u32> {
    if value < min {
        return Err(GeometryError::CountTooSmall {
            shape,
            param,
            min,
            value,
        });
    }
    Ok(value)
}

/// Reject a dimension that is NaN, infinite, or zero
pub(crate) fn ensure_nonzero(
    shape: &'static str,
    param: &'static str,
    value: f32,
) -> GeometryResult<f32> {
    check_dimension(shape, param, value, value != 0.0, "finite and non-zero")
}

/// Reject a dimension that is NaN, infinite, zero, or negative
pub(crate) fn ensure_positive(
    shape: &'static str,
    param: &'static str,
    value: f32,
) -> GeometryResult<f32> {
    check_dimension(shape, param, value, value > 0.0, "finite and positive")
}

/// Reject a dimension that is NaN or infinite (zero and negative are allowed)
pub(crate) fn ensure_finite(
    shape: &'static str,
    param: &'static str,
    value: f32,
) -> GeometryResult<f32> {
    check_dimension(shape, param, value, true, "finite")
}

/// Vertex and index totals as buffer capacities
///
/// Totals are computed with checked `u32` arithmetic by the caller; `None`
/// means the counts overflowed and the mesh could not be indexed.
pub(crate) fn ensure_size(
    shape: &'static str,
    param: &'static str,
    vertex_count: Option<u32>,
    index_count: Option<u32>,
) -> GeometryResult<(usize, usize)> {
    match (vertex_count, index_count) {
        (Some(vertices), Some(indices)) => Ok((vertices as usize, indices as usize)),
        _ => Err(GeometryError::TooLarge { shape, param }),
    }
}

fn check_dimension(
    shape: &'static str,
    param: &'static str,
    value: f32,
    in_range: bool,
    expected: &'static str,
) -> GeometryResult<f32> {
    if !value.is_finite() || !in_range {
        return Err(GeometryError::InvalidDimension {
            shape,
            param,
            expected,
            value,
        });
    }
    Ok(value)
}
