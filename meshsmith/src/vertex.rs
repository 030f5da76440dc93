//! Vertex attribute model

use glam::{Vec2, Vec3};

/// Vertex with position, normal, tangent, and texture coordinate
///
/// Layout is `#[repr(C)]` and `Pod` (44 bytes) so vertex slices can be
/// uploaded to GPU buffers without repacking.
///
/// `normal` and `tangent` are unit length wherever a generator writes them.
/// The tangent follows the direction of increasing U and is not
/// re-orthogonalized against the normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3, tangent: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tangent,
            tex_coord,
        }
    }

    /// Vertex with only a position set; orientation and texture fields are zero
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Vertex halfway between `a` and `b`
    ///
    /// Position and texture coordinate are the arithmetic mean. Normal and
    /// tangent are the mean renormalized to unit length, since averaging unit
    /// vectors shortens them. When the mean vanishes (opposite or zeroed
    /// inputs) the attribute is the zero vector rather than NaN.
    pub fn midpoint(a: &Vertex, b: &Vertex) -> Vertex {
        Vertex {
            position: 0.5 * (a.position + b.position),
            normal: (0.5 * (a.normal + b.normal)).normalize_or_zero(),
            tangent: (0.5 * (a.tangent + b.tangent)).normalize_or_zero(),
            tex_coord: 0.5 * (a.tex_coord + b.tex_coord),
        }
    }
}
