//! Serializable shape descriptions
//!
//! A [`Shape`] names a generator and carries its parameters, so shapes can
//! be listed in configuration files and built later. The `kind` field selects
//! the generator; missing parameters take the defaults below.
//!
//! ```toml
//! kind = "cylinder"
//! bottom_radius = 1.0
//! top_radius = 0.5
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::primitives;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub subdivisions: u32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            subdivisions: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    pub radius: f32,
    pub slice_count: u32,
    pub stack_count: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            slice_count: 20,
            stack_count: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeosphereParams {
    pub radius: f32,
    pub subdivisions: u32,
}

impl Default for GeosphereParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            subdivisions: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderParams {
    pub bottom_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    pub slice_count: u32,
    pub stack_count: u32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            bottom_radius: 1.0,
            top_radius: 1.0,
            height: 1.0,
            slice_count: 20,
            stack_count: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub width: f32,
    pub depth: f32,
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            width: 26.0,
            depth: 26.0,
            rows: 50,
            cols: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for QuadParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            depth: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeParams {
    pub height: f32,
    pub radius: f32,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            height: 1.0,
            radius: 0.5,
        }
    }
}

/// Box-like extents shared by the wedge, pyramid and triangular prism
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtentParams {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for ExtentParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            depth: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncatedPyramidParams {
    pub bottom_width: f32,
    pub bottom_depth: f32,
    pub top_width: f32,
    pub top_depth: f32,
    pub height: f32,
}

impl Default for TruncatedPyramidParams {
    fn default() -> Self {
        Self {
            bottom_width: 1.0,
            bottom_depth: 1.0,
            top_width: 0.5,
            top_depth: 0.5,
            height: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondParams {
    pub height: f32,
}

impl Default for DiamondParams {
    fn default() -> Self {
        Self { height: 1.25 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrahedronParams {
    pub width: f32,
    pub height: f32,
}

impl Default for TetrahedronParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// A generator plus its parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Box(BoxParams),
    Sphere(SphereParams),
    Geosphere(GeosphereParams),
    Cylinder(CylinderParams),
    Grid(GridParams),
    Quad(QuadParams),
    Cone(ConeParams),
    Wedge(ExtentParams),
    Pyramid(ExtentParams),
    TruncatedPyramid(TruncatedPyramidParams),
    Diamond(DiamondParams),
    TriangularPrism(ExtentParams),
    Tetrahedron(TetrahedronParams),
}

impl Shape {
    /// Every `kind` tag, in declaration order
    pub const KINDS: [&'static str; 13] = [
        "box",
        "sphere",
        "geosphere",
        "cylinder",
        "grid",
        "quad",
        "cone",
        "wedge",
        "pyramid",
        "truncated_pyramid",
        "diamond",
        "triangular_prism",
        "tetrahedron",
    ];

    /// Run the generator
    pub fn build(&self) -> GeometryResult<Mesh> {
        match *self {
            Shape::Box(p) => primitives::create_box(p.width, p.height, p.depth, p.subdivisions),
            Shape::Sphere(p) => primitives::create_sphere(p.radius, p.slice_count, p.stack_count),
            Shape::Geosphere(p) => primitives::create_geosphere(p.radius, p.subdivisions),
            Shape::Cylinder(p) => primitives::create_cylinder(
                p.bottom_radius,
                p.top_radius,
                p.height,
                p.slice_count,
                p.stack_count,
            ),
            Shape::Grid(p) => primitives::create_grid(p.width, p.depth, p.rows, p.cols),
            Shape::Quad(p) => primitives::create_quad(p.x, p.y, p.width, p.height, p.depth),
            Shape::Cone(p) => primitives::create_cone(p.height, p.radius),
            Shape::Wedge(p) => primitives::create_wedge(p.width, p.depth, p.height),
            Shape::Pyramid(p) => primitives::create_pyramid(p.width, p.depth, p.height),
            Shape::TruncatedPyramid(p) => primitives::create_truncated_pyramid(
                p.bottom_width,
                p.bottom_depth,
                p.top_width,
                p.top_depth,
                p.height,
            ),
            Shape::Diamond(p) => primitives::create_diamond(p.height),
            Shape::TriangularPrism(p) => {
                primitives::create_triangular_prism(p.width, p.depth, p.height)
            }
            Shape::Tetrahedron(p) => primitives::create_tetrahedron(p.width, p.height),
        }
    }

    /// The `kind` tag of this shape
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Box(_) => "box",
            Shape::Sphere(_) => "sphere",
            Shape::Geosphere(_) => "geosphere",
            Shape::Cylinder(_) => "cylinder",
            Shape::Grid(_) => "grid",
            Shape::Quad(_) => "quad",
            Shape::Cone(_) => "cone",
            Shape::Wedge(_) => "wedge",
            Shape::Pyramid(_) => "pyramid",
            Shape::TruncatedPyramid(_) => "truncated_pyramid",
            Shape::Diamond(_) => "diamond",
            Shape::TriangularPrism(_) => "triangular_prism",
            Shape::Tetrahedron(_) => "tetrahedron",
        }
    }
}
