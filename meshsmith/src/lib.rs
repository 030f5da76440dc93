//! Procedural triangle mesh generation
//!
//! Generators for canonical solids (box, UV sphere, geosphere, cylinder and
//! frustum, grid, screen quad) and a family of coarse faceted shapes (cone,
//! wedge, pyramids, diamond, prism, tetrahedron), plus the midpoint
//! subdivision pass several of them are built on.
//!
//! Every generator is a pure function returning a fresh [`Mesh`] of
//! [`Vertex`] records and 32-bit indices. Triangles are wound so that
//! `(b - a) x (c - a)` points outward.
//!
//! # Example
//! ```no_run
//! use meshsmith::*;
//!
//! let sphere = create_geosphere(1.0, 3)?;
//! let pillar = create_cylinder(0.5, 0.3, 3.0, 20, 20)?;
//!
//! let mut batch = GeometryBatch::new("scene");
//! batch.push("sphere", &sphere)?;
//! batch.push("pillar", &pillar)?;
//!
//! save_obj(&sphere, "sphere.obj".as_ref(), "sphere")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod error;
mod export;
mod mesh;
mod primitives;
mod shape;
mod subdivide;
mod vertex;

pub use batch::{GeometryBatch, Submesh};
pub use error::{GeometryError, GeometryResult};
pub use export::{save_obj, write_obj};
pub use mesh::Mesh;
pub use shape::{
    BoxParams, ConeParams, CylinderParams, DiamondParams, ExtentParams, GeosphereParams,
    GridParams, QuadParams, Shape, SphereParams, TetrahedronParams, TruncatedPyramidParams,
};
pub use subdivide::{MAX_SUBDIVISIONS, subdivide, subdivide_passes, subdivide_welded};
pub use vertex::Vertex;

// Re-export generators
pub use primitives::{
    POLYHEDRON_SUBDIVISIONS, Polyhedron, create_box, create_cone, create_cylinder,
    create_diamond, create_geosphere, create_grid, create_pyramid, create_quad, create_sphere,
    create_tetrahedron, create_triangular_prism, create_truncated_pyramid, create_wedge,
};

// Math types used in the public API
pub use glam::{Vec2, Vec3};
