//! Wavefront OBJ output
//!
//! Writes one object per call with positions, texture coordinates and
//! normals. Tangents have no OBJ record and are dropped. V is flipped on
//! output because OBJ puts the texture origin at the bottom-left.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::mesh::Mesh;

/// Write `mesh` as an OBJ object named `name`
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W, name: &str) -> io::Result<()> {
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(writer, "o {name}")?;

    for v in mesh.vertices() {
        let p = v.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for v in mesh.vertices() {
        let t = v.tex_coord;
        writeln!(writer, "vt {} {}", t.x, 1.0 - t.y)?;
    }
    for v in mesh.vertices() {
        let n = v.normal;
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    // OBJ indices are 1-based; v, vt and vn share the same numbering here
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Write `mesh` to an OBJ file at `path`
pub fn save_obj(mesh: &Mesh, path: &Path, name: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer, name)?;
    writer.flush()?;

    debug!("save_obj: wrote '{}' to {}", name, path.display());
    Ok(())
}
