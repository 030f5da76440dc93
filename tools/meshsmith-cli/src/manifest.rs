//! scene.toml manifest parsing
//!
//! A scene lists named shapes that are generated together and packed into
//! one shared vertex/index buffer:
//!
//! ```toml
//! [scene]
//! name = "columns"
//!
//! [[shapes]]
//! name = "pillar"
//! kind = "cylinder"
//! height = 3.0
//! ```

use anyhow::{Context, Result, bail};
use meshsmith::{GeometryBatch, Mesh, Shape, Submesh, save_obj};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the submesh table written next to the OBJ files
pub const SUBMESH_TABLE: &str = "submeshes.json";

/// Parsed scene manifest
#[derive(Debug)]
pub struct SceneManifest {
    pub scene: SceneSection,
    pub shapes: Vec<ShapeEntry>,
}

/// Scene metadata section
#[derive(Debug, Deserialize)]
pub struct SceneSection {
    #[serde(default = "default_scene_name")]
    pub name: String,
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            name: default_scene_name(),
        }
    }
}

fn default_scene_name() -> String {
    "scene".to_string()
}

/// One `[[shapes]]` entry
#[derive(Debug)]
pub struct ShapeEntry {
    pub name: String,
    pub shape: Shape,
}

/// On-disk layout; shape tables are checked field by field in [`shape_from_table`]
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    scene: SceneSection,
    #[serde(default)]
    shapes: Vec<toml::Table>,
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<SceneManifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    parse_manifest(&text).with_context(|| format!("Invalid manifest: {}", path.display()))
}

/// Parse manifest text
pub fn parse_manifest(text: &str) -> Result<SceneManifest> {
    let raw: RawManifest = toml::from_str(text).context("Failed to parse TOML")?;

    let mut shapes = Vec::with_capacity(raw.shapes.len());
    for (i, mut table) in raw.shapes.into_iter().enumerate() {
        let name = match table.remove("name") {
            Some(toml::Value::String(name)) => name,
            Some(other) => bail!("shapes[{i}]: name must be a string, got {other}"),
            None => bail!("shapes[{i}]: missing name"),
        };
        let shape = shape_from_table(table).with_context(|| format!("shape '{name}'"))?;
        shapes.push(ShapeEntry { name, shape });
    }

    Ok(SceneManifest {
        scene: raw.scene,
        shapes,
    })
}

/// Deserialize a `kind` table into a [`Shape`], rejecting keys the kind
/// does not have
pub fn shape_from_table(table: toml::Table) -> Result<Shape> {
    let kind = match table.get("kind") {
        Some(toml::Value::String(kind)) => kind.clone(),
        Some(other) => bail!("kind must be a string, got {other}"),
        None => bail!("missing kind (one of: {})", Shape::KINDS.join(", ")),
    };
    if !Shape::KINDS.contains(&kind.as_str()) {
        bail!("unknown kind '{kind}' (one of: {})", Shape::KINDS.join(", "));
    }

    let keys: Vec<String> = table.keys().cloned().collect();
    let shape: Shape = toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("invalid {kind} parameters"))?;

    // Serializing back yields every field the kind accepts
    let known = match toml::Value::try_from(shape).context("Failed to serialize shape")? {
        toml::Value::Table(table) => table,
        other => bail!("{kind} serialized to {}, not a table", other.type_str()),
    };
    if let Some(unknown) = keys.iter().find(|k| !known.contains_key(k.as_str())) {
        let mut fields: Vec<&str> = known
            .keys()
            .map(String::as_str)
            .filter(|k| *k != "kind")
            .collect();
        fields.sort_unstable();
        bail!(
            "unknown {kind} parameter '{unknown}' (expected one of: {})",
            fields.join(", ")
        );
    }

    Ok(shape)
}

/// Validate a manifest without writing anything
///
/// Names must be unique and usable as file names, and every shape must
/// build with its parameters.
pub fn validate(manifest: &SceneManifest) -> Result<()> {
    check_names(manifest)?;
    build_all(manifest)?;
    Ok(())
}

/// Check shape names are unique and usable as file names
pub fn check_names(manifest: &SceneManifest) -> Result<()> {
    if manifest.shapes.is_empty() {
        bail!("scene '{}' has no shapes", manifest.scene.name);
    }

    let mut seen = hashbrown::HashSet::new();
    for entry in &manifest.shapes {
        validate_name(&entry.name)?;
        if !seen.insert(entry.name.as_str()) {
            bail!("duplicate shape name '{}'", entry.name);
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        bail!("shape name '{name}' must be non-empty and use only [A-Za-z0-9_-]");
    }
    Ok(())
}

/// Generate every shape in parallel, in manifest order
pub fn build_all(manifest: &SceneManifest) -> Result<Vec<(String, Mesh)>> {
    manifest
        .shapes
        .par_iter()
        .map(|entry| {
            let mesh = entry
                .shape
                .build()
                .with_context(|| format!("Failed to build shape '{}'", entry.name))?;
            tracing::debug!(
                "Built '{}' ({}): {} vertices, {} triangles",
                entry.name,
                entry.shape.label(),
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            Ok((entry.name.clone(), mesh))
        })
        .collect()
}

/// Submesh table written as `submeshes.json`
#[derive(Debug, Serialize)]
pub struct SubmeshTable {
    pub scene: String,
    pub vertex_count: usize,
    pub index_count: usize,
    pub submeshes: Vec<SubmeshRecord>,
}

#[derive(Debug, Serialize)]
pub struct SubmeshRecord {
    pub name: String,
    pub kind: &'static str,
    #[serde(flatten)]
    pub submesh: Submesh,
}

/// Pack built meshes into a batch and write one OBJ per shape plus the
/// submesh table into `out_dir`
pub fn write_scene(
    manifest: &SceneManifest,
    meshes: &[(String, Mesh)],
    out_dir: &Path,
) -> Result<SubmeshTable> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut batch = GeometryBatch::new(manifest.scene.name.as_str());
    let mut submeshes = Vec::with_capacity(meshes.len());

    for ((name, mesh), entry) in meshes.iter().zip(&manifest.shapes) {
        let submesh = batch.push(name.as_str(), mesh)?;
        tracing::info!(
            "  {:<20} {:<18} start={:<8} count={:<8} base={}",
            name,
            entry.shape.label(),
            submesh.start_index,
            submesh.index_count,
            submesh.base_vertex
        );

        let path = out_dir.join(format!("{name}.obj"));
        save_obj(mesh, &path, name)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        submeshes.push(SubmeshRecord {
            name: name.clone(),
            kind: entry.shape.label(),
            submesh,
        });
    }

    let table = SubmeshTable {
        scene: batch.name().to_string(),
        vertex_count: batch.vertices().len(),
        index_count: batch.indices().len(),
        submeshes,
    };

    let path = out_dir.join(SUBMESH_TABLE);
    let json = serde_json::to_string_pretty(&table).context("Failed to serialize submesh table")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsmith::{CylinderParams, GridParams};
    use std::fs;
    use tempfile::tempdir;

    const SCENE: &str = r#"
        [scene]
        name = "columns"

        [[shapes]]
        name = "floor"
        kind = "grid"
        rows = 4
        cols = 4

        [[shapes]]
        name = "pillar"
        kind = "cylinder"
        top_radius = 0.5
        slice_count = 8
        stack_count = 2
    "#;

    #[test]
    fn test_parse_manifest() {
        let manifest = parse_manifest(SCENE).unwrap();
        assert_eq!(manifest.scene.name, "columns");
        assert_eq!(manifest.shapes.len(), 2);

        assert_eq!(manifest.shapes[0].name, "floor");
        assert_eq!(
            manifest.shapes[0].shape,
            Shape::Grid(GridParams {
                rows: 4,
                cols: 4,
                ..GridParams::default()
            })
        );
        assert_eq!(
            manifest.shapes[1].shape,
            Shape::Cylinder(CylinderParams {
                top_radius: 0.5,
                slice_count: 8,
                stack_count: 2,
                ..CylinderParams::default()
            })
        );
    }

    #[test]
    fn test_scene_section_defaults() {
        let manifest = parse_manifest("[[shapes]]\nname = \"a\"\nkind = \"box\"\n").unwrap();
        assert_eq!(manifest.scene.name, "scene");
    }

    #[test]
    fn test_rejects_unknown_parameter() {
        let err = parse_manifest("[[shapes]]\nname = \"a\"\nkind = \"sphere\"\nradus = 2.0\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown sphere parameter 'radus'"));
    }

    #[test]
    fn test_rejects_unknown_kind_and_missing_name() {
        let err = parse_manifest("[[shapes]]\nname = \"a\"\nkind = \"torus\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("unknown kind 'torus'"));

        let err = parse_manifest("[[shapes]]\nkind = \"box\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("missing name"));
    }

    #[test]
    fn test_validate_catches_duplicates_and_bad_params() {
        let duplicate = parse_manifest(
            "[[shapes]]\nname = \"a\"\nkind = \"box\"\n[[shapes]]\nname = \"a\"\nkind = \"quad\"\n",
        )
        .unwrap();
        assert!(validate(&duplicate).is_err());

        let bad = parse_manifest("[[shapes]]\nname = \"s\"\nkind = \"sphere\"\nstack_count = 1\n")
            .unwrap();
        let err = validate(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("stack_count must be at least 2"));

        let path_like = parse_manifest("[[shapes]]\nname = \"../x\"\nkind = \"box\"\n").unwrap();
        assert!(validate(&path_like).is_err());

        assert!(validate(&parse_manifest(SCENE).unwrap()).is_ok());
    }

    #[test]
    fn test_bundled_columns_scene() {
        let manifest = parse_manifest(include_str!("../scenes/columns.toml")).unwrap();
        assert_eq!(manifest.scene.name, "columns");
        assert_eq!(manifest.shapes.len(), 12);
        assert!(validate(&manifest).is_ok());
    }

    #[test]
    fn test_load_manifest_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        fs::write(&path, SCENE).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.shapes.len(), 2);

        assert!(load_manifest(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_build_and_write_scene() {
        let dir = tempdir().unwrap();
        let manifest = parse_manifest(SCENE).unwrap();
        let meshes = build_all(&manifest).unwrap();

        let names: Vec<&str> = meshes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["floor", "pillar"]);

        let table = write_scene(&manifest, &meshes, dir.path()).unwrap();
        assert!(dir.path().join("floor.obj").exists());
        assert!(dir.path().join("pillar.obj").exists());

        // 4x4 grid first, then the cylinder
        assert_eq!(table.submeshes[0].submesh.index_count, 9 * 6);
        assert_eq!(table.submeshes[1].submesh.base_vertex, 16);
        assert_eq!(table.submeshes[1].kind, "cylinder");

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(SUBMESH_TABLE)).unwrap())
                .unwrap();
        assert_eq!(json["scene"], "columns");
        assert_eq!(json["submeshes"][1]["name"], "pillar");
        assert_eq!(json["submeshes"][1]["start_index"], 54);
    }
}
