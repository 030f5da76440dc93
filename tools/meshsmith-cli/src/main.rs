//! meshsmith - procedural mesh generator
//!
//! Generates single shapes or whole scene manifests and writes them as
//! Wavefront OBJ files.

mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use meshsmith::{Shape, save_obj};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshsmith")]
#[command(about = "Procedural mesh generator")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one shape and write it as OBJ
    Shape {
        /// Shape kind (see `meshsmith kinds`)
        kind: String,

        /// Override a parameter, e.g. `-p radius=2 -p slice_count=32`
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Output .obj file (default: <kind>.obj)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build every shape in a scene manifest
    Scene {
        /// Path to scene.toml manifest
        #[arg(default_value = "scene.toml")]
        manifest: PathBuf,

        /// Output directory (default: the scene name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a scene manifest without writing anything
    Check {
        /// Path to scene.toml manifest
        #[arg(default_value = "scene.toml")]
        manifest: PathBuf,
    },

    /// List shape kinds and their default parameters
    Kinds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Shape {
            kind,
            params,
            output,
        } => {
            let shape = parse_shape(&kind, &params)?;
            let mesh = shape
                .build()
                .with_context(|| format!("Failed to build {kind}"))?;

            let output = output.unwrap_or_else(|| PathBuf::from(format!("{kind}.obj")));
            save_obj(&mesh, &output, &kind)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(
                "Wrote {} ({} vertices, {} triangles) to {}",
                kind,
                mesh.vertex_count(),
                mesh.triangle_count(),
                output.display()
            );
        }

        Commands::Scene { manifest, output } => {
            tracing::info!("Building scene from {}", manifest.display());
            let config = manifest::load_manifest(&manifest)?;
            manifest::check_names(&config)?;

            let meshes = manifest::build_all(&config)?;
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&config.scene.name));
            tracing::info!("Scene '{}' submeshes:", config.scene.name);
            let table = manifest::write_scene(&config, &meshes, &out_dir)?;

            tracing::info!(
                "Wrote {} shapes ({} vertices, {} indices) to {}",
                table.submeshes.len(),
                table.vertex_count,
                table.index_count,
                out_dir.display()
            );
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {}", manifest.display());
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!(
                "Manifest is valid! ({} shapes in scene '{}')",
                config.shapes.len(),
                config.scene.name
            );
        }

        Commands::Kinds => {
            for kind in Shape::KINDS {
                let shape = parse_shape(kind, &[])?;
                let defaults = toml::to_string(&shape).context("Failed to format defaults")?;
                println!("[{kind}]");
                for line in defaults.lines().filter(|l| !l.starts_with("kind")) {
                    println!("  {line}");
                }
            }
        }
    }

    Ok(())
}

/// Build a [`Shape`] from a kind and `KEY=VALUE` overrides
///
/// Values that parse as integers or floats are passed as numbers; anything
/// else is rejected, since every shape parameter is numeric.
fn parse_shape(kind: &str, params: &[String]) -> Result<Shape> {
    let mut table = toml::Table::new();
    table.insert("kind".to_string(), toml::Value::String(kind.to_string()));

    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("parameter '{param}' is not KEY=VALUE");
        };
        let (key, value) = (key.trim(), value.trim());

        let value = if let Ok(int) = value.parse::<i64>() {
            toml::Value::Integer(int)
        } else if let Ok(float) = value.parse::<f64>() {
            toml::Value::Float(float)
        } else {
            bail!("parameter '{key}' must be a number, got '{value}'");
        };

        if table.insert(key.to_string(), value).is_some() {
            bail!("parameter '{key}' given more than once");
        }
    }

    manifest::shape_from_table(table)
}
