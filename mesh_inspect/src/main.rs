//! Mesh inspection tool
//!
//! Loads an OBJ model the same way a renderer would and reports the buffers
//! and layout it would upload, without opening a window.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use obj_mesh::foundation::logging;
use obj_mesh::prelude::*;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "mesh_inspect.toml";

/// Load an OBJ model and print its GPU buffer layout
#[derive(Parser, Debug)]
#[command(name = "mesh_inspect", version, about)]
struct Args {
    /// Model to load, relative to the assets directory (defaults to the configured model)
    model: Option<String>,

    /// Configuration file (.toml or .ron); defaults to ./mesh_inspect.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also print every unique vertex
    #[arg(long)]
    vertices: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config_path(args.config.clone(), Path::new(DEFAULT_CONFIG)) {
        Some(path) => ApplicationConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ApplicationConfig::default(),
    };
    config.validate().context("Invalid configuration")?;

    logging::init(&config.engine.log_level);
    log::info!("Starting mesh inspector");

    let model = args.model.as_deref().unwrap_or(&config.assets.default_model);
    let loader = MeshLoader::from_config(&config.assets);
    let mesh = loader
        .load(model)
        .with_context(|| format!("Failed to load model '{model}' from '{}'", config.assets.assets_dir))?;

    report(model, &mesh, &config.viewer)?;
    if args.vertices {
        for (i, vertex) in mesh.vertices().iter().enumerate() {
            println!("  [{i:>5}] position {:?} color {:?}", vertex.position, vertex.color);
        }
    }

    log::info!("Mesh inspector finished successfully");
    Ok(())
}

/// The explicit config path, else `fallback` when it exists
fn config_path(explicit: Option<PathBuf>, fallback: &Path) -> Option<PathBuf> {
    explicit.or_else(|| fallback.is_file().then(|| fallback.to_path_buf()))
}

/// Print the hand-off contract a renderer would consume
fn report(model: &str, mesh: &Mesh, viewer: &ViewerConfig) -> Result<()> {
    let layout = mesh.layout();

    println!("model:              {model}");
    println!("triangles:          {}", mesh.triangle_count());
    println!("unique vertices:    {}", mesh.vertices().len());
    println!("vertex stride:      {} bytes", layout.vertex_stride);
    println!("color offset:       {} bytes", layout.color_offset);
    println!("vertex buffer:      {} bytes", layout.vertex_byte_length);
    println!("index count:        {}", layout.index_count);
    println!("index buffer:       {} bytes", layout.index_byte_length);
    for attribute in layout.attributes() {
        println!(
            "attribute:          location {} {:?} at offset {}",
            attribute.location, attribute.format, attribute.offset
        );
    }

    if let Some(bounds) = mesh.bounds() {
        let center = bounds.center();
        println!(
            "bounds:             min ({:.3}, {:.3}, {:.3}) max ({:.3}, {:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
        println!(
            "center / radius:    ({:.3}, {:.3}, {:.3}) / {:.3}",
            center.x, center.y, center.z, bounds.radius()
        );
    }

    let clear = viewer.clear_color_rgba().context("Invalid clear color")?;
    println!("clear color:        {clear:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_wins() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(DEFAULT_CONFIG);
        assert_eq!(
            config_path(Some(PathBuf::from("other.ron")), &bundled),
            Some(PathBuf::from("other.ron"))
        );
    }

    #[test]
    fn test_falls_back_to_existing_default() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(DEFAULT_CONFIG);
        assert_eq!(config_path(None, &bundled), Some(bundled.clone()));

        let config = ApplicationConfig::load_from_file(&bundled).unwrap();
        assert_eq!(config.assets.default_model, "earth_1111.obj");
    }

    #[test]
    fn test_no_default_means_built_in_config() {
        let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("no_such_config.toml");
        assert_eq!(config_path(None, &missing), None);
    }
}
