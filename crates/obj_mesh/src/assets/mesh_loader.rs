//! One-call mesh loading
//!
//! [`MeshLoader`] runs the whole pipeline: assemble the scene from the OBJ
//! file and its material library, then deduplicate it into a [`Mesh`]. A load
//! either returns a complete mesh or a single [`LoadError`].

use crate::core::{AssetConfig, ColorPolicy};
use crate::render::Mesh;
use crate::scene::{Scene, SceneAssembler};

use super::{AssetDir, AssetSource, LoadError};

/// Loads OBJ models from an [`AssetSource`]
pub struct MeshLoader<S: AssetSource> {
    source: S,
    color_policy: ColorPolicy,
}

impl MeshLoader<AssetDir> {
    /// Loader reading from the configured assets directory
    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(AssetDir::new(&config.assets_dir), config.color_policy)
    }
}

impl<S: AssetSource> MeshLoader<S> {
    /// Create a loader
    pub fn new(source: S, color_policy: ColorPolicy) -> Self {
        Self { source, color_policy }
    }

    /// Asset source in use
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Material color policy in use
    pub fn color_policy(&self) -> ColorPolicy {
        self.color_policy
    }

    /// Parse `name` without building buffers
    pub fn load_scene(&self, name: &str) -> Result<Scene, LoadError> {
        SceneAssembler::new(&self.source, self.color_policy).assemble(name)
    }

    /// Load `name` into deduplicated buffers
    pub fn load(&self, name: &str) -> Result<Mesh, LoadError> {
        log::info!("Loading mesh '{}'", name);
        let scene = self.load_scene(name)?;
        let mesh = Mesh::from_scene(&scene)?;

        let layout = mesh.layout();
        log::info!(
            "Loaded '{}': {} unique vertices ({} bytes), {} indices ({} bytes)",
            name,
            mesh.vertices().len(),
            layout.vertex_byte_length,
            layout.index_count,
            layout.index_byte_length
        );
        Ok(mesh)
    }
}
