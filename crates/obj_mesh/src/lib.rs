//! # obj_mesh
//!
//! Loads Wavefront OBJ models with MTL material libraries and turns them into
//! GPU-ready buffers: one packed vertex (position + RGBA color) per unique
//! position/material pair, and a `u32` index per triangle corner.
//!
//! ## Pipeline
//!
//! - **Record parsing**: [`assets::ObjLoader`] classifies OBJ lines
//! - **Materials**: [`assets::MaterialTable`] maps material names to colors
//! - **Scene assembly**: [`scene::SceneAssembler`] collects vertices and faces
//! - **Deduplication**: [`render::MeshBuilder`] merges identical vertices
//! - **Layout**: [`render::BufferLayout`] reports stride, offsets and sizes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use obj_mesh::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssetConfig::default();
//!     let loader = MeshLoader::from_config(&config);
//!     let mesh = loader.load("earth_1111.obj")?;
//!
//!     let layout = mesh.layout();
//!     println!("{} vertices, stride {}", mesh.vertices().len(), layout.vertex_stride);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod assets;
pub mod scene;
pub mod render;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetDir, AssetError, AssetSource, LoadError, MemoryAssets, MeshLoader},
        config::{Config, ConfigError},
        core::config::{ApplicationConfig, AssetConfig, ColorPolicy, EngineConfig, ViewerConfig},
        foundation::{color::Color, math::Aabb},
        render::{BufferLayout, Mesh, MeshError, PackedVertex, VertexAttribute, VertexFormat},
        scene::{Face, Position, Scene},
    };
}
