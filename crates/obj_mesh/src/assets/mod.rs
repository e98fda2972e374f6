//! Asset loading
//!
//! Everything that touches files lives here: where assets come from
//! ([`AssetSource`]), the OBJ record parser, material libraries, and the
//! [`MeshLoader`] entry point that turns a model name into finished buffers.

pub mod obj_loader;
pub mod materials;
pub mod mesh_loader;

pub use obj_loader::{ObjError, ObjRecord, ObjLoader};
pub use materials::{MaterialTable, MtlData, MtlError, MtlParser};
pub use mesh_loader::MeshLoader;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::mesh::MeshError;

/// Somewhere named text assets can be opened from
///
/// OBJ files and the material libraries they reference are both opened through
/// the same source, so a `mtllib` name resolves the same way as the model name.
pub trait AssetSource {
    /// Open an asset for buffered line reading
    ///
    /// The returned reader owns the underlying handle; dropping it releases
    /// the file on every exit path.
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + '_>, AssetError>;
}

/// Assets resolved relative to a directory on disk
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory names are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for an asset name
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl AssetSource for AssetDir {
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + '_>, AssetError> {
        let path = self.resolve(name);
        log::debug!("Opening asset {}", path.display());

        let file = File::open(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string())
            } else {
                AssetError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// In-memory assets keyed by name
///
/// Useful for tests and for tools that generate OBJ text on the fly.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, String>,
}

impl MemoryAssets {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(name.into(), contents.into());
    }
}

impl AssetSource for MemoryAssets {
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + '_>, AssetError> {
        let contents = self
            .files
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        Ok(Box::new(contents.as_bytes()))
    }
}

/// Asset access errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Asset exists but could not be opened
    #[error("IO error opening {path}: {source}")]
    Io {
        /// Resolved path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a complete mesh load
///
/// Any of these aborts the load; no partial mesh is ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A mesh or material file could not be opened
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The OBJ file is malformed
    #[error("Failed to parse mesh '{file}': {source}")]
    Obj {
        /// OBJ asset name
        file: String,
        /// Underlying error
        #[source]
        source: ObjError,
    },

    /// A material library is malformed
    #[error("Failed to parse material library '{library}': {source}")]
    Material {
        /// MTL asset name
        library: String,
        /// Underlying error
        #[source]
        source: MtlError,
    },

    /// The parsed scene could not be turned into buffers
    #[error("Failed to build mesh: {0}")]
    Mesh(#[from] MeshError),
}
