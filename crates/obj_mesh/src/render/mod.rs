//! GPU-facing output
//!
//! The deduplicated [`Mesh`] and the [`BufferLayout`] that describes it are
//! the whole hand-off to rendering code.

pub mod mesh;
pub mod vertex_layout;

pub use mesh::{Mesh, MeshBuilder, MeshError, PackedVertex};
pub use vertex_layout::{BufferLayout, VertexAttribute, VertexFormat, VertexLayout};
