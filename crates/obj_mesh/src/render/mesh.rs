//! Deduplicated, indexed mesh buffers
//!
//! [`MeshBuilder`] turns a parsed [`Scene`] into a [`Mesh`]: one
//! [`PackedVertex`] per unique (position, color) and a `u32` index per face
//! corner. The vertex and index vectors are exactly what gets uploaded to the
//! GPU; [`Mesh::layout`] describes how.
//!
//! Output order is deterministic. Vertices appear in order of first use,
//! walking faces in declaration order and corners within each face.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use crate::foundation::color::Color;
use crate::foundation::math::Aabb;
use crate::scene::{Position, Scene};

use super::vertex_layout::BufferLayout;

/// Position plus opaque RGBA color, as stored in the vertex buffer
///
/// Equality and hashing compare the bit patterns of all seven floats, so the
/// two always agree (`0.0` and `-0.0` are different vertices).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PackedVertex {
    /// Model-space position
    pub position: [f32; 3],
    /// Linear RGBA color, alpha always 1.0
    pub color: [f32; 4],
}

impl PackedVertex {
    /// Alpha written into every vertex
    pub const ALPHA: f32 = 1.0;

    /// Combine a position with a material color
    pub const fn new(position: Position, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_rgba(Self::ALPHA),
        }
    }

    /// Position component
    pub fn position(&self) -> Position {
        Position::from(self.position)
    }

    /// Color component without alpha
    pub fn color(&self) -> Color {
        Color::new(self.color[0], self.color[1], self.color[2])
    }

    fn bits(&self) -> [u32; 7] {
        let [x, y, z] = self.position;
        let [r, g, b, a] = self.color;
        [x, y, z, r, g, b, a].map(f32::to_bits)
    }
}

impl PartialEq for PackedVertex {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for PackedVertex {}

impl Hash for PackedVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Errors turning a scene into buffers
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A face uses a material missing from the material table
    #[error("Face {face} uses undefined material '{material}'")]
    UndefinedMaterial {
        /// 0-based face index
        face: usize,
        /// Material name
        material: String,
    },

    /// A face corner points past the end of the vertex store
    #[error("Face {face} references vertex {index} but the store has {vertex_count}")]
    VertexOutOfRange {
        /// 0-based face index
        face: usize,
        /// 0-based vertex index
        index: u32,
        /// Vertex store length
        vertex_count: usize,
    },

    /// More unique vertices than a `u32` index can address
    #[error("Mesh has more unique vertices than 32-bit indices can address")]
    TooManyVertices,
}

/// Indexed triangle mesh ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<PackedVertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from a scene (see [`MeshBuilder`])
    pub fn from_scene(scene: &Scene) -> Result<Self, MeshError> {
        MeshBuilder::new(scene).build()
    }

    /// Unique vertices
    pub fn vertices(&self) -> &[PackedVertex] {
        &self.vertices
    }

    /// Triangle indices, three per face
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex buffer contents
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Stride, offsets and byte lengths for these buffers
    pub fn layout(&self) -> BufferLayout {
        BufferLayout::for_mesh(self)
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position().to_point()))
    }

    /// Vertices of triangle `triangle`, in corner order
    pub fn triangle(&self, triangle: usize) -> Option<[PackedVertex; 3]> {
        let start = triangle.checked_mul(3)?;
        let corners = self.indices.get(start..start.checked_add(3)?)?;
        let mut out = [PackedVertex::zeroed(); 3];
        for (slot, &index) in out.iter_mut().zip(corners) {
            *slot = *self.vertices.get(index as usize)?;
        }
        Some(out)
    }
}

/// Dedup key: exact position plus the face's material name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DedupKey<'a> {
    position: [u32; 3],
    material: Option<&'a str>,
}

/// Builds a [`Mesh`] from a [`Scene`], merging identical vertices
///
/// A corner first looks up its (position, material) key. A new key resolves
/// the material color and looks up the resulting [`PackedVertex`]; only a new
/// vertex is appended. Two materials that resolve to the same color therefore
/// share vertices, and no vertex is ever stored twice.
pub struct MeshBuilder<'a> {
    scene: &'a Scene,
    vertices: Vec<PackedVertex>,
    indices: Vec<u32>,
    by_key: HashMap<DedupKey<'a>, u32>,
    by_vertex: HashMap<PackedVertex, u32>,
}

impl<'a> MeshBuilder<'a> {
    /// Create a builder for `scene`
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            vertices: Vec::new(),
            indices: Vec::with_capacity(scene.faces.len() * 3),
            by_key: HashMap::new(),
            by_vertex: HashMap::new(),
        }
    }

    /// Color for a face's material
    ///
    /// Faces declared before any `usemtl` are gray. A named material missing
    /// from the table is an error.
    pub fn resolve_color(scene: &Scene, face: usize, material: Option<&str>) -> Result<Color, MeshError> {
        match material {
            None => Ok(Color::NEUTRAL_GRAY),
            Some(name) => scene.materials.get(name).ok_or_else(|| MeshError::UndefinedMaterial {
                face,
                material: name.to_string(),
            }),
        }
    }

    /// Process every face and return the finished mesh
    pub fn build(mut self) -> Result<Mesh, MeshError> {
        let scene = self.scene;

        for (face_index, face) in scene.faces.iter().enumerate() {
            let material = face.material();
            let color = Self::resolve_color(scene, face_index, material)?;

            for &corner in &face.corners {
                let position = scene.position(corner).ok_or(MeshError::VertexOutOfRange {
                    face: face_index,
                    index: corner,
                    vertex_count: scene.vertex_count(),
                })?;
                let index = self.register(position, material, color)?;
                self.indices.push(index);
            }
        }

        log::debug!(
            "Built mesh: {} corners -> {} unique vertices, {} indices",
            scene.faces.len() * 3,
            self.vertices.len(),
            self.indices.len()
        );

        Ok(Mesh {
            vertices: self.vertices,
            indices: self.indices,
        })
    }

    /// Output index for a corner, appending a new vertex when needed
    fn register(&mut self, position: Position, material: Option<&'a str>, color: Color) -> Result<u32, MeshError> {
        let key = DedupKey {
            position: position.to_bits(),
            material,
        };
        if let Some(&index) = self.by_key.get(&key) {
            return Ok(index);
        }

        let vertex = PackedVertex::new(position, color);
        let index = match self.by_vertex.get(&vertex) {
            Some(&index) => index,
            None => {
                let index = u32::try_from(self.vertices.len()).map_err(|_| MeshError::TooManyVertices)?;
                self.vertices.push(vertex);
                self.by_vertex.insert(vertex, index);
                index
            }
        };
        self.by_key.insert(key, index);
        Ok(index)
    }
}
