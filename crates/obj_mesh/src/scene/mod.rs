//! Parsed scene
//!
//! A [`Scene`] is the complete result of reading one OBJ file: the vertex
//! store, the triangle list with each face's material, and the material table
//! of the last referenced library. It is a plain value; every load produces a
//! fresh one.

pub mod assembler;

pub use assembler::SceneAssembler;

use serde::{Deserialize, Serialize};

use crate::assets::MaterialTable;
use crate::foundation::math::Point3;

/// Vertex position in model space
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Position {
    /// Create a position
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Bit patterns of the coordinates, for exact hashing
    pub fn to_bits(self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }

    /// As an `nalgebra` point
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Position {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Triangle referencing the vertex store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// 0-based vertex store indices
    pub corners: [u32; 3],
    /// Material active when the face was declared, `None` before any `usemtl`
    pub material: Option<String>,
}

impl Face {
    /// Create a face
    pub fn new(corners: [u32; 3], material: Option<String>) -> Self {
        Self { corners, material }
    }

    /// Material name, if any
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }
}

/// Everything read from one OBJ file
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Vertex store in declaration order
    pub vertices: Vec<Position>,
    /// Faces in declaration order
    pub faces: Vec<Face>,
    /// Material table from the most recent `mtllib`
    pub materials: MaterialTable,
    /// Material libraries loaded, in order
    pub material_libraries: Vec<String>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in the store
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of a vertex store entry
    pub fn position(&self, index: u32) -> Option<Position> {
        self.vertices.get(index as usize).copied()
    }
}
