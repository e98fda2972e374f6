//! Vertex buffer layout
//!
//! API-agnostic description of how a [`Mesh`]'s buffers are laid out. A
//! consumer maps these onto `glVertexAttribPointer`, Vulkan vertex input
//! descriptions or a wgpu `VertexBufferLayout`.

use std::mem::{offset_of, size_of};

use super::mesh::{Mesh, PackedVertex};

/// Component format of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// Three 32-bit floats
    Float32x3,
    /// Four 32-bit floats
    Float32x4,
}

impl VertexFormat {
    /// Number of components
    pub const fn components(self) -> u32 {
        match self {
            Self::Float32x3 => 3,
            Self::Float32x4 => 4,
        }
    }

    /// Size in bytes
    pub const fn size(self) -> u32 {
        self.components() * size_of::<f32>() as u32
    }
}

/// One attribute inside a [`PackedVertex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Component format
    pub format: VertexFormat,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

/// Layout of [`PackedVertex`] itself
pub struct VertexLayout;

impl VertexLayout {
    /// Bytes from one vertex to the next
    pub const STRIDE: u32 = size_of::<PackedVertex>() as u32;

    /// Byte offset of the position
    pub const POSITION_OFFSET: u32 = offset_of!(PackedVertex, position) as u32;

    /// Byte offset of the RGBA color
    pub const COLOR_OFFSET: u32 = offset_of!(PackedVertex, color) as u32;

    /// Attribute descriptions
    ///
    /// - Location 0: position (`Float32x3`)
    /// - Location 1: color (`Float32x4`)
    pub const fn attributes() -> [VertexAttribute; 2] {
        [
            VertexAttribute {
                location: 0,
                format: VertexFormat::Float32x3,
                offset: Self::POSITION_OFFSET,
            },
            VertexAttribute {
                location: 1,
                format: VertexFormat::Float32x4,
                offset: Self::COLOR_OFFSET,
            },
        ]
    }
}

/// Sizes and offsets for one mesh's buffers
///
/// Always derived from the mesh; rebuild it after the mesh changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLayout {
    /// Size of one vertex in bytes
    pub vertex_stride: u32,
    /// Offset of the color inside a vertex
    pub color_offset: u32,
    /// Size of the whole vertex buffer
    pub vertex_byte_length: usize,
    /// Number of indices
    pub index_count: usize,
    /// Size of the whole index buffer
    pub index_byte_length: usize,
}

impl BufferLayout {
    /// Bytes per index
    pub const INDEX_SIZE: usize = size_of::<u32>();

    /// Compute the layout for `mesh`
    pub fn for_mesh(mesh: &Mesh) -> Self {
        let index_count = mesh.indices().len();
        Self {
            vertex_stride: VertexLayout::STRIDE,
            color_offset: VertexLayout::COLOR_OFFSET,
            vertex_byte_length: mesh.vertices().len() * VertexLayout::STRIDE as usize,
            index_count,
            index_byte_length: index_count * Self::INDEX_SIZE,
        }
    }

    /// Attribute descriptions for the vertex buffer
    pub const fn attributes(&self) -> [VertexAttribute; 2] {
        VertexLayout::attributes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialTable;
    use crate::foundation::color::Color;
    use crate::scene::{Face, Position, Scene};

    #[test]
    fn test_packed_vertex_layout() {
        assert_eq!(VertexLayout::STRIDE, 28);
        assert_eq!(VertexLayout::POSITION_OFFSET, 0);
        assert_eq!(VertexLayout::COLOR_OFFSET, 12);
    }

    #[test]
    fn test_attributes_fit_stride() {
        let attributes = VertexLayout::attributes();
        assert_eq!(attributes[0].format.components(), 3);
        assert_eq!(attributes[1].format.components(), 4);

        let last = attributes[1];
        assert_eq!(last.offset + last.format.size(), VertexLayout::STRIDE);
    }

    #[test]
    fn test_layout_for_mesh() {
        let mut materials = MaterialTable::new();
        materials.insert("grass", Color::GRASS);
        let scene = Scene {
            vertices: vec![
                Position::new(0.0, 0.0, 0.0),
                Position::new(1.0, 0.0, 0.0),
                Position::new(1.0, 1.0, 0.0),
                Position::new(0.0, 1.0, 0.0),
            ],
            faces: vec![
                Face::new([0, 1, 2], Some("grass".to_string())),
                Face::new([0, 2, 3], Some("grass".to_string())),
            ],
            materials,
            material_libraries: Vec::new(),
        };
        let mesh = Mesh::from_scene(&scene).unwrap();
        let layout = mesh.layout();

        assert_eq!(layout.vertex_stride, 28);
        assert_eq!(layout.color_offset, 12);
        assert_eq!(layout.vertex_byte_length, 4 * 28);
        assert_eq!(layout.index_count, 6);
        assert_eq!(layout.index_byte_length, 6 * 4);
        assert_eq!(layout.vertex_byte_length, mesh.vertex_bytes().len());
        assert_eq!(layout.index_byte_length, mesh.index_bytes().len());
    }

    #[test]
    fn test_empty_mesh_layout() {
        let layout = Mesh::default().layout();
        assert_eq!(layout.vertex_byte_length, 0);
        assert_eq!(layout.index_count, 0);
        assert_eq!(layout.vertex_stride, 28);
    }
}
