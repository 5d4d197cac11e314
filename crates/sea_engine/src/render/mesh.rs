//! Mesh buffers and vertex layouts
//!
//! A `MeshBuffer` is one packed vertex buffer holding many named sub-meshes.
//! Scenes never copy geometry; they refer to a sub-mesh by its primitive
//! range inside the shared buffer.
//!
//! The on-disk index is a RON document listing the named ranges:
//!
//! ```ron
//! (
//!     vertex_count: 36,
//!     meshes: [
//!         (name: "Hull", primitive: Triangles, start: 0, count: 24),
//!         (name: "Propeller", primitive: Triangles, start: 24, count: 12),
//!     ],
//! )
//! ```

use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Primitive assembly mode of a draw range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Independent points
    Points,
    /// Independent line segments
    Lines,
    /// Connected line segments
    LineStrip,
    /// Independent triangles
    #[default]
    Triangles,
    /// Connected triangle strip
    TriangleStrip,
}

/// Location of one sub-mesh inside a `MeshBuffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRange {
    /// How vertices are assembled
    pub primitive: PrimitiveType,
    /// First vertex of the range
    pub start: u32,
    /// Number of vertices in the range
    pub count: u32,
}

/// Scalar format of one vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFormat {
    /// Three 32-bit floats
    Float3,
    /// Two 32-bit floats
    Float2,
    /// Four normalized unsigned bytes
    UnormByte4,
}

impl AttributeFormat {
    /// Size of the attribute in bytes
    pub const fn size(self) -> u32 {
        match self {
            Self::Float3 => 12,
            Self::Float2 => 8,
            Self::UnormByte4 => 4,
        }
    }
}

/// One attribute of an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader-side attribute name
    pub name: &'static str,
    /// Data format
    pub format: AttributeFormat,
    /// Byte offset within the vertex
    pub offset: u32,
}

/// Interleaved vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attributes in buffer order
    pub attributes: Vec<VertexAttribute>,
    /// Bytes between consecutive vertices
    pub stride: u32,
}

impl VertexLayout {
    /// Build a tightly packed layout from attribute names and formats
    pub fn packed(attributes: &[(&'static str, AttributeFormat)]) -> Self {
        let mut offset = 0;
        let attributes = attributes
            .iter()
            .map(|&(name, format)| {
                let attribute = VertexAttribute { name, format, offset };
                offset += format.size();
                attribute
            })
            .collect();
        Self { attributes, stride: offset }
    }

    /// Position, normal, color, texcoord: the layout of lit textured meshes
    pub fn position_normal_color_texcoord() -> Self {
        Self::packed(&[
            ("Position", AttributeFormat::Float3),
            ("Normal", AttributeFormat::Float3),
            ("Color", AttributeFormat::UnormByte4),
            ("TexCoord", AttributeFormat::Float2),
        ])
    }

    /// Find an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MeshIndexEntry {
    name: String,
    #[serde(default)]
    primitive: PrimitiveType,
    start: u32,
    count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct MeshIndex {
    vertex_count: u32,
    meshes: Vec<MeshIndexEntry>,
}

/// Shared vertex buffer with a name index of its sub-meshes
#[derive(Debug, Clone)]
pub struct MeshBuffer {
    vertex_count: u32,
    layout: VertexLayout,
    meshes: HashMap<String, MeshRange>,
}

impl MeshBuffer {
    /// Create an empty buffer of `vertex_count` vertices in `layout`
    pub fn new(vertex_count: u32, layout: VertexLayout) -> Self {
        Self {
            vertex_count,
            layout,
            meshes: HashMap::new(),
        }
    }

    /// Register a named sub-mesh
    ///
    /// Fails if the range does not fit the buffer or the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, range: MeshRange) -> Result<(), RenderError> {
        let name = name.into();
        let end = u64::from(range.start) + u64::from(range.count);
        if end > u64::from(self.vertex_count) {
            return Err(RenderError::RangeOutOfBounds {
                mesh: name,
                end,
                vertex_count: self.vertex_count,
            });
        }
        if self.meshes.contains_key(&name) {
            return Err(RenderError::DuplicateMesh(name));
        }
        self.meshes.insert(name, range);
        Ok(())
    }

    /// Parse a RON mesh index
    pub fn from_ron(source: &str) -> Result<Self, RenderError> {
        let index: MeshIndex =
            ron::from_str(source).map_err(|e| RenderError::Parse(e.to_string()))?;
        let mut buffer = Self::new(index.vertex_count, VertexLayout::position_normal_color_texcoord());
        for entry in index.meshes {
            buffer.insert(
                entry.name,
                MeshRange {
                    primitive: entry.primitive,
                    start: entry.start,
                    count: entry.count,
                },
            )?;
        }
        Ok(buffer)
    }

    /// Load a RON mesh index from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let buffer = Self::from_ron(&source)?;
        log::info!("Loaded mesh buffer {} ({} meshes)", path.display(), buffer.len());
        Ok(buffer)
    }

    /// Look up a sub-mesh by exact name
    pub fn lookup(&self, name: &str) -> Result<&MeshRange, RenderError> {
        self.meshes
            .get(name)
            .ok_or_else(|| RenderError::MeshNotFound(name.to_string()))
    }

    /// Vertex layout of the buffer
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Total number of vertices
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of named sub-meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the buffer has no named sub-meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"(
        vertex_count: 36,
        meshes: [
            (name: "Hull", start: 0, count: 24),
            (name: "Propeller", primitive: TriangleStrip, start: 24, count: 12),
        ],
    )"#;

    #[test]
    fn test_lit_layout_is_packed() {
        let layout = VertexLayout::position_normal_color_texcoord();
        assert_eq!(layout.stride, 36);
        assert_eq!(layout.attribute("Color").map(|a| a.offset), Some(24));
        assert_eq!(layout.attribute("TexCoord").map(|a| a.offset), Some(28));
    }

    #[test]
    fn test_lookup_from_index() {
        let buffer = MeshBuffer::from_ron(INDEX).unwrap();
        assert_eq!(buffer.len(), 2);

        let propeller = buffer.lookup("Propeller").unwrap();
        assert_eq!(propeller.primitive, PrimitiveType::TriangleStrip);
        assert_eq!((propeller.start, propeller.count), (24, 12));
        assert_eq!(buffer.lookup("Hull").unwrap().primitive, PrimitiveType::Triangles);
    }

    #[test]
    fn test_lookup_missing_mesh() {
        let buffer = MeshBuffer::from_ron(INDEX).unwrap();
        assert!(matches!(buffer.lookup("Periscope"), Err(RenderError::MeshNotFound(name)) if name == "Periscope"));
    }

    #[test]
    fn test_range_past_end_rejected() {
        let mut buffer = MeshBuffer::new(10, VertexLayout::position_normal_color_texcoord());
        let range = MeshRange { primitive: PrimitiveType::Triangles, start: 6, count: 6 };
        assert!(matches!(buffer.insert("Too long", range), Err(RenderError::RangeOutOfBounds { .. })));
    }

    #[test]
    fn test_duplicate_mesh_rejected() {
        let mut buffer = MeshBuffer::new(10, VertexLayout::position_normal_color_texcoord());
        let range = MeshRange { primitive: PrimitiveType::Triangles, start: 0, count: 3 };
        buffer.insert("Hull", range).unwrap();
        assert!(matches!(buffer.insert("Hull", range), Err(RenderError::DuplicateMesh(_))));
    }
}
