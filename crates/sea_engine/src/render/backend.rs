//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement so
//! scenes and modes can submit frames without knowing the graphics API.

use crate::foundation::math::{Mat3, Mat4};
use crate::render::mesh::MeshBuffer;
use crate::render::pipeline::{Pipeline, ProgramId, VertexArray};
use bitflags::bitflags;

bitflags! {
    /// Buffers to clear at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachment
        const COLOR = 1 << 0;
        /// Depth attachment
        const DEPTH = 1 << 1;
    }
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthFunc {
    /// Pass if closer
    Less,
    /// Pass if closer or equal; coincident geometry still draws
    LessOrEqual,
    /// Always pass
    Always,
}

/// One draw submission with its per-object matrices
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Pipeline to draw with
    pub pipeline: Pipeline,
    /// Object space to clip space
    pub object_to_clip: Mat4,
    /// Object space to world (lighting) space
    pub object_to_light: Mat4,
    /// Normal matrix for lighting space
    pub normal_to_light: Mat3,
}

/// Rendering backend used by scenes and modes
pub trait RenderBackend {
    /// Create a vertex array binding `buffer` to the attributes of `program`
    fn create_vertex_array(&mut self, buffer: &MeshBuffer, program: ProgramId) -> VertexArray;

    /// Clear the selected buffers; color buffers use `color`
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]);

    /// Enable depth testing with `func`, or disable it with `None`
    fn set_depth_test(&mut self, func: Option<DepthFunc>);

    /// Enable or disable alpha blending
    fn set_blend(&mut self, enabled: bool);

    /// Submit one draw
    fn submit(&mut self, draw: &DrawCall);
}
