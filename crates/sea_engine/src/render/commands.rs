//! Recorded render commands
//!
//! `RecordingBackend` implements [`RenderBackend`] by appending every call to
//! a command list instead of talking to a GPU. Headless runs use it to count
//! draws, and tests use it to check exactly what a frame submitted.

use crate::render::backend::{ClearFlags, DepthFunc, DrawCall, RenderBackend};
use crate::render::mesh::MeshBuffer;
use crate::render::pipeline::{ProgramId, VertexArray};

/// A single recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Vertex array creation
    CreateVertexArray {
        /// Program the array was created for
        program: ProgramId,
        /// Handle handed out
        vao: VertexArray,
        /// Vertex count of the source buffer
        vertex_count: u32,
    },
    /// Buffer clear
    Clear {
        /// Buffers cleared
        flags: ClearFlags,
        /// Clear color
        color: [f32; 4],
    },
    /// Depth test state change
    DepthTest(Option<DepthFunc>),
    /// Blend state change
    Blend(bool),
    /// Draw submission
    Draw(DrawCall),
}

/// Backend that records every call
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RenderCommand>,
    next_vao: u32,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Recorded draws, in submission order
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderBackend for RecordingBackend {
    fn create_vertex_array(&mut self, buffer: &MeshBuffer, program: ProgramId) -> VertexArray {
        self.next_vao += 1;
        let vao = VertexArray(self.next_vao);
        self.commands.push(RenderCommand::CreateVertexArray {
            program,
            vao,
            vertex_count: buffer.vertex_count(),
        });
        vao
    }

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) {
        self.commands.push(RenderCommand::Clear { flags, color });
    }

    fn set_depth_test(&mut self, func: Option<DepthFunc>) {
        self.commands.push(RenderCommand::DepthTest(func));
    }

    fn set_blend(&mut self, enabled: bool) {
        self.commands.push(RenderCommand::Blend(enabled));
    }

    fn submit(&mut self, draw: &DrawCall) {
        self.commands.push(RenderCommand::Draw(draw.clone()));
    }
}
