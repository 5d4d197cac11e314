//! Scene management
//!
//! A [`Scene`] is an arena of named [`Transform`]s plus the cameras and
//! drawables that refer to them. Scenes are built once from a
//! [`SceneDescription`] and afterwards only have their poses mutated.
//!
//! ## Ownership
//!
//! ```text
//! Scene (owns) ──► SlotMap<TransformId, Transform>
//!   ├── cameras:   Camera   { transform: TransformId, .. }
//!   └── drawables: Drawable { transform: TransformId, pipeline }
//! Mode  (holds) ──► TransformId handles, resolved by name at start
//! ```

mod camera;
mod description;
mod scene_graph;
mod transform;

pub use camera::Camera;
pub use description::{CameraDescription, NodeDescription, SceneDescription};
pub use scene_graph::{Drawable, Scene};
pub use transform::{Transform, TransformId};

use thiserror::Error;

/// Scene loading and lookup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// IO error while reading a scene file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene file could not be parsed
    #[error("Scene parse error: {0}")]
    Parse(String),

    /// Two transforms share a name
    #[error("Duplicate scene node name: {0}")]
    DuplicateName(String),

    /// A required node is absent
    #[error("Required scene node not found: {0}")]
    NodeNotFound(String),

    /// A parent index does not refer to an earlier node
    #[error("Node '{node}' has invalid parent index {parent}")]
    InvalidParent {
        /// Offending node
        node: String,
        /// Parent index as written
        parent: usize,
    },

    /// A handle from another scene was used
    #[error("Unknown transform referenced by {0}")]
    UnknownTransform(String),

    /// A rotation quaternion of zero length
    #[error("Node '{0}' has a zero-length rotation")]
    InvalidRotation(String),

    /// A scale with a zero or non-finite component
    #[error("Node '{0}' has a degenerate scale")]
    InvalidScale(String),
}
