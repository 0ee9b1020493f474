//! Runtime engine executing Scenewire streams.
//!
//! The VM decodes Update opcodes into scene and macro mutations, and Render
//! opcodes into drawing calls, with an explicit re-entrancy stack for nested
//! macro invocation.

mod error;
mod scene;
mod surface;
mod vm;

#[cfg(test)]
mod engine_tests;

pub use error::RuntimeError;
pub use scene::{Anchor, Node, NodeHandle, SceneGraph};
pub use surface::{RecordingSurface, Surface, SurfaceCall};
pub use vm::Player;
