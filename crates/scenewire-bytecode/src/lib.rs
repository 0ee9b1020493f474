//! Wire format and instruction encoding for Scenewire.
//!
//! This crate contains:
//! - The byte stream primitive (append/read with a cursor)
//! - Field encodings (vectors, rotation, scale, color, rectangles)
//! - The two opcode namespaces (Update and Render)
//! - Macro templates with backpatchable variable slots
//! - A human-readable dump for debugging

mod dump;
mod error;
mod ids;
mod opcode;
mod stream;
mod template;
mod types;

#[cfg(test)]
mod template_tests;

pub use dump::dump_update;
pub use error::{StreamError, TemplateError};
pub use ids::{AnchorId, MacroId, NodeId};
pub use opcode::{RenderOp, UpdateOp};
pub use stream::{
    ByteStream, COLOR_WIRE_SIZE, RECT_WIRE_SIZE, SCALE_FACTOR, VEC2_FIXED_WIRE_SIZE,
    VEC2_WIRE_SIZE,
};
pub use template::MacroTemplate;
pub use types::{Color, Rect};
