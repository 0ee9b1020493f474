//! Player VM for Scenewire.
//!
//! This crate executes the two instruction streams of the protocol: Update
//! streams mutate the persistent scene graph and macro table; the render
//! pass walks the scene depth-first and executes each node's bound drawing
//! program against an external drawing surface.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Anchor, Node, NodeHandle, Player, RecordingSurface, RuntimeError, SceneGraph, Surface,
    SurfaceCall,
};
