//! Errors that can occur while executing a stream.
//!
//! All variants are fatal for the stream that produced them: the VM stops
//! decoding immediately and never resynchronizes, since opcode boundaries
//! are not self-describing without successful decode. State mutated by
//! earlier instructions of the same stream stays applied.

use scenewire_bytecode::{AnchorId, MacroId, NodeId, StreamError, TemplateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A fixed-width read ran past the end of the current stream.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Macro template construction or compilation failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Opcode byte outside the Update namespace.
    #[error("invalid update opcode {0}")]
    InvalidUpdateOpcode(u8),

    /// Opcode byte outside the Render namespace.
    #[error("invalid render opcode {0}")]
    InvalidRenderOpcode(u8),

    /// Macro id absent from the macro table.
    #[error("unknown macro {0}")]
    UnknownMacro(MacroId),

    /// Node id absent from the node table.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Anchor id absent from the anchor table.
    #[error("unknown anchor {0}")]
    UnknownAnchor(AnchorId),

    /// `NodeCreate` with an id that already exists.
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    /// `AnchorCreate` with an id that already exists.
    #[error("anchor {0} already exists")]
    DuplicateAnchor(AnchorId),

    /// `MacroStart` while another definition is open.
    #[error("macro definition already open")]
    DefinitionAlreadyOpen,

    /// A definition opcode outside `MacroStart`..`MacroEnd`.
    #[error("no open macro definition")]
    NoOpenDefinition,
}
