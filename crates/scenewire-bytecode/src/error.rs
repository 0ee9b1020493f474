//! Errors produced by the wire format layer.

/// Error reading fixed-width fields from a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// A read required more bytes than remain past the cursor.
    #[error("stream underrun: needed {needed} bytes, {remaining} remaining")]
    Underrun { needed: usize, remaining: usize },
}

/// Error building or compiling a macro template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `use_slot` referenced a slot index that was never declared.
    #[error("unknown variable slot {0}")]
    UnknownSlot(u16),

    /// The argument block is shorter than the declared total slot width.
    #[error("argument block too short: declared {expected} bytes, got {actual}")]
    ArgumentBlockTooShort { expected: usize, actual: usize },
}
