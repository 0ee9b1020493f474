//! The two opcode namespaces.
//!
//! Update opcodes mutate persistent player state (macro table, scene graph);
//! Render opcodes emit drawing calls. The namespaces are independent: the
//! same byte value means different things in each. Decoding is fallible
//! because streams arrive over the wire; an out-of-range byte is a protocol
//! error, not a panic.

/// Graph- and macro-mutation opcodes (the Update namespace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    /// Open a macro definition: `id: u16`.
    MacroStart,
    /// Close and install the open definition.
    MacroEnd,
    /// Append one Render opcode to the open definition: `opcode: u8`.
    MacroOp,
    /// Declare a variable slot in the open definition: `width: u8`.
    MacroVar,
    /// Append placeholder bytes for a declared slot: `slot: u16`.
    MacroUseVar,
    /// Append literal bytes: `len: u8`, then `len` bytes.
    MacroUseConst,
    /// Create a node under the root: `id: u16`.
    NodeCreate,
    /// Bind compiled macro output as node content: `node: u16`, `macro: u16`,
    /// then the macro's declared argument block.
    NodeSetContent,
    /// Re-parent a node: `node: u16`, `parent: u16`.
    NodeSetParent,
    /// Overwrite local position: `node: u16`, coarse vector.
    NodeSetPosition,
    /// Overwrite local rotation: `node: u16`, rotation field.
    NodeSetRotation,
    /// Overwrite local scale: `node: u16`, coarse scale.
    NodeSetScale,
    /// Bind an anchor to a node-relative point: `anchor: u16`, `node: u16`,
    /// coarse vector.
    AnchorCreate,
}

impl UpdateOp {
    /// Decode from a wire byte. `None` for out-of-range values.
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            0 => Self::MacroStart,
            1 => Self::MacroEnd,
            2 => Self::MacroOp,
            3 => Self::MacroVar,
            4 => Self::MacroUseVar,
            5 => Self::MacroUseConst,
            6 => Self::NodeCreate,
            7 => Self::NodeSetContent,
            8 => Self::NodeSetParent,
            9 => Self::NodeSetPosition,
            10 => Self::NodeSetRotation,
            11 => Self::NodeSetScale,
            12 => Self::AnchorCreate,
            _ => return None,
        })
    }

    /// Encode for the wire.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::MacroStart => 0,
            Self::MacroEnd => 1,
            Self::MacroOp => 2,
            Self::MacroVar => 3,
            Self::MacroUseVar => 4,
            Self::MacroUseConst => 5,
            Self::NodeCreate => 6,
            Self::NodeSetContent => 7,
            Self::NodeSetParent => 8,
            Self::NodeSetPosition => 9,
            Self::NodeSetRotation => 10,
            Self::NodeSetScale => 11,
            Self::AnchorCreate => 12,
        }
    }

    /// Diagnostic name for dumps and logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::MacroStart => "MacroStart",
            Self::MacroEnd => "MacroEnd",
            Self::MacroOp => "MacroOp",
            Self::MacroVar => "MacroVar",
            Self::MacroUseVar => "MacroUseVar",
            Self::MacroUseConst => "MacroUseConst",
            Self::NodeCreate => "NodeCreate",
            Self::NodeSetContent => "NodeSetContent",
            Self::NodeSetParent => "NodeSetParent",
            Self::NodeSetPosition => "NodeSetPosition",
            Self::NodeSetRotation => "NodeSetRotation",
            Self::NodeSetScale => "NodeSetScale",
            Self::AnchorCreate => "AnchorCreate",
        }
    }
}

/// Drawing opcodes (the Render namespace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderOp {
    /// Start a new path on the surface.
    BeginPath,
    /// Set the fill color: four channel bytes.
    SetFillColor,
    /// Fill the current path.
    Fill,
    /// Convenience rectangle: coarse rect, expanded to move/line/close.
    Rectangle,
    /// Invoke another macro: `macro: u16`, then its argument block.
    MacroCall,
    /// Begin a subpath at a local-space point: coarse vector.
    MoveTo,
    /// Line to a local-space point: coarse vector.
    LineTo,
    /// Close the current subpath.
    ClosePath,
}

impl RenderOp {
    /// Decode from a wire byte. `None` for out-of-range values.
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            0 => Self::BeginPath,
            1 => Self::SetFillColor,
            2 => Self::Fill,
            3 => Self::Rectangle,
            4 => Self::MacroCall,
            5 => Self::MoveTo,
            6 => Self::LineTo,
            7 => Self::ClosePath,
            _ => return None,
        })
    }

    /// Encode for the wire.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::BeginPath => 0,
            Self::SetFillColor => 1,
            Self::Fill => 2,
            Self::Rectangle => 3,
            Self::MacroCall => 4,
            Self::MoveTo => 5,
            Self::LineTo => 6,
            Self::ClosePath => 7,
        }
    }

    /// Diagnostic name for dumps and logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::BeginPath => "BeginPath",
            Self::SetFillColor => "SetFillColor",
            Self::Fill => "Fill",
            Self::Rectangle => "Rectangle",
            Self::MacroCall => "MacroCall",
            Self::MoveTo => "MoveTo",
            Self::LineTo => "LineTo",
            Self::ClosePath => "ClosePath",
        }
    }
}
