//! Typed builder for Update streams.
//!
//! Every method appends one complete instruction, so a finished writer always
//! yields a stream the VM can decode without underrun. Id allocation is
//! sequential per kind and lives here so directors never hand-pick wire ids.

use glam::DVec2;

use scenewire_bytecode::{AnchorId, ByteStream, Color, MacroId, NodeId, RenderOp, UpdateOp};

/// Builder over a [`ByteStream`] emitting well-formed Update instructions.
///
/// The id counters persist across [`finish`](Self::finish), so one writer can
/// produce many streams for the same session without reusing ids.
#[derive(Debug, Default)]
pub struct UpdateWriter {
    stream: ByteStream,
    next_macro: u16,
    next_node: u16,
    next_anchor: u16,
    /// Slot counter for the macro definition currently being emitted.
    slot_count: u16,
}

impl UpdateWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the accumulated stream, leaving the writer ready for the next
    /// frame with its id counters intact.
    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.stream).into_bytes()
    }

    fn push_op(&mut self, op: UpdateOp) {
        self.stream.push_u8(op.to_byte());
    }

    // --- macro definition ---

    /// Open a macro definition under a freshly allocated id.
    pub fn macro_start(&mut self) -> MacroId {
        self.push_op(UpdateOp::MacroStart);
        let id = MacroId(self.next_macro);
        self.stream.push_u16(id.0);
        self.next_macro += 1;
        self.slot_count = 0;
        id
    }

    pub fn macro_end(&mut self) {
        self.push_op(UpdateOp::MacroEnd);
    }

    /// Append a render opcode to the open definition's body.
    pub fn macro_op(&mut self, op: RenderOp) {
        self.push_op(UpdateOp::MacroOp);
        self.stream.push_u8(op.to_byte());
    }

    /// Declare a variable slot of `width` bytes; returns its number.
    pub fn macro_var(&mut self, width: u8) -> u16 {
        self.push_op(UpdateOp::MacroVar);
        self.stream.push_u8(width);
        let slot = self.slot_count;
        self.slot_count += 1;
        slot
    }

    /// Splice a declared slot into the body at the current position.
    pub fn macro_use_var(&mut self, slot: u16) {
        self.push_op(UpdateOp::MacroUseVar);
        self.stream.push_u16(slot);
    }

    fn macro_use_const(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= u8::MAX as usize);
        self.push_op(UpdateOp::MacroUseConst);
        self.stream.push_u8(bytes.len() as u8);
        self.stream.push_bytes(bytes);
    }

    pub fn macro_use_const_u8(&mut self, value: u8) {
        self.macro_use_const(&[value]);
    }

    pub fn macro_use_const_u16(&mut self, value: u16) {
        self.macro_use_const(&value.to_le_bytes());
    }

    pub fn macro_use_const_vec2(&mut self, value: DVec2) {
        let mut buf = ByteStream::new();
        buf.push_vec2(value);
        self.macro_use_const(buf.as_bytes());
    }

    pub fn macro_use_const_color(&mut self, color: Color) {
        self.macro_use_const(&color.to_bytes());
    }

    // --- scene mutation ---

    /// Create a node under a freshly allocated id, parented to the root.
    pub fn node_create(&mut self) -> NodeId {
        self.push_op(UpdateOp::NodeCreate);
        let id = NodeId(self.next_node);
        self.stream.push_u16(id.0);
        self.next_node += 1;
        id
    }

    /// Bind `node`'s content to `template` with the given argument block.
    ///
    /// `args` must be exactly as wide as the macro's declared slots combined;
    /// the VM rejects anything shorter when it compiles the binding.
    pub fn node_set_content(&mut self, node: NodeId, template: MacroId, args: &[u8]) {
        self.push_op(UpdateOp::NodeSetContent);
        self.stream.push_u16(node.0);
        self.stream.push_u16(template.0);
        self.stream.push_bytes(args);
    }

    pub fn node_set_parent(&mut self, node: NodeId, parent: NodeId) {
        self.push_op(UpdateOp::NodeSetParent);
        self.stream.push_u16(node.0);
        self.stream.push_u16(parent.0);
    }

    pub fn node_set_position(&mut self, node: NodeId, position: DVec2) {
        self.push_op(UpdateOp::NodeSetPosition);
        self.stream.push_u16(node.0);
        self.stream.push_vec2(position);
    }

    pub fn node_set_rotation(&mut self, node: NodeId, radians: f64) {
        self.push_op(UpdateOp::NodeSetRotation);
        self.stream.push_u16(node.0);
        self.stream.push_rotation(radians);
    }

    pub fn node_set_scale(&mut self, node: NodeId, scale: DVec2) {
        self.push_op(UpdateOp::NodeSetScale);
        self.stream.push_u16(node.0);
        self.stream.push_scale(scale);
    }

    /// Create an anchor at `offset` in `node`'s local space.
    pub fn anchor_create(&mut self, node: NodeId, offset: DVec2) -> AnchorId {
        self.push_op(UpdateOp::AnchorCreate);
        let id = AnchorId(self.next_anchor);
        self.stream.push_u16(id.0);
        self.next_anchor += 1;
        self.stream.push_u16(node.0);
        self.stream.push_vec2(offset);
        id
    }
}
