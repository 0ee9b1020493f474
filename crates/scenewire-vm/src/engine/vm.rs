//! The player: update/render dispatch with re-entrant macro execution.

use std::collections::HashMap;

use log::trace;

use scenewire_bytecode::{
    AnchorId, ByteStream, MacroId, MacroTemplate, NodeId, RenderOp, UpdateOp,
};

use super::error::RuntimeError;
use super::scene::{Anchor, NodeHandle, SceneGraph};
use super::surface::Surface;

/// Persistent VM state for one session: scene graph, macro/node/anchor
/// tables, and the re-entrancy stack holding suspended streams during
/// nested macro execution.
///
/// The caller must serialize `update`/`render` calls; neither may be
/// re-entered from a surface callback.
pub struct Player {
    scene: SceneGraph,
    macros: HashMap<MacroId, MacroTemplate>,
    nodes: HashMap<NodeId, NodeHandle>,
    anchors: HashMap<AnchorId, Anchor>,
    /// The single in-flight macro definition, if any. Survives across
    /// streams until `MacroEnd` installs it.
    wip: Option<(MacroId, MacroTemplate)>,
    /// Stack of streams; the top is the one currently executing.
    stack: Vec<ByteStream>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            scene: SceneGraph::new(),
            macros: HashMap::new(),
            nodes: HashMap::new(),
            anchors: HashMap::new(),
            wip: None,
            stack: Vec::new(),
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Look up the arena handle for a wire id.
    pub fn node(&self, id: NodeId) -> Option<NodeHandle> {
        self.nodes.get(&id).copied()
    }

    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }

    /// Global position of an anchor. Valid after a render pass has derived
    /// the transforms.
    pub fn anchor_position(&self, id: AnchorId) -> Result<glam::DVec2, RuntimeError> {
        let anchor = self
            .anchors
            .get(&id)
            .ok_or(RuntimeError::UnknownAnchor(id))?;
        Ok(self.scene.global_point(anchor.node, anchor.offset))
    }

    /// Execute one Update stream to completion. Ownership of the bytes
    /// transfers to the VM for the duration of the call.
    ///
    /// On error the remaining bytes are abandoned; mutations already applied
    /// by earlier instructions of the same stream stay applied.
    pub fn update(&mut self, bytes: Vec<u8>) -> Result<(), RuntimeError> {
        let result = self.run_update(ByteStream::from_bytes(bytes));
        if result.is_err() {
            self.stack.clear();
        }
        result
    }

    fn run_update(&mut self, stream: ByteStream) -> Result<(), RuntimeError> {
        let base = self.stack.len();
        self.stack.push(stream);
        while self.stack.len() > base {
            if self.current().is_exhausted() {
                self.stack.pop();
                continue;
            }
            self.step_update()?;
        }
        Ok(())
    }

    /// Execute the render pass: walk the scene depth-first from the root,
    /// derive each node's global transform, and run its bound content
    /// against the surface.
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<(), RuntimeError> {
        let root = self.scene.root();
        let result = self.render_node(root, surface);
        if result.is_err() {
            self.stack.clear();
        }
        result
    }

    fn render_node<S: Surface>(
        &mut self,
        handle: NodeHandle,
        surface: &mut S,
    ) -> Result<(), RuntimeError> {
        self.scene.recompute_transform(handle);
        if let Some(content) = self.scene.get(handle).content.clone() {
            let mut stream = content;
            stream.rewind();
            self.run_render(stream, handle, surface)?;
        }
        for child in self.scene.children(handle) {
            self.render_node(child, surface)?;
        }
        Ok(())
    }

    fn run_render<S: Surface>(
        &mut self,
        stream: ByteStream,
        node: NodeHandle,
        surface: &mut S,
    ) -> Result<(), RuntimeError> {
        let base = self.stack.len();
        self.stack.push(stream);
        while self.stack.len() > base {
            if self.current().is_exhausted() {
                self.stack.pop();
                continue;
            }
            self.step_render(node, surface)?;
        }
        Ok(())
    }

    fn current(&mut self) -> &mut ByteStream {
        self.stack.last_mut().expect("no stream is executing")
    }

    // --- update dispatch ---

    fn step_update(&mut self) -> Result<(), RuntimeError> {
        let byte = self.current().pop_u8()?;
        let op = UpdateOp::from_byte(byte).ok_or(RuntimeError::InvalidUpdateOpcode(byte))?;
        trace!("update op {}", op.name());

        match op {
            UpdateOp::MacroStart => {
                if self.wip.is_some() {
                    return Err(RuntimeError::DefinitionAlreadyOpen);
                }
                let id = MacroId(self.current().pop_u16()?);
                self.wip = Some((id, MacroTemplate::new()));
            }
            UpdateOp::MacroEnd => {
                let (id, template) = self.wip.take().ok_or(RuntimeError::NoOpenDefinition)?;
                self.macros.insert(id, template);
            }
            UpdateOp::MacroOp => {
                self.require_open_definition()?;
                let byte = self.current().pop_u8()?;
                let op =
                    RenderOp::from_byte(byte).ok_or(RuntimeError::InvalidRenderOpcode(byte))?;
                self.open_definition()?.push_op(op);
            }
            UpdateOp::MacroVar => {
                self.require_open_definition()?;
                let width = self.current().pop_u8()? as usize;
                self.open_definition()?.declare_slot(width);
            }
            UpdateOp::MacroUseVar => {
                self.require_open_definition()?;
                let slot = self.current().pop_u16()?;
                self.open_definition()?.use_slot(slot)?;
            }
            UpdateOp::MacroUseConst => {
                self.require_open_definition()?;
                let len = self.current().pop_u8()? as usize;
                let bytes = self.current().pop_bytes(len)?;
                self.open_definition()?.use_const(&bytes);
            }
            UpdateOp::NodeCreate => {
                let id = NodeId(self.current().pop_u16()?);
                if self.nodes.contains_key(&id) {
                    return Err(RuntimeError::DuplicateNode(id));
                }
                let handle = self.scene.alloc();
                self.nodes.insert(id, handle);
            }
            UpdateOp::NodeSetContent => {
                let node = self.pop_node()?;
                let compiled = self.pop_and_compile_macro()?;
                self.scene.get_mut(node).content = Some(compiled);
            }
            UpdateOp::NodeSetParent => {
                let node = self.pop_node()?;
                let parent = self.pop_node()?;
                self.scene.attach(node, parent);
            }
            UpdateOp::NodeSetPosition => {
                let node = self.pop_node()?;
                let position = self.current().pop_vec2()?;
                self.scene.get_mut(node).position = position;
            }
            UpdateOp::NodeSetRotation => {
                let node = self.pop_node()?;
                let rotation = self.current().pop_rotation()?;
                self.scene.get_mut(node).rotation = rotation;
            }
            UpdateOp::NodeSetScale => {
                let node = self.pop_node()?;
                let scale = self.current().pop_scale()?;
                self.scene.get_mut(node).scale = scale;
            }
            UpdateOp::AnchorCreate => {
                let id = AnchorId(self.current().pop_u16()?);
                if self.anchors.contains_key(&id) {
                    return Err(RuntimeError::DuplicateAnchor(id));
                }
                let node = self.pop_node()?;
                let offset = self.current().pop_vec2()?;
                self.anchors.insert(id, Anchor { node, offset });
            }
        }
        Ok(())
    }

    /// Definition-state check before decoding a definition opcode's
    /// operands, so a `Closed`-state violation wins over a truncated operand.
    fn require_open_definition(&self) -> Result<(), RuntimeError> {
        if self.wip.is_none() {
            return Err(RuntimeError::NoOpenDefinition);
        }
        Ok(())
    }

    fn open_definition(&mut self) -> Result<&mut MacroTemplate, RuntimeError> {
        match &mut self.wip {
            Some((_, template)) => Ok(template),
            None => Err(RuntimeError::NoOpenDefinition),
        }
    }

    fn pop_node(&mut self) -> Result<NodeHandle, RuntimeError> {
        let id = NodeId(self.current().pop_u16()?);
        self.nodes
            .get(&id)
            .copied()
            .ok_or(RuntimeError::UnknownNode(id))
    }

    /// Pop a macro id and its argument block from the current stream and
    /// compile. The block length is the macro's declared total width.
    fn pop_and_compile_macro(&mut self) -> Result<ByteStream, RuntimeError> {
        let id = MacroId(self.current().pop_u16()?);
        let args_len = self
            .macros
            .get(&id)
            .ok_or(RuntimeError::UnknownMacro(id))?
            .args_len();
        let args = self.current().pop_bytes(args_len)?;
        let template = self.macros.get(&id).expect("checked above");
        Ok(template.compile(&args)?)
    }

    // --- render dispatch ---

    fn step_render<S: Surface>(
        &mut self,
        node: NodeHandle,
        surface: &mut S,
    ) -> Result<(), RuntimeError> {
        let byte = self.current().pop_u8()?;
        let op = RenderOp::from_byte(byte).ok_or(RuntimeError::InvalidRenderOpcode(byte))?;
        trace!("render op {}", op.name());

        match op {
            RenderOp::BeginPath => surface.begin_path(),
            RenderOp::SetFillColor => {
                let color = self.current().pop_color()?;
                surface.set_fill_color(color);
            }
            RenderOp::Fill => surface.fill(),
            RenderOp::Rectangle => {
                let rect = self.current().pop_rect()?;
                let corners = rect.corners().map(|p| self.scene.global_point(node, p));
                surface.move_to(corners[0]);
                surface.line_to(corners[1]);
                surface.line_to(corners[2]);
                surface.line_to(corners[3]);
                surface.close_path();
            }
            RenderOp::MoveTo => {
                let point = self.current().pop_vec2()?;
                surface.move_to(self.scene.global_point(node, point));
            }
            RenderOp::LineTo => {
                let point = self.current().pop_vec2()?;
                surface.line_to(self.scene.global_point(node, point));
            }
            RenderOp::ClosePath => surface.close_path(),
            RenderOp::MacroCall => {
                let compiled = self.pop_and_compile_macro()?;
                self.stack.push(compiled);
            }
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
