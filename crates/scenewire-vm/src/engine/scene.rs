//! Arena-backed scene graph.
//!
//! Nodes live in a slot vector addressed by opaque handles; parent/child
//! relations are handle fields, which keeps detach/attach atomic and avoids
//! ownership cycles. Handles are never freed during a session, so lookups
//! are plain indexing.

use glam::{DAffine2, DMat3, DVec2};
use scenewire_bytecode::ByteStream;

/// Opaque handle into the scene arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

/// One scene node: local transform, optional bound drawing program, and the
/// local-to-global matrix derived during the render pass.
#[derive(Clone, Debug)]
pub struct Node {
    pub position: DVec2,
    pub rotation: f64,
    pub scale: DVec2,
    /// Compiled macro output bound by `NodeSetContent`.
    pub content: Option<ByteStream>,
    /// Recomputed every render pass, never persisted across sessions.
    pub local_to_global: DMat3,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

impl Node {
    fn new() -> Self {
        Self {
            position: DVec2::ZERO,
            rotation: 0.0,
            scale: DVec2::ONE,
            content: None,
            local_to_global: DMat3::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    /// `T(position) × R(rotation) × S(scale)` as a homogeneous 3×3 matrix.
    fn local_matrix(&self) -> DMat3 {
        DMat3::from(DAffine2::from_scale_angle_translation(
            self.scale,
            self.rotation,
            self.position,
        ))
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

/// Non-owning reference to a node plus a local-space offset.
#[derive(Clone, Copy, Debug)]
pub struct Anchor {
    pub node: NodeHandle,
    pub offset: DVec2,
}

/// Owned tree of nodes with a distinguished root.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    root: NodeHandle,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            root: NodeHandle(0),
        }
    }

    pub fn root(&self) -> NodeHandle {
        self.root
    }

    pub fn get(&self, handle: NodeHandle) -> &Node {
        &self.nodes[handle.0 as usize]
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut Node {
        &mut self.nodes[handle.0 as usize]
    }

    /// Allocate a fresh node as a child of the root.
    pub fn alloc(&mut self) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Node::new());
        self.attach(handle, self.root);
        handle
    }

    /// Re-parent `child` under `parent`: detach from any previous parent,
    /// then attach. A node is never a child of two parents.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(old) = self.nodes[child.0 as usize].parent {
            self.nodes[old.0 as usize].children.retain(|c| *c != child);
        }
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    /// Children in insertion order. Cloned so callers can keep mutating the
    /// graph while walking.
    pub fn children(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        self.nodes[handle.0 as usize].children.clone()
    }

    /// Derive `local_to_global` for one node from its parent's matrix. The
    /// parent must have been recomputed earlier in the same pass.
    pub fn recompute_transform(&mut self, handle: NodeHandle) {
        let node = &self.nodes[handle.0 as usize];
        let local = node.local_matrix();
        let global = match node.parent {
            Some(parent) => self.nodes[parent.0 as usize].local_to_global * local,
            None => local,
        };
        self.nodes[handle.0 as usize].local_to_global = global;
    }

    /// Map a node-local point to surface coordinates.
    pub fn global_point(&self, handle: NodeHandle, local: DVec2) -> DVec2 {
        self.nodes[handle.0 as usize]
            .local_to_global
            .transform_point2(local)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
