//! Wire-level tests for update and render execution.
//!
//! Streams are built byte by byte on purpose: these tests pin the protocol
//! as seen on the wire, independent of the producer-side writer.

use glam::DVec2;

use scenewire_bytecode::{
    AnchorId, ByteStream, Color, MacroId, NodeId, RenderOp, StreamError, UpdateOp,
};

use super::error::RuntimeError;
use super::surface::{RecordingSurface, SurfaceCall};
use super::vm::Player;

fn op(s: &mut ByteStream, op: UpdateOp) {
    s.push_u8(op.to_byte());
}

fn macro_op(s: &mut ByteStream, r: RenderOp) {
    op(s, UpdateOp::MacroOp);
    s.push_u8(r.to_byte());
}

fn use_const(s: &mut ByteStream, bytes: &[u8]) {
    op(s, UpdateOp::MacroUseConst);
    s.push_u8(bytes.len() as u8);
    s.push_bytes(bytes);
}

fn use_const_vec2(s: &mut ByteStream, v: DVec2) {
    op(s, UpdateOp::MacroUseConst);
    s.push_u8(4);
    s.push_vec2(v);
}

/// `MacroStart id`, body built by `f`, `MacroEnd`.
fn define_macro(s: &mut ByteStream, id: u16, f: impl FnOnce(&mut ByteStream)) {
    op(s, UpdateOp::MacroStart);
    s.push_u16(id);
    f(s);
    op(s, UpdateOp::MacroEnd);
}

fn create_node(s: &mut ByteStream, id: u16) {
    op(s, UpdateOp::NodeCreate);
    s.push_u16(id);
}

fn set_content(s: &mut ByteStream, node: u16, macro_id: u16, args: &[u8]) {
    op(s, UpdateOp::NodeSetContent);
    s.push_u16(node);
    s.push_u16(macro_id);
    s.push_bytes(args);
}

fn set_position(s: &mut ByteStream, node: u16, v: DVec2) {
    op(s, UpdateOp::NodeSetPosition);
    s.push_u16(node);
    s.push_vec2(v);
}

fn run(player: &mut Player, stream: ByteStream) {
    player.update(stream.into_bytes()).unwrap();
}

#[test]
fn fill_macro_end_to_end() {
    // Macro with one declared 2-byte slot (unused by the body), body
    // SetFillColor(red) + Fill; the bound node must produce exactly those
    // two surface calls, a content-less node none.
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        op(s, UpdateOp::MacroVar);
        s.push_u8(2);
        macro_op(s, RenderOp::SetFillColor);
        use_const(s, &[255, 0, 0, 255]);
        macro_op(s, RenderOp::Fill);
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[0xaa, 0xbb]);
    create_node(&mut s, 2); // stays content-less

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetFillColor(Color::RED),
            SurfaceCall::Fill,
        ]
    );
}

#[test]
fn slot_bytes_flow_from_set_content_args() {
    // The color comes entirely from the argument block via a backpatched
    // slot; re-binding with different args changes the drawn color.
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        op(s, UpdateOp::MacroVar);
        s.push_u8(4);
        macro_op(s, RenderOp::SetFillColor);
        op(s, UpdateOp::MacroUseVar);
        s.push_u16(0);
        macro_op(s, RenderOp::Fill);
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[0, 255, 0, 255]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls()[0], SurfaceCall::SetFillColor(Color::GREEN));

    let mut s = ByteStream::new();
    set_content(&mut s, 1, 0, &[0, 0, 255, 255]);
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls()[0], SurfaceCall::SetFillColor(Color::BLUE));
}

#[test]
fn nested_macro_call_returns_to_caller() {
    let mut s = ByteStream::new();
    // leaf macro: just Fill
    define_macro(&mut s, 0, |s| {
        macro_op(s, RenderOp::Fill);
    });
    // caller: SetFillColor(red), call leaf, ClosePath
    define_macro(&mut s, 1, |s| {
        macro_op(s, RenderOp::SetFillColor);
        use_const(s, &[255, 0, 0, 255]);
        macro_op(s, RenderOp::MacroCall);
        use_const(s, &0u16.to_le_bytes());
        macro_op(s, RenderOp::ClosePath);
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 1, &[]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetFillColor(Color::RED),
            SurfaceCall::Fill,
            SurfaceCall::ClosePath,
        ]
    );
}

#[test]
fn macro_call_passes_argument_block_from_caller_stream() {
    // The callee's 4-byte color argument is embedded in the caller's
    // compiled stream right after the MacroCall id, and the caller's own
    // slot feeds it, so the bytes travel args -> caller body -> callee.
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        op(s, UpdateOp::MacroVar);
        s.push_u8(4);
        macro_op(s, RenderOp::SetFillColor);
        op(s, UpdateOp::MacroUseVar);
        s.push_u16(0);
        macro_op(s, RenderOp::Fill);
    });
    define_macro(&mut s, 1, |s| {
        op(s, UpdateOp::MacroVar);
        s.push_u8(4);
        macro_op(s, RenderOp::MacroCall);
        use_const(s, &0u16.to_le_bytes());
        op(s, UpdateOp::MacroUseVar);
        s.push_u16(0);
        macro_op(s, RenderOp::ClosePath);
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 1, &[0, 255, 0, 255]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetFillColor(Color::GREEN),
            SurfaceCall::Fill,
            SurfaceCall::ClosePath,
        ]
    );
}

#[test]
fn points_are_globally_transformed() {
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        macro_op(s, RenderOp::MoveTo);
        use_const_vec2(s, DVec2::new(5.0, 0.0));
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[]);
    set_position(&mut s, 1, DVec2::new(10.0, 0.0));

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls(), &[SurfaceCall::MoveTo(DVec2::new(15.0, 0.0))]);
}

#[test]
fn child_inherits_parent_transform() {
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        macro_op(s, RenderOp::MoveTo);
        use_const_vec2(s, DVec2::ZERO);
    });
    create_node(&mut s, 1);
    create_node(&mut s, 2);
    op(&mut s, UpdateOp::NodeSetParent);
    s.push_u16(2);
    s.push_u16(1);
    set_position(&mut s, 1, DVec2::new(10.0, 0.0));
    set_position(&mut s, 2, DVec2::new(5.0, 0.0));
    set_content(&mut s, 2, 0, &[]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls(), &[SurfaceCall::MoveTo(DVec2::new(15.0, 0.0))]);
}

#[test]
fn rectangle_expands_to_path_primitives() {
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        macro_op(s, RenderOp::Rectangle);
        op(s, UpdateOp::MacroUseConst);
        s.push_u8(8);
        s.push_vec2(DVec2::ZERO);
        s.push_vec2(DVec2::new(10.0, 10.0));
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::MoveTo(DVec2::new(0.0, 0.0)),
            SurfaceCall::LineTo(DVec2::new(10.0, 0.0)),
            SurfaceCall::LineTo(DVec2::new(10.0, 10.0)),
            SurfaceCall::LineTo(DVec2::new(0.0, 10.0)),
            SurfaceCall::ClosePath,
        ]
    );
}

#[test]
fn underrun_mid_field_keeps_prior_mutations() {
    let mut s = ByteStream::new();
    create_node(&mut s, 1);
    op(&mut s, UpdateOp::NodeSetRotation);
    s.push_u16(1);
    s.push_u8(0x42); // one byte where a 16-bit field is expected

    let mut player = Player::new();
    let err = player.update(s.into_bytes()).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Stream(StreamError::Underrun {
            needed: 2,
            remaining: 1
        })
    );

    // Partial application: the node created before the error persists, and
    // the player accepts further streams.
    assert!(player.node(NodeId(1)).is_some());
    let mut s = ByteStream::new();
    set_position(&mut s, 1, DVec2::new(7.0, 7.0));
    run(&mut player, s);
}

#[test]
fn definition_state_machine_violations() {
    let mut player = Player::new();

    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroVar);
    s.push_u8(2);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::NoOpenDefinition)
    );

    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroEnd);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::NoOpenDefinition)
    );

    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroStart);
    s.push_u16(0);
    op(&mut s, UpdateOp::MacroStart);
    s.push_u16(1);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::DefinitionAlreadyOpen)
    );
}

#[test]
fn definition_may_span_streams() {
    // MacroStart and MacroEnd arriving in different Update streams is
    // legal: the in-flight definition is VM state, not stream state.
    let mut player = Player::new();

    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroStart);
    s.push_u16(0);
    macro_op(&mut s, RenderOp::Fill);
    run(&mut player, s);

    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroEnd);
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[]);
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls(), &[SurfaceCall::Fill]);
}

#[test]
fn unknown_references_are_reported() {
    let mut player = Player::new();

    let mut s = ByteStream::new();
    set_position(&mut s, 9, DVec2::ZERO);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::UnknownNode(NodeId(9)))
    );

    let mut s = ByteStream::new();
    create_node(&mut s, 1);
    set_content(&mut s, 1, 5, &[]);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::UnknownMacro(MacroId(5)))
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut player = Player::new();
    let mut s = ByteStream::new();
    create_node(&mut s, 1);
    create_node(&mut s, 1);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::DuplicateNode(NodeId(1)))
    );
}

#[test]
fn out_of_range_opcodes_are_rejected() {
    let mut player = Player::new();
    assert_eq!(
        player.update(vec![0xfe]),
        Err(RuntimeError::InvalidUpdateOpcode(0xfe))
    );

    // invalid render opcode inside a definition
    let mut s = ByteStream::new();
    op(&mut s, UpdateOp::MacroStart);
    s.push_u16(0);
    op(&mut s, UpdateOp::MacroOp);
    s.push_u8(0xfe);
    assert_eq!(
        player.update(s.into_bytes()),
        Err(RuntimeError::InvalidRenderOpcode(0xfe))
    );
}

#[test]
fn anchors_resolve_after_render() {
    let mut s = ByteStream::new();
    create_node(&mut s, 1);
    set_position(&mut s, 1, DVec2::new(10.0, 20.0));
    op(&mut s, UpdateOp::AnchorCreate);
    s.push_u16(0);
    s.push_u16(1);
    s.push_vec2(DVec2::new(1.0, 2.0));

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(
        player.anchor_position(AnchorId(0)).unwrap(),
        DVec2::new(11.0, 22.0)
    );
    assert_eq!(
        player.anchor_position(AnchorId(7)),
        Err(RuntimeError::UnknownAnchor(AnchorId(7)))
    );
}

#[test]
fn rebinding_content_replaces_prior_binding() {
    let mut s = ByteStream::new();
    define_macro(&mut s, 0, |s| {
        macro_op(s, RenderOp::Fill);
    });
    define_macro(&mut s, 1, |s| {
        macro_op(s, RenderOp::BeginPath);
    });
    create_node(&mut s, 1);
    set_content(&mut s, 1, 0, &[]);
    set_content(&mut s, 1, 1, &[]);

    let mut player = Player::new();
    run(&mut player, s);

    let mut surface = RecordingSurface::new();
    player.render(&mut surface).unwrap();
    assert_eq!(surface.calls(), &[SurfaceCall::BeginPath]);
}
