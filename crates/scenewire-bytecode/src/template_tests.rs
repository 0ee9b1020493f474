//! Tests for macro templates and backpatched compilation.

use super::error::TemplateError;
use super::opcode::RenderOp;
use super::template::MacroTemplate;

fn fill_template() -> MacroTemplate {
    // SetFillColor <4-byte slot>, Fill
    let mut t = MacroTemplate::new();
    let color = t.declare_slot(4);
    t.push_op(RenderOp::SetFillColor);
    t.use_slot(color).unwrap();
    t.push_op(RenderOp::Fill);
    t
}

#[test]
fn slots_accumulate_offsets() {
    let mut t = MacroTemplate::new();
    assert_eq!(t.declare_slot(1), 0);
    assert_eq!(t.declare_slot(2), 1);
    assert_eq!(t.declare_slot(4), 2);
    assert_eq!(t.args_len(), 7);
    assert_eq!(t.slot_count(), 3);
}

#[test]
fn compile_backpatches_exactly_the_recorded_ranges() {
    let mut t = MacroTemplate::new();
    let a = t.declare_slot(2);
    t.push_op(RenderOp::BeginPath);
    t.use_const(&[0x11, 0x22]);
    t.use_slot(a).unwrap();
    t.use_const(&[0x33]);

    let compiled = t.compile(&[0xaa, 0xbb]).unwrap();
    assert_eq!(
        compiled.as_bytes(),
        &[
            RenderOp::BeginPath.to_byte(),
            0x11,
            0x22,
            0xaa,
            0xbb,
            0x33
        ]
    );
}

#[test]
fn compile_is_deterministic_and_does_not_mutate_the_template() {
    let t = fill_template();
    let first = t.compile(&[0xff, 0x00, 0x00, 0xff]).unwrap();
    let second = t.compile(&[0xff, 0x00, 0x00, 0xff]).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());

    // Different arguments only differ in the patched range.
    let other = t.compile(&[0x00, 0xff, 0x00, 0xff]).unwrap();
    assert_eq!(first.as_bytes()[0], other.as_bytes()[0]);
    assert_eq!(first.as_bytes()[5], other.as_bytes()[5]);
    assert_ne!(first.as_bytes(), other.as_bytes());
}

#[test]
fn shared_slot_patches_every_use() {
    let mut t = MacroTemplate::new();
    let v = t.declare_slot(1);
    t.use_slot(v).unwrap();
    t.use_const(&[0x00]);
    t.use_slot(v).unwrap();

    let compiled = t.compile(&[0x7f]).unwrap();
    assert_eq!(compiled.as_bytes(), &[0x7f, 0x00, 0x7f]);
}

#[test]
fn use_slot_requires_prior_declaration() {
    let mut t = MacroTemplate::new();
    assert_eq!(t.use_slot(0), Err(TemplateError::UnknownSlot(0)));
    t.declare_slot(2);
    assert!(t.use_slot(0).is_ok());
    assert_eq!(t.use_slot(1), Err(TemplateError::UnknownSlot(1)));
}

#[test]
fn compile_rejects_short_argument_block() {
    let t = fill_template();
    assert_eq!(
        t.compile(&[0xff, 0x00]),
        Err(TemplateError::ArgumentBlockTooShort {
            expected: 4,
            actual: 2
        })
    );
}

#[test]
fn zero_slot_template_compiles_with_empty_args() {
    let mut t = MacroTemplate::new();
    t.push_op(RenderOp::BeginPath);
    t.push_op(RenderOp::Fill);
    let compiled = t.compile(&[]).unwrap();
    assert_eq!(
        compiled.as_bytes(),
        &[RenderOp::BeginPath.to_byte(), RenderOp::Fill.to_byte()]
    );
}
