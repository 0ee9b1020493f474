//! Parameterized macro templates.
//!
//! A template is a Render-opcode body with placeholder byte ranges. Each
//! declared slot contributes `width` bytes to the expected argument block;
//! each `use_slot` leaves a hole in the body and records a backpatch.
//! Compiling copies the body and overwrites every hole with the matching
//! slice of the caller's argument block — one template, many call sites
//! supplying only the varying bytes.

use crate::error::TemplateError;
use crate::opcode::RenderOp;
use crate::stream::ByteStream;

/// A declared variable slot: byte width and cumulative offset into the
/// argument block.
#[derive(Clone, Copy, Debug)]
struct Slot {
    width: usize,
    offset: usize,
}

/// One backpatch: overwrite `width` bytes of the body at `body_offset` with
/// the slot's slice of the argument block.
#[derive(Clone, Copy, Debug)]
struct Patch {
    body_offset: usize,
    slot: u16,
}

/// Reusable drawing program with backpatchable variable slots.
#[derive(Clone, Debug, Default)]
pub struct MacroTemplate {
    body: Vec<u8>,
    slots: Vec<Slot>,
    patches: Vec<Patch>,
    args_len: usize,
}

impl MacroTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total declared argument-block size in bytes.
    pub fn args_len(&self) -> usize {
        self.args_len
    }

    /// Number of declared slots.
    pub fn slot_count(&self) -> u16 {
        self.slots.len() as u16
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Declare the next variable slot, returning its index.
    pub fn declare_slot(&mut self, width: usize) -> u16 {
        let index = self.slots.len() as u16;
        self.slots.push(Slot {
            width,
            offset: self.args_len,
        });
        self.args_len += width;
        index
    }

    /// Append one Render opcode byte to the body.
    pub fn push_op(&mut self, op: RenderOp) {
        self.body.push(op.to_byte());
    }

    /// Append placeholder bytes for a previously declared slot and record
    /// the backpatch. The placeholder width comes from the declaration.
    pub fn use_slot(&mut self, slot: u16) -> Result<(), TemplateError> {
        let Some(decl) = self.slots.get(slot as usize) else {
            return Err(TemplateError::UnknownSlot(slot));
        };
        self.patches.push(Patch {
            body_offset: self.body.len(),
            slot,
        });
        self.body.extend(std::iter::repeat_n(0u8, decl.width));
        Ok(())
    }

    /// Append literal bytes to the body, no backpatch.
    pub fn use_const(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Produce a concrete instruction stream from this template and an
    /// argument block. The result is independent of the template; the
    /// template is never mutated.
    pub fn compile(&self, args: &[u8]) -> Result<ByteStream, TemplateError> {
        if args.len() < self.args_len {
            return Err(TemplateError::ArgumentBlockTooShort {
                expected: self.args_len,
                actual: args.len(),
            });
        }
        let mut body = self.body.clone();
        for patch in &self.patches {
            let slot = self.slots[patch.slot as usize];
            body[patch.body_offset..patch.body_offset + slot.width]
                .copy_from_slice(&args[slot.offset..slot.offset + slot.width]);
        }
        Ok(ByteStream::from_bytes(body))
    }
}
