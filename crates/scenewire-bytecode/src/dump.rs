//! Human-readable dump of an Update stream, for debugging and tests.
//!
//! One line per instruction, prefixed with the opcode's byte offset. The
//! dump tracks macro definitions it sees so it can size the argument blocks
//! of later `NodeSetContent` instructions; a reference to a macro defined in
//! an earlier stream cannot be sized and stops the dump. Diagnostic only —
//! execution never depends on this module.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::ids::{AnchorId, MacroId, NodeId};
use crate::opcode::{RenderOp, UpdateOp};
use crate::stream::ByteStream;

/// Render a whole Update stream as text. Decoding stops at the first
/// malformed instruction, which is reported on a trailing `!!` line.
pub fn dump_update(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut stream = ByteStream::from_bytes(bytes.to_vec());
    // Widths of macros defined in this stream, keyed by wire id.
    let mut macro_widths: HashMap<u16, usize> = HashMap::new();
    let mut open_macro: Option<u16> = None;

    while !stream.is_exhausted() {
        let offset = stream.cursor();
        match dump_instruction(&mut stream, &mut macro_widths, &mut open_macro) {
            Ok(line) => {
                let _ = writeln!(out, "{offset:04}  {line}");
            }
            Err(message) => {
                let _ = writeln!(out, "{offset:04}  !! {message}");
                break;
            }
        }
    }
    out
}

fn dump_instruction(
    stream: &mut ByteStream,
    macro_widths: &mut HashMap<u16, usize>,
    open_macro: &mut Option<u16>,
) -> Result<String, String> {
    let byte = stream.pop_u8().map_err(|e| e.to_string())?;
    let op = UpdateOp::from_byte(byte).ok_or_else(|| format!("invalid update opcode {byte}"))?;

    let line = match op {
        UpdateOp::MacroStart => {
            let id = MacroId(stream.pop_u16().map_err(|e| e.to_string())?);
            macro_widths.insert(id.0, 0);
            *open_macro = Some(id.0);
            format!("MacroStart {id}")
        }
        UpdateOp::MacroEnd => {
            *open_macro = None;
            "MacroEnd".to_string()
        }
        UpdateOp::MacroOp => {
            let byte = stream.pop_u8().map_err(|e| e.to_string())?;
            let op = RenderOp::from_byte(byte)
                .ok_or_else(|| format!("invalid render opcode {byte}"))?;
            format!("MacroOp {}", op.name())
        }
        UpdateOp::MacroVar => {
            let width = stream.pop_u8().map_err(|e| e.to_string())? as usize;
            if let Some(total) = open_macro.and_then(|id| macro_widths.get_mut(&id)) {
                *total += width;
            }
            format!("MacroVar width={width}")
        }
        UpdateOp::MacroUseVar => {
            let slot = stream.pop_u16().map_err(|e| e.to_string())?;
            format!("MacroUseVar slot={slot}")
        }
        UpdateOp::MacroUseConst => {
            let len = stream.pop_u8().map_err(|e| e.to_string())? as usize;
            let bytes = stream.pop_bytes(len).map_err(|e| e.to_string())?;
            format!("MacroUseConst len={len} [{}]", hex(&bytes))
        }
        UpdateOp::NodeCreate => {
            let id = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            format!("NodeCreate {id}")
        }
        UpdateOp::NodeSetContent => {
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let id = MacroId(stream.pop_u16().map_err(|e| e.to_string())?);
            let width = *macro_widths
                .get(&id.0)
                .ok_or_else(|| format!("macro {id} not defined in this stream"))?;
            let args = stream.pop_bytes(width).map_err(|e| e.to_string())?;
            format!("NodeSetContent {node} {id} args=[{}]", hex(&args))
        }
        UpdateOp::NodeSetParent => {
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let parent = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            format!("NodeSetParent {node} parent={parent}")
        }
        UpdateOp::NodeSetPosition => {
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let v = stream.pop_vec2().map_err(|e| e.to_string())?;
            format!("NodeSetPosition {node} ({}, {})", v.x, v.y)
        }
        UpdateOp::NodeSetRotation => {
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let radians = stream.pop_rotation().map_err(|e| e.to_string())?;
            format!("NodeSetRotation {node} rad={radians:.4}")
        }
        UpdateOp::NodeSetScale => {
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let v = stream.pop_scale().map_err(|e| e.to_string())?;
            format!("NodeSetScale {node} ({}, {})", v.x, v.y)
        }
        UpdateOp::AnchorCreate => {
            let anchor = AnchorId(stream.pop_u16().map_err(|e| e.to_string())?);
            let node = NodeId(stream.pop_u16().map_err(|e| e.to_string())?);
            let v = stream.pop_vec2().map_err(|e| e.to_string())?;
            format!("AnchorCreate {anchor} {node} ({}, {})", v.x, v.y)
        }
    };
    Ok(line)
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
