//! Append/read byte stream, the primitive every higher layer builds on.
//!
//! Writes append to the end; reads advance a cursor and fail with
//! [`StreamError::Underrun`] when fewer bytes remain than required. All
//! fixed-width fields are little-endian.

use glam::DVec2;

use crate::error::StreamError;
use crate::types::{Color, Rect};

/// Fixed multiplier for the coarse scale encoding.
pub const SCALE_FACTOR: f64 = 100.0;

/// Wire size of a coarse-grid vector (two u16 fields).
pub const VEC2_WIRE_SIZE: usize = 4;
/// Wire size of a 16.16 fixed-point vector (two i32 fields).
pub const VEC2_FIXED_WIRE_SIZE: usize = 8;
/// Wire size of a color (four channel bytes).
pub const COLOR_WIRE_SIZE: usize = 4;
/// Wire size of a coarse rectangle (four u16 fields).
pub const RECT_WIRE_SIZE: usize = 8;

/// One unit in 16.16 fixed point.
const FIXED_ONE: f64 = 65536.0;

/// Growable byte buffer with a read cursor.
///
/// The cursor always stays in `[0, len]`; a failed read leaves it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteStream {
    bytes: Vec<u8>,
    cursor: usize,
}

impl ByteStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing bytes, cursor at the start.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current read position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    /// True once the cursor has consumed every byte.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Move the cursor back to the start.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn check(&self, needed: usize) -> Result<(), StreamError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(StreamError::Underrun { needed, remaining });
        }
        Ok(())
    }

    // --- fixed-width primitives ---

    pub fn push_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn pop_u8(&mut self) -> Result<u8, StreamError> {
        self.check(1)?;
        let value = self.bytes[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    pub fn push_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn pop_u16(&mut self) -> Result<u16, StreamError> {
        self.check(2)?;
        let value = u16::from_le_bytes([self.bytes[self.cursor], self.bytes[self.cursor + 1]]);
        self.cursor += 2;
        Ok(value)
    }

    pub fn push_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn pop_u32(&mut self) -> Result<u32, StreamError> {
        self.check(4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.bytes[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn push_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn pop_i32(&mut self) -> Result<i32, StreamError> {
        self.check(4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.bytes[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Read `n` raw bytes (argument blocks, constant payloads).
    pub fn pop_bytes(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        self.check(n)?;
        let out = self.bytes[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(out)
    }

    // --- composite encodings ---

    /// Coarse-grid vector: two u16 fields. Components are rounded and
    /// saturate to `0..=65535`.
    pub fn push_vec2(&mut self, value: DVec2) {
        self.push_u16(value.x.round() as u16);
        self.push_u16(value.y.round() as u16);
    }

    pub fn pop_vec2(&mut self) -> Result<DVec2, StreamError> {
        let x = self.pop_u16()?;
        let y = self.pop_u16()?;
        Ok(DVec2::new(x as f64, y as f64))
    }

    /// Sub-pixel vector: two signed 16.16 fixed-point fields.
    pub fn push_vec2_fixed(&mut self, value: DVec2) {
        self.push_i32((value.x * FIXED_ONE).round() as i32);
        self.push_i32((value.y * FIXED_ONE).round() as i32);
    }

    pub fn pop_vec2_fixed(&mut self) -> Result<DVec2, StreamError> {
        let x = self.pop_i32()?;
        let y = self.pop_i32()?;
        Ok(DVec2::new(x as f64 / FIXED_ONE, y as f64 / FIXED_ONE))
    }

    /// Rotation as a u16 fraction of one turn.
    ///
    /// The angle is normalized into `[0, 2π)` with a Euclidean remainder, so
    /// a negative angle encodes as its geometrically equivalent positive
    /// angle rather than having its sign discarded.
    pub fn push_rotation(&mut self, radians: f64) {
        let turn = radians.rem_euclid(std::f64::consts::TAU) / std::f64::consts::TAU;
        self.push_u16((turn * u16::MAX as f64).round() as u16);
    }

    pub fn pop_rotation(&mut self) -> Result<f64, StreamError> {
        let raw = self.pop_u16()?;
        Ok(raw as f64 / u16::MAX as f64 * std::f64::consts::TAU)
    }

    /// Coarse scale: each component multiplied by [`SCALE_FACTOR`] before
    /// u16 encoding. Use [`push_vec2_fixed`](Self::push_vec2_fixed) when
    /// sub-percent precision is needed.
    pub fn push_scale(&mut self, scale: DVec2) {
        self.push_vec2(scale * SCALE_FACTOR);
    }

    pub fn pop_scale(&mut self) -> Result<DVec2, StreamError> {
        Ok(self.pop_vec2()? / SCALE_FACTOR)
    }

    pub fn push_color(&mut self, color: Color) {
        self.push_bytes(&color.to_bytes());
    }

    pub fn pop_color(&mut self) -> Result<Color, StreamError> {
        let r = self.pop_u8()?;
        let g = self.pop_u8()?;
        let b = self.pop_u8()?;
        let a = self.pop_u8()?;
        Ok(Color::from_bytes([r, g, b, a]))
    }

    /// Coarse rectangle: (x, y, width, height) as four u16 fields.
    pub fn push_rect(&mut self, rect: Rect) {
        self.push_vec2(rect.position);
        self.push_vec2(rect.size);
    }

    pub fn pop_rect(&mut self) -> Result<Rect, StreamError> {
        let position = self.pop_vec2()?;
        let size = self.pop_vec2()?;
        Ok(Rect::new(position, size))
    }

    /// Sub-pixel rectangle: position and size as 16.16 vectors.
    pub fn push_rect_fixed(&mut self, rect: Rect) {
        self.push_vec2_fixed(rect.position);
        self.push_vec2_fixed(rect.size);
    }

    pub fn pop_rect_fixed(&mut self) -> Result<Rect, StreamError> {
        let position = self.pop_vec2_fixed()?;
        let size = self.pop_vec2_fixed()?;
        Ok(Rect::new(position, size))
    }
}
