//! Shared value types carried over the wire.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// RGBA color with 0..1 channel intensities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize the 0..1 channels to wire bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        let q = |c: f32| (c * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Reconstruct 0..1 channels from wire bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let d = |b: u8| b as f32 / 255.0;
        Self::rgba(d(bytes[0]), d(bytes[1]), d(bytes[2]), d(bytes[3]))
    }
}

/// Axis-aligned rectangle as position + size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self { position, size }
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.position,
            DVec2::new(self.position.x + self.size.x, self.position.y),
            self.position + self.size,
            DVec2::new(self.position.x, self.position.y + self.size.y),
        ]
    }
}
