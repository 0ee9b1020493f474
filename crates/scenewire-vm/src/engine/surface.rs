//! Drawing-surface capability consumed by render execution.
//!
//! Points arrive in surface coordinates, already globally transformed by
//! the VM. The concrete rasterizer lives outside this crate; tests and the
//! headless CLI use [`RecordingSurface`].

use glam::DVec2;
use scenewire_bytecode::Color;
use serde::{Deserialize, Serialize};

/// External drawing capability.
pub trait Surface {
    fn begin_path(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn fill(&mut self);
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    fn close_path(&mut self);
}

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCall {
    BeginPath,
    SetFillColor(Color),
    Fill,
    MoveTo(DVec2),
    LineTo(DVec2),
    ClosePath,
}

/// Surface that records calls instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drain the recorded calls, leaving the surface empty for the next
    /// frame.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(SurfaceCall::SetFillColor(color));
    }

    fn fill(&mut self) {
        self.calls.push(SurfaceCall::Fill);
    }

    fn move_to(&mut self, point: DVec2) {
        self.calls.push(SurfaceCall::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.calls.push(SurfaceCall::LineTo(point));
    }

    fn close_path(&mut self) {
        self.calls.push(SurfaceCall::ClosePath);
    }
}
