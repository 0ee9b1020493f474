//! Frame directors: sources of Update streams.

use glam::DVec2;
use log::debug;

use scenewire_bytecode::{Color, MacroId, NodeId, RenderOp};

use crate::writer::UpdateWriter;

/// A producer of Update streams: one setup stream, then one per frame.
pub trait Director {
    /// Establish the session's macros and nodes.
    fn init(&mut self) -> Vec<u8>;

    /// Advance one frame and emit the mutations for it.
    fn update(&mut self) -> Vec<u8>;
}

/// Stage dimensions the demo bounces within.
const STAGE: DVec2 = DVec2::new(600.0, 500.0);

/// Demo director: a red square carrying a green child square, bouncing
/// around the stage while rotating and pulsing its scale.
///
/// All motion derives from the frame counter, so two runs of the same
/// length produce identical streams.
pub struct BounceDirector {
    writer: UpdateWriter,
    frame: u64,
    position: DVec2,
    direction: DVec2,
    parent: NodeId,
    child: NodeId,
}

impl BounceDirector {
    pub fn new() -> Self {
        Self {
            writer: UpdateWriter::new(),
            frame: 0,
            position: DVec2::ZERO,
            direction: DVec2::ONE,
            parent: NodeId(0),
            child: NodeId(0),
        }
    }

    /// A unit square (side 100) filled with `color`, as a parameterless
    /// macro.
    fn define_square(&mut self, color: Color) -> MacroId {
        let id = self.writer.macro_start();
        self.writer.macro_op(RenderOp::BeginPath);
        self.writer.macro_op(RenderOp::MoveTo);
        self.writer.macro_use_const_vec2(DVec2::new(0.0, 0.0));
        self.writer.macro_op(RenderOp::LineTo);
        self.writer.macro_use_const_vec2(DVec2::new(100.0, 0.0));
        self.writer.macro_op(RenderOp::LineTo);
        self.writer.macro_use_const_vec2(DVec2::new(100.0, 100.0));
        self.writer.macro_op(RenderOp::LineTo);
        self.writer.macro_use_const_vec2(DVec2::new(0.0, 100.0));
        self.writer.macro_op(RenderOp::ClosePath);
        self.writer.macro_op(RenderOp::SetFillColor);
        self.writer.macro_use_const_color(color);
        self.writer.macro_op(RenderOp::Fill);
        self.writer.macro_end();
        id
    }
}

impl Director for BounceDirector {
    fn init(&mut self) -> Vec<u8> {
        let red = self.define_square(Color::RED);
        let green = self.define_square(Color::GREEN);

        self.parent = self.writer.node_create();
        self.writer.node_set_content(self.parent, red, &[]);
        self.child = self.writer.node_create();
        self.writer.node_set_content(self.child, green, &[]);
        self.writer.node_set_parent(self.child, self.parent);
        self.writer.node_set_position(self.child, DVec2::new(40.0, 40.0));

        self.writer.finish()
    }

    fn update(&mut self) -> Vec<u8> {
        if self.position.x >= STAGE.x {
            self.direction.x = -1.0;
        } else if self.position.x <= 0.0 {
            self.direction.x = 1.0;
        }
        if self.position.y >= STAGE.y {
            self.direction.y = -1.0;
        } else if self.position.y <= 0.0 {
            self.direction.y = 1.0;
        }
        self.position += self.direction;

        // 4 rad/s at a nominal 60 fps, matching the original pacing.
        let t = self.frame as f64 / 60.0;
        let rotation = t;
        let scale = DVec2::new((t * 4.0).sin() + 1.0, (t * 4.0).cos() + 1.0);

        self.writer.node_set_position(self.parent, self.position);
        self.writer.node_set_rotation(self.parent, rotation);
        self.writer.node_set_scale(self.parent, scale);
        self.writer.node_set_position(self.child, DVec2::new(20.0, 20.0));

        debug!("frame {}: position {}", self.frame, self.position);
        self.frame += 1;
        self.writer.finish()
    }
}

impl Default for BounceDirector {
    fn default() -> Self {
        Self::new()
    }
}
