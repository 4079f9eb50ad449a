//! Command recording.
//!
//! [`RecordingSurface`] implements [`DrawSurface`] by collecting
//! [`RenderCommand`]s, for hosts that batch their draw calls and for
//! inspecting a frame without rasterizing it.

use wavefill_core::{Color, DrawSurface, Fill, Paint, Rect, Transform};

/// Owned description of a paint's fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordedFill {
    /// Single colour.
    Solid(Color),
    /// Wave pattern fill.
    Pattern {
        /// Tint the pattern was synthesized with.
        tint: Color,
        /// Horizontal repeat period.
        tile_width: u32,
        /// Pattern-to-canvas transform.
        transform: Transform,
    },
}

impl From<&Paint<'_>> for RecordedFill {
    fn from(paint: &Paint<'_>) -> Self {
        match paint.fill {
            Fill::Solid(color) => Self::Solid(color),
            Fill::Pattern { pattern, transform } => Self::Pattern {
                tint: pattern.tint(),
                tile_width: pattern.tile_width(),
                transform,
            },
        }
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Hairline.
    Line {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Fill.
        fill: RecordedFill,
    },
    /// Filled circle.
    Circle {
        /// Centre.
        center: (f32, f32),
        /// Radius.
        radius: f32,
        /// Fill.
        fill: RecordedFill,
    },
    /// Single glyph.
    Text {
        /// Glyph.
        glyph: char,
        /// Left end of the baseline.
        origin: (f32, f32),
        /// Font size.
        font_size: f32,
        /// Fill.
        fill: RecordedFill,
    },
    /// Clip change (`None` clears it).
    SetClip {
        /// New clip.
        clip: Option<Rect>,
    },
}

/// Surface that records instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<RenderCommand>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded since the last `begin_frame`.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame, handing over its commands.
    pub fn end_frame(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), paint: &Paint<'_>) {
        self.commands.push(RenderCommand::Line {
            from,
            to,
            fill: paint.into(),
        });
    }

    fn draw_circle(&mut self, center: (f32, f32), radius: f32, paint: &Paint<'_>) {
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            fill: paint.into(),
        });
    }

    fn draw_text(&mut self, glyph: char, origin: (f32, f32), font_size: f32, paint: &Paint<'_>) {
        self.commands.push(RenderCommand::Text {
            glyph,
            origin,
            font_size,
            fill: paint.into(),
        });
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.commands.push(RenderCommand::SetClip { clip });
    }
}
