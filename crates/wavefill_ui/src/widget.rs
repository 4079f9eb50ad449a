//! The liquid-fill indicator view.

use std::time::Duration;

use wavefill_core::{
    measure_square, BlockFont, Color, DrawSurface, GlyphMetrics, MeasureSpec, Paint, Rect, Size,
    Transform, ViewAttributes, WaveConfig, WavePatterns,
};

use crate::animation::WaveShiftAnimator;

/// Vertical squash applied to the pattern while drawing.
const WAVE_SCALE_Y: f32 = 0.5;

/// View state flags (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFlags(u32);

impl ViewFlags {
    /// A redraw was requested and not yet taken by the host.
    pub const DIRTY_RENDER: u32 = 1 << 0;
    /// At least one tick was applied since the pattern was last built.
    pub const ANIMATING: u32 = 1 << 1;
    /// The view was detached; it will never draw or animate again.
    pub const TORN_DOWN: u32 = 1 << 2;

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// Where the view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No geometry yet; nothing is drawn.
    Unconfigured,
    /// Pattern built, no tick applied to it yet.
    Sized,
    /// Pattern built and scrolling.
    Animating,
    /// Detached; animator stopped and patterns released.
    TornDown,
}

/// Placement of the label glyph, computed once per size change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// The glyph.
    pub glyph: char,
    /// Left end of the baseline.
    pub origin: (f32, f32),
    /// Font size (half the view width).
    pub font_size: f32,
}

/// Animated circular liquid-fill indicator.
///
/// Hosts drive it through lifecycle hooks and draw it whenever
/// [`take_redraw_request`](Self::take_redraw_request) returns true.
pub struct WaveFillView {
    config: WaveConfig,
    patterns: Option<WavePatterns>,
    label_layout: Option<LabelLayout>,
    animator: WaveShiftAnimator,
    shift_ratio: f32,
    flags: ViewFlags,
    glyphs: Box<dyn GlyphMetrics>,
}

impl WaveFillView {
    /// Creates a view with [`BlockFont`] metrics. The shift animator starts
    /// immediately.
    #[must_use]
    pub fn new(attrs: &ViewAttributes) -> Self {
        Self::with_glyph_metrics(attrs, Box::new(BlockFont))
    }

    /// Creates a view measuring its label with host glyph metrics.
    #[must_use]
    pub fn with_glyph_metrics(attrs: &ViewAttributes, glyphs: Box<dyn GlyphMetrics>) -> Self {
        let mut animator = WaveShiftAnimator::new();
        animator.start();
        Self {
            config: WaveConfig::from_attributes(attrs),
            patterns: None,
            label_layout: None,
            animator,
            shift_ratio: 0.0,
            flags: ViewFlags::default(),
            glyphs,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Measures the view: always the larger requested side, per-axis
    /// constraints permitting.
    #[must_use]
    pub fn measure(&self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        measure_square(width_spec, height_spec)
    }

    /// Rebuilds the patterns for a new size. A zero side keeps whatever was
    /// built before.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        if self.is_torn_down() {
            return;
        }
        if Size::new(width, height).is_empty() {
            tracing::debug!(width, height, "ignoring empty size");
            return;
        }
        if !self.config.set_size(width, height) && self.patterns.is_some() {
            return;
        }
        self.rebuild();
    }

    /// (Re)starts the shift animator unless the view was torn down.
    pub fn on_attached(&mut self) {
        if self.is_torn_down() {
            tracing::debug!("attach after teardown ignored");
            return;
        }
        self.animator.start();
        tracing::debug!("wave view attached");
    }

    /// Stops the animator and releases the patterns. Terminal.
    pub fn on_detached(&mut self) {
        self.animator.stop();
        self.patterns = None;
        self.label_layout = None;
        self.flags.clear(ViewFlags::DIRTY_RENDER | ViewFlags::ANIMATING);
        self.flags.set(ViewFlags::TORN_DOWN);
        tracing::debug!("wave view torn down");
    }

    /// Timer callback: advances the shift animator by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.is_torn_down() {
            return;
        }
        if let Some(ratio) = self.animator.advance(dt) {
            tracing::trace!(ratio, "wave tick");
            self.set_wave_shift_ratio(ratio);
            if self.patterns.is_some() {
                self.flags.set(ViewFlags::ANIMATING);
            }
        }
    }

    /// Draws the current frame. Draws nothing until a pattern exists.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let Some(patterns) = &self.patterns else {
            return;
        };
        let width = self.config.width() as f32;
        let height = self.config.height() as f32;
        let transform = self.shader_transform();

        surface.set_clip(Some(Rect::new(0.0, 0.0, width, height)));

        if let Some(layout) = &self.label_layout {
            let plain = Paint::solid(self.config.label_color());
            surface.draw_text(layout.glyph, layout.origin, layout.font_size, &plain);
        }

        let radius = width / 2.0;
        surface.draw_circle(
            (width / 2.0, height / 2.0),
            radius,
            &Paint::pattern(patterns.water(), transform),
        );

        if let (Some(layout), Some(label)) = (&self.label_layout, patterns.label()) {
            let masked = Paint::pattern(label, transform);
            surface.draw_text(layout.glyph, layout.origin, layout.font_size, &masked);
        }

        surface.set_clip(None);
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Liquid tint.
    #[must_use]
    pub fn water_color(&self) -> Color {
        self.config.water_color()
    }

    /// Sets the liquid tint.
    pub fn set_water_color(&mut self, color: Color) {
        if self.config.set_water_color(color) {
            self.rebuild();
        }
    }

    /// Label tint.
    #[must_use]
    pub fn text_color(&self) -> Color {
        self.config.label_color()
    }

    /// Sets the label tint. Without a label only the stored tint changes.
    pub fn set_text_color(&mut self, color: Color) {
        if self.config.set_label_color(color) && self.config.label().is_some() {
            self.rebuild();
        }
    }

    /// Fill level in `[0, 100]`.
    #[must_use]
    pub fn water_percent(&self) -> f32 {
        self.config.fill_percent()
    }

    /// Sets the fill level; out-of-range values are clamped.
    pub fn set_water_percent(&mut self, percent: f32) {
        if self.config.set_fill_percent(percent) {
            self.rebuild();
        }
    }

    /// Label glyph, if any.
    #[must_use]
    pub fn label(&self) -> Option<char> {
        self.config.label()
    }

    /// Sets the label to the first character of `label` (default glyph when
    /// empty).
    pub fn set_label(&mut self, label: &str) {
        if self.config.set_label(label) {
            self.rebuild();
        }
    }

    /// Removes the label glyph.
    pub fn clear_label(&mut self) {
        if self.config.clear_label() {
            self.rebuild();
        }
    }

    /// Current horizontal phase in `[0, 1)`.
    #[must_use]
    pub fn wave_shift_ratio(&self) -> f32 {
        self.shift_ratio
    }

    /// Sets the horizontal phase; requests a redraw only when it changes.
    /// Ignored after teardown.
    #[allow(clippy::float_cmp)]
    pub fn set_wave_shift_ratio(&mut self, ratio: f32) {
        if !self.is_torn_down() && self.shift_ratio != ratio {
            self.shift_ratio = ratio;
            self.request_redraw();
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Normalised configuration.
    #[must_use]
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Row of the fill line.
    #[must_use]
    pub fn water_level(&self) -> f32 {
        self.config.water_level()
    }

    /// Current patterns, if built.
    #[must_use]
    pub fn patterns(&self) -> Option<&WavePatterns> {
        self.patterns.as_ref()
    }

    /// Current label placement, if any.
    #[must_use]
    pub fn label_layout(&self) -> Option<&LabelLayout> {
        self.label_layout.as_ref()
    }

    /// Pattern-to-canvas transform for this frame: squash vertically about
    /// the water line, then shift right by `ratio × W`.
    #[must_use]
    pub fn shader_transform(&self) -> Transform {
        let mut transform = Transform::IDENTITY;
        transform.set_scale(1.0, WAVE_SCALE_Y, 0.0, self.water_level());
        transform.post_translate(self.shift_ratio * self.config.width() as f32, 0.0);
        transform
    }

    /// The shift animator.
    #[must_use]
    pub fn animator(&self) -> &WaveShiftAnimator {
        &self.animator
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ViewPhase {
        if self.is_torn_down() {
            ViewPhase::TornDown
        } else if self.patterns.is_none() {
            ViewPhase::Unconfigured
        } else if self.flags.has(ViewFlags::ANIMATING) {
            ViewPhase::Animating
        } else {
            ViewPhase::Sized
        }
    }

    /// Returns true if a redraw is pending.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.flags.has(ViewFlags::DIRTY_RENDER)
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        let pending = self.needs_redraw();
        self.flags.clear(ViewFlags::DIRTY_RENDER);
        pending
    }

    fn is_torn_down(&self) -> bool {
        self.flags.has(ViewFlags::TORN_DOWN)
    }

    /// Nothing is drawn without patterns, so there is nothing to refresh.
    fn request_redraw(&mut self) {
        if self.patterns.is_some() {
            self.flags.set(ViewFlags::DIRTY_RENDER);
        }
    }

    /// Resynthesizes the patterns and label placement from the config.
    /// Requests a redraw only when new patterns replaced the old ones.
    fn rebuild(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.label_layout = self.layout_label();
        let Some(patterns) = WavePatterns::build(&self.config) else {
            tracing::debug!("no geometry yet; config stored for the first size");
            return;
        };
        self.patterns = Some(patterns);
        self.flags.clear(ViewFlags::ANIMATING);
        self.request_redraw();
    }

    fn layout_label(&self) -> Option<LabelLayout> {
        let glyph = self.config.label()?;
        if !self.config.has_geometry() {
            return None;
        }
        let width = self.config.width() as f32;
        let height = self.config.height() as f32;
        let font_size = width / 2.0;
        let bounds = self.glyphs.measure(glyph, font_size);
        Some(LabelLayout {
            glyph,
            origin: ((width - bounds.width) / 2.0, (height + bounds.height) / 2.0),
            font_size,
        })
    }
}

impl std::fmt::Debug for WaveFillView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveFillView")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("shift_ratio", &self.shift_ratio)
            .field("label_layout", &self.label_layout)
            .finish_non_exhaustive()
    }
}
