//! # WAVEFILL UI
//!
//! The animated liquid-fill indicator as a host-agnostic view:
//! - [`WaveFillView`] owns configuration, patterns and the shift animator
//! - Hosts call lifecycle hooks (`on_size_changed`, `on_attached`,
//!   `on_detached`), `tick` from a fixed-interval timer, and `draw` into any
//!   [`wavefill_core::DrawSurface`] whenever a redraw was requested
//!
//! ## Lifecycle
//!
//! ```text
//! Unconfigured ──size──▶ Sized ──tick──▶ Animating ──detach──▶ TornDown
//!                          ▲                 │
//!                          └──── resize ─────┘ (animator keeps running)
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod animation;
pub mod render;
pub mod widget;

pub use animation::WaveShiftAnimator;
pub use render::{RecordedFill, RecordingSurface, RenderCommand};
pub use widget::{LabelLayout, ViewFlags, ViewPhase, WaveFillView};
