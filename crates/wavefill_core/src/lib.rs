//! # WAVEFILL Core
//!
//! Everything the liquid-fill indicator needs that does not depend on a view
//! lifecycle:
//! - Wave pattern synthesis into a tileable pixel buffer
//! - The shader transform that scrolls the pattern
//! - A software rasterizer implementing the drawing-surface capability
//! - Square measurement and attribute parsing
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     WAVE PIPELINE                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  Size change → Synthesis → WavePattern (repeat-x/clamp-y) │
//! │  Tick        → Transform → Fill::Pattern → DrawSurface    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod color;
pub mod config;
pub mod error;
pub mod glyph;
pub mod measure;
pub mod pattern;
pub mod raster;
pub mod surface;
pub mod transform;

pub use color::{Color, Rgba8};
pub use config::{load_toml, ViewAttributes, WaveConfig, DEFAULT_LABEL};
pub use error::{WaveError, WaveResult};
pub use glyph::{BlockFont, GlyphMetrics, TextBounds};
pub use measure::{measure_square, MeasureSpec, Rect, Size};
pub use pattern::{WaveGeometry, WavePattern, WavePatterns};
pub use raster::{PixelCanvas, Pixmap};
pub use surface::{DrawSurface, Fill, Paint};
pub use transform::Transform;
