//! View configuration.
//!
//! [`ViewAttributes`] is what a host hands over at construction (usually
//! parsed from a TOML attribute file). [`WaveConfig`] is the normalised,
//! always-valid state the view renders from.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::color::Color;
use crate::error::{WaveError, WaveResult};

/// Glyph used when no label, or an empty one, is configured.
pub const DEFAULT_LABEL: char = '贴';
/// Default fill level in percent.
pub const DEFAULT_WATER_PERCENT: f32 = 50.0;
/// Wave amplitude as a fraction of the view height.
pub const AMPLITUDE_RATIO: f32 = 0.1;
/// Alpha factor applied to the tint for the back wave.
pub const BACK_WAVE_ALPHA: f32 = 0.3;

/// Attributes accepted at construction.
///
/// Every key is optional in an attribute file:
///
/// ```toml
/// label = "水"
/// water_color = "#FF2196F3"
/// text_color = "#FFFFFF"
/// water_percent = 65.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewAttributes {
    /// Label text; only its first character is used.
    pub label: String,
    /// Set to `false` to render the circle without a glyph.
    pub show_label: bool,
    /// Tint of the liquid.
    pub water_color: Color,
    /// Tint of the label and of the wave masked through it.
    pub text_color: Color,
    /// Fill level, clamped to `[0, 100]`.
    pub water_percent: f32,
}

impl Default for ViewAttributes {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            show_label: true,
            water_color: Color::BLUE,
            text_color: Color::WHITE,
            water_percent: DEFAULT_WATER_PERCENT,
        }
    }
}

impl ViewAttributes {
    /// Parses attributes from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::Toml`] when the text is not valid TOML or a value
    /// has the wrong type, including malformed colour strings.
    pub fn from_toml_str(text: &str) -> WaveResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads attributes from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> WaveResult<Self> {
        load_toml(path)
    }
}

/// Reads and parses a TOML file into any deserializable type.
///
/// Hosts that embed the view attributes in a larger file (flattened next to
/// their own tables) load it through here too.
///
/// # Errors
///
/// Returns [`WaveError::Io`] when the file cannot be read and
/// [`WaveError::Toml`] when it does not parse into `T`.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> WaveResult<T> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| WaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded attribute file");
    Ok(value)
}

/// Clamps a fill level to `[0, 100]`; NaN becomes 0.
#[must_use]
pub fn normalize_percent(percent: f32) -> f32 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// First character of `label`, or [`DEFAULT_LABEL`] when empty.
#[must_use]
pub fn normalize_label(label: &str) -> char {
    label.chars().next().unwrap_or(DEFAULT_LABEL)
}

/// Normalised rendering configuration.
///
/// Setters return `true` when the stored value actually changed, which is
/// what the view uses to decide whether to rebuild and redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    width: u32,
    height: u32,
    fill_percent: f32,
    water_color: Color,
    label: Option<char>,
    label_color: Color,
}

impl WaveConfig {
    /// Creates a configuration with no geometry yet.
    #[must_use]
    pub fn from_attributes(attrs: &ViewAttributes) -> Self {
        Self {
            width: 0,
            height: 0,
            fill_percent: normalize_percent(attrs.water_percent),
            water_color: attrs.water_color,
            label: attrs.show_label.then(|| normalize_label(&attrs.label)),
            label_color: attrs.text_color,
        }
    }

    /// Canvas width in pixels (0 until sized).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels (0 until sized).
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True once both dimensions are positive.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Fill level in `[0, 100]`.
    #[must_use]
    pub fn fill_percent(&self) -> f32 {
        self.fill_percent
    }

    /// Liquid tint.
    #[must_use]
    pub fn water_color(&self) -> Color {
        self.water_color
    }

    /// Label glyph, if any.
    #[must_use]
    pub fn label(&self) -> Option<char> {
        self.label
    }

    /// Label tint.
    #[must_use]
    pub fn label_color(&self) -> Color {
        self.label_color
    }

    /// Wave amplitude ratio (fixed).
    #[must_use]
    pub fn amplitude_ratio(&self) -> f32 {
        AMPLITUDE_RATIO
    }

    /// Back wave alpha factor (fixed).
    #[must_use]
    pub fn back_alpha(&self) -> f32 {
        BACK_WAVE_ALPHA
    }

    /// Row of the fill line: `H × (1 − p/100)`.
    #[must_use]
    pub fn water_level(&self) -> f32 {
        self.height as f32 * (1.0 - self.fill_percent / 100.0)
    }

    /// Sets the canvas size.
    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        let changed = (self.width, self.height) != (width, height);
        self.width = width;
        self.height = height;
        changed
    }

    /// Sets the fill level, clamping it to `[0, 100]`.
    #[allow(clippy::float_cmp)]
    pub fn set_fill_percent(&mut self, percent: f32) -> bool {
        let percent = normalize_percent(percent);
        let changed = percent != self.fill_percent;
        self.fill_percent = percent;
        changed
    }

    /// Sets the liquid tint.
    pub fn set_water_color(&mut self, color: Color) -> bool {
        let changed = color != self.water_color;
        self.water_color = color;
        changed
    }

    /// Sets the label tint.
    pub fn set_label_color(&mut self, color: Color) -> bool {
        let changed = color != self.label_color;
        self.label_color = color;
        changed
    }

    /// Sets the label to the first character of `label`, or the default glyph
    /// when `label` is empty.
    pub fn set_label(&mut self, label: &str) -> bool {
        let label = Some(normalize_label(label));
        let changed = label != self.label;
        self.label = label;
        changed
    }

    /// Removes the label.
    pub fn clear_label(&mut self) -> bool {
        self.label.take().is_some()
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::from_attributes(&ViewAttributes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(percent: f32) -> WaveConfig {
        let mut config = WaveConfig::from_attributes(&ViewAttributes {
            water_percent: percent,
            ..ViewAttributes::default()
        });
        config.set_size(100, 100);
        config
    }

    #[test]
    fn test_percent_is_clamped() {
        for (input, expected) in [(150.0, 100.0), (-10.0, 0.0), (42.5, 42.5), (f32::NAN, 0.0)] {
            assert_eq!(sized(input).fill_percent(), expected, "input {input}");
        }
    }

    #[test]
    fn test_water_level_is_linear() {
        assert_eq!(sized(50.0).water_level(), 50.0);
        assert_eq!(sized(0.0).water_level(), 100.0);
        assert_eq!(sized(100.0).water_level(), 0.0);
        assert_eq!(sized(25.0).water_level(), 75.0);
    }

    #[test]
    fn test_label_is_truncated_or_defaulted() {
        let mut config = WaveConfig::default();
        assert_eq!(config.label(), Some(DEFAULT_LABEL));

        assert!(config.set_label("AB"));
        assert_eq!(config.label(), Some('A'));

        assert!(config.set_label(""));
        assert_eq!(config.label(), Some(DEFAULT_LABEL));

        assert!(config.clear_label());
        assert_eq!(config.label(), None);
        assert!(!config.clear_label());
    }

    #[test]
    fn test_setters_report_no_change() {
        let mut config = sized(50.0);
        assert!(!config.set_fill_percent(50.0));
        assert!(!config.set_fill_percent(50.0));
        assert!(!config.set_water_color(Color::BLUE));
        assert!(!config.set_label_color(Color::WHITE));
        assert!(!config.set_size(100, 100));

        let mut clamped = sized(100.0);
        assert!(!clamped.set_fill_percent(250.0));
    }

    #[test]
    fn test_attributes_from_toml() {
        let attrs = ViewAttributes::from_toml_str(
            r##"
            label = "水滴"
            water_color = "#FF2196F3"
            water_percent = 65.0
            "##,
        )
        .unwrap();

        assert_eq!(attrs.label, "水滴");
        assert_eq!(attrs.water_color, Color::argb(0xFF21_96F3));
        assert_eq!(attrs.text_color, Color::WHITE);

        let config = WaveConfig::from_attributes(&attrs);
        assert_eq!(config.label(), Some('水'));
        assert_eq!(config.fill_percent(), 65.0);
    }

    #[test]
    fn test_attributes_reject_bad_colour() {
        let err = ViewAttributes::from_toml_str(r##"water_color = "blue""##).unwrap_err();
        assert!(matches!(err, WaveError::Toml(_)));
        assert!(err.to_string().contains("invalid colour"));
    }

    #[test]
    fn test_hidden_label() {
        let attrs = ViewAttributes::from_toml_str("show_label = false").unwrap();
        assert_eq!(WaveConfig::from_attributes(&attrs).label(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ViewAttributes::load("/nonexistent/wavefill.toml").unwrap_err();
        assert!(matches!(err, WaveError::Io { .. }));
    }
}
