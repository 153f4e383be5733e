//! Animation configuration.
//!
//! Figure size, frame timing and marker styling. With the `serde` feature the
//! configuration can be loaded from any serde format; missing fields fall
//! back to the defaults below.

use std::time::Duration;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::scale::Palette;

/// Settings shared by every frame of an animation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Figure width in pixels.
    pub width: u32,

    /// Figure height in pixels.
    pub height: u32,

    /// Gap between the figure edge and the plot area, in pixels.
    pub margin: u32,

    /// Delay between frames in milliseconds.
    pub interval_ms: u64,

    /// Marker diameter in pixels.
    pub marker_size: f32,

    /// Fraction of the data extent added on each side of the axes.
    pub padding: f32,

    /// Number of times the animation plays; 0 loops forever.
    pub loop_count: u32,

    /// Figure background.
    pub background: Rgba,

    /// Color of the axes frame.
    pub axis_color: Rgba,

    /// Draw a frame around the plot area.
    pub draw_axes: bool,

    /// Palette used to color labels.
    pub palette: Palette,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 40,
            interval_ms: 100,
            // s=50 in point^2 is about 7 px across at 100 dpi
            marker_size: 7.0,
            padding: 0.05,
            loop_count: 0,
            background: Rgba::WHITE,
            axis_color: Rgba::BLACK,
            draw_axes: true,
            palette: Palette::Tab10,
        }
    }
}

impl AnimationConfig {
    /// Delay between frames.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Pixel rectangle inside the margins.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        let margin = self.margin as f32;
        Rect::new(
            margin,
            margin,
            self.width as f32 - 2.0 * margin,
            self.height as f32 - 2.0 * margin,
        )
    }

    /// Check that the configuration can produce an animation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when the margins leave no plot
    /// area, and [`Error::InvalidConfig`] for a zero or oversized interval or
    /// a non-positive marker size or negative padding.
    pub fn validate(&self) -> Result<()> {
        let min_side = self.margin.saturating_mul(2);
        if self.width <= min_side || self.height <= min_side {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }

        // APNG stores the delay as a u16 fraction
        if self.interval_ms == 0 || self.interval_ms > u64::from(u16::MAX) {
            return Err(Error::InvalidConfig(format!(
                "interval must be between 1 and {} ms, got {}",
                u16::MAX,
                self.interval_ms
            )));
        }

        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "marker size must be positive, got {}",
                self.marker_size
            )));
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnimationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_plot_area() {
        let config = AnimationConfig { width: 200, height: 100, margin: 10, ..Default::default() };
        assert_eq!(config.plot_area(), Rect::new(10.0, 10.0, 180.0, 80.0));
    }

    #[test]
    fn test_margins_too_large() {
        let config = AnimationConfig { width: 80, height: 600, margin: 40, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidDimensions { width: 80, .. })));
    }

    #[test]
    fn test_interval_bounds() {
        let zero = AnimationConfig { interval_ms: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(Error::InvalidConfig(_))));

        let huge = AnimationConfig { interval_ms: 70_000, ..Default::default() };
        assert!(matches!(huge.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_marker_size_and_padding() {
        let nan = AnimationConfig { marker_size: f32::NAN, ..Default::default() };
        assert!(nan.validate().is_err());

        let negative = AnimationConfig { padding: -0.1, ..Default::default() };
        assert!(negative.validate().is_err());
    }
}
