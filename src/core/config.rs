//! Configuration for the visualizer session
//!
//! Options are grouped per concern and can be loaded from a JSON file; any
//! field missing from the file keeps its default.

use crate::core::constants::{
    DEFAULT_GRADIENT, DEFAULT_MARGIN, DEFAULT_RUN_SPEED_MS, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH, MARKER_MIN_RADIUS, MARKER_SCALE,
};
use crate::core::geo::Size;
use crate::{Result, VisualizerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerOptions {
    pub viewport: ViewportConfig,
    /// Inflation factor applied to the towns' extent before cropping
    pub margin: f64,
    pub markers: MarkerConfig,
    pub playback: PlaybackConfig,
    /// Name of the gradient selected after loading
    pub gradient: String,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            margin: DEFAULT_MARGIN,
            markers: MarkerConfig::default(),
            playback: PlaybackConfig::default(),
            gradient: DEFAULT_GRADIENT.to_string(),
        }
    }
}

impl VisualizerOptions {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.viewport.size();
        if !size.is_valid() || size.width < 1.0 || size.height < 1.0 {
            return Err(VisualizerError::ParseError(format!(
                "viewport must be at least 1x1 px, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.margin.is_finite() || self.margin <= 1.0 {
            return Err(VisualizerError::ParseError(format!(
                "margin must be greater than 1.0, got {}",
                self.margin
            )));
        }
        if self.markers.scale < 0.0 || self.markers.min_radius < 0.0 {
            return Err(VisualizerError::ParseError(
                "marker sizes must not be negative".to_string(),
            ));
        }
        if self.playback.run_speed_ms == 0 {
            return Err(VisualizerError::ParseError(
                "run speed must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl ViewportConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub scale: f64,
    pub min_radius: f64,
}

impl MarkerConfig {
    /// Square-root marker scale, so that marker area grows with the count.
    ///
    /// `max_single` is the largest count of any town on any day; the largest
    /// marker gets radius `scale + min_radius`.
    pub fn radius(&self, value: u64, max_single: u64) -> f64 {
        if max_single == 0 {
            return self.min_radius;
        }
        (value as f64).sqrt() * self.scale / (max_single as f64).sqrt() + self.min_radius
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            scale: MARKER_SCALE,
            min_radius: MARKER_MIN_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between autoplay steps
    pub run_speed_ms: u64,
    /// Restart from the first day after the last one
    pub looping: bool,
}

impl PlaybackConfig {
    pub fn run_interval(&self) -> Duration {
        Duration::from_millis(self.run_speed_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            run_speed_ms: DEFAULT_RUN_SPEED_MS,
            looping: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = VisualizerOptions::default();

        assert_eq!(options.viewport.size(), Size::new(950.0, 800.0));
        assert_eq!(options.margin, 1.2);
        assert_eq!(options.playback.run_interval(), Duration::from_millis(60));
        assert!(!options.playback.looping);
        assert_eq!(options.gradient, "Ultra heat map");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = VisualizerOptions::from_json_str(
            r#"{ "margin": 1.5, "playback": { "looping": true } }"#,
        )
        .unwrap();

        assert_eq!(options.margin, 1.5);
        assert!(options.playback.looping);
        assert_eq!(options.playback.run_speed_ms, 60);
        assert_eq!(options.markers, MarkerConfig::default());
    }

    #[test]
    fn test_invalid_margin_rejected() {
        let err = VisualizerOptions::from_json_str(r#"{ "margin": 0.9 }"#).unwrap_err();
        assert!(matches!(err, VisualizerError::ParseError(_)));
    }

    #[test]
    fn test_sub_pixel_viewport_rejected() {
        let err = VisualizerOptions::from_json_str(r#"{ "viewport": { "width": 0.4 } }"#)
            .unwrap_err();
        assert!(matches!(err, VisualizerError::ParseError(_)));
        assert!(VisualizerOptions::from_json_str(r#"{ "viewport": { "width": 1, "height": 1 } }"#)
            .is_ok());
    }

    #[test]
    fn test_marker_radius() {
        let markers = MarkerConfig::default();

        assert!((markers.radius(10, 10) - 10.0).abs() < 1e-9);
        assert_eq!(markers.radius(0, 10), 2.0);
        assert_eq!(markers.radius(5, 0), 2.0);
        assert!(markers.radius(4, 100) < markers.radius(9, 100));
    }
}
