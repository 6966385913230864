//! Engine-wide defaults for the visualizer.
//! Keeping them in a single place makes it easier to tweak magic numbers.

/// Width of the map viewport in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 950.0;

/// Height of the map viewport in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Multiplicative breathing room around the towns when cropping a map.
pub const DEFAULT_MARGIN: f64 = 1.2;

/// Smallest focus span (degrees) used when all towns share a latitude or longitude.
pub const MIN_FOCUS_SPAN: f64 = 0.01;

/// Marker radius multiplier applied to the square-root scale.
pub const MARKER_SCALE: f64 = 8.0;

/// Radius of a marker with zero infections.
pub const MARKER_MIN_RADIUS: f64 = 2.0;

/// Delay between two autoplay steps.
pub const DEFAULT_RUN_SPEED_MS: u64 = 60;

/// Gradient selected right after loading a file.
pub const DEFAULT_GRADIENT: &str = "Ultra heat map";

/// Digits shown after the decimal point in table percentages.
pub const PERCENT_DIGITS: usize = 1;
