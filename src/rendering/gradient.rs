//! Colour gradients used to colour town markers by infection count.
//!
//! A [`Gradient`] is defined on normalized positions in `[0, 1]`. Scaling it
//! to the largest value of a data set yields a [`ScaledGradient`] whose stops
//! are in data units and double as legend entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB colour with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear blend, `t = 0` gives `self` and `t = 1` gives `other`
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// `#rrggbb`, alpha ignored
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// A named gradient over normalized positions
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    name: String,
    stops: Vec<(f64, Color)>,
}

impl Gradient {
    /// Stops are sorted by position; positions are expected in `[0, 1]`
    pub fn new(name: impl Into<String>, mut stops: Vec<(f64, Color)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            name: name.into(),
            stops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All built-in gradients, the default first
    pub fn presets() -> Vec<Gradient> {
        vec![
            Gradient::new(
                "Ultra heat map",
                vec![
                    (0.0, Color::rgb(255, 255, 255)),
                    (0.15, Color::rgb(255, 255, 0)),
                    (0.4, Color::rgb(255, 128, 0)),
                    (0.7, Color::rgb(255, 0, 0)),
                    (1.0, Color::rgb(64, 0, 0)),
                ],
            ),
            Gradient::new(
                "Heat map",
                vec![(0.0, Color::rgb(255, 255, 0)), (1.0, Color::rgb(255, 0, 0))],
            ),
            Gradient::new(
                "Blue to red",
                vec![
                    (0.0, Color::rgb(0, 0, 255)),
                    (0.5, Color::rgb(160, 0, 160)),
                    (1.0, Color::rgb(255, 0, 0)),
                ],
            ),
            Gradient::new("Grayscale", vec![(0.0, Color::WHITE), (1.0, Color::BLACK)]),
        ]
    }

    /// Names of the built-in gradients
    pub fn names() -> Vec<String> {
        Self::presets().into_iter().map(|g| g.name).collect()
    }

    /// Looks up a built-in gradient
    pub fn by_name(name: &str) -> Option<Gradient> {
        Self::presets().into_iter().find(|g| g.name == name)
    }

    /// Maps the gradient onto `[0, max]`
    pub fn scale(&self, max: f64) -> ScaledGradient {
        let max = if max.is_finite() && max > 0.0 { max } else { 0.0 };
        ScaledGradient {
            name: self.name.clone(),
            max,
            colour_map: self
                .stops
                .iter()
                .map(|(position, colour)| ColourStop {
                    val: position * max,
                    colour: *colour,
                })
                .collect(),
        }
    }
}

/// A gradient stop in data units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColourStop {
    pub val: f64,
    pub colour: Color,
}

/// A gradient scaled to a data range
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledGradient {
    name: String,
    max: f64,
    /// Ordered legend stops
    pub colour_map: Vec<ColourStop>,
}

impl ScaledGradient {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Colour for `value`, clamped to the first and last stop
    pub fn get(&self, value: f64) -> Color {
        let (first, last) = match (self.colour_map.first(), self.colour_map.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::BLACK,
        };
        if value <= first.val {
            return first.colour;
        }
        if value >= last.val {
            return last.colour;
        }

        for pair in self.colour_map.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if value >= low.val && value <= high.val {
                let width = high.val - low.val;
                if width <= 0.0 {
                    return high.colour;
                }
                return low.colour.lerp(&high.colour, (value - low.val) / width);
            }
        }

        last.colour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_unique_and_default_first() {
        let names = Gradient::names();
        assert_eq!(names[0], "Ultra heat map");

        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_scale_puts_stops_in_data_units() {
        let gradient = Gradient::by_name("Heat map").unwrap().scale(200.0);

        assert_eq!(gradient.colour_map.len(), 2);
        assert_eq!(gradient.colour_map[0].val, 0.0);
        assert_eq!(gradient.colour_map[1].val, 200.0);
    }

    #[test]
    fn test_get_interpolates_and_clamps() {
        let gradient = Gradient::new("Test", vec![(0.0, Color::BLACK), (1.0, Color::WHITE)])
            .scale(100.0);

        assert_eq!(gradient.get(-5.0), Color::BLACK);
        assert_eq!(gradient.get(0.0), Color::BLACK);
        assert_eq!(gradient.get(50.0), Color::rgb(128, 128, 128));
        assert_eq!(gradient.get(100.0), Color::WHITE);
        assert_eq!(gradient.get(1e9), Color::WHITE);
    }

    #[test]
    fn test_zero_max_collapses_to_first_colour() {
        let gradient = Gradient::by_name("Grayscale").unwrap().scale(0.0);
        assert_eq!(gradient.get(0.0), Color::WHITE);
    }

    #[test]
    fn test_color_formatting() {
        assert_eq!(Color::rgb(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Color::new(0, 0, 0, 0).to_string(), "rgba(0, 0, 0, 0.000)");
    }
}
