use crate::rendering::gradient::{Color, ScaledGradient};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    /// Stop value rounded to the nearest integer
    pub label: String,
    pub value: f64,
    pub colour: Color,
}

/// Colour legend listing the stops of the active gradient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub gradient: String,
    pub items: Vec<LegendItem>,
}

impl Legend {
    pub fn from_gradient(gradient: &ScaledGradient) -> Self {
        let items = gradient
            .colour_map
            .iter()
            .map(|stop| LegendItem {
                label: format!("{}", stop.val.round() as i64),
                value: stop.val,
                colour: stop.colour,
            })
            .collect();

        Self {
            gradient: gradient.name().to_string(),
            items,
        }
    }
}
