pub mod context;
pub mod gradient;
pub mod svg;

// Re-export main types
pub use context::{DrawCommand, PointRenderStyle, RenderContext};
pub use gradient::{Color, ColourStop, Gradient, ScaledGradient};
pub use svg::render_svg;
