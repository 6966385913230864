use crate::{
    core::{geo::Point, viewport::Viewport},
    rendering::gradient::Color,
    Result, VisualizerError,
};

/// Styles for different rendering primitives
#[derive(Debug, Clone, PartialEq)]
pub struct PointRenderStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub radius: f32,
    pub opacity: f32,
}

impl Default for PointRenderStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgb(255, 0, 0),
            stroke_color: Color::rgb(60, 60, 60),
            stroke_width: 0.5,
            radius: 5.0,
            opacity: 1.0,
        }
    }
}

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Background image, positioned by its top-left corner
    Image {
        href: String,
        bounds: (Point, Point), // min, max screen coordinates
        opacity: f32,
    },
    Point {
        position: Point,
        style: PointRenderStyle,
        /// Tooltip text
        label: Option<String>,
    },
}

/// Backend-agnostic frame: a viewport size and an ordered list of draw commands
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    /// Drawing primitives queue, consumed by the SVG writer or a UI painter
    pub drawing_queue: Vec<DrawCommand>,
    /// Viewport clipping bounds (min, max) in screen coordinates
    pub clip_bounds: Option<(Point, Point)>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VisualizerError::Render(format!(
                "render target must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            drawing_queue: Vec::new(),
            clip_bounds: None,
        })
    }

    /// A context matching the viewport's pixel size
    pub fn for_viewport(viewport: &Viewport) -> Result<Self> {
        let (width, height) = viewport.pixel_size();
        Self::new(width, height)
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
        self.clip_bounds = Some((
            Point::new(0.0, 0.0),
            Point::new(self.width as f64, self.height as f64),
        ));
    }

    /// Queue an image covering `bounds`
    pub fn render_image(&mut self, href: &str, bounds: (Point, Point), opacity: f32) -> Result<()> {
        if bounds.0.x >= bounds.1.x || bounds.0.y >= bounds.1.y {
            return Err(VisualizerError::Render("Invalid image bounds".to_string()));
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(VisualizerError::Render(
                "Opacity must be between 0.0 and 1.0".to_string(),
            ));
        }

        self.drawing_queue.push(DrawCommand::Image {
            href: href.to_string(),
            bounds,
            opacity,
        });
        Ok(())
    }

    /// Render a point at the given position with the given style
    pub fn render_point(
        &mut self,
        position: &Point,
        style: &PointRenderStyle,
        label: Option<&str>,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Point {
            position: *position,
            style: style.clone(),
            label: label.map(str::to_string),
        });
        Ok(())
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Whether a point lies within the clip rectangle
    pub fn is_visible(&self, position: &Point) -> bool {
        match self.clip_bounds {
            Some((min, max)) => {
                position.x >= min.x && position.x <= max.x && position.y >= min.y && position.y <= max.y
            }
            None => true,
        }
    }
}
