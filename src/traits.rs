//! Shared trait abstractions

use crate::{
    core::{geo::GeoBox, viewport::Viewport},
    rendering::context::RenderContext,
    Result,
};

/// Trait for layer-like objects drawn onto the map viewport
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> crate::layers::base::LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Render the layer
    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()>;

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<GeoBox> {
        None
    }

    /// Check if layer overlaps the given region
    fn intersects_bounds(&self, bounds: &GeoBox) -> bool {
        match self.bounds() {
            Some(own) => {
                !(own.max_long < bounds.min_long
                    || own.min_long > bounds.max_long
                    || own.max_lat < bounds.min_lat
                    || own.min_lat > bounds.max_lat)
            }
            None => true,
        }
    }

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
