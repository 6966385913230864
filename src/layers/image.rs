use crate::{
    core::{
        geo::{GeoBox, Point},
        map::{CropResult, MapDefinition},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::RenderContext,
    Result,
};

/// The selected background map, scaled and shifted by its crop
pub struct MapImageLayer {
    properties: LayerProperties,
    url: String,
    map_bounds: GeoBox,
    crop: CropResult,
}

impl MapImageLayer {
    pub fn new(id: String, map: &MapDefinition, crop: CropResult) -> Self {
        let properties = LayerProperties::new(id, map.name.clone(), LayerType::Image);
        Self {
            properties,
            url: map.image_ref.clone(),
            map_bounds: map.bounds,
            crop,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn crop(&self) -> &CropResult {
        &self.crop
    }

    /// Screen rectangle covered by the whole image
    pub fn screen_bounds(&self) -> (Point, Point) {
        let min = Point::new(-self.crop.left, -self.crop.top);
        let max = Point::new(min.x + self.crop.width, min.y + self.crop.height);
        (min, max)
    }
}

impl LayerTrait for MapImageLayer {
    crate::impl_layer_trait!(MapImageLayer, properties);

    fn bounds(&self) -> Option<GeoBox> {
        Some(self.map_bounds)
    }

    fn render(&mut self, context: &mut RenderContext, _viewport: &Viewport) -> Result<()> {
        context.render_image(&self.url, self.screen_bounds(), self.properties.opacity)
    }
}
