use crate::core::{
    geo::{GeoBox, LatLng, Point, Size},
    map::CropResult,
};
use serde::{Deserialize, Serialize};

/// The fixed-size window the map is drawn into and the region it shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The size of the viewport in pixels
    pub size: Size,
    /// Geographic region spanning the viewport edge to edge
    pub visible: GeoBox,
    /// Placement of the background image, if a map was selected
    pub crop: Option<CropResult>,
}

impl Viewport {
    /// A viewport with no background map, showing `visible` directly
    pub fn new(size: Size, visible: GeoBox) -> Self {
        Self {
            size,
            visible,
            crop: None,
        }
    }

    /// A viewport aligned with a cropped background map
    pub fn with_crop(size: Size, crop: CropResult) -> Self {
        Self {
            size,
            visible: crop.bounds,
            crop: Some(crop),
        }
    }

    /// Converts a geographical coordinate to fractions of the viewport
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        self.visible.project(lat_lng)
    }

    /// Converts a geographical coordinate to viewport pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.fraction_to_pixel(&self.project(lat_lng))
    }

    /// Whole-pixel size of the render target
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.size.width.round() as u32,
            self.size.height.round() as u32,
        )
    }

    /// Scales a `[0, 1]` fraction pair to pixels
    pub fn fraction_to_pixel(&self, fraction: &Point) -> Point {
        Point::new(fraction.x * self.size.width, fraction.y * self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::MapDefinition;

    #[test]
    fn test_plain_viewport_pixels() {
        let viewport = Viewport::new(Size::new(200.0, 100.0), GeoBox::new(0.0, 10.0, 0.0, 20.0));
        let pixel = viewport.lat_lng_to_pixel(&LatLng::new(5.0, 5.0));

        assert!((pixel.x - 50.0).abs() < 1e-9);
        assert!((pixel.y - 50.0).abs() < 1e-9);
        assert!(viewport.crop.is_none());
    }

    #[test]
    fn test_cropped_viewport_aligns_with_image() {
        let map = MapDefinition::new("Test", "test.svg", 2.0, 0.0, 10.0, 0.0, 20.0);
        let crop = map
            .get_crop(200.0, 100.0, &GeoBox::new(4.0, 6.0, 8.0, 12.0), 1.25)
            .unwrap();
        let viewport = Viewport::with_crop(Size::new(200.0, 100.0), crop);

        // A point drawn on the full image at (x, y) appears at (x - left, y - top).
        let target = LatLng::new(5.0, 10.0);
        let on_image_x = target.lng / 20.0 * crop.width;
        let on_image_y = (10.0 - target.lat) / 10.0 * crop.height;
        let pixel = viewport.lat_lng_to_pixel(&target);

        assert!((pixel.x - (on_image_x - crop.left)).abs() < 1e-9);
        assert!((pixel.y - (on_image_y - crop.top)).abs() < 1e-9);
    }
}
