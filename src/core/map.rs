//! Background map definitions and the crop computation that fits a region of
//! a map into a fixed viewport.

use crate::{
    core::{
        constants::{DEFAULT_MARGIN, MIN_FOCUS_SPAN},
        geo::{GeoBox, Size},
    },
    Result, VisualizerError,
};
use serde::{Deserialize, Serialize};

/// A background image covering a known rectangle of the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub name: String,
    /// URI of the map image
    pub image_ref: String,
    /// Width over height of the image
    pub image_ratio: f64,
    /// Geographic extent drawn by the image
    pub bounds: GeoBox,
    /// Whether the image stays sharp when zoomed in
    pub zoomable: bool,
}

/// Output of [`MapDefinition::get_crop`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropResult {
    /// Rendered width of the whole map image in pixels
    pub width: f64,
    /// Rendered height of the whole map image in pixels
    pub height: f64,
    /// Geographic region visible inside the viewport
    pub bounds: GeoBox,
    /// Pixels of the image hidden left of the viewport
    pub left: f64,
    /// Pixels of the image hidden above the viewport
    pub top: f64,
}

impl CropResult {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl MapDefinition {
    pub fn new(
        name: impl Into<String>,
        image_ref: impl Into<String>,
        image_ratio: f64,
        min_lat: f64,
        max_lat: f64,
        min_long: f64,
        max_long: f64,
    ) -> Self {
        Self {
            name: name.into(),
            image_ref: image_ref.into(),
            image_ratio,
            bounds: GeoBox::new(min_lat, max_lat, min_long, max_long),
            zoomable: false,
        }
    }

    pub fn with_zoomable(mut self, zoomable: bool) -> Self {
        self.zoomable = zoomable;
        self
    }

    /// Belgium, drawn by a bundled SVG
    pub fn belgium() -> Self {
        Self::new(
            "Belgium",
            "resource/belgium.svg",
            1135.92 / 987.997,
            49.2,
            51.77,
            2.19,
            6.87,
        )
    }

    /// Whole world, Miller cylindrical projection
    pub fn earth() -> Self {
        Self::new(
            "Earth",
            "https://upload.wikimedia.org/wikipedia/commons/5/5d/World_map_%28Miller_cylindrical_projection%2C_blank%29.svg",
            634.26 / 476.72,
            -114.5,
            112.5,
            -170.0,
            190.0,
        )
    }

    /// Test if the given box fits inside the map
    pub fn contains_box(&self, bounds: &GeoBox) -> bool {
        self.bounds.contains_box(bounds)
    }

    /// Largest size with the image's aspect ratio that fits inside `width` x `height`
    pub fn fit_to(&self, width: f64, height: f64) -> Size {
        let viewport_ratio = width / height;
        if self.image_ratio > viewport_ratio {
            Size::new(width, width / self.image_ratio)
        } else if self.image_ratio < viewport_ratio {
            Size::new(height * self.image_ratio, height)
        } else {
            Size::new(width, height)
        }
    }

    /// [`Self::get_crop`] with the default margin
    pub fn crop(&self, width: f64, height: f64, focus: &GeoBox) -> Result<CropResult> {
        self.get_crop(width, height, focus, DEFAULT_MARGIN)
    }

    /// Scales and offsets the map image so that `focus`, inflated by `margin`
    /// on each axis, fills a `width` x `height` viewport without distortion.
    ///
    /// The zoom follows the axis with the smaller zoom ratio, so the looser
    /// axis keeps at least the requested margin. When the viewport's aspect
    /// ratio differs enough from the image's that this zoom would cut off
    /// part of the focus box, the other axis' zoom is used instead.
    ///
    /// A focus axis with zero extent is widened to [`MIN_FOCUS_SPAN`] degrees.
    pub fn get_crop(
        &self,
        width: f64,
        height: f64,
        focus: &GeoBox,
        margin: f64,
    ) -> Result<CropResult> {
        if !Size::new(width, height).is_valid() {
            return Err(VisualizerError::InvalidCrop(format!(
                "viewport must be positive, got {}x{}",
                width, height
            )));
        }
        if !margin.is_finite() || margin <= 1.0 {
            return Err(VisualizerError::InvalidCrop(format!(
                "margin must be greater than 1.0, got {}",
                margin
            )));
        }
        if !focus.is_valid() || !focus.lat_span().is_finite() || !focus.long_span().is_finite() {
            return Err(VisualizerError::InvalidCrop(format!(
                "focus box is empty or unbounded: {:?}",
                focus
            )));
        }

        let focus = focus.with_min_span(MIN_FOCUS_SPAN);
        let full_long = self.bounds.long_span();
        let full_lat = self.bounds.lat_span();
        let d_long = focus.long_span();
        let d_lat = focus.lat_span();

        let long_ratio = full_long / (d_long * margin);
        let lat_ratio = full_lat / (d_lat * margin);

        // Only one zoom, we don't want to stretch the picture.
        let by_width = (width * long_ratio, width * long_ratio / self.image_ratio);
        let by_height = (height * lat_ratio * self.image_ratio, height * lat_ratio);
        let (preferred, other) = if long_ratio < lat_ratio {
            (by_width, by_height)
        } else {
            (by_height, by_width)
        };
        // The focus stays visible while neither axis is zoomed past margin 1.
        let shows_focus = |(w, h): (f64, f64)| {
            w <= width * long_ratio * margin * (1.0 + 1e-12)
                && h <= height * lat_ratio * margin * (1.0 + 1e-12)
        };
        let (map_width, map_height) = if shows_focus(preferred) {
            preferred
        } else {
            log::debug!("Zooming {} by the other axis to keep the focus visible", self.name);
            other
        };

        let px_per_lat = map_height / full_lat;
        let px_per_long = map_width / full_long;
        let margin_long = (width / px_per_long - d_long) / 2.0;
        let margin_lat = (height / px_per_lat - d_lat) / 2.0;

        let bounds = focus.expanded(margin_lat, margin_long);
        let left = (bounds.min_long - self.bounds.min_long) * px_per_long;
        let top = (self.bounds.max_lat - bounds.max_lat) * px_per_lat;

        log::debug!(
            "Cropped {} to {:.1}x{:.1} at ({:.1}, {:.1})",
            self.name,
            map_width,
            map_height,
            left,
            top
        );

        Ok(CropResult {
            width: map_width,
            height: map_height,
            bounds,
            left,
            top,
        })
    }
}

/// Ordered collection of background maps, smallest scope first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRegistry {
    maps: Vec<MapDefinition>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self { maps: Vec::new() }
    }

    /// Belgium, then the whole world
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MapDefinition::belgium());
        registry.register(MapDefinition::earth());
        registry
    }

    /// Appends a map with the lowest priority so far
    pub fn register(&mut self, map: MapDefinition) {
        self.maps.push(map);
    }

    /// First registered map whose extent contains `bounds`
    pub fn select(&self, bounds: &GeoBox) -> Option<&MapDefinition> {
        select_map(bounds, &self.maps)
    }

    pub fn get(&self, name: &str) -> Option<&MapDefinition> {
        self.maps.iter().find(|map| map.name == name)
    }

    pub fn maps(&self) -> &[MapDefinition] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Returns the first map in priority order that can show all of `bounds`
pub fn select_map<'a>(bounds: &GeoBox, maps: &'a [MapDefinition]) -> Option<&'a MapDefinition> {
    maps.iter().find(|map| map.contains_box(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn test_map() -> MapDefinition {
        MapDefinition::new("Test", "test.svg", 2.0, 0.0, 10.0, 0.0, 20.0)
    }

    #[test]
    fn test_fit_to_width_constrained() {
        let map = test_map();
        let size = map.fit_to(400.0, 400.0);

        assert_eq!(size.width, 400.0);
        assert_eq!(size.height, 200.0);
    }

    #[test]
    fn test_fit_to_height_constrained() {
        let map = test_map();
        let size = map.fit_to(1000.0, 100.0);

        assert_eq!(size.width, 200.0);
        assert_eq!(size.height, 100.0);
    }

    #[test]
    fn test_fit_to_exact_ratio() {
        let map = test_map();
        assert_eq!(map.fit_to(300.0, 150.0), Size::new(300.0, 150.0));
    }

    #[test]
    fn test_fit_to_preserves_ratio_for_real_maps() {
        for map in MapRegistry::with_defaults().maps() {
            for (w, h) in [(950.0, 800.0), (320.0, 1200.0), (1920.0, 1080.0)] {
                let size = map.fit_to(w, h);
                assert!((size.width / size.height - map.image_ratio).abs() < EPSILON);
                assert!(size.width <= w + EPSILON);
                assert!(size.height <= h + EPSILON);
                assert!(
                    (size.width - w).abs() < EPSILON || (size.height - h).abs() < EPSILON,
                    "one axis must be binding"
                );
            }
        }
    }

    #[test]
    fn test_get_crop_known_values() {
        let map = test_map();
        let focus = GeoBox::new(4.0, 6.0, 8.0, 12.0);
        let crop = map.get_crop(200.0, 100.0, &focus, 1.25).unwrap();

        assert!((crop.width - 800.0).abs() < EPSILON);
        assert!((crop.height - 400.0).abs() < EPSILON);
        assert!((crop.bounds.min_lat - 3.75).abs() < EPSILON);
        assert!((crop.bounds.max_lat - 6.25).abs() < EPSILON);
        assert!((crop.bounds.min_long - 7.5).abs() < EPSILON);
        assert!((crop.bounds.max_long - 12.5).abs() < EPSILON);
        assert!((crop.left - 300.0).abs() < EPSILON);
        assert!((crop.top - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_get_crop_zooms_by_smaller_ratio() {
        let belgium = MapDefinition::belgium();
        let d_lat = 2.57 / (1.96 * 1.2);
        let focus = GeoBox::new(50.0, 50.0 + d_lat, 3.0, 5.0);
        let crop = belgium.get_crop(950.0, 800.0, &focus, 1.2).unwrap();

        // long_ratio 1.95 < lat_ratio 1.96, so the width drives the zoom.
        assert!((crop.width - 950.0 * 1.95).abs() < 1e-6, "{}", crop.width);
        assert!((crop.height - crop.width / belgium.image_ratio).abs() < 1e-6);
        assert!(crop.bounds.contains_box(&focus));
    }

    #[test]
    fn test_get_crop_switches_axis_when_focus_would_be_cut() {
        let map = test_map();
        let focus = GeoBox::new(4.0, 6.0, 8.0, 12.1);
        let crop = map.get_crop(1000.0, 100.0, &focus, 1.25).unwrap();

        // By width the image would be 3902 px tall and show only part of the
        // focus in a 100 px viewport, so the latitude zoom wins.
        assert!((crop.height - 400.0).abs() < EPSILON);
        assert!((crop.width - 800.0).abs() < EPSILON);
        assert!(crop.bounds.contains_box(&focus));
    }

    #[test]
    fn test_get_crop_contains_focus_and_keeps_ratio() {
        let belgium = MapDefinition::belgium();
        let focus = GeoBox::new(50.5, 51.2, 3.7, 5.6);

        for (w, h) in [(950.0, 800.0), (600.0, 900.0), (1200.0, 300.0)] {
            let crop = belgium.crop(w, h, &focus).unwrap();
            assert!(crop.bounds.contains_box(&focus), "{}x{}", w, h);
            assert!((crop.width / crop.height - belgium.image_ratio).abs() < EPSILON);
        }
    }

    #[test]
    fn test_get_crop_margin_grows_visible_box() {
        let belgium = MapDefinition::belgium();
        let focus = GeoBox::new(50.5, 51.2, 3.7, 5.6);

        let tight = belgium.get_crop(950.0, 800.0, &focus, 1.1).unwrap();
        let loose = belgium.get_crop(950.0, 800.0, &focus, 1.5).unwrap();

        assert!(loose.bounds.lat_span() > tight.bounds.lat_span());
        assert!(loose.bounds.long_span() > tight.bounds.long_span());
    }

    #[test]
    fn test_get_crop_visible_box_matches_viewport() {
        let belgium = MapDefinition::belgium();
        let focus = GeoBox::new(50.5, 51.2, 3.7, 5.6);
        let crop = belgium.crop(950.0, 800.0, &focus).unwrap();

        let px_per_long = crop.width / belgium.bounds.long_span();
        let px_per_lat = crop.height / belgium.bounds.lat_span();
        assert!((crop.bounds.long_span() * px_per_long - 950.0).abs() < 1e-6);
        assert!((crop.bounds.lat_span() * px_per_lat - 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_get_crop_guards_collapsed_focus() {
        let belgium = MapDefinition::belgium();
        let single_town = GeoBox::new(50.85, 50.85, 4.35, 4.35);
        let crop = belgium.crop(950.0, 800.0, &single_town).unwrap();

        assert!(crop.width.is_finite() && crop.height.is_finite());
        assert!(crop.bounds.contains_box(&single_town));
    }

    #[test]
    fn test_get_crop_rejects_bad_input() {
        let map = test_map();
        let focus = GeoBox::new(4.0, 6.0, 8.0, 12.0);

        assert!(map.get_crop(200.0, 100.0, &focus, 1.0).is_err());
        assert!(map.get_crop(200.0, 100.0, &focus, f64::NAN).is_err());
        assert!(map.get_crop(0.0, 100.0, &focus, 1.2).is_err());
        assert!(map.get_crop(200.0, 100.0, &GeoBox::empty(), 1.2).is_err());
    }

    #[test]
    fn test_registry_prefers_smallest_scope() {
        let registry = MapRegistry::with_defaults();
        let flanders = GeoBox::new(50.7, 51.3, 3.0, 5.5);

        let map = registry.select(&flanders).unwrap();
        assert_eq!(map.name, "Belgium");
    }

    #[test]
    fn test_registry_falls_back_to_earth_then_none() {
        let registry = MapRegistry::with_defaults();

        let europe = GeoBox::new(40.0, 55.0, -5.0, 20.0);
        assert_eq!(registry.select(&europe).unwrap().name, "Earth");

        let beyond = GeoBox::new(0.0, 10.0, 180.0, 200.0);
        assert!(registry.select(&beyond).is_none());
    }
}
