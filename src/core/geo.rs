use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Pixel dimensions of a rendered surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides strictly positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Rectangle in latitude/longitude space.
///
/// Used for a map's native extent, the extent of all towns in a data file,
/// and the region left visible after cropping a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl GeoBox {
    pub fn new(min_lat: f64, max_lat: f64, min_long: f64, max_long: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_long,
            max_long,
        }
    }

    /// Creates empty bounds (invalid bounds that can be extended)
    pub fn empty() -> Self {
        Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    /// Smallest box containing every given coordinate
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut bounds = Self::empty();
        for point in points {
            bounds.extend(&point);
        }
        bounds
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_long = self.min_long.min(point.lng);
        self.max_long = self.max_long.max(point.lng);
    }

    /// Checks if the bounds are valid (min <= max on both axes)
    pub fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_long <= self.max_long
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn long_span(&self) -> f64 {
        self.max_long - self.min_long
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_long + self.max_long) / 2.0,
        )
    }

    /// True iff `other` lies inside this box on all four edges.
    pub fn contains_box(&self, other: &GeoBox) -> bool {
        self.min_lat <= other.min_lat
            && self.max_lat >= other.max_lat
            && self.min_long <= other.min_long
            && self.max_long >= other.max_long
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_long
            && point.lng <= self.max_long
    }

    /// Returns a copy grown by `d_lat` below and above, `d_long` left and right
    pub fn expanded(&self, d_lat: f64, d_long: f64) -> GeoBox {
        GeoBox::new(
            self.min_lat - d_lat,
            self.max_lat + d_lat,
            self.min_long - d_long,
            self.max_long + d_long,
        )
    }

    /// Widens any axis narrower than `min_span` symmetrically around its center.
    pub fn with_min_span(&self, min_span: f64) -> GeoBox {
        let pad_lat = ((min_span - self.lat_span()) / 2.0).max(0.0);
        let pad_long = ((min_span - self.long_span()) / 2.0).max(0.0);
        self.expanded(pad_lat, pad_long)
    }

    /// Converts a coordinate into fractions of this box.
    ///
    /// `x` grows eastward from the western edge, `y` grows southward from the
    /// northern edge, so the box maps onto `[0, 1] x [0, 1]` in screen order.
    /// Coordinates outside the box land outside that range. A collapsed axis
    /// projects to its middle.
    pub fn project(&self, point: &LatLng) -> Point {
        let long_span = self.long_span();
        let lat_span = self.lat_span();

        let x = if long_span > 0.0 {
            (point.lng - self.min_long) / long_span
        } else {
            0.5
        };
        let y = if lat_span > 0.0 {
            1.0 - (point.lat - self.min_lat) / lat_span
        } else {
            0.5
        };

        Point::new(x, y)
    }
}

impl Default for GeoBox {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}
