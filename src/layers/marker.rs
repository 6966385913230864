use crate::{
    core::{
        config::MarkerConfig,
        geo::{GeoBox, LatLng, Point},
        viewport::Viewport,
    },
    data::simulation::{DayRecord, Town},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::{
        context::{PointRenderStyle, RenderContext},
        gradient::{Color, ScaledGradient},
    },
    ui::table::no_space,
    Result,
};

/// One town's circle on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub town_index: usize,
    /// Town name with whitespace removed, shared with the table row
    pub id: String,
    pub name: String,
    pub position: LatLng,
    /// Position as fractions of the viewport, fixed once the crop is known
    pub projected: Point,
    pub count: u64,
    pub radius: f64,
    pub fill: Color,
}

/// Town markers, resized and recoloured for every displayed day
pub struct MarkerLayer {
    properties: LayerProperties,
    markers: Vec<Marker>,
    style: PointRenderStyle,
}

impl MarkerLayer {
    /// Creates one marker per town, projected onto `viewport`
    pub fn new(id: String, towns: &[Town], viewport: &Viewport) -> Self {
        let style = PointRenderStyle::default();
        let markers = towns
            .iter()
            .enumerate()
            .map(|(town_index, town)| {
                let position = town.position();
                Marker {
                    town_index,
                    id: no_space(&town.name),
                    name: town.name.clone(),
                    position,
                    projected: viewport.project(&position),
                    count: 0,
                    radius: style.radius as f64,
                    fill: style.fill_color,
                }
            })
            .collect();

        Self {
            properties: LayerProperties::new(id, "Towns".to_string(), LayerType::Marker)
                .with_z_index(1),
            markers,
            style,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, town_index: usize) -> Option<&Marker> {
        self.markers.get(town_index)
    }

    /// Applies the counts of `day` to every marker
    pub fn update_day(
        &mut self,
        day: &DayRecord,
        gradient: &ScaledGradient,
        sizing: &MarkerConfig,
        max_single: u64,
    ) {
        for marker in &mut self.markers {
            let count = day.count(marker.town_index);
            marker.count = count;
            marker.radius = sizing.radius(count, max_single);
            marker.fill = gradient.get(count as f64);
        }
    }

    /// Recolours markers after a gradient change, keeping their counts
    pub fn restyle(&mut self, gradient: &ScaledGradient) {
        for marker in &mut self.markers {
            marker.fill = gradient.get(marker.count as f64);
        }
    }

    /// Topmost marker under a viewport pixel
    pub fn marker_at(&self, pixel: &Point, viewport: &Viewport) -> Option<&Marker> {
        self.markers.iter().rev().find(|marker| {
            viewport.fraction_to_pixel(&marker.projected).distance_to(pixel) <= marker.radius
        })
    }
}

impl LayerTrait for MarkerLayer {
    crate::impl_layer_trait!(MarkerLayer, properties);

    fn bounds(&self) -> Option<GeoBox> {
        if self.markers.is_empty() {
            return None;
        }
        Some(GeoBox::from_points(self.markers.iter().map(|m| m.position)))
    }

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        for marker in &self.markers {
            let style = PointRenderStyle {
                fill_color: marker.fill,
                radius: marker.radius as f32,
                opacity: self.properties.opacity,
                ..self.style.clone()
            };
            let label = format!("{}: {}", marker.name, marker.count);
            context.render_point(
                &viewport.fraction_to_pixel(&marker.projected),
                &style,
                Some(&label),
            )?;
        }
        Ok(())
    }
}
