//! The visualizer session: loaded data plus everything derived from it.

use crate::{
    animation::playback::{DayCursor, Step},
    core::{
        config::{MarkerConfig, VisualizerOptions},
        constants::MIN_FOCUS_SPAN,
        geo::{GeoBox, Point},
        map::{CropResult, MapDefinition, MapRegistry},
        viewport::Viewport,
    },
    data::simulation::{DayRecord, SimulationData},
    layers::{
        image::MapImageLayer,
        manager::LayerManager,
        marker::{Marker, MarkerLayer},
    },
    rendering::{
        context::RenderContext,
        gradient::{Gradient, ScaledGradient},
        svg::render_svg,
    },
    ui::{legend::Legend, table::Table},
    Result, VisualizerError,
};
use std::path::Path;

const MAP_LAYER: &str = "map";
const TOWN_LAYER: &str = "towns";

/// One loaded simulation, its map placement and the selected day
#[derive(Debug)]
pub struct Session {
    data: SimulationData,
    cursor: DayCursor,
    gradient: ScaledGradient,
    sizing: MarkerConfig,
    map: Option<MapDefinition>,
    viewport: Viewport,
    layers: LayerManager,
}

impl Session {
    /// Selects a map for the towns, crops it to the viewport and shows day 0
    pub fn new(
        data: SimulationData,
        options: &VisualizerOptions,
        registry: &MapRegistry,
    ) -> Result<Self> {
        options.validate()?;
        let gradient = Gradient::by_name(&options.gradient)
            .ok_or_else(|| VisualizerError::UnknownGradient(options.gradient.clone()))?
            .scale(data.max_single() as f64);
        let size = options.viewport.size();
        let mut layers = LayerManager::new();

        let (map, viewport) = if data.towns().is_empty() {
            log::warn!("Simulation has no towns, showing an empty view");
            (None, Viewport::new(size, GeoBox::default()))
        } else {
            let bounds = data.bounds();
            match registry.select(&bounds) {
                Some(map) => {
                    let crop = map.get_crop(size.width, size.height, &bounds, options.margin)?;
                    log::info!(
                        "Selected map {} for {} towns, image {:.0}x{:.0}",
                        map.name,
                        data.towns().len(),
                        crop.width,
                        crop.height
                    );
                    layers.add_layer(Box::new(MapImageLayer::new(
                        MAP_LAYER.to_string(),
                        map,
                        crop,
                    )))?;
                    (Some(map.clone()), Viewport::with_crop(size, crop))
                }
                None => {
                    log::warn!("No map covers {:?}, drawing towns without a background", bounds);
                    (None, Viewport::new(size, bounds.with_min_span(MIN_FOCUS_SPAN)))
                }
            }
        };

        layers.add_layer(Box::new(MarkerLayer::new(
            TOWN_LAYER.to_string(),
            data.towns(),
            &viewport,
        )))?;

        let mut session = Self {
            cursor: DayCursor::new(data.max_days()),
            data,
            gradient,
            sizing: options.markers.clone(),
            map,
            viewport,
            layers,
        };
        session.refresh_markers();
        Ok(session)
    }

    pub fn data(&self) -> &SimulationData {
        &self.data
    }

    /// Zero-based current day
    pub fn day(&self) -> usize {
        self.cursor.day()
    }

    /// One-based current day, as shown to users
    pub fn display_day(&self) -> usize {
        self.cursor.day() + 1
    }

    pub fn max_days(&self) -> usize {
        self.data.max_days()
    }

    pub fn max_single(&self) -> u64 {
        self.data.max_single()
    }

    pub fn max_total(&self) -> u64 {
        self.data.max_total()
    }

    /// Total infections on the current day
    pub fn total_infected(&self) -> u64 {
        self.data
            .day(self.cursor.day())
            .map(DayRecord::total)
            .unwrap_or(0)
    }

    pub fn map(&self) -> Option<&MapDefinition> {
        self.map.as_ref()
    }

    pub fn crop(&self) -> Option<&CropResult> {
        self.viewport.crop.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    /// Jumps to `day`, clamped to the simulated range
    pub fn update_day(&mut self, day: i64) -> usize {
        let day = self.cursor.set(day);
        self.refresh_markers();
        day
    }

    pub fn prev_day(&mut self) -> usize {
        let day = self.cursor.prev();
        self.refresh_markers();
        day
    }

    pub fn next_day(&mut self) -> usize {
        let day = self.cursor.next();
        self.refresh_markers();
        day
    }

    /// One autoplay step
    pub fn advance(&mut self, looping: bool) -> Step {
        let step = self.cursor.advance(looping);
        if step != Step::Finished {
            self.refresh_markers();
        }
        step
    }

    pub fn gradient(&self) -> &ScaledGradient {
        &self.gradient
    }

    /// Switches to a built-in gradient scaled to the largest single count
    pub fn select_gradient(&mut self, name: &str) -> Result<()> {
        let gradient = Gradient::by_name(name)
            .ok_or_else(|| VisualizerError::UnknownGradient(name.to_string()))?;
        self.gradient = gradient.scale(self.data.max_single() as f64);
        if let Some(layer) = self.layers.get_as_mut::<MarkerLayer>(TOWN_LAYER) {
            layer.restyle(&self.gradient);
        }
        log::debug!("Selected gradient {}", name);
        Ok(())
    }

    pub fn table(&self) -> Table {
        Table::for_day(&self.data, self.cursor.day())
    }

    pub fn legend(&self) -> Legend {
        Legend::from_gradient(&self.gradient)
    }

    /// Marker radius for an infection count
    pub fn marker_radius(&self, value: u64) -> f64 {
        self.sizing.radius(value, self.data.max_single())
    }

    pub fn markers(&self) -> &[Marker] {
        self.layers
            .get_as::<MarkerLayer>(TOWN_LAYER)
            .map(MarkerLayer::markers)
            .unwrap_or(&[])
    }

    /// Marker under a viewport pixel, for tooltips
    pub fn marker_at(&self, pixel: &Point) -> Option<&Marker> {
        self.layers
            .get_as::<MarkerLayer>(TOWN_LAYER)
            .and_then(|layer| layer.marker_at(pixel, &self.viewport))
    }

    /// Draws the current day into `context`
    pub fn render(&mut self, context: &mut RenderContext) -> Result<()> {
        context.begin_frame();
        self.layers.render(context, &self.viewport)
    }

    /// Renders the current day as a standalone SVG document
    pub fn to_svg(&mut self) -> Result<String> {
        let mut context = RenderContext::for_viewport(&self.viewport)?;
        self.render(&mut context)?;
        Ok(render_svg(&context))
    }

    fn refresh_markers(&mut self) {
        let empty = DayRecord::default();
        let record = self.data.day(self.cursor.day()).unwrap_or(&empty);
        if let Some(layer) = self.layers.get_as_mut::<MarkerLayer>(TOWN_LAYER) {
            layer.update_day(record, &self.gradient, &self.sizing, self.data.max_single());
        }
    }
}

/// Owns the options, the map registry and the current session.
///
/// A failed load leaves the previous session in place.
pub struct Visualizer {
    options: VisualizerOptions,
    registry: MapRegistry,
    session: Option<Session>,
}

impl Visualizer {
    pub fn new(options: VisualizerOptions) -> Self {
        Self::with_registry(options, MapRegistry::with_defaults())
    }

    pub fn with_registry(options: VisualizerOptions, registry: MapRegistry) -> Self {
        Self {
            options,
            registry,
            session: None,
        }
    }

    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }

    /// Replaces the options, rebuilding the loaded session at the same day
    pub fn set_options(&mut self, options: VisualizerOptions) -> Result<()> {
        options.validate()?;
        if let Some(session) = &self.session {
            let day = session.day();
            let mut rebuilt = Session::new(session.data().clone(), &options, &self.registry)?;
            rebuilt.update_day(day as i64);
            self.session = Some(rebuilt);
        }
        self.options = options;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(VisualizerError::NotLoaded)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(VisualizerError::NotLoaded)
    }

    /// Starts a new session from already parsed data
    pub fn load_data(&mut self, data: SimulationData) -> Result<&mut Session> {
        let session = Session::new(data, &self.options, &self.registry).map_err(|err| {
            log::error!("Failed to build session: {}", err);
            err
        })?;
        log::info!(
            "Loaded {} towns over {} days",
            session.data().towns().len(),
            session.max_days()
        );
        Ok(self.session.insert(session))
    }

    /// Parses simulation JSON text and starts a new session
    pub fn load_str(&mut self, content: &str) -> Result<&mut Session> {
        let data = SimulationData::from_json_str(content).map_err(|err| {
            log::error!("Failed to parse simulation data: {}", err);
            err
        })?;
        self.load_data(data)
    }

    /// Reads a simulation file and starts a new session
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Session> {
        let path = path.as_ref();
        let data = SimulationData::load(path).map_err(|err| {
            log::error!("Failed to load {}: {}", path.display(), err);
            err
        })?;
        self.load_data(data)
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerOptions::default())
    }
}
