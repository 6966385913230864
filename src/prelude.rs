//! Prelude module for common epimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use epimap::prelude::*;`

pub use crate::core::{
    config::{MarkerConfig, PlaybackConfig, ViewportConfig, VisualizerOptions},
    geo::{GeoBox, LatLng, Point, Size},
    map::{select_map, CropResult, MapDefinition, MapRegistry},
    viewport::Viewport,
};

pub use crate::data::simulation::{find_box, DayRecord, SimulationData, Town};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    image::MapImageLayer,
    manager::LayerManager,
    marker::{Marker, MarkerLayer},
};

pub use crate::animation::playback::{DayCursor, PlaybackTick, Step};

#[cfg(feature = "tokio-runtime")]
pub use crate::animation::playback::Autoplay;

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::rendering::{
    context::{DrawCommand, PointRenderStyle, RenderContext},
    gradient::{Color, Gradient, ScaledGradient},
    svg::render_svg,
};

pub use crate::ui::{Legend, LegendItem, Table, TableRow};

#[cfg(feature = "egui")]
pub use crate::ui::components::*;

pub use crate::visualizer::{Session, Visualizer};

pub use crate::{Result, VisualizerError};

pub use std::time::Duration;

pub use fxhash::FxHashMap as HashMap;
