//! # epimap
//!
//! Map and table visualizer for epidemic simulation output.
//!
//! A simulation file lists towns (name, population, coordinates) and a sparse
//! per-day infection count for each town. This crate loads such a file, picks
//! the smallest registered background map that covers every town, crops and
//! scales that map so the towns fill a fixed viewport, and renders one frame
//! per simulated day: a marker per town sized and coloured by its infection
//! count, plus a table and a colour legend.
//!
//! The library is headless. Front ends drive a [`Visualizer`] and consume its
//! draw commands, table and legend models; [`rendering::svg`] serializes a
//! frame directly.

pub mod animation;
pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod rendering;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod traits;
pub mod ui;
pub mod visualizer;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::VisualizerOptions,
    geo::{GeoBox, LatLng, Point, Size},
    map::{CropResult, MapDefinition, MapRegistry},
    viewport::Viewport,
};

pub use data::simulation::{DayRecord, SimulationData, Town};

pub use layers::{base::LayerTrait, image::MapImageLayer, marker::MarkerLayer};

pub use rendering::{
    context::RenderContext,
    gradient::{Color, Gradient, ScaledGradient},
};

pub use animation::playback::{DayCursor, Step};
#[cfg(feature = "tokio-runtime")]
pub use animation::playback::Autoplay;

pub use ui::{legend::Legend, table::Table};

pub use visualizer::{Session, Visualizer};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, VisualizerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Unknown gradient: {0}")]
    UnknownGradient(String),

    #[error("No simulation data loaded")]
    NotLoaded,

    #[error("Render error: {0}")]
    Render(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Error type alias for convenience
pub type Error = VisualizerError;

/// Installs `env_logger` with an `info` default filter.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
