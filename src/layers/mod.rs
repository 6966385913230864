pub mod base;
pub mod image;
#[macro_use]
pub mod macros;
pub mod manager;
pub mod marker;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use image::MapImageLayer;
pub use manager::LayerManager;
pub use marker::{Marker, MarkerLayer};
