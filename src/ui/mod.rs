pub mod legend;
pub mod table;

#[cfg(feature = "egui")]
pub mod components;

pub use legend::{Legend, LegendItem};
pub use table::{no_space, percent_format, Table, TableRow};

#[cfg(feature = "egui")]
pub use components::{image_uri, CanvasStyle, LegendComponent, MapCanvas, TableComponent};
