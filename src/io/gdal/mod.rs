//! Read vector datasets through [GDAL](https://gdal.org/)'s OGR drivers.

pub use reader::{list_layers, read_file, read_layer, DatasetSummary, LayerSummary};

mod reader;
