//! Read from [GeoJSON](https://geojson.org/) files.

pub use reader::read_geojson;

mod reader;
