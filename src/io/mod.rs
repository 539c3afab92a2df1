//! Readers for common geospatial file formats, including interoperability with the `geozero`
//! crate.

#[cfg(feature = "gdal")]
pub mod gdal;
pub mod geojson;
pub mod geozero;
