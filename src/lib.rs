//! Loading and validation of geospatial feature collections used as model input.
//!
//! A [`GeoFrame`] wraps a [`FeatureTable`] and enforces required columns and geometry types on
//! whatever is loaded into it, from shapefiles, GeoPackage layers or GeoJSON. On the way in,
//! features can be filtered, renamed, split into single parts, clipped to an extent and
//! reprojected. Point features of a GeoPackage layer can be assembled into one LineString per
//! branch with [`algorithm::native::group_points_to_lines`].
//!
//! ```
//! use geoframe::datatypes::GeometryType;
//! use geoframe::frame::ShapefileOptions;
//! use geoframe::GeoFrame;
//!
//! let geojson = r#"{"type": "FeatureCollection", "features": [
//!     {"type": "Feature", "properties": {"code": "KST1", "crest": 1.25},
//!      "geometry": {"type": "Point", "coordinates": [1.0, 0.5]}}
//! ]}"#;
//!
//! let mut weirs = GeoFrame::new(GeometryType::Point, ["code", "crest"]);
//! weirs
//!     .read_geojson(geojson.as_bytes(), &ShapefileOptions::default().with_index_col("code"))
//!     .unwrap();
//! assert_eq!(weirs.len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use frame::{AttributeFrame, GeoFrame};
pub use table::FeatureTable;

pub mod algorithm;
pub mod crs;
pub mod datatypes;
pub mod error;
pub mod frame;
pub mod io;
pub mod table;
#[cfg(test)]
pub(crate) mod test;
pub mod value;
