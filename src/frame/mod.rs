//! Frames: tables that enforce a schema on the data loaded into them.

mod attributes;
mod features;
mod options;

pub use attributes::AttributeFrame;
pub use features::GeoFrame;
pub use options::{AttributeLayerOptions, LayerOptions, ProfileOptions, ShapefileOptions};
