mod anyvalue;
mod builder;

pub use builder::FeatureTableBuilder;
