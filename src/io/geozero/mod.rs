//! Interoperability with the [`geozero`](https://docs.rs/geozero) crate: any geozero data source
//! can be collected into a [`FeatureTable`][crate::table::FeatureTable].

pub mod table;

pub use table::FeatureTableBuilder;
