//! Algorithms implemented on and returning feature tables.

pub mod geo;
pub mod native;
#[cfg(feature = "proj")]
pub mod proj;
