//! Algorithms that operate on the table structure itself rather than on coordinates.

mod explode;
mod group;

pub use explode::{suffix_duplicate_ids, Explode};
pub use group::{group_points_to_lines, PointGrouping};
