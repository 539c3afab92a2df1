//! Algorithms implemented on feature tables using georust/geo algorithms.

mod clip;
mod line_interpolate_point;
mod snap;

pub use clip::{clip, intersects_extent};
pub use line_interpolate_point::{interpolate, line_length};
pub use snap::{find_nearest_branch, BranchSnap, SnapMethod};
