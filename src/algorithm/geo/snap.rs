use geo::{
    BoundingRect, Centroid, EuclideanDistance, EuclideanLength, Geometry, Intersects,
    LineLocatePoint, LineString, Point,
};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use serde::Deserialize;

use crate::error::{GeoFrameError, Result};
use crate::table::FeatureTable;

/// How the distance between a feature and a branch is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMethod {
    /// Distance between the full geometry and the branch.
    #[default]
    Overall,
    /// Distance between the geometry's centroid and the branch.
    Centroid,
    /// Mean distance of both end points; LineString features only.
    Ends,
    /// Only branches the geometry intersects.
    Intersecting,
}

/// The branch a feature snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchSnap {
    /// Row position of the branch in the branch table.
    pub branch: usize,
    pub distance: f64,
    /// Chainage along the branch of the point closest to the feature's centroid.
    pub offset: f64,
}

type BranchEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Find for every geometry the nearest branch within `maxdist`.
///
/// Branch geometries must be LineStrings. Rows without geometry, and geometries with no branch
/// within `maxdist`, get `None`.
pub fn find_nearest_branch(
    branches: &FeatureTable,
    geometries: &FeatureTable,
    method: SnapMethod,
    maxdist: f64,
) -> Result<Vec<Option<BranchSnap>>> {
    let lines = branch_lines(branches)?;
    let tree = RTree::bulk_load(
        lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let rect = line.bounding_rect()?;
                let (min, max) = (rect.min(), rect.max());
                Some(BranchEnvelope::new(
                    Rectangle::from_corners([min.x, min.y], [max.x, max.y]),
                    i,
                ))
            })
            .collect(),
    );

    geometries
        .geometry()
        .iter()
        .map(|geom| match geom {
            Some(geom) => snap_geometry(geom, &lines, &tree, method, maxdist),
            None => Ok(None),
        })
        .collect()
}

fn branch_lines(branches: &FeatureTable) -> Result<Vec<&LineString>> {
    branches
        .geometry()
        .iter()
        .map(|geom| match geom {
            Some(Geometry::LineString(line)) => Ok(line),
            _ => Err(GeoFrameError::IncorrectType(
                "branches must be LineString geometries".into(),
            )),
        })
        .collect()
}

fn snap_geometry(
    geom: &Geometry,
    lines: &[&LineString],
    tree: &RTree<BranchEnvelope>,
    method: SnapMethod,
    maxdist: f64,
) -> Result<Option<BranchSnap>> {
    let (Some(rect), Some(centroid)) = (geom.bounding_rect(), geom.centroid()) else {
        return Ok(None);
    };
    let (min, max) = (rect.min(), rect.max());
    let search = AABB::from_corners(
        [min.x - maxdist, min.y - maxdist],
        [max.x + maxdist, max.y + maxdist],
    );

    let mut best: Option<(f64, f64, usize)> = None;
    for candidate in tree.locate_in_envelope_intersecting(&search) {
        let line = lines[candidate.data];
        let distance = match method {
            SnapMethod::Overall => overall_distance(geom, &centroid, line),
            SnapMethod::Centroid => centroid.euclidean_distance(line),
            SnapMethod::Ends => ends_distance(geom, line)?,
            SnapMethod::Intersecting => {
                if !geom.intersects(line) {
                    continue;
                }
                0.0
            }
        };
        if distance > maxdist {
            continue;
        }
        // Ties, such as several intersecting branches, go to the branch closest to the centroid
        let tiebreak = centroid.euclidean_distance(line);
        let better = match best {
            None => true,
            Some((best_distance, best_tiebreak, best_branch)) => (distance, tiebreak, candidate.data)
                < (best_distance, best_tiebreak, best_branch),
        };
        if better {
            best = Some((distance, tiebreak, candidate.data));
        }
    }

    Ok(best.map(|(distance, _, branch)| {
        let line = lines[branch];
        let fraction = line.line_locate_point(&centroid).unwrap_or(0.0);
        BranchSnap {
            branch,
            distance,
            offset: fraction * line.euclidean_length(),
        }
    }))
}

fn overall_distance(geom: &Geometry, centroid: &Point, line: &LineString) -> f64 {
    match geom {
        Geometry::Point(point) => point.euclidean_distance(line),
        Geometry::LineString(other) => other.euclidean_distance(line),
        Geometry::Polygon(polygon) => polygon.euclidean_distance(line),
        _ => centroid.euclidean_distance(line),
    }
}

fn ends_distance(geom: &Geometry, line: &LineString) -> Result<f64> {
    match geom {
        Geometry::LineString(other) => match (other.points().next(), other.points().last()) {
            (Some(start), Some(end)) => {
                Ok((start.euclidean_distance(line) + end.euclidean_distance(line)) / 2.0)
            }
            _ => Ok(f64::INFINITY),
        },
        _ => Err(GeoFrameError::IncorrectType(
            "snapping by ends requires LineString geometries".into(),
        )),
    }
}
