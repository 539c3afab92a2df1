use geo::{EuclideanLength, Geometry, LineInterpolatePoint, LineString, Point};

use crate::error::{GeoFrameError, Result};

/// Returns the point `distance` along a LineString or MultiLineString.
///
/// Negative distances are measured back from the end of the line. Distances beyond either end
/// are clamped to that end. The parts of a MultiLineString are walked in order.
///
/// ```
/// use geo::{line_string, point, Geometry};
/// use geoframe::algorithm::geo::interpolate;
///
/// let line: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 0.)].into();
/// assert_eq!(interpolate(&line, 2.5).unwrap(), point!(x: 2.5, y: 0.));
/// assert_eq!(interpolate(&line, -2.5).unwrap(), point!(x: 7.5, y: 0.));
/// ```
pub fn interpolate(geometry: &Geometry, distance: f64) -> Result<Point> {
    let parts: Vec<&LineString> = match geometry {
        Geometry::LineString(line) => vec![line],
        Geometry::MultiLineString(lines) => lines.iter().collect(),
        _ => {
            return Err(GeoFrameError::IncorrectType(
                "interpolation requires LineString or MultiLineString geometries".into(),
            ))
        }
    };

    let total: f64 = parts.iter().map(|line| line.euclidean_length()).sum();
    let mut distance = if distance < 0.0 {
        total + distance
    } else {
        distance
    };
    distance = distance.clamp(0.0, total);

    for (i, line) in parts.iter().enumerate() {
        let length = line.euclidean_length();
        let last = i + 1 == parts.len();
        if distance <= length || last {
            let fraction = if length > 0.0 { distance / length } else { 0.0 };
            return line.line_interpolate_point(fraction).ok_or_else(|| {
                GeoFrameError::General("cannot interpolate along a non-finite line".to_string())
            });
        }
        distance -= length;
    }

    Err(GeoFrameError::IncorrectType(
        "cannot interpolate along an empty line".into(),
    ))
}

/// Length of a LineString or MultiLineString.
pub fn line_length(geometry: &Geometry) -> Result<f64> {
    match geometry {
        Geometry::LineString(line) => Ok(line.euclidean_length()),
        Geometry::MultiLineString(lines) => Ok(lines.euclidean_length()),
        _ => Err(GeoFrameError::IncorrectType(
            "length requires LineString or MultiLineString geometries".into(),
        )),
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::{point, MultiLineString};

    use super::*;
    use crate::test::linestring::{branch_a, branch_c};
    use crate::test::point::p0;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_relative_eq!(actual.x(), expected.x(), epsilon = 1e-9);
        assert_relative_eq!(actual.y(), expected.y(), epsilon = 1e-9);
    }

    #[test]
    fn along_linestring() {
        let line: Geometry = branch_c().into();
        assert_point_eq(interpolate(&line, 0.0).unwrap(), point!(x: 0.0, y: 10.0));
        assert_point_eq(interpolate(&line, 5.0).unwrap(), point!(x: 3.0, y: 12.0));
        assert_point_eq(interpolate(&line, 100.0).unwrap(), point!(x: 3.0, y: 14.0));
        assert_point_eq(interpolate(&line, -1.0).unwrap(), point!(x: 3.0, y: 13.0));
    }

    #[test]
    fn along_multilinestring() {
        let lines: Geometry = MultiLineString::new(vec![branch_a(), branch_c()]).into();
        let p = interpolate(&lines, 12.0).unwrap();
        assert_point_eq(p, point!(x: 2.0, y: 10.0));
        assert_relative_eq!(line_length(&lines).unwrap(), 17.0);
    }

    #[test]
    fn rejects_points() {
        assert!(interpolate(&p0().into(), 1.0).is_err());
        assert!(line_length(&p0().into()).is_err());
    }
}
