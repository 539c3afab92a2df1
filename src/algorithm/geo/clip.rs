use geo::{Geometry, Intersects};

use crate::error::{GeoFrameError, Result};
use crate::table::FeatureTable;

/// Which rows of `table` have a geometry intersecting `extent`.
///
/// The extent must be a Polygon or MultiPolygon. Rows without geometry never intersect.
pub fn intersects_extent(table: &FeatureTable, extent: &Geometry) -> Result<Vec<bool>> {
    let mask = match extent {
        Geometry::Polygon(extent) => table
            .geometry()
            .iter()
            .map(|geom| geom.as_ref().is_some_and(|geom| geom.intersects(extent)))
            .collect(),
        Geometry::MultiPolygon(extent) => table
            .geometry()
            .iter()
            .map(|geom| geom.as_ref().is_some_and(|geom| geom.intersects(extent)))
            .collect(),
        _ => {
            return Err(GeoFrameError::IncorrectType(
                "Expected geometry of type Polygon or MultiPolygon".into(),
            ))
        }
    };
    Ok(mask)
}

/// Keep the rows of `table` whose geometry intersects `extent`.
///
/// Fails with [`GeoFrameError::EmptyExtent`] when no row is left.
pub fn clip(table: &FeatureTable, extent: &Geometry) -> Result<FeatureTable> {
    let mask = intersects_extent(table, extent)?;
    let clipped = table.filter(&mask);
    if clipped.is_empty() {
        return Err(GeoFrameError::EmptyExtent);
    }
    tracing::debug!(
        "clipping kept {} out of {} features",
        clipped.len(),
        table.len()
    );
    Ok(clipped)
}

#[cfg(test)]
mod test {
    use geo::{line_string, point};

    use super::*;
    use crate::test::point;
    use crate::test::polygon::{far_square, square, two_squares};
    use crate::value::Value;

    #[test]
    fn clip_points() {
        let table = point::table();
        let clipped = clip(&table, &square().into()).unwrap();
        assert_eq!(clipped.len(), 3);

        let mut table = FeatureTable::from_geometries(vec![
            point!(x: 5.0, y: 5.0).into(),
            point!(x: 15.0, y: 5.0).into(),
            line_string![(x: 15.0, y: 5.0), (x: 25.0, y: 25.0)].into(),
        ]);
        table
            .insert_column("code", vec!["in".into(), "out".into(), "crossing".into()])
            .unwrap();
        let clipped = clip(&table, &square().into()).unwrap();
        assert_eq!(clipped.column("code").unwrap(), &[Value::from("in")]);

        let clipped = clip(&table, &two_squares().into()).unwrap();
        assert_eq!(
            clipped.column("code").unwrap(),
            &[Value::from("in"), Value::from("crossing")]
        );
    }

    #[test]
    fn boundary_counts_as_intersecting() {
        let table = FeatureTable::from_geometries(vec![point!(x: 10.0, y: 5.0).into()]);
        assert_eq!(intersects_extent(&table, &square().into()).unwrap(), vec![true]);
    }

    #[test]
    fn empty_result() {
        let table = point::table();
        let err = clip(&table, &far_square().into()).unwrap_err();
        assert_eq!(err.to_string(), "Found no features within extent geometry.");
    }

    #[test]
    fn extent_must_be_polygonal() {
        let table = point::table();
        let err = clip(&table, &point!(x: 0.0, y: 0.0).into()).unwrap_err();
        assert!(matches!(err, GeoFrameError::IncorrectType(_)));
    }
}
