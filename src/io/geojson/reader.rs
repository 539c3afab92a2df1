use geozero::geojson::GeoJsonReader;
use geozero::GeozeroDatasource;
use std::io::Read;

use crate::crs::Crs;
use crate::error::Result;
use crate::io::geozero::FeatureTableBuilder;
use crate::table::FeatureTable;

/// Read a GeoJSON FeatureCollection to a [`FeatureTable`].
///
/// GeoJSON coordinates are WGS 84 (RFC 7946), so the table is in EPSG:4326 unless the source
/// reported another SRID.
pub fn read_geojson<R: Read>(reader: R) -> Result<FeatureTable> {
    let mut geojson = GeoJsonReader(reader);
    let mut builder = FeatureTableBuilder::new();
    geojson.process(&mut builder)?;
    let mut table = builder.finish()?;
    if table.crs().is_none() {
        table.set_crs(Some(Crs::from(4326)));
    }
    Ok(table)
}

#[cfg(test)]
mod test {
    use geo::{point, Geometry};

    use super::*;
    use crate::datatypes::GeometryType;
    use crate::test::geojson::{AREAS, PROFILE_POINTS, WEIRS};
    use crate::value::Value;

    #[test]
    fn read_points() {
        let table = read_geojson(PROFILE_POINTS.as_bytes()).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.geometry_types(), vec![GeometryType::Point]);
        assert_eq!(
            table.geometry()[0],
            Some(Geometry::Point(point!(x: 4.0, y: 0.0)))
        );
        assert_eq!(table.column("VOLGNR").unwrap()[1], Value::Int(10));
        assert_eq!(table.column("PROFIELCODE").unwrap()[4], Value::from("prof_c"));
        assert_eq!(table.crs(), Some(&Crs::from(4326)));
    }

    #[test]
    fn null_geometry() {
        let table = read_geojson(AREAS.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.geometry()[2].is_none());
        assert_eq!(
            table.geometry_types(),
            vec![GeometryType::Polygon, GeometryType::MultiPolygon]
        );
        assert_eq!(table.column("area").unwrap()[2], Value::Float(3.5));
    }

    #[test]
    fn late_columns_are_backfilled() {
        let table = read_geojson(WEIRS.as_bytes()).unwrap();
        assert_eq!(
            table.column("remark").unwrap(),
            &[Value::Null, Value::from("inlet")]
        );
        assert_eq!(
            table.column("crest").unwrap(),
            &[Value::Float(1.25), Value::Int(2)]
        );
    }
}
