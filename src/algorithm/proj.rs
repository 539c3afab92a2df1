use proj::{Proj, Transform};

use crate::crs::Crs;
use crate::error::{GeoFrameError, Result};
use crate::table::FeatureTable;

/// Reproject geometries using PROJ
pub trait Reproject {
    fn reproject(&self, proj: &Proj) -> Result<Self>
    where
        Self: Sized;
}

impl Reproject for FeatureTable {
    fn reproject(&self, proj: &Proj) -> Result<Self> {
        let mut output = self.clone();
        let geometry = self
            .geometry()
            .iter()
            .map(|maybe_geom| {
                maybe_geom
                    .clone()
                    .map(|mut geom| {
                        geom.transform(proj)?;
                        Ok(geom)
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;
        output.set_geometry(geometry)?;
        Ok(output)
    }
}

/// Reproject `table` from its own CRS to `target`.
pub fn to_crs(table: &FeatureTable, target: &Crs) -> Result<FeatureTable> {
    let source = table.crs().ok_or_else(|| {
        GeoFrameError::IncorrectType("cannot reproject a table without a CRS".into())
    })?;
    let proj = Proj::new_known_crs(source.as_str(), target.as_str(), None)?;
    let mut output = table.reproject(&proj)?;
    output.set_crs(Some(target.clone()));
    Ok(output)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::{point, Geometry};

    use super::*;
    use crate::test::point;

    #[test]
    fn wgs84_to_web_mercator() {
        let mut table = FeatureTable::from_geometries(vec![point!(x: 0.0, y: 1.0).into()]);
        table.set_crs(Some(Crs::from(4326)));

        // cs2cs takes lat/lon order for EPSG:4326: echo 1 0 | cs2cs EPSG:4326 EPSG:3857
        let out = to_crs(&table, &Crs::from(3857)).unwrap();
        let Some(Geometry::Point(p)) = &out.geometry()[0] else {
            panic!("expected a point");
        };
        assert_eq!(p.x(), 0.0);
        assert_relative_eq!(p.y(), 111325.1428663851);
        assert_eq!(out.crs(), Some(&Crs::from(3857)));
    }

    #[test]
    fn requires_source_crs() {
        let mut table = point::table();
        table.set_crs(None);
        assert!(to_crs(&table, &Crs::from(4326)).is_err());
    }
}
