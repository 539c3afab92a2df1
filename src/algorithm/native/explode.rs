use geo::Geometry;
use indexmap::IndexMap;

use crate::error::Result;
use crate::table::FeatureTable;
use crate::value::Value;

pub trait Explode {
    type Output;

    /// Returns the exploded geometries and the indices of the input rows each output row came
    /// from, to be passed into a `take` on the attributes.
    fn explode(&self) -> Self::Output;
}

impl Explode for [Option<Geometry>] {
    type Output = (Vec<Option<Geometry>>, Vec<usize>);

    fn explode(&self) -> Self::Output {
        let mut geometries = Vec::with_capacity(self.len());
        let mut take_indices = Vec::with_capacity(self.len());
        for (i, geom) in self.iter().enumerate() {
            let parts: Vec<Geometry> = match geom {
                Some(Geometry::MultiPoint(g)) if !g.0.is_empty() => {
                    g.iter().map(|p| Geometry::Point(*p)).collect()
                }
                Some(Geometry::MultiLineString(g)) if !g.0.is_empty() => {
                    g.iter().cloned().map(Geometry::LineString).collect()
                }
                Some(Geometry::MultiPolygon(g)) if !g.0.is_empty() => {
                    g.iter().cloned().map(Geometry::Polygon).collect()
                }
                Some(Geometry::GeometryCollection(g)) if !g.0.is_empty() => g.0.clone(),
                _ => {
                    geometries.push(geom.clone());
                    take_indices.push(i);
                    continue;
                }
            };
            for part in parts {
                geometries.push(Some(part));
                take_indices.push(i);
            }
        }
        (geometries, take_indices)
    }
}

impl Explode for FeatureTable {
    type Output = Result<FeatureTable>;

    /// One row per part of every multipart geometry, with the attribute row repeated.
    fn explode(&self) -> Self::Output {
        let (geometries, take_indices) = self.geometry().explode();
        let mut exploded = self.take(&take_indices);
        exploded.set_geometry(geometries)?;
        Ok(exploded)
    }
}

/// Give every identifier that occurs more than once a `_n` suffix, counting occurrences from
/// zero. Returns the identifiers that were split.
pub fn suffix_duplicate_ids(table: &mut FeatureTable, id_column: &str) -> Result<Vec<Value>> {
    let ids = table.try_column(id_column)?;

    let mut counts: IndexMap<&Value, usize> = IndexMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    let split: Vec<Value> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.clone())
        .collect();
    if split.is_empty() {
        return Ok(split);
    }

    let mut seen: IndexMap<&Value, usize> = IndexMap::new();
    let renamed: Vec<Value> = ids
        .iter()
        .map(|id| {
            if split.contains(id) {
                let n = seen.entry(id).or_default();
                let value = Value::String(format!("{id}_{n}"));
                *n += 1;
                value
            } else {
                id.clone()
            }
        })
        .collect();
    for id in &split {
        tracing::info!("{id} is multipart; split into single parts.");
    }

    table.insert_column(id_column, renamed)?;
    Ok(split)
}
