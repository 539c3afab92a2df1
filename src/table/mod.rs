//! Abstractions for feature tables: attribute columns plus one geometry per row.

mod attributes;
mod display;

pub use attributes::{AttributeTable, Index};
pub(crate) use attributes::mask_indices;

use geo::Geometry;
use itertools::Itertools;

use crate::crs::Crs;
use crate::datatypes::GeometryType;
use crate::error::{GeoFrameError, Result};
use crate::value::Value;

/// Attribute columns with one optional geometry per row and an optional CRS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    attributes: AttributeTable,
    geometry: Vec<Option<Geometry>>,
    crs: Option<Crs>,
}

impl FeatureTable {
    pub fn try_new(
        attributes: AttributeTable,
        geometry: Vec<Option<Geometry>>,
        crs: Option<Crs>,
    ) -> Result<Self> {
        if attributes.len() != geometry.len() {
            return Err(GeoFrameError::General(format!(
                "{} geometries for {} attribute rows",
                geometry.len(),
                attributes.len()
            )));
        }
        Ok(Self {
            attributes,
            geometry,
            crs,
        })
    }

    /// An empty table with the given attribute columns.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: AttributeTable::with_columns(names),
            ..Default::default()
        }
    }

    /// A table without attribute columns.
    pub fn from_geometries(geometry: Vec<Geometry>) -> Self {
        let len = geometry.len();
        Self {
            attributes: AttributeTable::from_index(Index::range(len)),
            geometry: geometry.into_iter().map(Some).collect(),
            crs: None,
        }
    }

    pub fn into_inner(self) -> (AttributeTable, Vec<Option<Geometry>>, Option<Crs>) {
        (self.attributes, self.geometry, self.crs)
    }

    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }

    pub fn geometry(&self) -> &[Option<Geometry>] {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Vec<Option<Geometry>>) -> Result<()> {
        if geometry.len() != self.len() {
            return Err(GeoFrameError::General(format!(
                "{} geometries for {} rows",
                geometry.len(),
                self.len()
            )));
        }
        self.geometry = geometry;
        Ok(())
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn set_crs(&mut self, crs: Option<Crs>) {
        self.crs = crs;
    }

    pub fn index(&self) -> &Index {
        self.attributes.index()
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.attributes.column(name)
    }

    pub fn try_column(&self, name: &str) -> Result<&[Value]> {
        self.attributes.try_column(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.attributes.has_column(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.column_names()
    }

    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        if values.len() != self.len() {
            return Err(GeoFrameError::General(format!(
                "column has {} rows, expected {}",
                values.len(),
                self.len()
            )));
        }
        self.attributes.insert_column(name, values)
    }

    /// Rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            attributes: self.attributes.take(indices),
            geometry: indices.iter().map(|i| self.geometry[*i].clone()).collect(),
            crs: self.crs.clone(),
        }
    }

    /// Rows where `mask` is true.
    pub fn filter(&self, mask: &[bool]) -> Self {
        self.take(&mask_indices(mask))
    }

    /// Append the rows of `other`.
    pub fn concat(&mut self, other: &FeatureTable) {
        self.attributes.concat(&other.attributes);
        self.geometry.extend(other.geometry.iter().cloned());
    }

    /// Remove rows without a geometry, returning how many were removed.
    pub fn drop_missing_geometry(&mut self) -> usize {
        let mask: Vec<bool> = self.geometry.iter().map(Option::is_some).collect();
        let missing = mask.iter().filter(|keep| !**keep).count();
        if missing > 0 {
            *self = self.filter(&mask);
        }
        missing
    }

    /// Remove all rows, keeping the columns and CRS.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.geometry.clear();
    }

    /// The distinct geometry types in the table, in order of first appearance.
    pub fn geometry_types(&self) -> Vec<GeometryType> {
        self.geometry
            .iter()
            .flatten()
            .map(GeometryType::of)
            .unique()
            .collect()
    }

    pub fn contains_geometry_type(&self, geometry_type: GeometryType) -> bool {
        self.geometry
            .iter()
            .flatten()
            .any(|geom| GeometryType::of(geom) == geometry_type)
    }
}
