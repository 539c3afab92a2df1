use geo::Geometry;
use geozero::geo_types::GeoWriter;
use geozero::{ColumnValue, FeatureProcessor, GeomProcessor, PropertyProcessor};
use indexmap::IndexMap;

use crate::crs::Crs;
use crate::error::Result;
use crate::io::geozero::table::anyvalue::column_value_to_value;
use crate::table::{AttributeTable, FeatureTable, Index};
use crate::value::Value;

/// Collects the features of any geozero data source into a [`FeatureTable`].
///
/// The source is schemaless: a column first seen in a later feature is back-filled with nulls,
/// and a feature that lacks a known column gets a null in that column.
pub struct FeatureTableBuilder {
    /// A mapping from column name to its values, in order of first appearance
    columns: IndexMap<String, Vec<Value>>,
    geometry: Vec<Option<Geometry>>,
    /// Row counter does not include the current row. So a row counter of 0 is expected if
    /// ingesting the first row.
    row_counter: usize,
    writer: GeoWriter,
    srid: Option<i32>,
}

impl FeatureTableBuilder {
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            geometry: Vec::new(),
            row_counter: 0,
            writer: GeoWriter::new(),
            srid: None,
        }
    }

    pub fn len(&self) -> usize {
        self.row_counter
    }

    pub fn is_empty(&self) -> bool {
        self.row_counter == 0
    }

    pub fn finish(self) -> Result<FeatureTable> {
        let attributes =
            AttributeTable::try_new_with_index(Index::range(self.row_counter), self.columns)?;
        let crs = self
            .srid
            .and_then(|srid| u32::try_from(srid).ok())
            .filter(|srid| *srid > 0)
            .map(Crs::from);
        FeatureTable::try_new(attributes, self.geometry, crs)
    }
}

impl Default for FeatureTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureProcessor for FeatureTableBuilder {
    fn feature_end(&mut self, idx: u64) -> geozero::error::Result<()> {
        debug_assert_eq!(idx as usize, self.row_counter);

        // A column can be short if the feature did not carry that property, such as when the
        // properties keys in GeoJSON change per row.
        let expected_len = self.row_counter + 1;
        for column in self.columns.values_mut() {
            if column.len() < expected_len {
                column.push(Value::Null);
            }
        }

        self.geometry.push(self.writer.take_geometry());
        self.row_counter += 1;
        Ok(())
    }
}

impl PropertyProcessor for FeatureTableBuilder {
    fn property(
        &mut self,
        _idx: usize,
        name: &str,
        value: &ColumnValue,
    ) -> geozero::error::Result<bool> {
        let value = column_value_to_value(value);
        if let Some(column) = self.columns.get_mut(name) {
            if column.len() > self.row_counter {
                // Repeated key within one feature: last one wins
                column[self.row_counter] = value;
            } else {
                column.push(value);
            }
        } else {
            let mut column = vec![Value::Null; self.row_counter];
            column.push(value);
            self.columns.insert(name.to_string(), column);
        }
        Ok(false)
    }
}

impl GeomProcessor for FeatureTableBuilder {
    fn srid(&mut self, srid: Option<i32>) -> geozero::error::Result<()> {
        if srid.is_some() {
            self.srid = srid;
        }
        Ok(())
    }

    fn xy(&mut self, x: f64, y: f64, idx: usize) -> geozero::error::Result<()> {
        self.writer.xy(x, y, idx)
    }

    fn empty_point(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.empty_point(idx)
    }

    fn point_begin(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.point_begin(idx)
    }

    fn point_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.point_end(idx)
    }

    fn multipoint_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.writer.multipoint_begin(size, idx)
    }

    fn multipoint_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.multipoint_end(idx)
    }

    fn linestring_begin(
        &mut self,
        tagged: bool,
        size: usize,
        idx: usize,
    ) -> geozero::error::Result<()> {
        self.writer.linestring_begin(tagged, size, idx)
    }

    fn linestring_end(&mut self, tagged: bool, idx: usize) -> geozero::error::Result<()> {
        self.writer.linestring_end(tagged, idx)
    }

    fn multilinestring_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.writer.multilinestring_begin(size, idx)
    }

    fn multilinestring_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.multilinestring_end(idx)
    }

    fn polygon_begin(
        &mut self,
        tagged: bool,
        size: usize,
        idx: usize,
    ) -> geozero::error::Result<()> {
        self.writer.polygon_begin(tagged, size, idx)
    }

    fn polygon_end(&mut self, tagged: bool, idx: usize) -> geozero::error::Result<()> {
        self.writer.polygon_end(tagged, idx)
    }

    fn multipolygon_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.writer.multipolygon_begin(size, idx)
    }

    fn multipolygon_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.multipolygon_end(idx)
    }

    fn geometrycollection_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.writer.geometrycollection_begin(size, idx)
    }

    fn geometrycollection_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.writer.geometrycollection_end(idx)
    }
}
