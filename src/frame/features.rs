use std::fmt;
use std::io::Read;
#[cfg(feature = "gdal")]
use std::path::Path;

use geo::Geometry;
use itertools::Itertools;

use crate::algorithm::geo::{clip, find_nearest_branch, interpolate, line_length, SnapMethod};
use crate::algorithm::native::{group_points_to_lines, suffix_duplicate_ids, Explode};
use crate::crs::Crs;
use crate::datatypes::GeometryType;
use crate::error::{GeoFrameError, Result};
use crate::frame::options::{LayerOptions, ProfileOptions, ShapefileOptions};
use crate::table::{AttributeTable, FeatureTable};
use crate::value::Value;

/// A [`FeatureTable`] that enforces a set of required columns and accepted geometry types.
///
/// Loading data replaces the content of the frame. The required columns and geometry types stay
/// fixed for the lifetime of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFrame {
    geotypes: Vec<GeometryType>,
    required_columns: Vec<String>,
    data: FeatureTable,
}

impl GeoFrame {
    /// An empty frame holding geometries of type `geotype`, with the required columns already
    /// present.
    pub fn new<I, S>(geotype: GeometryType, required_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_geotypes(vec![geotype], required_columns)
    }

    /// An empty frame accepting any of `geotypes`.
    pub fn with_geotypes<I, S>(geotypes: Vec<GeometryType>, required_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let required_columns: Vec<String> = required_columns.into_iter().map(Into::into).collect();
        Self {
            geotypes,
            data: FeatureTable::with_columns(required_columns.iter().cloned()),
            required_columns,
        }
    }

    pub fn geotypes(&self) -> &[GeometryType] {
        &self.geotypes
    }

    pub fn required_columns(&self) -> &[String] {
        &self.required_columns
    }

    pub fn data(&self) -> &FeatureTable {
        &self.data
    }

    pub fn into_table(self) -> FeatureTable {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Remove all rows, keeping the columns.
    pub fn delete_all(&mut self) {
        self.data.clear();
    }

    /// Replace the content of the frame with `table`.
    ///
    /// With `index_col` the rows are labelled by that column, which is kept; otherwise the index
    /// of `table` is kept. Required columns absent from `table` are only accepted when
    /// `check_columns` is false, in which case they are added as null columns.
    pub fn set_data(
        &mut self,
        mut table: FeatureTable,
        index_col: Option<&str>,
        check_columns: bool,
        check_geotype: bool,
    ) -> Result<()> {
        self.delete_all();

        if check_columns {
            self.check_columns(table.attributes())?;
        }
        for column in &self.required_columns {
            if !table.has_column(column) {
                table.insert_column(column.as_str(), vec![Value::Null; table.len()])?;
            }
        }
        if let Some(index_col) = index_col {
            table.attributes_mut().set_index(index_col)?;
        }
        self.data = table;

        if check_geotype {
            self.check_geotype()?;
        }
        Ok(())
    }

    /// Check that every required column is present in `attributes`.
    pub fn check_columns(&self, attributes: &AttributeTable) -> Result<()> {
        match self
            .required_columns
            .iter()
            .find(|column| !attributes.has_column(column))
        {
            Some(column) => {
                let expected: Vec<&str> = self.required_columns.iter().map(String::as_str).collect();
                Err(attributes.missing_column(column, &expected))
            }
            None => Ok(()),
        }
    }

    /// Check that every row has a geometry of an accepted type.
    pub fn check_geotype(&self) -> Result<()> {
        let accepted = self.data.geometry().iter().all(|geom| {
            geom.as_ref()
                .is_some_and(|geom| self.geotypes.contains(&GeometryType::of(geom)))
        });
        if accepted {
            return Ok(());
        }

        let found = self
            .data
            .geometry()
            .iter()
            .map(|geom| geom.as_ref().map_or("None", |geom| GeometryType::of(geom).name()))
            .unique()
            .join(", ");
        Err(GeoFrameError::GeometryType {
            expected: self.geotypes.iter().map(|t| t.name()).join(" or "),
            found,
        })
    }

    /// Load features read from a shapefile or similar source.
    ///
    /// Columns and rows are filtered first, rows without geometry are dropped, then columns are
    /// renamed. Multipart polygons and lines are split into single parts whose identifiers in
    /// `id_col` get a `_n` suffix. The result is validated, optionally clipped and reprojected.
    pub fn ingest_file(&mut self, mut table: FeatureTable, options: &ShapefileOptions) -> Result<()> {
        if options.filter_cols {
            tracing::info!("Filtering required column keys");
            let required = &self.required_columns;
            table
                .attributes_mut()
                .retain_columns(|name| required.iter().any(|column| column == name));
        }

        if let Some(filter_rows) = &options.filter_rows {
            tracing::info!("Filter rows using key value pairs");
            let conditions = filter_rows
                .iter()
                .map(|(column, value)| Ok((table.try_column(column)?, value)))
                .collect::<Result<Vec<_>>>()?;
            let mask: Vec<bool> = (0..table.len())
                .map(|row| {
                    conditions
                        .iter()
                        .all(|(column, value)| &column[row] == *value)
                })
                .collect();
            table = table.filter(&mask);
        }

        let total = table.len();
        let missing = table.drop_missing_geometry();
        tracing::debug!("{missing} out of {total} do not have a geometry");

        if !options.column_mapping.is_empty() {
            table.attributes_mut().rename_columns(&options.column_mapping)?;
        }

        if table.contains_geometry_type(GeometryType::MultiPolygon)
            || table.contains_geometry_type(GeometryType::MultiLineString)
        {
            table = table.explode()?;
            suffix_duplicate_ids(&mut table, &options.id_col)?;
        }

        if table.is_empty() {
            return Err(GeoFrameError::EmptyInput(
                "Imported file contains no rows.".into(),
            ));
        }

        self.set_data(
            table,
            options.index_col.as_deref(),
            options.check_columns,
            options.check_geotype,
        )?;

        if let Some(extent) = &options.clip {
            self.clip(extent)?;
        }

        match &options.proj_crs {
            Some(crs) => self.check_projection(crs)?,
            None => tracing::debug!("No projected CRS given, keeping the CRS of the input"),
        }
        Ok(())
    }

    /// Read the first layer of a shapefile (or any OGR dataset) into the frame.
    #[cfg(feature = "gdal")]
    pub fn read_shp(&mut self, path: impl AsRef<Path>, options: &ShapefileOptions) -> Result<()> {
        let table = crate::io::gdal::read_file(path, None)?;
        self.ingest_file(table, options)
    }

    /// Read a GeoJSON FeatureCollection into the frame.
    pub fn read_geojson<R: Read>(&mut self, reader: R, options: &ShapefileOptions) -> Result<()> {
        let table = crate::io::geojson::read_geojson(reader)?;
        self.ingest_file(table, options)
    }

    /// List the layers of a GeoPackage, logging the listing.
    #[cfg(feature = "gdal")]
    pub fn show_gpkg(path: impl AsRef<Path>) -> Result<crate::io::gdal::DatasetSummary> {
        let summary = crate::io::gdal::list_layers(path)?;
        tracing::info!("{summary}");
        Ok(summary)
    }

    /// Load features read from a GeoPackage layer.
    ///
    /// Column names are lowercased. With a `groupby_column`, Point features are assembled into
    /// one LineString per group, ordered by `order_column`. Columns are then renamed and
    /// MultiPolygons split into single parts before the result is validated and optionally
    /// clipped.
    pub fn ingest_layer(&mut self, mut table: FeatureTable, options: &LayerOptions) -> Result<()> {
        table.attributes_mut().lowercase_columns()?;

        if let Some(groupby_column) = &options.groupby_column {
            if !table.has_column(groupby_column) {
                return Err(GeoFrameError::IncorrectType(
                    "Groupby column not found in feature list.".into(),
                ));
            }
            let order_column = options.order_column.as_deref().ok_or_else(|| {
                GeoFrameError::IncorrectType("Grouping points requires an order column.".into())
            })?;
            let grouping = group_points_to_lines(&table, groupby_column, order_column)?;
            table = grouping.table;
        }

        if !options.column_mapping.is_empty() {
            table.attributes_mut().rename_columns(&options.column_mapping)?;
        }

        if table.contains_geometry_type(GeometryType::MultiPolygon) {
            table = table.explode()?;
            suffix_duplicate_ids(&mut table, &options.id_col)?;
        }

        self.set_data(
            table,
            options.index_col.as_deref(),
            options.check_columns,
            options.check_geotype,
        )?;

        if let Some(extent) = &options.clip {
            self.clip(extent)?;
        }
        Ok(())
    }

    /// Read layer `layer_name` of a GeoPackage into the frame.
    #[cfg(feature = "gdal")]
    pub fn read_gpkg_layer(
        &mut self,
        path: impl AsRef<Path>,
        layer_name: &str,
        options: &LayerOptions,
    ) -> Result<()> {
        let table = crate::io::gdal::read_file(path, Some(layer_name))?;
        self.ingest_layer(table, options)
    }

    /// Keep only the features intersecting `extent`, a Polygon or MultiPolygon.
    pub fn clip(&mut self, extent: &Geometry) -> Result<()> {
        let clipped = clip(&self.data, extent)?;
        self.set_data(clipped, None, true, true)
    }

    /// Reproject the frame to `crs_out` unless it already uses that CRS.
    pub fn check_projection(&mut self, crs_out: &Crs) -> Result<()> {
        match self.data.crs() {
            Some(crs) if crs == crs_out => {
                tracing::info!("Data already has the projected CRS {crs_out}");
                Ok(())
            }
            Some(_) => self.reproject(crs_out),
            None => Err(GeoFrameError::IncorrectType(
                format!("cannot reproject data without a CRS to {crs_out}").into(),
            )),
        }
    }

    #[cfg(feature = "proj")]
    fn reproject(&mut self, crs_out: &Crs) -> Result<()> {
        self.data = crate::algorithm::proj::to_crs(&self.data, crs_out)?;
        Ok(())
    }

    #[cfg(not(feature = "proj"))]
    fn reproject(&mut self, crs_out: &Crs) -> Result<()> {
        Err(GeoFrameError::NotYetImplemented(format!(
            "reprojecting to {crs_out} requires the proj feature"
        )))
    }

    /// Place a profile point on every branch.
    ///
    /// The returned Point frame keeps the attributes of the branches and adds the chainage of
    /// each point in column `offset`.
    pub fn branch_to_prof(&self, options: &ProfileOptions) -> Result<GeoFrame> {
        let mut points = Vec::with_capacity(self.len());
        let mut chainages = Vec::with_capacity(self.len());
        for geom in self.data.geometry() {
            match geom {
                Some(geom) => {
                    let chainage = if options.vertex_end {
                        line_length(geom)? - options.offset
                    } else {
                        options.offset
                    };
                    points.push(Some(Geometry::Point(interpolate(geom, chainage)?)));
                    chainages.push(Value::Float(chainage));
                }
                None => {
                    points.push(None);
                    chainages.push(Value::Null);
                }
            }
        }

        let mut table = self.data.clone();
        table.set_geometry(points)?;
        table.insert_column("offset", chainages)?;

        if let Some(rename_col) = &options.rename_col {
            let branch_ids = table
                .column(rename_col)
                .ok_or_else(|| {
                    GeoFrameError::General(format!(
                        "Column rename with '{rename_col}' did not succeed."
                    ))
                })?
                .to_vec();
            let renamed = branch_ids
                .iter()
                .map(|id| Value::String(format!("{}{id}{}", options.prefix, options.suffix)))
                .collect();
            table.insert_column("branch_id", branch_ids)?;
            table.insert_column(rename_col.as_str(), renamed)?;
        }

        Ok(GeoFrame {
            geotypes: vec![GeometryType::Point],
            required_columns: self.required_columns.clone(),
            data: table,
        })
    }

    /// Store `col1 + col2` in column `rename_col`.
    pub fn merge_columns(&mut self, col1: &str, col2: &str, rename_col: &str) -> Result<()> {
        let failed = || {
            GeoFrameError::General(format!(
                "Merge of two profile columns '{col1}' and '{col2}' did not succeed."
            ))
        };
        let left = self.data.column(col1).ok_or_else(failed)?;
        let right = self.data.column(col2).ok_or_else(failed)?;
        let merged = left
            .iter()
            .zip(right)
            .map(|(a, b)| a.try_add(b).map_err(|_| failed()))
            .collect::<Result<Vec<_>>>()?;
        self.data.insert_column(rename_col, merged)
    }

    /// Snap every feature to the nearest branch within `maxdist`.
    ///
    /// Adds the columns `branch_id` (index label of the branch), `branch_offset` and
    /// `branch_distance`. Features without a branch in reach get nulls.
    pub fn snap_to_branch(
        &mut self,
        branches: &GeoFrame,
        method: SnapMethod,
        maxdist: f64,
    ) -> Result<()> {
        let snaps = find_nearest_branch(&branches.data, &self.data, method, maxdist)?;
        let labels = branches.data.index().values();

        let mut ids = Vec::with_capacity(snaps.len());
        let mut offsets = Vec::with_capacity(snaps.len());
        let mut distances = Vec::with_capacity(snaps.len());
        for snap in &snaps {
            match snap {
                Some(snap) => {
                    ids.push(labels[snap.branch].clone());
                    offsets.push(Value::Float(snap.offset));
                    distances.push(Value::Float(snap.distance));
                }
                None => {
                    ids.push(Value::Null);
                    offsets.push(Value::Null);
                    distances.push(Value::Null);
                }
            }
        }
        let unmatched = snaps.iter().filter(|snap| snap.is_none()).count();
        if unmatched > 0 {
            tracing::warn!("{unmatched} features are not within {maxdist} of a branch");
        }

        self.data.insert_column("branch_id", ids)?;
        self.data.insert_column("branch_offset", offsets)?;
        self.data.insert_column("branch_distance", distances)
    }
}

impl fmt::Display for GeoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}
