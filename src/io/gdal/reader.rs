use std::fmt;
use std::path::Path;

use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldValue, Layer, LayerAccess};
use gdal::Dataset;
use indexmap::IndexMap;

use crate::crs::Crs;
use crate::error::{GeoFrameError, Result};
use crate::table::{AttributeTable, FeatureTable, Index};
use crate::value::Value;

/// Read a layer of any OGR dataset (shapefile, GeoPackage, ...) to a [`FeatureTable`].
///
/// Without `layer_name` the first layer of the dataset is read.
pub fn read_file(path: impl AsRef<Path>, layer_name: Option<&str>) -> Result<FeatureTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GeoFrameError::FileNotFound(path.to_path_buf()));
    }
    let dataset = Dataset::open(path)?;
    let mut layer = match layer_name {
        Some(name) => dataset.layer_by_name(name)?,
        None => dataset.layer(0)?,
    };
    read_layer(&mut layer)
}

/// Read all features of a GDAL layer to a [`FeatureTable`].
pub fn read_layer(layer: &mut Layer) -> Result<FeatureTable> {
    let field_names: Vec<String> = layer.defn().fields().map(|field| field.name()).collect();
    let crs = layer.spatial_ref().map(|srs| spatial_ref_to_crs(&srs));

    let mut columns: IndexMap<String, Vec<Value>> = field_names
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();
    let mut geometry = Vec::new();

    for feature in layer.features() {
        for (name, column) in columns.iter_mut() {
            let value = feature.field(name)?.map(field_value_to_value);
            column.push(value.unwrap_or_default());
        }
        let geom = match feature.geometry() {
            Some(geom) => Some(geom.to_geo()?),
            None => None,
        };
        geometry.push(geom);
    }

    let attributes = AttributeTable::try_new_with_index(Index::range(geometry.len()), columns)?;
    FeatureTable::try_new(attributes, geometry, crs)
}

fn spatial_ref_to_crs(srs: &SpatialRef) -> Crs {
    match (srs.auth_name(), srs.auth_code()) {
        (Ok(name), Ok(code)) => Crs::new(format!("{name}:{code}")),
        _ => match srs.to_wkt() {
            Ok(wkt) => Crs::new(wkt),
            Err(_) => Crs::new(srs.to_proj4().unwrap_or_default()),
        },
    }
}

fn field_value_to_value(value: FieldValue) -> Value {
    match value {
        FieldValue::IntegerValue(v) => Value::Int(v.into()),
        FieldValue::Integer64Value(v) => Value::Int(v),
        FieldValue::RealValue(v) => Value::Float(v),
        FieldValue::StringValue(v) => Value::String(v),
        FieldValue::DateValue(v) => Value::Date(v),
        FieldValue::DateTimeValue(v) => Value::DateTime(v),
        FieldValue::IntegerListValue(v) => Value::String(format!("{v:?}")),
        FieldValue::Integer64ListValue(v) => Value::String(format!("{v:?}")),
        FieldValue::RealListValue(v) => Value::String(format!("{v:?}")),
        FieldValue::StringListValue(v) => Value::String(format!("{v:?}")),
    }
}

/// One line of a dataset listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub index: usize,
    pub name: String,
    /// Geometry type of the first feature, `"None"` when it has no geometry.
    pub geometry_type: String,
    pub feature_count: u64,
    /// Attribute fields plus the geometry column.
    pub field_count: usize,
}

/// The layers of a dataset, displayed as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub path: String,
    pub layers: Vec<LayerSummary>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Content of gpkg-file {}, containing {} layers:",
            self.path,
            self.layers.len()
        )?;
        writeln!(
            f,
            "\tINDEX\t|\tNAME                          \t|\tGEOM_TYPE   \t|\t NFEATURES\t|\t   NFIELDS"
        )?;
        for layer in &self.layers {
            writeln!(
                f,
                "\t{:5}\t|\t{:30}\t|\t{:12}\t|\t{:10}\t|\t{:10}",
                layer.index, layer.name, layer.geometry_type, layer.feature_count, layer.field_count
            )?;
        }
        Ok(())
    }
}

/// List the layers of a dataset.
pub fn list_layers(path: impl AsRef<Path>) -> Result<DatasetSummary> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GeoFrameError::FileNotFound(path.to_path_buf()));
    }
    let dataset = Dataset::open(path)?;
    let mut layers = Vec::new();
    for (index, mut layer) in dataset.layers().enumerate() {
        let field_count = layer.defn().fields().count() + 1;
        let feature_count = layer.feature_count();
        let geometry_type = layer
            .features()
            .next()
            .and_then(|feature| feature.geometry().map(|geom| geom.geometry_name()))
            .unwrap_or_else(|| "None".to_string());
        layers.push(LayerSummary {
            index,
            name: layer.name(),
            geometry_type,
            feature_count,
            field_count,
        });
    }
    Ok(DatasetSummary {
        path: path.display().to_string(),
        layers,
    })
}
