use geo::Geometry;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::crs::Crs;
use crate::value::Value;

/// Options for reading a shapefile or GeoJSON source into a [`GeoFrame`][super::GeoFrame].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShapefileOptions {
    /// Column whose values label the rows. Without it, the incoming row index is kept.
    pub index_col: Option<String>,

    /// Renames applied after reading, from source name to target name.
    pub column_mapping: IndexMap<String, String>,

    pub check_columns: bool,

    pub check_geotype: bool,

    /// Reproject to this CRS after loading.
    pub proj_crs: Option<Crs>,

    /// Only keep features intersecting this Polygon or MultiPolygon.
    #[serde(skip)]
    pub clip: Option<Geometry>,

    /// Identifier column that receives a `_n` suffix when multipart features are split.
    pub id_col: String,

    /// Drop every column that is not required.
    pub filter_cols: bool,

    /// Only keep rows where each key column equals its value.
    pub filter_rows: Option<IndexMap<String, Value>>,
}

impl Default for ShapefileOptions {
    fn default() -> Self {
        Self {
            index_col: None,
            column_mapping: IndexMap::new(),
            check_columns: true,
            check_geotype: true,
            proj_crs: None,
            clip: None,
            id_col: "code".to_string(),
            filter_cols: false,
            filter_rows: None,
        }
    }
}

impl ShapefileOptions {
    pub fn with_index_col(self, index_col: impl Into<String>) -> Self {
        Self {
            index_col: Some(index_col.into()),
            ..self
        }
    }

    pub fn with_clip(self, clip: impl Into<Geometry>) -> Self {
        Self {
            clip: Some(clip.into()),
            ..self
        }
    }
}

/// Options for reading a GeoPackage layer into a [`GeoFrame`][super::GeoFrame].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    pub index_col: Option<String>,

    /// Group Point features sharing this column's value into one LineString.
    ///
    /// Requires `order_column`.
    pub groupby_column: Option<String>,

    /// Numeric column ordering the points of a group.
    pub order_column: Option<String>,

    pub id_col: String,

    pub column_mapping: IndexMap<String, String>,

    pub check_columns: bool,

    pub check_geotype: bool,

    #[serde(skip)]
    pub clip: Option<Geometry>,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            index_col: None,
            groupby_column: None,
            order_column: None,
            id_col: "code".to_string(),
            column_mapping: IndexMap::new(),
            check_columns: true,
            check_geotype: true,
            clip: None,
        }
    }
}

impl LayerOptions {
    pub fn with_grouping(
        self,
        groupby_column: impl Into<String>,
        order_column: impl Into<String>,
    ) -> Self {
        Self {
            groupby_column: Some(groupby_column.into()),
            order_column: Some(order_column.into()),
            ..self
        }
    }
}

/// Options for reading a GeoPackage layer into an [`AttributeFrame`][super::AttributeFrame].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeLayerOptions {
    /// Layer to read. Defaults to the first layer.
    pub layer_name: Option<String>,

    pub column_mapping: IndexMap<String, String>,

    pub index_col: Option<String>,
}

/// Options for [`GeoFrame::branch_to_prof`][super::GeoFrame::branch_to_prof].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Chainage of the profile along each branch.
    pub offset: f64,

    /// Measure `offset` back from the end of the branch.
    pub vertex_end: bool,

    /// Column that receives `prefix + value + suffix`. Its old values move to `branch_id`.
    pub rename_col: Option<String>,

    pub prefix: String,

    pub suffix: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shapefile_defaults() {
        let options: ShapefileOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ShapefileOptions::default());
        assert!(options.check_columns);
        assert!(options.check_geotype);
        assert_eq!(options.id_col, "code");
    }

    #[test]
    fn deserialize_layer_options() {
        let options: LayerOptions = serde_json::from_str(
            r#"{"groupby_column": "profielcode", "order_column": "volgnr", "check_geotype": false}"#,
        )
        .unwrap();
        assert_eq!(options.groupby_column.as_deref(), Some("profielcode"));
        assert_eq!(options.order_column.as_deref(), Some("volgnr"));
        assert!(!options.check_geotype);
        assert!(options.check_columns);
    }

    #[test]
    fn deserialize_filters_and_crs() {
        let options: ShapefileOptions = serde_json::from_str(
            r#"{"filter_rows": {"kind": "weir", "open": true}, "proj_crs": 28992}"#,
        )
        .unwrap();
        let filter = options.filter_rows.unwrap();
        assert_eq!(filter["kind"], Value::from("weir"));
        assert_eq!(filter["open"], Value::Bool(true));
        assert_eq!(options.proj_crs, Some(Crs::from(28992)));
    }
}
