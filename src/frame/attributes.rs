use std::fmt;
#[cfg(feature = "gdal")]
use std::path::Path;

use crate::error::{GeoFrameError, Result};
use crate::frame::options::AttributeLayerOptions;
use crate::table::{AttributeTable, FeatureTable};

/// An [`AttributeTable`] that enforces a set of required columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeFrame {
    required_columns: Vec<String>,
    data: AttributeTable,
}

impl AttributeFrame {
    pub fn new<I, S>(required_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_columns: required_columns.into_iter().map(Into::into).collect(),
            data: AttributeTable::new(),
        }
    }

    pub fn required_columns(&self) -> &[String] {
        &self.required_columns
    }

    pub fn data(&self) -> &AttributeTable {
        &self.data
    }

    pub fn into_table(self) -> AttributeTable {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn delete_all(&mut self) {
        self.data.clear();
    }

    /// Replace the content of the frame, labelling rows by `index_col` when given.
    pub fn set_data(&mut self, mut table: AttributeTable, index_col: Option<&str>) -> Result<()> {
        self.delete_all();
        if let Some(index_col) = index_col {
            table.set_index(index_col)?;
        }
        self.data = table;
        self.check_columns()
    }

    /// Append the rows of `table`, which may only carry columns the frame already has.
    ///
    /// A named index is rebuilt from its column afterwards.
    pub fn add_data(&mut self, table: &AttributeTable) -> Result<()> {
        let unexpected: Vec<String> = table
            .column_names()
            .filter(|name| !self.data.has_column(name))
            .map(str::to_string)
            .collect();
        if !unexpected.is_empty() {
            return Err(GeoFrameError::UnexpectedColumns(unexpected));
        }

        let index_col = self.data.index().name().map(str::to_string);
        let mut data = self.data.clone();
        data.concat(table);
        self.set_data(data, index_col.as_deref())
    }

    pub fn check_columns(&self) -> Result<()> {
        let expected: Vec<&str> = self.required_columns.iter().map(String::as_str).collect();
        match expected.iter().find(|column| !self.data.has_column(column)) {
            Some(column) => Err(self.data.missing_column(column, &expected)),
            None => Ok(()),
        }
    }

    /// Load the attributes of a layer, discarding its geometry.
    ///
    /// Column names are lowercased before `column_mapping` is applied.
    pub fn ingest_layer(
        &mut self,
        table: FeatureTable,
        options: &AttributeLayerOptions,
    ) -> Result<()> {
        let (mut attributes, _, _) = table.into_inner();
        attributes.lowercase_columns()?;
        attributes.drop_column("geometry");
        if !options.column_mapping.is_empty() {
            attributes.rename_columns(&options.column_mapping)?;
        }
        self.set_data(attributes, options.index_col.as_deref())
    }

    /// Read the attributes of a GeoPackage layer into the frame.
    #[cfg(feature = "gdal")]
    pub fn read_gpkg_layer(
        &mut self,
        path: impl AsRef<Path>,
        options: &AttributeLayerOptions,
    ) -> Result<()> {
        let table = crate::io::gdal::read_file(path, options.layer_name.as_deref())?;
        self.ingest_layer(table, options)
    }
}

impl fmt::Display for AttributeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod test {
    use indexmap::IndexMap;

    use super::*;
    use crate::test::geojson::{profile_points, weirs};
    use crate::test::properties;
    use crate::value::Value;

    #[test]
    fn set_data_with_index() {
        let mut frame = AttributeFrame::new(["code", "name"]);
        frame.set_data(properties::table(), Some("code")).unwrap();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.data().index().name(), Some("code"));
        assert_eq!(frame.data().index().values()[1], Value::from("B"));
    }

    #[test]
    fn missing_column() {
        let mut frame = AttributeFrame::new(["code", "width"]);
        let err = frame.set_data(properties::table(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column \"width\" not found. Got code, name, depth, Expected at least code, width"
        );
    }

    #[test]
    fn add_rows() {
        let mut frame = AttributeFrame::new(["code"]);
        frame.set_data(properties::table(), Some("code")).unwrap();

        let mut extra = AttributeTable::new();
        extra.insert_column("code", vec!["D".into()]).unwrap();
        extra.insert_column("depth", vec![4.0.into()]).unwrap();
        frame.add_data(&extra).unwrap();

        assert_eq!(frame.len(), 4);
        assert_eq!(frame.data().index().name(), Some("code"));
        assert_eq!(frame.data().index().values()[3], Value::from("D"));
        assert_eq!(frame.data().column("name").unwrap()[3], Value::Null);
        assert_eq!(frame.data().column("depth").unwrap()[3], Value::Float(4.0));
    }

    #[test]
    fn add_rows_with_unknown_columns() {
        let mut frame = AttributeFrame::new(["code"]);
        frame.set_data(properties::table(), None).unwrap();

        let mut extra = AttributeTable::new();
        extra.insert_column("code", vec!["D".into()]).unwrap();
        extra.insert_column("width", vec![4.0.into()]).unwrap();
        let err = frame.add_data(&extra).unwrap_err();
        assert!(matches!(err, GeoFrameError::UnexpectedColumns(ref columns) if columns == &["width"]));
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn ingest_layer_drops_geometry() {
        let mut frame = AttributeFrame::new(["code", "profielcode", "volgnr"]);
        let options = AttributeLayerOptions {
            index_col: Some("code".to_string()),
            ..Default::default()
        };
        frame.ingest_layer(profile_points(), &options).unwrap();
        assert_eq!(frame.len(), 7);
        assert_eq!(frame.data().index().values()[0], Value::from("a5"));

        let mut frame = AttributeFrame::new(["code", "crest_level"]);
        let options = AttributeLayerOptions {
            column_mapping: IndexMap::from([("crest".to_string(), "crest_level".to_string())]),
            ..Default::default()
        };
        frame.ingest_layer(weirs(), &options).unwrap();
        assert_eq!(
            frame.data().column_names().collect::<Vec<_>>(),
            vec!["code", "crest_level", "remark"]
        );
    }

    #[cfg(feature = "gdal")]
    #[test]
    fn read_gpkg_layer_attributes() {
        let mut frame = AttributeFrame::new(["code", "profielcode", "volgnr"]);
        let options = AttributeLayerOptions {
            layer_name: Some("profile_points".to_string()),
            index_col: Some("code".to_string()),
            ..Default::default()
        };
        frame
            .read_gpkg_layer("fixtures/profile_points.geojson", &options)
            .unwrap();
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.data().index().values()[1], Value::from("b10"));
        assert_eq!(frame.data().column("volgnr").unwrap()[1], Value::Int(10));
        assert!(!frame.data().has_column("geometry"));
    }

    #[test]
    fn delete_all_keeps_columns() {
        let mut frame = AttributeFrame::new(["code"]);
        frame.set_data(properties::table(), None).unwrap();
        frame.delete_all();
        assert!(frame.is_empty());
        assert!(frame.data().has_column("name"));
    }
}
