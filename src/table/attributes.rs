use indexmap::IndexMap;

use crate::error::{GeoFrameError, Result};
use crate::value::Value;

/// Row labels of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    name: Option<String>,
    values: Vec<Value>,
}

impl Index {
    pub fn new(name: Option<String>, values: Vec<Value>) -> Self {
        Self { name, values }
    }

    /// An unnamed index labelling rows `0..len`.
    pub fn range(len: usize) -> Self {
        Self {
            name: None,
            values: (0..len).map(Value::from).collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of the first row labelled `label`.
    pub fn position(&self, label: &Value) -> Option<usize> {
        self.values.iter().position(|value| value == label)
    }

    fn take(&self, indices: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            values: indices.iter().map(|i| self.values[*i].clone()).collect(),
        }
    }
}

/// Named attribute columns of equal length plus a row index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    index: Index,
    columns: IndexMap<String, Vec<Value>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table with the given columns.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: Index::default(),
            columns: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// A table without columns whose rows are labelled by `index`.
    pub fn from_index(index: Index) -> Self {
        Self {
            index,
            columns: IndexMap::new(),
        }
    }

    /// Create a table from columns, labelling rows `0..len`.
    pub fn try_new(columns: IndexMap<String, Vec<Value>>) -> Result<Self> {
        let len = columns.values().next().map(Vec::len).unwrap_or(0);
        Self::try_new_with_index(Index::range(len), columns)
    }

    pub fn try_new_with_index(index: Index, columns: IndexMap<String, Vec<Value>>) -> Result<Self> {
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != index.len()) {
            return Err(GeoFrameError::General(format!(
                "column \"{name}\" has {} rows, expected {}",
                column.len(),
                index.len()
            )));
        }
        Ok(Self { index, columns })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn columns(&self) -> &IndexMap<String, Vec<Value>> {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Look up a column, failing with a [`GeoFrameError::MissingColumn`].
    pub fn try_column(&self, name: &str) -> Result<&[Value]> {
        self.column(name)
            .ok_or_else(|| self.missing_column(name, &[name]))
    }

    pub(crate) fn missing_column(&self, name: &str, expected: &[&str]) -> GeoFrameError {
        GeoFrameError::MissingColumn {
            column: name.to_string(),
            present: self.columns.keys().cloned().collect(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Insert or replace a column.
    ///
    /// A table without rows takes on the length of the new column, filling its other columns
    /// with nulls.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.is_empty() && !values.is_empty() {
            self.index = Index::range(values.len());
            for column in self.columns.values_mut() {
                column.resize(values.len(), Value::Null);
            }
        } else if values.len() != self.len() {
            return Err(GeoFrameError::General(format!(
                "column \"{name}\" has {} rows, expected {}",
                values.len(),
                self.len()
            )));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Option<Vec<Value>> {
        self.columns.shift_remove(name)
    }

    /// Keep only the columns for which `keep` returns true.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.columns.retain(|name, _| keep(name));
    }

    /// Rename columns according to `mapping`; names absent from the mapping stay.
    pub fn rename_columns(&mut self, mapping: &IndexMap<String, String>) -> Result<()> {
        self.rename_with(|name| mapping.get(name).cloned().unwrap_or_else(|| name.to_string()))
    }

    pub fn lowercase_columns(&mut self) -> Result<()> {
        self.rename_with(|name| name.to_lowercase())
    }

    fn rename_with(&mut self, mut rename: impl FnMut(&str) -> String) -> Result<()> {
        let mut columns = IndexMap::with_capacity(self.columns.len());
        for (name, values) in self.columns.drain(..) {
            let new_name = rename(&name);
            if columns.contains_key(&new_name) {
                return Err(GeoFrameError::General(format!(
                    "renaming \"{name}\" creates duplicate column \"{new_name}\""
                )));
            }
            columns.insert(new_name, values);
        }
        self.columns = columns;
        Ok(())
    }

    /// Use the values of column `name` as row labels. The column itself is kept.
    pub fn set_index(&mut self, name: &str) -> Result<()> {
        let values = self.try_column(name)?.to_vec();
        self.index = Index::new(Some(name.to_string()), values);
        Ok(())
    }

    pub fn set_index_values(&mut self, index: Index) -> Result<()> {
        if index.len() != self.len() {
            return Err(GeoFrameError::General(format!(
                "index has {} rows, expected {}",
                index.len(),
                self.len()
            )));
        }
        self.index = index;
        Ok(())
    }

    /// Rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            index: self.index.take(indices),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| {
                    let taken = indices.iter().map(|i| values[*i].clone()).collect();
                    (name.clone(), taken)
                })
                .collect(),
        }
    }

    /// Rows where `mask` is true.
    pub fn filter(&self, mask: &[bool]) -> Self {
        self.take(&mask_indices(mask))
    }

    /// Append the rows of `other`. Columns only present on one side are filled with nulls.
    pub fn concat(&mut self, other: &AttributeTable) {
        let (len, other_len) = (self.len(), other.len());
        for (name, values) in self.columns.iter_mut() {
            match other.columns.get(name) {
                Some(other_values) => values.extend(other_values.iter().cloned()),
                None => values.resize(len + other_len, Value::Null),
            }
        }
        for (name, other_values) in other.columns.iter() {
            if !self.columns.contains_key(name) {
                let mut values = vec![Value::Null; len];
                values.extend(other_values.iter().cloned());
                self.columns.insert(name.clone(), values);
            }
        }
        self.index.values.extend(other.index.values.iter().cloned());
        if self.index.name != other.index.name {
            self.index.name = None;
        }
    }

    /// Remove all rows, keeping the columns.
    pub fn clear(&mut self) {
        self.index.values.clear();
        for column in self.columns.values_mut() {
            column.clear();
        }
    }

    /// Values of one row, in column order.
    pub fn row(&self, i: usize) -> Option<Vec<(&str, &Value)>> {
        if i >= self.len() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(name, values)| (name.as_str(), &values[i]))
                .collect(),
        )
    }
}

pub(crate) fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, keep)| keep.then_some(i))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::properties;

    #[test]
    fn try_new_checks_lengths() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), vec![Value::Int(1), Value::Int(2)]);
        columns.insert("b".to_string(), vec![Value::Int(1)]);
        assert!(AttributeTable::try_new(columns).is_err());
    }

    #[test]
    fn missing_column_lists_present() {
        let table = properties::table();
        let err = table.try_column("width").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column \"width\" not found. Got code, name, depth, Expected at least width"
        );
    }

    #[test]
    fn rename_and_lowercase() {
        let mut table = properties::table();
        let mapping = IndexMap::from([("name".to_string(), "NAAM".to_string())]);
        table.rename_columns(&mapping).unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["code", "NAAM", "depth"]
        );
        table.lowercase_columns().unwrap();
        assert!(table.has_column("naam"));
    }

    #[test]
    fn rename_collision() {
        let mut table = properties::table();
        let mapping = IndexMap::from([("name".to_string(), "code".to_string())]);
        assert!(table.rename_columns(&mapping).is_err());
    }

    #[test]
    fn set_index_keeps_column() {
        let mut table = properties::table();
        table.set_index("code").unwrap();
        assert_eq!(table.index().name(), Some("code"));
        assert_eq!(table.index().values()[1], Value::from("B"));
        assert!(table.has_column("code"));
        assert_eq!(table.index().position(&Value::from("C")), Some(2));
    }

    #[test]
    fn take_and_filter() {
        let table = properties::table();
        let taken = table.take(&[2, 0]);
        assert_eq!(taken.column("code").unwrap(), &[Value::from("C"), Value::from("A")]);
        assert_eq!(taken.index().values(), &[Value::Int(2), Value::Int(0)]);

        let filtered = table.filter(&[false, true, false]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.column("name").unwrap()[0], Value::from("beta"));
    }

    #[test]
    fn concat_fills_missing() {
        let mut table = properties::table();
        let mut other = AttributeTable::new();
        other
            .insert_column("code", vec![Value::from("D")])
            .unwrap();
        other.insert_column("width", vec![Value::Float(2.0)]).unwrap();
        table.concat(&other);

        assert_eq!(table.len(), 4);
        assert_eq!(table.column("name").unwrap()[3], Value::Null);
        assert_eq!(table.column("width").unwrap()[0], Value::Null);
        assert_eq!(table.column("width").unwrap()[3], Value::Float(2.0));
    }

    #[test]
    fn insert_into_empty_table() {
        let mut table = AttributeTable::with_columns(["code", "name"]);
        table
            .insert_column("code", vec![Value::from("A"), Value::from("B")])
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("name").unwrap(), &[Value::Null, Value::Null]);
        assert!(table.insert_column("name", vec![Value::Null]).is_err());
    }

    #[test]
    fn clear_keeps_columns() {
        let mut table = properties::table();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.num_columns(), 3);
    }
}
