use std::fmt;

use itertools::Itertools;

use crate::table::{AttributeTable, FeatureTable};

impl fmt::Display for AttributeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AttributeTable ({} rows)", self.len())?;
        if let Some(name) = self.index().name() {
            writeln!(f, "index: {name}")?;
        }
        for name in self.column_names() {
            writeln!(f, "{name}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FeatureTable ({} rows)", self.len())?;
        if let Some(name) = self.index().name() {
            writeln!(f, "index: {name}")?;
        }
        for name in self.column_names() {
            writeln!(f, "{name}")?;
        }
        writeln!(
            f,
            "geometry: {}",
            self.geometry_types().iter().map(|t| t.name()).join(", ")
        )?;
        match self.crs() {
            Some(crs) => writeln!(f, "crs: {crs}"),
            None => writeln!(f, "crs: none"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::test::point;

    #[test]
    fn display_schema() {
        let table = point::table();
        assert_eq!(
            table.to_string(),
            "FeatureTable (3 rows)\ncode\nname\ndepth\ngeometry: Point\ncrs: EPSG:28992\n"
        );
    }
}
