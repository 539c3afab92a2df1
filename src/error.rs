//! Defines [`GeoFrameError`], representing all errors returned by this crate.

use std::borrow::Cow;
use std::fmt::Debug;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoFrameError {
    /// Incorrect type was passed to an operation.
    #[error("Incorrect type passed to operation: {0}")]
    IncorrectType(Cow<'static, str>),

    /// A required column is absent from a table.
    #[error(
        "Column \"{column}\" not found. Got {}, Expected at least {}",
        .present.iter().join(", "),
        .expected.iter().join(", ")
    )]
    MissingColumn {
        column: String,
        present: Vec<String>,
        expected: Vec<String>,
    },

    /// Incoming data carries columns the receiving table does not know.
    #[error(
        "The new table contains columns that are not present in the current table: {}",
        .0.iter().join(", ")
    )]
    UnexpectedColumns(Vec<String>),

    /// Geometries do not match the geometry type(s) a frame accepts.
    #[error("Geometrytype \"{expected}\" required. The input has geometry type(s) [{found}]")]
    GeometryType { expected: String, found: String },

    /// An input source produced no usable rows.
    #[error("{0}")]
    EmptyInput(Cow<'static, str>),

    /// Clipping removed every feature.
    #[error("Found no features within extent geometry.")]
    EmptyExtent,

    /// The input path does not exist.
    #[error("File not found: \"{}\"", .0.display())]
    FileNotFound(PathBuf),

    /// Returned when functionality is not available in this build.
    #[error("Not yet implemented: {0}")]
    NotYetImplemented(String),

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// [geozero::error::GeozeroError]
    #[error(transparent)]
    GeozeroError(#[from] geozero::error::GeozeroError),

    /// [gdal::errors::GdalError]
    #[cfg(feature = "gdal")]
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),

    /// [proj::ProjError]
    #[cfg(feature = "proj")]
    #[error(transparent)]
    ProjError(#[from] proj::ProjError),

    /// [proj::ProjCreateError]
    #[cfg(feature = "proj")]
    #[error(transparent)]
    ProjCreateError(#[from] proj::ProjCreateError),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoFrameError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_column_message() {
        let err = GeoFrameError::MissingColumn {
            column: "code".to_string(),
            present: vec!["name".to_string(), "geometry".to_string()],
            expected: vec!["code".to_string(), "name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column \"code\" not found. Got name, geometry, Expected at least code, name"
        );
    }

    #[test]
    fn file_not_found_message() {
        let err = GeoFrameError::FileNotFound(PathBuf::from("data/missing.gpkg"));
        assert_eq!(err.to_string(), "File not found: \"data/missing.gpkg\"");
    }
}
