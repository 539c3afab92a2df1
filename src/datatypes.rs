//! Geometry type tags used to enforce what kind of features a frame holds.

use std::fmt;
use std::str::FromStr;

use geo::Geometry;
use serde::{Deserialize, Serialize};

use crate::error::GeoFrameError;

/// The type of a single geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    Line,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Rect,
    Triangle,
}

impl GeometryType {
    /// The type of `geometry`.
    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Line(_) => GeometryType::Line,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
            Geometry::Rect(_) => GeometryType::Rect,
            Geometry::Triangle(_) => GeometryType::Triangle,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::Line => "Line",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::Rect => "Rect",
            GeometryType::Triangle => "Triangle",
        }
    }

    /// Whether geometries of this type consist of several parts.
    pub fn is_multipart(&self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLineString
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = GeoFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let geometry_type = match s.trim().to_ascii_lowercase().as_str() {
            "point" => GeometryType::Point,
            "line" => GeometryType::Line,
            "linestring" => GeometryType::LineString,
            "polygon" => GeometryType::Polygon,
            "multipoint" => GeometryType::MultiPoint,
            "multilinestring" => GeometryType::MultiLineString,
            "multipolygon" => GeometryType::MultiPolygon,
            "geometrycollection" => GeometryType::GeometryCollection,
            "rect" => GeometryType::Rect,
            "triangle" => GeometryType::Triangle,
            _ => {
                return Err(GeoFrameError::IncorrectType(
                    format!("unknown geometry type: {s}").into(),
                ))
            }
        };
        Ok(geometry_type)
    }
}
