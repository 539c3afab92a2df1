//! Coordinate reference system identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::GeoFrameError;

/// A normalized coordinate reference system definition.
///
/// Authority codes are upper-cased and bare EPSG numbers get their authority prefix, so
/// `"epsg:28992"`, `"EPSG:28992"` and `28992` all compare equal. Other definitions (WKT, PROJ
/// strings) are kept as given.
///
/// ```
/// use geoframe::crs::Crs;
///
/// assert_eq!(Crs::new("epsg:28992"), Crs::from(28992));
/// assert_eq!(Crs::new(" EPSG:28992 ").as_str(), "EPSG:28992");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "CrsDefinition")]
pub struct Crs(String);

impl Crs {
    pub fn new(definition: impl AsRef<str>) -> Self {
        let definition = definition.as_ref().trim();
        if let Ok(code) = definition.parse::<u32>() {
            return Self::from(code);
        }
        match definition.split_once(':') {
            Some((authority, code))
                if authority.chars().all(|c| c.is_ascii_alphabetic())
                    && !code.is_empty()
                    && code.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Self(format!("{}:{}", authority.to_ascii_uppercase(), code))
            }
            _ => Self(definition.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The EPSG code, if this is an EPSG definition.
    pub fn epsg(&self) -> Option<u32> {
        self.0.strip_prefix("EPSG:")?.parse().ok()
    }
}

impl From<u32> for Crs {
    fn from(code: u32) -> Self {
        Self(format!("EPSG:{code}"))
    }
}

impl From<&str> for Crs {
    fn from(definition: &str) -> Self {
        Self::new(definition)
    }
}

impl From<String> for Crs {
    fn from(definition: String) -> Self {
        Self::new(definition)
    }
}

impl FromStr for Crs {
    type Err = GeoFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(GeoFrameError::IncorrectType("empty CRS definition".into()));
        }
        Ok(Self::new(s))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CrsDefinition {
    Code(u32),
    Definition(String),
}

impl From<CrsDefinition> for Crs {
    fn from(value: CrsDefinition) -> Self {
        match value {
            CrsDefinition::Code(code) => Self::from(code),
            CrsDefinition::Definition(definition) => Self::new(definition),
        }
    }
}
