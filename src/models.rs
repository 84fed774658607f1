use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoordinateError;

/// Default map center when the device location is unknown (Mandi, Himachal Pradesh).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    latitude: 31.71,
    longitude: 76.93,
};

/// Span of the initial camera region, in degrees on both axes.
pub const REGION_SPAN_DEGREES: f64 = 2.5;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Undetermined,
    Granted,
    Denied,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Device,
    Fallback,
}

/// Outcome slot of a location acquisition. Starts `Pending` and only ever moves to `Resolved`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LocationResolution {
    Pending,
    Resolved {
        coordinate: Coordinate,
        source: LocationSource,
    },
}

impl LocationResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, LocationResolution::Resolved { .. })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardCategory {
    Landslide,
    Snow,
    Accident,
    Other,
    /// Any category this build does not know about yet.
    #[serde(other)]
    Unrecognized,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HazardReport {
    pub id: u64,
    #[serde(alias = "type")]
    pub category: HazardCategory,
    #[serde(alias = "location")]
    pub position: Coordinate,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "serde_json::Value")]
pub enum AnnotationKey {
    SelfLocation,
    Report(u64),
}

impl From<AnnotationKey> for serde_json::Value {
    fn from(key: AnnotationKey) -> Self {
        match key {
            AnnotationKey::SelfLocation => serde_json::Value::String("self".to_string()),
            AnnotationKey::Report(id) => serde_json::Value::from(id),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    #[serde(rename = "self")]
    SelfLocation,
    Brown,
    White,
    Orange,
    Red,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::SelfLocation => "self",
            ColorTag::Brown => "brown",
            ColorTag::White => "white",
            ColorTag::Orange => "orange",
            ColorTag::Red => "red",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Annotation {
    pub key: AnnotationKey,
    pub position: Coordinate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: ColorTag,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SceneModel {
    pub title: String,
    pub region: MapRegion,
    pub annotations: Vec<Annotation>,
}
