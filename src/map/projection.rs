use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Marker placement on the map canvas, in percent of width (x) and height (y)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct MarkerPosition {
    pub x: f64,
    pub y: f64,
}

/// Equirectangular normalization onto a 0-100% plane.
///
/// Valid for latitude in [-90, 90] and longitude in [-180, 180]. Values outside
/// that range land off the canvas; they are not clamped.
pub fn project(point: GeoPoint) -> MarkerPosition {
    MarkerPosition {
        x: (point.longitude + 180.0) / 360.0 * 100.0,
        y: (90.0 - point.latitude) / 180.0 * 100.0,
    }
}

/// Anything that can be pinned on the map
pub trait Locatable {
    fn marker_id(&self) -> &str;
    fn marker_label(&self) -> &str;
    fn location(&self) -> GeoPoint;
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub label: String,
    pub location: GeoPoint,
    pub position: MarkerPosition,
    pub focused: bool,
}

/// Project every record into a marker, flagging the focused one
pub fn layout_markers<T: Locatable>(records: &[T], focused: Option<&str>) -> Vec<Marker> {
    records
        .iter()
        .map(|record| {
            let location = record.location();
            Marker {
                id: record.marker_id().to_string(),
                label: record.marker_label().to_string(),
                location,
                position: project(location),
                focused: focused == Some(record.marker_id()),
            }
        })
        .collect()
}
