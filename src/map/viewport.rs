use serde::Serialize;

use super::projection::{GeoPoint, Locatable};

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 15;
/// Zoom applied when a marker is selected
pub const DETAIL_ZOOM: u8 = 10;
pub const DEFAULT_ZOOM: u8 = 3;
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(40.0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(ZoomDirection::In),
            "out" => Some(ZoomDirection::Out),
            _ => None,
        }
    }
}

/// Center, zoom level and focused marker of the schematic map
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    center: GeoPoint,
    zoom: u8,
    focused: Option<String>,
    #[serde(skip)]
    detail_zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapViewport {
    /// Zoom levels outside [MIN_ZOOM, MAX_ZOOM] are pulled into range
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            focused: None,
            detail_zoom: DETAIL_ZOOM,
        }
    }

    pub fn with_detail_zoom(mut self, level: u8) -> Self {
        self.detail_zoom = level.clamp(MIN_ZOOM, MAX_ZOOM);
        self
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Focus a record and recenter on it at detail zoom; `None` clears the focus.
    ///
    /// Clearing keeps the current center and zoom.
    pub fn select_marker<T: Locatable>(&mut self, record: Option<&T>) {
        match record {
            Some(record) => {
                self.focused = Some(record.marker_id().to_string());
                self.center = record.location();
                self.zoom = self.detail_zoom;
                tracing::debug!(id = record.marker_id(), "marker selected");
            }
            None => self.focused = None,
        }
    }

    /// Step the zoom level. Returns false when the step would leave the bounds.
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        match direction {
            ZoomDirection::In if self.zoom < MAX_ZOOM => self.zoom += 1,
            ZoomDirection::Out if self.zoom > MIN_ZOOM => self.zoom -= 1,
            _ => return false,
        }
        true
    }

    /// String-keyed variant of [`MapViewport::zoom`]; unknown directions are ignored
    pub fn zoom_by_key(&mut self, key: &str) -> bool {
        ZoomDirection::parse(key).is_some_and(|direction| self.zoom(direction))
    }

    /// Apply `steps` zoom-ins (positive) or zoom-outs (negative)
    pub fn zoom_steps(&mut self, steps: i32) {
        let direction = if steps >= 0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        for _ in 0..steps.unsigned_abs() {
            if !self.zoom(direction) {
                break;
            }
        }
    }
}
