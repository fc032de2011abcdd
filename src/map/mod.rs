pub mod projection;
pub mod viewport;

pub use projection::{layout_markers, project, GeoPoint, Locatable, Marker, MarkerPosition};
pub use viewport::{MapViewport, ZoomDirection, DETAIL_ZOOM, MAX_ZOOM, MIN_ZOOM};
