//! Default values observed for the clinic-locator deployment

/// Default viewport center longitude (Mumbai area)
pub const DEFAULT_LNG: f64 = 72.837296;

/// Default viewport center latitude (Mumbai area)
pub const DEFAULT_LAT: f64 = 19.107093;

/// Default and maximum zoom level
pub const DEFAULT_ZOOM: f64 = 18.0;

/// Zoom level used when flying to a clinic or a geocoded address
pub const CLOSE_UP_ZOOM: f64 = 18.0;

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.0;

/// Maximum zoom level
pub const MAX_ZOOM: f64 = 18.0;

/// Duration of the geocode-driven fly animation in milliseconds
pub const GEOCODE_FLY_MS: u64 = 10_000;

/// Duration of the clinic-list fly animation in milliseconds
pub const LIST_FLY_MS: u64 = 1_000;

/// Marker id reserved for the user-location marker
pub const USER_MARKER_ID: &str = "user-location";

/// Prefix for clinic marker ids
pub const CLINIC_MARKER_PREFIX: &str = "clinic-";
