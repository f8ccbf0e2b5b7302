//! Configuration for the map surface and the geocode collaborator
//!
//! Options are grouped by concern so embedders can tune one aspect
//! without restating the rest.

use crate::animation::easing::EasingFunction;
use crate::core::geo::LatLng;
use std::time::Duration;

/// Basemap style requested from the tile/style provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasemapStyle {
    Streets,
    Satellite,
    /// Satellite imagery with street overlays (deployment default)
    SatelliteStreets,
    Custom(String),
}

impl BasemapStyle {
    /// Style URL sent to the basemap provider
    pub fn style_url(&self) -> String {
        match self {
            BasemapStyle::Streets => "mapbox://styles/mapbox/streets-v12".to_string(),
            BasemapStyle::Satellite => "mapbox://styles/mapbox/satellite-v9".to_string(),
            BasemapStyle::SatelliteStreets => {
                "mapbox://styles/mapbox/satellite-streets-v12".to_string()
            }
            BasemapStyle::Custom(url) => url.clone(),
        }
    }
}

/// Options for creating a [`MapSurface`](crate::MapSurface)
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Client access token for the basemap provider
    pub access_token: Option<String>,
    /// Requested basemap style
    pub style: BasemapStyle,
    /// Initial viewport center
    pub initial_center: LatLng,
    /// Initial zoom level
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom used when flying to a clinic or geocoded address
    pub close_up_zoom: f64,
    /// Duration of the geocode-driven fly animation
    pub geocode_fly_duration: Duration,
    /// Easing applied to the geocode-driven fly animation
    pub geocode_fly_easing: EasingFunction,
    /// Duration of the fly animation triggered from the clinic list
    pub list_fly_duration: Duration,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            access_token: None,
            style: BasemapStyle::SatelliteStreets,
            initial_center: LatLng::new(
                crate::constants::DEFAULT_LAT,
                crate::constants::DEFAULT_LNG,
            ),
            initial_zoom: crate::constants::DEFAULT_ZOOM,
            min_zoom: crate::constants::MIN_ZOOM,
            max_zoom: crate::constants::MAX_ZOOM,
            close_up_zoom: crate::constants::CLOSE_UP_ZOOM,
            geocode_fly_duration: Duration::from_millis(crate::constants::GEOCODE_FLY_MS),
            geocode_fly_easing: EasingFunction::EaseOutQuad,
            list_fly_duration: Duration::from_millis(crate::constants::LIST_FLY_MS),
        }
    }
}

/// Options for the external coordinate-extraction service
#[derive(Debug, Clone)]
pub struct GeocodeOptions {
    /// Endpoint that accepts a form-encoded `url` field and answers with
    /// `{ longitude, latitude }`
    pub endpoint: String,
    /// Timeout for the single outbound request
    pub timeout: Duration,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/extract_coordinates".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surface_options() {
        let options = SurfaceOptions::default();
        assert_eq!(options.style, BasemapStyle::SatelliteStreets);
        assert_eq!(options.initial_zoom, 18.0);
        assert_eq!(options.close_up_zoom, 18.0);
        assert_eq!(options.geocode_fly_duration, Duration::from_secs(10));
        assert_eq!(options.geocode_fly_easing, EasingFunction::EaseOutQuad);
    }

    #[test]
    fn test_style_urls() {
        assert!(BasemapStyle::SatelliteStreets
            .style_url()
            .contains("satellite-streets"));
        assert_eq!(
            BasemapStyle::Custom("mapbox://styles/custom/x".to_string()).style_url(),
            "mapbox://styles/custom/x"
        );
    }
}
