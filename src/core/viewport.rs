use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions.
///
/// Mutated by user pan/zoom gestures and by animated fly transitions. The
/// viewport has no persistence; its lifetime is bounded by the surface that
/// owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(crate::constants::MIN_ZOOM, crate::constants::MAX_ZOOM),
            size,
            min_zoom: crate::constants::MIN_ZOOM,
            max_zoom: crate::constants::MAX_ZOOM,
            pixel_origin: None,
        }
    }

    /// Sets the center of the viewport, clamped to world bounds
    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::clamp_center(center);
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// using the Web Mercator projection (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        const EARTH_RADIUS: f64 = 6378137.0;
        let mercator = lat_lng.to_mercator();
        let world = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

        let pixel_x = (mercator.x + world / 2.0) / world * scale;
        let pixel_y = (-mercator.y + world / 2.0) / world * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        const EARTH_RADIUS: f64 = 6378137.0;
        let world = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - world / 2.0;
        let y = world / 2.0 - (pixel.y / scale) * world;

        LatLng::from_mercator(Point::new(x, y))
    }

    /// Gets or calculates the pixel origin for this viewport
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to screen pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let projected = self.project(lat_lng, None);
        let layer = projected.subtract(&self.get_pixel_origin());
        Point::new(layer.x + self.size.x / 2.0, layer.y + self.size.y / 2.0)
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        let projected = layer.add(&self.get_pixel_origin());
        self.unproject(&projected, None)
    }

    /// Pans the viewport by the given pixel offset.
    ///
    /// Returns the actual delta that was applied.
    pub fn pan(&mut self, delta: Point) -> Point {
        let current = self.project(&self.center, None);
        let moved = current.subtract(&delta);
        let new_center = self.unproject(&moved, None);

        let before = self.center;
        self.set_center(new_center);

        self.project(&self.center, None)
            .subtract(&self.project(&before, None))
    }

    /// Zooms the viewport to a specific level, keeping a focus point stationary
    /// when one is given
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let old_zoom = self.zoom;

        // No-op if zoom does not change significantly
        if (new_zoom - old_zoom).abs() < 0.001 {
            return;
        }

        if let Some(focus_screen) = focus_point {
            let focus_latlng = self.pixel_to_lat_lng(&focus_screen);

            self.zoom = new_zoom;
            self.update_pixel_origin();

            let new_focus_screen = self.lat_lng_to_pixel(&focus_latlng);
            let offset = new_focus_screen.subtract(&focus_screen);
            self.pan(offset);
        } else {
            self.zoom = new_zoom;
            self.update_pixel_origin();
        }
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            LatLng::new(crate::constants::DEFAULT_LAT, crate::constants::DEFAULT_LNG),
            crate::constants::DEFAULT_ZOOM,
            Point::new(800.0, 600.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(19.107093, 72.837296),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 19.107093);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_pixel = Point::new(256.0, 256.0);
        let center_lat_lng = viewport.pixel_to_lat_lng(&center_pixel);

        assert!((center_lat_lng.lat - 0.0).abs() < 0.01);
        assert!((center_lat_lng.lng - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0); // Below minimum
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0); // Above maximum
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let original_center = viewport.center;
        viewport.pan(Point::new(10.0, 10.0));

        assert_ne!(viewport.center, original_center);
    }

    #[test]
    fn test_default_matches_deployment() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center.lng, 72.837296);
        assert_eq!(viewport.center.lat, 19.107093);
        assert_eq!(viewport.zoom, 18.0);
    }
}
