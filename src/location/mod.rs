use crate::core::{geo::LatLng, surface::MapSurface, surface::MarkerHandle};

type DragEndCallback = Box<dyn Fn(LatLng) + Send + Sync>;

/// The draggable marker representing the user's current position.
///
/// The marker's position is owned here and synchronized with the viewport
/// center only at initial placement and on geocode-driven relocation —
/// never on pan. Dragging the marker does not move the viewport, and
/// panning the viewport does not silently move the marker.
pub struct LocationMarker {
    position: LatLng,
    placed: bool,
    on_drag_end: Option<DragEndCallback>,
}

impl LocationMarker {
    pub fn new(initial: LatLng) -> Self {
        Self {
            position: initial,
            placed: false,
            on_drag_end: None,
        }
    }

    /// Creates or repositions the marker on the surface.
    ///
    /// The marker is draggable by construction. Viewport recentering is
    /// explicitly not part of placement; that happens only through
    /// `MapSurface::fly_to`, driven by the geocode sync or an explicit
    /// user action.
    pub fn place(&mut self, surface: &mut MapSurface, position: LatLng) {
        if surface.is_torn_down() {
            log::debug!("location marker placement ignored: surface torn down");
            return;
        }

        self.position = position;
        if self.placed {
            surface.with_marker_mut(crate::constants::USER_MARKER_ID, |marker| {
                marker.set_position(position)
            });
        } else {
            surface.add_marker(
                MarkerHandle::new(crate::constants::USER_MARKER_ID, position).draggable(true),
            );
            self.placed = true;
        }
    }

    /// Registers the callback fired once per drag gesture with the final
    /// position. This is the sole path by which user-initiated marker moves
    /// become position updates.
    pub fn on_drag_end<F>(&mut self, callback: F)
    where
        F: Fn(LatLng) + Send + Sync + 'static,
    {
        self.on_drag_end = Some(Box::new(callback));
    }

    /// Completes a drag gesture at `final_position`.
    ///
    /// Updates the owned position and the on-map handle, then fires the
    /// drag-end callback exactly once. The viewport is left untouched.
    pub fn end_drag(&mut self, surface: &mut MapSurface, final_position: LatLng) {
        if surface.is_torn_down() {
            log::debug!("drag end ignored: surface torn down");
            return;
        }

        self.position = final_position;
        surface.with_marker_mut(crate::constants::USER_MARKER_ID, |marker| {
            marker.set_position(final_position)
        });

        if let Some(callback) = &self.on_drag_end {
            callback(final_position);
        }
    }

    /// The marker's current position
    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::SurfaceOptions, geo::Point, surface::Container};
    use std::sync::{Arc, Mutex};

    fn surface() -> MapSurface {
        let container = Container::attached(Point::new(800.0, 600.0));
        MapSurface::initialize(&container, SurfaceOptions::default()).unwrap()
    }

    #[test]
    fn test_place_creates_then_repositions() {
        let mut surface = surface();
        let mut marker = LocationMarker::new(LatLng::new(19.107093, 72.837296));

        marker.place(&mut surface, LatLng::new(19.107093, 72.837296));
        assert!(marker.is_placed());
        assert_eq!(surface.marker_count(), 1);
        assert!(surface
            .marker(crate::constants::USER_MARKER_ID)
            .unwrap()
            .is_draggable());

        marker.place(&mut surface, LatLng::new(19.2, 72.5));
        assert_eq!(surface.marker_count(), 1);
        assert_eq!(
            surface
                .marker(crate::constants::USER_MARKER_ID)
                .unwrap()
                .position(),
            LatLng::new(19.2, 72.5)
        );
    }

    #[test]
    fn test_drag_end_fires_once_and_leaves_viewport_alone() {
        let mut surface = surface();
        let mut marker = LocationMarker::new(LatLng::new(19.107093, 72.837296));
        marker.place(&mut surface, LatLng::new(19.107093, 72.837296));

        let observed: Arc<Mutex<Vec<LatLng>>> = Arc::new(Mutex::new(Vec::new()));
        let observed_clone = observed.clone();
        marker.on_drag_end(move |position| {
            observed_clone.lock().unwrap().push(position);
        });

        let center_before = surface.viewport().center;
        marker.end_drag(&mut surface, LatLng::new(19.21, 72.96));

        let observed = observed.lock().unwrap();
        assert_eq!(observed.as_slice(), &[LatLng::new(19.21, 72.96)]);
        assert_eq!(marker.position(), LatLng::new(19.21, 72.96));
        assert_eq!(surface.viewport().center, center_before);
    }

    #[test]
    fn test_operations_after_teardown_are_ignored() {
        let mut surface = surface();
        let mut marker = LocationMarker::new(LatLng::new(19.107093, 72.837296));
        marker.place(&mut surface, LatLng::new(19.107093, 72.837296));

        surface.teardown();
        marker.place(&mut surface, LatLng::new(19.2, 72.5));
        marker.end_drag(&mut surface, LatLng::new(19.3, 72.4));

        assert_eq!(marker.position(), LatLng::new(19.107093, 72.837296));
        assert_eq!(surface.marker_count(), 0);
    }
}
