use crate::{
    animation::transition::FlyTarget,
    clinics::directory::ClinicRecord,
    core::surface::{MapSurface, MarkerHandle, Popup},
};

/// Reconciles the filtered clinic set against the live marker handles.
///
/// The renderer is the exclusive owner of the clinic-marker ids it has
/// drawn; each handle lives only as long as its record stays in the
/// filtered set for the current pass. Reconciliation is a full
/// teardown-and-redraw: with directory-sized clinic counts the simplicity
/// wins over incremental diffing, and the resulting on-screen set is the
/// same either way.
#[derive(Debug, Default)]
pub struct MarkerRenderer {
    live_ids: Vec<String>,
}

impl MarkerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn marker_id(record: &ClinicRecord) -> String {
        format!("{}{}", crate::constants::CLINIC_MARKER_PREFIX, record.id)
    }

    /// Replaces every currently drawn clinic handle with one handle per
    /// record in `filtered`, each bound to a popup listing the clinic's
    /// name and services.
    ///
    /// Postcondition: the live clinic-handle count equals `filtered.len()`.
    /// Markers outside the renderer's ownership (the user-location marker)
    /// are untouched.
    pub fn reconcile(&mut self, surface: &mut MapSurface, filtered: &[&ClinicRecord]) {
        for id in self.live_ids.drain(..) {
            surface.remove_marker(&id);
        }

        for record in filtered {
            let id = Self::marker_id(record);
            let popup = Popup::new(record.name.clone()).with_items(record.services.clone());
            surface.add_marker(MarkerHandle::new(id.clone(), record.position).with_popup(popup));
            self.live_ids.push(id);
        }
    }

    /// Number of clinic handles currently drawn by this renderer
    pub fn live_count(&self) -> usize {
        self.live_ids.len()
    }

    /// Flies the viewport to a clinic at the fixed close-up zoom, as
    /// triggered by clicking the clinic's list entry
    pub fn focus(&self, surface: &mut MapSurface, record: &ClinicRecord) {
        let target = FlyTarget {
            center: record.position,
            zoom: surface.options().close_up_zoom,
        };
        let duration = surface.options().list_fly_duration;
        let easing = surface.options().geocode_fly_easing;
        surface.fly_to(target, duration, easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clinics::{directory::ClinicDirectory, filter::{ClinicFilter, FilterCriteria}},
        core::{config::SurfaceOptions, geo::LatLng, geo::Point, surface::Container},
    };
    use std::time::Duration;

    fn surface() -> MapSurface {
        let container = Container::attached(Point::new(800.0, 600.0));
        MapSurface::initialize(&container, SurfaceOptions::default()).unwrap()
    }

    #[test]
    fn test_reconcile_draws_one_handle_per_record() {
        let directory = ClinicDirectory::sample();
        let mut surface = surface();
        let mut renderer = MarkerRenderer::new();

        let filtered = ClinicFilter::apply(&directory, &FilterCriteria::default());
        renderer.reconcile(&mut surface, &filtered);

        assert_eq!(renderer.live_count(), 20);
        assert_eq!(surface.marker_count(), 20);
    }

    #[test]
    fn test_reconcile_replaces_prior_state() {
        let directory = ClinicDirectory::sample();
        let mut surface = surface();
        let mut renderer = MarkerRenderer::new();

        renderer.reconcile(
            &mut surface,
            &ClinicFilter::apply(&directory, &FilterCriteria::default()),
        );
        renderer.reconcile(
            &mut surface,
            &ClinicFilter::apply(&directory, &FilterCriteria::with_search("legal aid society")),
        );

        // No stale markers, no duplicates
        assert_eq!(renderer.live_count(), 1);
        assert_eq!(surface.marker_count(), 1);
        assert!(surface.marker("clinic-2").is_some());

        renderer.reconcile(
            &mut surface,
            &ClinicFilter::apply(&directory, &FilterCriteria::with_search("no such clinic")),
        );
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn test_reconcile_leaves_foreign_markers_alone() {
        let directory = ClinicDirectory::sample();
        let mut surface = surface();
        let mut renderer = MarkerRenderer::new();

        surface.add_marker(
            MarkerHandle::new(crate::constants::USER_MARKER_ID, LatLng::new(19.1, 72.8))
                .draggable(true),
        );

        renderer.reconcile(
            &mut surface,
            &ClinicFilter::apply(&directory, &FilterCriteria::with_search("legal aid society")),
        );
        renderer.reconcile(&mut surface, &[]);

        assert!(surface.marker(crate::constants::USER_MARKER_ID).is_some());
        assert_eq!(surface.marker_count(), 1);
    }

    #[test]
    fn test_popup_lists_services() {
        let directory = ClinicDirectory::sample();
        let mut surface = surface();
        let mut renderer = MarkerRenderer::new();

        renderer.reconcile(
            &mut surface,
            &ClinicFilter::apply(&directory, &FilterCriteria::with_search("legal aid society")),
        );

        let marker = surface.marker("clinic-2").unwrap();
        let popup = marker.popup().unwrap();
        assert_eq!(popup.title, "Legal Aid Society");
        assert_eq!(
            popup.items,
            vec!["Immigration Law", "Employment Law", "Tenant Rights"]
        );
    }

    #[test]
    fn test_focus_flies_to_clinic_at_close_up_zoom() {
        let directory = ClinicDirectory::sample();
        let mut surface = surface();
        let renderer = MarkerRenderer::new();
        let clinic = directory.by_id(2).unwrap();

        surface.zoom_to(10.0, None);
        renderer.focus(&mut surface, clinic);
        assert!(surface.has_active_transition());

        for _ in 0..100 {
            surface.tick(Duration::from_millis(16));
        }
        assert_eq!(surface.viewport().center, clinic.position);
        assert_eq!(surface.viewport().zoom, 18.0);
    }
}
