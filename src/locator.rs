use crate::{
    animation::transition::FlyTarget,
    clinics::{
        directory::{ClinicDirectory, ClinicRecord, UnderservedRegion},
        filter::{ClinicFilter, FilterCriteria, ServiceFacet},
        markers::MarkerRenderer,
    },
    core::{
        config::SurfaceOptions,
        geo::LatLng,
        surface::{Container, MapSurface},
    },
    geocode::{CoordinateResolver, GeocodeState, GeocodeSync},
    location::LocationMarker,
    Error, Result,
};
use std::time::Duration;

/// Outcome of the current filter pass, with the empty case made explicit
/// so the embedder renders a "no results" state instead of an empty void
#[derive(Debug, PartialEq)]
pub enum SearchResults<'a> {
    Matches(Vec<&'a ClinicRecord>),
    Empty,
}

impl<'a> SearchResults<'a> {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Matches(records) => records.len(),
            SearchResults::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchResults::Empty)
    }
}

/// A non-blocking notice for the embedding UI.
///
/// The observed deployment only logged geocode failures to the console;
/// notices make the degradation visible without interrupting the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn geocode_failure(err: &Error) -> Self {
        Self {
            message: format!("Could not resolve your saved address; keeping the default view ({err})"),
        }
    }
}

/// The clinic-locator component: directory, filter, marker reconciliation,
/// user-location marker, and geocode sync wired over one owned map surface.
///
/// All filter changes are reflected in markers synchronously, before the
/// call returns; two reconciliations never interleave.
pub struct ClinicLocator {
    surface: MapSurface,
    directory: ClinicDirectory,
    criteria: FilterCriteria,
    renderer: MarkerRenderer,
    location: LocationMarker,
    geocode: GeocodeSync,
    notices: Vec<Notice>,
}

impl ClinicLocator {
    /// Builds the locator over an attached container.
    ///
    /// Draws one marker per directory record (the filter starts empty),
    /// and places the user-location marker at the initial viewport center —
    /// the one moment marker and viewport are synchronized implicitly.
    pub fn new(
        container: &Container,
        options: SurfaceOptions,
        directory: ClinicDirectory,
    ) -> Result<Self> {
        let initial_center = options.initial_center;
        let surface = MapSurface::initialize(container, options)?;

        let mut locator = Self {
            surface,
            directory,
            criteria: FilterCriteria::default(),
            renderer: MarkerRenderer::new(),
            location: LocationMarker::new(initial_center),
            geocode: GeocodeSync::new(),
            notices: Vec::new(),
        };

        locator.location.place(&mut locator.surface, initial_center);
        locator.reconcile();
        Ok(locator)
    }

    /// Registers underserved-region overlays on the surface
    pub fn add_regions(&mut self, regions: Vec<UnderservedRegion>) {
        for region in regions {
            self.surface.add_region(region);
        }
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut MapSurface {
        &mut self.surface
    }

    pub fn directory(&self) -> &ClinicDirectory {
        &self.directory
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn location(&self) -> &LocationMarker {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut LocationMarker {
        &mut self.location
    }

    pub fn geocode_state(&self) -> GeocodeState {
        self.geocode.state()
    }

    fn reconcile(&mut self) {
        let filtered = ClinicFilter::apply(&self.directory, &self.criteria);
        self.renderer.reconcile(&mut self.surface, &filtered);
    }

    /// Updates the free-text search and synchronously reconciles markers
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.reconcile();
    }

    /// Updates the service facet and synchronously reconciles markers
    pub fn set_service(&mut self, facet: ServiceFacet) {
        self.criteria.service = facet;
        self.reconcile();
    }

    /// Clears search text and facet, restoring the full directory
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.reconcile();
    }

    /// The current filter outcome
    pub fn search_results(&self) -> SearchResults<'_> {
        let filtered = ClinicFilter::apply(&self.directory, &self.criteria);
        if filtered.is_empty() {
            SearchResults::Empty
        } else {
            SearchResults::Matches(filtered)
        }
    }

    /// Number of live clinic markers
    pub fn live_marker_count(&self) -> usize {
        self.renderer.live_count()
    }

    /// Flies to a clinic from its list entry
    pub fn focus_clinic(&mut self, id: u32) -> Result<()> {
        let clinic = self
            .directory
            .by_id(id)
            .ok_or_else(|| Error::Marker(format!("no clinic with id {id}")))?;
        self.renderer.focus(&mut self.surface, clinic);
        Ok(())
    }

    /// Completes a drag gesture of the user-location marker.
    ///
    /// The viewport center is untouched; only the marker and its owned
    /// position move.
    pub fn drag_location_to(&mut self, final_position: LatLng) {
        self.location.end_drag(&mut self.surface, final_position);
    }

    /// Resolves the stored map link once and, on success, flies the
    /// viewport to the coordinates at the close-up zoom and relocates the
    /// user-location marker.
    ///
    /// Failures never propagate: the viewport and marker keep their
    /// defaults, a diagnostic is logged, and a [`Notice`] is queued for the
    /// embedding UI. The returned state reports which terminal the machine
    /// reached.
    pub async fn sync_location(
        &mut self,
        resolver: &dyn CoordinateResolver,
        link: Option<&str>,
    ) -> GeocodeState {
        match self.geocode.resolve(resolver, link).await {
            Ok(crate::geocode::GeocodeOutcome::Resolved(position)) => {
                let target = FlyTarget {
                    center: position,
                    zoom: self.surface.options().close_up_zoom,
                };
                let duration = self.surface.options().geocode_fly_duration;
                let easing = self.surface.options().geocode_fly_easing;
                self.surface.fly_to(target, duration, easing);
                self.location.place(&mut self.surface, position);
            }
            Ok(crate::geocode::GeocodeOutcome::Skipped) => {}
            Err(err) => {
                self.notices.push(Notice::geocode_failure(&err));
            }
        }
        self.geocode.state()
    }

    /// Re-arms the geocode machine for an explicit "update location" action
    pub fn refresh_location(&mut self) {
        self.geocode.refresh();
    }

    /// Advances any running fly animation
    pub fn tick(&mut self, delta: Duration) {
        self.surface.tick(delta);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains queued notices for display
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Releases the surface and everything registered on it; idempotent
    pub fn teardown(&mut self) {
        self.surface.teardown();
    }
}
