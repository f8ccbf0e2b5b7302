use crate::{
    animation::transition::{FlyTarget, FlyTransition},
    animation::EasingFunction,
    clinics::directory::UnderservedRegion,
    core::{config::SurfaceOptions, geo::LatLng, geo::Point, viewport::Viewport},
    prelude::HashMap,
    Error, Result,
};
use std::time::Duration;

/// Handle to the display container the surface renders into.
///
/// Passed explicitly to [`MapSurface::initialize`] instead of being looked
/// up through ambient globals.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    attached: bool,
    size: Point,
}

impl Container {
    /// A container that is attached to the display tree
    pub fn attached(size: Point) -> Self {
        Self {
            attached: true,
            size,
        }
    }

    /// A container that has not been attached yet
    pub fn detached() -> Self {
        Self {
            attached: false,
            size: Point::default(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn size(&self) -> Point {
        self.size
    }
}

/// Identifier for a viewport-change subscription
pub type SubscriptionId = u64;

type ViewportCallback = Box<dyn Fn(&Viewport) + Send + Sync>;

/// Popup content bound to a marker: a title and a bulleted list of lines
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub items: Vec<String>,
}

impl Popup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    /// Render the popup body as text, one bullet per item
    pub fn body(&self) -> String {
        let mut out = self.title.clone();
        for item in &self.items {
            out.push('\n');
            out.push_str("• ");
            out.push_str(item);
        }
        out
    }
}

/// A live on-map marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    id: String,
    position: LatLng,
    popup: Option<Popup>,
    draggable: bool,
}

impl MarkerHandle {
    pub fn new(id: impl Into<String>, position: LatLng) -> Self {
        Self {
            id: id.into(),
            position,
            popup: None,
            draggable: false,
        }
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }
}

/// Owns the map viewport, the live marker registry, and viewport-change
/// subscriptions.
///
/// The surface is the single owner of this state; collaborators receive it
/// by explicit reference. After [`MapSurface::teardown`] every mutating
/// operation is a safe no-op, so late async results (a geocode resolving
/// after unmount) cannot write to a released surface.
pub struct MapSurface {
    viewport: Viewport,
    options: SurfaceOptions,
    markers: HashMap<String, MarkerHandle>,
    /// Insertion order of marker ids, for deterministic iteration
    marker_order: Vec<String>,
    regions: Vec<UnderservedRegion>,
    subscribers: Vec<(SubscriptionId, ViewportCallback)>,
    next_subscription: SubscriptionId,
    transition: Option<FlyTransition>,
    torn_down: bool,
}

impl MapSurface {
    /// Creates the surface once for an attached container.
    ///
    /// Fails with [`Error::Initialization`] when the container is not yet
    /// attached to the display tree; that error is fatal to the component
    /// instance and must propagate to the embedder so a reload affordance
    /// can be shown.
    pub fn initialize(container: &Container, options: SurfaceOptions) -> Result<Self> {
        if !container.is_attached() {
            return Err(Error::Initialization(
                "map container is not attached to the display tree".to_string(),
            ));
        }

        let mut viewport = Viewport::new(
            options.initial_center,
            options.initial_zoom,
            container.size(),
        );
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);

        Ok(Self {
            viewport,
            options,
            markers: HashMap::default(),
            marker_order: Vec::new(),
            regions: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            transition: None,
            torn_down: false,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Registers a callback fired on every viewport change, including every
    /// intermediate frame of a running fly animation. No debouncing.
    pub fn on_viewport_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Viewport) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.viewport);
        }
    }

    /// Pans the viewport by a pixel delta, as a user drag gesture would
    pub fn pan(&mut self, delta: Point) {
        if self.torn_down {
            log::debug!("pan ignored: surface already torn down");
            return;
        }
        self.viewport.pan(delta);
        self.emit();
    }

    /// Zooms the viewport, as a user wheel/pinch gesture would
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        if self.torn_down {
            log::debug!("zoom ignored: surface already torn down");
            return;
        }
        self.viewport.zoom_to(zoom, focus_point);
        self.emit();
    }

    /// Sets center and zoom in one step
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        if self.torn_down {
            log::debug!("set_view ignored: surface already torn down");
            return;
        }
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.emit();
    }

    /// Starts an animated flight of the viewport towards `target`.
    ///
    /// Any previous flight is interrupted. The animation is advanced by
    /// [`MapSurface::tick`]; subscribers keep firing with intermediate
    /// states, and the final emitted state equals `target`.
    pub fn fly_to(&mut self, target: FlyTarget, duration: Duration, easing: EasingFunction) {
        if self.torn_down {
            log::debug!("fly_to ignored: surface already torn down");
            return;
        }
        if let Some(active) = &mut self.transition {
            active.cancel();
        }
        let mut transition = FlyTransition::new(
            self.viewport.center,
            self.viewport.zoom,
            target,
            duration,
            easing,
        );
        transition.start();
        self.transition = Some(transition);
    }

    pub fn has_active_transition(&self) -> bool {
        self.transition
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }

    /// Advances the active fly animation, if any, applying and emitting the
    /// next viewport state
    pub fn tick(&mut self, delta: Duration) {
        if self.torn_down {
            return;
        }
        let Some(transition) = &mut self.transition else {
            return;
        };

        match transition.update(delta) {
            Some(step) => {
                self.viewport.set_center(step.center);
                self.viewport.set_zoom(step.zoom);
                if step.finished {
                    self.transition = None;
                }
                self.emit();
            }
            None => {
                self.transition = None;
            }
        }
    }

    /// Adds a marker to the registry, replacing any marker with the same id
    pub fn add_marker(&mut self, marker: MarkerHandle) {
        if self.torn_down {
            log::debug!("add_marker ignored: surface already torn down");
            return;
        }
        let id = marker.id().to_string();
        if self.markers.insert(id.clone(), marker).is_none() {
            self.marker_order.push(id);
        }
    }

    /// Removes a marker by id
    pub fn remove_marker(&mut self, id: &str) -> Option<MarkerHandle> {
        self.marker_order.retain(|existing| existing != id);
        self.markers.remove(id)
    }

    pub fn marker(&self, id: &str) -> Option<&MarkerHandle> {
        self.markers.get(id)
    }

    /// Applies a function to a marker mutably
    pub fn with_marker_mut<F, R>(&mut self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut MarkerHandle) -> R,
    {
        if self.torn_down {
            return None;
        }
        self.markers.get_mut(id).map(f)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Marker ids in insertion order
    pub fn marker_ids(&self) -> Vec<String> {
        self.marker_order.clone()
    }

    /// Registers an underserved-region overlay
    pub fn add_region(&mut self, region: UnderservedRegion) {
        if self.torn_down {
            log::debug!("add_region ignored: surface already torn down");
            return;
        }
        self.regions.push(region);
    }

    pub fn regions(&self) -> &[UnderservedRegion] {
        &self.regions
    }

    /// Releases all underlying resources: markers, region overlays,
    /// subscriptions, and any in-flight animation.
    ///
    /// Safe to call on an already-torn-down surface (a no-op).
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(transition) = &mut self.transition {
            transition.cancel();
        }
        self.transition = None;
        self.markers.clear();
        self.marker_order.clear();
        self.regions.clear();
        self.subscribers.clear();
    }
}
