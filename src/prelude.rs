//! Prelude module for common aidmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use aidmap::prelude::*;`

pub use crate::core::{
    config::{BasemapStyle, GeocodeOptions, SurfaceOptions},
    geo::{LatLng, LatLngBounds, Point},
    surface::{Container, MapSurface, MarkerHandle, Popup, SubscriptionId},
    viewport::Viewport,
};

pub use crate::clinics::{
    directory::{ClinicDirectory, ClinicRecord, UnderservedRegion},
    filter::{ClinicFilter, FilterCriteria, ServiceFacet},
    markers::MarkerRenderer,
};

pub use crate::animation::{
    easing::EasingFunction,
    transition::{FlyTarget, FlyTransition, TransitionState},
};

pub use crate::geocode::{
    CoordinateResolver, GeocodeOutcome, GeocodeState, GeocodeSync, HttpResolver,
};

pub use crate::location::LocationMarker;

pub use crate::locator::{ClinicLocator, Notice, SearchResults};

pub use crate::{Error, Result};

/// Fast hash map used for marker and subscription registries
pub use fxhash::FxHashMap as HashMap;
