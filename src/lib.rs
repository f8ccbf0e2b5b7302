//! # aidmap
//!
//! A headless clinic-locator map engine.
//!
//! This library provides the state management behind an interactive
//! legal-aid clinic map: an owned map surface with viewport and marker
//! registry, a pure clinic filter, full-rebuild marker reconciliation,
//! a draggable user-location marker, and a one-shot geocode sync that
//! resolves a stored map link into coordinates and flies the viewport
//! to them.

pub mod animation;
pub mod clinics;
pub mod core;
pub mod geocode;
pub mod location;
pub mod locator;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
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

pub use crate::animation::{easing::EasingFunction, transition::FlyTransition};

pub use crate::geocode::{
    CoordinateResolver, GeocodeOutcome, GeocodeState, GeocodeSync, HttpResolver,
};

pub use crate::location::LocationMarker;

pub use crate::locator::{ClinicLocator, Notice, SearchResults};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Geocode error: {0}")]
    Geocode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Marker error: {0}")]
    Marker(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
