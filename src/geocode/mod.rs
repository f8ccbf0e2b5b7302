use crate::{core::config::GeocodeOptions, core::geo::LatLng, Error, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .build()
        .expect("failed to build reqwest async client")
});

/// Seam for the external coordinate-extraction service.
///
/// Production code uses [`HttpResolver`]; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait CoordinateResolver: Send + Sync {
    /// Resolves a stored map link into coordinates
    async fn extract(&self, link: &str) -> Result<LatLng>;
}

/// JSON payload answered by the coordinate service
#[derive(Debug, Deserialize)]
struct CoordinatePayload {
    longitude: Option<f64>,
    latitude: Option<f64>,
}

impl CoordinatePayload {
    fn into_lat_lng(self) -> Result<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                let position = LatLng::new(lat, lng);
                if position.is_valid() {
                    Ok(position)
                } else {
                    Err(Error::InvalidCoordinates(format!(
                        "lat={lat}, lng={lng}"
                    )))
                }
            }
            _ => Err(Error::Geocode(
                "response is missing numeric longitude/latitude".to_string(),
            )),
        }
    }
}

/// HTTP-backed resolver: one `POST` with a form-encoded `url` field,
/// answered with `{ longitude, latitude }`
pub struct HttpResolver {
    options: GeocodeOptions,
}

impl HttpResolver {
    pub fn new(options: GeocodeOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl CoordinateResolver for HttpResolver {
    async fn extract(&self, link: &str) -> Result<LatLng> {
        let response = HTTP_CLIENT
            .post(&self.options.endpoint)
            .timeout(self.options.timeout)
            .form(&[("url", link)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Geocode(format!(
                "coordinate service answered {}",
                response.status()
            )));
        }

        let payload: CoordinatePayload = response.json().await?;
        payload.into_lat_lng()
    }
}

/// Lifecycle of the one-shot geocode resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeState {
    Idle,
    Resolving,
    Resolved(LatLng),
    Skipped,
    Failed,
}

impl GeocodeState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GeocodeState::Resolved(_) | GeocodeState::Skipped | GeocodeState::Failed
        )
    }
}

/// Successful outcome of a resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    Resolved(LatLng),
    /// No link was available; resolved immediately without a network call
    Skipped,
}

/// One-shot resolution of a stored map link into coordinates.
///
/// State machine: `Idle -> Resolving -> {Resolved, Skipped, Failed}`. All
/// three end states are terminal for a given link value: repeated calls
/// replay the recorded outcome without another network round-trip, and a
/// failure is not retried. A changed link, or an explicit
/// [`GeocodeSync::refresh`], re-arms the machine.
pub struct GeocodeSync {
    state: GeocodeState,
    link: Option<String>,
}

impl Default for GeocodeSync {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeSync {
    pub fn new() -> Self {
        Self {
            state: GeocodeState::Idle,
            link: None,
        }
    }

    pub fn state(&self) -> GeocodeState {
        self.state
    }

    /// Re-arms the machine so the next [`GeocodeSync::resolve`] issues a
    /// fresh request even for an unchanged link (the explicit
    /// "update location" action).
    pub fn refresh(&mut self) {
        self.state = GeocodeState::Idle;
    }

    fn normalize(link: Option<&str>) -> Option<String> {
        link.map(str::trim)
            .filter(|trimmed| !trimmed.is_empty())
            .map(str::to_string)
    }

    /// Resolves the stored link, at most once per link value.
    ///
    /// A null or empty link resolves immediately with
    /// [`GeocodeOutcome::Skipped`] — not an error, and no network call is
    /// made. On failure the machine parks in [`GeocodeState::Failed`] and
    /// the error is returned for the caller to surface; the viewport is
    /// never touched from here.
    pub async fn resolve(
        &mut self,
        resolver: &dyn CoordinateResolver,
        link: Option<&str>,
    ) -> Result<GeocodeOutcome> {
        let normalized = Self::normalize(link);

        if normalized == self.link && self.state.is_terminal() {
            return match self.state {
                GeocodeState::Resolved(position) => Ok(GeocodeOutcome::Resolved(position)),
                GeocodeState::Skipped => Ok(GeocodeOutcome::Skipped),
                GeocodeState::Failed => Err(Error::Geocode(
                    "previous resolution failed; not retried for an unchanged link".to_string(),
                )),
                _ => unreachable!("terminal state"),
            };
        }

        self.link = normalized.clone();

        let Some(link) = normalized else {
            self.state = GeocodeState::Skipped;
            return Ok(GeocodeOutcome::Skipped);
        };

        self.state = GeocodeState::Resolving;
        match resolver.extract(&link).await {
            Ok(position) => {
                self.state = GeocodeState::Resolved(position);
                Ok(GeocodeOutcome::Resolved(position))
            }
            Err(err) => {
                self.state = GeocodeState::Failed;
                log::warn!("geocode resolution failed for stored link: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeResolver {
        calls: AtomicUsize,
        result: std::result::Result<LatLng, String>,
    }

    impl FakeResolver {
        fn ok(position: LatLng) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Ok(position),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(message.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CoordinateResolver for FakeResolver {
        async fn extract(&self, _link: &str) -> Result<LatLng> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(Error::Geocode)
        }
    }

    #[tokio::test]
    async fn test_null_link_skips_without_network() {
        let resolver = FakeResolver::ok(LatLng::new(19.2, 72.5));
        let mut sync = GeocodeSync::new();

        let outcome = sync.resolve(&resolver, None).await.unwrap();
        assert_eq!(outcome, GeocodeOutcome::Skipped);
        assert_eq!(sync.state(), GeocodeState::Skipped);
        assert_eq!(resolver.call_count(), 0);

        let outcome = sync.resolve(&resolver, Some("   ")).await.unwrap();
        assert_eq!(outcome, GeocodeOutcome::Skipped);
        assert_eq!(resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_resolution_is_terminal() {
        let resolver = FakeResolver::ok(LatLng::new(19.2, 72.5));
        let mut sync = GeocodeSync::new();

        let outcome = sync
            .resolve(&resolver, Some("https://maps.app.goo.gl/abc"))
            .await
            .unwrap();
        assert_eq!(outcome, GeocodeOutcome::Resolved(LatLng::new(19.2, 72.5)));

        // Same link resolves from the recorded state, no second call
        let outcome = sync
            .resolve(&resolver, Some("https://maps.app.goo.gl/abc"))
            .await
            .unwrap();
        assert_eq!(outcome, GeocodeOutcome::Resolved(LatLng::new(19.2, 72.5)));
        assert_eq!(resolver.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_retried_for_same_link() {
        let resolver = FakeResolver::failing("service unavailable");
        let mut sync = GeocodeSync::new();

        let err = sync
            .resolve(&resolver, Some("https://maps.app.goo.gl/abc"))
            .await;
        assert!(err.is_err());
        assert_eq!(sync.state(), GeocodeState::Failed);

        let err = sync
            .resolve(&resolver, Some("https://maps.app.goo.gl/abc"))
            .await;
        assert!(err.is_err());
        assert_eq!(resolver.call_count(), 1);
    }

    #[tokio::test]
    async fn test_changed_link_rearms_the_machine() {
        let resolver = FakeResolver::ok(LatLng::new(19.2, 72.5));
        let mut sync = GeocodeSync::new();

        sync.resolve(&resolver, Some("link-a")).await.unwrap();
        sync.resolve(&resolver, Some("link-b")).await.unwrap();
        assert_eq!(resolver.call_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_forces_a_new_attempt() {
        let resolver = FakeResolver::ok(LatLng::new(19.2, 72.5));
        let mut sync = GeocodeSync::new();

        sync.resolve(&resolver, Some("link-a")).await.unwrap();
        sync.refresh();
        sync.resolve(&resolver, Some("link-a")).await.unwrap();
        assert_eq!(resolver.call_count(), 2);
    }

    #[test]
    fn test_payload_validation() {
        let valid = CoordinatePayload {
            longitude: Some(72.5),
            latitude: Some(19.2),
        };
        assert_eq!(valid.into_lat_lng().unwrap(), LatLng::new(19.2, 72.5));

        let missing = CoordinatePayload {
            longitude: Some(72.5),
            latitude: None,
        };
        assert!(matches!(missing.into_lat_lng(), Err(Error::Geocode(_))));

        let out_of_range = CoordinatePayload {
            longitude: Some(500.0),
            latitude: Some(19.2),
        };
        assert!(matches!(
            out_of_range.into_lat_lng(),
            Err(Error::InvalidCoordinates(_))
        ));
    }
}
