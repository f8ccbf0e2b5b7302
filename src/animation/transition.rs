use crate::animation::easing::{lerp, EasingFunction};
use crate::core::geo::LatLng;
use instant::Instant;
use std::time::Duration;

/// Target of a fly animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTarget {
    pub center: LatLng,
    pub zoom: f64,
}

/// State of a fly transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// One interpolated step of a running transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStep {
    pub center: LatLng,
    pub zoom: f64,
    pub finished: bool,
}

/// An animated viewport transition towards a fixed target.
///
/// The transition is time-driven but non-blocking: the owner advances it
/// with [`FlyTransition::update`] and applies each emitted step to the
/// viewport. On completion the step is exactly the target, never an
/// interpolated approximation of it.
pub struct FlyTransition {
    start_center: LatLng,
    start_zoom: f64,
    target: FlyTarget,
    duration: Duration,
    easing: EasingFunction,
    state: TransitionState,
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl FlyTransition {
    pub fn new(
        start_center: LatLng,
        start_zoom: f64,
        target: FlyTarget,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start_center,
            start_zoom,
            target,
            duration,
            easing,
            state: TransitionState::NotStarted,
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Start the transition
    pub fn start(&mut self) {
        if self.state == TransitionState::NotStarted {
            self.start_time = Some(Instant::now());
            self.state = TransitionState::Running;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Cancel the transition; no further steps are produced
    pub fn cancel(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    /// Advance the transition by `delta` and produce the next step.
    ///
    /// Returns `None` once the transition is finished or cancelled.
    pub fn update(&mut self, delta: Duration) -> Option<TransitionStep> {
        match self.state {
            TransitionState::NotStarted => {
                self.start();
                self.update(delta)
            }
            TransitionState::Running => {
                self.elapsed += delta;
                let progress = self.progress();
                let eased = self.easing.apply(progress);

                if progress >= 1.0 {
                    self.state = TransitionState::Completed;
                    // Terminal snap: the final emitted state equals the target.
                    return Some(TransitionStep {
                        center: self.target.center,
                        zoom: self.target.zoom,
                        finished: true,
                    });
                }

                Some(TransitionStep {
                    center: self.start_center.lerp(&self.target.center, eased),
                    zoom: lerp(self.start_zoom, self.target.zoom, eased),
                    finished: false,
                })
            }
            _ => None,
        }
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    pub fn target(&self) -> FlyTarget {
        self.target
    }

    /// Wall-clock instant the transition started, if it has
    pub fn started_at(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Check if the transition is finished
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(duration_ms: u64) -> FlyTransition {
        FlyTransition::new(
            LatLng::new(19.107093, 72.837296),
            18.0,
            FlyTarget {
                center: LatLng::new(19.2, 72.5),
                zoom: 18.0,
            },
            Duration::from_millis(duration_ms),
            EasingFunction::EaseOutQuad,
        )
    }

    #[test]
    fn test_intermediate_steps_then_exact_target() {
        let mut t = transition(1000);

        let step = t.update(Duration::from_millis(250)).unwrap();
        assert!(!step.finished);
        assert_ne!(step.center, LatLng::new(19.2, 72.5));

        let step = t.update(Duration::from_millis(250)).unwrap();
        assert!(!step.finished);

        let step = t.update(Duration::from_millis(600)).unwrap();
        assert!(step.finished);
        assert_eq!(step.center, LatLng::new(19.2, 72.5));
        assert_eq!(step.zoom, 18.0);
        assert!(t.is_finished());
    }

    #[test]
    fn test_no_steps_after_completion() {
        let mut t = transition(100);
        let _ = t.update(Duration::from_millis(200));
        assert!(t.update(Duration::from_millis(16)).is_none());
    }

    #[test]
    fn test_cancel_stops_steps() {
        let mut t = transition(1000);
        let _ = t.update(Duration::from_millis(100));
        t.cancel();
        assert!(t.update(Duration::from_millis(100)).is_none());
        assert_eq!(t.state(), TransitionState::Cancelled);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut t = FlyTransition::new(
            LatLng::new(0.0, 0.0),
            10.0,
            FlyTarget {
                center: LatLng::new(1.0, 1.0),
                zoom: 12.0,
            },
            Duration::ZERO,
            EasingFunction::Linear,
        );

        let step = t.update(Duration::from_millis(1)).unwrap();
        assert!(step.finished);
        assert_eq!(step.zoom, 12.0);
    }
}
