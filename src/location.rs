//! Location acquisition
//!
//! One acquisition cycle asks the device for foreground permission, then for the current
//! position, and always ends in a resolved coordinate: the device fix, or the fallback
//! coordinate together with an advisory.
//!
//! Activations are tagged with a generation number. A newer activation supersedes any
//! cycle still in flight; when the older cycle settles its result is dropped instead of
//! overwriting the newer one.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{LocationError, PositionError};
use crate::models::{Coordinate, LocationResolution, LocationSource, PermissionState};

/// Device location services.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> Result<PermissionState, PositionError>;

    async fn get_current_position(&self) -> Result<Coordinate, PositionError>;
}

#[async_trait]
impl<P: LocationProvider + ?Sized> LocationProvider for Arc<P> {
    async fn request_foreground_permission(&self) -> Result<PermissionState, PositionError> {
        (**self).request_foreground_permission().await
    }

    async fn get_current_position(&self) -> Result<Coordinate, PositionError> {
        (**self).get_current_position().await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    pub resolution: LocationResolution,
    /// Why the fallback was used, if it was.
    pub advisory: Option<LocationError>,
}

impl Acquisition {
    fn pending() -> Self {
        Self {
            resolution: LocationResolution::Pending,
            advisory: None,
        }
    }

    fn device(coordinate: Coordinate) -> Self {
        Self {
            resolution: LocationResolution::Resolved {
                coordinate,
                source: LocationSource::Device,
            },
            advisory: None,
        }
    }

    fn fallback(coordinate: Coordinate, cause: LocationError) -> Self {
        Self {
            resolution: LocationResolution::Resolved {
                coordinate,
                source: LocationSource::Fallback,
            },
            advisory: Some(cause),
        }
    }

    pub fn advisory_message(&self) -> Option<String> {
        self.advisory.as_ref().map(ToString::to_string)
    }
}

pub struct LocationController<P> {
    provider: P,
    fallback: Coordinate,
    generation: AtomicU64,
    slot: watch::Sender<Acquisition>,
}

impl<P: LocationProvider> LocationController<P> {
    pub fn new(provider: P, fallback: Coordinate) -> Self {
        let (slot, _) = watch::channel(Acquisition::pending());
        Self {
            provider,
            fallback,
            generation: AtomicU64::new(0),
            slot,
        }
    }

    pub fn fallback(&self) -> Coordinate {
        self.fallback
    }

    /// Snapshot of the resolution slot.
    pub fn current(&self) -> Acquisition {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Acquisition> {
        self.slot.subscribe()
    }

    /// Waits until some cycle has committed a resolution.
    ///
    /// There is no timeout: a provider that never settles keeps the caller waiting.
    pub async fn resolved(&self) -> Acquisition {
        let mut rx = self.subscribe();
        let acquisition = match rx.wait_for(|a| a.resolution.is_resolved()).await {
            Ok(acquisition) => acquisition.clone(),
            // the sender lives in `self`, so the channel cannot close while we borrow it
            Err(_) => self.current(),
        };
        acquisition
    }

    /// Runs one acquisition cycle and returns its outcome.
    ///
    /// The outcome is committed to the slot only if no newer cycle was started meanwhile.
    pub async fn acquire(&self) -> Acquisition {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("location acquisition {} started", generation);

        let outcome = self.run_cycle().await;
        self.commit(generation, &outcome);
        outcome
    }

    async fn run_cycle(&self) -> Acquisition {
        match self.provider.request_foreground_permission().await {
            Ok(PermissionState::Granted) => {}
            Ok(state) => {
                info!("location permission not granted ({:?}), using fallback {}", state, self.fallback);
                return Acquisition::fallback(self.fallback, LocationError::PermissionDenied(state));
            }
            Err(e) => {
                warn!("location permission request failed: {}", e);
                return Acquisition::fallback(
                    self.fallback,
                    LocationError::PermissionDenied(PermissionState::Undetermined),
                );
            }
        }

        match self.provider.get_current_position().await {
            Ok(coordinate) => {
                info!("device location resolved at {}", coordinate);
                Acquisition::device(coordinate)
            }
            Err(e) => {
                warn!("device position unavailable: {}", e);
                Acquisition::fallback(self.fallback, LocationError::PositionUnavailable(e))
            }
        }
    }

    fn commit(&self, generation: u64, outcome: &Acquisition) {
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            debug!("discarding acquisition {} superseded by {}", generation, latest);
            return;
        }
        self.slot.send_replace(outcome.clone());
    }
}
