use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::DeviceConfig;
use crate::error::{PositionError, PositionErrorCode};
use crate::location::LocationProvider;
use crate::models::{Coordinate, PermissionState};

/// Stand-in for platform location services, driven by the `[device]` config section.
pub struct SimulatedDevice {
    permission: PermissionState,
    fix: Option<(f64, f64)>,
    delay: Duration,
    timeout: bool,
}

impl SimulatedDevice {
    pub fn new(config: &DeviceConfig) -> Self {
        let fix = match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };
        Self {
            permission: config.permission,
            fix,
            delay: Duration::from_millis(config.delay_ms.unwrap_or(0)),
            timeout: config.timeout,
        }
    }

    async fn settle(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl LocationProvider for SimulatedDevice {
    async fn request_foreground_permission(&self) -> Result<PermissionState, PositionError> {
        self.settle().await;
        debug!("simulated permission prompt answered {:?}", self.permission);
        Ok(self.permission)
    }

    async fn get_current_position(&self) -> Result<Coordinate, PositionError> {
        self.settle().await;
        if self.permission != PermissionState::Granted {
            return Err(PositionError::new(
                PositionErrorCode::PermissionDenied,
                "location permission not granted",
            ));
        }
        if self.timeout {
            return Err(PositionError::new(PositionErrorCode::Timeout, "position request timed out"));
        }
        let (lat, lon) = self
            .fix
            .ok_or_else(|| PositionError::unavailable("no position fix configured"))?;
        Coordinate::new(lat, lon).map_err(|e| PositionError::unavailable(e.to_string()))
    }
}
