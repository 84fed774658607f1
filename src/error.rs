//! Error types for location acquisition and report loading
//!
//! None of these are fatal to the map screen: location failures resolve to the
//! fallback region, report failures render an empty map.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::PermissionState;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

/// Failure reported by the device location provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code:?}: {message}")]
pub struct PositionError {
    pub code: PositionErrorCode,
    pub message: String,
}

impl PositionError {
    pub fn new(code: PositionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(PositionErrorCode::PositionUnavailable, message)
    }
}

/// Reasons an acquisition fell back to the default region.
///
/// The `Display` text is the advisory shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Permission to access location was denied. Showing default region.")]
    PermissionDenied(PermissionState),

    #[error("Could not determine your location. Showing default region.")]
    PositionUnavailable(#[source] PositionError),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to read reports from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reports in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate report id {0}")]
    DuplicateId(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_text_differs_by_cause() {
        let denied = LocationError::PermissionDenied(PermissionState::Denied).to_string();
        let failed = LocationError::PositionUnavailable(PositionError::unavailable("no fix")).to_string();
        assert_eq!(denied, "Permission to access location was denied. Showing default region.");
        assert_eq!(failed, "Could not determine your location. Showing default region.");
    }
}
