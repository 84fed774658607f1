use serde::Serialize;
use tracing::{error, info, warn};

use crate::location::{LocationController, LocationProvider};
use crate::models::{LocationResolution, SceneModel};
use crate::reports::ReportSource;
use crate::scene::compose;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ScreenState {
    Loading,
    Ready {
        scene: SceneModel,
        #[serde(skip_serializing_if = "Option::is_none")]
        advisory: Option<String>,
    },
}

/// The map screen: loading until the location resolves, then a scene composed once.
pub struct MapScreen<P, R> {
    title: String,
    controller: LocationController<P>,
    reports: R,
    state: ScreenState,
}

impl<P: LocationProvider, R: ReportSource> MapScreen<P, R> {
    pub fn new(title: impl Into<String>, controller: LocationController<P>, reports: R) -> Self {
        Self {
            title: title.into(),
            controller,
            reports,
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Activates location acquisition and builds the scene once it resolves.
    ///
    /// Calling again after the screen is ready returns the existing scene untouched.
    pub async fn load(&mut self) -> &ScreenState {
        if matches!(self.state, ScreenState::Ready { .. }) {
            return &self.state;
        }

        info!("acquiring location for {}", self.title);
        self.controller.acquire().await;
        let acquisition = self.controller.resolved().await;

        let (coordinate, source) = match acquisition.resolution {
            LocationResolution::Resolved { coordinate, source } => (coordinate, source),
            // resolved() only returns once the slot holds a resolution
            LocationResolution::Pending => return &self.state,
        };

        let reports = match self.reports.list_reports() {
            Ok(reports) => reports,
            Err(e) => {
                error!("failed to load hazard reports: {}", e);
                Vec::new()
            }
        };

        let advisory = acquisition.advisory_message();
        if let Some(message) = &advisory {
            warn!("{}", message);
        }

        let scene = compose(&self.title, coordinate, source, &reports);
        info!(
            "scene ready at {} with {} annotations ({:?} location)",
            coordinate,
            scene.annotations.len(),
            source
        );
        self.state = ScreenState::Ready { scene, advisory };
        &self.state
    }
}
