use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::models::{Coordinate, HazardCategory, HazardReport};

/// Where hazard reports come from. A backend client would implement this.
pub trait ReportSource: Send + Sync {
    fn list_reports(&self) -> Result<Vec<HazardReport>, ReportError>;
}

impl<R: ReportSource + ?Sized> ReportSource for Box<R> {
    fn list_reports(&self) -> Result<Vec<HazardReport>, ReportError> {
        (**self).list_reports()
    }
}

/// Built-in reports shipped with the app.
#[derive(Default)]
pub struct StaticReports;

impl ReportSource for StaticReports {
    fn list_reports(&self) -> Result<Vec<HazardReport>, ReportError> {
        Ok(vec![
            HazardReport {
                id: 1,
                category: HazardCategory::Landslide,
                // near Mandi
                position: Coordinate {
                    latitude: 31.71,
                    longitude: 76.93,
                },
                title: "Major Landslide".to_string(),
                description: "Road completely blocked near Aut.".to_string(),
            },
            HazardReport {
                id: 2,
                category: HazardCategory::Snow,
                // near Manali
                position: Coordinate {
                    latitude: 32.2396,
                    longitude: 77.1887,
                },
                title: "Heavy Snowfall".to_string(),
                description: "Atal Tunnel approach has heavy snow.".to_string(),
            },
        ])
    }
}

/// Reports read from a JSON array on disk.
pub struct FileReports {
    path: PathBuf,
}

impl FileReports {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSource for FileReports {
    fn list_reports(&self) -> Result<Vec<HazardReport>, ReportError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reports: Vec<HazardReport> =
            serde_json::from_str(&content).map_err(|source| ReportError::Parse {
                path: self.path.clone(),
                source,
            })?;
        ensure_unique_ids(&reports)?;
        info!("loaded {} reports from {}", reports.len(), self.path.display());
        Ok(reports)
    }
}

fn ensure_unique_ids(reports: &[HazardReport]) -> Result<(), ReportError> {
    let mut seen = HashSet::with_capacity(reports.len());
    for report in reports {
        if !seen.insert(report.id) {
            debug!("report {} appears more than once", report.id);
            return Err(ReportError::DuplicateId(report.id));
        }
    }
    Ok(())
}
