use serde::Serialize;

use crate::config::RenderConfig;
use crate::models::{ColorTag, SceneModel};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Circle {
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<u32>,
    pub radius: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body for a static map renderer (`POST /staticmap`).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StaticMapRequest {
    pub style: String,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub circles: Vec<Circle>,
}

pub fn css_color(tag: ColorTag) -> &'static str {
    match tag {
        ColorTag::SelfLocation => "#1e90ff",
        other => other.as_str(),
    }
}

/// Zoom level at which a viewport `width` pixels wide spans `span` degrees of longitude
/// on 512px tiles.
fn zoom_for_span(span: f64, width: u32) -> f64 {
    (360.0 * f64::from(width) / (512.0 * span)).log2()
}

pub fn static_map_request(scene: &SceneModel, config: &RenderConfig) -> StaticMapRequest {
    let circles = scene
        .annotations
        .iter()
        .map(|a| Circle {
            fill_color: Some(css_color(a.color).to_string()),
            // outlined so white pins stay visible
            stroke_color: Some("#333333".to_string()),
            stroke_width: Some(2),
            radius: config.pin_radius_m,
            latitude: a.position.latitude,
            longitude: a.position.longitude,
        })
        .collect();

    StaticMapRequest {
        style: config.style.clone(),
        latitude: scene.region.center.latitude,
        longitude: scene.region.center.longitude,
        zoom: zoom_for_span(scene.region.longitude_span, config.width),
        width: config.width,
        height: config.height,
        circles,
    }
}
