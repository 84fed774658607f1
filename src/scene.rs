use crate::models::{
    Annotation, AnnotationKey, ColorTag, Coordinate, HazardCategory, HazardReport, LocationSource,
    MapRegion, SceneModel, REGION_SPAN_DEGREES,
};

pub fn color_for(category: HazardCategory) -> ColorTag {
    match category {
        HazardCategory::Landslide => ColorTag::Brown,
        HazardCategory::Snow => ColorTag::White,
        HazardCategory::Accident => ColorTag::Orange,
        // Other, and anything added later
        _ => ColorTag::Red,
    }
}

pub fn region_around(center: Coordinate) -> MapRegion {
    MapRegion {
        center,
        latitude_span: REGION_SPAN_DEGREES,
        longitude_span: REGION_SPAN_DEGREES,
    }
}

/// Builds the render model for a resolved location and a set of reports.
///
/// The user's own pin comes first, and only when the location came from the device.
/// Report pins follow in input order.
pub fn compose(
    title: &str,
    coordinate: Coordinate,
    source: LocationSource,
    reports: &[HazardReport],
) -> SceneModel {
    let mut annotations = Vec::with_capacity(reports.len() + 1);

    if source == LocationSource::Device {
        annotations.push(Annotation {
            key: AnnotationKey::SelfLocation,
            position: coordinate,
            title: "You are here".to_string(),
            description: None,
            color: ColorTag::SelfLocation,
        });
    }

    annotations.extend(reports.iter().map(|report| Annotation {
        key: AnnotationKey::Report(report.id),
        position: report.position,
        title: report.title.clone(),
        description: (!report.description.is_empty()).then(|| report.description.clone()),
        color: color_for(report.category),
    }));

    SceneModel {
        title: title.to_string(),
        region: region_around(coordinate),
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportSource, StaticReports};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn report(id: u64, category: HazardCategory) -> HazardReport {
        HazardReport {
            id,
            category,
            position: coord(30.0 + id as f64 / 10.0, 77.0),
            title: format!("report {}", id),
            description: String::new(),
        }
    }

    #[test]
    fn colors_cover_every_category() {
        assert_eq!(color_for(HazardCategory::Landslide), ColorTag::Brown);
        assert_eq!(color_for(HazardCategory::Snow), ColorTag::White);
        assert_eq!(color_for(HazardCategory::Accident), ColorTag::Orange);
        assert_eq!(color_for(HazardCategory::Other), ColorTag::Red);
        assert_eq!(color_for(HazardCategory::Unrecognized), ColorTag::Red);
    }

    #[test]
    fn device_location_with_no_reports_yields_only_self() {
        let scene = compose("HimPath", coord(31.0, 77.0), LocationSource::Device, &[]);
        assert_eq!(scene.annotations.len(), 1);
        assert_eq!(scene.annotations[0].key, AnnotationKey::SelfLocation);
        assert_eq!(scene.annotations[0].color, ColorTag::SelfLocation);
        assert!(scene.annotations[0].description.is_none());
    }

    #[test]
    fn fallback_location_has_no_self_pin() {
        let reports: Vec<_> = (1..=5).map(|id| report(id, HazardCategory::Other)).collect();
        let scene = compose("HimPath", coord(31.0, 77.0), LocationSource::Fallback, &reports);
        assert_eq!(scene.annotations.len(), reports.len());
        assert!(scene.annotations.iter().all(|a| a.key != AnnotationKey::SelfLocation));
        let keys: Vec<_> = scene.annotations.iter().map(|a| a.key).collect();
        assert_eq!(keys, (1..=5).map(AnnotationKey::Report).collect::<Vec<_>>());
    }

    #[test]
    fn region_is_fixed_span_around_center() {
        let center = coord(-12.5, 130.25);
        let scene = compose("HimPath", center, LocationSource::Fallback, &[]);
        assert_eq!(scene.region.center, center);
        assert_eq!(scene.region.latitude_span, 2.5);
        assert_eq!(scene.region.longitude_span, 2.5);
        assert!(scene.annotations.is_empty());
    }

    #[test]
    fn compose_is_deterministic() {
        let reports = vec![report(3, HazardCategory::Accident), report(1, HazardCategory::Snow)];
        let a = compose("HimPath", coord(31.0, 77.0), LocationSource::Device, &reports);
        let b = compose("HimPath", coord(31.0, 77.0), LocationSource::Device, &reports);
        assert_eq!(a, b);
    }

    #[test]
    fn himachal_scenario() {
        let reports = StaticReports.list_reports().unwrap();
        let here = coord(31.71, 76.93);
        let scene = compose("HimPath", here, LocationSource::Device, &reports);

        assert_eq!(scene.region.center, here);
        assert_eq!((scene.region.latitude_span, scene.region.longitude_span), (2.5, 2.5));

        let pins: Vec<_> = scene
            .annotations
            .iter()
            .map(|a| (a.key, a.color, a.position))
            .collect();
        assert_eq!(
            pins,
            vec![
                (AnnotationKey::SelfLocation, ColorTag::SelfLocation, here),
                (AnnotationKey::Report(1), ColorTag::Brown, coord(31.71, 76.93)),
                (AnnotationKey::Report(2), ColorTag::White, coord(32.2396, 77.1887)),
            ]
        );
        assert_eq!(scene.annotations[1].title, "Major Landslide");
        assert_eq!(scene.annotations[2].title, "Heavy Snowfall");
    }
}
