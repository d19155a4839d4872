//! Map shapes for a resolver answer.

use super::types::ResolverOutput;
use crate::geodesy::{generate_circle_polygon, generate_geodesic_sector, generate_ray_line, km_to_meters, GeoPoint};
use crate::geojson::{Feature, FeatureCollection, Geometry};
use serde::{Deserialize, Serialize};

/// Reach of the sector wedge and azimuth lines.
pub const LOCATOR_RADIUS_KM: f64 = 5000.0;

const WEDGE_STEPS: usize = 64;
const HINT_CIRCLE_POINTS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgeProperties {
    pub start_deg: f64,
    pub end_deg: f64,
    pub center_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintRingProperties {
    pub label: String,
    pub km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzimuthLineProperties {
    pub label: String,
    pub azimuth: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocatorGeoJson {
    pub sector: FeatureCollection<WedgeProperties>,
    pub rings: FeatureCollection<HintRingProperties>,
    pub azimuth: FeatureCollection<AzimuthLineProperties>,
    pub moon: FeatureCollection<AzimuthLineProperties>,
}

fn azimuth_line(center: GeoPoint, label: &str, azimuth: f64) -> Feature<AzimuthLineProperties> {
    Feature::new(
        Geometry::line_string(generate_ray_line(
            center.lat,
            center.lng,
            azimuth,
            km_to_meters(LOCATOR_RADIUS_KM),
        )),
        AzimuthLineProperties {
            label: label.to_string(),
            azimuth,
        },
    )
}

/// Wedge, one circle per distance hint, and a line per computed azimuth.
pub fn build_locator_geojson(center: GeoPoint, output: &ResolverOutput) -> LocatorGeoJson {
    let mut layers = LocatorGeoJson::default();
    let sector = output.sector;

    layers.sector.push(Feature::new(
        Geometry::polygon(generate_geodesic_sector(
            center.lat,
            center.lng,
            LOCATOR_RADIUS_KM,
            sector.start_deg,
            sector.end_deg,
            WEDGE_STEPS,
        )),
        WedgeProperties {
            start_deg: sector.start_deg,
            end_deg: sector.end_deg,
            center_deg: sector.center_deg,
        },
    ));

    for hint in &output.distance_hints {
        layers.rings.push(Feature::new(
            Geometry::polygon(generate_circle_polygon(
                center.lat,
                center.lng,
                km_to_meters(hint.km),
                HINT_CIRCLE_POINTS,
            )),
            HintRingProperties {
                label: hint.label.clone(),
                km: hint.km,
            },
        ));
    }

    if let Some(azimuth) = output.actual_azimuth {
        layers.azimuth.push(azimuth_line(center, "Target", azimuth));
    }
    if let Some(azimuth) = output.moon_azimuth {
        layers.moon.push(azimuth_line(center, "Moon", azimuth));
    }

    layers
}
