//! Map overlay builder: rays, distance rings and their intersections.
//!
//! Distances inside [`OverlaySettings`] are miles; `distance_unit` only
//! affects the values and labels shown to the user.

use crate::chart::{BodyGroup, ChartBody};
use crate::geodesy::{destination_point, generate_circle_polygon, generate_ray_line, miles_to_km, miles_to_meters, GeoPoint};
use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::rings::{compute_ring_values, reference_degree, RingMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertices per ring polygon.
pub const RING_POLYGON_POINTS: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Km,
}

impl DistanceUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Km => "km",
        }
    }

    /// Express a distance given in miles in this unit.
    pub fn from_miles(self, miles: f64) -> f64 {
        match self {
            DistanceUnit::Miles => miles,
            DistanceUnit::Km => miles_to_km(miles),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledGroups {
    pub planets: bool,
    pub angles: bool,
    pub houses: bool,
}

impl EnabledGroups {
    pub fn allows(&self, group: BodyGroup) -> bool {
        match group {
            BodyGroup::Planet => self.planets,
            BodyGroup::Angle => self.angles,
            BodyGroup::House => self.houses,
        }
    }
}

impl Default for EnabledGroups {
    fn default() -> Self {
        Self {
            planets: true,
            angles: true,
            houses: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySettings {
    pub enabled_groups: EnabledGroups,
    pub max_distance_miles: f64,
    pub distance_unit: DistanceUnit,
    pub ring_mode: RingMode,
    /// Ascending ring distances in miles.
    pub ring_values_miles: Vec<f64>,
    pub show_labels_on_map: bool,
    pub selected_body_id: Option<String>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            enabled_groups: EnabledGroups::default(),
            max_distance_miles: 1600.0,
            distance_unit: DistanceUnit::Miles,
            ring_mode: RingMode::DegreeDerived,
            ring_values_miles: vec![1.0, 10.0, 100.0, 1000.0, 1600.0],
            show_labels_on_map: true,
            selected_body_id: None,
        }
    }
}

impl OverlaySettings {
    /// A highlighted body hides everything else; otherwise group flags apply.
    pub fn is_visible(&self, body: &ChartBody) -> bool {
        match &self.selected_body_id {
            Some(selected) => body.id == *selected,
            None => self.enabled_groups.allows(body.group),
        }
    }

    /// Recompute `ring_values_miles` for the current mode, max distance and
    /// reference degree (selected body, else IC).
    pub fn refresh_ring_values(&mut self, bodies: &[ChartBody]) {
        let reference = reference_degree(bodies, self.selected_body_id.as_deref());
        self.ring_values_miles = compute_ring_values(self.ring_mode, self.max_distance_miles, reference);
    }

    /// Ray length in miles. Degree-derived rays run to the largest ring,
    /// which may lie beyond the nominal max.
    pub fn ray_distance_miles(&self) -> f64 {
        match self.ring_mode {
            RingMode::DegreeDerived if !self.ring_values_miles.is_empty() => self
                .ring_values_miles
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
            _ => self.max_distance_miles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RayProperties {
    pub id: String,
    pub label: String,
    pub group: BodyGroup,
    pub color: String,
    pub bearing_deg: f64,
    /// Ray length in the display unit.
    pub length: f64,
    pub unit: DistanceUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingProperties {
    /// Radius in the display unit.
    pub radius: f64,
    pub unit: DistanceUnit,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionProperties {
    pub body_id: String,
    pub body_label: String,
    pub color: String,
    /// Ring radius in the display unit.
    pub ring_radius: f64,
    pub unit: DistanceUnit,
    pub bearing: f64,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeoJson {
    pub rays: FeatureCollection<RayProperties>,
    pub rings: FeatureCollection<RingProperties>,
    pub intersections: FeatureCollection<IntersectionProperties>,
}

/// One line per visible body, `distance_miles` long.
pub fn build_ray_features(
    center: GeoPoint,
    bodies: &[ChartBody],
    distance_miles: f64,
    settings: &OverlaySettings,
) -> Vec<Feature<RayProperties>> {
    let distance_meters = miles_to_meters(distance_miles);
    let unit = settings.distance_unit;

    bodies
        .iter()
        .filter(|body| settings.is_visible(body))
        .map(|body| {
            let coordinates = generate_ray_line(center.lat, center.lng, body.bearing_deg, distance_meters);
            Feature::new(
                Geometry::line_string(coordinates),
                RayProperties {
                    id: body.id.clone(),
                    label: body.label.clone(),
                    group: body.group,
                    color: body.color.clone(),
                    bearing_deg: body.bearing_deg,
                    length: unit.from_miles(distance_miles),
                    unit,
                },
            )
        })
        .collect()
}

/// One circle per ring value.
pub fn build_ring_features(
    center: GeoPoint,
    ring_values_miles: &[f64],
    unit: DistanceUnit,
) -> Vec<Feature<RingProperties>> {
    ring_values_miles
        .iter()
        .map(|&radius_miles| {
            let ring = generate_circle_polygon(
                center.lat,
                center.lng,
                miles_to_meters(radius_miles),
                RING_POLYGON_POINTS,
            );
            let radius = unit.from_miles(radius_miles);
            Feature::new(
                Geometry::polygon(ring),
                RingProperties {
                    radius,
                    unit,
                    label: format_ring_label(radius, unit),
                },
            )
        })
        .collect()
}

/// Points where each visible ray crosses each ring within the max distance.
pub fn build_intersection_features(
    center: GeoPoint,
    bodies: &[ChartBody],
    ring_values_miles: &[f64],
    settings: &OverlaySettings,
) -> Vec<Feature<IntersectionProperties>> {
    let unit = settings.distance_unit;
    let mut intersections = Vec::new();

    for body in bodies.iter().filter(|b| settings.is_visible(b)) {
        for &radius_miles in ring_values_miles {
            if radius_miles > settings.max_distance_miles {
                continue;
            }
            let point = destination_point(
                center.lat,
                center.lng,
                body.bearing_deg,
                miles_to_meters(radius_miles),
            );
            intersections.push(Feature::new(
                Geometry::point(point.position()),
                IntersectionProperties {
                    body_id: body.id.clone(),
                    body_label: body.label.clone(),
                    color: body.color.clone(),
                    ring_radius: unit.from_miles(radius_miles),
                    unit,
                    bearing: body.bearing_deg,
                    lat: point.lat,
                    lng: point.lng,
                },
            ));
        }
    }

    intersections
}

/// `"1.6k miles"`, `"100.0 km"`, `"0.25 miles"`.
pub fn format_ring_label(value: f64, unit: DistanceUnit) -> String {
    if value >= 1000.0 {
        format!("{:.1}k {}", value / 1000.0, unit)
    } else if value >= 1.0 {
        format!("{:.1} {}", value, unit)
    } else {
        format!("{:.2} {}", value, unit)
    }
}

/// Assemble rays, rings and intersections around `center`.
pub fn build_overlay_geojson(center: GeoPoint, bodies: &[ChartBody], settings: &OverlaySettings) -> OverlayGeoJson {
    let ray_distance = settings.ray_distance_miles();
    log::debug!(
        "overlay at ({:.4}, {:.4}): {} bodies, {} rings, rays {:.2} miles",
        center.lat,
        center.lng,
        bodies.len(),
        settings.ring_values_miles.len(),
        ray_distance
    );

    OverlayGeoJson {
        rays: FeatureCollection::new(build_ray_features(center, bodies, ray_distance, settings)),
        rings: FeatureCollection::new(build_ring_features(
            center,
            &settings.ring_values_miles,
            settings.distance_unit,
        )),
        intersections: FeatureCollection::new(build_intersection_features(
            center,
            bodies,
            &settings.ring_values_miles,
            settings,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ZodiacSign;

    fn body(id: &str, group: BodyGroup, bearing: f64) -> ChartBody {
        ChartBody {
            id: id.to_string(),
            label: id.to_uppercase(),
            sign: ZodiacSign::Aries,
            deg: bearing % 30.0,
            abs_deg: bearing,
            bearing_deg: bearing,
            group,
            color: "#123456".to_string(),
        }
    }

    fn bodies() -> Vec<ChartBody> {
        vec![
            body("sun", BodyGroup::Planet, 90.0),
            body("asc", BodyGroup::Angle, 200.0),
            body("house_1", BodyGroup::House, 200.0),
        ]
    }

    #[test]
    fn test_visibility_by_group() {
        let settings = OverlaySettings::default();
        let visible: Vec<_> = bodies().into_iter().filter(|b| settings.is_visible(b)).collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|b| b.group != BodyGroup::House));
    }

    #[test]
    fn test_visibility_selected_body_overrides_groups() {
        let settings = OverlaySettings {
            selected_body_id: Some("house_1".to_string()),
            ..Default::default()
        };
        let visible: Vec<_> = bodies().into_iter().filter(|b| settings.is_visible(b)).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "house_1");
    }

    #[test]
    fn test_ray_distance_policy() {
        let mut settings = OverlaySettings {
            ring_mode: RingMode::Decimal,
            ring_values_miles: vec![1.0, 10.0, 100.0, 1000.0, 1600.0],
            ..Default::default()
        };
        assert_eq!(settings.ray_distance_miles(), 1600.0);

        settings.ring_mode = RingMode::DegreeDerived;
        settings.ring_values_miles = vec![0.25, 2.5, 25.0, 250.0, 2500.0];
        assert_eq!(settings.ray_distance_miles(), 2500.0);

        settings.ring_values_miles.clear();
        assert_eq!(settings.ray_distance_miles(), 1600.0);
    }

    #[test]
    fn test_refresh_ring_values_uses_selected_body() {
        let mut settings = OverlaySettings {
            selected_body_id: Some("sun".to_string()),
            ..Default::default()
        };
        let mut bodies = bodies();
        bodies[0].deg = 20.0;
        settings.refresh_ring_values(&bodies);
        assert_eq!(settings.ring_values_miles.len(), 5);
        assert!((settings.ring_values_miles[4] - 2000.0).abs() < 1e-9);

        settings.ring_mode = RingMode::Decimal;
        settings.refresh_ring_values(&bodies);
        assert_eq!(settings.ring_values_miles, vec![1.0, 10.0, 100.0, 1000.0, 1600.0]);
    }

    #[test]
    fn test_ring_features_in_km() {
        let rings = build_ring_features(GeoPoint::new(40.0, -74.0), &[1.0, 1000.0], DistanceUnit::Km);
        assert_eq!(rings.len(), 2);
        assert!((rings[0].properties.radius - 1.609344).abs() < 1e-9);
        assert_eq!(rings[0].properties.label, "1.6 km");
        assert_eq!(rings[1].properties.label, "1.6k km");
        match &rings[0].geometry {
            Geometry::Polygon { coordinates } => {
                assert_eq!(coordinates[0].len(), RING_POLYGON_POINTS + 2);
                assert_eq!(coordinates[0].first(), coordinates[0].last());
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_intersections_skip_rings_beyond_max() {
        let settings = OverlaySettings {
            max_distance_miles: 100.0,
            ring_values_miles: vec![1.0, 10.0, 100.0, 1000.0],
            ..Default::default()
        };
        let points = build_intersection_features(GeoPoint::new(10.0, 10.0), &bodies(), &settings.ring_values_miles, &settings);
        // two visible bodies x three rings within 100 miles
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.properties.ring_radius <= 100.0));
    }

    #[test]
    fn test_format_ring_label() {
        assert_eq!(format_ring_label(1600.0, DistanceUnit::Miles), "1.6k miles");
        assert_eq!(format_ring_label(100.0, DistanceUnit::Km), "100.0 km");
        assert_eq!(format_ring_label(0.25, DistanceUnit::Miles), "0.25 miles");
    }

    #[test]
    fn test_overlay_serializes_with_renderer_names() {
        let settings = OverlaySettings::default();
        let overlay = build_overlay_geojson(GeoPoint::new(0.0, 0.0), &bodies(), &settings);
        let value = serde_json::to_value(&overlay).unwrap();
        assert_eq!(value["rays"]["type"], "FeatureCollection");
        assert_eq!(value["rays"]["features"][0]["properties"]["bearingDeg"], 90.0);
        assert_eq!(value["rings"]["features"][0]["properties"]["unit"], "miles");
        assert_eq!(value["intersections"]["features"][0]["properties"]["bodyId"], "sun");
    }
}
