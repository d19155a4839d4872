//! Great-circle geometry on a spherical Earth.
//!
//! Bearings are degrees clockwise from North. Coordinates in generated
//! shapes are `[lng, lat]` pairs, matching GeoJSON position order.

use crate::geojson::Position;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const METERS_PER_MILE: f64 = 1609.344;
pub const METERS_PER_KM: f64 = 1000.0;

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// GeoJSON position, `[lng, lat]`.
    pub fn position(&self) -> Position {
        [self.lng, self.lat]
    }

    /// Latitude clamped to [-90, 90], longitude wrapped to (-180, 180].
    pub fn normalized(&self) -> Self {
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lng: normalize_longitude(self.lng),
        }
    }

    pub fn destination(&self, bearing_deg: f64, distance_meters: f64) -> GeoPoint {
        destination_point(self.lat, self.lng, bearing_deg, distance_meters)
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_between(self.lat, self.lng, other.lat, other.lng)
    }
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles_to_meters(miles) / METERS_PER_KM
}

pub fn km_to_miles(km: f64) -> f64 {
    meters_to_miles(km * METERS_PER_KM)
}

pub fn km_to_meters(km: f64) -> f64 {
    km * METERS_PER_KM
}

pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

/// Wrap a longitude into (-180, 180]. Values already in range pass through
/// untouched.
pub fn normalize_longitude(lng: f64) -> f64 {
    if lng > -180.0 && lng <= 180.0 {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Point reached by travelling `distance_meters` from (`lat`, `lng`) along
/// the great circle with initial bearing `bearing_deg`.
///
/// φ2 = asin(sin φ1 · cos δ + cos φ1 · sin δ · cos θ)
/// λ2 = λ1 + atan2(sin θ · sin δ · cos φ1, cos δ − sin φ1 · sin φ2)
pub fn destination_point(lat: f64, lng: f64, bearing_deg: f64, distance_meters: f64) -> GeoPoint {
    if distance_meters == 0.0 {
        return GeoPoint::new(lat, normalize_longitude(lng));
    }

    let phi1 = lat.to_radians();
    let lambda1 = lng.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_meters / EARTH_RADIUS_METERS;

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    let sin_phi2 = (sin_phi1 * cos_delta + cos_phi1 * sin_delta * cos_theta).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let y = sin_theta * sin_delta * cos_phi1;
    let x = cos_delta - sin_phi1 * sin_phi2;
    let lambda2 = lambda1 + y.atan2(x);

    GeoPoint::new(phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

/// Haversine distance in meters.
pub fn distance_between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Initial great-circle bearing from the first point towards the second,
/// in [0, 360).
pub fn initial_bearing(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Closed ring of `num_points + 2` positions: one per evenly spaced bearing
/// from 0 to 360 inclusive, then the first position repeated.
pub fn generate_circle_polygon(
    center_lat: f64,
    center_lng: f64,
    radius_meters: f64,
    num_points: usize,
) -> Vec<Position> {
    let num_points = num_points.max(1);
    let step = 360.0 / num_points as f64;

    let mut coordinates: Vec<Position> = (0..=num_points)
        .map(|i| destination_point(center_lat, center_lng, step * i as f64, radius_meters).position())
        .collect();

    if let Some(first) = coordinates.first().copied() {
        coordinates.push(first);
    }
    coordinates
}

/// Two-point line from the center to the destination at `bearing_deg`.
pub fn generate_ray_line(
    center_lat: f64,
    center_lng: f64,
    bearing_deg: f64,
    distance_meters: f64,
) -> Vec<Position> {
    let end = destination_point(center_lat, center_lng, bearing_deg, distance_meters);
    vec![[center_lng, center_lat], end.position()]
}

/// Great-circle path sampled at `steps + 1` evenly spaced distances, the
/// first being the origin itself.
pub fn generate_geodesic_line(
    lat: f64,
    lng: f64,
    bearing_deg: f64,
    distance_km: f64,
    steps: usize,
) -> Vec<Position> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            if i == 0 {
                return [lng, lat];
            }
            let dist_km = distance_km * i as f64 / steps as f64;
            destination_point(lat, lng, bearing_deg, km_to_meters(dist_km)).position()
        })
        .collect()
}

/// Pie-slice polygon: out along `start_bearing`, clockwise around the arc
/// to `end_bearing`, then back to the center.
///
/// An end bearing smaller than the start wraps through North. The ring
/// begins and ends on the exact center position.
pub fn generate_geodesic_sector(
    lat: f64,
    lng: f64,
    radius_km: f64,
    start_bearing: f64,
    end_bearing: f64,
    steps: usize,
) -> Vec<Position> {
    let steps = steps.max(1);
    let radial_steps = (steps / 2).max(1);

    let mut coords = generate_geodesic_line(lat, lng, start_bearing, radius_km, radial_steps);

    let mut end = end_bearing;
    if end < start_bearing {
        end += 360.0;
    }
    let span = end - start_bearing;
    let radius_meters = km_to_meters(radius_km);

    // Arc starts at i = 1: i = 0 is the outer end of the first radial.
    for i in 1..=steps {
        let bearing = normalize_degrees(start_bearing + span * i as f64 / steps as f64);
        coords.push(destination_point(lat, lng, bearing, radius_meters).position());
    }

    let mut closing = generate_geodesic_line(lat, lng, end_bearing, radius_km, radial_steps);
    closing.reverse();
    coords.extend(closing.into_iter().skip(1));

    coords
}
