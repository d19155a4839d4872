//! Distance hints from the angular separation of two rulers.

use super::types::DistanceHint;
use crate::zodiac::Modality;

/// Separations below this are treated as [`MIN_DELTA_DEG`].
const DELTA_EPSILON_DEG: f64 = 0.1;
pub const MIN_DELTA_DEG: f64 = 0.5;

const KM_TO_MILES: f64 = 0.621371;

/// Shortest arc between two ecliptic degrees, floored at [`MIN_DELTA_DEG`].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let mut delta = (a - b).abs() % 360.0;
    if delta > 180.0 {
        delta = 360.0 - delta;
    }
    if delta < DELTA_EPSILON_DEG {
        MIN_DELTA_DEG
    } else {
        delta
    }
}

/// Multipliers (km per degree) and their band names for a modality.
///
/// Fixed signs keep things close, cardinal signs send them far.
pub fn modality_scales(modality: Modality) -> [(f64, &'static str); 3] {
    match modality {
        Modality::Fixed => [
            (0.5, "Very Close (Fixed)"),
            (2.0, "Neighborhood (Fixed)"),
            (10.0, "Town (Fixed)"),
        ],
        Modality::Cardinal => [
            (5.0, "Far (Cardinal)"),
            (50.0, "Region (Cardinal)"),
            (200.0, "Country (Cardinal)"),
        ],
        Modality::Mutable => [
            (1.0, "Nearby (Mutable)"),
            (10.0, "City (Mutable)"),
            (50.0, "State (Mutable)"),
        ],
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Three escalating hints for a separation of `delta_deg`.
pub fn distance_hints(delta_deg: f64, modality: Modality) -> Vec<DistanceHint> {
    modality_scales(modality)
        .iter()
        .map(|&(scale, band)| {
            let km = delta_deg * scale;
            DistanceHint {
                km: round_tenth(km),
                miles: round_tenth(km * KM_TO_MILES),
                meters: (km * 1000.0).round(),
                label: format!("{} (Δ {:.1}°)", band, delta_deg),
            }
        })
        .collect()
}
