//! Distance ring policy.
//!
//! Ring values are in miles; display conversion happens in the overlay.

use crate::chart::ChartBody;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingMode {
    /// Fixed powers of ten below the max distance, plus the max itself.
    Decimal,
    /// Powers of ten scaled by a reference degree.
    #[default]
    DegreeDerived,
}

const DECIMAL_BANDS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];
const DEGREE_MULTIPLIERS: [f64; 5] = [0.01, 0.1, 1.0, 10.0, 100.0];

/// `{1, 10, 100, 1000}` below `max_distance`, then `max_distance`.
///
/// A non-positive max yields no rings at all.
pub fn compute_decimal_rings(max_distance: f64) -> Vec<f64> {
    if !(max_distance > 0.0) || !max_distance.is_finite() {
        log::warn!("max distance {} is not a usable ring radius", max_distance);
        return Vec::new();
    }
    let mut rings: Vec<f64> = DECIMAL_BANDS
        .iter()
        .copied()
        .filter(|r| *r < max_distance)
        .collect();
    rings.push(max_distance);
    rings
}

/// `{0.01, 0.1, 1, 10, 100} × reference_degree`.
///
/// The max distance does not filter these: rays must still reach the
/// outermost ring. A non-positive reference falls back to decimal rings.
pub fn compute_degree_derived_rings(reference_degree: f64, max_distance: f64) -> Vec<f64> {
    if reference_degree <= 0.0 || !reference_degree.is_finite() {
        log::debug!(
            "reference degree {} unusable, falling back to decimal rings",
            reference_degree
        );
        return compute_decimal_rings(max_distance);
    }
    DEGREE_MULTIPLIERS.iter().map(|m| m * reference_degree).collect()
}

/// Ring distances for a mode; a missing reference degree means decimal.
pub fn compute_ring_values(mode: RingMode, max_distance: f64, reference_degree: Option<f64>) -> Vec<f64> {
    match (mode, reference_degree) {
        (RingMode::DegreeDerived, Some(reference)) => compute_degree_derived_rings(reference, max_distance),
        _ => compute_decimal_rings(max_distance),
    }
}

/// Degree-in-sign the degree-derived rings scale from: the selected body
/// when there is one, otherwise the IC (`ic`, else the fourth house cusp).
pub fn reference_degree(bodies: &[ChartBody], selected_body_id: Option<&str>) -> Option<f64> {
    if let Some(selected) = selected_body_id {
        return bodies.iter().find(|b| b.id == selected).map(|b| b.deg);
    }
    bodies
        .iter()
        .find(|b| b.id == "ic")
        .or_else(|| bodies.iter().find(|b| b.id == "house_4"))
        .map(|b| b.deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BodyGroup;
    use crate::zodiac::ZodiacSign;

    fn body(id: &str, deg: f64) -> ChartBody {
        ChartBody {
            id: id.to_string(),
            label: id.to_string(),
            sign: ZodiacSign::Aries,
            deg,
            abs_deg: deg,
            bearing_deg: deg,
            group: BodyGroup::Planet,
            color: "#ffffff".to_string(),
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_decimal_rings() {
        assert_eq!(compute_decimal_rings(1600.0), vec![1.0, 10.0, 100.0, 1000.0, 1600.0]);
        assert_eq!(compute_decimal_rings(100.0), vec![1.0, 10.0, 100.0]);
        assert_eq!(compute_decimal_rings(0.5), vec![0.5]);
    }

    #[test]
    fn test_no_zero_or_negative_rings() {
        assert!(compute_decimal_rings(0.0).is_empty());
        assert!(compute_decimal_rings(-5.0).is_empty());
        assert!(compute_decimal_rings(f64::NAN).is_empty());
        assert!(compute_ring_values(RingMode::DegreeDerived, -5.0, Some(-1.0)).is_empty());
    }

    #[test]
    fn test_degree_derived_rings() {
        assert_close(
            &compute_degree_derived_rings(10.0, 1600.0),
            &[0.1, 1.0, 10.0, 100.0, 1000.0],
        );
        // Not clipped by the max distance
        assert_close(
            &compute_degree_derived_rings(25.0, 100.0),
            &[0.25, 2.5, 25.0, 250.0, 2500.0],
        );
        assert_eq!(
            compute_degree_derived_rings(0.0, 1600.0),
            vec![1.0, 10.0, 100.0, 1000.0, 1600.0]
        );
    }

    #[test]
    fn test_compute_ring_values() {
        assert_eq!(
            compute_ring_values(RingMode::Decimal, 1600.0, Some(10.0)),
            vec![1.0, 10.0, 100.0, 1000.0, 1600.0]
        );
        assert_close(
            &compute_ring_values(RingMode::DegreeDerived, 1600.0, Some(10.0)),
            &[0.1, 1.0, 10.0, 100.0, 1000.0],
        );
        assert_eq!(
            compute_ring_values(RingMode::DegreeDerived, 1600.0, None),
            vec![1.0, 10.0, 100.0, 1000.0, 1600.0]
        );
        assert_eq!(
            compute_ring_values(RingMode::DegreeDerived, 1600.0, Some(-3.0)),
            vec![1.0, 10.0, 100.0, 1000.0, 1600.0]
        );
    }

    #[test]
    fn test_reference_degree() {
        let bodies = vec![body("sun", 17.0), body("house_4", 12.0), body("ic", 11.5)];
        assert_eq!(reference_degree(&bodies, None), Some(11.5));
        assert_eq!(reference_degree(&bodies, Some("sun")), Some(17.0));
        assert_eq!(reference_degree(&bodies, Some("pluto")), None);
        assert_eq!(reference_degree(&bodies[..2], None), Some(12.0));
        assert_eq!(reference_degree(&bodies[..1], None), None);
    }
}
