//! Sidereal time and horizontal azimuth for bodies on the ecliptic.
//!
//! Low-precision by intent: the obliquity is fixed at its J2000 value,
//! ecliptic latitude is taken as zero and UTC stands in for UT1. Good to a
//! fraction of a degree, which is plenty for pointing at a compass sector.
//!
//! All angles are degrees.

use crate::zodiac::normalize_degrees;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Julian Date of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of J2000.0 (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Mean obliquity of the ecliptic at J2000.0.
pub const OBLIQUITY_J2000_DEG: f64 = 23.4393;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Right ascension and declination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension, [0, 360)
    pub ra: f64,
    /// Declination, [-90, 90]
    pub dec: f64,
}

/// Julian Date of a UTC instant.
pub fn julian_day(timestamp: DateTime<Utc>) -> f64 {
    let seconds = timestamp.timestamp() as f64 + timestamp.timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Greenwich Mean Sidereal Time, IAU 1982 expression.
///
/// GMST = 280.46061837 + 360.98564736629·D + 0.000387933·T² − T³/38710000
/// where D = JD − 2451545.0 and T = D / 36525.
pub fn gmst_degrees(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    let gmst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}

/// Local Sidereal Time for an east-positive longitude.
pub fn local_sidereal_time(gmst_deg: f64, longitude_east_deg: f64) -> f64 {
    normalize_degrees(gmst_deg + longitude_east_deg)
}

/// Convert an ecliptic longitude (latitude 0) to equatorial coordinates.
pub fn ecliptic_to_equatorial(ecliptic_longitude_deg: f64) -> Equatorial {
    let lambda = ecliptic_longitude_deg.to_radians();
    let eps = OBLIQUITY_J2000_DEG.to_radians();

    let ra = (lambda.sin() * eps.cos()).atan2(lambda.cos());
    let dec = (lambda.sin() * eps.sin()).asin();

    Equatorial {
        ra: normalize_degrees(ra.to_degrees()),
        dec: dec.to_degrees(),
    }
}

/// Hour angle, LST − RA, in [0, 360).
pub fn hour_angle(lst_deg: f64, ra_deg: f64) -> f64 {
    normalize_degrees(lst_deg - ra_deg)
}

/// Azimuth of a point with hour angle `h` and declination `dec` seen from
/// `latitude`, measured clockwise from North.
pub fn horizontal_azimuth(hour_angle_deg: f64, declination_deg: f64, latitude_deg: f64) -> f64 {
    let h = hour_angle_deg.to_radians();
    let dec = declination_deg.to_radians();
    let phi = latitude_deg.to_radians();

    // Measured from South, positive westward
    let a = h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos());
    normalize_degrees(a.to_degrees() + 180.0)
}

/// Compass azimuth of an ecliptic longitude from an observer at an instant.
pub fn body_azimuth(
    ecliptic_longitude_deg: f64,
    latitude_deg: f64,
    longitude_east_deg: f64,
    timestamp: DateTime<Utc>,
) -> f64 {
    let jd = julian_day(timestamp);
    let lst = local_sidereal_time(gmst_degrees(jd), longitude_east_deg);
    let eq = ecliptic_to_equatorial(ecliptic_longitude_deg);
    horizontal_azimuth(hour_angle(lst, eq.ra), eq.dec, latitude_deg)
}
