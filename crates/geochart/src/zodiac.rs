//! Zodiac signs, traditional rulerships and angle conversions.
//!
//! Signs sit 30° apart in canonical order starting with Aries at 0°.
//! Two compass conventions exist for turning an ecliptic degree into a
//! map bearing; callers pick one through [`BearingConvention`].

use crate::error::GeoChartError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve signs, serialized by their three-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    #[serde(rename = "Ari")]
    Aries,
    #[serde(rename = "Tau")]
    Taurus,
    #[serde(rename = "Gem")]
    Gemini,
    #[serde(rename = "Can")]
    Cancer,
    #[serde(rename = "Leo")]
    Leo,
    #[serde(rename = "Vir")]
    Virgo,
    #[serde(rename = "Lib")]
    Libra,
    #[serde(rename = "Sco")]
    Scorpio,
    #[serde(rename = "Sag")]
    Sagittarius,
    #[serde(rename = "Cap")]
    Capricorn,
    #[serde(rename = "Aqu")]
    Aquarius,
    #[serde(rename = "Pis")]
    Pisces,
}

/// Sign modality, used by the horary resolver to scale distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// The seven classical planets that rule signs in traditional astrology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraditionalPlanet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

/// Traditional rulerships (no outer planets), indexed by sign.
const TRADITIONAL_RULERS: [TraditionalPlanet; 12] = [
    TraditionalPlanet::Mars,    // Aries
    TraditionalPlanet::Venus,   // Taurus
    TraditionalPlanet::Mercury, // Gemini
    TraditionalPlanet::Moon,    // Cancer
    TraditionalPlanet::Sun,     // Leo
    TraditionalPlanet::Mercury, // Virgo
    TraditionalPlanet::Venus,   // Libra
    TraditionalPlanet::Mars,    // Scorpio
    TraditionalPlanet::Jupiter, // Sagittarius
    TraditionalPlanet::Saturn,  // Capricorn
    TraditionalPlanet::Saturn,  // Aquarius
    TraditionalPlanet::Jupiter, // Pisces
];

const MODALITIES: [Modality; 12] = [
    Modality::Cardinal, // Aries
    Modality::Fixed,    // Taurus
    Modality::Mutable,  // Gemini
    Modality::Cardinal, // Cancer
    Modality::Fixed,    // Leo
    Modality::Mutable,  // Virgo
    Modality::Cardinal, // Libra
    Modality::Fixed,    // Scorpio
    Modality::Mutable,  // Sagittarius
    Modality::Cardinal, // Capricorn
    Modality::Fixed,    // Aquarius
    Modality::Mutable,  // Pisces
];

const SIGN_CODES: [&str; 12] = [
    "Ari", "Tau", "Gem", "Can", "Leo", "Vir", "Lib", "Sco", "Sag", "Cap", "Aqu", "Pis",
];

const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

const SIGN_GLYPHS: [&str; 12] = [
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Position in zodiac order, Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn code(self) -> &'static str {
        SIGN_CODES[self.index()]
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }

    pub fn glyph(self) -> &'static str {
        SIGN_GLYPHS[self.index()]
    }

    /// Ecliptic longitude of 0° of this sign.
    pub fn base_degree(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn ruler(self) -> TraditionalPlanet {
        TRADITIONAL_RULERS[self.index()]
    }

    pub fn modality(self) -> Modality {
        MODALITIES[self.index()]
    }

    /// Parse a three-letter code or a full sign name, case-insensitively.
    ///
    /// Only the first three letters are significant, so "Vir", "virgo" and
    /// "VIRGO" all parse to [`ZodiacSign::Virgo`].
    pub fn parse(s: &str) -> Result<Self, GeoChartError> {
        let prefix: String = s.trim().chars().take(3).collect::<String>().to_lowercase();
        SIGN_CODES
            .iter()
            .position(|code| code.to_lowercase() == prefix)
            .map(Self::from_index)
            .ok_or_else(|| GeoChartError::UnknownSign(s.to_string()))
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ZodiacSign {
    type Err = GeoChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Modality {
    pub fn name(self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

impl TraditionalPlanet {
    /// Capitalized display name, as the chart service reports `name`.
    pub fn name(self) -> &'static str {
        match self {
            TraditionalPlanet::Sun => "Sun",
            TraditionalPlanet::Moon => "Moon",
            TraditionalPlanet::Mercury => "Mercury",
            TraditionalPlanet::Venus => "Venus",
            TraditionalPlanet::Mars => "Mars",
            TraditionalPlanet::Jupiter => "Jupiter",
            TraditionalPlanet::Saturn => "Saturn",
        }
    }

    /// Lowercase identifier, as the chart service reports `id`.
    pub fn id(self) -> &'static str {
        match self {
            TraditionalPlanet::Sun => "sun",
            TraditionalPlanet::Moon => "moon",
            TraditionalPlanet::Mercury => "mercury",
            TraditionalPlanet::Venus => "venus",
            TraditionalPlanet::Mars => "mars",
            TraditionalPlanet::Jupiter => "jupiter",
            TraditionalPlanet::Saturn => "saturn",
        }
    }
}

impl fmt::Display for TraditionalPlanet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A position expressed as sign plus degree within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    pub deg: f64,
}

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    ((deg % 360.0) + 360.0) % 360.0
}

/// Absolute ecliptic degree of `deg_in_sign` degrees into `sign`.
///
/// Out-of-range degrees are not rejected; the sum is normalized.
pub fn sign_to_absolute_degree(sign: ZodiacSign, deg_in_sign: f64) -> f64 {
    normalize_degrees(sign.base_degree() + deg_in_sign)
}

/// Inverse of [`sign_to_absolute_degree`].
pub fn absolute_degree_to_sign(abs_deg: f64) -> SignPosition {
    let normalized = normalize_degrees(abs_deg);
    let sign_index = ((normalized / 30.0).floor() as usize).min(11);
    SignPosition {
        sign: ZodiacSign::from_index(sign_index),
        deg: normalized % 30.0,
    }
}

/// How an ecliptic degree becomes a compass bearing (0 = North, clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BearingConvention {
    /// 0° Aries points North; the ecliptic degree is the bearing.
    #[default]
    Zodiacal,
    /// 0° Aries points East: `bearing = 90 - (ecliptic + rotation_offset)`.
    EclipticToCompass {
        #[serde(rename = "rotationOffset", default)]
        rotation_offset: f64,
    },
}

impl BearingConvention {
    pub fn bearing(&self, ecliptic_deg: f64) -> f64 {
        match *self {
            BearingConvention::Zodiacal => normalize_degrees(ecliptic_deg),
            BearingConvention::EclipticToCompass { rotation_offset } => {
                ecliptic_to_bearing(ecliptic_deg, rotation_offset)
            }
        }
    }
}

/// Zodiacal bearing of a sign position (0° Aries = North).
pub fn sign_to_bearing(sign: ZodiacSign, deg_in_sign: f64) -> f64 {
    sign_to_absolute_degree(sign, deg_in_sign)
}

/// Compass bearing with 0° Aries pointing East, Cancer North, Libra West
/// and Capricorn South.
pub fn ecliptic_to_bearing(ecliptic_deg: f64, rotation_offset: f64) -> f64 {
    normalize_degrees(90.0 - (ecliptic_deg + rotation_offset))
}

const CARDINAL_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Nearest of the 16 compass points.
pub fn bearing_to_cardinal(bearing: f64) -> &'static str {
    let index = (normalize_degrees(bearing) / 22.5).round() as usize % 16;
    CARDINAL_POINTS[index]
}

/// e.g. `"17.0° Virgo"`
pub fn format_degree(sign: ZodiacSign, deg: f64) -> String {
    format!("{:.1}° {}", deg, sign.name())
}

/// e.g. `"167.0°"`
pub fn format_bearing(bearing: f64) -> String {
    format!("{:.1}°", normalize_degrees(bearing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);
    }

    #[test]
    fn test_sign_base_degrees() {
        let expected = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0];
        for (sign, base) in ZodiacSign::ALL.iter().zip(expected) {
            assert_eq!(sign.base_degree(), base);
        }
    }

    #[test]
    fn test_sign_to_absolute_degree() {
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Virgo, 17.0), 167.0);
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Aries, 0.0), 0.0);
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Libra, 0.0), 180.0);
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Capricorn, 0.0), 270.0);
        // Out-of-range degrees wrap instead of failing
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Pisces, 45.0), 15.0);
        assert_eq!(sign_to_absolute_degree(ZodiacSign::Aries, -5.0), 355.0);
    }

    #[test]
    fn test_absolute_degree_to_sign() {
        let pos = absolute_degree_to_sign(167.0);
        assert_eq!(pos.sign, ZodiacSign::Virgo);
        assert!((pos.deg - 17.0).abs() < 1e-9);

        let pos = absolute_degree_to_sign(359.0);
        assert_eq!(pos.sign, ZodiacSign::Pisces);
        assert!((pos.deg - 29.0).abs() < 1e-9);

        let pos = absolute_degree_to_sign(360.0);
        assert_eq!(pos.sign, ZodiacSign::Aries);
        assert_eq!(pos.deg, 0.0);
    }

    #[test]
    fn test_sign_degree_round_trip() {
        for sign in ZodiacSign::ALL {
            for deg in [0.0, 0.5, 7.25, 15.0, 29.0, 29.999] {
                let pos = absolute_degree_to_sign(sign_to_absolute_degree(sign, deg));
                assert_eq!(pos.sign, sign);
                assert!((pos.deg - deg).abs() < 1e-9, "{:?} {}", sign, deg);
            }
        }
    }

    #[test]
    fn test_parse_sign() {
        assert_eq!(ZodiacSign::parse("Vir").unwrap(), ZodiacSign::Virgo);
        assert_eq!(ZodiacSign::parse("virgo").unwrap(), ZodiacSign::Virgo);
        assert_eq!(ZodiacSign::parse("Capricorn").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::parse(" AQU ").unwrap(), ZodiacSign::Aquarius);
        assert!(ZodiacSign::parse("Xyz").is_err());
        assert!(ZodiacSign::parse("").is_err());
    }

    #[test]
    fn test_traditional_rulers() {
        assert_eq!(ZodiacSign::Aries.ruler(), TraditionalPlanet::Mars);
        assert_eq!(ZodiacSign::Cancer.ruler(), TraditionalPlanet::Moon);
        assert_eq!(ZodiacSign::Leo.ruler(), TraditionalPlanet::Sun);
        assert_eq!(ZodiacSign::Scorpio.ruler(), TraditionalPlanet::Mars);
        assert_eq!(ZodiacSign::Aquarius.ruler(), TraditionalPlanet::Saturn);
        assert_eq!(ZodiacSign::Pisces.ruler(), TraditionalPlanet::Jupiter);
    }

    #[test]
    fn test_modalities() {
        assert_eq!(ZodiacSign::Aries.modality(), Modality::Cardinal);
        assert_eq!(ZodiacSign::Leo.modality(), Modality::Fixed);
        assert_eq!(ZodiacSign::Pisces.modality(), Modality::Mutable);
        assert_eq!(ZodiacSign::Capricorn.modality(), Modality::Cardinal);
    }

    #[test]
    fn test_bearing_conventions() {
        let zodiacal = BearingConvention::Zodiacal;
        assert_eq!(zodiacal.bearing(0.0), 0.0);
        assert_eq!(zodiacal.bearing(167.0), 167.0);

        let compass = BearingConvention::EclipticToCompass { rotation_offset: 0.0 };
        assert_eq!(compass.bearing(0.0), 90.0);
        assert_eq!(compass.bearing(90.0), 0.0);
        assert_eq!(compass.bearing(180.0), 270.0);
        assert_eq!(compass.bearing(270.0), 180.0);

        let rotated = BearingConvention::EclipticToCompass { rotation_offset: 90.0 };
        assert_eq!(rotated.bearing(0.0), 0.0);
    }

    #[test]
    fn test_bearing_to_cardinal() {
        assert_eq!(bearing_to_cardinal(0.0), "N");
        assert_eq!(bearing_to_cardinal(90.0), "E");
        assert_eq!(bearing_to_cardinal(180.0), "S");
        assert_eq!(bearing_to_cardinal(270.0), "W");
        assert_eq!(bearing_to_cardinal(350.0), "N");
        assert_eq!(bearing_to_cardinal(-22.5), "NNW");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_degree(ZodiacSign::Virgo, 17.0), "17.0° Virgo");
        assert_eq!(format_bearing(-193.0), "167.0°");
    }
}
