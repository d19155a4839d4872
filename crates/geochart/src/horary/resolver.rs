use super::distance::{angular_separation, distance_hints};
use super::sectors::{sector_for_house, Hemisphere};
use super::types::{Analysis, ResolverOutput};
use crate::astro::body_azimuth;
use crate::chart::{ChartPlanet, ChartResponse};
use crate::zodiac::{Modality, TraditionalPlanet, ZodiacSign};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ruler assumed when a house or its sign cannot be read.
pub const FALLBACK_RULER: TraditionalPlanet = TraditionalPlanet::Saturn;

/// Modality assumed when the target ruler's sign cannot be read.
pub const FALLBACK_MODALITY: Modality = Modality::Mutable;

/// Where and when the question is asked; enables true azimuths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AzimuthContext {
    /// East-positive longitude in degrees
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// Turns a horary chart into a compass sector and distance bands.
///
/// The resolver never fails on a well-shaped chart: missing houses,
/// planets or unreadable signs fall back to Saturn, the asked-about house
/// and a mutable modality.
#[derive(Debug, Clone, Copy)]
pub struct HoraryResolver<'a> {
    chart: &'a ChartResponse,
}

impl<'a> HoraryResolver<'a> {
    pub fn new(chart: &'a ChartResponse) -> Self {
        Self { chart }
    }

    /// Traditional ruler of the sign on a house cusp.
    pub fn ruler_of_house(&self, house: u8) -> TraditionalPlanet {
        let cusp = match self.chart.house(house) {
            Some(cusp) => cusp,
            None => {
                log::debug!("house {} missing from chart, ruler defaults to {}", house, FALLBACK_RULER);
                return FALLBACK_RULER;
            }
        };
        match ZodiacSign::parse(&cusp.sign).ok() {
            Some(sign) => sign.ruler(),
            None => {
                log::warn!(
                    "house {} has unreadable sign {:?}, ruler defaults to {}",
                    house,
                    cusp.sign,
                    FALLBACK_RULER
                );
                FALLBACK_RULER
            }
        }
    }

    fn planet(&self, planet: TraditionalPlanet) -> Option<&'a ChartPlanet> {
        self.chart.find_planet(planet.name())
    }

    /// Ecliptic degree of a planet, 0 when it is absent.
    fn position(&self, planet: TraditionalPlanet) -> f64 {
        self.planet(planet).map(|p| p.abs_pos).unwrap_or(0.0)
    }

    /// Modality of the sign a planet occupies. An absent planet reads as
    /// Aries (cardinal); an unreadable sign falls back to mutable.
    fn modality_of(&self, planet: TraditionalPlanet) -> Modality {
        match self.planet(planet) {
            None => ZodiacSign::Aries.modality(),
            Some(p) => ZodiacSign::parse(&p.sign)
                .map(|s| s.modality())
                .unwrap_or(FALLBACK_MODALITY),
        }
    }

    /// Base layer: sector and distance hints only.
    pub fn resolve(&self, target_house: u8, latitude: f64) -> ResolverOutput {
        let querent_ruler = self.ruler_of_house(1);
        let target_ruler = self.ruler_of_house(target_house);

        let target_modality = self.modality_of(target_ruler);
        let target_house_location = self
            .planet(target_ruler)
            .and_then(|p| p.house)
            .unwrap_or(target_house);
        let moon_sign = self
            .planet(TraditionalPlanet::Moon)
            .and_then(|moon| ZodiacSign::parse(&moon.sign).ok());

        let hemisphere = Hemisphere::from_latitude(latitude);
        let sector = sector_for_house(target_house_location, hemisphere);

        let delta = angular_separation(self.position(querent_ruler), self.position(target_ruler));

        log::debug!(
            "house {}: querent {}, target {} in house {} ({:?}), delta {:.2}",
            target_house,
            querent_ruler,
            target_ruler,
            target_house_location,
            hemisphere,
            delta
        );

        ResolverOutput {
            sector,
            distance_hints: distance_hints(delta, target_modality),
            analysis: Analysis {
                querent_ruler,
                target_ruler,
                target_house_location,
                target_modality,
                moon_sign,
            },
            actual_azimuth: None,
            moon_azimuth: None,
        }
    }

    /// Base layer plus the horizontal azimuths of the target ruler and the
    /// Moon at the given place and time. A body absent from the chart gets
    /// no azimuth.
    pub fn resolve_with_azimuth(&self, target_house: u8, latitude: f64, context: &AzimuthContext) -> ResolverOutput {
        let mut output = self.resolve(target_house, latitude);

        let azimuth_of = |planet: TraditionalPlanet| {
            self.planet(planet)
                .map(|p| body_azimuth(p.abs_pos, latitude, context.longitude, context.timestamp))
        };
        output.actual_azimuth = azimuth_of(output.analysis.target_ruler);
        output.moon_azimuth = azimuth_of(TraditionalPlanet::Moon);

        output
    }
}
