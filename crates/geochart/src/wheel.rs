//! Projects a whole chart wheel onto the map around an observer.
//!
//! The wheel uses the ecliptic-to-compass convention (0° Aries East,
//! ecliptic longitude running counter-clockwise), so every sector is built
//! from its end bearing round to its start bearing.

use crate::chart::ChartResponse;
use crate::geodesy::{destination_point, generate_geodesic_line, generate_geodesic_sector, km_to_meters, GeoPoint};
use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::zodiac::{ecliptic_to_bearing, ZodiacSign};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const HOUSES_RING_SCALE: f64 = 1.08;
const ZODIAC_RING_SCALE: f64 = 1.20;
const PLANETS_SCALE: f64 = 1.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelSettings {
    pub radius_km: f64,
    pub show_houses: bool,
    pub show_rays: bool,
    pub show_markers: bool,
    pub geodesic_steps: usize,
    pub rotation_offset: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            radius_km: 50.0,
            show_houses: false,
            show_rays: false,
            show_markers: false,
            geodesic_steps: 64,
            rotation_offset: 0.0,
        }
    }
}

impl WheelSettings {
    fn bearing(&self, longitude: f64) -> f64 {
        ecliptic_to_bearing(longitude, self.rotation_offset)
    }

    fn sector_steps(&self) -> usize {
        (self.geodesic_steps / 4).max(1)
    }

    fn ray_steps(&self) -> usize {
        (self.geodesic_steps / 2).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelPlanet {
    pub id: String,
    pub name: String,
    /// Ecliptic longitude (0-360)
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelHouse {
    pub house: u8,
    /// Cusp longitude
    pub longitude: f64,
}

/// Ecliptic longitudes needed to draw a wheel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartWheelData {
    pub planets: Vec<WheelPlanet>,
    pub houses: Vec<WheelHouse>,
    pub ascendant: Option<f64>,
    pub mc: Option<f64>,
}

impl From<&ChartResponse> for ChartWheelData {
    /// Angles are lifted out of the planet list; the first and tenth cusps
    /// stand in when the response has no asc/mc entries.
    fn from(response: &ChartResponse) -> Self {
        let angle = |id: &str, cusp: u8| {
            response
                .planets
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.abs_pos)
                .or_else(|| response.house(cusp).map(|h| h.abs_pos))
        };

        Self {
            planets: response
                .planets
                .iter()
                .filter(|p| !matches!(p.id.as_str(), "asc" | "mc" | "ic" | "dc"))
                .map(|p| WheelPlanet {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    longitude: p.abs_pos,
                })
                .collect(),
            houses: response
                .houses
                .iter()
                .map(|h| WheelHouse {
                    house: h.house,
                    longitude: h.abs_pos,
                })
                .collect(),
            ascendant: angle("asc", 1),
            mc: angle("mc", 10),
        }
    }
}

/// Body symbols drawn on rays and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyGlyph {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    Lilith,
    NorthNode,
    SouthNode,
    Fortune,
    Ascendant,
    Midheaven,
}

impl BodyGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            BodyGlyph::Sun => "☉",
            BodyGlyph::Moon => "☽",
            BodyGlyph::Mercury => "☿",
            BodyGlyph::Venus => "♀",
            BodyGlyph::Mars => "♂",
            BodyGlyph::Jupiter => "♃",
            BodyGlyph::Saturn => "♄",
            BodyGlyph::Uranus => "♅",
            BodyGlyph::Neptune => "♆",
            BodyGlyph::Pluto => "♇",
            BodyGlyph::Chiron => "⚷",
            BodyGlyph::Lilith => "⚸",
            BodyGlyph::NorthNode => "☊",
            BodyGlyph::SouthNode => "☋",
            BodyGlyph::Fortune => "⊗",
            BodyGlyph::Ascendant => "AC",
            BodyGlyph::Midheaven => "MC",
        }
    }
}

impl FromStr for BodyGlyph {
    type Err = ();

    /// Accepts display names ("Sun") and service ids ("true_node").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sun" => Ok(BodyGlyph::Sun),
            "moon" => Ok(BodyGlyph::Moon),
            "mercury" => Ok(BodyGlyph::Mercury),
            "venus" => Ok(BodyGlyph::Venus),
            "mars" => Ok(BodyGlyph::Mars),
            "jupiter" => Ok(BodyGlyph::Jupiter),
            "saturn" => Ok(BodyGlyph::Saturn),
            "uranus" => Ok(BodyGlyph::Uranus),
            "neptune" => Ok(BodyGlyph::Neptune),
            "pluto" => Ok(BodyGlyph::Pluto),
            "chiron" => Ok(BodyGlyph::Chiron),
            "lilith" | "mean_lilith" => Ok(BodyGlyph::Lilith),
            "true_node" | "mean_node" | "north node" => Ok(BodyGlyph::NorthNode),
            "south_node" | "south node" => Ok(BodyGlyph::SouthNode),
            "pof" | "part of fortune" => Ok(BodyGlyph::Fortune),
            "asc" | "ascendant" => Ok(BodyGlyph::Ascendant),
            "mc" | "midheaven" => Ok(BodyGlyph::Midheaven),
            _ => Err(()),
        }
    }
}

/// Glyph by name, then id, then the first letter of the name.
pub fn body_glyph(name: &str, id: &str) -> String {
    name.parse::<BodyGlyph>()
        .or_else(|_| id.parse::<BodyGlyph>())
        .map(|g| g.symbol().to_string())
        .unwrap_or_else(|_| name.chars().take(1).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterProperties {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSectorProperties {
    pub house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProperties {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacSectorProperties {
    /// Sign index, Aries = 0
    pub sign: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRayProperties {
    pub id: String,
    pub name: String,
    pub glyph: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetMarkerProperties {
    pub id: String,
    pub name: String,
    pub glyph: String,
    /// Longitude rounded to the whole degree
    pub degree: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleMarkerProperties {
    pub id: String,
    pub label: String,
    pub degree: i64,
}

/// The wheel's map layers, keyed by layer id when serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoChartLayers {
    #[serde(rename = "geoChart-center")]
    pub center: FeatureCollection<CenterProperties>,
    #[serde(rename = "geoChart-houses")]
    pub houses: FeatureCollection<HouseSectorProperties>,
    #[serde(rename = "geoChart-houses-ring")]
    pub houses_ring: FeatureCollection<HouseSectorProperties>,
    #[serde(rename = "geoChart-houses-labels")]
    pub houses_labels: FeatureCollection<LabelProperties>,
    #[serde(rename = "geoChart-zodiac-ring")]
    pub zodiac_ring: FeatureCollection<ZodiacSectorProperties>,
    #[serde(rename = "geoChart-zodiac-labels")]
    pub zodiac_labels: FeatureCollection<LabelProperties>,
    #[serde(rename = "geoChart-planet-rays")]
    pub planet_rays: FeatureCollection<PlanetRayProperties>,
    #[serde(rename = "geoChart-planet-markers")]
    pub planet_markers: FeatureCollection<PlanetMarkerProperties>,
    #[serde(rename = "geoChart-angle-markers")]
    pub angle_markers: FeatureCollection<AngleMarkerProperties>,
}

/// Bearing halfway between two sector edges, taking the short way round.
pub fn mid_bearing(start_bearing: f64, end_bearing: f64) -> f64 {
    let mid = (start_bearing + end_bearing) / 2.0;
    if (start_bearing - end_bearing).abs() > 180.0 {
        (mid + 180.0) % 360.0
    } else {
        mid
    }
}

fn forward(center: GeoPoint, bearing: f64, distance_km: f64) -> GeoPoint {
    destination_point(center.lat, center.lng, bearing, km_to_meters(distance_km))
}

fn sector(center: GeoPoint, radius_km: f64, start_bearing: f64, end_bearing: f64, settings: &WheelSettings) -> Geometry {
    // Reversed: ecliptic order runs counter-clockwise on the compass.
    Geometry::polygon(generate_geodesic_sector(
        center.lat,
        center.lng,
        radius_km,
        end_bearing,
        start_bearing,
        settings.sector_steps(),
    ))
}

/// Build every wheel layer around `center`.
///
/// Without chart data only the center point is emitted. House sectors need
/// `show_houses`; the zodiac ring is always drawn.
pub fn build_geo_chart(center: GeoPoint, chart: Option<&ChartWheelData>, settings: &WheelSettings) -> GeoChartLayers {
    let mut layers = GeoChartLayers::default();
    layers.center.push(Feature::new(
        Geometry::point(center.position()),
        CenterProperties {
            id: "center".to_string(),
        },
    ));

    let chart = match chart {
        Some(chart) => chart,
        None => return layers,
    };

    let r_base = settings.radius_km;
    let r_houses_ring = r_base * HOUSES_RING_SCALE;
    let r_zodiac = r_base * ZODIAC_RING_SCALE;
    let r_planets = r_base * PLANETS_SCALE;

    if settings.show_houses && !chart.houses.is_empty() {
        let mut houses = chart.houses.clone();
        houses.sort_by_key(|h| h.house);

        for (i, current) in houses.iter().enumerate() {
            let next = &houses[(i + 1) % houses.len()];
            let start = settings.bearing(current.longitude);
            let end = settings.bearing(next.longitude);

            layers.houses.push(Feature::new(
                sector(center, r_base, start, end, settings),
                HouseSectorProperties { house: current.house },
            ));
            layers.houses_ring.push(Feature::new(
                sector(center, r_houses_ring, start, end, settings),
                HouseSectorProperties { house: current.house },
            ));

            let label_at = forward(center, mid_bearing(start, end), (r_base + r_houses_ring) / 2.0);
            layers.houses_labels.push(Feature::new(
                Geometry::point(label_at.position()),
                LabelProperties {
                    label: current.house.to_string(),
                },
            ));
        }
    }

    for sign in ZodiacSign::ALL {
        let start_longitude = sign.base_degree();
        let start = settings.bearing(start_longitude);
        let end = settings.bearing(start_longitude + 30.0);

        layers.zodiac_ring.push(Feature::new(
            sector(center, r_zodiac, start, end, settings),
            ZodiacSectorProperties {
                sign: sign.index(),
                name: sign.name().to_string(),
            },
        ));

        let label_at = forward(center, mid_bearing(start, end), (r_houses_ring + r_zodiac) / 2.0);
        layers.zodiac_labels.push(Feature::new(
            Geometry::point(label_at.position()),
            LabelProperties {
                label: sign.glyph().to_string(),
            },
        ));
    }

    for planet in &chart.planets {
        let bearing = settings.bearing(planet.longitude);
        let glyph = body_glyph(&planet.name, &planet.id);

        if settings.show_rays {
            layers.planet_rays.push(Feature::new(
                Geometry::line_string(generate_geodesic_line(
                    center.lat,
                    center.lng,
                    bearing,
                    r_planets,
                    settings.ray_steps(),
                )),
                PlanetRayProperties {
                    id: planet.id.clone(),
                    name: planet.name.clone(),
                    glyph: glyph.clone(),
                },
            ));
        }

        if settings.show_markers {
            let marker_at = forward(center, bearing, r_planets);
            layers.planet_markers.push(Feature::new(
                Geometry::point(marker_at.position()),
                PlanetMarkerProperties {
                    id: planet.id.clone(),
                    name: planet.name.clone(),
                    glyph,
                    degree: planet.longitude.round() as i64,
                },
            ));
        }
    }

    if settings.show_markers {
        // AC and MC sit on the outer edge of the zodiac ring
        for (id, label, longitude) in [("asc", "AC", chart.ascendant), ("mc", "MC", chart.mc)] {
            if let Some(longitude) = longitude {
                let marker_at = forward(center, settings.bearing(longitude), r_zodiac);
                layers.angle_markers.push(Feature::new(
                    Geometry::point(marker_at.position()),
                    AngleMarkerProperties {
                        id: id.to_string(),
                        label: label.to_string(),
                        degree: longitude.round() as i64,
                    },
                ));
            }
        }
    }

    log::debug!(
        "geo chart: {} house sectors, {} rays, {} markers",
        layers.houses.len(),
        layers.planet_rays.len(),
        layers.planet_markers.len()
    );
    layers
}
