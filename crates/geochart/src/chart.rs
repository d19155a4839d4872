//! Chart data as delivered by the chart-calculation service, and the
//! [`ChartBody`] values derived from it for display.

use crate::error::GeoChartError;
use crate::zodiac::{absolute_degree_to_sign, sign_to_absolute_degree, BearingConvention, ZodiacSign};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A planet (or angle) entry of the chart response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlanet {
    pub id: String,
    pub name: String,
    /// Sign code ("Vir") or full name ("Virgo").
    pub sign: String,
    /// Degree within sign (0-30)
    pub pos: f64,
    /// Absolute ecliptic longitude (0-360)
    pub abs_pos: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    #[serde(default)]
    pub retrograde: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// A house cusp entry of the chart response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartHouse {
    pub house: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sign: String,
    pub pos: f64,
    pub abs_pos: f64,
}

/// An aspect between two bodies, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAspect {
    pub p1: String,
    pub p2: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub orb: f64,
    pub deg: f64,
    #[serde(default)]
    pub is_major: bool,
}

/// The subset of the chart service response this crate consumes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub planets: Vec<ChartPlanet>,
    #[serde(default)]
    pub houses: Vec<ChartHouse>,
    #[serde(default)]
    pub aspects: Vec<ChartAspect>,
}

impl ChartResponse {
    pub fn from_json(json: &str) -> Result<Self, GeoChartError> {
        serde_json::from_str(json).map_err(|e| GeoChartError::InvalidJson(e.to_string()))
    }

    /// Find a planet by display name ("Mars") or id ("mars"), ignoring case.
    pub fn find_planet(&self, name_or_id: &str) -> Option<&ChartPlanet> {
        self.planets.iter().find(|p| {
            p.name.eq_ignore_ascii_case(name_or_id) || p.id.eq_ignore_ascii_case(name_or_id)
        })
    }

    pub fn house(&self, number: u8) -> Option<&ChartHouse> {
        self.houses.iter().find(|h| h.house == number)
    }

    /// Aspects involving the body with this id.
    pub fn aspects_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ChartAspect> + 'a {
        self.aspects.iter().filter(move |a| a.p1 == id || a.p2 == id)
    }

    /// Shape checks callers should run before handing a response over.
    pub fn validate(&self) -> Result<(), GeoChartError> {
        for planet in &self.planets {
            if !planet.pos.is_finite() || !planet.abs_pos.is_finite() {
                return Err(GeoChartError::InvalidResponse(format!(
                    "planet {} has a non-finite position",
                    planet.id
                )));
            }
            if let Some(house) = planet.house {
                if !(1..=12).contains(&house) {
                    return Err(GeoChartError::InvalidResponse(format!(
                        "planet {} is in house {}",
                        planet.id, house
                    )));
                }
            }
        }
        for house in &self.houses {
            if !(1..=12).contains(&house.house) {
                return Err(GeoChartError::UnknownHouse(house.house));
            }
            if !house.pos.is_finite() || !house.abs_pos.is_finite() {
                return Err(GeoChartError::InvalidResponse(format!(
                    "house {} has a non-finite cusp",
                    house.house
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyGroup {
    Planet,
    Angle,
    House,
}

/// A planet, angle or house cusp ready to be drawn as a ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBody {
    pub id: String,
    pub label: String,
    pub sign: ZodiacSign,
    /// Degree within sign
    pub deg: f64,
    /// Absolute ecliptic degree
    pub abs_deg: f64,
    pub bearing_deg: f64,
    pub group: BodyGroup,
    pub color: String,
}

const ANGLE_IDS: [&str; 4] = ["asc", "mc", "ic", "dc"];

const HOUSE_COLOR: &str = "#6b7280";

lazy_static! {
    static ref BODY_COLORS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("sun", "#fbbf24");
        m.insert("moon", "#94a3b8");
        m.insert("mercury", "#a78bfa");
        m.insert("venus", "#f472b6");
        m.insert("mars", "#ef4444");
        m.insert("jupiter", "#fb923c");
        m.insert("saturn", "#78716c");
        m.insert("uranus", "#22d3ee");
        m.insert("neptune", "#60a5fa");
        m.insert("pluto", "#a855f7");
        m.insert("asc", "#10b981");
        m.insert("mc", "#f59e0b");
        m.insert("ic", "#6366f1");
        m.insert("dc", "#ec4899");
        m.insert("house", HOUSE_COLOR);
        m
    };
}

/// Display color for a body id; house gray for anything unlisted.
pub fn body_color(id: &str) -> &'static str {
    BODY_COLORS.get(id).copied().unwrap_or(HOUSE_COLOR)
}

fn resolve_sign(label: &str, sign: &str, abs_pos: f64) -> ZodiacSign {
    ZodiacSign::parse(sign).unwrap_or_else(|_| {
        let fallback = absolute_degree_to_sign(abs_pos).sign;
        log::warn!(
            "{}: unknown sign {:?}, using {} from absolute position",
            label,
            sign,
            fallback
        );
        fallback
    })
}

fn make_body(
    id: String,
    label: String,
    sign: ZodiacSign,
    deg: f64,
    group: BodyGroup,
    color: &str,
    convention: BearingConvention,
) -> ChartBody {
    let abs_deg = sign_to_absolute_degree(sign, deg);
    // A degree past the sign boundary rolls into the neighbouring sign
    let position = absolute_degree_to_sign(abs_deg);
    ChartBody {
        id,
        label,
        sign: position.sign,
        deg: position.deg,
        abs_deg,
        bearing_deg: convention.bearing(abs_deg),
        group,
        color: color.to_string(),
    }
}

/// Convert a chart response into displayable bodies.
///
/// Planets come first (asc/mc/ic/dc grouped as angles), then house cusps
/// as `house_<n>`. The absolute degree is rebuilt from sign + degree; the
/// bearing follows `convention`.
pub fn build_chart_bodies(response: &ChartResponse, convention: BearingConvention) -> Vec<ChartBody> {
    let mut bodies = Vec::with_capacity(response.planets.len() + response.houses.len());

    for planet in &response.planets {
        let sign = resolve_sign(&planet.id, &planet.sign, planet.abs_pos);
        let group = if ANGLE_IDS.contains(&planet.id.as_str()) {
            BodyGroup::Angle
        } else {
            BodyGroup::Planet
        };
        bodies.push(make_body(
            planet.id.clone(),
            planet.name.clone(),
            sign,
            planet.pos,
            group,
            body_color(&planet.id),
            convention,
        ));
    }

    for house in &response.houses {
        let id = format!("house_{}", house.house);
        let sign = resolve_sign(&id, &house.sign, house.abs_pos);
        bodies.push(make_body(
            id,
            format!("House {}", house.house),
            sign,
            house.pos,
            BodyGroup::House,
            HOUSE_COLOR,
            convention,
        ));
    }

    log::debug!("built {} chart bodies", bodies.len());
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ChartResponse {
        ChartResponse::from_json(
            r#"{
                "planets": [
                    {"id": "sun", "name": "Sun", "sign": "Vir", "pos": 17.0, "abs_pos": 167.0, "house": 10, "retrograde": false},
                    {"id": "asc", "name": "Ascendant", "sign": "Sag", "pos": 3.5, "abs_pos": 243.5},
                    {"id": "chiron", "name": "Chiron", "sign": "???", "pos": 2.0, "abs_pos": 32.0, "house": 5}
                ],
                "houses": [
                    {"house": 1, "sign": "Sag", "pos": 3.5, "abs_pos": 243.5},
                    {"house": 4, "sign": "Pisces", "pos": 12.0, "abs_pos": 342.0}
                ],
                "aspects": [
                    {"p1": "sun", "p2": "asc", "type": "square", "orb": 6.5, "deg": 76.5, "is_major": true}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_json_defaults() {
        let response = sample_response();
        assert_eq!(response.planets.len(), 3);
        assert_eq!(response.planets[1].house, None);
        assert!(!response.planets[1].retrograde);
        assert!(ChartResponse::from_json("{}").unwrap().planets.is_empty());
        assert!(ChartResponse::from_json("not json").is_err());
    }

    #[test]
    fn test_find_planet_by_name_or_id() {
        let response = sample_response();
        assert_eq!(response.find_planet("Sun").unwrap().id, "sun");
        assert_eq!(response.find_planet("sun").unwrap().id, "sun");
        assert!(response.find_planet("Mars").is_none());
    }

    #[test]
    fn test_aspects_of() {
        let response = sample_response();
        assert_eq!(response.aspects_of("asc").count(), 1);
        assert_eq!(response.aspects[0].kind, "square");
        assert_eq!(response.aspects_of("moon").count(), 0);
    }

    #[test]
    fn test_validate() {
        let mut response = sample_response();
        assert!(response.validate().is_ok());
        response.houses[0].house = 13;
        assert_eq!(response.validate(), Err(GeoChartError::UnknownHouse(13)));
    }

    #[test]
    fn test_build_chart_bodies_zodiacal() {
        let bodies = build_chart_bodies(&sample_response(), BearingConvention::Zodiacal);
        assert_eq!(bodies.len(), 5);

        let sun = &bodies[0];
        assert_eq!(sun.group, BodyGroup::Planet);
        assert_eq!(sun.abs_deg, 167.0);
        assert_eq!(sun.bearing_deg, 167.0);
        assert_eq!(sun.color, "#fbbf24");

        assert_eq!(bodies[1].group, BodyGroup::Angle);
        assert_eq!(bodies[1].color, "#10b981");

        // Unknown sign falls back to the sign of the absolute position
        assert_eq!(bodies[2].sign, ZodiacSign::Taurus);
        assert_eq!(bodies[2].color, HOUSE_COLOR);

        let ic_cusp = &bodies[4];
        assert_eq!(ic_cusp.id, "house_4");
        assert_eq!(ic_cusp.label, "House 4");
        assert_eq!(ic_cusp.group, BodyGroup::House);
        assert_eq!(ic_cusp.sign, ZodiacSign::Pisces);
        assert_eq!(ic_cusp.abs_deg, 342.0);
    }

    #[test]
    fn test_build_chart_bodies_compass() {
        let convention = BearingConvention::EclipticToCompass { rotation_offset: 0.0 };
        let bodies = build_chart_bodies(&sample_response(), convention);
        // 90 - 167 = -77 -> 283
        assert_eq!(bodies[0].bearing_deg, 283.0);
        assert_eq!(bodies[0].abs_deg, 167.0);
    }

    #[test]
    fn test_out_of_range_degree_rolls_into_next_sign() {
        let response = ChartResponse::from_json(
            r#"{
                "planets": [
                    {"id": "ic", "name": "IC", "sign": "Pis", "pos": 32.5, "abs_pos": 2.5},
                    {"id": "mars", "name": "Mars", "sign": "Leo", "pos": -5.0, "abs_pos": 115.0}
                ]
            }"#,
        )
        .unwrap();
        assert!(response.validate().is_ok());
        let bodies = build_chart_bodies(&response, BearingConvention::Zodiacal);

        assert_eq!(bodies[0].sign, ZodiacSign::Aries);
        assert_eq!(bodies[0].deg, 2.5);
        assert_eq!(bodies[0].abs_deg, 2.5);
        assert_eq!(crate::rings::reference_degree(&bodies, None), Some(2.5));

        assert_eq!(bodies[1].sign, ZodiacSign::Cancer);
        assert_eq!(bodies[1].deg, 25.0);
        assert_eq!(bodies[1].abs_deg, 115.0);
        for body in &bodies {
            assert!((0.0..30.0).contains(&body.deg));
        }
    }

    #[test]
    fn test_chart_body_serializes_camel_case() {
        let bodies = build_chart_bodies(&sample_response(), BearingConvention::Zodiacal);
        let value = serde_json::to_value(&bodies[0]).unwrap();
        assert_eq!(value["absDeg"], 167.0);
        assert_eq!(value["bearingDeg"], 167.0);
        assert_eq!(value["sign"], "Vir");
        assert_eq!(value["group"], "planet");
    }
}
