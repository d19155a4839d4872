use crate::error::GeoChartError;
use crate::overlay::DistanceUnit;
use crate::zodiac::{Modality, TraditionalPlanet, ZodiacSign};
use serde::{Deserialize, Serialize};

/// A compass wedge. `start_deg > end_deg` means the wedge crosses North.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub start_deg: f64,
    pub end_deg: f64,
    pub center_deg: f64,
}

/// One distance band, in every unit the map can show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceHint {
    pub km: f64,
    pub miles: f64,
    pub meters: f64,
    pub label: String,
}

impl DistanceHint {
    pub fn value(&self, unit: DistanceUnit) -> f64 {
        match unit {
            DistanceUnit::Km => self.km,
            DistanceUnit::Miles => self.miles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub querent_ruler: TraditionalPlanet,
    pub target_ruler: TraditionalPlanet,
    /// House the target ruler occupies; this, not the asked-about house,
    /// picks the sector.
    pub target_house_location: u8,
    pub target_modality: Modality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_sign: Option<ZodiacSign>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOutput {
    pub sector: Sector,
    pub distance_hints: Vec<DistanceHint>,
    pub analysis: Analysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_azimuth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_azimuth: Option<f64>,
}

/// What a user can ask about, one entry per house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseCategory {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

pub const HOUSE_CATEGORIES: [HouseCategory; 12] = [
    HouseCategory {
        id: 1,
        title: "1st House",
        description: "Self, physical body, appearance",
        keywords: &["Me", "Appearance", "Health"],
    },
    HouseCategory {
        id: 2,
        title: "2nd House",
        description: "Money, valuables, lost objects",
        keywords: &["Wallet", "Money", "Possessions"],
    },
    HouseCategory {
        id: 3,
        title: "3rd House",
        description: "Local movement, cars, siblings",
        keywords: &["Brother", "Sister", "Car", "Trip"],
    },
    HouseCategory {
        id: 4,
        title: "4th House",
        description: "Home, family, parents, land",
        keywords: &["Home", "Mom", "Dad", "Property"],
    },
    HouseCategory {
        id: 5,
        title: "5th House",
        description: "Fun, romance, children, creativity",
        keywords: &["Date", "Child", "Game", "Party"],
    },
    HouseCategory {
        id: 6,
        title: "6th House",
        description: "Work, daily routines, pets, illness",
        keywords: &["Job", "Pet", "Checkup"],
    },
    HouseCategory {
        id: 7,
        title: "7th House",
        description: "Partners, spouse, open enemies",
        keywords: &["Wife", "Husband", "Partner", "Rival"],
    },
    HouseCategory {
        id: 8,
        title: "8th House",
        description: "Shared resources, transformation, loss",
        keywords: &["Debt", "Taxes", "Change"],
    },
    HouseCategory {
        id: 9,
        title: "9th House",
        description: "Travel, higher education, law, religion",
        keywords: &["Travel", "University", "Court", "God"],
    },
    HouseCategory {
        id: 10,
        title: "10th House",
        description: "Career, reputation, public status, authority",
        keywords: &["Boss", "Career", "Fame"],
    },
    HouseCategory {
        id: 11,
        title: "11th House",
        description: "Friends, groups, hopes, wishes",
        keywords: &["Friend", "Club", "Hope"],
    },
    HouseCategory {
        id: 12,
        title: "12th House",
        description: "Hidden things, hospitals, isolation, loss",
        keywords: &["Lost", "Secret", "Hospital"],
    },
];

pub fn house_category(id: u8) -> Result<&'static HouseCategory, GeoChartError> {
    HOUSE_CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .ok_or(GeoChartError::UnknownHouse(id))
}

/// First category whose title or keywords match `query`, ignoring case.
pub fn find_house_category(query: &str) -> Option<&'static HouseCategory> {
    let query = query.trim();
    HOUSE_CATEGORIES.iter().find(|c| {
        c.title.eq_ignore_ascii_case(query) || c.keywords.iter().any(|k| k.eq_ignore_ascii_case(query))
    })
}
