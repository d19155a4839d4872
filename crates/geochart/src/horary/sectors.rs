//! House to compass sector tables.
//!
//! Northern observers face South toward the Midheaven, so the 10th house
//! sits at 180° and the houses run counter-clockwise round the compass.
//! Southern observers face North; the 10th house sits at 0°.

use super::types::Sector;
use crate::zodiac::normalize_degrees;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Used when a house number is missing from the tables.
pub const FALLBACK_SECTOR: (f64, f64) = (0.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The equator counts as North.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }
}

lazy_static! {
    static ref NORTHERN_SECTORS: HashMap<u8, (f64, f64)> = {
        let mut m = HashMap::new();
        m.insert(10, (165.0, 195.0)); // S
        m.insert(11, (135.0, 165.0));
        m.insert(12, (105.0, 135.0));
        m.insert(1, (75.0, 105.0)); // E
        m.insert(2, (45.0, 75.0));
        m.insert(3, (15.0, 45.0));
        m.insert(4, (345.0, 15.0)); // N
        m.insert(5, (315.0, 345.0));
        m.insert(6, (285.0, 315.0));
        m.insert(7, (255.0, 285.0)); // W
        m.insert(8, (225.0, 255.0));
        m.insert(9, (195.0, 225.0));
        m
    };
    static ref SOUTHERN_SECTORS: HashMap<u8, (f64, f64)> = {
        let mut m = HashMap::new();
        m.insert(10, (345.0, 15.0)); // N
        m.insert(11, (15.0, 45.0));
        m.insert(12, (45.0, 75.0));
        m.insert(1, (75.0, 105.0)); // E
        m.insert(2, (105.0, 135.0));
        m.insert(3, (135.0, 165.0));
        m.insert(4, (165.0, 195.0)); // S
        m.insert(5, (195.0, 225.0));
        m.insert(6, (225.0, 255.0));
        m.insert(7, (255.0, 285.0)); // W
        m.insert(8, (285.0, 315.0));
        m.insert(9, (315.0, 345.0));
        m
    };
}

/// Mean of the edges, or the mean across North when they are more than
/// 180° apart.
pub fn sector_center(start_deg: f64, end_deg: f64) -> f64 {
    if (start_deg - end_deg).abs() > 180.0 {
        normalize_degrees((start_deg + end_deg + 360.0) / 2.0)
    } else {
        (start_deg + end_deg) / 2.0
    }
}

/// Compass sector for a house, falling back to [`FALLBACK_SECTOR`].
pub fn sector_for_house(house: u8, hemisphere: Hemisphere) -> Sector {
    let table = match hemisphere {
        Hemisphere::North => &*NORTHERN_SECTORS,
        Hemisphere::South => &*SOUTHERN_SECTORS,
    };
    let (start_deg, end_deg) = table.get(&house).copied().unwrap_or_else(|| {
        log::warn!("no sector for house {}, using {:?}", house, FALLBACK_SECTOR);
        FALLBACK_SECTOR
    });

    Sector {
        start_deg,
        end_deg,
        center_deg: sector_center(start_deg, end_deg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_from_latitude() {
        assert_eq!(Hemisphere::from_latitude(40.7), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(-33.9), Hemisphere::South);
    }

    #[test]
    fn test_sector_center_wraps_through_north() {
        assert_eq!(sector_center(165.0, 195.0), 180.0);
        assert_eq!(sector_center(345.0, 15.0), 0.0);
        assert_eq!(sector_center(350.0, 30.0), 10.0);
    }

    #[test]
    fn test_northern_table() {
        let mc = sector_for_house(10, Hemisphere::North);
        assert_eq!((mc.start_deg, mc.end_deg, mc.center_deg), (165.0, 195.0, 180.0));
        assert_eq!(sector_for_house(1, Hemisphere::North).center_deg, 90.0);
        assert_eq!(sector_for_house(4, Hemisphere::North).center_deg, 0.0);
        assert_eq!(sector_for_house(7, Hemisphere::North).center_deg, 270.0);
    }

    #[test]
    fn test_southern_table() {
        assert_eq!(sector_for_house(10, Hemisphere::South).center_deg, 0.0);
        assert_eq!(sector_for_house(4, Hemisphere::South).center_deg, 180.0);
        assert_eq!(sector_for_house(1, Hemisphere::South).center_deg, 90.0);
        assert_eq!(sector_for_house(11, Hemisphere::South).center_deg, 30.0);
    }

    #[test]
    fn test_every_sector_is_thirty_degrees() {
        for hemisphere in [Hemisphere::North, Hemisphere::South] {
            for house in 1..=12 {
                let s = sector_for_house(house, hemisphere);
                let width = normalize_degrees(s.end_deg - s.start_deg);
                assert_eq!(width, 30.0, "house {} {:?}", house, hemisphere);
            }
        }
    }

    #[test]
    fn test_missing_house_falls_back() {
        let s = sector_for_house(0, Hemisphere::North);
        assert_eq!((s.start_deg, s.end_deg, s.center_deg), (0.0, 30.0, 15.0));
    }
}
