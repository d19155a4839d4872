//! Horary direction finding.
//!
//! Answers "which way, and how far?" for a question filed under one of the
//! twelve houses. The base layer needs only the chart and the observer's
//! latitude; [`HoraryResolver::resolve_with_azimuth`] adds true azimuths
//! when longitude and time are known.

pub mod distance;
pub mod geometry;
pub mod resolver;
pub mod sectors;
pub mod types;

pub use distance::{angular_separation, distance_hints};
pub use geometry::{build_locator_geojson, LocatorGeoJson};
pub use resolver::{AzimuthContext, HoraryResolver};
pub use sectors::{sector_center, sector_for_house, Hemisphere};
pub use types::{find_house_category, house_category, Analysis, DistanceHint, HouseCategory, ResolverOutput, Sector, HOUSE_CATEGORIES};
