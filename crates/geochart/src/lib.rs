//! Geometric translation layer for astrological charts on a map.
//!
//! Converts zodiacal chart data (signs, degrees, house cusps) into compass
//! bearings, great-circle distances and GeoJSON shapes, and resolves horary
//! questions into a compass sector with distance estimates.
//!
//! Everything here is pure and synchronous. Chart positions come from an
//! external ephemeris service and are handed in as [`chart::ChartResponse`].

pub mod astro;
pub mod chart;
pub mod error;
pub mod geodesy;
pub mod geojson;
pub mod horary;
pub mod overlay;
pub mod rings;
pub mod wheel;
pub mod zodiac;

pub use chart::{build_chart_bodies, BodyGroup, ChartBody, ChartResponse};
pub use error::GeoChartError;
pub use geodesy::GeoPoint;
pub use horary::{AzimuthContext, HoraryResolver, ResolverOutput};
pub use overlay::{build_overlay_geojson, DistanceUnit, OverlayGeoJson, OverlaySettings};
pub use rings::{compute_ring_values, RingMode};
pub use wheel::{build_geo_chart, GeoChartLayers, WheelSettings};
pub use zodiac::{BearingConvention, Modality, TraditionalPlanet, ZodiacSign};
