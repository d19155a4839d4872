use geochart::overlay::EnabledGroups;
use geochart::{BearingConvention, DistanceUnit, GeoPoint, OverlaySettings, RingMode, WheelSettings};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATHS: [&str; 2] = ["configs/geochart.toml", "../../configs/geochart.toml"];

/// Resolved settings for every surface, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoChartConfig {
    pub center: GeoPoint,
    pub overlay: OverlaySettings,
    pub overlay_convention: BearingConvention,
    /// `overlay.ring_values_miles` was set in the file; keep those
    /// distances instead of recomputing them from the chart.
    pub pinned_ring_values: bool,
    pub wheel: WheelSettings,
    pub locator: LocatorSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorSettings {
    pub hint_unit: DistanceUnit,
    pub with_azimuth: bool,
}

impl Default for GeoChartConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(default_center_lat(), default_center_lng()),
            overlay: OverlaySettings::default(),
            overlay_convention: BearingConvention::default(),
            pinned_ring_values: false,
            wheel: WheelSettings::default(),
            locator: LocatorSettings {
                hint_unit: DistanceUnit::Km,
                with_azimuth: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    map: Option<MapToml>,
    #[serde(default)]
    overlay: Option<OverlayToml>,
    #[serde(default)]
    wheel: Option<WheelToml>,
    #[serde(default)]
    locator: Option<LocatorToml>,
}

#[derive(Debug, Clone, Deserialize)]
struct MapToml {
    #[serde(default = "default_center_lat")]
    center_lat: f64,
    #[serde(default = "default_center_lng")]
    center_lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct OverlayToml {
    #[serde(default = "default_true")]
    planets: bool,
    #[serde(default = "default_true")]
    angles: bool,
    #[serde(default)]
    houses: bool,
    #[serde(default = "default_max_distance_miles")]
    max_distance_miles: f64,
    #[serde(default = "default_distance_unit")]
    distance_unit: String,
    #[serde(default = "default_ring_mode")]
    ring_mode: String,
    #[serde(default)]
    ring_values_miles: Option<Vec<f64>>,
    #[serde(default = "default_true")]
    show_labels_on_map: bool,
    #[serde(default = "default_convention")]
    bearing_convention: String,
    #[serde(default)]
    rotation_offset: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct WheelToml {
    #[serde(default = "default_radius_km")]
    radius_km: f64,
    #[serde(default)]
    show_houses: bool,
    #[serde(default)]
    show_rays: bool,
    #[serde(default)]
    show_markers: bool,
    #[serde(default = "default_geodesic_steps")]
    geodesic_steps: usize,
    #[serde(default)]
    rotation_offset: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct LocatorToml {
    #[serde(default = "default_hint_unit")]
    hint_unit: String,
    #[serde(default = "default_true")]
    with_azimuth: bool,
}

fn default_true() -> bool {
    true
}

// Geographic center of the contiguous United States
fn default_center_lat() -> f64 {
    39.8283
}

fn default_center_lng() -> f64 {
    -98.5795
}

fn default_max_distance_miles() -> f64 {
    1600.0
}

fn default_distance_unit() -> String {
    "miles".to_string()
}

fn default_ring_mode() -> String {
    "degreeDerived".to_string()
}

fn default_convention() -> String {
    "zodiacal".to_string()
}

fn default_radius_km() -> f64 {
    50.0
}

fn default_geodesic_steps() -> usize {
    64
}

fn default_hint_unit() -> String {
    "km".to_string()
}

fn parse_unit(field: &str, value: &str) -> anyhow::Result<DistanceUnit> {
    match value.to_ascii_lowercase().as_str() {
        "miles" | "mi" => Ok(DistanceUnit::Miles),
        "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Km),
        other => anyhow::bail!("{field}: unknown distance unit {other:?} (expected \"miles\" or \"km\")"),
    }
}

fn parse_ring_mode(value: &str) -> anyhow::Result<RingMode> {
    match value {
        "decimal" => Ok(RingMode::Decimal),
        "degreeDerived" | "degree_derived" => Ok(RingMode::DegreeDerived),
        other => anyhow::bail!(
            "overlay.ring_mode: unknown mode {other:?} (expected \"decimal\" or \"degreeDerived\")"
        ),
    }
}

fn parse_convention(value: &str, rotation_offset: f64) -> anyhow::Result<BearingConvention> {
    match value {
        "zodiacal" => Ok(BearingConvention::Zodiacal),
        "eclipticToCompass" | "ecliptic_to_compass" => Ok(BearingConvention::EclipticToCompass { rotation_offset }),
        other => anyhow::bail!(
            "overlay.bearing_convention: unknown convention {other:?} (expected \"zodiacal\" or \"eclipticToCompass\")"
        ),
    }
}

fn build_overlay(cfg: OverlayToml) -> anyhow::Result<(OverlaySettings, BearingConvention, bool)> {
    if !(cfg.max_distance_miles > 0.0) {
        anyhow::bail!("overlay.max_distance_miles must be positive, got {}", cfg.max_distance_miles);
    }
    let ring_mode = parse_ring_mode(&cfg.ring_mode)?;
    let pinned = cfg.ring_values_miles.is_some();
    let ring_values_miles = match cfg.ring_values_miles {
        Some(values) => {
            if values.is_empty() || values.iter().any(|v| !(*v > 0.0)) {
                anyhow::bail!("overlay.ring_values_miles must be a non-empty list of positive distances");
            }
            if values.windows(2).any(|w| w[0] >= w[1]) {
                anyhow::bail!("overlay.ring_values_miles must be strictly ascending: {values:?}");
            }
            values
        }
        None => geochart::compute_ring_values(RingMode::Decimal, cfg.max_distance_miles, None),
    };

    let settings = OverlaySettings {
        enabled_groups: EnabledGroups {
            planets: cfg.planets,
            angles: cfg.angles,
            houses: cfg.houses,
        },
        max_distance_miles: cfg.max_distance_miles,
        distance_unit: parse_unit("overlay.distance_unit", &cfg.distance_unit)?,
        ring_mode,
        ring_values_miles,
        show_labels_on_map: cfg.show_labels_on_map,
        selected_body_id: None,
    };
    let convention = parse_convention(&cfg.bearing_convention, cfg.rotation_offset)?;
    Ok((settings, convention, pinned))
}

fn build_wheel(cfg: WheelToml) -> anyhow::Result<WheelSettings> {
    if !(cfg.radius_km > 0.0) {
        anyhow::bail!("wheel.radius_km must be positive, got {}", cfg.radius_km);
    }
    if cfg.geodesic_steps < 4 {
        anyhow::bail!("wheel.geodesic_steps must be at least 4, got {}", cfg.geodesic_steps);
    }
    Ok(WheelSettings {
        radius_km: cfg.radius_km,
        show_houses: cfg.show_houses,
        show_rays: cfg.show_rays,
        show_markers: cfg.show_markers,
        geodesic_steps: cfg.geodesic_steps,
        rotation_offset: cfg.rotation_offset,
    })
}

/// Try the usual relative locations of `configs/geochart.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("loaded config from {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load geochart.toml from {:?}", CONFIG_PATHS);
}

/// Parse and validate config text. Missing sections take their defaults.
pub fn parse_config(text: &str) -> anyhow::Result<GeoChartConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse geochart.toml: {e}"))?;
    let mut config = GeoChartConfig::default();

    if let Some(map) = root.map {
        if !(-90.0..=90.0).contains(&map.center_lat) {
            anyhow::bail!("map.center_lat out of range: {}", map.center_lat);
        }
        config.center = GeoPoint::new(map.center_lat, map.center_lng).normalized();
    }
    if let Some(overlay) = root.overlay {
        let (settings, convention, pinned) = build_overlay(overlay)?;
        config.overlay = settings;
        config.overlay_convention = convention;
        config.pinned_ring_values = pinned;
    }
    if let Some(wheel) = root.wheel {
        config.wheel = build_wheel(wheel)?;
    }
    if let Some(locator) = root.locator {
        config.locator = LocatorSettings {
            hint_unit: parse_unit("locator.hint_unit", &locator.hint_unit)?,
            with_azimuth: locator.with_azimuth,
        };
    }
    Ok(config)
}

/// Load from an explicit path, or search the default locations.
///
/// An explicit path must exist. Without one, a missing file means the
/// built-in defaults; a present but invalid file is still an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GeoChartConfig> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", p.display()))?,
        None => match read_config_toml_text() {
            Ok(text) => text,
            Err(e) => {
                log::info!("{e}; using built-in defaults");
                return Ok(GeoChartConfig::default());
            }
        },
    };
    parse_config(&text)
}
