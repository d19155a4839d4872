use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use geochart::horary::{build_locator_geojson, find_house_category, house_category, LocatorGeoJson, HOUSE_CATEGORIES};
use geochart::wheel::ChartWheelData;
use geochart::{
    build_chart_bodies, build_geo_chart, build_overlay_geojson, compute_ring_values, AzimuthContext,
    BearingConvention, ChartResponse, DistanceUnit, GeoPoint, HoraryResolver, ResolverOutput, RingMode,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Decimal,
    DegreeDerived,
}

impl From<ModeArg> for RingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Decimal => RingMode::Decimal,
            ModeArg::DegreeDerived => RingMode::DegreeDerived,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnitArg {
    Miles,
    Km,
}

impl From<UnitArg> for DistanceUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Miles => DistanceUnit::Miles,
            UnitArg::Km => DistanceUnit::Km,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Project astrological charts onto a map")]
struct Args {
    /// Config file (default: configs/geochart.toml, then built-in defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rays, rings and intersections for a chart around a point.
    Overlay {
        /// Chart response JSON file.
        #[arg(long)]
        chart: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Only draw this body (e.g. `sun`, `ic`, `house_7`).
        #[arg(long)]
        select: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
        #[arg(long)]
        max_miles: Option<f64>,
        /// Point 0° Aries East instead of North.
        #[arg(long)]
        compass: bool,
    },
    /// Ring distances for a mode.
    Rings {
        #[arg(long, value_enum, default_value_t = ModeArg::Decimal)]
        mode: ModeArg,
        #[arg(long, default_value_t = 1600.0)]
        max_miles: f64,
        /// Reference degree for degree-derived rings.
        #[arg(long)]
        reference: Option<f64>,
    },
    /// Chart wheel layers around a point.
    Wheel {
        #[arg(long)]
        chart: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        #[arg(long)]
        radius_km: Option<f64>,
        #[arg(long)]
        houses: bool,
        #[arg(long)]
        rays: bool,
        #[arg(long)]
        markers: bool,
    },
    /// Resolve a horary question into a direction and distances.
    Locate {
        #[arg(long)]
        chart: PathBuf,
        /// House number (1-12) or a keyword such as `wallet`.
        #[arg(long)]
        house: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Enables azimuths together with the question time.
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// RFC 3339 time of the question (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Include map shapes.
        #[arg(long)]
        geojson: bool,
    },
    /// List the house categories a question can be filed under.
    Categories,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateReport {
    #[serde(flatten)]
    output: ResolverOutput,
    cardinal: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    geojson: Option<LocatorGeoJson>,
}

fn read_chart(path: &Path) -> anyhow::Result<ChartResponse> {
    let text = fs::read_to_string(path).with_context(|| format!("reading chart {}", path.display()))?;
    let chart = ChartResponse::from_json(&text)?;
    chart.validate()?;
    Ok(chart)
}

fn resolve_house(query: &str) -> anyhow::Result<u8> {
    if let Ok(id) = query.parse::<u8>() {
        return Ok(house_category(id)?.id);
    }
    find_house_category(query)
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("No house category matches {query:?}"))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = geochart_config::load_config(args.config.as_deref())?;
    let center_or = |lat: Option<f64>, lng: Option<f64>| {
        GeoPoint::new(lat.unwrap_or(config.center.lat), lng.unwrap_or(config.center.lng))
    };

    match args.command {
        Command::Overlay {
            chart,
            lat,
            lng,
            select,
            mode,
            unit,
            max_miles,
            compass,
        } => {
            let chart = read_chart(&chart)?;
            let convention = if compass {
                BearingConvention::EclipticToCompass { rotation_offset: 0.0 }
            } else {
                config.overlay_convention
            };
            let bodies = build_chart_bodies(&chart, convention);

            let mut settings = config.overlay.clone();
            let keep_pinned = config.pinned_ring_values && mode.is_none() && max_miles.is_none() && select.is_none();
            settings.selected_body_id = select;
            if let Some(mode) = mode {
                settings.ring_mode = mode.into();
            }
            if let Some(unit) = unit {
                settings.distance_unit = unit.into();
            }
            if let Some(max) = max_miles {
                anyhow::ensure!(max > 0.0, "--max-miles must be positive");
                settings.max_distance_miles = max;
            }
            if !keep_pinned {
                settings.refresh_ring_values(&bodies);
            }
            log::info!("{} bodies, rings {:?}", bodies.len(), settings.ring_values_miles);

            let overlay = build_overlay_geojson(center_or(lat, lng), &bodies, &settings);
            print_json(&overlay, args.pretty)
        }
        Command::Rings {
            mode,
            max_miles,
            reference,
        } => {
            anyhow::ensure!(max_miles > 0.0, "--max-miles must be positive");
            print_json(&compute_ring_values(mode.into(), max_miles, reference), args.pretty)
        }
        Command::Wheel {
            chart,
            lat,
            lng,
            radius_km,
            houses,
            rays,
            markers,
        } => {
            let chart = read_chart(&chart)?;
            let data = ChartWheelData::from(&chart);
            let mut settings = config.wheel.clone();
            if let Some(radius) = radius_km {
                anyhow::ensure!(radius > 0.0, "--radius-km must be positive");
                settings.radius_km = radius;
            }
            settings.show_houses |= houses;
            settings.show_rays |= rays;
            settings.show_markers |= markers;

            let layers = build_geo_chart(center_or(lat, lng), Some(&data), &settings);
            print_json(&layers, args.pretty)
        }
        Command::Locate {
            chart,
            house,
            lat,
            lng,
            at,
            geojson,
        } => {
            anyhow::ensure!((-90.0..=90.0).contains(&lat), "--lat must be within [-90, 90]");
            let chart = read_chart(&chart)?;
            let target_house = resolve_house(&house)?;
            let resolver = HoraryResolver::new(&chart);

            let output = match lng {
                Some(longitude) if config.locator.with_azimuth => {
                    let context = AzimuthContext {
                        longitude,
                        timestamp: at.unwrap_or_else(Utc::now),
                    };
                    resolver.resolve_with_azimuth(target_house, lat, &context)
                }
                _ => resolver.resolve(target_house, lat),
            };

            for hint in &output.distance_hints {
                log::info!("{}: {:.1} {}", hint.label, hint.value(config.locator.hint_unit), config.locator.hint_unit);
            }

            let shapes = geojson.then(|| build_locator_geojson(center_or(Some(lat), lng), &output));
            let report = LocateReport {
                cardinal: geochart::zodiac::bearing_to_cardinal(output.sector.center_deg),
                output,
                geojson: shapes,
            };
            print_json(&report, args.pretty)
        }
        Command::Categories => print_json(&HOUSE_CATEGORIES, args.pretty),
    }
}
