use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geochart::geodesy::{destination_point, generate_circle_polygon, generate_geodesic_sector};
use geochart::{build_overlay_geojson, BodyGroup, ChartBody, GeoPoint, OverlaySettings, ZodiacSign};

fn bench_destination_point(c: &mut Criterion) {
    c.bench_function("destination_point", |b| {
        b.iter(|| destination_point(black_box(40.7128), black_box(-74.0060), black_box(123.4), black_box(250_000.0)))
    });
}

fn bench_circle_polygon(c: &mut Criterion) {
    c.bench_function("generate_circle_polygon_128", |b| {
        b.iter(|| generate_circle_polygon(black_box(40.7128), black_box(-74.0060), black_box(1_609_344.0), 128))
    });
}

fn bench_geodesic_sector(c: &mut Criterion) {
    c.bench_function("generate_geodesic_sector_64", |b| {
        b.iter(|| {
            generate_geodesic_sector(
                black_box(51.5),
                black_box(-0.12),
                black_box(5000.0),
                black_box(345.0),
                black_box(15.0),
                64,
            )
        })
    });
}

fn bench_overlay(c: &mut Criterion) {
    let bodies: Vec<ChartBody> = (0..14)
        .map(|i| {
            let abs_deg = i as f64 * 25.7;
            ChartBody {
                id: format!("body_{}", i),
                label: format!("Body {}", i),
                sign: ZodiacSign::from_index((abs_deg / 30.0) as usize),
                deg: abs_deg % 30.0,
                abs_deg,
                bearing_deg: abs_deg,
                group: if i < 10 { BodyGroup::Planet } else { BodyGroup::Angle },
                color: "#ffffff".to_string(),
            }
        })
        .collect();
    let settings = OverlaySettings::default();
    let center = GeoPoint::new(40.7128, -74.0060);

    c.bench_function("build_overlay_geojson", |b| {
        b.iter(|| build_overlay_geojson(black_box(center), black_box(&bodies), black_box(&settings)))
    });
}

criterion_group!(
    benches,
    bench_destination_point,
    bench_circle_polygon,
    bench_geodesic_sector,
    bench_overlay
);
criterion_main!(benches);
