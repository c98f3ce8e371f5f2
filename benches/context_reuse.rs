use criterion::{black_box, criterion_group, criterion_main, Criterion};

use siderea::astrometry::{apco13, atciq, atco13, atioq};
use siderea::earth::ephemeris::KeplerianEphemeris;
use siderea::earth::orientation::Iau80Npb;
use siderea::earth::site::ObservingSite;
use siderea::refraction::Weather;
use siderea::time::leap_seconds::LeapSecondTable;
use siderea::CatalogStar;

const UTC1: f64 = 2456384.5;
const UTC2: f64 = 0.969254051;
const DUT1: f64 = 0.1550675;
const XP: f64 = 2.47230737e-7;
const YP: f64 = 1.82640464e-6;

fn star_field(n: usize) -> Vec<CatalogStar> {
    (0..n)
        .map(|k| CatalogStar {
            ra: 2.60 + 0.001 * k as f64,
            dec: 0.15 + 0.0007 * k as f64,
            pm_ra: 1e-6 * (k % 7) as f64,
            pm_dec: -5e-7 * (k % 5) as f64,
            parallax: 0.001 * (k % 3) as f64,
            rv: 0.0,
        })
        .collect()
}

/// One shared context against a fresh context per star, over a field of
/// 100 stars at the same epoch and site.
fn bench_context_reuse(c: &mut Criterion) {
    let table = LeapSecondTable::builtin();
    let site = ObservingSite::new(-0.527800806, -1.2345856, 2738.0);
    let weather = Weather::new(731.0, 12.8, 0.59, 0.55);
    let eph = KeplerianEphemeris;
    let pn = Iau80Npb;
    let stars = star_field(100);

    let mut group = c.benchmark_group("catalog_to_observed");

    group.bench_function("shared_context", |b| {
        b.iter(|| {
            let (astrom, _, _) = apco13(
                &table, UTC1, UTC2, DUT1, &site, XP, YP, &weather, &eph, &pn,
            )
            .unwrap();
            for star in &stars {
                let (ri, di) = atciq(black_box(star), &astrom);
                black_box(atioq(ri, di, &astrom));
            }
        })
    });

    group.bench_function("context_per_star", |b| {
        b.iter(|| {
            for star in &stars {
                let (obs, _, _) = atco13(
                    &table,
                    black_box(star),
                    UTC1,
                    UTC2,
                    DUT1,
                    &site,
                    XP,
                    YP,
                    &weather,
                    &eph,
                    &pn,
                )
                .unwrap();
                black_box(obs);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_context_reuse);
criterion_main!(benches);
