use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sentry_pdu::{
    CheckParams, Humidity, Outlet, RawRow, SectionKind, SensorSection, Temperature,
};

fn outlet_table(count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            [
                format!("AA{i}"),
                format!("Outlet_{i}"),
                "1".into(),
                if i % 7 == 0 { "18".into() } else { "0".into() },
                "27".into(),
                "2073".into(),
                "48".into(),
                "55".into(),
            ]
            .to_vec()
        })
        .collect()
}

fn temperature_table(count: usize) -> Vec<RawRow> {
    let mut rows = vec![["1", "", "", "", "", "", "", "", ""].map(String::from).to_vec()];
    rows.extend((0..count).map(|i| {
        [
            String::new(),
            format!("T{i}"),
            format!("probe_{i}"),
            if i % 5 == 0 { "-706".into() } else { (590 + i as i64).to_string() },
            "0".into(),
            "34".into(),
            "41".into(),
            "113".into(),
            "122".into(),
        ]
        .to_vec()
    }));
    rows
}

/// Benchmark normalizing raw tables into a catalog
fn bench_parse(c: &mut Criterion) {
    for size in [8usize, 64, 512] {
        let outlets = outlet_table(size);
        c.bench_with_input(BenchmarkId::new("outlet_parse", size), &outlets, |b, rows| {
            b.iter(|| Outlet::parse(black_box(rows.clone())).expect("Should parse outlets"))
        });

        let temps = temperature_table(size);
        c.bench_with_input(BenchmarkId::new("temperature_parse", size), &temps, |b, rows| {
            b.iter(|| Temperature::parse(black_box(rows.clone())).expect("Should parse temperatures"))
        });
    }
}

/// Benchmark evaluating a single item
fn bench_check(c: &mut Criterion) {
    let params = CheckParams::default().with_levels(60.0, 80.0);
    let row = ["E1", "HVAC_1_output", "71", "0", "5", "10", "90", "95"]
        .map(String::from)
        .to_vec();
    let section = Humidity::parse(vec![row]).expect("Should parse humidity");

    c.bench_function("humidity_check", |b| {
        b.iter(|| {
            Humidity::check(black_box("Humidity E1 HVAC_1_output"), &params, &section)
                .expect("Should check humidity")
        })
    });
}

/// Benchmark a full polling cycle: parse, discover and check every item
fn bench_cycle(c: &mut Criterion) {
    let params = CheckParams::default();
    let outlets = outlet_table(64);

    c.bench_function("outlet_cycle_64", |b| {
        b.iter(|| {
            SectionKind::Outlet
                .check_all(black_box(outlets.clone()), &params)
                .expect("Should run cycle")
        })
    });
}

/// Benchmark JSON rendering of check outputs
fn bench_json_serialization(c: &mut Criterion) {
    let outlets = outlet_table(1);
    let outputs = SectionKind::Outlet
        .check(outlets, "Outlet AA0 Outlet_0", &CheckParams::default())
        .expect("Should check outlet");

    c.bench_function("outputs_json_serialization", |b| {
        b.iter(|| serde_json::to_string(black_box(&outputs)).expect("Should serialize"))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_check,
    bench_cycle,
    bench_json_serialization
);
criterion_main!(benches);
