use std::str::FromStr;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vercheck_pep440::{compare, parse_and_compare, Version};

fn bench_parse(c: &mut Criterion) {
    let versions = [
        "1.19",
        "v1.0",
        "1.0a12.dev456",
        "4!5.6.7a8.post9.dev0",
        "1.0b2.post345.dev456",
        "2024.04.20",
        "1.2+1234.abc.deadbeef",
        "1.0.post0",
    ];

    c.bench_function("parse_version", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::from_str(black_box(version)).ok());
            }
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let pairs = [
        ("1.0", "1.0.0"),
        ("1.0a1", "1.0"),
        ("1.0.post456.dev34", "1.0.post456"),
        ("2!0.1", "1!9.9"),
        ("1.2+1234.abc", "1.2+abc"),
        ("3.9", "3.10"),
    ];
    let parsed: Vec<(Version, Version)> = pairs
        .iter()
        .map(|(left, right)| {
            (
                Version::from_str(left).unwrap(),
                Version::from_str(right).unwrap(),
            )
        })
        .collect();

    c.bench_function("compare_versions", |b| {
        b.iter(|| {
            for (left, right) in &parsed {
                black_box(compare(black_box(left), black_box(right)));
            }
        })
    });

    c.bench_function("parse_and_compare", |b| {
        b.iter(|| {
            for (left, right) in pairs {
                black_box(parse_and_compare(black_box(left), black_box(right)).ok());
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_compare);
criterion_main!(benches);
