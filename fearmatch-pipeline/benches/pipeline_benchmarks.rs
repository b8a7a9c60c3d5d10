//! Criterion benchmarks for a full recompute of the visible list.
//!
//! Scores, filters and sorts catalogs of 100, 200 and 400 activities to track
//! that a recompute stays well inside a frame budget.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package fearmatch-pipeline
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fearmatch_core::test_support::{StaticPreferenceSource, StaticProfileSource};
use fearmatch_core::{
    Activity, Catalog, CostRange, DifficultyLevel, Environment, FearCategory, Location,
    Ordinal, PreferenceRecord, ProfileRecord, TimeCommitment, UserId,
};
use fearmatch_pipeline::MatchOrchestrator;
use fearmatch_scorer::MatchScorer;

/// Catalog sizes to benchmark.
const CATALOG_SIZES: &[usize] = &[100, 200, 400];

fn cycle<T: Ordinal>() -> impl Iterator<Item = T> {
    T::ALL.iter().copied().cycle()
}

/// Build a deterministic catalog cycling through every ordinal value.
#[expect(clippy::expect_used, reason = "benchmark fixtures should fail fast")]
fn build_catalog(size: usize) -> Catalog {
    let locations = [
        Some(Location::new("lisbon", "Lisbon")),
        Some(Location::new("alps", "Chamonix Alps")),
        Some(Location::new("berlin", "Berlin")),
        None,
    ];
    let rows = FearCategory::ALL
        .iter()
        .copied()
        .cycle()
        .zip(cycle::<DifficultyLevel>())
        .zip(cycle::<CostRange>().skip(1))
        .zip(cycle::<TimeCommitment>().skip(2))
        .zip(locations.iter().cycle())
        .take(size)
        .enumerate();
    let activities = rows
        .map(|(index, ((((category, difficulty), cost), time), location))| {
            let mut activity = Activity::new(
                format!("activity-{index}"),
                format!("Activity {index}"),
                vec![category],
                difficulty,
                cost,
                time,
                Environment::Both,
            )
            .expect("benchmark activity is valid");
            activity.locations.extend(location.clone());
            activity
        })
        .collect();
    Catalog::new(activities).expect("benchmark ids are unique")
}

#[expect(clippy::expect_used, reason = "benchmark fixtures should fail fast")]
fn bench_recompute(c: &mut Criterion) {
    let profile: ProfileRecord = serde_json::from_str(
        r#"{"results": [
            {"category": "heights", "score": 4},
            {"category": "water", "score": 3},
            {"category": "social", "score": 2}
        ]}"#,
    )
    .expect("valid profile JSON");
    let preferences: PreferenceRecord =
        serde_json::from_str(r#"{"difficulty": "moderate", "preferredLocations": ["alps"]}"#)
            .expect("valid preference JSON");

    let mut group = c.benchmark_group("recompute");
    for &size in CATALOG_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("load_session", size), &size, |b, &n| {
            let mut orchestrator = MatchOrchestrator::new(
                build_catalog(n),
                StaticProfileSource::returning(Some(profile.clone())),
                StaticPreferenceSource::returning(Some(preferences.clone())),
                MatchScorer::new(),
            );
            b.iter(|| orchestrator.load_session(UserId::new("bench")));
        });
        group.bench_with_input(BenchmarkId::new("refilter", size), &size, |b, &n| {
            let mut orchestrator = MatchOrchestrator::new(
                build_catalog(n),
                StaticProfileSource::returning(Some(profile.clone())),
                StaticPreferenceSource::returning(Some(preferences.clone())),
                MatchScorer::new(),
            );
            orchestrator.load_session(UserId::new("bench"));
            let water = BTreeSet::from([FearCategory::Water]);
            let everything = BTreeSet::new();
            let mut toggle = false;
            b.iter(|| {
                toggle = !toggle;
                let selection = if toggle { water.clone() } else { everything.clone() };
                orchestrator.replace_fear_categories(selection);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
