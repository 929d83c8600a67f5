use bigyear::app::models::{Observation, PrivacyLevel, User};
use bigyear::app::services::leaderboard::{RankInput, compute_standings, rank_entries};
use bigyear::app::services::observation_store::ObservationStore;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn rank_inputs(users: usize) -> Vec<RankInput> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    (0..users)
        .map(|i| RankInput {
            user_id: i as u64 + 1,
            name: format!("Birder {}", i),
            privacy_level: match i % 10 {
                0 => PrivacyLevel::Private,
                1 => PrivacyLevel::CountsOnly,
                _ => PrivacyLevel::Public,
            },
            species_count: (i * 7919) % 400,
            last_observation_date: Some(start + Duration::days((i % 365) as i64)),
        })
        .collect()
}

fn populated_store(users: u64, sightings_per_user: u64) -> ObservationStore {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    let user_list: Vec<User> = (1..=users)
        .map(|id| User::new(id, format!("birder{}@example.org", id), created))
        .collect();

    let mut observations = Vec::new();
    let mut sequence = 0;
    for user_id in 1..=users {
        for n in 0..sightings_per_user {
            let species = (user_id * 31 + n * 17) % 500;
            observations.push(Observation {
                sequence,
                user_id,
                submission_id: Some(format!("S{}-{}", user_id, n)),
                common_name: format!("Species {}", species),
                scientific_name: format!("Genus species{}", species),
                taxonomic_order: Some(species as i64),
                count: Some("1".to_string()),
                state_province: Some("US-OH".to_string()),
                county: None,
                location: None,
                latitude: None,
                longitude: None,
                observation_date: start + Duration::days((n % 365) as i64),
                row_ordinal: n as usize + 1,
                uploaded_at: created,
            });
            sequence += 1;
        }
    }

    ObservationStore::from_parts(user_list, observations).unwrap()
}

fn bench_rank_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_entries");
    for users in [100, 1_000, 10_000] {
        let inputs = rank_inputs(users);
        group.bench_with_input(BenchmarkId::from_parameter(users), &inputs, |b, inputs| {
            b.iter(|| rank_entries(black_box(inputs.clone())))
        });
    }
    group.finish();
}

fn bench_compute_standings(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("compute_standings");
    group.sample_size(20);
    for users in [100u64, 1_000] {
        let store = populated_store(users, 300);
        group.bench_with_input(BenchmarkId::from_parameter(users), &store, |b, store| {
            b.iter(|| runtime.block_on(store.read(|view| compute_standings(view, 2026))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rank_entries, bench_compute_standings);
criterion_main!(benches);
