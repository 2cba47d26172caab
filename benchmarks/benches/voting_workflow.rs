use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use election::{ElectionService, Voter};
use std::hint::black_box;
use std::time::Duration;

/// Election with `voters` registered voters and three candidates
fn populated_election(voters: usize) -> ElectionService {
    let election = ElectionService::new();
    for i in 0..voters {
        election
            .register_voter(&format!("voter_{i}"), format!("pw_{i}"))
            .unwrap();
    }
    for (name, party) in [
        ("John Doe", "Party A"),
        ("Jane Smith", "Party B"),
        ("Alan Poe", "Independent"),
    ] {
        election.add_candidate(name, party).unwrap();
    }
    election
}

/// Cast path: authentication plus tally increment
fn bench_cast_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("cast_vote");
    group.warm_up_time(Duration::from_millis(100));

    group.bench_function("fresh_voter", |b| {
        b.iter_batched(
            || {
                let election = populated_election(1);
                let john = election.get_candidate("John Doe").unwrap().unwrap();
                (election, john)
            },
            |(election, john)| {
                let outcome = election
                    .cast_vote(black_box(&Voter::new("voter_0", "pw_0")), &john)
                    .unwrap();
                black_box(outcome)
            },
            criterion::BatchSize::SmallInput,
        )
    });

    // Steady-state rejection path (voter already voted)
    let election = populated_election(1);
    let john = election.get_candidate("John Doe").unwrap().unwrap();
    let claim = Voter::new("voter_0", "pw_0");
    election.cast_vote(&claim, &john).unwrap();

    group.bench_function("already_voted", |b| {
        b.iter(|| black_box(election.cast_vote(black_box(&claim), &john).unwrap()))
    });

    group.bench_function("invalid_credential", |b| {
        let forged = Voter::new("voter_0", "guess");
        b.iter(|| black_box(election.cast_vote(black_box(&forged), &john).unwrap()))
    });

    group.finish();
}

/// Results computation as the electorate grows
fn bench_get_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_results");

    for voters in [10usize, 1_000, 10_000] {
        let election = populated_election(voters);
        let candidates = election.candidates().unwrap();
        for (i, voter) in election.voters().unwrap().iter().enumerate() {
            election
                .cast_vote(voter, &candidates[i % candidates.len()])
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(voters), &election, |b, election| {
            b.iter(|| black_box(election.get_results().unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cast_vote, bench_get_results);
criterion_main!(benches);
