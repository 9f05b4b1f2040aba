use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_radar::config::{Config, TargetConfig};
use mini_radar::core::types::Team;
use mini_radar::game::mock::{MockGame, PlayerSpec};
use mini_radar::game::{Classifier, SnapshotBuilder};
use mini_radar::memory::MemoryAccessor;
use mini_radar::poller::Poller;
use std::time::Instant;

fn populated_game() -> MockGame {
    let game = MockGame::new();
    game.launch(4000);
    for slot in 0..20 {
        let team = if slot % 2 == 0 {
            Team::TERRORIST
        } else {
            Team::COUNTER_TERRORIST
        };
        let spec = PlayerSpec::new(team, slot as f32 * 100.0 - 1000.0, slot as f32 * 50.0);
        let address = game.spawn(slot, spec);
        if slot == 0 {
            game.set_local_player(Some(address));
        }
    }
    game
}

fn benchmark_snapshot(c: &mut Criterion) {
    let game = populated_game();
    let mut accessor = MemoryAccessor::new(game.backend(), TargetConfig::default());
    accessor.attach().unwrap();
    let builder = SnapshotBuilder::new(&accessor, game.offsets());

    c.bench_function("snapshot_20_players", |b| {
        b.iter(|| black_box(builder.snapshot().unwrap()));
    });

    let snapshot = builder.snapshot().unwrap();
    let classifier = Classifier::new(400);
    c.bench_function("assemble_20_players", |b| {
        b.iter(|| black_box(classifier.assemble(black_box(&snapshot), "de_dust2", 1)));
    });
}

fn benchmark_tick(c: &mut Criterion) {
    let game = populated_game();
    let mut poller = Poller::new(game.backend(), &Config::default());
    let now = Instant::now();

    c.bench_function("poller_tick", |b| {
        b.iter(|| black_box(poller.tick(now).unwrap()));
    });
}

criterion_group!(benches, benchmark_snapshot, benchmark_tick);
criterion_main!(benches);
