//! Polling loop state machine and thread hand-off

use mini_radar::config::Config;
use mini_radar::core::types::Team;
use mini_radar::game::mock::{MockGame, PlayerSpec};
use mini_radar::memory::{ConnectionState, MockBackend};
use mini_radar::poller::{self, PollState, Poller};
use std::thread;
use std::time::{Duration, Instant};

fn fast_config() -> Config {
    let mut config = Config::default();
    config.polling.refresh_interval_ms = 10;
    config.polling.retry_interval_ms = 100;
    config.polling.fault_backoff_ms = 10;
    config
}

fn poller(game: &MockGame) -> Poller<MockBackend> {
    Poller::new(game.backend(), &Config::default())
}

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_attach_attempts_are_rate_limited() {
    let game = MockGame::new();
    let backend = game.backend();
    let mut poller = poller(&game);
    let t0 = Instant::now();

    let frame = poller.tick(t0).unwrap();
    assert!(!frame.connected);
    assert_eq!(backend.find_calls(), 1);

    poller.tick(t0 + Duration::from_millis(100)).unwrap();
    poller.tick(t0 + Duration::from_millis(4900)).unwrap();
    assert_eq!(backend.find_calls(), 1);
    assert_eq!(poller.state(), PollState::Disconnected);

    game.launch(900);
    let frame = poller.tick(t0 + Duration::from_millis(5000)).unwrap();
    assert_eq!(backend.find_calls(), 2);
    assert!(frame.connected);
    assert_eq!(poller.state(), PollState::Active);
}

#[test]
fn test_process_exit_publishes_disconnected_frame() {
    let game = MockGame::new();
    game.launch(900);
    game.spawn(0, PlayerSpec::new(Team::TERRORIST, 0.0, 0.0));
    game.spawn(1, PlayerSpec::new(Team::COUNTER_TERRORIST, 0.0, 0.0));
    let mut poller = poller(&game);
    let t0 = Instant::now();

    let frame = poller.tick(t0).unwrap();
    assert_eq!(frame.players.len(), 2);

    game.terminate();
    let frame = poller.tick(t0 + Duration::from_millis(100)).unwrap();
    assert!(!frame.connected);
    assert!(frame.players.is_empty());
    assert!(frame.local_player.is_none());
    assert_eq!(poller.state(), PollState::Disconnected);
    assert_eq!(poller.accessor().state(), ConnectionState::Disconnected);
}

#[test]
fn test_exit_during_entity_reads_is_not_published() {
    let game = MockGame::new();
    game.launch(900);
    game.spawn(0, PlayerSpec::new(Team::TERRORIST, 0.0, 0.0));
    game.spawn(1, PlayerSpec::new(Team::COUNTER_TERRORIST, 0.0, 0.0));
    let mut poller = poller(&game);
    let t0 = Instant::now();
    assert_eq!(poller.tick(t0).unwrap().players.len(), 2);

    let reads = 1 + game.offsets().entity_list_capacity + 4;
    game.backend().terminate_after_reads(reads);
    let frame = poller.tick(t0 + Duration::from_millis(100)).unwrap();
    assert!(!frame.connected);
    assert!(frame.players.is_empty());
    assert_eq!(poller.state(), PollState::Disconnected);
    assert_eq!(poller.accessor().state(), ConnectionState::Disconnected);
}

#[test]
fn test_reattach_after_restart() {
    let game = MockGame::new();
    game.launch(900);
    let mut poller = poller(&game);
    let t0 = Instant::now();
    poller.tick(t0).unwrap();

    game.terminate();
    poller.tick(t0 + Duration::from_millis(100)).unwrap();
    assert_eq!(poller.state(), PollState::Disconnected);

    game.launch(901);
    game.spawn(3, PlayerSpec::new(Team::TERRORIST, 0.0, 0.0));
    // Still inside the retry window of the last attempt
    assert!(!poller.tick(t0 + Duration::from_millis(200)).unwrap().connected);

    let frame = poller.tick(t0 + Duration::from_millis(5200)).unwrap();
    assert!(frame.connected);
    assert_eq!(frame.players.len(), 1);
    assert_eq!(poller.accessor().process().unwrap().pid, 901);
}

#[test]
fn test_access_denied_stays_disconnected() {
    let game = MockGame::new();
    game.launch(900);
    game.backend().set_access_denied(true);
    let mut poller = poller(&game);

    let (frame, _) = poller.step(Instant::now());
    assert!(!frame.unwrap().connected);
    assert_eq!(poller.state(), PollState::Disconnected);
}

#[test]
fn test_starting_process_waits_for_modules() {
    let game = MockGame::new();
    game.launch(900);
    game.backend().set_module_list_unavailable(true);
    let mut poller = poller(&game);
    let t0 = Instant::now();

    let (frame, pause) = poller.step(t0);
    assert!(!frame.unwrap().connected);
    assert_eq!(pause, Config::default().polling.refresh_interval());
    assert_eq!(poller.state(), PollState::Disconnected);

    game.backend().set_module_list_unavailable(false);
    assert!(poller.tick(t0 + Duration::from_millis(5000)).unwrap().connected);
}

#[test]
fn test_panic_inside_tick_is_contained() {
    let game = MockGame::new();
    game.launch(900);
    game.spawn(0, PlayerSpec::new(Team::TERRORIST, 0.0, 0.0));
    let config = fast_config();
    let mut poller = Poller::new(game.backend(), &config);
    let t0 = Instant::now();

    let (frame, pause) = poller.step(t0);
    assert!(frame.unwrap().connected);
    assert_eq!(pause, config.polling.refresh_interval());

    game.backend().inject_panic();
    let (frame, pause) = poller.step(t0 + Duration::from_millis(10));
    assert!(frame.is_none());
    assert_eq!(pause, config.polling.fault_backoff());

    let (frame, _) = poller.step(t0 + Duration::from_millis(20));
    let frame = frame.unwrap();
    assert!(frame.connected);
    assert_eq!(frame.players.len(), 1);
}

#[test]
fn test_ticks_are_numbered() {
    let game = MockGame::new();
    let mut poller = poller(&game);
    let t0 = Instant::now();
    for i in 1..=3u64 {
        let frame = poller.tick(t0 + Duration::from_millis(i)).unwrap();
        assert_eq!(frame.tick, i);
    }
    assert_eq!(poller.ticks(), 3);
}

#[test]
fn test_map_change_does_not_wait_for_next_refresh() {
    let game = MockGame::new();
    game.launch(900);
    let mut config = fast_config();
    config.polling.refresh_interval_ms = 60_000;

    let handle = poller::spawn(Poller::new(game.backend(), &config)).unwrap();
    assert!(wait_for(|| handle.latest().connected));

    handle.select_map("de_inferno");
    assert!(wait_for(|| handle.latest().map_name == "de_inferno"));
    handle.shutdown();
}

#[test]
fn test_spawned_poller_publishes_and_stops() {
    let game = MockGame::new();
    game.launch(900);
    let me = game.spawn(0, PlayerSpec::new(Team::TERRORIST, 0.0, 0.0));
    game.set_local_player(Some(me));
    game.spawn(1, PlayerSpec::new(Team::COUNTER_TERRORIST, 100.0, 100.0));

    let handle = poller::spawn(Poller::new(game.backend(), &fast_config())).unwrap();
    let frames = handle.subscribe();
    assert_eq!(handle.display().size, 400);

    assert!(wait_for(|| handle.latest().connected));
    let frame = handle.latest();
    assert_eq!(frame.counts.enemies, 1);
    assert_eq!(frame.counts.teammates, 1);

    handle.select_map("de_mirage");
    assert!(wait_for(|| handle.latest().map_name == "de_mirage"));

    game.terminate();
    assert!(wait_for(|| !handle.latest().connected));

    handle.shutdown();
    let last = frames.borrow().clone();
    assert!(!last.connected);
    assert!(last.players.is_empty());
}
