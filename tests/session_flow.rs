//! End-to-end runs of a session driven by frame timestamps

use stick_hero::consts::{INITIAL_PLATFORMS, INITIAL_TREES, PERFECT_INDICATOR_MS};
use stick_hero::persistence::{KeyValueStore, MemoryStore};
use stick_hero::session::Session;
use stick_hero::sim::{Command, GameEvent, Phase};

const FRAME_MS: f64 = 16.0;

/// Run 16 ms frames until the loop asks to stop, collecting events with their timestamps
fn run_to_rest<S: KeyValueStore>(
    session: &mut Session<S>,
    time: &mut f64,
) -> Vec<(f64, GameEvent)> {
    let mut events = Vec::new();
    for _ in 0..100_000 {
        *time += FRAME_MS;
        let outcome = session.on_frame(*time).unwrap();
        events.extend(outcome.events.into_iter().map(|e| (*time, e)));
        if !outcome.keep_running {
            break;
        }
    }
    events
}

/// Grow the active stick to exactly `length` in one frame, then release and settle
fn play_stick<S: KeyValueStore>(
    session: &mut Session<S>,
    time: &mut f64,
    length: f32,
) -> Vec<(f64, GameEvent)> {
    assert!(session.handle_command(Command::BeginStretch));
    *time += FRAME_MS;
    session.on_frame(*time).unwrap();
    *time += f64::from(length) * 4.0;
    session.on_frame(*time).unwrap();
    session.handle_command(Command::ReleaseStretch);
    run_to_rest(session, time)
}

/// Stick length that lands on the center of the next platform
fn perfect_length<S: KeyValueStore>(session: &Session<S>) -> f32 {
    let state = session.state();
    let stick = state.active_stick();
    let target = state
        .platforms
        .iter()
        .find(|p| p.x > stick.x)
        .expect("world always has a platform ahead");
    target.center() - stick.x
}

#[test]
fn stretch_and_turn_follow_elapsed_time() {
    let mut session = Session::new(MemoryStore::new(), 7);
    let mut time = 1000.0;

    assert!(session.handle_command(Command::BeginStretch));
    session.on_frame(time).unwrap();
    time += 200.0;
    session.on_frame(time).unwrap();
    assert_eq!(session.state().active_stick().length, 50.0);

    session.handle_command(Command::ReleaseStretch);
    assert_eq!(session.state().phase, Phase::Turning);
    time += 100.0;
    session.on_frame(time).unwrap();
    assert_eq!(session.state().active_stick().rotation, 25.0);

    // A long frame overshoots but the stick stops flat
    time += 1000.0;
    session.on_frame(time).unwrap();
    assert_eq!(session.state().active_stick().rotation, 90.0);
    assert_eq!(session.state().phase, Phase::Walking);
}

#[test]
fn perfect_crossing_scores_and_returns_to_waiting() {
    let mut session = Session::new(MemoryStore::new(), 42);
    let mut time = 0.0;
    let platforms_before = session.state().platforms.len();
    let trees_before = session.state().trees.len();

    let length = perfect_length(&session);
    let events = play_stick(&mut session, &mut time, length);

    assert!(events
        .iter()
        .any(|(_, e)| *e == GameEvent::Scored { points: 2, perfect: true }));
    assert!(events.iter().any(|(_, e)| *e == GameEvent::NewHighScore(2)));
    assert!(events.iter().any(|(_, e)| *e == GameEvent::ReachedPlatform));

    let state = session.state();
    assert_eq!(state.phase, Phase::Waiting);
    assert_eq!(state.score, 2);
    assert_eq!(state.sticks.len(), 2);
    assert_eq!(state.platforms.len(), platforms_before + 1);
    assert_eq!(state.trees.len(), trees_before + 2);
    assert!(state.scene_offset > 0.0);
}

#[test]
fn restart_resets_world_but_keeps_best() {
    let mut session = Session::new(MemoryStore::new(), 3);
    let mut time = 0.0;

    let length = perfect_length(&session);
    play_stick(&mut session, &mut time, length);
    assert_eq!(session.best(), 2);

    // Restart mid-stretch
    session.handle_command(Command::BeginStretch);
    assert!(!session.handle_command(Command::Restart));

    let state = session.state();
    assert_eq!(state.phase, Phase::Waiting);
    assert!(!state.game_over);
    assert_eq!(state.score, 0);
    assert_eq!(state.scene_offset, 0.0);
    assert_eq!(state.platforms.len(), 1 + INITIAL_PLATFORMS);
    assert_eq!(state.trees.len(), INITIAL_TREES);
    assert_eq!(state.sticks.len(), 1);
    assert_eq!(state.high_score, 2);
    assert_eq!(session.best(), 2);
    assert!(session.hud(time).introduction);
}

#[test]
fn best_score_persists_and_never_drops() {
    let mut session = Session::new(MemoryStore::new(), 11);
    let mut time = 0.0;
    for _ in 0..3 {
        let length = perfect_length(&session);
        play_stick(&mut session, &mut time, length);
    }
    assert_eq!(session.best(), 6);

    let store = session.into_store();
    assert_eq!(store.get("highScore").unwrap().as_deref(), Some("6"));

    // A fresh session starts from the stored best and a worse run keeps it
    let mut session = Session::new(store, 12);
    assert_eq!(session.best(), 6);
    assert_eq!(session.state().high_score, 6);

    let mut time = 0.0;
    play_stick(&mut session, &mut time, 0.0);
    assert!(session.state().game_over);
    assert_eq!(session.best(), 6);
    assert_eq!(session.hud(time).best, 6);
}

#[test]
fn fall_ends_session_exactly_once() {
    let mut session = Session::new(MemoryStore::new(), 5);
    let mut time = 0.0;

    let events = play_stick(&mut session, &mut time, 0.0);
    let fell = events.iter().filter(|(_, e)| *e == GameEvent::Fell).count();
    let game_over = events
        .iter()
        .filter(|(_, e)| *e == GameEvent::GameOver)
        .count();
    assert_eq!(fell, 1);
    assert_eq!(game_over, 1);

    let state = session.state();
    assert!(state.game_over);
    assert_eq!(state.phase, Phase::Falling);
    assert_eq!(state.active_stick().rotation, 180.0);
    assert!(state.hero.y > state.fall_limit);
    assert!(session.hud(time).game_over);

    // The loop stays stopped and stretching is refused until restart
    let outcome = session.on_frame(time + FRAME_MS).unwrap();
    assert!(outcome.events.is_empty());
    assert!(!outcome.keep_running);
    assert!(!session.handle_command(Command::BeginStretch));

    session.handle_command(Command::Restart);
    assert!(session.handle_command(Command::BeginStretch));
}

#[test]
fn perfect_indicator_expires() {
    let mut session = Session::new(MemoryStore::new(), 9);
    let mut time = 0.0;

    let length = perfect_length(&session);
    let events = play_stick(&mut session, &mut time, length);
    let shown_at = events
        .iter()
        .find_map(|(t, e)| matches!(e, GameEvent::Scored { perfect: true, .. }).then_some(*t))
        .expect("perfect hit");

    assert!(session.hud(shown_at).perfect);
    assert!(session.hud(shown_at + PERFECT_INDICATOR_MS - 1.0).perfect);
    assert!(!session.hud(shown_at + PERFECT_INDICATOR_MS).perfect);
}

#[test]
fn resize_changes_fall_depth() {
    let mut session = Session::new(MemoryStore::new(), 5);
    session.resize(800.0, 975.0);
    assert_eq!(session.state().fall_limit, 500.0);

    let mut time = 0.0;
    play_stick(&mut session, &mut time, 0.0);
    assert!(session.state().hero.y > 500.0);
}
