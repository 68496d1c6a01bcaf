//! Variable-timestep simulation tick
//!
//! Each frame the driver passes the milliseconds elapsed since the previous
//! frame. One call advances exactly one phase step; nothing here draws.

use super::collision::resolve_stick_hit;
use super::error::SimError;
use super::state::{GameState, Phase, Stick};
use super::world::{generate_platform, generate_tree};
use crate::consts::*;

/// Player commands, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pointer/touch down: start growing the stick
    BeginStretch,
    /// Pointer/touch up: let the stick fall
    ReleaseStretch,
    /// Reinitialize the session
    Restart,
}

/// Things that happened during a tick that outer layers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The stick landed on a platform
    Scored { points: u32, perfect: bool },
    /// The running score passed the previous best
    NewHighScore(u32),
    /// Hero reached the far platform and the camera starts moving
    ReachedPlatform,
    /// Hero walked off the end of the stick
    Fell,
    /// The fall finished; the session is over
    GameOver,
}

/// Apply a command. Returns true if it changed the state.
///
/// `BeginStretch` is only accepted while waiting, `ReleaseStretch` only while
/// stretching. `Restart` is accepted in any state.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match command {
        Command::BeginStretch if state.phase == Phase::Waiting && !state.game_over => {
            state.phase = Phase::Stretching;
            true
        }
        Command::ReleaseStretch if state.phase == Phase::Stretching => {
            state.phase = Phase::Turning;
            true
        }
        Command::Restart => {
            state.reset();
            true
        }
        _ => false,
    }
}

/// Advance the game state by `dt` milliseconds
pub fn tick(state: &mut GameState, dt: f32) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();
    if state.game_over {
        return Ok(events);
    }

    let phase_before = state.phase;

    match state.phase {
        // The loop is not scheduled while waiting
        Phase::Waiting => {}

        Phase::Stretching => {
            state.active_stick_mut().length += dt / STRETCHING_SPEED;
        }

        Phase::Turning => {
            let stick = state.active_stick_mut();
            stick.rotation = (stick.rotation + dt / TURNING_SPEED).min(90.0);

            if stick.rotation >= 90.0 {
                let hit = resolve_stick_hit(&state.sticks, &state.platforms)?;
                if hit.platform.is_some() {
                    let points = if hit.perfect {
                        PERFECT_HIT_POINTS
                    } else {
                        NORMAL_HIT_POINTS
                    };
                    state.score += points;
                    events.push(GameEvent::Scored {
                        points,
                        perfect: hit.perfect,
                    });

                    generate_platform(&mut state.platforms, &mut state.rng);
                    for _ in 0..TREES_PER_CROSSING {
                        generate_tree(&mut state.trees, &mut state.rng);
                    }
                }
                state.phase = Phase::Walking;
            }
        }

        Phase::Walking => {
            state.hero.x += dt / WALKING_SPEED;

            let hit = resolve_stick_hit(&state.sticks, &state.platforms)?;
            if let Some(platform) = hit.platform {
                // Stop at the far platform's resting spot
                let max_hero_x = platform.right() - HERO_DISTANCE_FROM_EDGE;
                if state.hero.x > max_hero_x {
                    state.hero.x = max_hero_x;
                    state.phase = Phase::Transitioning;
                    events.push(GameEvent::ReachedPlatform);
                }
            } else {
                // Walk off the end of the stick
                let max_hero_x = state.active_stick().far_x() + HERO_WIDTH;
                if state.hero.x > max_hero_x {
                    state.hero.x = max_hero_x;
                    state.phase = Phase::Falling;
                    events.push(GameEvent::Fell);
                }
            }
        }

        Phase::Transitioning => {
            state.scene_offset += dt / TRANSITIONING_SPEED;

            let platform = resolve_stick_hit(&state.sticks, &state.platforms)?
                .platform
                .ok_or(SimError::NoLandingPlatform)?;
            if state.scene_offset > platform.right() - PADDING_X {
                state.sticks.push(Stick::new(platform.right()));
                state.phase = Phase::Waiting;
            }
        }

        Phase::Falling => {
            let stick = state.active_stick_mut();
            if stick.rotation < 180.0 {
                stick.rotation = (stick.rotation + dt / TURNING_SPEED).min(180.0);
            }

            state.hero.y += dt / FALLING_SPEED;
            if state.hero.y > state.fall_limit {
                state.game_over = true;
                events.push(GameEvent::GameOver);
            }
        }
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::NewHighScore(state.high_score));
    }

    if state.phase != phase_before {
        log::debug!("Phase {} -> {}", phase_before, state.phase);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;

    /// Session with a hand-placed target platform right of the home platform
    fn session_with_target(x: f32, width: f32) -> GameState {
        let mut state = GameState::new(12345);
        state.platforms.truncate(1);
        state.platforms.push(Platform::new(x, width));
        state
    }

    /// Drive a phase in small steps until it changes (bounded)
    fn run_until_phase_changes(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
        let phase = state.phase;
        let mut events = Vec::new();
        for _ in 0..10_000 {
            events.extend(tick(state, dt).unwrap());
            if state.phase != phase || state.game_over {
                break;
            }
        }
        events
    }

    #[test]
    fn test_waiting_tick_is_noop() {
        let mut state = GameState::new(1);
        let before = state.clone();
        assert!(tick(&mut state, 100.0).unwrap().is_empty());
        assert_eq!(state.phase, Phase::Waiting);
        assert_eq!(state.sticks, before.sticks);
        assert_eq!(state.hero, before.hero);
    }

    #[test]
    fn test_commands_only_valid_in_their_phase() {
        let mut state = GameState::new(1);
        assert!(!apply_command(&mut state, Command::ReleaseStretch));
        assert!(apply_command(&mut state, Command::BeginStretch));
        assert_eq!(state.phase, Phase::Stretching);
        assert!(!apply_command(&mut state, Command::BeginStretch));
        assert!(apply_command(&mut state, Command::ReleaseStretch));
        assert_eq!(state.phase, Phase::Turning);
        assert!(!apply_command(&mut state, Command::ReleaseStretch));
    }

    #[test]
    fn test_stretch_then_turn() {
        let mut state = GameState::new(1);
        apply_command(&mut state, Command::BeginStretch);
        for _ in 0..10 {
            tick(&mut state, 16.0).unwrap();
        }
        assert_eq!(state.active_stick().length, 40.0);
        assert_eq!(state.phase, Phase::Stretching);

        apply_command(&mut state, Command::ReleaseStretch);
        for _ in 0..5 {
            tick(&mut state, 20.0).unwrap();
        }
        assert_eq!(state.active_stick().rotation, 25.0);
        assert_eq!(state.active_stick().length, 40.0);
        assert_eq!(state.phase, Phase::Turning);
    }

    #[test]
    fn test_turning_clamps_at_ninety() {
        let mut state = session_with_target(200.0, 40.0);
        state.phase = Phase::Turning;
        state.active_stick_mut().length = 10.0;
        tick(&mut state, 1000.0).unwrap();
        assert_eq!(state.active_stick().rotation, 90.0);
        assert_eq!(state.phase, Phase::Walking);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_normal_hit_scores_one_and_extends_world() {
        let mut state = session_with_target(200.0, 40.0);
        let trees = state.trees.len();
        state.phase = Phase::Turning;
        // Far end at 205: on the platform but far from its center (220)
        state.active_stick_mut().length = 105.0;

        let events = tick(&mut state, 400.0).unwrap();
        assert_eq!(state.score, 1);
        assert_eq!(state.platforms.len(), 3);
        assert_eq!(state.trees.len(), trees + TREES_PER_CROSSING);
        assert!(events.contains(&GameEvent::Scored {
            points: 1,
            perfect: false
        }));
        assert_eq!(state.phase, Phase::Walking);
    }

    #[test]
    fn test_perfect_hit_scores_two() {
        let mut state = session_with_target(200.0, 40.0);
        state.phase = Phase::Turning;
        state.active_stick_mut().length = 120.0;

        let events = tick(&mut state, 400.0).unwrap();
        assert_eq!(state.score, 2);
        assert!(events.contains(&GameEvent::Scored {
            points: 2,
            perfect: true
        }));
        assert!(events.contains(&GameEvent::NewHighScore(2)));
        assert_eq!(state.high_score, 2);
    }

    #[test]
    fn test_successful_crossing_returns_to_waiting() {
        let mut state = session_with_target(200.0, 40.0);
        apply_command(&mut state, Command::BeginStretch);
        for _ in 0..30 {
            tick(&mut state, 16.0).unwrap();
        }
        // 480ms of stretching: length 120, far end at 220
        apply_command(&mut state, Command::ReleaseStretch);
        run_until_phase_changes(&mut state, 16.0);
        assert_eq!(state.phase, Phase::Walking);

        let events = run_until_phase_changes(&mut state, 16.0);
        assert!(events.contains(&GameEvent::ReachedPlatform));
        assert_eq!(state.phase, Phase::Transitioning);
        assert_eq!(state.hero.x, 230.0);

        run_until_phase_changes(&mut state, 16.0);
        assert_eq!(state.phase, Phase::Waiting);
        assert!(state.scene_offset > 240.0 - PADDING_X);
        assert_eq!(state.sticks.len(), 2);
        assert_eq!(*state.active_stick(), Stick::new(240.0));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_miss_falls_and_ends_session() {
        let mut state = session_with_target(200.0, 40.0);
        state.phase = Phase::Turning;
        state.active_stick_mut().length = 30.0;
        run_until_phase_changes(&mut state, 16.0);
        assert_eq!(state.phase, Phase::Walking);

        let events = run_until_phase_changes(&mut state, 16.0);
        assert!(events.contains(&GameEvent::Fell));
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.hero.x, 100.0 + 30.0 + HERO_WIDTH);

        let mut last_y = state.hero.y;
        let mut game_over_events = 0;
        while !state.game_over {
            let events = tick(&mut state, 16.0).unwrap();
            assert!(state.hero.y > last_y);
            assert!(state.active_stick().rotation <= 180.0);
            if state.game_over {
                assert!(state.hero.y > state.fall_limit);
            } else {
                assert!(state.hero.y <= state.fall_limit);
            }
            game_over_events += events.iter().filter(|e| **e == GameEvent::GameOver).count();
            last_y = state.hero.y;
        }
        assert_eq!(game_over_events, 1);
        assert_eq!(state.active_stick().rotation, 180.0);

        // Terminal: ticks no longer move anything
        let y = state.hero.y;
        assert!(tick(&mut state, 16.0).unwrap().is_empty());
        assert_eq!(state.hero.y, y);
        assert!(!apply_command(&mut state, Command::BeginStretch));
    }

    /// Hero walking on a flat stick of `length` towards a 200..240 platform
    fn walking_on_stick(length: f32, hero_x: f32) -> GameState {
        let mut state = session_with_target(200.0, 40.0);
        state.phase = Phase::Walking;
        let stick = state.active_stick_mut();
        stick.length = length;
        stick.rotation = 90.0;
        state.hero.x = hero_x;
        state
    }

    #[test]
    fn test_landing_stop_is_strict() {
        // Resting spot on the 200..240 platform is 230
        let mut state = walking_on_stick(120.0, 226.0);
        assert!(tick(&mut state, 16.0).unwrap().is_empty());
        assert_eq!(state.hero.x, 230.0);
        assert_eq!(state.phase, Phase::Walking);

        let events = tick(&mut state, 4.0).unwrap();
        assert_eq!(events, vec![GameEvent::ReachedPlatform]);
        assert_eq!(state.hero.x, 230.0);
        assert_eq!(state.phase, Phase::Transitioning);
    }

    #[test]
    fn test_walk_off_stick_end_is_strict() {
        // Stick ends at 130, the hero drops once past 130 + HERO_WIDTH
        let mut state = walking_on_stick(30.0, 143.0);
        tick(&mut state, 16.0).unwrap();
        assert_eq!(state.hero.x, 130.0 + HERO_WIDTH);
        assert_eq!(state.phase, Phase::Walking);

        let events = tick(&mut state, 4.0).unwrap();
        assert_eq!(events, vec![GameEvent::Fell]);
        assert_eq!(state.hero.x, 130.0 + HERO_WIDTH);
        assert_eq!(state.phase, Phase::Falling);
    }

    #[test]
    fn test_camera_stop_is_strict() {
        // Camera stops once past 240 - PADDING_X = 140
        let mut state = walking_on_stick(120.0, 230.0);
        state.phase = Phase::Transitioning;
        state.scene_offset = 132.0;
        tick(&mut state, 16.0).unwrap();
        assert_eq!(state.scene_offset, 240.0 - PADDING_X);
        assert_eq!(state.phase, Phase::Transitioning);
        assert_eq!(state.sticks.len(), 1);

        tick(&mut state, 16.0).unwrap();
        assert_eq!(state.phase, Phase::Waiting);
        assert_eq!(*state.active_stick(), Stick::new(240.0));
    }

    #[test]
    fn test_walking_with_tilted_stick_is_fatal() {
        let mut state = GameState::new(1);
        state.phase = Phase::Walking;
        state.active_stick_mut().rotation = 45.0;
        assert_eq!(
            tick(&mut state, 16.0),
            Err(SimError::StickNotHorizontal { rotation: 45.0 })
        );
    }

    #[test]
    fn test_transitioning_without_target_is_fatal() {
        let mut state = GameState::new(1);
        state.phase = Phase::Transitioning;
        state.active_stick_mut().rotation = 90.0;
        assert_eq!(tick(&mut state, 16.0), Err(SimError::NoLandingPlatform));
    }

    #[test]
    fn test_restart_mid_session() {
        let mut state = session_with_target(200.0, 40.0);
        state.phase = Phase::Turning;
        state.active_stick_mut().length = 120.0;
        tick(&mut state, 400.0).unwrap();
        assert_eq!(state.score, 2);

        assert!(apply_command(&mut state, Command::Restart));
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 2);
        assert_eq!(state.phase, Phase::Waiting);
        assert_eq!(state.platforms.len(), 1 + INITIAL_PLATFORMS);
        assert_eq!(state.trees.len(), INITIAL_TREES);
    }
}
