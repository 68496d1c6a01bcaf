//! Session driver
//!
//! Owns the game state and everything around it: the frame clock, the
//! persisted best score, the transient "perfect" indicator and the viewport.
//! A platform front end feeds it input and frame timestamps and draws what
//! `scene` returns; it never touches the simulation directly.

use crate::best_score::BestScore;
use crate::consts::PERFECT_INDICATOR_MS;
use crate::fall_limit_for_viewport;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameClock, InputEvent, command_for};
use crate::renderer::{SceneStyle, Shape, Viewport, build_scene};
use crate::sim::{Command, GameEvent, GameState, SimError, apply_command, tick};

/// Read-only projection for the score display and overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub best: u32,
    /// "Perfect" indicator is up
    pub perfect: bool,
    /// How-to-play hint, shown until the first stretch of a session
    pub introduction: bool,
    pub game_over: bool,
}

/// Result of one animation frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<GameEvent>,
    /// Whether another frame should be requested
    pub keep_running: bool,
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    best: BestScore,
    store: S,
    clock: FrameClock,
    viewport: Viewport,
    perfect_shown_at: Option<f64>,
    introduction: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, reading the best score from `store`
    pub fn new(store: S, seed: u64) -> Self {
        let best = BestScore::load(&store);
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::with_high_score(seed, best.value()),
            best,
            store,
            clock: FrameClock::new(),
            viewport: Viewport::default(),
            perfect_shown_at: None,
            introduction: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session and hand back its store
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn best(&self) -> u32 {
        self.best.value()
    }

    /// Apply a command. Returns true when the caller must start requesting frames.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if !apply_command(&mut self.state, command) {
            return false;
        }

        match command {
            Command::BeginStretch => {
                self.clock.reset();
                self.introduction = false;
                true
            }
            Command::ReleaseStretch => false,
            Command::Restart => {
                self.clock.reset();
                self.perfect_shown_at = None;
                self.introduction = true;
                log::info!("Session restarted (best {})", self.best.value());
                false
            }
        }
    }

    /// Map and apply a raw input event
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        command_for(event).is_some_and(|command| self.handle_command(command))
    }

    /// Advance one animation frame at `timestamp` (ms, monotonic).
    ///
    /// A fatal simulation error aborts the tick; the caller should stop the loop.
    pub fn on_frame(&mut self, timestamp: f64) -> Result<FrameOutcome, SimError> {
        if !self.state.wants_frames() {
            return Ok(FrameOutcome::default());
        }

        let Some(dt) = self.clock.delta(timestamp) else {
            return Ok(FrameOutcome {
                events: Vec::new(),
                keep_running: true,
            });
        };

        let events = tick(&mut self.state, dt).inspect_err(|e| {
            log::error!("Tick aborted in {} phase: {}", self.state.phase, e);
        })?;

        for event in &events {
            match *event {
                GameEvent::Scored { points, perfect } => {
                    log::debug!("Scored {} (perfect: {})", points, perfect);
                    if perfect {
                        self.perfect_shown_at = Some(timestamp);
                    }
                }
                GameEvent::NewHighScore(score) => {
                    if self.best.record(score, &self.store) {
                        log::info!("New best score: {}", score);
                    }
                }
                GameEvent::GameOver => {
                    log::info!("Game over with score {}", self.state.score);
                }
                GameEvent::ReachedPlatform | GameEvent::Fell => {}
            }
        }

        Ok(FrameOutcome {
            events,
            keep_running: self.state.wants_frames(),
        })
    }

    /// Drawing surface changed size; the next draw uses the new layout
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.state.fall_limit = fall_limit_for_viewport(height);
    }

    /// Display fields at time `now` (ms)
    pub fn hud(&self, now: f64) -> Hud {
        Hud {
            score: self.state.score,
            best: self.best.value(),
            perfect: self
                .perfect_shown_at
                .is_some_and(|shown| now - shown < PERFECT_INDICATOR_MS),
            introduction: self.introduction,
            game_over: self.state.game_over,
        }
    }

    /// Shapes for the current frame
    pub fn scene(&self, style: SceneStyle<'_>) -> Vec<Shape> {
        build_scene(&self.state, self.viewport, style)
    }
}
