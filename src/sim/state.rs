//! Game state and core simulation types

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::world::{generate_platform, generate_tree};
use crate::consts::*;
use crate::fall_limit_for_viewport;

/// Current phase of a crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Hero at rest, loop idle until the player starts a stretch
    Waiting,
    /// Stick grows while the pointer is held
    Stretching,
    /// Stick rotates down toward horizontal
    Turning,
    /// Hero walks along the stick
    Walking,
    /// Camera scrolls so the reached platform becomes the new home
    Transitioning,
    /// Stick keeps rotating, hero drops off the end
    Falling,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Waiting,
        Phase::Stretching,
        Phase::Turning,
        Phase::Walking,
        Phase::Transitioning,
        Phase::Falling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Stretching => "stretching",
            Phase::Turning => "turning",
            Phase::Walking => "walking",
            Phase::Transitioning => "transitioning",
            Phase::Falling => "falling",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| SimError::UnknownPhase(s.to_string()))
    }
}

/// A platform the hero can stand on. Read-only once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Left edge in world coordinates
    pub x: f32,
    pub width: f32,
}

impl Platform {
    pub const fn new(x: f32, width: f32) -> Self {
        Self { x, width }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A stick anchored at the right edge of the platform it was grown from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    /// World x of the base
    pub x: f32,
    pub length: f32,
    /// Degrees clockwise from vertical (0 = upright, 90 = flat, 180 = hanging)
    pub rotation: f32,
}

impl Stick {
    pub const fn new(x: f32) -> Self {
        Self {
            x,
            length: 0.0,
            rotation: 0.0,
        }
    }

    /// Horizontal reach of the stick once it lies flat
    #[inline]
    pub fn far_x(&self) -> f32 {
        self.x + self.length
    }
}

/// One of the three tree colours of the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeShade {
    Dark,
    Mid,
    Light,
}

impl TreeShade {
    pub const ALL: [TreeShade; 3] = [TreeShade::Dark, TreeShade::Mid, TreeShade::Light];

    /// Index into a theme's tree colour list
    pub fn index(&self) -> usize {
        match self {
            TreeShade::Dark => 0,
            TreeShade::Mid => 1,
            TreeShade::Light => 2,
        }
    }
}

/// Decorative background tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    pub shade: TreeShade,
}

/// Complete session state, owned by the loop driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the world RNG was created from
    pub seed: u64,
    pub phase: Phase,
    /// Set once a fall has run its course; no further ticks until restart
    pub game_over: bool,
    /// Score of the current session
    pub score: u32,
    /// Best score ever, never decreases
    pub high_score: u32,
    /// Platforms in left-to-right order, `platforms[0]` is fixed
    pub platforms: Vec<Platform>,
    /// Sticks in placement order; the last one is the active stick
    pub sticks: Vec<Stick>,
    pub trees: Vec<Tree>,
    /// Hero feet position; y only changes while falling
    pub hero: Vec2,
    /// Camera translation along x
    pub scene_offset: f32,
    /// Drop distance that ends a fall
    pub fall_limit: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the given world seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: Phase::Waiting,
            game_over: false,
            score: 0,
            high_score: 0,
            platforms: Vec::new(),
            sticks: Vec::new(),
            trees: Vec::new(),
            hero: Vec2::ZERO,
            scene_offset: 0.0,
            fall_limit: fall_limit_for_viewport(CANVAS_HEIGHT),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Create a session that starts from a known best score
    pub fn with_high_score(seed: u64, high_score: u32) -> Self {
        let mut state = Self::new(seed);
        state.high_score = high_score;
        state
    }

    /// Reinitialize every entity for a new session.
    ///
    /// The high score, fall limit and RNG stream carry over, so consecutive
    /// sessions get different layouts.
    pub fn reset(&mut self) {
        self.phase = Phase::Waiting;
        self.game_over = false;
        self.score = 0;
        self.scene_offset = 0.0;

        self.platforms.clear();
        self.platforms
            .push(Platform::new(FIRST_PLATFORM_X, FIRST_PLATFORM_WIDTH));
        for _ in 0..INITIAL_PLATFORMS {
            generate_platform(&mut self.platforms, &mut self.rng);
        }

        let home = self.platforms[0];
        self.sticks.clear();
        self.sticks.push(Stick::new(home.right()));

        self.trees.clear();
        for _ in 0..INITIAL_TREES {
            generate_tree(&mut self.trees, &mut self.rng);
        }

        self.hero = Vec2::new(Self::hero_rest_x(), 0.0);
    }

    /// The stick currently being grown, turned or walked on
    pub fn active_stick(&self) -> &Stick {
        // reset() always leaves one stick and sticks are only ever appended
        &self.sticks[self.sticks.len() - 1]
    }

    pub fn active_stick_mut(&mut self) -> &mut Stick {
        let last = self.sticks.len() - 1;
        &mut self.sticks[last]
    }

    /// Whether the animation loop needs frames in the current state
    pub fn wants_frames(&self) -> bool {
        !self.game_over && self.phase != Phase::Waiting
    }

    /// Resting x of the hero on the first platform
    pub fn hero_rest_x() -> f32 {
        FIRST_PLATFORM_X + FIRST_PLATFORM_WIDTH - HERO_DISTANCE_FROM_EDGE
    }
}
