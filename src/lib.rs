//! Stick Hero - A pixel-art stick bridging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, stick collision, phase machine)
//! - `session`: Loop driver composing input, simulation, scoring and persistence
//! - `renderer`: Pixel-snapped scene building and the WebGPU pipeline
//! - `platform`: Input event mapping and frame timing
//! - `persistence`: Key-value storage (LocalStorage on web, memory elsewhere)

pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use session::{Hud, Session};
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Size of the play area the scene is laid out in (centered in the viewport)
    pub const CANVAS_WIDTH: f32 = 375.0;
    pub const CANVAS_HEIGHT: f32 = 375.0;
    pub const PLATFORM_HEIGHT: f32 = 100.0;
    /// Extra drop below the platform top before a fall ends the run
    pub const FALL_MARGIN: f32 = 100.0;

    /// Hero rests this far from the right edge of its platform
    pub const HERO_DISTANCE_FROM_EDGE: f32 = 10.0;
    /// Waiting position of the hero from the left of the play area
    pub const PADDING_X: f32 = 100.0;
    pub const PERFECT_AREA_SIZE: f32 = 10.0;

    pub const HERO_WIDTH: f32 = 17.0;
    pub const HERO_HEIGHT: f32 = 30.0;

    /// Milliseconds per unit of progress in each phase
    pub const STRETCHING_SPEED: f32 = 4.0; // ms per pixel of stick
    pub const TURNING_SPEED: f32 = 4.0; // ms per degree
    pub const WALKING_SPEED: f32 = 4.0;
    pub const TRANSITIONING_SPEED: f32 = 2.0;
    pub const FALLING_SPEED: f32 = 2.0;

    /// First platform is always the same; its right edge must match PADDING_X
    pub const FIRST_PLATFORM_X: f32 = 50.0;
    pub const FIRST_PLATFORM_WIDTH: f32 = 50.0;

    pub const PLATFORM_MIN_GAP: u32 = 40;
    pub const PLATFORM_MAX_GAP: u32 = 200;
    pub const PLATFORM_MIN_WIDTH: u32 = 20;
    pub const PLATFORM_MAX_WIDTH: u32 = 100;
    pub const TREE_MIN_GAP: u32 = 30;
    pub const TREE_MAX_GAP: u32 = 150;

    /// Lookahead generated at session start
    pub const INITIAL_PLATFORMS: usize = 4;
    pub const INITIAL_TREES: usize = 10;
    /// Trees added per successful crossing
    pub const TREES_PER_CROSSING: usize = 2;

    pub const NORMAL_HIT_POINTS: u32 = 1;
    pub const PERFECT_HIT_POINTS: u32 = 2;
    /// How long the "perfect" indicator stays up (ms)
    pub const PERFECT_INDICATOR_MS: f64 = 1000.0;

    /// Retro pixel grid
    pub const PIXEL_SIZE: f32 = 2.0;
    /// Background scrolls slower than the scene
    pub const BACKGROUND_SPEED_MULTIPLIER: f32 = 0.2;
    pub const HILL1_BASE_HEIGHT: f32 = 100.0;
    pub const HILL1_AMPLITUDE: f32 = 10.0;
    pub const HILL1_STRETCH: f32 = 1.0;
    pub const HILL2_BASE_HEIGHT: f32 = 70.0;
    pub const HILL2_AMPLITUDE: f32 = 20.0;
    pub const HILL2_STRETCH: f32 = 0.5;
}

/// Sine of an angle given in degrees
#[inline]
pub fn sin_deg(degrees: f32) -> f32 {
    degrees.to_radians().sin()
}

/// Drop distance after which a falling hero ends the run, for a viewport height
#[inline]
pub fn fall_limit_for_viewport(viewport_height: f32) -> f32 {
    use consts::*;
    PLATFORM_HEIGHT + FALL_MARGIN + (viewport_height - CANVAS_HEIGHT) / 2.0
}
