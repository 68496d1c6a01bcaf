//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{StickHit, resolve_stick_hit};
pub use error::SimError;
pub use state::{GameState, Phase, Platform, Stick, Tree, TreeShade};
pub use tick::{Command, GameEvent, apply_command, tick};
pub use world::{generate_platform, generate_tree};
