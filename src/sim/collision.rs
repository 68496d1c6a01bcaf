//! Stick landing resolution
//!
//! Once the active stick lies flat its far end either rests inside a platform
//! or hangs over a gap. Edges are exclusive: touching a platform edge exactly
//! is a miss.

use super::error::SimError;
use super::state::{Platform, Stick};
use crate::consts::PERFECT_AREA_SIZE;

/// Where the active stick landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickHit {
    /// Platform containing the stick's far end, if any
    pub platform: Option<Platform>,
    /// Far end within the centered perfect area of that platform
    pub perfect: bool,
}

impl StickHit {
    pub const MISS: StickHit = StickHit {
        platform: None,
        perfect: false,
    };
}

/// Resolve the platform the active (last) stick reaches.
///
/// Only valid once the stick has finished turning: its rotation must be
/// exactly 90°. Pure in its inputs.
pub fn resolve_stick_hit(sticks: &[Stick], platforms: &[Platform]) -> Result<StickHit, SimError> {
    let Some(stick) = sticks.last() else {
        return Ok(StickHit::MISS);
    };
    if stick.rotation != 90.0 {
        return Err(SimError::StickNotHorizontal {
            rotation: stick.rotation,
        });
    }

    let far_x = stick.far_x();
    let Some(platform) = platforms
        .iter()
        .find(|p| p.x < far_x && far_x < p.right())
        .copied()
    else {
        return Ok(StickHit::MISS);
    };

    let perfect = (far_x - platform.center()).abs() < PERFECT_AREA_SIZE / 2.0;

    Ok(StickHit {
        platform: Some(platform),
        perfect,
    })
}
