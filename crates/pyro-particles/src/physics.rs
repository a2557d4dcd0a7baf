//! Shared physical constants and closed-form kinematics

use pyro_core::Vec3;

/// Tunables shared by both simulation strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Downward acceleration magnitude
    pub gravity: f32,
    /// Largest clock advance treated as continuous playback. Anything larger,
    /// or any backwards move, makes incremental effects replay.
    pub max_step: f32,
    /// Fixed step used when replaying incremental effects
    pub replay_step: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            max_step: 0.25,
            replay_step: 1.0 / 60.0,
        }
    }
}

/// Air-resistance factor `air^(t * k)`
pub fn drag(air_resistance: f32, t: f32, k: f32) -> f32 {
    air_resistance.powf(t * k)
}

/// Offset from the launch point at time `t` for a star with initial
/// velocity `v`: `v * t * drag(t) - ½ g t²` on the vertical axis.
pub fn ballistic_offset(velocity: Vec3, t: f32, drag_factor: f32, gravity: f32) -> Vec3 {
    let mut offset = velocity * (t * drag_factor);
    offset.y -= 0.5 * gravity * t * t;
    offset
}
