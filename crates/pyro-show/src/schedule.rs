//! Timeline activity scheduling
//!
//! Maps a global clock value onto one instance's explosion and launch-trail
//! windows. Everything here is a pure function of its inputs.

use pyro_core::EffectInstance;
use serde::Serialize;

/// Where an instance stands at one clock value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Activity {
    /// `start <= t <= start + duration + tail`
    pub explosion_active: bool,
    /// `t - start`; negative before ignition
    pub relative_time: f32,
    /// `start - lead <= t < start`
    pub trail_active: bool,
    /// Launch progress in [0, 1]: 0 when the shell leaves the ground,
    /// 1 at the break
    pub trail_progress: f32,
}

impl Activity {
    /// True when neither the explosion nor its trail needs evaluating
    pub fn is_idle(&self) -> bool {
        !self.explosion_active && !self.trail_active
    }
}

/// Fraction of the launch flight completed at `current_time`, clamped to [0, 1].
/// A zero-length launch is complete immediately.
pub fn launch_progress(current_time: f32, launch_start: f32, lead_time: f32) -> f32 {
    if lead_time <= 0.0 {
        return if current_time >= launch_start { 1.0 } else { 0.0 };
    }
    ((current_time - launch_start) / lead_time).clamp(0.0, 1.0)
}

/// Activity flags for an explosion window `[start, start + duration + tail]`
/// and a trail window `[start - lead, start)`.
pub fn activity(
    current_time: f32,
    start_time: f32,
    duration: f32,
    tail_lifetime: f32,
    trail_lead_time: f32,
) -> Activity {
    let explosion_end = start_time + duration + tail_lifetime;
    let launch_start = start_time - trail_lead_time;
    Activity {
        explosion_active: current_time >= start_time && current_time <= explosion_end,
        relative_time: current_time - start_time,
        trail_active: current_time >= launch_start && current_time < start_time,
        trail_progress: launch_progress(current_time, launch_start, trail_lead_time),
    }
}

/// [`activity`] for a placed instance with the given trail lead time
pub fn instance_activity(
    instance: &EffectInstance,
    current_time: f32,
    trail_lead_time: f32,
) -> Activity {
    activity(
        current_time,
        instance.start_time,
        instance.duration,
        instance.tail_lifetime(),
        trail_lead_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: f32 = 5.0;
    const DURATION: f32 = 2.0;
    const TAIL: f32 = 2.0;
    const LEAD: f32 = 0.8;

    fn at(t: f32) -> Activity {
        activity(t, START, DURATION, TAIL, LEAD)
    }

    #[test]
    fn everything_idle_long_before() {
        let a = at(0.0);
        assert!(a.is_idle());
        assert_eq!(a.trail_progress, 0.0);
        assert!(a.relative_time < 0.0);
    }

    #[test]
    fn trail_window_is_half_open() {
        let launch = at(START - LEAD);
        assert!(launch.trail_active);
        assert_eq!(launch.trail_progress, 0.0);
        assert!(!launch.explosion_active);

        let mid = at(START - LEAD / 2.0);
        assert!(mid.trail_active);
        assert!((mid.trail_progress - 0.5).abs() < 1e-5);

        let ignition = at(START);
        assert!(!ignition.trail_active);
        assert_eq!(ignition.trail_progress, 1.0);
        assert!(ignition.explosion_active);
        assert_eq!(ignition.relative_time, 0.0);
    }

    #[test]
    fn explosion_window_is_closed() {
        assert!(at(START + DURATION + TAIL).explosion_active);
        assert!(!at(START + DURATION + TAIL + 0.01).explosion_active);
        assert!(at(7.5).explosion_active);
        assert!(at(9.1).is_idle());
    }

    #[test]
    fn zero_lead_launch() {
        assert_eq!(launch_progress(1.0, 2.0, 0.0), 0.0);
        assert_eq!(launch_progress(2.0, 2.0, 0.0), 1.0);
        let a = activity(2.0, 2.0, 1.0, 1.0, 0.0);
        assert!(!a.trail_active);
        assert!(a.explosion_active);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(launch_progress(-10.0, 0.0, 1.0), 0.0);
        assert_eq!(launch_progress(10.0, 0.0, 1.0), 1.0);
    }
}
