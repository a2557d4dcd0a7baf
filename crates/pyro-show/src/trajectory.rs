//! Launch trajectories: curved ground-to-break paths and the visible slice
//! of trail at a given launch progress.

use pyro_core::{EffectInstance, EffectKind, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Vertical shape of a launch path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcProfile {
    /// Nearly straight up
    Low,
    Medium,
    /// Tall arc peaking around 60% of the flight
    High,
    /// Helix around the straight path, tightening towards the break
    Corkscrew,
}

impl ArcProfile {
    pub fn name(&self) -> &'static str {
        match self {
            ArcProfile::Low => "low",
            ArcProfile::Medium => "medium",
            ArcProfile::High => "high",
            ArcProfile::Corkscrew => "corkscrew",
        }
    }

    /// Height the arc bulges towards, given the target height
    fn peak(&self, end_y: f32) -> f32 {
        match self {
            ArcProfile::High => (end_y * 1.3).max(end_y + 5.0),
            ArcProfile::Medium => (end_y * 1.15).max(end_y + 3.0),
            ArcProfile::Low => end_y + 1.0,
            ArcProfile::Corkscrew => (end_y * 1.2).max(end_y + 3.0),
        }
    }

    /// Weight of the bulge at flight fraction `t`, never negative
    fn bulge(&self, t: f32) -> f32 {
        let (center, amplitude) = match self {
            ArcProfile::High => (0.6, 1.0),
            ArcProfile::Medium => (0.5, 0.7),
            ArcProfile::Low => (0.5, 0.3),
            ArcProfile::Corkscrew => (0.5, 1.0),
        };
        let parabola = -4.0 * (t - center) * (t - center) + 1.0;
        (parabola * amplitude).max(0.0)
    }

    /// Height at flight fraction `t` between `start_y` and `end_y`
    pub fn height(&self, start_y: f32, end_y: f32, t: f32) -> f32 {
        let base = start_y + (end_y - start_y) * t;
        base + (self.peak(end_y) - base) * self.bulge(t)
    }
}

const CORKSCREW_RADIUS: f32 = 0.5;
const CORKSCREW_TURNS: f32 = 2.0;

/// Sample `segments + 1` points from `start` to `end` along `arc`.
/// Horizontal axes interpolate linearly; the vertical axis follows the
/// profile's bulge.
pub fn compute_trajectory(start: Vec3, end: Vec3, arc: ArcProfile, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let mut point = start.lerp(end, t);
            point.y = arc.height(start.y, end.y, t);
            if arc == ArcProfile::Corkscrew {
                let angle = t * CORKSCREW_TURNS * TAU;
                let radius = CORKSCREW_RADIUS * (1.0 - t);
                point.x += angle.cos() * radius;
                point.z += angle.sin() * radius;
            }
            point
        })
        .collect()
}

/// Deterministic horizontal drift applied to a launch path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindDrift {
    pub x: f32,
    pub z: f32,
}

impl WindDrift {
    pub const CALM: Self = Self { x: 0.0, z: 0.0 };

    /// Drift derived from the effect kind and launch position, so the same
    /// launch always bends the same way.
    pub fn for_launch(kind: EffectKind, start: Vec3) -> Self {
        let key = kind.name().bytes().next().map(f32::from).unwrap_or(0.0);
        let hash = key * (start.x + start.z);
        Self {
            x: ((hash % 100.0) - 50.0) / 200.0,
            z: (((hash * 7.0) % 100.0) - 50.0) / 300.0,
        }
    }

    /// Bell-shaped strength over the flight: grows, then fades as the shell
    /// gains speed.
    pub fn profile(t: f32) -> f32 {
        (t * PI * 0.8).sin() * (1.0 - t * 0.3) * 2.0
    }

    pub fn offset(&self, t: f32) -> Vec3 {
        let strength = Self::profile(t);
        Vec3::new(self.x * strength, 0.0, self.z * strength)
    }
}

/// Profile arc plus wind drift, from the ground launch point to the break
pub fn launch_path(
    start: Vec3,
    end: Vec3,
    arc: ArcProfile,
    segments: usize,
    wind: WindDrift,
) -> Vec<Vec3> {
    let mut points = compute_trajectory(start, end, arc, segments);
    let last = points.len().saturating_sub(1).max(1) as f32;
    for (i, point) in points.iter_mut().enumerate() {
        *point += wind.offset(i as f32 / last);
    }
    points
}

/// One point of a visible trail slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: Vec3,
    /// Fade weight: brightest (1) at the head
    pub alpha: f32,
}

/// Fixed-length trailing slice of `trajectory` ending at the point reached
/// at `progress`, with `sqrt` fade weights from tail to head.
pub fn visible_trail_window(trajectory: &[Vec3], progress: f32, length: usize) -> Vec<TrailPoint> {
    if progress <= 0.0 || trajectory.is_empty() {
        return Vec::new();
    }
    let last = trajectory.len() - 1;
    let current = ((trajectory.len() as f32 * progress.min(1.0)).floor() as usize).min(last);
    let first = current.saturating_sub(length);
    let slice = &trajectory[first..=current];
    let span = slice.len().saturating_sub(1);
    slice
        .iter()
        .enumerate()
        .map(|(i, &position)| TrailPoint {
            position,
            alpha: if span == 0 {
                1.0
            } else {
                (i as f32 / span as f32).sqrt()
            },
        })
        .collect()
}

/// Elevation of the launch line above the horizontal, in degrees
pub fn launch_angle(start: Vec3, end: Vec3) -> f32 {
    let dx = end.x - start.x;
    let dz = end.z - start.z;
    let dy = end.y - start.y;
    dy.atan2((dx * dx + dz * dz).sqrt()).to_degrees()
}

/// Ground position a shell is fired from: a small horizontal offset from
/// the break point, derived from the instance id, at `ground_level`.
pub fn ground_launch_point(instance: &EffectInstance, ground_level: f32) -> Vec3 {
    let hash = u64::from(instance.id.seed("ground-launch") & 0x7fff_ffff);
    let offset_x = ((hash % 200) as f32 - 100.0) / 50.0;
    let offset_z = (((hash * 7) % 200) as f32 - 100.0) / 50.0;
    Vec3::new(
        instance.origin.x + offset_x,
        ground_level,
        instance.origin.z + offset_z,
    )
}
