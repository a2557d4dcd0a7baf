//! Pyro Show - timeline scheduling and frame evaluation
//!
//! Provides the layer that turns a set of placed effect instances into
//! renderable frames:
//! - `activity` / `Activity`: explosion and launch-trail windows per instance
//! - Launch trajectories with arc profiles, wind drift and trail slices
//! - `TrailConfig` / `TrailTable`: per-kind launch trail look
//! - `ShowClock`: playback with play/pause, seeking and stop-at-end
//! - `SimConfig`: TOML tunables
//! - `Show`: owns instances and their runtimes, evaluates frames in parallel

mod clock;
mod config;
mod schedule;
mod show;
mod trail;
mod trajectory;

pub use clock::{ShowClock, MAX_FRAME_DELTA};
pub use config::SimConfig;
pub use schedule::{activity, instance_activity, launch_progress, Activity};
pub use show::{Frame, InstanceFrame, LaunchPath, Show};
pub use trail::{render_trail, TrailConfig, TrailOverride, TrailRender, TrailTable, TrailVertex};
pub use trajectory::{
    compute_trajectory, ground_launch_point, launch_angle, launch_path, visible_trail_window,
    ArcProfile, TrailPoint, WindDrift,
};
