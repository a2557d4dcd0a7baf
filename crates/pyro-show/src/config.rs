//! Simulation tuning loaded from TOML
//!
//! Every field has a default, so a partial file (or none at all) works:
//!
//! ```toml
//! gravity = 9.8
//! trajectory_segments = 40
//!
//! [trails.ring]
//! launch_lead_time = 1.2
//! color = "#00ffcc"
//! ```

use crate::trail::{TrailOverride, TrailTable};
use pyro_core::{PyroError, Result};
use pyro_particles::{PhysicsParams, ZoomRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Tunables for a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Downward acceleration magnitude
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Height shells are fired from
    #[serde(default = "default_ground_level")]
    pub ground_level: f32,
    #[serde(default = "default_trajectory_segments")]
    pub trajectory_segments: usize,
    /// Launch path segments visible behind the shell
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    #[serde(default = "default_zoom_near")]
    pub zoom_near: f32,
    #[serde(default = "default_zoom_far")]
    pub zoom_far: f32,
    /// Largest clock step treated as continuous playback
    #[serde(default = "default_max_step")]
    pub max_step: f32,
    #[serde(default = "default_replay_step")]
    pub replay_step: f32,
    /// Per-kind trail overrides keyed by effect name
    #[serde(default)]
    pub trails: HashMap<String, TrailOverride>,
}

fn default_gravity() -> f32 {
    9.8
}
fn default_ground_level() -> f32 {
    -5.0
}
fn default_trajectory_segments() -> usize {
    30
}
fn default_trail_length() -> usize {
    8
}
fn default_zoom_near() -> f32 {
    10.0
}
fn default_zoom_far() -> f32 {
    500.0
}
fn default_max_step() -> f32 {
    0.25
}
fn default_replay_step() -> f32 {
    1.0 / 60.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            ground_level: default_ground_level(),
            trajectory_segments: default_trajectory_segments(),
            trail_length: default_trail_length(),
            zoom_near: default_zoom_near(),
            zoom_far: default_zoom_far(),
            max_step: default_max_step(),
            replay_step: default_replay_step(),
            trails: HashMap::new(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            PyroError::ConfigError(format!("Failed to load config {}: {}", path.display(), e))
        })?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PyroError::ConfigError(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        };
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(PyroError::ConfigError(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        if !self.ground_level.is_finite() {
            return Err(PyroError::ConfigError("ground_level must be finite".into()));
        }
        positive("max_step", self.max_step)?;
        positive("replay_step", self.replay_step)?;
        positive("zoom_near", self.zoom_near)?;
        if !self.zoom_far.is_finite() || self.zoom_far <= self.zoom_near {
            return Err(PyroError::ConfigError(format!(
                "zoom_far ({}) must exceed zoom_near ({})",
                self.zoom_far, self.zoom_near
            )));
        }
        if self.trajectory_segments == 0 {
            return Err(PyroError::ConfigError(
                "trajectory_segments must be at least 1".into(),
            ));
        }
        // Resolving the table checks override names and colours
        self.trail_table()?;
        Ok(())
    }

    pub fn physics(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity,
            max_step: self.max_step,
            replay_step: self.replay_step,
        }
    }

    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange {
            near: self.zoom_near,
            far: self.zoom_far,
        }
    }

    pub fn trail_table(&self) -> Result<TrailTable> {
        TrailTable::with_overrides(&self.trails)
    }
}
