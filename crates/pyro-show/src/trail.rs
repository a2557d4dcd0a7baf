//! Launch-trail configuration and rendering
//!
//! Every effect kind has a fixed trail look: how long before the break the
//! shell leaves the ground, its colour, line thickness, arc profile and
//! intensity. A rendered trail is the visible slice of the launch path in
//! three layers: the core line, a dimmer glow, and a few sparks.

use crate::trajectory::{visible_trail_window, ArcProfile};
use pyro_core::{Color, ContentHash, EffectKind, PyroError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Launch trail look for one effect kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailConfig {
    /// Seconds between leaving the ground and the break
    pub launch_lead_time: f32,
    pub color: Color,
    pub thickness: f32,
    pub arc: ArcProfile,
    pub intensity: f32,
}

impl TrailConfig {
    fn new(lead: f32, hex: u32, thickness: f32, arc: ArcProfile, intensity: f32) -> Self {
        Self {
            launch_lead_time: lead,
            color: Color::from_hex(hex),
            thickness,
            arc,
            intensity,
        }
    }

    /// Built-in trail for `kind`
    pub fn for_kind(kind: EffectKind) -> Self {
        use ArcProfile::*;
        match kind {
            EffectKind::Burst => Self::new(0.8, 0xffaa44, 0.8, High, 0.09),
            EffectKind::Fountain => Self::new(0.3, 0xff6600, 0.6, Low, 0.072),
            EffectKind::Spiral => Self::new(1.0, 0x4488ff, 0.9, Corkscrew, 0.108),
            EffectKind::Willow => Self::new(0.9, 0xffcc44, 0.8, High, 0.09),
            EffectKind::Chrysanthemum => Self::new(1.2, 0xffd23f, 1.2, High, 0.12),
            EffectKind::Crossette => Self::new(0.9, 0xe91e63, 1.0, Medium, 0.108),
            EffectKind::PalmTree => Self::new(1.0, 0xffd700, 0.9, High, 0.09),
            EffectKind::Strobe => Self::new(0.7, 0xffffff, 0.8, Medium, 0.072),
            EffectKind::Ring => Self::new(0.8, 0x8a2be2, 1.0, Medium, 0.108),
            EffectKind::PeonyShell => Self::new(2.8, 0xffd700, 1.0, High, 0.12),
            EffectKind::ChrysanthemumShell => Self::new(3.8, 0xffd700, 1.2, High, 0.132),
            EffectKind::WillowShell => Self::new(3.8, 0xc0c0c0, 1.1, Medium, 0.12),
            EffectKind::PalmShell => Self::new(4.8, 0xffd700, 1.4, High, 0.15),
            EffectKind::CrossetteShell => Self::new(3.8, 0xaa2eaa, 1.1, Medium, 0.126),
            EffectKind::KamuroShell => Self::new(4.8, 0xffd700, 1.3, Medium, 0.144),
        }
    }
}

/// Partial trail settings from a config file; unset fields keep the default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailOverride {
    #[serde(default)]
    pub launch_lead_time: Option<f32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub thickness: Option<f32>,
    #[serde(default)]
    pub arc: Option<ArcProfile>,
    #[serde(default)]
    pub intensity: Option<f32>,
}

impl TrailOverride {
    fn apply(&self, mut base: TrailConfig) -> Result<TrailConfig> {
        if let Some(lead) = self.launch_lead_time {
            if !lead.is_finite() || lead < 0.0 {
                return Err(PyroError::ConfigError(format!(
                    "launch_lead_time must be non-negative, got {lead}"
                )));
            }
            base.launch_lead_time = lead;
        }
        if let Some(color) = &self.color {
            base.color = Color::parse_hex(color)?;
        }
        if let Some(thickness) = self.thickness {
            base.thickness = thickness;
        }
        if let Some(arc) = self.arc {
            base.arc = arc;
        }
        if let Some(intensity) = self.intensity {
            base.intensity = intensity;
        }
        Ok(base)
    }
}

/// Resolved trail config for every kind
#[derive(Debug, Clone)]
pub struct TrailTable {
    configs: HashMap<EffectKind, TrailConfig>,
}

impl TrailTable {
    /// Built-in table with `overrides` (keyed by effect name) applied
    pub fn with_overrides(overrides: &HashMap<String, TrailOverride>) -> Result<Self> {
        let mut configs: HashMap<EffectKind, TrailConfig> = EffectKind::ALL
            .iter()
            .map(|&kind| (kind, TrailConfig::for_kind(kind)))
            .collect();
        for (name, over) in overrides {
            let kind = EffectKind::try_from_name(name).ok_or_else(|| {
                PyroError::ConfigError(format!("unknown effect type in [trails]: {name}"))
            })?;
            let base = configs
                .get(&kind)
                .copied()
                .unwrap_or_else(|| TrailConfig::for_kind(kind));
            configs.insert(kind, over.apply(base)?);
            log::debug!("Trail override applied for {kind}");
        }
        Ok(Self { configs })
    }

    pub fn get(&self, kind: EffectKind) -> TrailConfig {
        self.configs
            .get(&kind)
            .copied()
            .unwrap_or_else(|| TrailConfig::for_kind(kind))
    }
}

impl Default for TrailTable {
    fn default() -> Self {
        Self {
            configs: EffectKind::ALL
                .iter()
                .map(|&kind| (kind, TrailConfig::for_kind(kind)))
                .collect(),
        }
    }
}

/// One coloured trail vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailVertex {
    pub position: Vec3,
    pub color: Color,
    pub alpha: f32,
}

/// Everything needed to draw one launch trail at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailRender {
    pub thickness: f32,
    pub glow_thickness: f32,
    /// Core line, tail first
    pub line: Vec<TrailVertex>,
    /// Dimmer, wider copy of the line
    pub glow: Vec<TrailVertex>,
    pub sparks: Vec<TrailVertex>,
}

impl TrailRender {
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

const GLOW_FACTOR: f32 = 0.5;
const GLOW_WIDTH: f32 = 1.2;
const SPARK_STRIDE: usize = 3;
const SPARK_JITTER: f32 = 0.05;
const SPARK_INTENSITY: f32 = 0.5;
/// Sparks only appear once the visible trail is longer than this
const SPARK_MIN_POINTS: usize = 5;

/// Render the trail slice reached at `progress` along `path`.
/// `seed` fixes the spark jitter so repeated calls agree.
pub fn render_trail(
    path: &[Vec3],
    progress: f32,
    length: usize,
    config: &TrailConfig,
    seed: u32,
) -> TrailRender {
    let window = visible_trail_window(path, progress, length);
    let shade = |alpha: f32, intensity: f32| config.color.scaled(alpha * intensity);

    let line: Vec<TrailVertex> = window
        .iter()
        .map(|p| TrailVertex {
            position: p.position,
            color: shade(p.alpha, config.intensity),
            alpha: p.alpha,
        })
        .collect();

    let glow = line
        .iter()
        .map(|v| TrailVertex {
            color: v.color.scaled(GLOW_FACTOR),
            ..*v
        })
        .collect();

    let sparks = if window.len() > SPARK_MIN_POINTS {
        window
            .iter()
            .enumerate()
            .step_by(SPARK_STRIDE)
            .filter(|(_, p)| p.alpha > 0.0)
            .map(|(i, p)| TrailVertex {
                position: p.position + spark_jitter(seed, i),
                color: shade(p.alpha, config.intensity * SPARK_INTENSITY),
                alpha: p.alpha,
            })
            .collect()
    } else {
        Vec::new()
    };

    TrailRender {
        thickness: config.thickness,
        glow_thickness: config.thickness * GLOW_WIDTH,
        line,
        glow,
        sparks,
    }
}

fn spark_jitter(seed: u32, index: usize) -> Vec3 {
    let hash = ContentHash::from_parts(&[&seed.to_le_bytes(), &(index as u64).to_le_bytes()]);
    let bytes = hash.as_bytes();
    let unit = |b: u8| (b as f32 / 255.0 - 0.5) * 2.0 * SPARK_JITTER;
    Vec3::new(unit(bytes[0]), unit(bytes[1]), unit(bytes[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::{launch_path, WindDrift};

    fn path() -> Vec<Vec3> {
        launch_path(
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(0.0, 25.0, 0.0),
            ArcProfile::High,
            30,
            WindDrift::CALM,
        )
    }

    #[test]
    fn every_kind_has_a_trail() {
        for kind in EffectKind::ALL {
            let config = TrailConfig::for_kind(kind);
            assert!(config.launch_lead_time > 0.0);
            assert!(config.intensity > 0.0);
        }
        let burst = TrailConfig::for_kind(EffectKind::Burst);
        assert_eq!(burst.color.to_hex_string(), "#ffaa44");
        assert_eq!(burst.arc, ArcProfile::High);
        assert_eq!(
            TrailConfig::for_kind(EffectKind::Spiral).arc,
            ArcProfile::Corkscrew
        );
    }

    #[test]
    fn line_colour_is_scaled_by_alpha_and_intensity() {
        let config = TrailConfig::for_kind(EffectKind::Strobe);
        let trail = render_trail(&path(), 0.5, 8, &config, 1);
        let head = trail.line.last().copied().unwrap();
        assert_eq!(head.alpha, 1.0);
        assert!((head.color.r - config.intensity).abs() < 1e-6);
        assert_eq!(trail.line[0].color, Color::BLACK);
        assert!((trail.glow.last().unwrap().color.r - config.intensity * 0.5).abs() < 1e-6);
    }

    #[test]
    fn sparks_every_third_point_with_stable_jitter() {
        let config = TrailConfig::for_kind(EffectKind::Burst);
        let a = render_trail(&path(), 0.6, 8, &config, 42);
        let b = render_trail(&path(), 0.6, 8, &config, 42);
        assert_eq!(a, b);
        // Points 3 and 6 of 9; point 0 has zero alpha
        assert_eq!(a.sparks.len(), 2);
        for spark in &a.sparks {
            let nearest = a
                .line
                .iter()
                .map(|v| v.position.distance(&spark.position))
                .fold(f32::MAX, f32::min);
            assert!(nearest <= SPARK_JITTER * 3f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn short_trails_have_no_sparks() {
        let config = TrailConfig::for_kind(EffectKind::Burst);
        let trail = render_trail(&path(), 0.05, 8, &config, 42);
        assert!(trail.line.len() <= SPARK_MIN_POINTS);
        assert!(trail.sparks.is_empty());
    }

    #[test]
    fn nothing_before_launch() {
        let config = TrailConfig::for_kind(EffectKind::Burst);
        assert!(render_trail(&path(), 0.0, 8, &config, 1).is_empty());
    }

    #[test]
    fn overrides_apply_by_name() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "ring".to_string(),
            TrailOverride {
                launch_lead_time: Some(1.5),
                color: Some("#00ff00".to_string()),
                ..Default::default()
            },
        );
        let table = TrailTable::with_overrides(&overrides).unwrap();
        let ring = table.get(EffectKind::Ring);
        assert_eq!(ring.launch_lead_time, 1.5);
        assert_eq!(ring.color.to_hex_string(), "#00ff00");
        assert_eq!(ring.arc, ArcProfile::Medium);
        assert_eq!(table.get(EffectKind::Burst), TrailConfig::for_kind(EffectKind::Burst));
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("rocket".to_string(), TrailOverride::default());
        assert!(TrailTable::with_overrides(&overrides).is_err());

        let mut overrides = HashMap::new();
        overrides.insert(
            "burst".to_string(),
            TrailOverride {
                color: Some("orange".to_string()),
                ..Default::default()
            },
        );
        assert!(TrailTable::with_overrides(&overrides).is_err());
    }
}
