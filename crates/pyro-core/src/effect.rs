//! Effect kinds, shell sizes, and the placed effect instance descriptor

use crate::error::{PyroError, Result};
use crate::id::InstanceId;
use crate::types::{Color, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an effect kind computes its particle state over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Live particle set advanced frame by frame with the physics kernel
    Incremental,
    /// Positions evaluated directly from elapsed time and fixed initial conditions
    ClosedForm,
}

/// Every effect kind the engine can simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    #[serde(rename = "burst")]
    Burst,
    #[serde(rename = "fountain")]
    Fountain,
    #[serde(rename = "spiral")]
    Spiral,
    #[serde(rename = "willow")]
    Willow,
    #[serde(rename = "chrysanthemum")]
    Chrysanthemum,
    #[serde(rename = "ring")]
    Ring,
    #[serde(rename = "strobe")]
    Strobe,
    #[serde(rename = "crossette")]
    Crossette,
    #[serde(rename = "palmtree")]
    PalmTree,
    #[serde(rename = "peony_4inch")]
    PeonyShell,
    #[serde(rename = "chrysanthemum_6inch")]
    ChrysanthemumShell,
    #[serde(rename = "willow_6inch")]
    WillowShell,
    #[serde(rename = "palm_8inch")]
    PalmShell,
    #[serde(rename = "crossette_6inch")]
    CrossetteShell,
    #[serde(rename = "kamuro_8inch")]
    KamuroShell,
}

impl EffectKind {
    pub const ALL: [EffectKind; 15] = [
        EffectKind::Burst,
        EffectKind::Fountain,
        EffectKind::Spiral,
        EffectKind::Willow,
        EffectKind::Chrysanthemum,
        EffectKind::Ring,
        EffectKind::Strobe,
        EffectKind::Crossette,
        EffectKind::PalmTree,
        EffectKind::PeonyShell,
        EffectKind::ChrysanthemumShell,
        EffectKind::WillowShell,
        EffectKind::PalmShell,
        EffectKind::CrossetteShell,
        EffectKind::KamuroShell,
    ];

    /// Canonical identifier, as used in configs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Burst => "burst",
            EffectKind::Fountain => "fountain",
            EffectKind::Spiral => "spiral",
            EffectKind::Willow => "willow",
            EffectKind::Chrysanthemum => "chrysanthemum",
            EffectKind::Ring => "ring",
            EffectKind::Strobe => "strobe",
            EffectKind::Crossette => "crossette",
            EffectKind::PalmTree => "palmtree",
            EffectKind::PeonyShell => "peony_4inch",
            EffectKind::ChrysanthemumShell => "chrysanthemum_6inch",
            EffectKind::WillowShell => "willow_6inch",
            EffectKind::PalmShell => "palm_8inch",
            EffectKind::CrossetteShell => "crossette_6inch",
            EffectKind::KamuroShell => "kamuro_8inch",
        }
    }

    /// Look up a kind by name. Unknown names fall back to `Burst`.
    pub fn from_name(name: &str) -> Self {
        match Self::try_from_name(name) {
            Some(kind) => kind,
            None => {
                log::warn!("Unknown effect type '{name}', falling back to burst");
                EffectKind::Burst
            }
        }
    }

    /// Strict lookup, accepting canonical names and the short shell aliases
    pub fn try_from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let kind = match normalized.as_str() {
            "burst" => EffectKind::Burst,
            "fountain" => EffectKind::Fountain,
            "spiral" => EffectKind::Spiral,
            "willow" => EffectKind::Willow,
            "chrysanthemum" => EffectKind::Chrysanthemum,
            "ring" => EffectKind::Ring,
            "strobe" => EffectKind::Strobe,
            "crossette" => EffectKind::Crossette,
            "palmtree" | "palm_tree" => EffectKind::PalmTree,
            "peony" | "peony_4inch" | "peony_shell" => EffectKind::PeonyShell,
            "chrysanthemum_6inch" | "chrysanthemum_shell" => EffectKind::ChrysanthemumShell,
            "willow_6inch" | "willow_shell" => EffectKind::WillowShell,
            "palm" | "palm_8inch" | "palm_shell" => EffectKind::PalmShell,
            "crossette_6inch" | "crossette_shell" => EffectKind::CrossetteShell,
            "kamuro" | "kamuro_8inch" | "kamuro_shell" => EffectKind::KamuroShell,
            _ => return None,
        };
        Some(kind)
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            EffectKind::Burst | EffectKind::Fountain | EffectKind::Spiral | EffectKind::Willow => {
                Strategy::Incremental
            }
            _ => Strategy::ClosedForm,
        }
    }

    /// Professional shells take their star count, burn time and velocity
    /// from a `ShellSize` tier.
    pub fn is_shell(&self) -> bool {
        self.native_shell_size().is_some()
    }

    /// The tier a shell kind is designed for
    pub fn native_shell_size(&self) -> Option<ShellSize> {
        match self {
            EffectKind::PeonyShell => Some(ShellSize::Small),
            EffectKind::ChrysanthemumShell
            | EffectKind::WillowShell
            | EffectKind::CrossetteShell => Some(ShellSize::Medium),
            EffectKind::PalmShell | EffectKind::KamuroShell => Some(ShellSize::Large),
            _ => None,
        }
    }

    /// Base particle life and the range of the random multiplier applied to
    /// it at spawn, for incremental kinds.
    pub fn particle_life(&self) -> Option<(f32, (f32, f32))> {
        match self {
            EffectKind::Burst => Some((2.0, (0.9, 1.4))),
            EffectKind::Fountain | EffectKind::Spiral => Some((3.0, (0.8, 1.2))),
            EffectKind::Willow => Some((3.5, (0.8, 1.2))),
            _ => None,
        }
    }

    /// Total burn time at the kind's native tier: how long after ignition the
    /// slowest particle can still be lit. For streams this is measured from
    /// the last spawn, which happens no later than the nominal duration.
    fn native_burn_time(&self) -> f32 {
        match self {
            EffectKind::Burst | EffectKind::Fountain | EffectKind::Spiral | EffectKind::Willow => {
                self.particle_life()
                    .map_or(0.0, |(life, (_, longest))| life * longest)
            }
            EffectKind::Chrysanthemum => 3.5,
            EffectKind::Ring => 3.0,
            EffectKind::Strobe => 2.5,
            EffectKind::Crossette => 3.5,
            EffectKind::PalmTree => 5.0,
            EffectKind::PeonyShell => ShellSize::Small.profile().burn_time,
            EffectKind::ChrysanthemumShell => 5.0,
            EffectKind::WillowShell => 4.0,
            EffectKind::PalmShell => 6.0,
            EffectKind::CrossetteShell => 3.0,
            EffectKind::KamuroShell => 4.0,
        }
    }

    /// Ratio applied to a shell kind's native timings and counts when it is
    /// fired at a different tier. Always 1.0 for non-shell kinds.
    pub fn tier_scale(&self, size: Option<ShellSize>) -> TierScale {
        match (self.native_shell_size(), size) {
            (Some(native), Some(chosen)) => {
                let from = native.profile();
                let to = chosen.profile();
                TierScale {
                    count: to.star_count as f32 / from.star_count as f32,
                    burn: to.burn_time / from.burn_time,
                    velocity: to.velocity / from.velocity,
                }
            }
            _ => TierScale::IDENTITY,
        }
    }

    /// Total burn time for this kind at the given tier
    pub fn burn_time(&self, size: Option<ShellSize>) -> f32 {
        self.native_burn_time() * self.tier_scale(size).burn
    }

    /// Extra time after the nominal duration during which particles may
    /// still be visible.
    pub fn tail_lifetime(&self, size: Option<ShellSize>) -> f32 {
        self.burn_time(size)
    }

    /// Authoring defaults for this kind
    pub fn preset(&self) -> &'static EffectPreset {
        let index = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        &PRESETS[index]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Multipliers for running a shell kind at a non-native tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierScale {
    pub count: f32,
    pub burn: f32,
    pub velocity: f32,
}

impl TierScale {
    pub const IDENTITY: Self = Self {
        count: 1.0,
        burn: 1.0,
        velocity: 1.0,
    };

    /// Scale a base particle count, never dropping below one
    pub fn scale_count(&self, base: usize) -> usize {
        ((base as f32 * self.count).round() as usize).max(1)
    }
}

/// Professional shell calibre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellSize {
    /// 4-inch shell
    Small,
    /// 6-inch shell
    Medium,
    /// 8-inch shell
    Large,
}

/// Star count, burn time, and break velocity for one shell tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellProfile {
    pub star_count: usize,
    pub burn_time: f32,
    pub velocity: f32,
    pub star_size: f32,
}

impl ShellSize {
    pub fn profile(&self) -> ShellProfile {
        match self {
            ShellSize::Small => ShellProfile {
                star_count: 55,
                burn_time: 2.8,
                velocity: 8.5,
                star_size: 0.6,
            },
            ShellSize::Medium => ShellProfile {
                star_count: 90,
                burn_time: 3.5,
                velocity: 10.0,
                star_size: 0.7,
            },
            ShellSize::Large => ShellProfile {
                star_count: 120,
                burn_time: 4.2,
                velocity: 12.0,
                star_size: 0.9,
            },
        }
    }

    pub fn inches(&self) -> u32 {
        match self {
            ShellSize::Small => 4,
            ShellSize::Medium => 6,
            ShellSize::Large => 8,
        }
    }

    /// Parse `small`/`medium`/`large` or `4inch`/`6inch`/`8inch`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "small" | "4inch" | "4" => Some(ShellSize::Small),
            "medium" | "6inch" | "6" => Some(ShellSize::Medium),
            "large" | "8inch" | "8" => Some(ShellSize::Large),
            _ => None,
        }
    }
}

/// Pyrotechnic colours produced by real metal salts
pub mod authentic {
    use crate::types::Color;

    pub const RED: u32 = 0xff2e2e;
    pub const GREEN: u32 = 0x2eaa2e;
    pub const BLUE: u32 = 0x2e2eff;
    pub const YELLOW: u32 = 0xffff2e;
    pub const ORANGE: u32 = 0xff8c2e;
    pub const PURPLE: u32 = 0xaa2eaa;
    pub const WHITE: u32 = 0xffffff;
    pub const GOLD: u32 = 0xffd700;
    pub const SILVER: u32 = 0xc0c0c0;

    const NAMED: [(&str, u32); 9] = [
        ("Red", RED),
        ("Green", GREEN),
        ("Blue", BLUE),
        ("Yellow", YELLOW),
        ("Orange", ORANGE),
        ("Purple", PURPLE),
        ("White", WHITE),
        ("Gold", GOLD),
        ("Silver", SILVER),
    ];

    /// Name of an authentic colour, or `None` for anything else
    pub fn color_name(color: &Color) -> Option<&'static str> {
        let hex = color.to_hex_string();
        NAMED
            .iter()
            .find(|(_, value)| Color::from_hex(*value).to_hex_string() == hex)
            .map(|(name, _)| *name)
    }
}

/// Stage metadata for professional shells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSpec {
    pub break_height: f32,
    pub break_diameter: f32,
    pub safety_distance: f32,
}

/// Authoring defaults for one effect kind
#[derive(Debug, Clone, Copy)]
pub struct EffectPreset {
    pub display_name: &'static str,
    pub color: u32,
    pub palette: &'static [u32],
    pub duration: f32,
    pub shell: Option<ShellSpec>,
}

const PRESETS: [EffectPreset; 15] = [
    EffectPreset {
        display_name: "Burst",
        color: 0xff4444,
        palette: &[],
        duration: 2.0,
        shell: None,
    },
    EffectPreset {
        display_name: "Fountain",
        color: 0x44ff44,
        palette: &[],
        duration: 2.0,
        shell: None,
    },
    EffectPreset {
        display_name: "Spiral",
        color: 0x4444ff,
        palette: &[],
        duration: 5.5,
        shell: None,
    },
    EffectPreset {
        display_name: "Willow",
        color: 0xffff44,
        palette: &[],
        duration: 2.0,
        shell: None,
    },
    EffectPreset {
        display_name: "Chrysanthemum",
        color: 0xffd23f,
        palette: &[0xff6b35, 0xf7931e, 0xffd23f, 0x06ffa5, 0x3b82f6],
        duration: 3.5,
        shell: None,
    },
    EffectPreset {
        display_name: "Ring",
        color: 0x8a2be2,
        palette: &[0x8a2be2, 0x4b0082, 0x0000ff, 0x00bfff],
        duration: 3.0,
        shell: None,
    },
    EffectPreset {
        display_name: "Strobe",
        color: 0xffffff,
        palette: &[0xffffff, 0x00ffff, 0xff00ff],
        duration: 2.5,
        shell: None,
    },
    EffectPreset {
        display_name: "Crossette",
        color: 0xe91e63,
        palette: &[0xe91e63, 0x9c27b0, 0x673ab7],
        duration: 4.0,
        shell: None,
    },
    EffectPreset {
        display_name: "Palm Tree",
        color: 0xffd700,
        palette: &[0xffd700, 0xffaa00, 0xff8800, 0xff6600],
        duration: 5.0,
        shell: None,
    },
    EffectPreset {
        display_name: "4\" Peony Shell",
        color: authentic::RED,
        palette: &[
            authentic::RED,
            authentic::GREEN,
            authentic::BLUE,
            authentic::YELLOW,
            authentic::ORANGE,
            authentic::PURPLE,
            authentic::WHITE,
        ],
        duration: 3.5,
        shell: Some(ShellSpec {
            break_height: 40.0,
            break_diameter: 40.0,
            safety_distance: 100.0,
        }),
    },
    EffectPreset {
        display_name: "6\" Chrysanthemum",
        color: authentic::GOLD,
        palette: &[
            authentic::GOLD,
            authentic::SILVER,
            authentic::RED,
            authentic::GREEN,
        ],
        duration: 4.5,
        shell: Some(ShellSpec {
            break_height: 60.0,
            break_diameter: 60.0,
            safety_distance: 150.0,
        }),
    },
    EffectPreset {
        display_name: "6\" Silver Willow",
        color: authentic::SILVER,
        palette: &[authentic::SILVER, authentic::GOLD, authentic::GREEN],
        duration: 5.0,
        shell: Some(ShellSpec {
            break_height: 60.0,
            break_diameter: 50.0,
            safety_distance: 150.0,
        }),
    },
    EffectPreset {
        display_name: "8\" Golden Palm",
        color: authentic::GOLD,
        palette: &[authentic::GOLD, 0xffaa00],
        duration: 6.0,
        shell: Some(ShellSpec {
            break_height: 75.0,
            break_diameter: 70.0,
            safety_distance: 200.0,
        }),
    },
    EffectPreset {
        display_name: "6\" Purple Crossette",
        color: authentic::PURPLE,
        palette: &[authentic::PURPLE, authentic::WHITE],
        duration: 5.5,
        shell: Some(ShellSpec {
            break_height: 60.0,
            break_diameter: 80.0,
            safety_distance: 150.0,
        }),
    },
    EffectPreset {
        display_name: "8\" Kamuro Crown",
        color: authentic::GOLD,
        palette: &[authentic::GOLD, authentic::WHITE],
        duration: 4.5,
        shell: Some(ShellSpec {
            break_height: 75.0,
            break_diameter: 60.0,
            safety_distance: 200.0,
        }),
    },
];

/// One placed firework occurrence, as handed over by the authoring layer.
///
/// Constructed through [`EffectInstance::new`] and the `with_*` builders,
/// which reject invalid parameters up front so the simulation never has to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectInstance {
    pub id: InstanceId,
    pub kind: EffectKind,
    pub origin: Vec3,
    pub start_time: f32,
    pub duration: f32,
    pub primary_color: Color,
    palette: Option<Vec<Color>>,
    shell_size: Option<ShellSize>,
}

impl EffectInstance {
    pub fn new(
        kind: EffectKind,
        origin: Vec3,
        start_time: f32,
        duration: f32,
        primary_color: Color,
    ) -> Result<Self> {
        if !start_time.is_finite() {
            return Err(PyroError::InvalidStartTime(start_time));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(PyroError::InvalidDuration(duration));
        }
        if !origin.is_finite() {
            return Err(PyroError::InvalidParameter(format!(
                "origin must be finite, got {origin:?}"
            )));
        }
        Ok(Self {
            id: InstanceId::new(),
            kind,
            origin,
            start_time,
            duration,
            primary_color,
            palette: None,
            shell_size: None,
        })
    }

    /// Instance using the kind's authoring defaults (colour, palette, duration)
    pub fn preset(kind: EffectKind, origin: Vec3, start_time: f32) -> Result<Self> {
        let preset = kind.preset();
        let instance = Self::new(
            kind,
            origin,
            start_time,
            preset.duration,
            Color::from_hex(preset.color),
        )?;
        if preset.palette.is_empty() {
            Ok(instance)
        } else {
            instance.with_palette(preset.palette.iter().map(|&h| Color::from_hex(h)).collect())
        }
    }

    pub fn with_id(mut self, id: InstanceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Result<Self> {
        if palette.is_empty() {
            return Err(PyroError::EmptyPalette);
        }
        self.palette = Some(palette);
        Ok(self)
    }

    pub fn with_shell_size(mut self, size: ShellSize) -> Self {
        self.shell_size = Some(size);
        self
    }

    /// The palette, or the primary colour alone when none was given. Never empty.
    pub fn colors(&self) -> Vec<Color> {
        match &self.palette {
            Some(palette) if !palette.is_empty() => palette.clone(),
            _ => vec![self.primary_color],
        }
    }

    pub fn palette(&self) -> Option<&[Color]> {
        self.palette.as_deref()
    }

    /// Explicit tier, else the kind's native tier (None for non-shell kinds)
    pub fn shell_size(&self) -> Option<ShellSize> {
        if self.kind.is_shell() {
            self.shell_size.or(self.kind.native_shell_size())
        } else {
            None
        }
    }

    pub fn tail_lifetime(&self) -> f32 {
        self.kind.tail_lifetime(self.shell_size())
    }

    /// Relative time after ignition at which the explosion window closes
    pub fn explosion_span(&self) -> f32 {
        self.duration + self.tail_lifetime()
    }

    /// Last clock value at which the explosion can still be visible
    pub fn explosion_end(&self) -> f32 {
        self.start_time + self.explosion_span()
    }

    /// Seed for one named derivation on this instance
    pub fn seed(&self, salt: &str) -> u32 {
        self.id.seed(&format!("{}/{}", self.kind.name(), salt))
    }

    /// Fingerprint of everything that changes the look of the explosion.
    /// When it changes, any incremental simulation state must be discarded.
    pub fn identity(&self) -> u64 {
        let mut bytes = Vec::with_capacity(64);
        bytes.extend_from_slice(&self.id.raw().to_le_bytes());
        bytes.extend_from_slice(self.kind.name().as_bytes());
        for color in self.colors() {
            for channel in color.to_array() {
                bytes.extend_from_slice(&channel.to_le_bytes());
            }
        }
        if let Some(size) = self.shell_size() {
            bytes.push(size.inches() as u8);
        }
        crate::hash::ContentHash::from_bytes(&bytes).seed_u64()
    }
}

/// Clamp a placement position into the stage volume `[-bounds, bounds]`
pub fn clamp_position(position: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        position.x.clamp(-bounds.x, bounds.x),
        position.y.clamp(-bounds.y, bounds.y),
        position.z.clamp(-bounds.z, bounds.z),
    )
}

/// Default stage bounds used by [`clamp_position`] callers
pub const STAGE_BOUNDS: Vec3 = Vec3::new(80.0, 60.0, 20.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_falls_back_to_burst() {
        assert_eq!(EffectKind::from_name("roman_candle"), EffectKind::Burst);
        assert_eq!(EffectKind::from_name("Ring"), EffectKind::Ring);
        assert_eq!(EffectKind::from_name("kamuro"), EffectKind::KamuroShell);
    }

    #[test]
    fn names_round_trip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::try_from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn strategies_partition_kinds() {
        let incremental: Vec<_> = EffectKind::ALL
            .iter()
            .filter(|k| k.strategy() == Strategy::Incremental)
            .collect();
        assert_eq!(incremental.len(), 4);
    }

    #[test]
    fn negative_duration_rejected() {
        let err = EffectInstance::new(EffectKind::Burst, Vec3::ZERO, 0.0, -1.0, Color::WHITE);
        assert!(matches!(err, Err(PyroError::InvalidDuration(_))));
    }

    #[test]
    fn empty_palette_rejected() {
        let instance =
            EffectInstance::new(EffectKind::Ring, Vec3::ZERO, 0.0, 3.0, Color::WHITE).unwrap();
        assert!(matches!(
            instance.with_palette(vec![]),
            Err(PyroError::EmptyPalette)
        ));
    }

    #[test]
    fn colors_fall_back_to_primary() {
        let instance =
            EffectInstance::new(EffectKind::Burst, Vec3::ZERO, 0.0, 2.0, Color::WHITE).unwrap();
        assert_eq!(instance.colors(), vec![Color::WHITE]);
    }

    #[test]
    fn shell_size_defaults_to_native_tier() {
        let peony = EffectInstance::preset(EffectKind::PeonyShell, Vec3::ZERO, 0.0).unwrap();
        assert_eq!(peony.shell_size(), Some(ShellSize::Small));
        let burst = EffectInstance::preset(EffectKind::Burst, Vec3::ZERO, 0.0)
            .unwrap()
            .with_shell_size(ShellSize::Large);
        assert_eq!(burst.shell_size(), None);
    }

    #[test]
    fn tier_scale_changes_burn_time() {
        let kind = EffectKind::PeonyShell;
        assert!((kind.burn_time(Some(ShellSize::Small)) - 2.8).abs() < 1e-6);
        assert!((kind.burn_time(Some(ShellSize::Large)) - 4.2).abs() < 1e-5);
        assert!((EffectKind::Ring.burn_time(Some(ShellSize::Large)) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn explosion_end_includes_tail() {
        let instance =
            EffectInstance::new(EffectKind::Burst, Vec3::ZERO, 5.0, 2.0, Color::WHITE).unwrap();
        assert!((instance.explosion_end() - 9.8).abs() < 1e-5);
        assert!((instance.explosion_span() - 4.8).abs() < 1e-5);
    }

    #[test]
    fn incremental_tail_covers_longest_particle_life() {
        for kind in [
            EffectKind::Burst,
            EffectKind::Fountain,
            EffectKind::Spiral,
            EffectKind::Willow,
        ] {
            let (life, (_, longest)) = kind.particle_life().unwrap();
            assert!(kind.tail_lifetime(None) >= life * longest, "{kind}");
        }
        assert!((EffectKind::Willow.tail_lifetime(None) - 4.2).abs() < 1e-5);
        assert_eq!(EffectKind::Ring.particle_life(), None);
    }

    #[test]
    fn identity_tracks_colour_changes() {
        let a = EffectInstance::new(EffectKind::Burst, Vec3::ZERO, 0.0, 2.0, Color::WHITE)
            .unwrap()
            .with_id(InstanceId::from_raw(7));
        let mut b = a.clone();
        assert_eq!(a.identity(), b.identity());
        b.primary_color = Color::from_hex(authentic::RED);
        assert_ne!(a.identity(), b.identity());
        let mut moved = a.clone();
        moved.origin = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(a.identity(), moved.identity());
    }

    #[test]
    fn authentic_color_names() {
        assert_eq!(
            authentic::color_name(&Color::from_hex(authentic::GOLD)),
            Some("Gold")
        );
        assert_eq!(authentic::color_name(&Color::from_hex(0x123456)), None);
    }

    #[test]
    fn clamp_position_respects_bounds() {
        let p = clamp_position(Vec3::new(100.0, -70.0, 5.0), STAGE_BOUNDS);
        assert_eq!(p, Vec3::new(80.0, -60.0, 5.0));
    }
}
