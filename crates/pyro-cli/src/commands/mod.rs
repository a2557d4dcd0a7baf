//! CLI command implementations

pub mod play;
pub mod sample;
pub mod types;

use anyhow::{Context, Result};
use clap::Args;
use pyro_core::{clamp_position, Color, EffectInstance, EffectKind, ShellSize, Vec3, STAGE_BOUNDS};

/// Options describing the single instance a command works on
#[derive(Args, Debug, Clone)]
pub struct InstanceArgs {
    /// Effect type (e.g. burst, ring, kamuro_8inch)
    pub kind: String,

    /// Break position as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "0,20,0")]
    pub origin: [f32; 3],

    /// Ignition time in seconds
    #[arg(long, default_value = "0")]
    pub start: f32,

    /// Override the preset duration
    #[arg(long)]
    pub duration: Option<f32>,

    /// Primary colour as #rrggbb
    #[arg(long)]
    pub color: Option<String>,

    /// Comma-separated #rrggbb palette
    #[arg(long)]
    pub palette: Option<String>,

    /// Shell size for professional shells (small, medium, large)
    #[arg(long)]
    pub shell: Option<String>,

    /// Instance id, which fixes every random derivation
    #[arg(long, default_value = "1")]
    pub id: u64,
}

impl InstanceArgs {
    /// Build the instance from the kind's preset plus any overrides
    pub fn build(&self) -> Result<EffectInstance> {
        let kind = EffectKind::from_name(&self.kind);
        let requested = Vec3::from_array(self.origin);
        let origin = clamp_position(requested, STAGE_BOUNDS);
        if origin != requested {
            log::warn!("Origin {requested:?} is outside the stage, clamped to {origin:?}");
        }

        let mut instance = EffectInstance::preset(kind, origin, self.start)
            .context("Invalid instance parameters")?
            .with_id(pyro_core::InstanceId::from_raw(self.id));

        if self.duration.is_some() || self.color.is_some() {
            let color = match &self.color {
                Some(hex) => Color::parse_hex(hex).context("Invalid --color")?,
                None => instance.primary_color,
            };
            let palette = instance.palette().map(<[Color]>::to_vec);
            let mut rebuilt = EffectInstance::new(
                kind,
                origin,
                self.start,
                self.duration.unwrap_or(instance.duration),
                color,
            )
            .context("Invalid instance parameters")?
            .with_id(instance.id);
            // An explicit colour replaces the preset palette
            if let (Some(palette), None) = (palette, &self.color) {
                rebuilt = rebuilt.with_palette(palette)?;
            }
            instance = rebuilt;
        }

        if let Some(list) = &self.palette {
            let palette = list
                .split(',')
                .map(Color::parse_hex)
                .collect::<pyro_core::Result<Vec<_>>>()
                .context("Invalid --palette")?;
            instance = instance.with_palette(palette)?;
        }

        if let Some(name) = &self.shell {
            let size = ShellSize::from_name(name)
                .with_context(|| format!("Unknown shell size '{name}'"))?;
            if !kind.is_shell() {
                log::warn!("{kind} is not a professional shell, ignoring --shell");
            }
            instance = instance.with_shell_size(size);
        }

        Ok(instance)
    }
}

pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: &str) -> InstanceArgs {
        InstanceArgs {
            kind: kind.to_string(),
            origin: [0.0, 20.0, 0.0],
            start: 1.0,
            duration: None,
            color: None,
            palette: None,
            shell: None,
            id: 7,
        }
    }

    #[test]
    fn parse_vec3_accepts_three_values() {
        assert_eq!(parse_vec3("1, 2.5,-3"), Ok([1.0, 2.5, -3.0]));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn preset_instance() {
        let instance = args("ring").build().unwrap();
        assert_eq!(instance.kind, EffectKind::Ring);
        assert_eq!(instance.start_time, 1.0);
        assert_eq!(instance.id.raw(), 7);
    }

    #[test]
    fn overrides_apply() {
        let mut a = args("kamuro");
        a.duration = Some(3.0);
        a.color = Some("#ff0000".into());
        a.shell = Some("small".into());
        let instance = a.build().unwrap();
        assert_eq!(instance.kind, EffectKind::KamuroShell);
        assert_eq!(instance.duration, 3.0);
        assert_eq!(instance.primary_color.to_hex_string(), "#ff0000");
        assert_eq!(instance.shell_size(), Some(ShellSize::Small));
    }

    #[test]
    fn unknown_kind_falls_back_to_burst() {
        assert_eq!(args("rocket").build().unwrap().kind, EffectKind::Burst);
    }

    #[test]
    fn origin_is_clamped_to_stage() {
        let mut a = args("burst");
        a.origin = [500.0, 20.0, 0.0];
        assert_eq!(a.build().unwrap().origin.x, 80.0);
    }

    #[test]
    fn bad_palette_is_an_error() {
        let mut a = args("ring");
        a.palette = Some("#ff0000,blue".into());
        assert!(a.build().is_err());
    }
}
