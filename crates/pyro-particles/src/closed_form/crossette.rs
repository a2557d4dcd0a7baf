//! Two-phase crossettes: primary stars that break into secondary bursts

use super::{Star, StarRole, StarSample};
use crate::curves::{fraction, palette_cycle};
use crate::physics::{ballistic_offset, drag};
use crate::rand::{perpendicular_basis, ParticleRng};
use pyro_core::{Color, EffectKind, TierScale, Vec3};

/// Aerial crossette timing
pub const BREAK_TIME: f32 = 1.0;
const AERIAL_PRIMARIES: usize = 40;
const AERIAL_BURSTS: usize = 5;
const AERIAL_PER_BURST: usize = 25;
const AERIAL_TOTAL_BURN: f32 = 3.5;

/// Crossette shell timing at the native (medium) tier
pub const SHELL_BREAK_DELAY: f32 = 1.5;
const SHELL_PRIMARIES: usize = 45;
const SHELL_SPLIT: usize = 4;
const SHELL_PRIMARY_BURN: f32 = 2.0;
const SHELL_SECONDARY_BURN: f32 = 1.5;
const SHELL_VELOCITY: f32 = 10.0;

/// Secondary colour for burst `burst`: the palette beyond its first entry,
/// cycling. A single-colour palette reuses that colour.
pub(crate) fn secondary_color(colors: &[Color], burst: usize) -> Color {
    match colors.len() {
        0 => Color::WHITE,
        1 => colors[0],
        n => colors[1 + burst % (n - 1)],
    }
}

pub(crate) fn build(
    kind: EffectKind,
    colors: &[Color],
    scale: TierScale,
    gravity: f32,
    rng: &mut ParticleRng,
) -> Vec<Star> {
    if kind == EffectKind::CrossetteShell {
        shell(colors, scale, gravity, rng)
    } else {
        aerial(colors, rng)
    }
}

/// Primaries fly out and burn until the break. The five secondary bursts
/// sit on a sphere around the primary burst and ignite together.
fn aerial(colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    let primary_color = palette_cycle(colors, 0);
    let mut stars = Vec::with_capacity(AERIAL_PRIMARIES + AERIAL_BURSTS * AERIAL_PER_BURST);

    for _ in 0..AERIAL_PRIMARIES {
        let direction = rng.random_direction();
        let speed = rng.range(4.0, 7.0);
        stars.push(Star::primary(direction * speed, primary_color, 0.5, BREAK_TIME));
    }

    for burst in 0..AERIAL_BURSTS {
        let center = rng.random_direction() * rng.range(5.0, 8.0);
        let color = secondary_color(colors, burst);
        for _ in 0..AERIAL_PER_BURST {
            let direction = rng.random_direction();
            let speed = rng.range(2.0, 4.0);
            stars.push(Star {
                launch: center,
                ignition: BREAK_TIME,
                burn: AERIAL_TOTAL_BURN - BREAK_TIME,
                role: StarRole::Secondary,
                ..Star::primary(direction * speed, color, 0.4, 0.0)
            });
        }
    }
    stars
}

/// Each primary splits into a cross of four at the break, from wherever
/// the primary has reached by then.
fn shell(colors: &[Color], scale: TierScale, gravity: f32, rng: &mut ParticleRng) -> Vec<Star> {
    let primaries = scale.scale_count(SHELL_PRIMARIES);
    let break_at = SHELL_BREAK_DELAY * scale.burn;
    let primary_color = palette_cycle(colors, 0);
    let secondary = secondary_color(colors, 0);
    let mut stars = Vec::with_capacity(primaries * (1 + SHELL_SPLIT));

    for _ in 0..primaries {
        let direction = rng.random_direction();
        let speed = SHELL_VELOCITY * scale.velocity * rng.range(0.9, 1.1);
        let velocity = direction * speed;
        let mut primary = Star::primary(
            velocity,
            primary_color,
            0.6,
            SHELL_PRIMARY_BURN * scale.burn,
        );
        primary.phase = break_at;
        stars.push(primary);

        let break_point = ballistic_offset(velocity, break_at, drag(0.97, break_at, 5.0), gravity);
        let (right, up) = perpendicular_basis(direction);
        for arm in [right, -right, up, -up] {
            let arm_speed = rng.range(3.0, 5.0) * scale.velocity;
            stars.push(Star {
                launch: break_point,
                ignition: break_at,
                burn: SHELL_SECONDARY_BURN * scale.burn,
                role: StarRole::Secondary,
                ..Star::primary(arm * arm_speed, secondary, 0.45, 0.0)
            });
        }
    }
    stars
}

pub(crate) fn sample(kind: EffectKind, star: &Star, t: f32, gravity: f32) -> StarSample {
    let (primary_drag, secondary_drag) = ((0.97, 5.0), (0.95, 7.0));
    match star.role {
        StarRole::Primary => {
            let offset = ballistic_offset(
                star.velocity,
                t,
                drag(primary_drag.0, t, primary_drag.1),
                gravity,
            );
            let break_at = if kind == EffectKind::CrossetteShell {
                star.phase
            } else {
                BREAK_TIME
            };
            let alpha = if t >= break_at {
                0.0
            } else {
                1.0 - fraction(t, star.burn)
            };
            StarSample {
                offset,
                color: star.color,
                alpha,
                brightness: 1.0,
            }
        }
        _ => {
            let local = t - star.ignition;
            if local < 0.0 {
                return StarSample::dark(star.launch, star.color);
            }
            let offset = star.launch
                + ballistic_offset(
                    star.velocity,
                    local,
                    drag(secondary_drag.0, local, secondary_drag.1),
                    gravity,
                );
            StarSample {
                offset,
                color: star.color,
                alpha: 1.0 - fraction(local, star.burn),
                brightness: 1.1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<Color> {
        vec![
            Color::from_hex(0xe91e63),
            Color::from_hex(0x9c27b0),
            Color::from_hex(0x673ab7),
        ]
    }

    fn secondaries(stars: &[Star]) -> impl Iterator<Item = &Star> {
        stars.iter().filter(|s| s.role == StarRole::Secondary)
    }

    #[test]
    fn aerial_layout() {
        let stars = aerial(&palette(), &mut ParticleRng::new(1));
        assert_eq!(stars.len(), 40 + 5 * 25);
        assert_eq!(secondaries(&stars).count(), 125);
    }

    #[test]
    fn secondaries_dark_before_break() {
        let stars = aerial(&palette(), &mut ParticleRng::new(2));
        for star in secondaries(&stars) {
            let s = sample(EffectKind::Crossette, star, BREAK_TIME - 0.01, 9.8);
            assert_eq!(s.alpha, 0.0);
        }
        let lit = secondaries(&stars)
            .filter(|star| sample(EffectKind::Crossette, star, BREAK_TIME + 0.01, 9.8).alpha > 0.0)
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn secondary_bursts_sit_on_sphere() {
        let stars = aerial(&palette(), &mut ParticleRng::new(3));
        for star in secondaries(&stars) {
            let r = star.launch.length();
            assert!((5.0..8.0).contains(&r));
        }
    }

    #[test]
    fn secondary_colours_skip_primary_entry() {
        let colors = palette();
        assert_eq!(secondary_color(&colors, 0), colors[1]);
        assert_eq!(secondary_color(&colors, 1), colors[2]);
        assert_eq!(secondary_color(&colors, 2), colors[1]);
        assert_eq!(secondary_color(&colors[..1], 3), colors[0]);
    }

    #[test]
    fn shell_secondaries_break_from_primary_position() {
        let gravity = 9.8;
        let stars = shell(&palette(), TierScale::IDENTITY, gravity, &mut ParticleRng::new(4));
        assert_eq!(stars.len(), 45 * 5);
        let primary = &stars[0];
        let at_break = sample(EffectKind::CrossetteShell, primary, SHELL_BREAK_DELAY, gravity);
        assert_eq!(at_break.alpha, 0.0);
        for arm in &stars[1..5] {
            assert_eq!(arm.role, StarRole::Secondary);
            let s = sample(EffectKind::CrossetteShell, arm, SHELL_BREAK_DELAY, gravity);
            assert!(s.offset.distance(&at_break.offset) < 1e-3);
            assert!(s.alpha > 0.99);
        }
    }
}
