//! Professional shells: peony, chrysanthemum, willow, palm and kamuro
//!
//! Star counts, burn times and break velocities come from the shell-size
//! tier. Stars carry an index-derived manufacturing variation so a batch
//! never fades in perfect lockstep.

use super::{Star, StarRole, StarSample};
use crate::curves::{fraction, manufacturing_variation, palette_cycle, palette_gradient};
use crate::physics::{ballistic_offset, drag};
use crate::rand::ParticleRng;
use pyro_core::{authentic, Color, EffectKind, ShellSize, TierScale, Vec3};
use std::f32::consts::{PI, TAU};

const CHRYSANTHEMUM_STARS: usize = 90;
const CHRYSANTHEMUM_SPARKS_PER_STAR: usize = 15;
const CHRYSANTHEMUM_STAR_BURN: f32 = 3.5;
const CHRYSANTHEMUM_SPARK_BURN: f32 = 5.0;
const SPARK_DELAY: f32 = 0.05;
const SPARK_INTENSITY: f32 = 0.6;

const WILLOW_STARS: usize = 70;
const WILLOW_BURN: f32 = 4.0;

const PALM_FRONDS: usize = 30;
const PALM_PER_FROND: usize = 20;
const PALM_RISING: f32 = 1.5;
const PALM_FALLING: f32 = 3.5;
const PALM_TIP: u32 = 0xffaa00;

const KAMURO_STARS: usize = 250;
const KAMURO_SPEED: f32 = 6.0;
const KAMURO_BURN: f32 = 4.0;
/// Lowest vertical direction component: the dome keeps the upper 70% of the sphere
const KAMURO_DOME_FLOOR: f32 = -0.4;

pub(crate) fn build(
    kind: EffectKind,
    colors: &[Color],
    size: Option<ShellSize>,
    scale: TierScale,
    rng: &mut ParticleRng,
) -> Vec<Star> {
    match kind {
        EffectKind::ChrysanthemumShell => chrysanthemum(colors, size, scale, rng),
        EffectKind::WillowShell => willow(colors, size, scale, rng),
        EffectKind::PalmShell => palm(colors, scale, rng),
        EffectKind::KamuroShell => kamuro(colors, size, scale, rng),
        _ => peony(colors, size.unwrap_or(ShellSize::Small), rng),
    }
}

fn star_size(size: Option<ShellSize>) -> f32 {
    size.map(|s| s.profile().star_size).unwrap_or(0.7)
}

fn peony(colors: &[Color], size: ShellSize, rng: &mut ParticleRng) -> Vec<Star> {
    let profile = size.profile();
    let color = palette_cycle(colors, 0);
    (0..profile.star_count)
        .map(|i| {
            let direction = rng.random_direction();
            let speed = profile.velocity * rng.range(0.92, 1.08);
            let mut star = Star::primary(
                direction * speed,
                color,
                profile.star_size,
                profile.burn_time,
            );
            star.variation = manufacturing_variation(i, 0.85, 0.03, 10);
            star
        })
        .collect()
}

/// Main stars each trailed by a string of sparks that light up one after
/// another behind them.
fn chrysanthemum(
    colors: &[Color],
    size: Option<ShellSize>,
    scale: TierScale,
    rng: &mut ParticleRng,
) -> Vec<Star> {
    let count = scale.scale_count(CHRYSANTHEMUM_STARS);
    let star_burn = CHRYSANTHEMUM_STAR_BURN * scale.burn;
    let spark_total = CHRYSANTHEMUM_SPARK_BURN * scale.burn;
    let mut stars = Vec::with_capacity(count * (1 + CHRYSANTHEMUM_SPARKS_PER_STAR));

    for i in 0..count {
        let direction = rng.random_direction();
        let velocity = direction * (rng.range(9.0, 11.0) * scale.velocity);
        stars.push(Star::primary(
            velocity,
            palette_cycle(colors, i),
            star_size(size),
            star_burn,
        ));

        for j in 0..CHRYSANTHEMUM_SPARKS_PER_STAR {
            let factor = rng.range(0.7, 1.1);
            let jitter = Vec3::new(rng.jitter(0.25), rng.jitter(0.25), rng.jitter(0.25));
            let delay = SPARK_DELAY * j as f32;
            stars.push(Star {
                ignition: delay,
                burn: spark_total - delay,
                role: StarRole::Spark,
                ..Star::primary(velocity * factor + jitter, Color::WHITE, 0.25, 0.0)
            });
        }
    }
    stars
}

/// Heavy, slow stars drifting down from an upper-hemisphere break.
/// Star mass scales both the pull of gravity and how fast the star burns.
fn willow(
    colors: &[Color],
    size: Option<ShellSize>,
    scale: TierScale,
    rng: &mut ParticleRng,
) -> Vec<Star> {
    let count = scale.scale_count(WILLOW_STARS);
    (0..count)
        .map(|i| {
            let direction = rng.capped_direction(0.0);
            let speed = rng.range(6.0, 8.5) * scale.velocity;
            let mut star = Star::primary(
                direction * speed,
                palette_cycle(colors, i),
                star_size(size),
                WILLOW_BURN * scale.burn,
            );
            star.variation = rng.range(0.8, 1.2);
            star.phase = manufacturing_variation(i, 0.8, 0.02, 15);
            star
        })
        .collect()
}

/// Fronds at 45 degrees, each a tight bundle of stars shading from the
/// head colour to a deeper tip.
fn palm(colors: &[Color], scale: TierScale, rng: &mut ParticleRng) -> Vec<Star> {
    let fronds = scale.scale_count(PALM_FRONDS);
    let rising = PALM_RISING * scale.burn;
    let falling = PALM_FALLING * scale.burn;
    let gradient: Vec<Color> = match colors.len() {
        0 | 1 => vec![palette_cycle(colors, 0), Color::from_hex(PALM_TIP)],
        _ => colors.to_vec(),
    };
    let mut stars = Vec::with_capacity(fronds * PALM_PER_FROND);

    for frond in 0..fronds {
        let azimuth = frond as f32 / fronds as f32 * TAU;
        let elevation = PI / 4.0 + rng.jitter(PI / 16.0);
        let frond_speed = rng.range(10.0, 14.0) * scale.velocity;
        let frond_dir = Vec3::new(
            elevation.cos() * azimuth.cos(),
            elevation.sin(),
            elevation.cos() * azimuth.sin(),
        );
        for p in 0..PALM_PER_FROND {
            let speed_var = rng.range(0.8, 1.2);
            let spread = Vec3::new(rng.jitter(0.15), rng.jitter(0.15), rng.jitter(0.15));
            let direction = (frond_dir + spread).normalized();
            let color = palette_gradient(&gradient, p as f32 / PALM_PER_FROND as f32);
            let mut star = Star::primary(
                direction * (frond_speed * speed_var),
                color,
                ShellSize::Large.profile().star_size,
                falling,
            );
            star.phase = rising;
            stars.push(star);
        }
    }
    stars
}

/// Dense gold dome that whitens and crackles as it burns down
fn kamuro(
    colors: &[Color],
    size: Option<ShellSize>,
    scale: TierScale,
    rng: &mut ParticleRng,
) -> Vec<Star> {
    let count = scale.scale_count(KAMURO_STARS);
    let gold = palette_cycle(colors, 0);
    let crackle = if colors.len() > 1 {
        colors[1]
    } else {
        Color::from_hex(authentic::WHITE)
    };
    (0..count)
        .map(|_| {
            let direction = rng.capped_direction(KAMURO_DOME_FLOOR);
            let speed = KAMURO_SPEED * rng.range(0.92, 1.08) * scale.velocity;
            let mut star = Star::primary(
                direction * speed,
                gold,
                star_size(size),
                KAMURO_BURN * scale.burn,
            );
            star.accent = crackle;
            star.phase = rng.range(8.0, 14.0);
            star.variation = rng.next_f32();
            star
        })
        .collect()
}

pub(crate) fn sample(kind: EffectKind, star: &Star, t: f32, gravity: f32) -> StarSample {
    match kind {
        EffectKind::ChrysanthemumShell => sample_chrysanthemum(star, t, gravity),
        EffectKind::WillowShell => sample_willow(star, t, gravity),
        EffectKind::PalmShell => sample_palm(star, t, gravity),
        EffectKind::KamuroShell => sample_kamuro(star, t, gravity),
        _ => {
            let offset = ballistic_offset(star.velocity, t, drag(0.98, t, 4.0), gravity);
            let f = fraction(t, star.burn);
            StarSample {
                offset,
                color: star.color,
                alpha: (1.0 - f).powf(star.variation),
                brightness: star.variation,
            }
        }
    }
}

fn sample_chrysanthemum(star: &Star, t: f32, gravity: f32) -> StarSample {
    if star.role == StarRole::Spark {
        let offset = ballistic_offset(star.velocity, t, drag(0.95, t, 6.0), gravity);
        let local = t - star.ignition;
        if local < 0.0 {
            return StarSample::dark(offset, star.color);
        }
        return StarSample {
            offset,
            color: star.color,
            alpha: 1.0 - fraction(local, star.burn),
            brightness: SPARK_INTENSITY,
        };
    }
    let offset = ballistic_offset(star.velocity, t, drag(0.97, t, 5.0), gravity);
    StarSample {
        offset,
        color: star.color,
        alpha: 1.0 - fraction(t, star.burn),
        brightness: 1.0,
    }
}

fn sample_willow(star: &Star, t: f32, gravity: f32) -> StarSample {
    let mass = star.variation;
    let offset = ballistic_offset(star.velocity, t, drag(0.95, t, 6.0 * mass), gravity * mass);
    let f = fraction(t, star.burn);
    let alpha = if f >= 1.0 {
        0.0
    } else {
        (1.0 - f / mass).max(0.0)
    };
    StarSample {
        offset,
        color: star.color,
        alpha,
        brightness: star.phase,
    }
}

/// Fast, bright rise, then a slower, heavier-dragged fall that dims
fn sample_palm(star: &Star, t: f32, gravity: f32) -> StarSample {
    let rising = star.phase;
    if t < rising {
        let offset = ballistic_offset(star.velocity, t, drag(0.96, t, 3.0), gravity);
        return StarSample {
            offset,
            color: star.color,
            alpha: 1.0,
            brightness: 1.2,
        };
    }
    let falling = t - rising;
    let d = 0.96f32.powf(rising * 3.0 + falling * 8.0);
    let offset = ballistic_offset(star.velocity, t, d, gravity);
    let f = fraction(falling, star.burn);
    StarSample {
        offset,
        color: star.color,
        alpha: 1.0 - f,
        brightness: 1.0 - f * 0.3,
    }
}

fn sample_kamuro(star: &Star, t: f32, gravity: f32) -> StarSample {
    let offset = ballistic_offset(star.velocity, t, drag(0.94, t, 5.0), gravity);
    let f = fraction(t, star.burn);
    let crackling = f > 0.4 && (t * star.phase + star.variation).fract() < 0.2;
    let (color, brightness) = if crackling {
        (star.accent, 1.4)
    } else {
        (star.color.lerp(star.accent, f * 0.3), 1.0)
    };
    StarSample {
        offset,
        color,
        alpha: (1.0 - f).powf(0.8),
        brightness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Vec<Color> {
        vec![Color::from_hex(authentic::GOLD), Color::from_hex(0xffaa00)]
    }

    #[test]
    fn peony_counts_follow_tier() {
        for size in [ShellSize::Small, ShellSize::Medium, ShellSize::Large] {
            let stars = peony(&gold(), size, &mut ParticleRng::new(1));
            assert_eq!(stars.len(), size.profile().star_count);
        }
    }

    #[test]
    fn peony_variation_is_index_derived() {
        let a = peony(&gold(), ShellSize::Small, &mut ParticleRng::new(1));
        let b = peony(&gold(), ShellSize::Small, &mut ParticleRng::new(2));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.variation, y.variation);
        }
        assert!((a[3].variation - 0.94).abs() < 1e-6);
    }

    #[test]
    fn chrysanthemum_sparks_light_in_sequence() {
        let stars = chrysanthemum(&gold(), None, TierScale::IDENTITY, &mut ParticleRng::new(2));
        assert_eq!(stars.len(), 90 * 16);
        let sparks = &stars[1..16];
        let t = 0.12;
        let lit: Vec<bool> = sparks
            .iter()
            .map(|s| sample_chrysanthemum(s, t, 9.8).alpha > 0.0)
            .collect();
        assert!(lit[0] && lit[1] && lit[2]);
        assert!(!lit[3] && !lit[14]);
        let bright = sample_chrysanthemum(&sparks[0], 0.5, 9.8);
        assert_eq!(bright.brightness, SPARK_INTENSITY);
    }

    #[test]
    fn willow_breaks_upwards_and_heavy_stars_fall_faster() {
        let stars = willow(&gold(), None, TierScale::IDENTITY, &mut ParticleRng::new(3));
        assert!(stars.iter().all(|s| s.velocity.y >= 0.0));
        let mut light = stars[0];
        light.velocity = Vec3::ZERO;
        light.variation = 0.8;
        let mut heavy = light;
        heavy.variation = 1.2;
        let dl = sample_willow(&light, 2.0, 9.8).offset.y;
        let dh = sample_willow(&heavy, 2.0, 9.8).offset.y;
        assert!(dh < dl);
    }

    #[test]
    fn light_willow_stars_burn_out_early() {
        let mut star = willow(&gold(), None, TierScale::IDENTITY, &mut ParticleRng::new(4))[0];
        star.variation = 0.8;
        assert_eq!(sample_willow(&star, WILLOW_BURN * 0.85, 9.8).alpha, 0.0);
        star.variation = 1.2;
        assert!(sample_willow(&star, WILLOW_BURN * 0.85, 9.8).alpha > 0.0);
    }

    #[test]
    fn palm_phases_change_drag_and_brightness() {
        let stars = palm(&gold(), TierScale::IDENTITY, &mut ParticleRng::new(5));
        assert_eq!(stars.len(), PALM_FRONDS * PALM_PER_FROND);
        let star = &stars[0];
        let rising = sample_palm(star, 1.0, 9.8);
        assert_eq!(rising.alpha, 1.0);
        assert_eq!(rising.brightness, 1.2);
        let falling = sample_palm(star, PALM_RISING + 1.75, 9.8);
        assert!((falling.alpha - 0.5).abs() < 1e-4);
        assert!(falling.brightness < 1.0);
        // Position is continuous across the phase boundary
        let before = sample_palm(star, PALM_RISING - 1e-4, 9.8).offset;
        let after = sample_palm(star, PALM_RISING, 9.8).offset;
        assert!(before.distance(&after) < 1e-2);
    }

    #[test]
    fn palm_fronds_shade_towards_tip() {
        let colors = gold();
        let stars = palm(&colors, TierScale::IDENTITY, &mut ParticleRng::new(6));
        assert_eq!(stars[0].color, colors[0]);
        let tip = stars[PALM_PER_FROND - 1].color;
        assert!(tip.g < colors[0].g);
    }

    #[test]
    fn kamuro_forms_a_dome() {
        let stars = kamuro(&gold(), None, TierScale::IDENTITY, &mut ParticleRng::new(7));
        assert_eq!(stars.len(), KAMURO_STARS);
        for s in &stars {
            let dir = s.velocity.normalized();
            assert!(dir.y >= KAMURO_DOME_FLOOR - 1e-4);
        }
    }
}
