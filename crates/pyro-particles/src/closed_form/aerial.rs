//! Multi-colour aerial effects: chrysanthemum, ring, strobe and palm tree

use super::{Star, StarSample};
use crate::curves::{fraction, palette_cycle, palette_gradient, palette_pick};
use crate::physics::{ballistic_offset, drag};
use crate::rand::ParticleRng;
use pyro_core::{Color, EffectKind, Vec3};
use std::f32::consts::{PI, TAU};

const CHRYSANTHEMUM_COUNT: usize = 250;
const CHRYSANTHEMUM_SPEED: (f32, f32) = (5.0, 13.0);
const CHRYSANTHEMUM_BURN: f32 = 3.5;

const RING_COUNT: usize = 150;
const RING_BURN: f32 = 3.0;

const STROBE_COUNT: usize = 125;
const STROBE_BURN: f32 = 2.5;
const STROBE_DUTY: f32 = 0.3;

const PALM_TREE_COUNT: usize = 100;
const PALM_TREE_BURN: f32 = 5.0;
const PALM_TREE_HOLD: f32 = 0.3;

pub(crate) fn build(kind: EffectKind, colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    match kind {
        EffectKind::Ring => ring(colors, rng),
        EffectKind::Strobe => strobe(colors, rng),
        EffectKind::PalmTree => palm_tree(colors, rng),
        _ => chrysanthemum(colors, rng),
    }
}

/// Colour layers by speed: the fastest stars take the last palette entry
fn chrysanthemum(colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    let (min, max) = CHRYSANTHEMUM_SPEED;
    (0..CHRYSANTHEMUM_COUNT)
        .map(|_| {
            let direction = rng.random_direction();
            let speed = rng.range(min, max);
            let color = palette_pick(colors, (speed - min) / (max - min));
            Star::primary(direction * speed, color, 0.5, CHRYSANTHEMUM_BURN)
        })
        .collect()
}

/// Evenly spaced around a horizontal circle; colour follows the angle
fn ring(colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    (0..RING_COUNT)
        .map(|i| {
            let position = i as f32 / RING_COUNT as f32;
            let angle = position * TAU + rng.jitter(0.05);
            let speed = rng.range(4.0, 5.5);
            let velocity = Vec3::new(
                angle.cos() * speed,
                rng.range(-0.5, 0.5),
                angle.sin() * speed,
            );
            Star::primary(velocity, palette_gradient(colors, position), 0.6, RING_BURN)
        })
        .collect()
}

fn strobe(colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    (0..STROBE_COUNT)
        .map(|i| {
            let direction = rng.random_direction();
            let speed = rng.range(3.0, 8.0);
            let mut star = Star::primary(
                direction * speed,
                palette_cycle(colors, i),
                0.7,
                STROBE_BURN,
            );
            star.phase = rng.range(6.0, 12.0);
            star
        })
        .collect()
}

/// Fan of fronds rising at roughly 36 degrees
fn palm_tree(colors: &[Color], rng: &mut ParticleRng) -> Vec<Star> {
    (0..PALM_TREE_COUNT)
        .map(|i| {
            let azimuth = i as f32 / PALM_TREE_COUNT as f32 * TAU;
            let elevation = PI / 5.0 + rng.jitter(PI / 20.0);
            let speed = rng.range(6.0, 10.0);
            let direction = Vec3::new(
                elevation.cos() * azimuth.cos(),
                elevation.sin(),
                elevation.cos() * azimuth.sin(),
            );
            Star::primary(
                direction * speed,
                palette_cycle(colors, i),
                0.6,
                PALM_TREE_BURN,
            )
        })
        .collect()
}

pub(crate) fn sample(kind: EffectKind, star: &Star, t: f32, gravity: f32) -> StarSample {
    let f = fraction(t, star.burn);
    match kind {
        EffectKind::Ring => {
            // Drag acts on the horizontal plane only, keeping the ring flat
            let d = drag(0.96, t, 8.0);
            let offset = Vec3::new(
                star.velocity.x * t * d,
                star.velocity.y * t - 0.5 * gravity * t * t,
                star.velocity.z * t * d,
            );
            StarSample {
                offset,
                color: star.color,
                alpha: 1.0 - f * f,
                brightness: 1.0,
            }
        }
        EffectKind::Strobe => {
            let offset = ballistic_offset(star.velocity, t, drag(0.97, t, 6.0), gravity);
            let on = (t * star.phase).fract() < STROBE_DUTY;
            StarSample {
                offset,
                color: star.color,
                alpha: if on && f < 1.0 { 1.0 } else { 0.0 },
                brightness: 1.0,
            }
        }
        EffectKind::PalmTree => {
            let offset = ballistic_offset(star.velocity, t, drag(0.96, t, 8.0), gravity);
            let alpha = if f < PALM_TREE_HOLD {
                1.0
            } else {
                1.0 - (f - PALM_TREE_HOLD) / (1.0 - PALM_TREE_HOLD)
            };
            StarSample {
                offset,
                color: star.color,
                alpha,
                brightness: 1.2 - 0.4 * f,
            }
        }
        _ => {
            let offset = ballistic_offset(star.velocity, t, drag(0.98, t, 5.0), gravity);
            StarSample {
                offset,
                color: star.color,
                alpha: 1.0 - f,
                brightness: 1.0 + 0.5 * f,
            }
        }
    }
}
