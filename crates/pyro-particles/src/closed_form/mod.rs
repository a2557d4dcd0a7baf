//! Closed-form effects: every star's initial conditions are sampled once
//! from the instance seed, and its state at any relative time is computed
//! directly. Evaluating the same instance at the same time always returns
//! bit-identical particles, in the same order, with the same count.

mod aerial;
mod crossette;
mod shell;

use crate::color::shade;
use crate::particle::RenderableParticle;
use crate::physics::PhysicsParams;
use crate::rand::ParticleRng;
use pyro_core::{Color, EffectInstance, EffectKind, Strategy, Vec3};

/// What part a star plays in a multi-phase effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StarRole {
    Primary,
    /// Ignites from a break point at `ignition`
    Secondary,
    /// Travels with the burst from t = 0 but only lights up at `ignition`
    Spark,
}

/// Fixed initial conditions of one closed-form star
#[derive(Debug, Clone, Copy)]
pub(crate) struct Star {
    /// Offset from the instance origin where the star starts moving
    pub launch: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    /// Alternate colour (crackle flashes)
    pub accent: Color,
    pub size: f32,
    /// Relative time at which the star becomes visible
    pub ignition: f32,
    /// Burn time after ignition
    pub burn: f32,
    /// Kind-specific timing: strobe frequency, rising phase, crackle rate
    pub phase: f32,
    /// Kind-specific multiplier: manufacturing variation or star mass
    pub variation: f32,
    pub role: StarRole,
}

impl Star {
    pub fn primary(velocity: Vec3, color: Color, size: f32, burn: f32) -> Self {
        Self {
            launch: Vec3::ZERO,
            velocity,
            color,
            accent: color,
            size,
            ignition: 0.0,
            burn,
            phase: 0.0,
            variation: 1.0,
            role: StarRole::Primary,
        }
    }
}

/// State of a star at one instant, relative to the instance origin
#[derive(Debug, Clone, Copy)]
pub(crate) struct StarSample {
    pub offset: Vec3,
    pub color: Color,
    pub alpha: f32,
    pub brightness: f32,
}

impl StarSample {
    /// Unlit star parked at `offset`
    pub fn dark(offset: Vec3, color: Color) -> Self {
        Self {
            offset,
            color,
            alpha: 0.0,
            brightness: 1.0,
        }
    }
}

/// A built closed-form effect, ready to evaluate at any time
#[derive(Debug, Clone)]
pub struct ClosedFormEffect {
    kind: EffectKind,
    stars: Vec<Star>,
    gravity: f32,
    identity: u64,
}

impl ClosedFormEffect {
    /// Build the star set for a closed-form kind. Returns `None` for
    /// incremental kinds.
    pub fn new(instance: &EffectInstance, physics: &PhysicsParams) -> Option<Self> {
        if instance.kind.strategy() != Strategy::ClosedForm {
            return None;
        }
        Some(Self::build(instance, physics))
    }

    pub(crate) fn build(instance: &EffectInstance, physics: &PhysicsParams) -> Self {
        let mut rng = ParticleRng::new(instance.seed("closed-form"));
        let colors = instance.colors();
        let size = instance.shell_size();
        let scale = instance.kind.tier_scale(size);
        let gravity = physics.gravity;

        let stars = match instance.kind {
            EffectKind::Chrysanthemum
            | EffectKind::Ring
            | EffectKind::Strobe
            | EffectKind::PalmTree => aerial::build(instance.kind, &colors, &mut rng),
            EffectKind::Crossette | EffectKind::CrossetteShell => {
                crossette::build(instance.kind, &colors, scale, gravity, &mut rng)
            }
            _ => shell::build(instance.kind, &colors, size, scale, &mut rng),
        };

        log::debug!(
            "Built {} closed-form stars for {} ({})",
            stars.len(),
            instance.kind,
            instance.id
        );

        Self {
            kind: instance.kind,
            stars,
            gravity,
            identity: instance.identity(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// Fixed number of particles returned for any time inside the window
    pub fn particle_count(&self) -> usize {
        self.stars.len()
    }

    fn sample(&self, star: &Star, t: f32) -> StarSample {
        match self.kind {
            EffectKind::Crossette | EffectKind::CrossetteShell => {
                crossette::sample(self.kind, star, t, self.gravity)
            }
            EffectKind::Chrysanthemum
            | EffectKind::Ring
            | EffectKind::Strobe
            | EffectKind::PalmTree => aerial::sample(self.kind, star, t, self.gravity),
            _ => shell::sample(self.kind, star, t, self.gravity),
        }
    }

    /// Renderable particles at `relative_time`. Empty outside the
    /// instance's current explosion window; otherwise exactly [`Self::particle_count`] entries,
    /// with burnt-out stars reported at alpha 0.
    pub fn evaluate(
        &self,
        instance: &EffectInstance,
        relative_time: f32,
        brightness: f32,
    ) -> Vec<RenderableParticle> {
        if !(0.0..=instance.explosion_span()).contains(&relative_time) {
            return Vec::new();
        }
        let size_gain = brightness.max(0.0).sqrt();
        self.stars
            .iter()
            .map(|star| {
                let s = self.sample(star, relative_time);
                let alpha = s.alpha.clamp(0.0, 1.0);
                RenderableParticle {
                    position: instance.origin + s.offset,
                    color: shade(s.color, alpha, s.brightness * brightness),
                    alpha,
                    size: star.size * (0.5 + 0.5 * alpha) * size_gain,
                }
            })
            .collect()
    }
}
