//! Incremental-strategy effects: burst, fountain, spiral and willow
//!
//! Each instance owns an [`IncrementalState`] holding its live particle set.
//! The state is advanced with real frame deltas during playback. When the
//! clock moves backwards, or jumps further than one continuous step, the
//! state is reset and replayed from ignition in fixed steps, so the same
//! clock value always shows the same explosion shape.

use crate::color::{cooling_shift, particle_alpha, shade, FadeFamily};
use crate::curves::palette_cycle;
use crate::particle::{Particle, ParticlePool, RenderableParticle};
use crate::physics::PhysicsParams;
use crate::rand::ParticleRng;
use pyro_core::{Color, EffectInstance, EffectKind, Vec3};
use std::f32::consts::TAU;

/// Per-kind emission parameters
#[derive(Debug, Clone, Copy)]
pub struct EmissionProfile {
    /// Particles in the activation batch, or the pool cap for streams
    pub count: usize,
    /// Particles per second for streaming kinds, `None` for batch kinds
    pub rate: Option<f32>,
    pub speed: f32,
    pub speed_jitter: (f32, f32),
    pub life: f32,
    pub life_jitter: (f32, f32),
    pub size: (f32, f32),
    /// Renderable size multiplier
    pub size_gain: f32,
    pub family: FadeFamily,
}

impl EmissionProfile {
    pub fn for_kind(kind: EffectKind) -> Option<Self> {
        let (life, life_jitter) = kind.particle_life()?;
        let profile = match kind {
            EffectKind::Burst => Self {
                count: 800,
                rate: None,
                speed: 15.0,
                speed_jitter: (0.8, 1.2),
                life,
                life_jitter,
                size: (0.03, 0.10),
                size_gain: 12.0,
                family: FadeFamily::Burst,
            },
            EffectKind::Fountain => Self {
                count: 400,
                rate: None,
                speed: 10.0,
                speed_jitter: (0.8, 1.2),
                life,
                life_jitter,
                size: (0.02, 0.06),
                size_gain: 14.0,
                family: FadeFamily::Fountain,
            },
            EffectKind::Spiral => Self {
                count: 1000,
                rate: Some(200.0),
                speed: 8.0,
                speed_jitter: (0.8, 1.2),
                life,
                life_jitter,
                size: (0.02, 0.07),
                size_gain: 18.0,
                family: FadeFamily::Spiral,
            },
            EffectKind::Willow => Self {
                count: 500,
                rate: None,
                speed: 12.0,
                speed_jitter: (0.6, 1.0),
                life,
                life_jitter,
                size: (0.025, 0.10),
                size_gain: 15.0,
                family: FadeFamily::Willow,
            },
            _ => return None,
        };
        Some(profile)
    }
}

const FOUNTAIN_CONE_DEG: f32 = 45.0;
const SPIRAL_REVS_PER_SEC: f32 = 2.0;
const WILLOW_HORIZONTAL_DAMPING: f32 = 0.98;
const WILLOW_DROOP: f32 = 3.0 * 15.0;

/// Live state of one incremental effect instance
#[derive(Clone, Debug)]
pub struct IncrementalState {
    kind: EffectKind,
    profile: EmissionProfile,
    colors: Vec<Color>,
    seed: u32,
    identity: u64,
    rng: ParticleRng,
    pool: ParticlePool,
    batch_spawned: bool,
    spawn_accumulator: f32,
    spiral_time: f32,
    spawned: usize,
    elapsed: f32,
    started: bool,
}

impl IncrementalState {
    /// State for an incremental kind. Returns `None` for closed-form kinds.
    pub fn new(instance: &EffectInstance) -> Option<Self> {
        let profile = EmissionProfile::for_kind(instance.kind)?;
        let seed = instance.seed("incremental");
        Some(Self {
            kind: instance.kind,
            profile,
            colors: instance.colors(),
            seed,
            identity: instance.identity(),
            rng: ParticleRng::new(seed),
            pool: ParticlePool::new(profile.count),
            batch_spawned: false,
            spawn_accumulator: 0.0,
            spiral_time: 0.0,
            spawned: 0,
            elapsed: 0.0,
            started: false,
        })
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Identity of the instance this state was built for
    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// Relative time the live set has been simulated up to
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn particle_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.alive_slice()
    }

    /// Discard every particle and rewind to before ignition
    pub fn reset(&mut self) {
        self.rng = ParticleRng::new(self.seed);
        self.pool.clear();
        self.batch_spawned = false;
        self.spawn_accumulator = 0.0;
        self.spiral_time = 0.0;
        self.spawned = 0;
        self.elapsed = 0.0;
        self.started = false;
    }

    /// Advance by one frame delta, emitting first when `emitting` is set
    pub fn advance(&mut self, dt: f32, emitting: bool, physics: &PhysicsParams) {
        let dt = dt.max(0.0);
        if emitting {
            self.emit(dt);
        }
        if self.kind == EffectKind::Willow {
            self.droop(dt);
        }
        self.pool.integrate_and_compact(physics.gravity, dt);
        self.elapsed += dt;
        self.started = true;
    }

    /// Bring the live set to `relative_time`, advancing continuously when
    /// possible and replaying from ignition otherwise.
    pub fn sync_to(&mut self, relative_time: f32, duration: f32, physics: &PhysicsParams) {
        if relative_time < 0.0 {
            if self.started {
                self.reset();
            }
            return;
        }
        let delta = relative_time - self.elapsed;
        if self.started && (0.0..=physics.max_step).contains(&delta) {
            let emitting = self.is_emitting(duration);
            self.advance(delta, emitting, physics);
        } else {
            if self.started {
                log::debug!(
                    "Replaying {} from 0 to {:.3}s (clock moved by {:.3}s)",
                    self.kind,
                    relative_time,
                    delta
                );
            }
            self.replay(relative_time, duration, physics);
        }
    }

    fn replay(&mut self, relative_time: f32, duration: f32, physics: &PhysicsParams) {
        self.reset();
        self.advance(0.0, true, physics);
        let step = physics.replay_step.max(1e-3);
        while relative_time - self.elapsed > 1e-6 {
            let dt = step.min(relative_time - self.elapsed);
            let emitting = self.is_emitting(duration);
            self.advance(dt, emitting, physics);
        }
    }

    /// Batch kinds emit once at ignition; streams emit for the nominal duration
    fn is_emitting(&self, duration: f32) -> bool {
        match self.profile.rate {
            Some(_) => self.elapsed < duration,
            None => !self.batch_spawned,
        }
    }

    fn emit(&mut self, dt: f32) {
        match self.profile.rate {
            None => {
                if !self.batch_spawned {
                    for _ in 0..self.profile.count {
                        self.spawn_one();
                    }
                    self.batch_spawned = true;
                }
            }
            Some(rate) => {
                let interval = 1.0 / rate.max(1.0);
                self.spawn_accumulator += dt;
                while self.spawn_accumulator >= interval {
                    self.spawn_one();
                    self.spawn_accumulator -= interval;
                    self.spiral_time += interval;
                }
            }
        }
    }

    fn spawn_one(&mut self) {
        let direction = self.sample_direction();
        let profile = self.profile;
        let rng = &mut self.rng;
        let speed = profile.speed * rng.range(profile.speed_jitter.0, profile.speed_jitter.1);
        let life = profile.life * rng.range(profile.life_jitter.0, profile.life_jitter.1);
        let size = rng.range(profile.size.0, profile.size.1);
        let color = palette_cycle(&self.colors, self.spawned);
        self.spawned += 1;
        // Refused when the stream cap is reached; the rng has still advanced
        // so later particles do not depend on pool occupancy.
        self.pool
            .spawn(Particle::new(Vec3::ZERO, direction * speed, color, life, size));
    }

    fn sample_direction(&mut self) -> Vec3 {
        match self.kind {
            EffectKind::Fountain => self.rng.cone_direction(Vec3::UP, FOUNTAIN_CONE_DEG),
            EffectKind::Spiral => {
                let angle = self.spiral_time * SPIRAL_REVS_PER_SEC * TAU;
                let lift = self.rng.range(0.8, 1.2);
                Vec3::new(angle.cos(), lift, angle.sin()).normalized()
            }
            EffectKind::Willow => {
                let mut dir = self.rng.random_direction();
                dir.y = dir.y.abs() * 0.7 + 0.3;
                dir.normalized()
            }
            _ => self.rng.random_direction(),
        }
    }

    /// Willow embers lose horizontal speed and sag harder as they age
    fn droop(&mut self, dt: f32) {
        let damping = WILLOW_HORIZONTAL_DAMPING.powf(dt * 60.0);
        for p in self.pool.alive_slice_mut() {
            let age = p.age_ratio();
            p.velocity.x *= damping;
            p.velocity.z *= damping;
            p.velocity.y -= age * age * WILLOW_DROOP * dt;
        }
    }

    /// Renderable snapshot of the live set, placed at `origin`
    pub fn render(&self, origin: Vec3, brightness: f32) -> Vec<RenderableParticle> {
        let family = self.profile.family;
        let size_gain = self.profile.size_gain * brightness.max(0.0).sqrt();
        self.pool
            .alive_slice()
            .iter()
            .map(|p| {
                let alpha = particle_alpha(p.life_fraction(), family);
                let base = if family.cools() {
                    cooling_shift(p.color, alpha)
                } else {
                    p.color
                };
                RenderableParticle {
                    position: origin + p.position,
                    color: shade(base, alpha, brightness),
                    alpha,
                    size: p.size * alpha * size_gain,
                }
            })
            .collect()
    }
}
