//! Particle types: simulation state, renderable output and GPU instance data

use bytemuck::{Pod, Zeroable};
use pyro_core::{Color, Vec3};
use serde::Serialize;

/// Simulation state of one incremental-strategy particle.
///
/// Positions are relative to the owning instance's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub age: f32,
    pub max_life: f32,
    pub size: f32,
    pub alive: bool,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, color: Color, max_life: f32, size: f32) -> Self {
        Self {
            position,
            velocity,
            color,
            age: 0.0,
            max_life,
            size,
            alive: max_life > 0.0,
        }
    }

    pub fn remaining_life(&self) -> f32 {
        self.max_life - self.age
    }

    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            1.0
        } else {
            (self.age / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Remaining life as a fraction of `max_life`, in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        1.0 - self.age_ratio()
    }

    /// One semi-implicit Euler step: gravity into velocity, velocity into
    /// position, then age. Dead particles are left untouched.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if !self.alive {
            return;
        }
        self.velocity.y -= gravity * dt;
        self.position += self.velocity * dt;
        self.age += dt;
        if self.remaining_life() <= 0.0 {
            self.alive = false;
        }
    }
}

/// Value-returning form of [`Particle::integrate`]
pub fn integrate(particle: &Particle, gravity: f32, dt: f32) -> Particle {
    let mut next = particle.clone();
    next.integrate(gravity, dt);
    next
}

/// Drop every dead particle, preserving the order of the survivors
pub fn filter_alive(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.alive);
}

/// One drawable point, already fade, brightness and cooling adjusted
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderableParticle {
    pub position: Vec3,
    pub color: Color,
    pub alpha: f32,
    pub size: f32,
}

impl RenderableParticle {
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.size > 0.0
    }
}

/// GPU instance data for instanced point sprites.
/// 48 bytes, 16-byte rows (3 vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xyz = world position, w = size
    pub pos_size: [f32; 4],
    /// rgb = shaded colour, a = alpha
    pub color: [f32; 4],
    /// x = instance slot, yzw unused
    pub meta: [f32; 4],
}

impl ParticleInstance {
    pub fn from_renderable(p: &RenderableParticle, slot: u32) -> Self {
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, p.size],
            color: [p.color.r, p.color.g, p.color.b, p.alpha],
            meta: [slot as f32, 0.0, 0.0, 0.0],
        }
    }
}

/// Pack renderable particles into a GPU upload buffer, skipping invisible ones
pub fn pack_instances(particles: &[RenderableParticle], slot: u32, out: &mut Vec<ParticleInstance>) {
    out.extend(
        particles
            .iter()
            .filter(|p| p.is_visible())
            .map(|p| ParticleInstance::from_renderable(p, slot)),
    );
}

/// Bounded particle store for incremental effects.
///
/// Spawning past capacity is refused rather than growing the buffer.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn alive_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Add a particle. Returns false if the pool is full.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.is_full() || !particle.alive {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Step every particle, then drop the ones that died
    pub fn integrate_and_compact(&mut self, gravity: f32, dt: f32) {
        for p in &mut self.particles {
            p.integrate(gravity, dt);
        }
        filter_alive(&mut self.particles);
    }

    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn alive_slice_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
