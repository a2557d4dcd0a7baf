//! Pyro Particles - firework particle physics and effect generators
//!
//! Provides the time-driven simulation core for every effect kind:
//! - Physics kernel: semi-implicit Euler integration and lifetime bookkeeping
//! - Incremental effects (burst, fountain, spiral, willow) advanced per frame
//!   and replayed deterministically when the clock jumps
//! - Closed-form effects (aerials and professional shells) evaluated
//!   directly from elapsed time
//! - Colour and brightness model: fade curves, zoom compensation, cooling
//! - GPU instance packing of renderable particles

pub mod closed_form;
pub mod color;
pub mod curves;
pub mod incremental;
pub mod particle;
pub mod physics;
pub mod rand;
pub mod runtime;

pub use closed_form::ClosedFormEffect;
pub use color::{cooling_shift, fade_curve, zoom_brightness, FadeFamily, ZoomRange};
pub use incremental::IncrementalState;
pub use particle::{
    filter_alive, integrate, pack_instances, Particle, ParticleInstance, ParticlePool,
    RenderableParticle,
};
pub use physics::PhysicsParams;
pub use runtime::EffectRuntime;
