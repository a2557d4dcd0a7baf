//! Per-instance simulation state, uniform over both strategies

use crate::closed_form::ClosedFormEffect;
use crate::incremental::IncrementalState;
use crate::particle::RenderableParticle;
use crate::physics::PhysicsParams;
use pyro_core::{EffectInstance, EffectKind, Strategy};

/// The simulation owned by one effect instance.
///
/// Exactly one owner drives each runtime: incremental effects depend on the
/// order of prior calls, so a runtime is never shared between threads while
/// being advanced.
#[derive(Debug, Clone)]
pub enum EffectRuntime {
    Incremental(IncrementalState),
    ClosedForm(ClosedFormEffect),
}

impl EffectRuntime {
    pub fn new(instance: &EffectInstance, physics: &PhysicsParams) -> Self {
        match IncrementalState::new(instance) {
            Some(state) => EffectRuntime::Incremental(state),
            None => EffectRuntime::ClosedForm(ClosedFormEffect::build(instance, physics)),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            EffectRuntime::Incremental(state) => state.kind(),
            EffectRuntime::ClosedForm(effect) => effect.kind(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            EffectRuntime::Incremental(_) => Strategy::Incremental,
            EffectRuntime::ClosedForm(_) => Strategy::ClosedForm,
        }
    }

    /// True when `instance` no longer matches what this runtime was built
    /// for (kind, colours or shell size changed), so it must be rebuilt.
    pub fn is_stale(&self, instance: &EffectInstance) -> bool {
        let identity = match self {
            EffectRuntime::Incremental(state) => state.identity(),
            EffectRuntime::ClosedForm(effect) => effect.identity(),
        };
        identity != instance.identity()
    }

    /// Renderable particles at `relative_time` for `instance`.
    ///
    /// Incremental runtimes are advanced (or replayed) to `relative_time`
    /// first. Outside the explosion window the result is empty and any live
    /// incremental particles are released.
    pub fn particles(
        &mut self,
        instance: &EffectInstance,
        relative_time: f32,
        brightness: f32,
        physics: &PhysicsParams,
    ) -> Vec<RenderableParticle> {
        match self {
            EffectRuntime::ClosedForm(effect) => {
                effect.evaluate(instance, relative_time, brightness)
            }
            EffectRuntime::Incremental(state) => {
                if !(0.0..=instance.explosion_span()).contains(&relative_time) {
                    state.reset();
                    return Vec::new();
                }
                state.sync_to(relative_time, instance.duration, physics);
                state.render(instance.origin, brightness)
            }
        }
    }

    /// Release per-instance buffers once the instance leaves its window
    pub fn retire(&mut self) {
        if let EffectRuntime::Incremental(state) = self {
            if state.particle_count() > 0 {
                state.reset();
            }
        }
    }

    /// Particles currently held in memory
    pub fn live_count(&self) -> usize {
        match self {
            EffectRuntime::Incremental(state) => state.particle_count(),
            EffectRuntime::ClosedForm(effect) => effect.particle_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyro_core::{Color, InstanceId, Vec3};

    fn burst() -> EffectInstance {
        EffectInstance::new(EffectKind::Burst, Vec3::ZERO, 5.0, 2.0, Color::WHITE)
            .unwrap()
            .with_id(InstanceId::from_raw(10))
    }

    #[test]
    fn strategy_follows_kind() {
        let physics = PhysicsParams::default();
        for kind in EffectKind::ALL {
            let instance = EffectInstance::preset(kind, Vec3::ZERO, 0.0).unwrap();
            let runtime = EffectRuntime::new(&instance, &physics);
            assert_eq!(runtime.strategy(), kind.strategy());
            assert_eq!(runtime.kind(), kind);
        }
    }

    #[test]
    fn every_kind_is_empty_outside_its_window() {
        let physics = PhysicsParams::default();
        for kind in EffectKind::ALL {
            let instance = EffectInstance::preset(kind, Vec3::ZERO, 4.0).unwrap();
            let mut runtime = EffectRuntime::new(&instance, &physics);
            let end = instance.duration + instance.tail_lifetime();
            assert!(runtime.particles(&instance, -0.5, 1.0, &physics).is_empty());
            assert!(runtime
                .particles(&instance, end + 0.1, 1.0, &physics)
                .is_empty());
        }
    }

    #[test]
    fn burst_scenario() {
        let physics = PhysicsParams::default();
        let instance = burst();
        let mut runtime = EffectRuntime::new(&instance, &physics);

        let at_start = runtime.particles(&instance, 5.0 - instance.start_time, 1.0, &physics);
        assert_eq!(at_start.len(), 800);
        assert!(at_start.iter().all(|p| (p.alpha - 1.0).abs() < 1e-4));

        let mut clock = 5.0;
        let mut subset = Vec::new();
        while clock < 7.5 {
            clock += 1.0 / 60.0;
            subset = runtime.particles(&instance, clock - instance.start_time, 1.0, &physics);
        }
        assert!(!subset.is_empty() && subset.len() < 800);
        assert!(subset.iter().all(|p| p.alpha < 1.0));

        let after = runtime.particles(&instance, 9.1 - instance.start_time, 1.0, &physics);
        assert!(after.is_empty());
        assert_eq!(runtime.live_count(), 0);
    }

    #[test]
    fn incremental_particles_fade_out_before_window_closes() {
        let physics = PhysicsParams::default();
        for kind in [
            EffectKind::Burst,
            EffectKind::Fountain,
            EffectKind::Spiral,
            EffectKind::Willow,
        ] {
            let instance = EffectInstance::new(kind, Vec3::ZERO, 0.0, 0.5, Color::WHITE)
                .unwrap()
                .with_id(InstanceId::from_raw(21));
            let mut runtime = EffectRuntime::new(&instance, &physics);
            let span = instance.explosion_span();
            let mut t = 0.0;
            while t < span {
                runtime.particles(&instance, t, 1.0, &physics);
                t += 1.0 / 60.0;
            }
            let last = runtime.particles(&instance, span, 1.0, &physics);
            assert!(
                last.iter().all(|p| p.alpha < 0.01),
                "{kind}: {} particles still lit at {span}s",
                last.len()
            );
            if kind == EffectKind::Willow {
                assert!(last.is_empty(), "willow embers hold a floor until they die");
            }
        }
    }

    #[test]
    fn colour_change_marks_runtime_stale() {
        let physics = PhysicsParams::default();
        let mut instance = burst();
        let runtime = EffectRuntime::new(&instance, &physics);
        assert!(!runtime.is_stale(&instance));
        instance.primary_color = Color::from_hex(0x00ff00);
        assert!(runtime.is_stale(&instance));
    }

    #[test]
    fn retire_releases_particles() {
        let physics = PhysicsParams::default();
        let instance = burst();
        let mut runtime = EffectRuntime::new(&instance, &physics);
        runtime.particles(&instance, 0.5, 1.0, &physics);
        assert!(runtime.live_count() > 0);
        runtime.retire();
        assert_eq!(runtime.live_count(), 0);
    }
}
