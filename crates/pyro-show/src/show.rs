//! Show: the set of placed effect instances and per-frame evaluation
//!
//! The show owns every instance together with its simulation state and
//! cached launch path. Each frame, instances are evaluated in parallel:
//! a runtime is created when an instance's explosion window opens and
//! dropped as soon as the instance goes idle again.

use crate::config::SimConfig;
use crate::schedule::{instance_activity, Activity};
use crate::trail::{render_trail, TrailConfig, TrailRender, TrailTable};
use crate::trajectory::{ground_launch_point, launch_angle, launch_path, WindDrift};
use pyro_core::{EffectInstance, EffectKind, InstanceId, PyroError, Result, Vec3};
use pyro_particles::{
    pack_instances, zoom_brightness, EffectRuntime, ParticleInstance, PhysicsParams,
    RenderableParticle, ZoomRange,
};
use rayon::prelude::*;
use serde::Serialize;

/// Ground-to-break path of one instance
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPath {
    pub ground: Vec3,
    pub points: Vec<Vec3>,
}

impl LaunchPath {
    fn build(instance: &EffectInstance, trail: &TrailConfig, config: &SimConfig) -> Self {
        let ground = ground_launch_point(instance, config.ground_level);
        let wind = WindDrift::for_launch(instance.kind, ground);
        Self {
            ground,
            points: launch_path(
                ground,
                instance.origin,
                trail.arc,
                config.trajectory_segments,
                wind,
            ),
        }
    }

    /// Elevation of the straight ground-to-break line, in degrees
    pub fn angle(&self) -> f32 {
        match self.points.last() {
            Some(&end) => launch_angle(self.ground, end),
            None => 90.0,
        }
    }
}

struct ShowEntry {
    instance: EffectInstance,
    runtime: Option<EffectRuntime>,
    launch: LaunchPath,
}

impl ShowEntry {
    fn evaluate(
        &mut self,
        time: f32,
        brightness: f32,
        physics: &PhysicsParams,
        trail: &TrailConfig,
        trail_length: usize,
    ) -> InstanceFrame {
        let activity = instance_activity(&self.instance, time, trail.launch_lead_time);

        let particles = if activity.explosion_active {
            let instance = &self.instance;
            let runtime = self.runtime.get_or_insert_with(|| {
                log::debug!("Opening runtime for {} ({})", instance.id, instance.kind);
                EffectRuntime::new(instance, physics)
            });
            runtime.particles(instance, activity.relative_time, brightness, physics)
        } else {
            if let Some(mut runtime) = self.runtime.take() {
                runtime.retire();
                log::debug!("Retired runtime for {}", self.instance.id);
            }
            Vec::new()
        };

        let trail = activity.trail_active.then(|| {
            render_trail(
                &self.launch.points,
                activity.trail_progress,
                trail_length,
                trail,
                self.instance.seed("trail-sparks"),
            )
        });

        InstanceFrame {
            id: self.instance.id,
            kind: self.instance.kind,
            activity,
            particles,
            trail,
        }
    }
}

/// One instance's output for a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceFrame {
    pub id: InstanceId,
    pub kind: EffectKind,
    pub activity: Activity,
    pub particles: Vec<RenderableParticle>,
    /// Present only while the launch trail is active
    pub trail: Option<TrailRender>,
}

/// Everything a renderer needs for one instant of the show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: f32,
    pub brightness: f32,
    pub instances: Vec<InstanceFrame>,
}

impl Frame {
    pub fn particle_count(&self) -> usize {
        self.instances.iter().map(|i| i.particles.len()).sum()
    }

    pub fn visible_count(&self) -> usize {
        self.instances
            .iter()
            .flat_map(|i| i.particles.iter())
            .filter(|p| p.is_visible())
            .count()
    }

    pub fn active_trails(&self) -> usize {
        self.instances.iter().filter(|i| i.trail.is_some()).count()
    }

    /// Pack visible particles of every instance into `out`, tagging each
    /// with the index of its instance in this frame.
    pub fn pack_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        for (slot, instance) in self.instances.iter().enumerate() {
            pack_instances(&instance.particles, slot as u32, out);
        }
    }
}

/// All placed instances of a show
pub struct Show {
    config: SimConfig,
    physics: PhysicsParams,
    zoom: ZoomRange,
    trails: TrailTable,
    entries: Vec<ShowEntry>,
}

impl Show {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let trails = config.trail_table()?;
        Ok(Self {
            physics: config.physics(),
            zoom: config.zoom_range(),
            trails,
            config,
            entries: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn trail_config(&self, kind: EffectKind) -> TrailConfig {
        self.trails.get(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Place an instance. Ids must be unique within the show.
    pub fn add(&mut self, instance: EffectInstance) -> Result<InstanceId> {
        if self.position(instance.id).is_some() {
            return Err(PyroError::InvalidParameter(format!(
                "instance {} is already in the show",
                instance.id
            )));
        }
        let id = instance.id;
        let launch = LaunchPath::build(&instance, &self.trails.get(instance.kind), &self.config);
        log::info!(
            "Added {} {} at {:.2}s",
            instance.kind,
            id,
            instance.start_time
        );
        self.entries.push(ShowEntry {
            instance,
            runtime: None,
            launch,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<EffectInstance> {
        let index = self.position(id)?;
        let entry = self.entries.remove(index);
        log::info!("Removed {} {}", entry.instance.kind, id);
        Some(entry.instance)
    }

    /// Replace the stored instance with the same id.
    ///
    /// A changed kind, palette or shell size discards the simulation state;
    /// a moved origin or changed kind recomputes the launch path.
    pub fn update(&mut self, instance: EffectInstance) -> Result<()> {
        let index = self.position(instance.id).ok_or_else(|| {
            PyroError::InvalidParameter(format!("instance {} is not in the show", instance.id))
        })?;
        let trail = self.trails.get(instance.kind);
        let entry = &mut self.entries[index];

        if entry
            .runtime
            .as_ref()
            .is_some_and(|runtime| runtime.is_stale(&instance))
        {
            log::debug!("Identity of {} changed, resetting its runtime", instance.id);
            entry.runtime = None;
        }
        if entry.instance.origin != instance.origin || entry.instance.kind != instance.kind {
            entry.launch = LaunchPath::build(&instance, &trail, &self.config);
        }
        entry.instance = instance;
        Ok(())
    }

    pub fn get(&self, id: InstanceId) -> Option<&EffectInstance> {
        self.position(id).map(|i| &self.entries[i].instance)
    }

    pub fn launch_path(&self, id: InstanceId) -> Option<&LaunchPath> {
        self.position(id).map(|i| &self.entries[i].launch)
    }

    pub fn instances(&self) -> impl Iterator<Item = &EffectInstance> {
        self.entries.iter().map(|e| &e.instance)
    }

    /// Latest moment any instance is still visible
    pub fn total_duration(&self) -> f32 {
        self.entries
            .iter()
            .map(|e| e.instance.explosion_end())
            .fold(0.0, f32::max)
    }

    /// Instances currently holding simulation state
    pub fn live_runtimes(&self) -> usize {
        self.entries.iter().filter(|e| e.runtime.is_some()).count()
    }

    /// Evaluate every instance at timeline value `time`, as seen from
    /// `viewer_distance`.
    pub fn evaluate_frame(&mut self, time: f32, viewer_distance: f32) -> Frame {
        let brightness = zoom_brightness(viewer_distance, self.zoom);
        let physics = self.physics;
        let trails = &self.trails;
        let trail_length = self.config.trail_length;

        let instances = self
            .entries
            .par_iter_mut()
            .map(|entry| {
                let trail = trails.get(entry.instance.kind);
                entry.evaluate(time, brightness, &physics, &trail, trail_length)
            })
            .collect();

        Frame {
            time,
            brightness,
            instances,
        }
    }

    fn position(&self, id: InstanceId) -> Option<usize> {
        self.entries.iter().position(|e| e.instance.id == id)
    }
}
