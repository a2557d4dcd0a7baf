//! Sample command: evaluate one instance at one moment

use super::InstanceArgs;
use anyhow::{Context, Result};
use pyro_core::{authentic, Vec3};
use pyro_show::{InstanceFrame, Show, SimConfig};

pub struct SampleArgs {
    pub config: SimConfig,
    pub instance: InstanceArgs,
    pub time: f32,
    pub distance: f32,
    pub json: bool,
}

pub fn run(args: SampleArgs) -> Result<()> {
    let instance = args.instance.build()?;
    let mut show = Show::new(args.config).context("Invalid simulation config")?;
    let id = show.add(instance.clone())?;

    let frame = show.evaluate_frame(args.time, args.distance);
    let Some(entry) = frame.instances.first() else {
        anyhow::bail!("Show produced no output for instance {id}");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    println!("Effect:      {} ({})", instance.kind, instance.kind.preset().display_name);
    println!("Strategy:    {:?}", instance.kind.strategy());
    let color = authentic::color_name(&instance.primary_color)
        .map(|name| format!(" ({name})"))
        .unwrap_or_default();
    println!("Colour:      {}{}", instance.primary_color.to_hex_string(), color);
    if let Some(size) = instance.shell_size() {
        println!("Shell:       {}\"", size.inches());
    }
    println!(
        "Window:      {:.2}s .. {:.2}s (tail {:.2}s)",
        instance.start_time,
        instance.explosion_end(),
        instance.tail_lifetime()
    );
    if let Some(path) = show.launch_path(id) {
        println!("Launch:      {:.1} deg from {:?}", path.angle(), path.ground);
    }
    println!("Time:        {:.3}s (brightness x{:.2})", frame.time, frame.brightness);
    print_summary(entry);
    Ok(())
}

fn print_summary(entry: &InstanceFrame) {
    let activity = &entry.activity;
    println!(
        "Activity:    explosion={} trail={} relative={:.3}s progress={:.2}",
        activity.explosion_active,
        activity.trail_active,
        activity.relative_time,
        activity.trail_progress
    );

    let visible: Vec<_> = entry.particles.iter().filter(|p| p.is_visible()).collect();
    println!(
        "Particles:   {} ({} visible)",
        entry.particles.len(),
        visible.len()
    );
    if !visible.is_empty() {
        let (min, max) = visible.iter().fold(
            (Vec3::new(f32::MAX, f32::MAX, f32::MAX), Vec3::new(f32::MIN, f32::MIN, f32::MIN)),
            |(lo, hi), p| {
                (
                    Vec3::new(lo.x.min(p.position.x), lo.y.min(p.position.y), lo.z.min(p.position.z)),
                    Vec3::new(hi.x.max(p.position.x), hi.y.max(p.position.y), hi.z.max(p.position.z)),
                )
            },
        );
        let mean_alpha = visible.iter().map(|p| p.alpha).sum::<f32>() / visible.len() as f32;
        println!("Bounds:      {:?} .. {:?}", min, max);
        println!("Mean alpha:  {:.3}", mean_alpha);
    }

    if let Some(trail) = &entry.trail {
        println!(
            "Trail:       {} points, {} sparks, thickness {:.2}",
            trail.line.len(),
            trail.sparks.len(),
            trail.thickness
        );
    }
}
