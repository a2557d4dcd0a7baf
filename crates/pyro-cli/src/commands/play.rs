//! Play command: step one instance through a time range with the show clock

use super::InstanceArgs;
use anyhow::{Context, Result};
use pyro_show::{Show, ShowClock, SimConfig, MAX_FRAME_DELTA};

pub struct PlayArgs {
    pub config: SimConfig,
    pub instance: InstanceArgs,
    pub from: Option<f32>,
    pub to: Option<f32>,
    pub fps: u32,
    pub distance: f32,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let dt = 1.0 / args.fps.max(1) as f32;
    if dt > MAX_FRAME_DELTA {
        anyhow::bail!("--fps must be at least {}", (1.0 / MAX_FRAME_DELTA).ceil());
    }
    let instance = args.instance.build()?;
    let mut show = Show::new(args.config).context("Invalid simulation config")?;
    let lead = show.trail_config(instance.kind).launch_lead_time;
    let from = args.from.unwrap_or(instance.start_time - lead).max(0.0);
    let to = args.to.unwrap_or_else(|| instance.explosion_end() + 0.5);
    if to < from {
        anyhow::bail!("--to ({to}) is before --from ({from})");
    }
    show.add(instance)?;

    let mut clock = ShowClock::new(to);
    clock.seek(from);
    if !clock.at_end() {
        clock.play();
    }

    println!(
        "{:>8}  {:>9}  {:>7}  {:>5}  {:>8}",
        "TIME", "PARTICLES", "VISIBLE", "TRAIL", "EXPLODE"
    );
    let mut peak = 0;
    let mut frames = 0;
    loop {
        let time = clock.current_time();
        let frame = show.evaluate_frame(time, args.distance);
        let entry = frame.instances.first();
        peak = peak.max(frame.particle_count());
        frames += 1;
        println!(
            "{:>8.3}  {:>9}  {:>7}  {:>5}  {:>8}",
            time,
            frame.particle_count(),
            frame.visible_count(),
            entry
                .and_then(|e| e.trail.as_ref())
                .map(|t| t.line.len())
                .unwrap_or(0),
            entry.is_some_and(|e| e.activity.explosion_active)
        );
        if clock.at_end() || !clock.is_playing() {
            break;
        }
        clock.tick(dt);
    }

    log::info!("Played {frames} frames from {from:.2}s to {to:.2}s");
    println!("Frames: {frames}, peak particles: {peak}");
    Ok(())
}
