//! Types command: the effect catalog with strategies and activity windows

use anyhow::{Context, Result};
use pyro_core::{EffectKind, Strategy};
use pyro_show::SimConfig;
use serde::Serialize;

#[derive(Serialize)]
struct TypeRow {
    name: &'static str,
    display_name: &'static str,
    strategy: Strategy,
    duration: f32,
    tail_lifetime: f32,
    launch_lead_time: f32,
    arc: &'static str,
    shell_inches: Option<u32>,
    break_height: Option<f32>,
}

pub fn run(config: &SimConfig, json: bool) -> Result<()> {
    let trails = config.trail_table().context("Invalid trail overrides")?;
    let rows: Vec<TypeRow> = EffectKind::ALL
        .iter()
        .map(|&kind| {
            let preset = kind.preset();
            let size = kind.native_shell_size();
            let trail = trails.get(kind);
            TypeRow {
                name: kind.name(),
                display_name: preset.display_name,
                strategy: kind.strategy(),
                duration: preset.duration,
                tail_lifetime: kind.tail_lifetime(size),
                launch_lead_time: trail.launch_lead_time,
                arc: trail.arc.name(),
                shell_inches: size.map(|s| s.inches()),
                break_height: preset.shell.map(|s| s.break_height),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<22} {:<12} {:>8} {:>6} {:>6}  {:<10} {}",
        "TYPE", "STRATEGY", "DURATION", "TAIL", "LEAD", "ARC", "SHELL"
    );
    for row in &rows {
        let strategy = match row.strategy {
            Strategy::Incremental => "incremental",
            Strategy::ClosedForm => "closed-form",
        };
        let shell = match (row.shell_inches, row.break_height) {
            (Some(inches), Some(height)) => format!("{inches}\" @ {height}m"),
            (Some(inches), None) => format!("{inches}\""),
            _ => "-".to_string(),
        };
        println!(
            "{:<22} {:<12} {:>8.2} {:>6.2} {:>6.2}  {:<10} {}",
            row.name,
            strategy,
            row.duration,
            row.tail_lifetime,
            row.launch_lead_time,
            row.arc,
            shell
        );
    }
    Ok(())
}
