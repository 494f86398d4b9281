use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::pairing::{pair, resolve_device_id, NEARBY_DEVICES};
use crate::core::Config;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load()?;

    if matches.get_flag("list") {
        println!("{}", "Nearby devices".bold());
        for id in NEARBY_DEVICES {
            if *id == config.device_id {
                println!("  {} {}", "●".green(), id.green().bold());
            } else {
                println!("  {} {}", "○".dimmed(), id);
            }
        }
        println!("{}", format!("Current device: {}", config.device_id).dimmed());
        return Ok(());
    }

    let selected = matches
        .get_one::<u32>("select")
        .map(|n| {
            NEARBY_DEVICES
                .get((*n as usize).saturating_sub(1))
                .copied()
                .with_context(|| format!("No nearby device number {}", n))
        })
        .transpose()?;
    let custom = matches.get_one::<String>("device").map(String::as_str);

    let device_id = resolve_device_id(selected, custom)
        .context("Choose a device with --select <N> or give its id")?;

    let previous = pair(&mut config, &device_id)?;
    config.save()?;

    println!(
        "{} {}",
        "✓".green().bold(),
        format!("Paired with {}", config.device_id).green()
    );
    if previous != config.device_id {
        println!("{}", format!("Previously {}", previous).dimmed());
    }
    Ok(())
}
