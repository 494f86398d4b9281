use crate::core::config::CONFIG_KEYS;
use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_config(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("get", sub)) => handle_get(sub),
        Some(("set", sub)) => handle_set(sub),
        Some(("reset", _)) => handle_reset(),
        Some(("path", _)) => {
            println!("{}", Config::get_config_path()?.display());
            Ok(())
        }
        _ => {
            println!("Use 'pulse config --help' for more information.");
            Ok(())
        }
    }
}

fn handle_get(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;

    match matches.get_one::<String>("key") {
        Some(key) => {
            let value = config
                .get_value(key)
                .with_context(|| format!("Unknown config key '{}'", key))?;
            println!("{}", value);
        }
        None => {
            for key in CONFIG_KEYS {
                let value = config.get_value(key).unwrap_or_default();
                println!("{:<22} {}", key.cyan(), value);
            }
        }
    }
    Ok(())
}

fn handle_set(matches: &clap::ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    println!(
        "{}",
        format!("✓ {} set to {}", key, config.get_value(key).unwrap_or_default()).green()
    );
    Ok(())
}

fn handle_reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}
