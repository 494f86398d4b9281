//! Live view: polls the sensor API until Ctrl+C.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use tokio::sync::watch;

use super::{build_runtime, fetcher_for};
use crate::core::sensor::{Metric, PollState, PollingScheduler, SchedulerConfig};
use crate::core::vitals::{evaluate_alerts, status_label, AlertConfig, VitalsHistory};
use crate::core::Config;
use crate::ui::{format_value, severity_colored, sparkline, status_colored};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let interval = matches
        .get_one::<u64>("interval")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or_else(|| config.live_interval());
    let limit = matches
        .get_one::<u32>("limit")
        .copied()
        .unwrap_or(config.default_limit);

    let fetcher = fetcher_for(&config)?;
    let scheduler = PollingScheduler::new(fetcher, SchedulerConfig { interval, limit })
        .context("Invalid live view settings")?;

    // Setup Ctrl+C handler
    let (quit_tx, quit_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        let _ = quit_tx.send(true);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    println!(
        "{} {}",
        "LIVE".black().on_green().bold(),
        format!("Device · {} · refresh every {:?}", config.device_id, interval).dimmed()
    );
    println!("{}", "Press Ctrl+C to stop".dimmed());

    let runtime = build_runtime()?;
    runtime.block_on(async move {
        let mut updates = scheduler.subscribe();
        let mut quit_rx = quit_rx;
        let mut history = VitalsHistory::new();
        let alert_config = AlertConfig::default();

        scheduler.start();
        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = updates.borrow_and_update().clone();
                    if let Some(latest) = state.latest() {
                        history.record(latest);
                    }
                    render(&state, &history, &alert_config);
                }
                _ = quit_rx.changed() => break,
            }
        }
        scheduler.stop();
        log::debug!(
            "Live view stopped after {} fetches ({} ticks skipped)",
            scheduler.fetches_started(),
            scheduler.ticks_skipped()
        );
    });

    println!();
    println!("{}", "Monitoring stopped".yellow());
    Ok(())
}

fn render(state: &PollState, history: &VitalsHistory, alert_config: &AlertConfig) {
    println!();
    let ago = state
        .snapshot
        .last_updated_ago
        .as_deref()
        .map(|a| format!("last reading {} ago", a))
        .unwrap_or_else(|| "no readings".to_string());
    let headline = if state.status.is_connected() {
        "Monitoring active".green().bold()
    } else {
        "No signal".red().bold()
    };
    println!(
        "{} · {} · {}",
        headline,
        status_colored(state.status),
        ago.dimmed()
    );

    let Some(latest) = state.latest() else {
        if let Some(err) = &state.error {
            println!("{}", err.yellow());
        }
        return;
    };

    for metric in Metric::ALL {
        let value = latest.value(metric);
        println!(
            "  {:<12} {:>10}  {}",
            metric.label(),
            format_value(metric, value),
            status_label(metric, value, alert_config).dimmed()
        );
    }

    if !history.is_empty() {
        println!(
            "  {:<12} {}  {}",
            "Pulse",
            sparkline(&history.heart_rate_series()),
            format!("last {} points · bpm", history.len()).dimmed()
        );
    }

    for alert in evaluate_alerts(latest, alert_config) {
        println!("  {}", severity_colored(alert.severity, &alert.message));
    }
}
