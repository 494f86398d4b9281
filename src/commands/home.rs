//! Home view: one-shot summary of the latest readings.

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;

use super::{build_runtime, fetcher_for};
use crate::core::sensor::{downsample, poll_once, series, trend_delta, Metric, PollState};
use crate::core::vitals::{
    evaluate_alerts, has_anomaly, recommendation, status_label, AlertConfig, AlertSeverity,
};
use crate::core::Config;
use crate::ui::{format_value, severity_colored, sparkline, status_colored, trend_label};

/// Points shown in each metric's trend sparkline
const TREND_POINTS: usize = 7;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let limit = matches
        .get_one::<u32>("limit")
        .copied()
        .unwrap_or(config.default_limit);

    let fetcher = fetcher_for(&config)?;
    let state = build_runtime()?.block_on(poll_once(&fetcher, limit));

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&state.snapshot)?);
        return Ok(());
    }

    render(&config, &state);
    Ok(())
}

fn render(config: &Config, state: &PollState) {
    let alert_config = AlertConfig::default();
    let snapshot = &state.snapshot;

    println!("{}", "Pulse Vital".cyan().bold());
    println!(
        "Device · {} · {}",
        config.device_id.bold(),
        status_colored(state.status)
    );
    match &snapshot.last_updated_ago {
        Some(ago) => println!("{}", format!("Last reading {} ago", ago).dimmed()),
        None => println!("{}", "No readings yet".dimmed()),
    }
    if let Some(err) = &state.error {
        println!("{}", format!("Could not reach the sensor API: {}", err).yellow());
    }
    println!();

    for metric in Metric::ALL {
        let agg = snapshot.metric(metric);
        let mut chronological: Vec<f64> = series(&state.readings, metric)
            .into_iter()
            .flatten()
            .filter(|v| *v > 0.0)
            .collect();
        chronological.reverse();
        let trend = downsample(&chronological, TREND_POINTS);

        println!(
            "{:<12} {:>10}  {}",
            metric.label().bold(),
            format_value(metric, Some(agg.avg)),
            status_label(metric, Some(agg.avg), &alert_config).dimmed()
        );
        if !trend.is_empty() {
            println!(
                "{:<12} {}  {}",
                "",
                sparkline(&trend),
                trend_label(trend_delta(&trend)).dimmed()
            );
        }
    }
    println!();

    let alerts = state
        .latest()
        .map(|r| evaluate_alerts(r, &alert_config))
        .unwrap_or_default();
    let had_alert = has_anomaly(&alerts);

    println!("{}", "Recommendation".bold());
    println!("  {}", recommendation(snapshot, had_alert, &alert_config));
    println!("{}", "  General guidance only, not a medical diagnosis.".dimmed());
    println!();

    println!("{}", "Recent alerts".bold());
    if had_alert {
        for alert in alerts.iter().filter(|a| a.severity > AlertSeverity::Ok) {
            println!("  {}", severity_colored(alert.severity, &alert.message));
        }
    } else {
        println!("  {}", "No recent risks detected".green());
    }
}
