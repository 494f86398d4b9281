//! History view: statistics and a chart over a selectable range.

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;

use super::{build_runtime, fetcher_for};
use crate::core::sensor::{downsample, poll_once, series, Metric, PollState};
use crate::core::vitals::HistoryRange;
use crate::core::Config;
use crate::ui::{format_value, short_time, sparkline, status_colored};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;

    let range_name = matches
        .get_one::<String>("range")
        .map(String::as_str)
        .unwrap_or("today");
    let range = HistoryRange::parse(range_name, matches.get_one::<u32>("limit").copied())?;
    let max_points = matches
        .get_one::<usize>("points")
        .copied()
        .unwrap_or(config.chart_max_points);

    let fetcher = fetcher_for(&config)?;
    let state = build_runtime()?.block_on(poll_once(&fetcher, range.limit()));

    render(&config, range, &state, max_points);
    Ok(())
}

fn render(config: &Config, range: HistoryRange, state: &PollState, max_points: usize) {
    println!("{}", "History".cyan().bold());
    println!(
        "{} · {} · {}",
        range,
        config.device_id.bold(),
        status_colored(state.status)
    );
    if let Some(err) = &state.error {
        println!("{}", format!("Could not reach the sensor API: {}", err).yellow());
    }

    if state.readings.is_empty() {
        println!();
        println!("{}", "No data for this range".dimmed());
        return;
    }

    // Chart runs oldest to newest; statistics use the full window
    let mut chronological: Vec<_> = state.readings.iter().collect();
    chronological.reverse();
    let chart = downsample(&chronological, max_points);

    if let (Some(first), Some(last)) = (chart.first(), chart.last()) {
        println!(
            "{}",
            format!(
                "{} readings · chart {} points · {} → {}",
                state.readings.len(),
                chart.len(),
                short_time(first),
                short_time(last)
            )
            .dimmed()
        );
    }
    println!();

    for metric in Metric::ALL {
        let agg = state.snapshot.metric(metric);
        let points: Vec<f64> = chart
            .iter()
            .filter_map(|r| r.value(metric))
            .filter(|v| *v > 0.0)
            .collect();

        println!("{}", metric.label().bold());
        println!("  {}", sparkline(&points));
        println!(
            "  avg {}  min {}  max {}  last {}",
            format_value(metric, Some(agg.avg)),
            format_value(metric, Some(agg.min)),
            format_value(metric, Some(agg.max)),
            format_value(metric, agg.last)
        );
        let missing = series(&state.readings, metric)
            .iter()
            .filter(|v| v.map_or(true, |v| v <= 0.0))
            .count();
        if missing > 0 {
            println!("{}", format!("  {} readings without a value", missing).dimmed());
        }
    }

    println!();
    println!(
        "{}",
        "This information does not replace a professional medical evaluation.".dimmed()
    );
}
