use crate::cli::CommonArgs;
use crate::export::write_activity_csv;
use crate::fetch::load_stats;
use crate::model::DailyActivity;
use console::style;
use std::io;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, csv: bool) -> anyhow::Result<()> {
    let machine = json || ndjson || csv;
    let (_, stats) = load_stats(&common, !machine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats.commit_activity)?);
    } else if ndjson {
        for day in &stats.commit_activity {
            println!("{}", serde_json::to_string(day)?);
        }
    } else if csv {
        write_activity_csv(&stats.commit_activity, io::stdout().lock())?;
    } else {
        output_heatmap(&stats.commit_activity, &common);
    }

    Ok(())
}

/// Block character for a day's share of the busiest day.
pub fn intensity_char(count: u64, max: u64) -> &'static str {
    if count == 0 || max == 0 {
        return "·";
    }
    match (count * 4).div_ceil(max) {
        1 => "▁",
        2 => "▃",
        3 => "▅",
        _ => "█",
    }
}

pub fn output_heatmap(activity: &[DailyActivity], common: &CommonArgs) {
    if activity.is_empty() {
        println!("No data to display");
        return;
    }

    match (&common.since, &common.until) {
        (Some(since), Some(until)) => println!("Filtering commits from {since} to {until}"),
        (Some(since), None) => println!("Filtering commits since {since}"),
        (None, Some(until)) => println!("Filtering commits until {until}"),
        (None, None) => {}
    }
    if let Some(author) = &common.author {
        println!("Author: {author}");
    }

    let max = activity.iter().map(|d| d.count).max().unwrap_or(0);

    println!("{}", style("Daily Commit Activity").bold());
    println!("{}", "─".repeat(40));
    for day in activity {
        let cell = intensity_char(day.count, max);
        let cell = if day.count == 0 { style(cell).dim() } else { style(cell).green() };
        println!("{} {} {:>4}", day.date.format("%Y-%m-%d %a"), cell, day.count);
    }
}
