use crate::cli::CommonArgs;
use crate::export::write_contributors_csv;
use crate::fetch::load_stats;
use crate::model::{ContributorStats, RepoStats};
use console::style;
use serde::Serialize;
use std::io;

const TABLE_LIMIT: usize = 50;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContributorLine<'a> {
    author: &'a str,
    #[serde(flatten)]
    stats: &'a ContributorStats,
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, csv: bool) -> anyhow::Result<()> {
    let machine = json || ndjson || csv;
    let (_, stats) = load_stats(&common, !machine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats.contributors)?);
    } else if ndjson {
        output_ndjson(&stats)?;
    } else if csv {
        write_contributors_csv(&stats, io::stdout().lock())?;
    } else {
        output_table(&stats);
    }

    Ok(())
}

pub fn exec_authors(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let (_, stats) = load_stats(&common, !json)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats.all_contributors)?);
    } else {
        for name in &stats.all_contributors {
            println!("{name}");
        }
    }

    Ok(())
}

fn output_ndjson(stats: &RepoStats) -> anyhow::Result<()> {
    for (author, c) in &stats.contributors {
        println!("{}", serde_json::to_string(&ContributorLine { author, stats: c })?);
    }
    Ok(())
}

/// Contributors ordered by commits, then by name.
pub fn ranked(stats: &RepoStats) -> Vec<(&str, &ContributorStats)> {
    let mut rows: Vec<_> = stats
        .contributors
        .iter()
        .map(|(name, c)| (name.as_str(), c))
        .collect();
    rows.sort_by(|a, b| b.1.commits.cmp(&a.1.commits).then_with(|| a.0.cmp(b.0)));
    rows
}

pub fn output_table(stats: &RepoStats) {
    if stats.contributors.is_empty() {
        println!("No contributor data for the selected period or filters");
        return;
    }

    println!(
        "{:<32} {:>8} {:>10} {:>10} {:>10} {:>8}",
        style("Contributor").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Deleted").bold(),
        style("Net").bold(),
        style("Files").bold()
    );
    println!("{}", "─".repeat(83));

    let rows = ranked(stats);
    for (name, c) in rows.iter().take(TABLE_LIMIT) {
        let net = c.net_lines();
        let net_cell = format!("{net:+}");
        println!(
            "{:<32} {:>8} {:>10} {:>10} {:>10} {:>8}",
            name,
            c.commits,
            style(format!("+{}", c.lines_added)).green(),
            style(format!("-{}", c.lines_deleted)).red(),
            if net >= 0 { style(net_cell).green() } else { style(net_cell).red() },
            c.files_changed
        );
    }
    if rows.len() > TABLE_LIMIT {
        println!("\n... and {} more contributors", rows.len() - TABLE_LIMIT);
    }
}
