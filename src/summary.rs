use crate::cli::CommonArgs;
use crate::contributors::ranked;
use crate::fetch::load_stats;
use crate::model::{RepoStats, StatsOutput, SCHEMA_VERSION};
use crate::stats::FrequencyDistribution;
use chrono::Utc;
use console::style;

const TOP_CONTRIBUTORS: usize = 10;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (source, stats) = load_stats(&common, !(json || ndjson))?;

    if json {
        output_json(&stats, &source, &common)?;
    } else if ndjson {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        output_summary(&stats);
    }

    Ok(())
}

fn output_json(stats: &RepoStats, source: &str, common: &CommonArgs) -> anyhow::Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: source.to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        author: common.author.clone(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_summary(stats: &RepoStats) {
    println!("{}", style("Repository Summary").bold());
    println!("{}", "─".repeat(50));

    let added: u64 = stats.contributors.values().map(|c| c.lines_added).sum();
    let deleted: u64 = stats.contributors.values().map(|c| c.lines_deleted).sum();

    println!("Total commits: {}", style(stats.total_commits).cyan());
    println!(
        "Contributors: {} (of {} known)",
        style(stats.contributors.len()).yellow(),
        stats.all_contributors.len()
    );
    println!("Lines added: {}", style(added).green());
    println!("Lines deleted: {}", style(deleted).red());

    if let (Some(first), Some(last)) = (stats.commit_activity.first(), stats.commit_activity.last()) {
        println!(
            "Date range: {} to {} ({} days)",
            style(first.date.format("%Y-%m-%d")).dim(),
            style(last.date.format("%Y-%m-%d")).dim(),
            stats.commit_activity.len()
        );
    }

    if !stats.contributors.is_empty() {
        println!("\n{}", style("Top Contributors").bold());
        for (name, c) in ranked(stats).into_iter().take(TOP_CONTRIBUTORS) {
            println!(
                "  {:<32} {:>6} commits {:>10} {:>10}",
                name,
                c.commits,
                style(format!("+{}", c.lines_added)).green(),
                style(format!("-{}", c.lines_deleted)).red()
            );
        }
    }

    if !stats.commit_activity.is_empty() {
        let dist = FrequencyDistribution::from_activity(&stats.commit_activity);
        println!("\n{}", style("Commit Frequency Distribution").bold());
        println!("  {:>6} days with 0 commits", dist.zero_commits);
        println!("  {:>6} days with 1-2 commits", dist.one_to_two_commits);
        println!("  {:>6} days with 3-5 commits", dist.three_to_five_commits);
        println!("  {:>6} days with 6+ commits", dist.six_plus_commits);
        println!("  {:>6} days in total", dist.total_days());
    } else {
        println!("\nNo commits match the selected filters");
    }
}
