use crate::cli::{CommonArgs, ExportTable};
use crate::error::Result;
use crate::fetch::load_stats;
use crate::model::{DailyActivity, RepoStats};
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ContributorRow<'a> {
    author: &'a str,
    commits: u64,
    lines_added: u64,
    lines_deleted: u64,
    net_lines: i64,
    files_changed: u64,
}

pub fn exec(common: CommonArgs, table: ExportTable, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (_, stats) = load_stats(&common, false)?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(&stats, table, file).context("Failed to write CSV")?;
            eprintln!("Wrote {} to {}", table_name(table), path.display());
        }
        None => write_table(&stats, table, io::stdout().lock()).context("Failed to write CSV")?,
    }

    Ok(())
}

fn table_name(table: ExportTable) -> &'static str {
    match table {
        ExportTable::Contributors => "contributors",
        ExportTable::Activity => "activity",
    }
}

pub fn write_table<W: Write>(stats: &RepoStats, table: ExportTable, writer: W) -> Result<()> {
    match table {
        ExportTable::Contributors => write_contributors_csv(stats, writer),
        ExportTable::Activity => write_activity_csv(&stats.commit_activity, writer),
    }
}

/// One row per contributor, in name order.
pub fn write_contributors_csv<W: Write>(stats: &RepoStats, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if stats.contributors.is_empty() {
        wtr.write_record([
            "author",
            "commits",
            "lines_added",
            "lines_deleted",
            "net_lines",
            "files_changed",
        ])?;
    }
    for (author, c) in &stats.contributors {
        wtr.serialize(ContributorRow {
            author,
            commits: c.commits,
            lines_added: c.lines_added,
            lines_deleted: c.lines_deleted,
            net_lines: c.net_lines(),
            files_changed: c.files_changed,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per day of the gap-filled series.
pub fn write_activity_csv<W: Write>(activity: &[DailyActivity], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if activity.is_empty() {
        wtr.write_record(["date", "count"])?;
    }
    for day in activity {
        wtr.serialize(day)?;
    }
    wtr.flush()?;
    Ok(())
}
