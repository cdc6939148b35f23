use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::git::GitRepo;
use crate::model::{CommitRecord, RepoStats, StatsFilter};
use crate::stats::aggregate;
use crate::util::resolve_range;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Where the records of one run came from, for report envelopes.
pub struct History {
    pub source: String,
    pub records: Vec<CommitRecord>,
}

/// Builds the statistics filter from `--since`, `--until` and `--author`.
pub fn filter_from_args(common: &CommonArgs) -> Result<StatsFilter> {
    let (start_date, end_date) = resolve_range(common.since.as_deref(), common.until.as_deref())?;
    Ok(StatsFilter {
        start_date,
        end_date,
        author: common.author.clone(),
    })
}

/// Loads the history named by `common` and aggregates it under its filters.
pub fn load_stats(common: &CommonArgs, show_progress: bool) -> anyhow::Result<(String, RepoStats)> {
    let filter = filter_from_args(common).context("Failed to resolve date range")?;
    let history = load_history(common, show_progress)?;
    let stats = aggregate(&history.records, &filter);
    Ok((history.source, stats))
}

pub fn load_history(common: &CommonArgs, show_progress: bool) -> anyhow::Result<History> {
    if let Some(input) = &common.input {
        let records = read_records(input)
            .with_context(|| format!("Failed to read commit records from {}", input.display()))?;
        return Ok(History {
            source: input.to_string_lossy().to_string(),
            records,
        });
    }

    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let mut cache = if common.no_cache {
        None
    } else {
        Some(Cache::new(common.cache.as_deref(), repo.path()).context("Failed to initialize cache")?)
    };
    let records = collect_records(
        &repo,
        cache.as_mut(),
        common.include_merges,
        common.head_only,
        show_progress,
    )
    .context("Failed to collect commits from repository")?;

    Ok(History {
        source: repo.path().to_string_lossy().to_string(),
        records,
    })
}

/// Reads a JSON array of commit records.
pub fn read_records(path: &Path) -> Result<Vec<CommitRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Walks the repository, reusing cached records and computing the rest.
pub fn collect_records(
    repo: &GitRepo,
    cache: Option<&mut Cache>,
    include_merges: bool,
    head_only: bool,
    show_progress: bool,
) -> Result<Vec<CommitRecord>> {
    let ids = repo.commit_ids(include_merges, head_only)?;
    let mut cached = match &cache {
        Some(cache) => cache.load_records()?,
        None => Default::default(),
    };

    let pb = if show_progress {
        ProgressBar::new(ids.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Collecting commits...");

    let mut records = Vec::with_capacity(ids.len());
    let mut computed = Vec::new();
    for id in ids {
        match cached.remove(&id.to_string()) {
            Some(record) => records.push(record),
            None => computed.push(repo.commit_record(id)?),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    tracing::debug!(cached = records.len(), computed = computed.len(), "collected commit records");

    if let Some(cache) = cache {
        if !computed.is_empty() {
            cache.store_records(&computed)?;
        }
    }

    records.extend(computed);
    Ok(records)
}
