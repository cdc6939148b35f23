use crate::error::{RepostatsError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Length of the `YYYY-MM-DD` prefix that names a commit's activity day.
const DAY_PREFIX_LEN: usize = 10;

/// One per-file entry of a commit's numstat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FileChange {
    Text {
        path: String,
        insertions: u64,
        deletions: u64,
    },
    Binary {
        path: String,
    },
}

impl FileChange {
    pub fn text(path: impl Into<String>, insertions: u64, deletions: u64) -> Self {
        FileChange::Text {
            path: path.into(),
            insertions,
            deletions,
        }
    }

    pub fn binary(path: impl Into<String>) -> Self {
        FileChange::Binary { path: path.into() }
    }

    pub fn path(&self) -> &str {
        match self {
            FileChange::Text { path, .. } | FileChange::Binary { path } => path,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, FileChange::Binary { .. })
    }
}

/// A normalized commit as handed to the aggregator.
///
/// The timestamp is kept verbatim because date filters compare against the
/// full string; its leading `YYYY-MM-DD` is validated once at construction
/// and cached as the activity day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommitRecordDoc", rename_all = "camelCase")]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_changes: Option<Vec<FileChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing)]
    day: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitRecordDoc {
    #[serde(default)]
    id: String,
    author_name: String,
    timestamp: String,
    #[serde(default)]
    file_changes: Option<Vec<FileChange>>,
    #[serde(default)]
    body: Option<String>,
}

impl TryFrom<CommitRecordDoc> for CommitRecord {
    type Error = RepostatsError;

    fn try_from(doc: CommitRecordDoc) -> Result<Self> {
        CommitRecord::new(doc.id, doc.author_name, doc.timestamp, doc.file_changes, doc.body)
    }
}

impl CommitRecord {
    pub fn new(
        id: impl Into<String>,
        author_name: impl Into<String>,
        timestamp: impl Into<String>,
        file_changes: Option<Vec<FileChange>>,
        body: Option<String>,
    ) -> Result<Self> {
        let timestamp = timestamp.into();
        let day = parse_day(&timestamp)?;
        Ok(Self {
            id: id.into(),
            author_name: author_name.into(),
            timestamp,
            file_changes,
            body,
            day,
        })
    }

    /// Calendar day the commit is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

fn parse_day(timestamp: &str) -> Result<NaiveDate> {
    let prefix = timestamp.get(..DAY_PREFIX_LEN).ok_or_else(|| {
        RepostatsError::InvalidRecord(format!("timestamp too short: '{timestamp}'"))
    })?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|e| {
        RepostatsError::InvalidRecord(format!("timestamp '{timestamp}' has no valid date: {e}"))
    })
}

/// Optional criteria applied to the statistics pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub author: Option<String>,
}

impl StatsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorStats {
    pub commits: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub files_changed: u64,
}

impl ContributorStats {
    pub fn net_lines(&self) -> i64 {
        self.lines_added as i64 - self.lines_deleted as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: u64,
}

/// Aggregate report for one repository snapshot and one filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub total_commits: u64,
    pub contributors: BTreeMap<String, ContributorStats>,
    pub commit_activity: Vec<DailyActivity>,
    pub all_contributors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    pub stats: &'a RepoStats,
}
