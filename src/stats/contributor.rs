use crate::model::{CommitRecord, ContributorStats, FileChange};
use crate::stats::numstat;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
struct ContributorTally {
    commits: u64,
    lines_added: u64,
    lines_deleted: u64,
    files: BTreeSet<String>,
}

impl ContributorTally {
    fn add_lines(&mut self, path: &str, insertions: u64, deletions: u64) {
        self.lines_added += insertions;
        self.lines_deleted += deletions;
        if !self.files.contains(path) {
            self.files.insert(path.to_string());
        }
    }

    fn into_stats(self) -> ContributorStats {
        ContributorStats {
            commits: self.commits,
            lines_added: self.lines_added,
            lines_deleted: self.lines_deleted,
            files_changed: self.files.len() as u64,
        }
    }
}

/// Running per-author totals over the included commits.
#[derive(Debug, Default)]
pub struct ContributorAccumulator {
    tallies: BTreeMap<String, ContributorTally>,
}

impl ContributorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_commit(&mut self, commit: &CommitRecord) {
        let tally = self.tallies.entry(commit.author_name.clone()).or_default();
        tally.commits += 1;

        match (&commit.file_changes, &commit.body) {
            (Some(changes), _) => {
                for change in changes {
                    // Binary entries carry no line counts and are not counted as touched files.
                    if let FileChange::Text { path, insertions, deletions } = change {
                        tally.add_lines(path, *insertions, *deletions);
                    }
                }
            }
            (None, Some(body)) => {
                for line in numstat::parse_body(body) {
                    tally.add_lines(line.path, line.insertions, line.deletions);
                }
            }
            (None, None) => {}
        }
    }

    pub fn finish(self) -> BTreeMap<String, ContributorStats> {
        self.tallies
            .into_iter()
            .map(|(author, tally)| (author, tally.into_stats()))
            .collect()
    }
}
