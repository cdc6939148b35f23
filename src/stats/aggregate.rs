use crate::model::{CommitRecord, RepoStats, StatsFilter};
use crate::stats::activity::ActivityAccumulator;
use crate::stats::contributor::ContributorAccumulator;
use crate::stats::filter::FilterPredicate;
use std::collections::BTreeSet;

/// Single-pass fold of commit records into a [`RepoStats`].
///
/// Every pushed commit registers its author in `all_contributors` before the
/// filter is consulted, so the author list stays independent of the filter.
pub struct HistoryAggregator<'a> {
    predicate: FilterPredicate<'a>,
    all_contributors: BTreeSet<String>,
    total_commits: u64,
    contributors: ContributorAccumulator,
    activity: ActivityAccumulator,
}

impl<'a> HistoryAggregator<'a> {
    pub fn new(filter: &'a StatsFilter) -> Self {
        Self {
            predicate: FilterPredicate::new(filter),
            all_contributors: BTreeSet::new(),
            total_commits: 0,
            contributors: ContributorAccumulator::new(),
            activity: ActivityAccumulator::new(),
        }
    }

    pub fn push(&mut self, commit: &CommitRecord) {
        if !self.all_contributors.contains(&commit.author_name) {
            self.all_contributors.insert(commit.author_name.clone());
        }

        if !self.predicate.includes(commit) {
            return;
        }

        self.total_commits += 1;
        self.contributors.add_commit(commit);
        self.activity.add_commit(commit);
    }

    pub fn finish(self) -> RepoStats {
        RepoStats {
            total_commits: self.total_commits,
            contributors: self.contributors.finish(),
            commit_activity: self.activity.finish(),
            all_contributors: self.all_contributors.into_iter().collect(),
        }
    }
}

/// Aggregates `commits` under `filter`. Input order does not affect the result.
pub fn aggregate(commits: &[CommitRecord], filter: &StatsFilter) -> RepoStats {
    let mut aggregator = HistoryAggregator::new(filter);
    for commit in commits {
        aggregator.push(commit);
    }
    let stats = aggregator.finish();
    tracing::debug!(
        input = commits.len(),
        included = stats.total_commits,
        contributors = stats.contributors.len(),
        days = stats.commit_activity.len(),
        "aggregated commit history"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContributorStats, DailyActivity, FileChange};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn alice_history() -> Vec<CommitRecord> {
        vec![
            CommitRecord::new(
                "c1",
                "Alice",
                "2024-01-01T10:00:00+00:00",
                Some(vec![FileChange::text("src/lib.rs", 10, 2)]),
                None,
            )
            .unwrap(),
            CommitRecord::new(
                "c2",
                "Alice",
                "2024-01-03T15:30:00+00:00",
                Some(vec![FileChange::text("src/main.rs", 5, 0)]),
                None,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn two_commits_without_filters() {
        let stats = aggregate(&alice_history(), &StatsFilter::new());

        assert_eq!(stats.total_commits, 2);
        assert_eq!(
            stats.contributors["Alice"],
            ContributorStats { commits: 2, lines_added: 15, lines_deleted: 2, files_changed: 2 }
        );
        assert_eq!(
            stats.commit_activity,
            vec![
                DailyActivity { date: date(2024, 1, 1), count: 1 },
                DailyActivity { date: date(2024, 1, 2), count: 0 },
                DailyActivity { date: date(2024, 1, 3), count: 1 },
            ]
        );
        assert_eq!(stats.all_contributors, vec!["Alice".to_string()]);
    }

    #[test]
    fn author_filter_with_no_match_keeps_author_list() {
        let stats = aggregate(&alice_history(), &StatsFilter::new().with_author("Bob"));

        assert_eq!(stats.total_commits, 0);
        assert!(stats.contributors.is_empty());
        assert!(stats.commit_activity.is_empty());
        assert_eq!(stats.all_contributors, vec!["Alice".to_string()]);
    }

    #[test]
    fn binary_and_text_entries_in_one_commit() {
        let commits = vec![CommitRecord::new(
            "c1",
            "Alice",
            "2024-01-01T10:00:00Z",
            Some(vec![FileChange::binary("logo.png"), FileChange::text("README.md", 3, 1)]),
            None,
        )
        .unwrap()];
        let stats = aggregate(&commits, &StatsFilter::new());

        let alice = stats.contributors["Alice"];
        assert_eq!(alice.lines_added, 3);
        assert_eq!(alice.lines_deleted, 1);
        assert_eq!(alice.files_changed, 1);
    }

    #[test]
    fn single_day_window_between_commits_is_empty() {
        let filter = StatsFilter::new()
            .with_start_date(date(2024, 1, 2))
            .with_end_date(date(2024, 1, 2));
        let stats = aggregate(&alice_history(), &filter);

        assert_eq!(stats.total_commits, 0);
        assert!(stats.commit_activity.is_empty());
        assert_eq!(stats.all_contributors, vec!["Alice".to_string()]);
    }

    #[test]
    fn empty_history_is_a_valid_empty_report() {
        assert_eq!(aggregate(&[], &StatsFilter::new()), RepoStats::default());
    }

    #[test]
    fn activity_spans_only_included_commits() {
        let mut commits = alice_history();
        commits.push(CommitRecord::new("c3", "Bob", "2024-01-10T00:00:00Z", None, None).unwrap());
        let stats = aggregate(&commits, &StatsFilter::new().with_author("Bob"));

        assert_eq!(stats.total_commits, 1);
        assert_eq!(stats.commit_activity, vec![DailyActivity { date: date(2024, 1, 10), count: 1 }]);
        assert_eq!(stats.all_contributors, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(stats.contributors["Bob"].commits, 1);
        assert_eq!(stats.contributors["Bob"].files_changed, 0);
    }

    #[test]
    fn start_date_drops_earlier_commits() {
        let stats = aggregate(&alice_history(), &StatsFilter::new().with_start_date(date(2024, 1, 2)));

        assert_eq!(stats.total_commits, 1);
        assert_eq!(
            stats.contributors["Alice"],
            ContributorStats { commits: 1, lines_added: 5, lines_deleted: 0, files_changed: 1 }
        );
        assert_eq!(stats.commit_activity, vec![DailyActivity { date: date(2024, 1, 3), count: 1 }]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut reversed = alice_history();
        reversed.reverse();
        assert_eq!(
            aggregate(&alice_history(), &StatsFilter::new()),
            aggregate(&reversed, &StatsFilter::new())
        );
    }
}
