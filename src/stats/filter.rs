use crate::model::{CommitRecord, StatsFilter};

/// Decides which commits take part in the statistics pass.
///
/// Date bounds are rendered once as `YYYY-MM-DD` and compared
/// lexicographically against the full timestamp, so an end date admits only
/// timestamps that sort at or before the start of that day.
#[derive(Debug, Clone)]
pub struct FilterPredicate<'a> {
    author: Option<&'a str>,
    start: Option<String>,
    end: Option<String>,
}

impl<'a> FilterPredicate<'a> {
    pub fn new(filter: &'a StatsFilter) -> Self {
        Self {
            author: filter.author.as_deref(),
            start: filter.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end: filter.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn includes(&self, commit: &CommitRecord) -> bool {
        if let Some(author) = self.author {
            if commit.author_name != author {
                return false;
            }
        }
        if let Some(start) = &self.start {
            if commit.timestamp.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if commit.timestamp.as_str() > end.as_str() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn commit(author: &str, timestamp: &str) -> CommitRecord {
        CommitRecord::new("", author, timestamp, None, None).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filter_includes_everything() {
        let filter = StatsFilter::new();
        let predicate = FilterPredicate::new(&filter);
        assert!(predicate.includes(&commit("Alice", "2024-01-01T00:00:00Z")));
        assert!(predicate.includes(&commit("", "1970-01-01T00:00:00Z")));
    }

    #[test]
    fn author_match_is_exact_and_case_sensitive() {
        let filter = StatsFilter::new().with_author("Alice");
        let predicate = FilterPredicate::new(&filter);
        assert!(predicate.includes(&commit("Alice", "2024-01-01T00:00:00Z")));
        assert!(!predicate.includes(&commit("alice", "2024-01-01T00:00:00Z")));
        assert!(!predicate.includes(&commit("Alice Smith", "2024-01-01T00:00:00Z")));
    }

    #[test]
    fn start_date_is_inclusive() {
        let filter = StatsFilter::new().with_start_date(date(2024, 1, 2));
        let predicate = FilterPredicate::new(&filter);
        assert!(!predicate.includes(&commit("Alice", "2024-01-01T23:59:59Z")));
        assert!(predicate.includes(&commit("Alice", "2024-01-02T00:00:00Z")));
        assert!(predicate.includes(&commit("Alice", "2024-01-03T08:00:00Z")));
    }

    #[test]
    fn end_date_acts_as_start_of_day() {
        let filter = StatsFilter::new().with_end_date(date(2024, 1, 2));
        let predicate = FilterPredicate::new(&filter);
        assert!(predicate.includes(&commit("Alice", "2024-01-01T23:59:59Z")));
        assert!(predicate.includes(&commit("Alice", "2024-01-02")));
        assert!(!predicate.includes(&commit("Alice", "2024-01-02T09:00:00Z")));
    }

    #[test]
    fn all_criteria_must_hold() {
        let filter = StatsFilter::new()
            .with_author("Bob")
            .with_start_date(date(2024, 1, 1))
            .with_end_date(date(2024, 2, 1));
        let predicate = FilterPredicate::new(&filter);
        assert!(predicate.includes(&commit("Bob", "2024-01-15T12:00:00Z")));
        assert!(!predicate.includes(&commit("Alice", "2024-01-15T12:00:00Z")));
        assert!(!predicate.includes(&commit("Bob", "2024-03-01T12:00:00Z")));
    }
}
