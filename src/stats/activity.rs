use crate::model::{CommitRecord, DailyActivity};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Commit counts keyed by activity day.
#[derive(Debug, Default)]
pub struct ActivityAccumulator {
    days: BTreeMap<NaiveDate, u64>,
}

impl ActivityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_commit(&mut self, commit: &CommitRecord) {
        *self.days.entry(commit.day()).or_insert(0) += 1;
    }

    pub fn finish(self) -> Vec<DailyActivity> {
        fill_daily(&self.days)
    }
}

/// Expands sparse day counts into one entry per calendar day between the
/// first and last observed day, inclusive. Days without commits get a zero.
///
/// An empty map yields an empty series.
pub fn fill_daily(days: &BTreeMap<NaiveDate, u64>) -> Vec<DailyActivity> {
    let (Some((&first, _)), Some((&last, _))) = (days.first_key_value(), days.last_key_value()) else {
        return Vec::new();
    };

    let mut series: Vec<DailyActivity> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| DailyActivity {
            date,
            count: days.get(&date).copied().unwrap_or(0),
        })
        .collect();

    series.sort_by(|a, b| a.date.cmp(&b.date));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, count: u64) -> DailyActivity {
        DailyActivity { date: date(y, m, d), count }
    }

    #[test]
    fn empty_map_has_no_days() {
        assert_eq!(fill_daily(&BTreeMap::new()), Vec::new());
    }

    #[test]
    fn single_day() {
        let days = BTreeMap::from([(date(2024, 5, 1), 3)]);
        assert_eq!(fill_daily(&days), vec![entry(2024, 5, 1, 3)]);
    }

    #[test]
    fn fills_gaps_with_zeros() {
        let days = BTreeMap::from([(date(2024, 1, 1), 1), (date(2024, 1, 3), 1)]);
        assert_eq!(
            fill_daily(&days),
            vec![entry(2024, 1, 1, 1), entry(2024, 1, 2, 0), entry(2024, 1, 3, 1)]
        );
    }

    #[test]
    fn crosses_leap_day_and_year_boundary() {
        let days = BTreeMap::from([(date(2024, 2, 28), 2), (date(2024, 3, 1), 1)]);
        assert_eq!(
            fill_daily(&days),
            vec![entry(2024, 2, 28, 2), entry(2024, 2, 29, 0), entry(2024, 3, 1, 1)]
        );

        let days = BTreeMap::from([(date(2023, 12, 31), 1), (date(2024, 1, 1), 4)]);
        assert_eq!(fill_daily(&days), vec![entry(2023, 12, 31, 1), entry(2024, 1, 1, 4)]);
    }

    #[test]
    fn accumulator_counts_commits_per_day() {
        let mut acc = ActivityAccumulator::new();
        for ts in ["2024-01-03T09:00:00Z", "2024-01-01T10:00:00Z", "2024-01-03T23:00:00-08:00"] {
            acc.add_commit(&CommitRecord::new("", "Alice", ts, None, None).unwrap());
        }
        assert_eq!(
            acc.finish(),
            vec![entry(2024, 1, 1, 1), entry(2024, 1, 2, 0), entry(2024, 1, 3, 2)]
        );
    }
}
