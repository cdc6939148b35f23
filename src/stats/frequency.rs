use crate::model::DailyActivity;
use serde::{Deserialize, Serialize};

/// How many days of a daily series fall into each commit-count band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyDistribution {
    pub zero_commits: u64,
    pub one_to_two_commits: u64,
    pub three_to_five_commits: u64,
    pub six_plus_commits: u64,
}

impl FrequencyDistribution {
    pub fn from_activity(activity: &[DailyActivity]) -> Self {
        let mut dist = Self::default();
        for day in activity {
            match day.count {
                0 => dist.zero_commits += 1,
                1..=2 => dist.one_to_two_commits += 1,
                3..=5 => dist.three_to_five_commits += 1,
                _ => dist.six_plus_commits += 1,
            }
        }
        dist
    }

    pub fn total_days(&self) -> u64 {
        self.zero_commits + self.one_to_two_commits + self.three_to_five_commits + self.six_plus_commits
    }
}
