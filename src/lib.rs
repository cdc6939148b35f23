pub mod activity;
pub mod cache;
pub mod cli;
pub mod contributors;
pub mod error;
pub mod export;
pub mod fetch;
pub mod git;
pub mod model;
pub mod stats;
pub mod summary;
pub mod util;

pub use error::{RepostatsError, Result};
pub use model::{CommitRecord, ContributorStats, DailyActivity, FileChange, RepoStats, StatsFilter};
pub use stats::aggregate;
