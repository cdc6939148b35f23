pub mod activity;
pub mod aggregate;
pub mod contributor;
pub mod filter;
pub mod frequency;
pub mod numstat;

pub use activity::{fill_daily, ActivityAccumulator};
pub use aggregate::{aggregate, HistoryAggregator};
pub use contributor::ContributorAccumulator;
pub use filter::FilterPredicate;
pub use frequency::FrequencyDistribution;
