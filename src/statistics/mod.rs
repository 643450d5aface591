mod feature_stats;
mod provider;

pub use feature_stats::{FeatureStats, StatsTable};
pub use provider::{StatisticsProvider, compute_stats};
