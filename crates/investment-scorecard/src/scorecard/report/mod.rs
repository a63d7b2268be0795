mod chart;
mod summary;
pub mod views;

pub use chart::{ChartSeries, RadarChart};
pub use summary::{score_options, ScorecardReport};
