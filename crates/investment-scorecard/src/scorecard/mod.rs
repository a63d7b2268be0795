mod blueprint;
pub mod domain;
mod model;
pub mod report;

pub use blueprint::{BlueprintError, FactorTemplate, ScorecardBlueprint, SubfactorTemplate};
pub use domain::{ScoreLevel, ScorecardError, ScoringFactor, SubFactor};
pub use model::Scorecard;
pub use report::{RadarChart, ScorecardReport};
