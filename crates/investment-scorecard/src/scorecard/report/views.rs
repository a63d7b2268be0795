use super::super::domain::ScoreLevel;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SubfactorView {
    pub name: String,
    pub description: &'static str,
    pub score: u8,
    pub score_label: &'static str,
    pub score_emoji: &'static str,
    pub comment: String,
    pub comment_chars_remaining: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorView {
    pub name: String,
    pub weight: f64,
    pub average_score: f64,
    pub weighted_score: f64,
    pub subfactors: Vec<SubfactorView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummaryView {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage_of_max: f64,
    pub overall_rating: ScoreLevel,
    pub overall_label: &'static str,
    pub overall_emoji: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreOptionView {
    pub score: u8,
    pub label: &'static str,
    pub emoji: &'static str,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardView {
    pub factors: Vec<FactorView>,
    pub total_weight: f64,
    pub summary: ScoreSummaryView,
}
