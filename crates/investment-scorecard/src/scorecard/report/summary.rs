use super::super::domain::{ScoreLevel, ScoringFactor, SubFactor, MAX_COMMENT_CHARS};
use super::super::model::Scorecard;
use super::views::{FactorView, ScoreOptionView, ScoreSummaryView, ScorecardView, SubfactorView};

/// Read-only snapshot of a scorecard, shaped for rendering.
#[derive(Debug, Clone)]
pub struct ScorecardReport {
    factors: Vec<FactorView>,
    total_weight: f64,
    total_score: f64,
    max_possible_score: f64,
    percentage_of_max: f64,
    overall_rating: ScoreLevel,
}

impl From<&Scorecard> for ScorecardReport {
    fn from(scorecard: &Scorecard) -> Self {
        let factors = scorecard
            .factors()
            .iter()
            .map(|factor| factor_view(scorecard, factor))
            .collect();

        Self {
            factors,
            total_weight: scorecard.total_weight(),
            total_score: scorecard.total_score(),
            max_possible_score: scorecard.max_possible_score(),
            percentage_of_max: scorecard.percentage_of_max(),
            overall_rating: scorecard.overall_rating(),
        }
    }
}

impl ScorecardReport {
    pub fn factors(&self) -> &[FactorView] {
        &self.factors
    }

    pub fn summary(&self) -> ScoreSummaryView {
        ScoreSummaryView {
            total_score: self.total_score,
            max_possible_score: self.max_possible_score,
            percentage_of_max: self.percentage_of_max,
            overall_rating: self.overall_rating,
            overall_label: self.overall_rating.label(),
            overall_emoji: self.overall_rating.emoji(),
        }
    }

    pub fn view(&self) -> ScorecardView {
        ScorecardView {
            factors: self.factors.clone(),
            total_weight: self.total_weight,
            summary: self.summary(),
        }
    }

    /// Plain-text rendering used by the command line.
    pub fn to_text(&self) -> String {
        let mut out = String::from("Investment Scorecard\n\n");
        for factor in &self.factors {
            out.push_str(&format!(
                "{} (weight {:.2})\n",
                factor.name, factor.weight
            ));
            for sf in &factor.subfactors {
                out.push_str(&format!(
                    "  {}: {} - {} {}\n",
                    sf.name, sf.score, sf.score_label, sf.score_emoji
                ));
                if !sf.comment.is_empty() {
                    out.push_str(&format!("    {}\n", sf.comment));
                }
            }
            out.push_str(&format!(
                "  Average {:.2}, weighted {:.2}\n\n",
                factor.average_score, factor.weighted_score
            ));
        }

        let summary = self.summary();
        out.push_str(&format!("Total weight: {:.2}\n", self.total_weight));
        out.push_str(&format!(
            "Total score: {:.2} / {:.2}\n",
            summary.total_score, summary.max_possible_score
        ));
        out.push_str(&format!(
            "Percentage of max score: {:.2}%\n",
            summary.percentage_of_max
        ));
        out.push_str(&format!(
            "Overall rating: {}\n",
            summary.overall_rating.display()
        ));
        out
    }
}

fn factor_view(scorecard: &Scorecard, factor: &ScoringFactor) -> FactorView {
    FactorView {
        name: factor.name.clone(),
        weight: factor.weight,
        average_score: factor.average_score(),
        weighted_score: factor.weighted_score(),
        subfactors: factor
            .subfactors()
            .iter()
            .map(|sf| subfactor_view(scorecard, &factor.name, sf))
            .collect(),
    }
}

fn subfactor_view(scorecard: &Scorecard, factor: &str, subfactor: &SubFactor) -> SubfactorView {
    let level = subfactor.level().unwrap_or(ScoreLevel::Average);
    SubfactorView {
        name: subfactor.name.clone(),
        description: scorecard
            .description(factor, &subfactor.name)
            .unwrap_or_default(),
        score: subfactor.score,
        score_label: level.label(),
        score_emoji: level.emoji(),
        comment: subfactor.comment.clone(),
        comment_chars_remaining: MAX_COMMENT_CHARS
            .saturating_sub(subfactor.comment.chars().count()),
    }
}

/// Options for the 1-5 score selector, lowest first.
pub fn score_options() -> Vec<ScoreOptionView> {
    ScoreLevel::ordered()
        .into_iter()
        .map(|level| ScoreOptionView {
            score: level.score(),
            label: level.label(),
            emoji: level.emoji(),
            display: level.display(),
        })
        .collect()
}
