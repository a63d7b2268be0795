use super::blueprint::ScorecardBlueprint;
use super::domain::{
    names_match, ScoreLevel, ScorecardError, ScoringFactor, SubFactor, MAX_COMMENT_CHARS,
    MAX_SCORE, MIN_SCORE,
};

/// A live set of ratings and weights.
///
/// Factor weights always sum to one: every path that changes them, including construction,
/// goes through [`Scorecard::update_weights`]. Aggregates are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    blueprint: ScorecardBlueprint,
    factors: Vec<ScoringFactor>,
}

impl Scorecard {
    pub fn new(blueprint: &ScorecardBlueprint) -> Result<Self, ScorecardError> {
        let factors = blueprint
            .factor_templates()
            .iter()
            .map(|template| {
                let subfactors = template
                    .subfactors
                    .iter()
                    .map(|sf| SubFactor::new(sf.name))
                    .collect();
                ScoringFactor::new(template.name, template.default_weight, subfactors)
            })
            .collect();

        let mut scorecard = Self {
            blueprint: blueprint.clone(),
            factors,
        };
        scorecard.update_weights(&blueprint.default_weights())?;
        Ok(scorecard)
    }

    pub fn standard() -> Result<Self, ScorecardError> {
        Self::new(&ScorecardBlueprint::standard())
    }

    pub fn blueprint(&self) -> &ScorecardBlueprint {
        &self.blueprint
    }

    pub fn factors(&self) -> &[ScoringFactor] {
        &self.factors
    }

    pub fn factor(&self, name: &str) -> Result<&ScoringFactor, ScorecardError> {
        self.factors
            .iter()
            .find(|f| names_match(&f.name, name))
            .ok_or_else(|| ScorecardError::UnknownFactor(name.to_string()))
    }

    fn subfactor_mut(
        &mut self,
        factor: &str,
        subfactor: &str,
    ) -> Result<&mut SubFactor, ScorecardError> {
        let entry = self
            .factors
            .iter_mut()
            .find(|f| names_match(&f.name, factor))
            .ok_or_else(|| ScorecardError::UnknownFactor(factor.to_string()))?;
        let factor_name = entry.name.clone();
        entry
            .subfactor_mut(subfactor)
            .ok_or_else(|| ScorecardError::UnknownSubfactor {
                factor: factor_name,
                subfactor: subfactor.to_string(),
            })
    }

    pub fn description(&self, factor: &str, subfactor: &str) -> Option<&'static str> {
        self.blueprint.description(factor, subfactor)
    }

    pub fn update_score(
        &mut self,
        factor: &str,
        subfactor: &str,
        score: i64,
    ) -> Result<(), ScorecardError> {
        if score < i64::from(MIN_SCORE) || score > i64::from(MAX_SCORE) {
            return Err(ScorecardError::ScoreOutOfRange { score });
        }
        let target = self.subfactor_mut(factor, subfactor)?;
        target.score = score as u8;
        Ok(())
    }

    /// Over-length comments are rejected rather than truncated.
    pub fn update_comment(
        &mut self,
        factor: &str,
        subfactor: &str,
        comment: impl Into<String>,
    ) -> Result<(), ScorecardError> {
        let comment = comment.into();
        let length = comment.chars().count();
        if length > MAX_COMMENT_CHARS {
            return Err(ScorecardError::CommentTooLong { length });
        }
        let target = self.subfactor_mut(factor, subfactor)?;
        target.comment = comment;
        Ok(())
    }

    /// Rescale raw weights so they sum to one and apply them in factor order.
    ///
    /// Either every weight is replaced or, on error, none is.
    pub fn update_weights(&mut self, raw_weights: &[f64]) -> Result<(), ScorecardError> {
        if raw_weights.len() != self.factors.len() {
            return Err(ScorecardError::WeightArity {
                expected: self.factors.len(),
                actual: raw_weights.len(),
            });
        }

        if let Some((index, &value)) = raw_weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite())
        {
            return Err(ScorecardError::NonFiniteWeight { index, value });
        }

        if let Some((index, &value)) = raw_weights.iter().enumerate().find(|(_, w)| **w < 0.0) {
            return Err(ScorecardError::NegativeWeight { index, value });
        }

        // Scaling by the largest entry keeps the sum finite for any finite input.
        let largest = raw_weights.iter().copied().fold(0.0_f64, f64::max);
        if largest == 0.0 {
            return Err(ScorecardError::ZeroTotalWeight);
        }
        let total: f64 = raw_weights.iter().map(|w| w / largest).sum();

        for (factor, raw) in self.factors.iter_mut().zip(raw_weights) {
            factor.weight = raw / largest / total;
        }
        Ok(())
    }

    pub fn set_equal_weights(&mut self) -> Result<(), ScorecardError> {
        let count = self.factors.len();
        let equal = vec![1.0 / count as f64; count];
        self.update_weights(&equal)
    }

    pub fn weights(&self) -> Vec<f64> {
        self.factors.iter().map(|f| f.weight).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.factors.iter().map(|f| f.weight).sum()
    }

    pub fn average_score(&self, factor: &str) -> Result<f64, ScorecardError> {
        self.factor(factor).map(ScoringFactor::average_score)
    }

    pub fn weighted_score(&self, factor: &str) -> Result<f64, ScorecardError> {
        self.factor(factor).map(ScoringFactor::weighted_score)
    }

    pub fn total_score(&self) -> f64 {
        self.factors.iter().map(ScoringFactor::weighted_score).sum()
    }

    pub const fn max_possible_score(&self) -> f64 {
        MAX_SCORE as f64
    }

    pub fn percentage_of_max(&self) -> f64 {
        self.total_score() / self.max_possible_score() * 100.0
    }

    pub fn overall_rating(&self) -> ScoreLevel {
        ScoreLevel::nearest(self.total_score())
    }

    pub fn subfactor_count(&self) -> usize {
        self.factors.iter().map(|f| f.subfactors().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::blueprint::{FactorTemplate, SubfactorTemplate};
    use crate::scorecard::domain::WEIGHT_SUM_TOLERANCE;

    fn standard() -> Scorecard {
        Scorecard::standard().expect("standard scorecard builds")
    }

    #[test]
    fn construction_normalizes_blueprint_weights() {
        let blueprint = ScorecardBlueprint::new(vec![
            FactorTemplate {
                name: "Team",
                default_weight: 2.0,
                subfactors: vec![SubfactorTemplate {
                    name: "Ability",
                    description: "",
                }],
            },
            FactorTemplate {
                name: "Market",
                default_weight: 6.0,
                subfactors: vec![SubfactorTemplate {
                    name: "Size",
                    description: "",
                }],
            },
        ])
        .expect("valid blueprint");

        let scorecard = Scorecard::new(&blueprint).expect("weights normalize");
        assert_eq!(scorecard.weights(), vec![0.25, 0.75]);
    }

    #[test]
    fn construction_fails_when_defaults_sum_to_zero() {
        let blueprint = ScorecardBlueprint::new(vec![FactorTemplate {
            name: "Team",
            default_weight: 0.0,
            subfactors: vec![SubfactorTemplate {
                name: "Ability",
                description: "",
            }],
        }])
        .expect("valid blueprint");

        assert_eq!(
            Scorecard::new(&blueprint),
            Err(ScorecardError::ZeroTotalWeight)
        );
    }

    #[test]
    fn update_score_rejects_out_of_range_without_mutation() {
        let mut scorecard = standard();
        for score in [0, 6, -3, 255] {
            assert_eq!(
                scorecard.update_score("Team", "Ability", score),
                Err(ScorecardError::ScoreOutOfRange { score })
            );
        }
        let ability = scorecard
            .factor("Team")
            .and_then(|f| f.subfactor("Ability").ok_or(ScorecardError::ZeroTotalWeight))
            .expect("ability present");
        assert_eq!(ability.score, 3);
    }

    #[test]
    fn update_score_reports_unknown_names() {
        let mut scorecard = standard();
        assert_eq!(
            scorecard.update_score("Finance", "Ability", 4),
            Err(ScorecardError::UnknownFactor("Finance".to_string()))
        );
        assert_eq!(
            scorecard.update_score("team", "Size", 4),
            Err(ScorecardError::UnknownSubfactor {
                factor: "Team".to_string(),
                subfactor: "Size".to_string(),
            })
        );
    }

    #[test]
    fn update_comment_accepts_exactly_the_limit_in_characters() {
        let mut scorecard = standard();
        let at_limit = "é".repeat(MAX_COMMENT_CHARS);
        scorecard
            .update_comment("Product", "Value", at_limit.clone())
            .expect("280 characters allowed");

        let too_long = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert_eq!(
            scorecard.update_comment("Product", "Value", too_long),
            Err(ScorecardError::CommentTooLong { length: 281 })
        );

        let value = scorecard
            .factor("Product")
            .ok()
            .and_then(|f| f.subfactor("Value"))
            .expect("value present");
        assert_eq!(value.comment, at_limit);
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let mut scorecard = standard();
        let before = scorecard.weights();
        assert!(matches!(
            scorecard.update_weights(&[f64::NAN, 1.0, 1.0]),
            Err(ScorecardError::NonFiniteWeight { index: 0, .. })
        ));
        assert!(matches!(
            scorecard.update_weights(&[1.0, f64::INFINITY, 1.0]),
            Err(ScorecardError::NonFiniteWeight { index: 1, .. })
        ));
        assert_eq!(scorecard.weights(), before);
    }

    #[test]
    fn huge_finite_weights_normalize_without_overflow() {
        let mut scorecard = standard();
        scorecard
            .update_weights(&[f64::MAX, f64::MAX, 1.0])
            .expect("finite weights normalize");
        let weights = scorecard.weights();
        assert_eq!(weights[0], 0.5);
        assert_eq!(weights[1], 0.5);
        assert!(weights[2] >= 0.0 && weights[2] < 1e-300);
        assert!((scorecard.total_weight() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn negative_check_reports_first_offending_index() {
        let mut scorecard = standard();
        assert_eq!(
            scorecard.update_weights(&[1.0, -0.5, -2.0]),
            Err(ScorecardError::NegativeWeight {
                index: 1,
                value: -0.5
            })
        );
    }

    #[test]
    fn weights_scale_linearly() {
        let mut scorecard = standard();
        scorecard
            .update_weights(&[5.0, 3.0, 2.0])
            .expect("valid weights");
        let weights = scorecard.weights();
        assert!((weights[0] - 0.5).abs() < WEIGHT_SUM_TOLERANCE);
        assert!((weights[1] - 0.3).abs() < WEIGHT_SUM_TOLERANCE);
        assert!((weights[2] - 0.2).abs() < WEIGHT_SUM_TOLERANCE);

        scorecard
            .update_weights(&[0.0, 0.0, 4.0])
            .expect("single non-zero weight");
        assert_eq!(scorecard.weights(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn overall_rating_and_percentage_follow_total() {
        let mut scorecard = standard();
        assert_eq!(scorecard.overall_rating(), ScoreLevel::Average);
        assert!((scorecard.percentage_of_max() - 60.0).abs() < 1e-9);

        for name in ["Ability", "Speed", "X-factor"] {
            scorecard.update_score("Team", name, 5).expect("valid score");
        }
        assert!((scorecard.total_score() - 4.0).abs() < 1e-9);
        assert_eq!(scorecard.overall_rating(), ScoreLevel::Good);
        assert!((scorecard.percentage_of_max() - 80.0).abs() < 1e-9);
    }
}
