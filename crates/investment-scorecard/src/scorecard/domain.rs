use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const DEFAULT_SCORE: u8 = 3;
pub const MAX_COMMENT_CHARS: usize = 280;

/// Tolerance used when checking that normalized weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Rating scale shared by the subfactor selector and the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Poor,
    Fair,
    Average,
    Good,
    Excellent,
}

impl ScoreLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Poor,
            Self::Fair,
            Self::Average,
            Self::Good,
            Self::Excellent,
        ]
    }

    pub const fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Self::Poor),
            2 => Some(Self::Fair),
            3 => Some(Self::Average),
            4 => Some(Self::Good),
            5 => Some(Self::Excellent),
            _ => None,
        }
    }

    pub const fn score(self) -> u8 {
        match self {
            Self::Poor => 1,
            Self::Fair => 2,
            Self::Average => 3,
            Self::Good => 4,
            Self::Excellent => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Poor => "😟",
            Self::Fair => "😐",
            Self::Average => "🙂",
            Self::Good => "😊",
            Self::Excellent => "🌟",
        }
    }

    /// Selector text, e.g. `3 - Average 🙂`.
    pub fn display(self) -> String {
        format!("{} - {} {}", self.score(), self.label(), self.emoji())
    }

    /// Nearest level for an aggregate score. Ties round to even.
    pub fn nearest(value: f64) -> Self {
        let rounded = value
            .round_ties_even()
            .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8;
        Self::from_score(rounded).unwrap_or(Self::Average)
    }
}

/// A rated attribute within a factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFactor {
    pub name: String,
    pub score: u8,
    pub comment: String,
}

impl SubFactor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: DEFAULT_SCORE,
            comment: String::new(),
        }
    }

    pub fn level(&self) -> Option<ScoreLevel> {
        ScoreLevel::from_score(self.score)
    }
}

/// A weighted category owning a fixed set of subfactors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactor {
    pub name: String,
    pub weight: f64,
    subfactors: Vec<SubFactor>,
}

impl ScoringFactor {
    pub(crate) fn new(name: impl Into<String>, weight: f64, subfactors: Vec<SubFactor>) -> Self {
        Self {
            name: name.into(),
            weight,
            subfactors,
        }
    }

    pub fn subfactors(&self) -> &[SubFactor] {
        &self.subfactors
    }

    pub fn subfactor(&self, name: &str) -> Option<&SubFactor> {
        self.subfactors.iter().find(|sf| names_match(&sf.name, name))
    }

    pub(crate) fn subfactor_mut(&mut self, name: &str) -> Option<&mut SubFactor> {
        self.subfactors
            .iter_mut()
            .find(|sf| names_match(&sf.name, name))
    }

    /// Unweighted mean of the subfactor scores.
    pub fn average_score(&self) -> f64 {
        if self.subfactors.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.subfactors.iter().map(|sf| u32::from(sf.score)).sum();
        f64::from(sum) / self.subfactors.len() as f64
    }

    pub fn weighted_score(&self) -> f64 {
        self.average_score() * self.weight
    }
}

/// Names compare case-insensitively so API paths and CLI flags need not match casing.
pub(crate) fn names_match(stored: &str, requested: &str) -> bool {
    stored.eq_ignore_ascii_case(requested.trim())
}

/// Validation failures raised by scorecard mutators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScorecardError {
    #[error("Number of weights must match number of factors (expected {expected}, got {actual})")]
    WeightArity { expected: usize, actual: usize },
    #[error("Weights must be finite numbers (weight {index} is {value})")]
    NonFiniteWeight { index: usize, value: f64 },
    #[error("Weights cannot be negative (weight {index} is {value})")]
    NegativeWeight { index: usize, value: f64 },
    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
    #[error("Score must be between 1 and 5 (got {score})")]
    ScoreOutOfRange { score: i64 },
    #[error("Comment exceeds 280 characters (got {length})")]
    CommentTooLong { length: usize },
    #[error("unknown factor '{0}'")]
    UnknownFactor(String),
    #[error("unknown subfactor '{subfactor}' for factor '{factor}'")]
    UnknownSubfactor { factor: String, subfactor: String },
}

impl ScorecardError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::WeightArity { .. } => "weight_arity",
            Self::NonFiniteWeight { .. } => "non_finite_weight",
            Self::NegativeWeight { .. } => "negative_weight",
            Self::ZeroTotalWeight => "zero_total_weight",
            Self::ScoreOutOfRange { .. } => "score_out_of_range",
            Self::CommentTooLong { .. } => "comment_too_long",
            Self::UnknownFactor(_) => "unknown_factor",
            Self::UnknownSubfactor { .. } => "unknown_subfactor",
        }
    }
}
