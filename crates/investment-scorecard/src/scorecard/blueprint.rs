use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct SubfactorTemplate {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorTemplate {
    pub name: &'static str,
    pub default_weight: f64,
    pub subfactors: Vec<SubfactorTemplate>,
}

/// Declares which factors and subfactors a scorecard is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorecardBlueprint {
    factors: Vec<FactorTemplate>,
}

impl ScorecardBlueprint {
    pub fn standard() -> Self {
        Self {
            factors: standard_factor_templates(),
        }
    }

    pub fn new(factors: Vec<FactorTemplate>) -> Result<Self, BlueprintError> {
        if factors.is_empty() {
            return Err(BlueprintError::NoFactors);
        }

        let mut factor_names = HashSet::new();
        for factor in &factors {
            if factor.name.trim().is_empty() {
                return Err(BlueprintError::BlankName);
            }
            if !factor_names.insert(factor.name.to_ascii_lowercase()) {
                return Err(BlueprintError::DuplicateFactor(factor.name.to_string()));
            }
            if factor.subfactors.is_empty() {
                return Err(BlueprintError::NoSubfactors(factor.name.to_string()));
            }

            let mut subfactor_names = HashSet::new();
            for subfactor in &factor.subfactors {
                if subfactor.name.trim().is_empty() {
                    return Err(BlueprintError::BlankName);
                }
                if !subfactor_names.insert(subfactor.name.to_ascii_lowercase()) {
                    return Err(BlueprintError::DuplicateSubfactor {
                        factor: factor.name.to_string(),
                        subfactor: subfactor.name.to_string(),
                    });
                }
            }
        }

        Ok(Self { factors })
    }

    pub fn factor_templates(&self) -> &[FactorTemplate] {
        &self.factors
    }

    pub fn default_weights(&self) -> Vec<f64> {
        self.factors.iter().map(|f| f.default_weight).collect()
    }

    /// Placeholder text shown next to a subfactor's comment field.
    pub fn description(&self, factor: &str, subfactor: &str) -> Option<&'static str> {
        self.factors
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(factor))
            .and_then(|f| {
                f.subfactors
                    .iter()
                    .find(|sf| sf.name.eq_ignore_ascii_case(subfactor))
            })
            .map(|sf| sf.description)
    }
}

impl Default for ScorecardBlueprint {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    #[error("a scorecard needs at least one factor")]
    NoFactors,
    #[error("factor '{0}' needs at least one subfactor")]
    NoSubfactors(String),
    #[error("factor and subfactor names cannot be blank")]
    BlankName,
    #[error("duplicate factor '{0}'")]
    DuplicateFactor(String),
    #[error("duplicate subfactor '{subfactor}' in factor '{factor}'")]
    DuplicateSubfactor { factor: String, subfactor: String },
}

fn standard_factor_templates() -> Vec<FactorTemplate> {
    vec![
        FactorTemplate {
            name: "Team",
            default_weight: 0.5,
            subfactors: vec![
                SubfactorTemplate {
                    name: "Ability",
                    description: "Team's capability to execute the business plan",
                },
                SubfactorTemplate {
                    name: "Speed",
                    description: "Team's pace of execution and decision-making",
                },
                SubfactorTemplate {
                    name: "X-factor",
                    description: "Unique qualities that massively set the team apart",
                },
            ],
        },
        FactorTemplate {
            name: "Product",
            default_weight: 0.3,
            subfactors: vec![
                SubfactorTemplate {
                    name: "Value",
                    description: "Product's ability to solve a significant problem",
                },
                SubfactorTemplate {
                    name: "Defensibility",
                    description: "Product's competitive advantage and barriers to entry",
                },
                SubfactorTemplate {
                    name: "Scalability",
                    description: "Product's potential for growth and expansion",
                },
            ],
        },
        FactorTemplate {
            name: "Market",
            default_weight: 0.2,
            subfactors: vec![
                SubfactorTemplate {
                    name: "Size",
                    description: "Total addressable market size",
                },
                SubfactorTemplate {
                    name: "Growth",
                    description: "Market's growth rate and potential",
                },
                SubfactorTemplate {
                    name: "Dynamics",
                    description: "Competitive landscape and market trends",
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &'static str, subfactors: &[&'static str]) -> FactorTemplate {
        FactorTemplate {
            name,
            default_weight: 1.0,
            subfactors: subfactors
                .iter()
                .copied()
                .map(|name| SubfactorTemplate {
                    name,
                    description: "",
                })
                .collect(),
        }
    }

    #[test]
    fn standard_blueprint_declares_three_factors_of_three_subfactors() {
        let blueprint = ScorecardBlueprint::standard();
        let names: Vec<_> = blueprint.factor_templates().iter().map(|f| f.name).collect();
        assert_eq!(names, ["Team", "Product", "Market"]);
        assert!(blueprint
            .factor_templates()
            .iter()
            .all(|f| f.subfactors.len() == 3));
        assert_eq!(blueprint.default_weights(), vec![0.5, 0.3, 0.2]);
    }

    #[test]
    fn description_lookup_ignores_case() {
        let blueprint = ScorecardBlueprint::standard();
        assert_eq!(
            blueprint.description("team", "x-factor"),
            Some("Unique qualities that massively set the team apart")
        );
        assert_eq!(blueprint.description("Team", "Size"), None);
    }

    #[test]
    fn new_rejects_malformed_structures() {
        assert_eq!(
            ScorecardBlueprint::new(Vec::new()),
            Err(BlueprintError::NoFactors)
        );
        assert_eq!(
            ScorecardBlueprint::new(vec![template("Team", &[])]),
            Err(BlueprintError::NoSubfactors("Team".to_string()))
        );
        assert_eq!(
            ScorecardBlueprint::new(vec![template("Team", &["A"]), template("team", &["B"])]),
            Err(BlueprintError::DuplicateFactor("team".to_string()))
        );
        assert!(matches!(
            ScorecardBlueprint::new(vec![template("Team", &["A", "a"])]),
            Err(BlueprintError::DuplicateSubfactor { .. })
        ));
        assert_eq!(
            ScorecardBlueprint::new(vec![template(" ", &["A"])]),
            Err(BlueprintError::BlankName)
        );
    }
}
