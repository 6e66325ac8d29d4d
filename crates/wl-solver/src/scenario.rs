//! YAML scenario files bundling economy and solver parameters.
//!
//! ```yaml
//! economy:
//!   num_agents: 100
//!   num_goods: 3
//!   seed: 42
//! solver:
//!   eps: 1.0e-6
//!   kappa: 0.1
//!   max_iterations: 1000
//! ```
//!
//! Omitted fields take their defaults.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wl_economy::EconomyParams;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub economy: EconomyParams,
    pub solver: SolverConfig,
}

impl Scenario {
    pub fn validate(&self) -> SolverResult<()> {
        self.economy.validate()?;
        self.solver.validate()
    }

    pub fn from_yaml_str(content: &str) -> SolverResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load_yaml(path: &Path) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> SolverResult<String> {
        self.validate()?;
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConvergenceCriterion, PricePolicy};
    use crate::error::SolverError;

    #[test]
    fn parses_partial_document() {
        let yaml = "economy:\n  num_agents: 100\n  num_goods: 3\n  seed: 42\nsolver:\n  eps: 1.0e-6\n  kappa: 0.1\n  max_iterations: 1000\n";
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.economy, EconomyParams::new(100, 3, 42));
        assert_eq!(scenario.solver.eps, 1e-6);
        assert_eq!(scenario.solver.kappa, 0.1);
        assert_eq!(scenario.solver.max_iterations, 1000);
        assert_eq!(scenario.solver.criterion, ConvergenceCriterion::SignedSum);
        assert_eq!(scenario.solver.cadence.every, 100);
    }

    #[test]
    fn empty_document_is_default() {
        let scenario = Scenario::from_yaml_str("{}").unwrap();
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn parses_optional_policies() {
        let yaml = "solver:\n  criterion: max_abs\n  price_policy:\n    kind: floor\n    min: 0.001\n";
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.solver.criterion, ConvergenceCriterion::MaxAbs);
        assert_eq!(
            scenario.solver.price_policy,
            PricePolicy::Floor { min: 0.001 }
        );
    }

    #[test]
    fn rejects_invalid_values() {
        let err = Scenario::from_yaml_str("economy:\n  num_goods: 1\n").unwrap_err();
        assert!(matches!(err, SolverError::InvalidParameter { .. }));

        let err = Scenario::from_yaml_str("solver:\n  kappa: -0.5\n").unwrap_err();
        assert!(matches!(err, SolverError::InvalidParameter { .. }));

        let err = Scenario::from_yaml_str("solver: [1, 2]").unwrap_err();
        assert!(matches!(err, SolverError::Yaml(_)));
    }

    #[test]
    fn yaml_round_trip_keeps_values() {
        let scenario = Scenario {
            economy: EconomyParams::new(12, 4, 9),
            solver: SolverConfig::new(1e-5, 0.3, 77),
        };
        let text = scenario.to_yaml_string().unwrap();
        assert_eq!(Scenario::from_yaml_str(&text).unwrap(), scenario);
    }
}
