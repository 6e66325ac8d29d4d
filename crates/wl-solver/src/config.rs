//! Solver configuration.

use crate::error::{SolverError, SolverResult};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use wl_core::{Real, ensure_positive};

/// How the vector of excess demands is reduced for the stopping test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceCriterion {
    /// `|sum_i Z_i| < eps`. Opposite-signed excess demands can cancel.
    #[default]
    SignedSum,
    /// `max_i |Z_i| < eps`.
    MaxAbs,
}

impl ConvergenceCriterion {
    pub fn measure(&self, excess: &DVector<Real>) -> Real {
        match self {
            ConvergenceCriterion::SignedSum => excess.sum().abs(),
            ConvergenceCriterion::MaxAbs => excess.amax(),
        }
    }

    /// NaN never satisfies the test.
    pub fn is_met(&self, excess: &DVector<Real>, eps: Real) -> bool {
        self.measure(excess) < eps
    }
}

/// What happens to a price after the tâtonnement update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricePolicy {
    /// Prices move freely and may turn non-positive.
    #[default]
    Unclamped,
    /// Updated prices are raised to at least `min`.
    Floor { min: Real },
}

impl PricePolicy {
    pub fn apply(&self, price: Real) -> Real {
        match self {
            PricePolicy::Unclamped => price,
            PricePolicy::Floor { min } => price.max(*min),
        }
    }
}

/// Which iterations produce progress events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressCadence {
    /// Every iteration below `head` is reported
    pub head: usize,
    /// After that, every `every`-th iteration is reported
    pub every: usize,
}

impl Default for ProgressCadence {
    fn default() -> Self {
        Self { head: 5, every: 100 }
    }
}

impl ProgressCadence {
    pub fn reports(&self, iteration: usize) -> bool {
        iteration < self.head || iteration % self.every == 0
    }

    /// The first unreported iteration gets an elision marker.
    pub fn elides(&self, iteration: usize) -> bool {
        iteration == self.head && !self.reports(iteration)
    }
}

/// Tâtonnement solver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Convergence tolerance on aggregate excess demand
    pub eps: Real,
    /// Price adjustment step
    pub kappa: Real,
    /// Hard cap on iterations
    pub max_iterations: usize,
    /// Stopping test
    pub criterion: ConvergenceCriterion,
    /// Post-update price treatment
    pub price_policy: PricePolicy,
    /// Progress event schedule
    pub cadence: ProgressCadence,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            eps: 1e-8,
            kappa: 0.2,
            max_iterations: 5000,
            criterion: ConvergenceCriterion::default(),
            price_policy: PricePolicy::default(),
            cadence: ProgressCadence::default(),
        }
    }
}

impl SolverConfig {
    pub fn new(eps: Real, kappa: Real, max_iterations: usize) -> Self {
        Self {
            eps,
            kappa,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        ensure_positive(self.eps, "eps must be positive and finite")?;
        ensure_positive(self.kappa, "kappa must be positive and finite")?;
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidParameter {
                what: "max_iterations must be at least 1".to_string(),
            });
        }
        if let PricePolicy::Floor { min } = self.price_policy {
            ensure_positive(min, "price floor must be positive and finite")?;
        }
        if self.cadence.every == 0 {
            return Err(SolverError::InvalidParameter {
                what: "progress cadence must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SolverConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.criterion, ConvergenceCriterion::SignedSum);
        assert_eq!(cfg.price_policy, PricePolicy::Unclamped);
    }

    #[test]
    fn rejects_non_positive_values() {
        for cfg in [
            SolverConfig::new(0.0, 0.1, 10),
            SolverConfig::new(-1e-6, 0.1, 10),
            SolverConfig::new(f64::NAN, 0.1, 10),
            SolverConfig::new(1e-6, 0.0, 10),
            SolverConfig::new(1e-6, f64::INFINITY, 10),
            SolverConfig::new(1e-6, 0.1, 0),
            SolverConfig {
                price_policy: PricePolicy::Floor { min: 0.0 },
                ..SolverConfig::default()
            },
            SolverConfig {
                cadence: ProgressCadence { head: 5, every: 0 },
                ..SolverConfig::default()
            },
        ] {
            assert!(
                matches!(cfg.validate(), Err(SolverError::InvalidParameter { .. })),
                "{cfg:?} should be rejected"
            );
        }
    }

    #[test]
    fn signed_sum_can_cancel() {
        let z = DVector::from_vec(vec![3.0, -3.0]);
        assert!(ConvergenceCriterion::SignedSum.is_met(&z, 1e-6));
        assert!(!ConvergenceCriterion::MaxAbs.is_met(&z, 1e-6));
    }

    #[test]
    fn nan_never_converges() {
        let z = DVector::from_vec(vec![f64::NAN, 0.0]);
        assert!(!ConvergenceCriterion::SignedSum.is_met(&z, 1.0));
    }

    #[test]
    fn cadence_matches_default_schedule() {
        let cadence = ProgressCadence::default();
        let reported: Vec<usize> = (0..=300).filter(|&t| cadence.reports(t)).collect();
        assert_eq!(reported, vec![0, 1, 2, 3, 4, 100, 200, 300]);
        assert!(cadence.elides(5));
        assert!(!cadence.elides(6));

        let dense = ProgressCadence { head: 5, every: 5 };
        assert!(dense.reports(5));
        assert!(!dense.elides(5));
    }

    #[test]
    fn floor_policy_clamps() {
        let floor = PricePolicy::Floor { min: 0.01 };
        assert_eq!(floor.apply(-2.0), 0.01);
        assert_eq!(floor.apply(1.5), 1.5);
        assert_eq!(PricePolicy::Unclamped.apply(-2.0), -2.0);
    }
}
