//! The tâtonnement loop.

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::progress::SolveProgressEvent;
use crate::scenario::Scenario;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use wl_core::{GoodId, Real};
use wl_economy::{Economy, EconomyParams, PriceVector};

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The convergence test passed
    Converged,
    /// The iteration cap was reached first
    MaxIterations,
}

/// Terminal output of a solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// Prices at termination, numeraire last
    pub prices: PriceVector,
    /// Iteration counter at termination (number of price updates applied)
    pub iterations: usize,
    /// Signed sum of non-numeraire excess demands at termination
    pub aggregate_excess: Real,
    /// Non-numeraire excess demands at termination
    pub excess_demands: Vec<Real>,
    pub reason: StopReason,
}

impl Equilibrium {
    pub fn converged(&self) -> bool {
        self.reason == StopReason::Converged
    }

    /// Number of excess-demand evaluations, the terminal one included.
    pub fn passes(&self) -> usize {
        self.iterations + 1
    }
}

/// Mutable state of one equilibrium search.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverState {
    pub prices: PriceVector,
    pub iteration: usize,
}

impl SolverState {
    fn start(economy: &Economy) -> Self {
        Self {
            prices: economy.initial_prices().clone(),
            iteration: 0,
        }
    }
}

/// Finds market-clearing prices for a generated economy.
#[derive(Clone, Debug)]
pub struct EquilibriumSolver {
    economy: Economy,
    config: SolverConfig,
    state: SolverState,
}

impl EquilibriumSolver {
    /// Validate the parameters, generate the economy and start at its initial prices.
    pub fn new(params: EconomyParams, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        let economy = Economy::generate(params)?;
        Self::from_economy(economy, config)
    }

    pub fn from_economy(economy: Economy, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        let state = SolverState::start(&economy);
        Ok(Self {
            economy,
            config,
            state,
        })
    }

    pub fn from_scenario(scenario: &Scenario) -> SolverResult<Self> {
        Self::new(scenario.economy, scenario.solver)
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn prices(&self) -> &PriceVector {
        &self.state.prices
    }

    /// Per-agent demand for `good` at the current prices.
    pub fn demand(&self, good: GoodId) -> SolverResult<DVector<Real>> {
        Ok(self.economy.demand(&self.state.prices, good)?)
    }

    /// Excess demand for `good` at the current prices.
    pub fn excess_demand(&self, good: GoodId) -> SolverResult<Real> {
        Ok(self.economy.excess_demand(&self.state.prices, good)?)
    }

    /// Excess demands of all non-numeraire goods at the current prices.
    pub fn excess_demands(&self) -> SolverResult<DVector<Real>> {
        Ok(self.economy.excess_demands(&self.state.prices)?)
    }

    /// Return to the economy's initial prices and iteration 0.
    pub fn reset(&mut self) {
        self.state = SolverState::start(&self.economy);
    }

    /// One unconditional tâtonnement step from the current state.
    ///
    /// Returns the excess demands that drove the update.
    pub fn step(&mut self) -> SolverResult<DVector<Real>> {
        let excess = self.excess_demands()?;
        self.update_prices(&excess)?;
        self.state.iteration += 1;
        Ok(excess)
    }

    pub fn solve(&mut self) -> SolverResult<Equilibrium> {
        self.solve_with_progress(&mut |_| {})
    }

    /// Run the loop from the initial prices, reporting progress to `progress_cb`.
    ///
    /// Non-finite excess demand is not an error: it propagates through the
    /// prices until the iteration cap stops the loop.
    pub fn solve_with_progress(
        &mut self,
        progress_cb: &mut dyn FnMut(SolveProgressEvent),
    ) -> SolverResult<Equilibrium> {
        self.reset();
        let cfg = self.config;
        let mut warned_non_finite = false;

        loop {
            let t = self.state.iteration;
            let excess = self.excess_demands()?;
            let aggregate_excess = excess.sum();

            if !aggregate_excess.is_finite() && !warned_non_finite {
                tracing::warn!(
                    iteration = t,
                    prices = ?self.state.prices.as_slice(),
                    "aggregate excess demand is not finite"
                );
                warned_non_finite = true;
            }

            let converged = cfg.criterion.is_met(&excess, cfg.eps);
            if converged || t >= cfg.max_iterations {
                let reason = if converged {
                    StopReason::Converged
                } else {
                    StopReason::MaxIterations
                };
                progress_cb(SolveProgressEvent::Finished {
                    iteration: t,
                    prices: self.state.prices.clone(),
                    aggregate_excess,
                    reason,
                });
                tracing::debug!(iterations = t, aggregate_excess, ?reason, "tatonnement stopped");

                return Ok(Equilibrium {
                    prices: self.state.prices.clone(),
                    iterations: t,
                    aggregate_excess,
                    excess_demands: excess.iter().copied().collect(),
                    reason,
                });
            }

            self.update_prices(&excess)?;

            if cfg.cadence.reports(t) {
                progress_cb(SolveProgressEvent::Iteration {
                    iteration: t,
                    prices: self.state.prices.clone(),
                    aggregate_excess,
                });
            } else if cfg.cadence.elides(t) {
                progress_cb(SolveProgressEvent::Elided { iteration: t });
            }
            tracing::trace!(iteration = t, aggregate_excess, "price update");

            self.state.iteration += 1;
        }
    }

    /// Synchronous update `p_i += kappa * Z_i / N` from one excess-demand vector.
    fn update_prices(&mut self, excess: &DVector<Real>) -> SolverResult<()> {
        let prices = self.state.prices.non_numeraire_mut();
        if excess.len() != prices.len() {
            return Err(SolverError::InvalidParameter {
                what: format!(
                    "excess demand has {} entries, expected {}",
                    excess.len(),
                    prices.len()
                ),
            });
        }

        let kappa = self.config.kappa;
        let n = self.economy.num_agents() as Real;
        let policy = self.config.price_policy;
        for (p, z) in prices.iter_mut().zip(excess.iter()) {
            *p = policy.apply(*p + kappa * z / n);
        }
        Ok(())
    }
}
