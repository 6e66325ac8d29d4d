//! Tâtonnement solver for Cobb-Douglas exchange economies.
//!
//! The solver repeatedly evaluates excess demand for every non-numeraire
//! good and moves each price in proportion to its own excess demand,
//! `p_i += kappa * Z_i / N`, until the signed sum of excess demands is
//! within tolerance or the iteration cap is reached.

pub mod config;
pub mod error;
pub mod progress;
pub mod scenario;
pub mod tatonnement;

pub use config::{ConvergenceCriterion, PricePolicy, ProgressCadence, SolverConfig};
pub use error::{SolverError, SolverResult};
pub use progress::SolveProgressEvent;
pub use scenario::Scenario;
pub use tatonnement::{Equilibrium, EquilibriumSolver, SolverState, StopReason};
