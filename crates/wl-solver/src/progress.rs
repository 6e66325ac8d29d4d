//! Progress reporting for the tâtonnement loop.

use crate::tatonnement::StopReason;
use wl_core::Real;
use wl_economy::PriceVector;

/// Events emitted by [`crate::EquilibriumSolver::solve_with_progress`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveProgressEvent {
    /// Prices after the update of `iteration`, with the aggregate excess
    /// demand that drove the update.
    Iteration {
        iteration: usize,
        prices: PriceVector,
        aggregate_excess: Real,
    },
    /// Marks the point where per-iteration reporting thins out.
    Elided { iteration: usize },
    /// Terminal iteration; always emitted exactly once.
    Finished {
        iteration: usize,
        prices: PriceVector,
        aggregate_excess: Real,
        reason: StopReason,
    },
}

impl SolveProgressEvent {
    pub fn iteration(&self) -> usize {
        match self {
            SolveProgressEvent::Iteration { iteration, .. }
            | SolveProgressEvent::Elided { iteration }
            | SolveProgressEvent::Finished { iteration, .. } => *iteration,
        }
    }
}
