//! Random draws for economy construction.
//!
//! Every function takes the caller's RNG so one seeded stream can feed the
//! whole construction in a fixed order:
//! covariance factor, preference shares, endowments, initial prices.

use crate::error::{EconomyError, EconomyResult};
use crate::prices::PriceVector;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Exp, StandardNormal};
use wl_core::Real;

/// Lower triangular factor with unit diagonal and sub-diagonal entries
/// uniform in `[-1, 1]`, filled row by row.
///
/// The covariance of the preference draws is `L^T L`.
pub fn draw_sigma_lower<R: Rng>(rng: &mut R, num_goods: usize) -> DMatrix<Real> {
    let mut lower = DMatrix::identity(num_goods, num_goods);
    for i in 1..num_goods {
        for j in 0..i {
            lower[(i, j)] = rng.gen_range(-1.0..=1.0);
        }
    }
    lower
}

/// Covariance matrix `L^T L` for a factor from [`draw_sigma_lower`].
pub fn sigma_from_lower(lower: &DMatrix<Real>) -> DMatrix<Real> {
    lower.tr_mul(lower)
}

/// Log-normal preference shares, one row per agent, each row summing to 1.
///
/// Each row is `exp(L^T z)` with `z ~ N(0, I)`, so the log-shares have
/// covariance `L^T L`.
pub fn draw_shares<R: Rng>(
    rng: &mut R,
    sigma_lower: &DMatrix<Real>,
    num_agents: usize,
) -> DMatrix<Real> {
    let num_goods = sigma_lower.ncols();
    let mut shares = DMatrix::zeros(num_agents, num_goods);

    for n in 0..num_agents {
        let z: DVector<Real> = DVector::from_iterator(
            num_goods,
            (0..num_goods).map(|_| StandardNormal.sample(&mut *rng)),
        );
        let x: DVector<Real> = sigma_lower.tr_mul(&z);

        // Shift by the row max before exponentiating; normalization cancels it.
        let shift = x.max();
        let weights = x.map(|v| (v - shift).exp());
        let total = weights.sum();
        for j in 0..num_goods {
            shares[(n, j)] = weights[j] / total;
        }
    }
    shares
}

/// Endowments, one column per good; column `j` is exponential with mean `betas[j]`.
pub fn draw_endowments<R: Rng>(
    rng: &mut R,
    betas: &DVector<Real>,
    num_agents: usize,
) -> EconomyResult<DMatrix<Real>> {
    let mut endowments = DMatrix::zeros(num_agents, betas.len());
    for (j, &beta) in betas.iter().enumerate() {
        let dist = Exp::new(1.0 / beta).map_err(|e| EconomyError::Sampling {
            what: format!("exponential with mean {beta}: {e}"),
        })?;
        for n in 0..num_agents {
            endowments[(n, j)] = dist.sample(&mut *rng);
        }
    }
    Ok(endowments)
}

/// Initial prices: `J-1` uniform draws in `[1, 2)` followed by the numeraire.
pub fn draw_initial_prices<R: Rng>(
    rng: &mut R,
    num_goods: usize,
) -> EconomyResult<PriceVector> {
    let draws: Vec<Real> = (0..num_goods.saturating_sub(1))
        .map(|_| rng.gen_range(1.0..2.0))
        .collect();
    PriceVector::with_numeraire(draws)
}
