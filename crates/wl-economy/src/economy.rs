//! Exchange economy with Cobb-Douglas agents.

use crate::error::{EconomyError, EconomyResult};
use crate::params::{BETA_HIGH, BETA_LOW, EconomyParams};
use crate::prices::PriceVector;
use crate::sampling;
use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wl_core::{GoodId, Real, linspace};

/// `N` agents by `J` goods, immutable after generation.
#[derive(Clone, Debug)]
pub struct Economy {
    params: EconomyParams,
    sigma: DMatrix<Real>,
    alphas: DMatrix<Real>,
    endowments: DMatrix<Real>,
    betas: DVector<Real>,
    supply: DVector<Real>,
    initial_prices: PriceVector,
}

impl Economy {
    /// Generate an economy from a single seeded stream.
    ///
    /// Draw order: covariance factor, preference shares, endowments
    /// (column by column), initial prices.
    pub fn generate(params: EconomyParams) -> EconomyResult<Self> {
        params.validate()?;
        let (n, j) = (params.num_agents, params.num_goods);
        let mut rng = StdRng::seed_from_u64(params.seed);

        let sigma_lower = sampling::draw_sigma_lower(&mut rng, j);
        let sigma = sampling::sigma_from_lower(&sigma_lower);
        let alphas = sampling::draw_shares(&mut rng, &sigma_lower, n);

        let betas = DVector::from_vec(linspace(BETA_LOW, BETA_HIGH, j));
        let endowments = sampling::draw_endowments(&mut rng, &betas, n)?;
        let initial_prices = sampling::draw_initial_prices(&mut rng, j)?;

        let supply = DVector::from_iterator(j, endowments.column_iter().map(|c| c.sum()));

        tracing::debug!(
            num_agents = n,
            num_goods = j,
            seed = params.seed,
            "generated economy"
        );

        Ok(Self {
            params,
            sigma,
            alphas,
            endowments,
            betas,
            supply,
            initial_prices,
        })
    }

    pub fn params(&self) -> &EconomyParams {
        &self.params
    }

    pub fn num_agents(&self) -> usize {
        self.params.num_agents
    }

    pub fn num_goods(&self) -> usize {
        self.params.num_goods
    }

    /// The numeraire is always the last good.
    pub fn numeraire(&self) -> GoodId {
        GoodId::from(self.params.num_goods - 1)
    }

    /// Covariance of the log preference draws.
    pub fn sigma(&self) -> &DMatrix<Real> {
        &self.sigma
    }

    /// Preference shares, `N x J`, rows summing to 1.
    pub fn alphas(&self) -> &DMatrix<Real> {
        &self.alphas
    }

    /// Endowments, `N x J`, non-negative.
    pub fn endowments(&self) -> &DMatrix<Real> {
        &self.endowments
    }

    /// Mean endowment per good.
    pub fn betas(&self) -> &DVector<Real> {
        &self.betas
    }

    pub fn initial_prices(&self) -> &PriceVector {
        &self.initial_prices
    }

    /// Aggregate endowment of every good.
    pub fn aggregate_supply(&self) -> &DVector<Real> {
        &self.supply
    }

    pub fn supply(&self, good: GoodId) -> EconomyResult<Real> {
        let index = good.checked("good", self.num_goods())?;
        Ok(self.supply[index])
    }

    /// Value of every agent's endowment bundle: `income_n = sum_j p_j * e_nj`.
    pub fn incomes(&self, prices: &PriceVector) -> EconomyResult<DVector<Real>> {
        self.check_prices(prices)?;
        Ok(&self.endowments * prices.as_vector())
    }

    /// Per-agent Cobb-Douglas demand for `good`: `alpha_n,good * income_n / p_good`.
    pub fn demand(&self, prices: &PriceVector, good: GoodId) -> EconomyResult<DVector<Real>> {
        let index = good.checked("good", self.num_goods())?;
        let incomes = self.incomes(prices)?;
        Ok(self.demand_with_incomes(&incomes, prices, index))
    }

    /// Aggregate demand minus aggregate supply of `good`.
    pub fn excess_demand(&self, prices: &PriceVector, good: GoodId) -> EconomyResult<Real> {
        let index = good.checked("good", self.num_goods())?;
        let incomes = self.incomes(prices)?;
        Ok(self.excess_with_incomes(&incomes, prices, index))
    }

    /// Excess demands of the `J-1` non-numeraire goods, computed from the same prices.
    pub fn excess_demands(&self, prices: &PriceVector) -> EconomyResult<DVector<Real>> {
        let incomes = self.incomes(prices)?;
        let markets = self.num_goods() - 1;
        Ok(DVector::from_iterator(
            markets,
            (0..markets).map(|i| self.excess_with_incomes(&incomes, prices, i)),
        ))
    }

    /// Excess demand of the numeraire good.
    pub fn numeraire_excess_demand(&self, prices: &PriceVector) -> EconomyResult<Real> {
        self.excess_demand(prices, self.numeraire())
    }

    /// Value of aggregate excess demand over all goods, `sum_j p_j * Z_j`.
    ///
    /// Every agent spends exactly its income, so this is zero up to rounding
    /// at any prices (Walras' law).
    pub fn walras_residual(&self, prices: &PriceVector) -> EconomyResult<Real> {
        let incomes = self.incomes(prices)?;
        Ok((0..self.num_goods())
            .map(|j| prices.as_slice()[j] * self.excess_with_incomes(&incomes, prices, j))
            .sum())
    }

    fn demand_with_incomes(
        &self,
        incomes: &DVector<Real>,
        prices: &PriceVector,
        index: usize,
    ) -> DVector<Real> {
        let price = prices.as_slice()[index];
        self.alphas.column(index).component_mul(incomes) / price
    }

    fn excess_with_incomes(&self, incomes: &DVector<Real>, prices: &PriceVector, index: usize) -> Real {
        self.demand_with_incomes(incomes, prices, index).sum() - self.supply[index]
    }

    fn check_prices(&self, prices: &PriceVector) -> EconomyResult<()> {
        if prices.len() != self.num_goods() {
            return Err(EconomyError::PriceLength {
                expected: self.num_goods(),
                actual: prices.len(),
            });
        }
        Ok(())
    }
}
