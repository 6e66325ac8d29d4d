//! Randomly generated Cobb-Douglas exchange economies.
//!
//! An [`Economy`] holds `N` agents and `J` goods: each agent has preference
//! shares over the goods (rows summing to 1) and an endowment bundle. All
//! random fields are drawn once from a single seeded stream, so the same
//! [`EconomyParams`] always yield the same economy.
//!
//! Demand and excess demand are pure functions of a [`PriceVector`], whose
//! last entry is the numeraire fixed at 1.

pub mod economy;
pub mod error;
pub mod fingerprint;
pub mod params;
pub mod prices;
pub mod sampling;

pub use economy::Economy;
pub use error::{EconomyError, EconomyResult};
pub use fingerprint::fingerprint;
pub use params::{BETA_HIGH, BETA_LOW, EconomyParams};
pub use prices::{NUMERAIRE_PRICE, PriceVector};
