//! Economy construction parameters.

use crate::error::{EconomyError, EconomyResult};
use serde::{Deserialize, Serialize};
use wl_core::Real;

/// Mean endowment of the first good.
pub const BETA_LOW: Real = 1.0;
/// Mean endowment of the last good.
pub const BETA_HIGH: Real = 1.3;

/// Size and seed of a generated economy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyParams {
    /// Number of agents (N)
    pub num_agents: usize,
    /// Number of goods (J), the last one being the numeraire
    pub num_goods: usize,
    /// Seed for the single random stream
    pub seed: u64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            num_agents: 10_000,
            num_goods: 5,
            seed: 1986,
        }
    }
}

impl EconomyParams {
    pub fn new(num_agents: usize, num_goods: usize, seed: u64) -> Self {
        Self {
            num_agents,
            num_goods,
            seed,
        }
    }

    pub fn validate(&self) -> EconomyResult<()> {
        if self.num_agents == 0 {
            return Err(EconomyError::InvalidParameter {
                what: "num_agents must be at least 1",
            });
        }
        if self.num_goods < 2 {
            return Err(EconomyError::InvalidParameter {
                what: "num_goods must be at least 2",
            });
        }
        if u32::try_from(self.num_goods).is_err() {
            return Err(EconomyError::InvalidParameter {
                what: "num_goods does not fit a good id",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(EconomyParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(
            EconomyParams::new(0, 3, 1).validate(),
            Err(EconomyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            EconomyParams::new(10, 1, 1).validate(),
            Err(EconomyError::InvalidParameter { .. })
        ));
        assert!(EconomyParams::new(1, 2, 1).validate().is_ok());
    }
}
