//! Price vectors with a fixed numeraire.

use crate::error::{EconomyError, EconomyResult};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use wl_core::{GoodId, Real, WlResult};

/// Price of the numeraire good.
pub const NUMERAIRE_PRICE: Real = 1.0;

/// Prices for `J` goods; the last entry is the numeraire and stays at 1.
///
/// Only the first `J-1` entries can be mutated (see [`PriceVector::non_numeraire_mut`]).
/// Positivity is not enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Real>", into = "Vec<Real>")]
pub struct PriceVector(DVector<Real>);

impl PriceVector {
    /// Build from the `J-1` non-numeraire prices, appending the numeraire.
    pub fn with_numeraire<I>(non_numeraire: I) -> EconomyResult<Self>
    where
        I: IntoIterator<Item = Real>,
    {
        let mut prices: Vec<Real> = non_numeraire.into_iter().collect();
        if prices.is_empty() {
            return Err(EconomyError::InvalidParameter {
                what: "at least one non-numeraire price is required",
            });
        }
        prices.push(NUMERAIRE_PRICE);
        Ok(Self(DVector::from_vec(prices)))
    }

    /// Number of goods, numeraire included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn numeraire_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn get(&self, good: GoodId) -> WlResult<Real> {
        let index = good.checked("price index", self.0.len())?;
        Ok(self.0[index])
    }

    pub fn as_vector(&self) -> &DVector<Real> {
        &self.0
    }

    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    pub fn non_numeraire(&self) -> &[Real] {
        &self.0.as_slice()[..self.numeraire_index()]
    }

    /// Mutable view of the first `J-1` prices; the numeraire is not reachable.
    pub fn non_numeraire_mut(&mut self) -> &mut [Real] {
        let end = self.numeraire_index();
        &mut self.0.as_mut_slice()[..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|p| p.is_finite())
    }
}

impl TryFrom<Vec<Real>> for PriceVector {
    type Error = EconomyError;

    fn try_from(prices: Vec<Real>) -> Result<Self, Self::Error> {
        match prices.split_last() {
            Some((&last, rest)) if !rest.is_empty() && last == NUMERAIRE_PRICE => {
                Self::with_numeraire(rest.iter().copied())
            }
            Some((_, rest)) if !rest.is_empty() => Err(EconomyError::InvalidParameter {
                what: "last price must be the numeraire (1.0)",
            }),
            _ => Err(EconomyError::InvalidParameter {
                what: "a price vector needs at least two goods",
            }),
        }
    }
}

impl From<PriceVector> for Vec<Real> {
    fn from(prices: PriceVector) -> Self {
        prices.0.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeraire_is_appended_and_protected() {
        let mut ps = PriceVector::with_numeraire([1.5, 1.25]).unwrap();
        assert_eq!(ps.as_slice(), &[1.5, 1.25, 1.0]);
        assert_eq!(ps.numeraire_index(), 2);

        for p in ps.non_numeraire_mut() {
            *p += 10.0;
        }
        assert_eq!(ps.as_slice(), &[11.5, 11.25, 1.0]);
    }

    #[test]
    fn get_checks_bounds() {
        let ps = PriceVector::with_numeraire([2.0]).unwrap();
        assert_eq!(ps.get(GoodId::from(1_usize)).unwrap(), 1.0);
        assert!(ps.get(GoodId::from(2_usize)).is_err());
    }

    #[test]
    fn try_from_requires_numeraire_last() {
        assert!(PriceVector::try_from(vec![1.2, 1.0]).is_ok());
        assert!(PriceVector::try_from(vec![1.2, 3.0]).is_err());
        assert!(PriceVector::try_from(vec![1.0]).is_err());
        assert!(PriceVector::with_numeraire(Vec::<Real>::new()).is_err());
    }
}
