use core::fmt;
use core::num::NonZeroU32;

use crate::error::{WlError, WlResult};

/// Compact identifier for a good.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// 0-based index as `usize`, for indexing matrices and vectors.
    pub fn as_usize(self) -> usize {
        self.index() as usize
    }

    /// Check the id against a collection length.
    pub fn checked(self, what: &'static str, len: usize) -> WlResult<usize> {
        let index = self.as_usize();
        if index < len {
            Ok(index)
        } else {
            Err(WlError::IndexOob { what, index, len })
        }
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl From<usize> for Id {
    fn from(index: usize) -> Self {
        Self::from_index(u32::try_from(index).unwrap_or(u32::MAX - 1))
    }
}

/// Domain-specific ID alias for clarity (no runtime cost).
pub type GoodId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = Id::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    #[test]
    fn checked_rejects_out_of_range() {
        let good = GoodId::from(3_usize);
        assert_eq!(good.checked("good", 4), Ok(3));
        let err = good.checked("good", 3).unwrap_err();
        assert_eq!(
            err,
            WlError::IndexOob {
                what: "good",
                index: 3,
                len: 3
            }
        );
    }
}
