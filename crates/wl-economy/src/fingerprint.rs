//! Content hash of a generated economy.

use crate::economy::Economy;
use sha2::{Digest, Sha256};

/// SHA-256 over the parameters and every generated array, as lowercase hex.
pub fn fingerprint(economy: &Economy) -> String {
    let mut hasher = Sha256::new();

    let params = economy.params();
    hasher.update((params.num_agents as u64).to_le_bytes());
    hasher.update((params.num_goods as u64).to_le_bytes());
    hasher.update(params.seed.to_le_bytes());

    for value in economy
        .alphas()
        .iter()
        .chain(economy.endowments().iter())
        .chain(economy.initial_prices().iter())
    {
        hasher.update(value.to_le_bytes());
    }

    let result = hasher.finalize();
    format!("{:x}", result)
}
