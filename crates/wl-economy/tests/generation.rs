//! Generation checks on the default workshop-sized economy.

use wl_core::GoodId;
use wl_economy::{BETA_HIGH, BETA_LOW, Economy, EconomyParams, fingerprint};

#[test]
fn default_economy_invariants() {
    let econ = Economy::generate(EconomyParams::default()).unwrap();
    assert_eq!(econ.num_agents(), 10_000);
    assert_eq!(econ.num_goods(), 5);

    for row in econ.alphas().row_iter() {
        assert!((row.sum() - 1.0).abs() < 1e-9);
    }
    assert!(econ.endowments().iter().all(|&e| e >= 0.0));

    assert_eq!(econ.betas()[0], BETA_LOW);
    assert_eq!(econ.betas()[4], BETA_HIGH);
    for j in 0..5 {
        let mean = econ.endowments().column(j).mean();
        let beta = econ.betas()[j];
        assert!((mean - beta).abs() < 0.1 * beta, "good {j}: mean {mean}, beta {beta}");
    }

    let ps = econ.initial_prices();
    assert_eq!(ps.as_slice()[4], 1.0);
    assert!(ps.non_numeraire().iter().all(|p| (1.0..2.0).contains(p)));
}

#[test]
fn sigma_is_symmetric() {
    let econ = Economy::generate(EconomyParams::new(10, 6, 99)).unwrap();
    let sigma = econ.sigma();
    for i in 0..6 {
        for j in 0..6 {
            assert!((sigma[(i, j)] - sigma[(j, i)]).abs() < 1e-12);
        }
        assert!(sigma[(i, i)] >= 1.0 - 1e-12);
    }
}

#[test]
fn supply_is_column_sum() {
    let econ = Economy::generate(EconomyParams::new(25, 3, 5)).unwrap();
    for j in 0..3 {
        let supply = econ.supply(GoodId::from(j)).unwrap();
        assert_eq!(supply, econ.endowments().column(j).sum());
    }
    assert!(econ.supply(GoodId::from(3_usize)).is_err());
}

#[test]
fn fingerprint_tracks_parameters() {
    let a = Economy::generate(EconomyParams::new(25, 3, 5)).unwrap();
    let b = Economy::generate(EconomyParams::new(26, 3, 5)).unwrap();
    assert_ne!(fingerprint(&a), fingerprint(&b));
}
