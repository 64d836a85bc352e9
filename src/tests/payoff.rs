//src/tests/payoff.rs

use crate::state::{BASIS, GameParams, PayoffMatrix, dot};

#[test]
fn symmetrization_of_default_game() {
    let m = PayoffMatrix::symmetrize(&GameParams::default());

    let expected = [
        [0.5, 1.0, 0.0, 0.5],
        [0.0, 0.5, 0.5, 1.0],
        [1.0, 0.5, 0.5, 0.0],
        [0.5, 0.0, 1.0, 0.5],
    ];
    assert_eq!(m.rows(), &expected);
}

#[test]
fn symmetrization_layout_follows_bimatrix_entries() {
    // Distinct powers of two make every sum unique.
    let params = GameParams::new([1.0, 2.0, 4.0, 8.0], [16.0, 32.0, 64.0, 128.0]);
    let m = PayoffMatrix::symmetrize(&params);

    let [big_a, big_b, big_c, big_d] = params.player_one;
    let [a, b, c, d] = params.player_two;
    assert_eq!(m.get(0, 1), 0.5 * (big_a + b));
    assert_eq!(m.get(1, 2), 0.5 * (big_d + a));
    assert_eq!(m.get(2, 0), 0.5 * (big_a + c));
    assert_eq!(m.get(3, 3), 0.5 * (big_d + d));
    assert_eq!(m.get(3, 0), 0.5 * (big_c + c));
    assert_eq!(m.get(0, 3), 0.5 * (big_b + b));
}

#[test]
fn symmetrization_is_bit_identical_across_calls() {
    let params = GameParams::new([0.1, -2.7, 3.3, 1e-9], [7.5, -0.25, 1e12, -4.0]);
    let m1 = PayoffMatrix::symmetrize(&params);
    let m2 = PayoffMatrix::symmetrize(&params);

    for (r1, r2) in m1.rows().iter().zip(m2.rows().iter()) {
        for (v1, v2) in r1.iter().zip(r2.iter()) {
            assert_eq!(v1.to_bits(), v2.to_bits());
        }
    }
}

#[test]
fn basis_selects_rows_of_product() {
    let m = PayoffMatrix::symmetrize(&GameParams::default());
    let x = [0.1, 0.25, 0.45, 0.2];
    let w = m.apply(&x);

    for i in 0..4 {
        let direct: f64 = (0..4).map(|j| m.get(i, j) * x[j]).sum();
        assert!((dot(&BASIS[i], &w) - direct).abs() < 1e-15);
    }
    assert!((m.mean_payoff(&x) - dot(&x, &w)).abs() < 1e-15);
}

#[test]
fn spread_covers_all_entries() {
    let m = PayoffMatrix::symmetrize(&super::prisoners_dilemma());
    // Halved entries range over [0, 5].
    assert_eq!(m.spread(), 5.0);
}
