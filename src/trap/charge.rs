//! Superposition of pairwise capacitive coupling.
//!
//! The signs encode the electrode topology: electrode 1 at (0, 0),
//! electrode 3 at (d, d), numbered clockwise.

use super::drive::VoltageDifferences;
use super::geometry::Capacitance;

/// Induced charge per unit length on electrodes 1..4.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElectrodeCharges {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl ElectrodeCharges {
    /// Net charge; the pairwise model is not neutral and leaves c_next·(v3 − v1).
    pub fn total(&self) -> f64 {
        self.q1 + self.q2 + self.q3 + self.q4
    }
}

pub fn solve_charges(v: VoltageDifferences, cap: &Capacitance) -> ElectrodeCharges {
    let Capacitance { c_next, c_diag } = *cap;
    let VoltageDifferences { v1, v2, v3 } = v;
    ElectrodeCharges {
        q1: c_next * v1 + c_diag * (v1 + v2) + c_next * (v1 + v2 + v3),
        q2: c_next * v2 + c_diag * (v2 + v3) - c_next * v1,
        q3: c_next * v3 - c_diag * (v1 + v2) - c_next * v2,
        q4: -c_next * (v1 + v2 + v3) - c_diag * (v2 + v3) - c_next * v1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: Capacitance = Capacitance { c_next: 2.0, c_diag: 3.0 };

    #[test]
    fn zero_voltages_give_zero_charges() {
        let q = solve_charges(VoltageDifferences::default(), &CAP);
        assert_eq!(q, ElectrodeCharges::default());
    }

    #[test]
    fn matches_hand_expansion() {
        let v = VoltageDifferences { v1: 1.0, v2: 2.0, v3: 4.0 };
        let q = solve_charges(v, &CAP);
        assert_eq!(q.q1, 2.0 * 1.0 + 3.0 * 3.0 + 2.0 * 7.0);
        assert_eq!(q.q2, 2.0 * 2.0 + 3.0 * 6.0 - 2.0 * 1.0);
        assert_eq!(q.q3, 2.0 * 4.0 - 3.0 * 3.0 - 2.0 * 2.0);
        assert_eq!(q.q4, -2.0 * 7.0 - 3.0 * 6.0 - 2.0 * 1.0);
    }

    #[test]
    fn net_charge_depends_only_on_outer_differences() {
        let q = solve_charges(VoltageDifferences { v1: 1.0, v2: 2.0, v3: 4.0 }, &CAP);
        assert_eq!(q.total(), 2.0 * (4.0 - 1.0));

        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..100 {
            let v = VoltageDifferences { v1: rng.f64() - 0.5, v2: rng.f64() - 0.5, v3: rng.f64() - 0.5 };
            let total = solve_charges(v, &CAP).total();
            assert!((total - CAP.c_next * (v.v3 - v.v1)).abs() < 1e-12, "{:?} -> {}", v, total);
        }
    }

    #[test]
    fn solver_is_linear() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..100 {
            let a = VoltageDifferences { v1: rng.f64() - 0.5, v2: rng.f64() - 0.5, v3: rng.f64() - 0.5 };
            let b = VoltageDifferences { v1: rng.f64() - 0.5, v2: rng.f64() - 0.5, v3: rng.f64() - 0.5 };
            let sum = VoltageDifferences { v1: a.v1 + b.v1, v2: a.v2 + b.v2, v3: a.v3 + b.v3 };
            let (qa, qb, qs) = (solve_charges(a, &CAP), solve_charges(b, &CAP), solve_charges(sum, &CAP));
            assert!((qa.q1 + qb.q1 - qs.q1).abs() < 1e-12);
            assert!((qa.q2 + qb.q2 - qs.q2).abs() < 1e-12);
            assert!((qa.q3 + qb.q3 - qs.q3).abs() < 1e-12);
            assert!((qa.q4 + qb.q4 - qs.q4).abs() < 1e-12);
        }
    }
}
