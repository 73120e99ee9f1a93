//! 2D field of the four electrodes, each treated as a line charge on a
//! corner of the `d × d` square.

use ultraviolet::DVec2;

use super::charge::ElectrodeCharges;
use crate::units::LINE_CHARGE_NORM;

/// Electric field (V/m) at `pos` produced by `charges` on a trap of spacing `d`.
///
/// Each corner contributes `q / |pos − corner|²` oriented by the lateral
/// offset to that corner, and the sum is normalised by 2π·ε0.
///
/// Precondition (unchecked): `pos` must not coincide with an electrode
/// corner, where the contribution is a division by zero. The integrator's
/// confinement check keeps the particle at least one electrode radius away
/// from every wall, and non-finite results are reported as divergence.
#[inline]
pub fn field_at(pos: DVec2, charges: &ElectrodeCharges, d: f64) -> DVec2 {
    let DVec2 { x, y } = pos;
    let ElectrodeCharges { q1, q2, q3, q4 } = *charges;

    let x_sq = x * x;
    let y_sq = y * y;
    let x_inv_sq = (d - x) * (d - x);
    let y_inv_sq = (d - y) * (d - y);

    let w1 = q1 / (x_sq + y_sq);
    let w2 = q2 / (x_inv_sq + y_sq);
    let w3 = q3 / (x_inv_sq + y_inv_sq);
    let w4 = q4 / (x_sq + y_inv_sq);

    let ex = w1 * y + w2 * y + w3 * (y - d) + w4 * (y - d);
    let ey = w1 * (-x) + w2 * (d - x) + w3 * (d - x) + w4 * (-x);

    DVec2::new(ex, ey) / LINE_CHARGE_NORM
}
