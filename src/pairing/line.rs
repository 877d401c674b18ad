//! Line functions of the Miller loop.
//!
//! The group-2 accumulator is kept in affine coordinates on the twist. A line
//! through (or tangent at) the accumulator is evaluated at a group-1 point
//! and comes back as a sparse `Fq12` element whose shape depends on the twist
//! type.

use ark_ec::AffineRepr;
use ark_ff::{AdditiveGroup, Field, Zero};
#[cfg(test)]
use ark_ff::One;

use crate::arith::curve::{Fq12, Fq2, G1Affine, G2Affine, PairingCurve, TwistType};

/// Which update the accumulator undergoes.
///
/// Doubling is an explicit variant instead of being inferred from equal
/// coordinates: an addition whose operand merely coincides with the
/// accumulator still takes the addition path (and degrades to the tangent).
#[derive(Clone, Copy, Debug)]
pub(crate) enum LineStep<'a, C: PairingCurve> {
    Double,
    Add(&'a G2Affine<C>),
}

/// Non-zero coefficients of a line value.
///
/// - D-type: `y_P + (-λ·x_P)·w + (λ·x_A - y_A)·w^3` (slots 0, 3, 4)
/// - M-type: `(λ·x_A - y_A) + (-λ·x_P)·w^2 + y_P·w^3` (slots 0, 1, 4)
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineValue<C: PairingCurve> {
    constant: Fq2<C>,
    slope_term: Fq2<C>,
    y_term: Fq2<C>,
}

impl<C: PairingCurve> LineValue<C> {
    /// `f *= line` using the tower's sparse products.
    pub(crate) fn multiply_into(&self, f: &mut Fq12<C>) {
        match C::TWIST {
            TwistType::D => f.mul_by_034(&self.y_term, &self.slope_term, &self.constant),
            TwistType::M => f.mul_by_014(&self.constant, &self.slope_term, &self.y_term),
        }
    }

    /// Dense form, used by tests.
    #[cfg(test)]
    pub(crate) fn to_dense(&self) -> Fq12<C> {
        let mut f = Fq12::<C>::one();
        self.multiply_into(&mut f);
        f
    }
}

/// Evaluates the line for `step` at `p`, replacing `acc` by `2·acc` or
/// `acc + B`.
///
/// Returns `None` when the line is vertical or passes through the identity:
/// such values lie in `Fq6` and are erased by the final exponentiation.
pub(crate) fn evaluate<C: PairingCurve>(
    acc: &mut G2Affine<C>,
    step: LineStep<'_, C>,
    p: &G1Affine<C>,
) -> Option<LineValue<C>> {
    if acc.is_zero() {
        if let LineStep::Add(b) = step {
            *acc = *b;
        }
        return None;
    }
    let (x1, y1) = (acc.x, acc.y);

    let (slope, x2) = match step {
        LineStep::Double => (tangent_slope::<C>(&x1, &y1), x1),
        LineStep::Add(b) => {
            if b.is_zero() {
                return None;
            }
            if b.x == x1 {
                if (b.y + y1).is_zero() {
                    *acc = G2Affine::<C>::identity();
                    return None;
                }
                (tangent_slope::<C>(&x1, &y1), x1)
            } else {
                let slope = (b.x - x1).inverse().map(|inv| (b.y - y1) * inv);
                (slope, b.x)
            }
        }
    };
    let Some(slope) = slope else {
        // Tangent at a 2-torsion point.
        *acc = G2Affine::<C>::identity();
        return None;
    };

    let x3 = slope.square() - x1 - x2;
    let y3 = slope * (x1 - x3) - y1;
    *acc = G2Affine::<C>::new_unchecked(x3, y3);

    let mut slope_term = slope;
    slope_term.mul_assign_by_basefield(&p.x);
    Some(LineValue {
        constant: slope * x1 - y1,
        slope_term: -slope_term,
        y_term: Fq2::<C>::from_base_prime_field(p.y),
    })
}

fn tangent_slope<C: PairingCurve>(x: &Fq2<C>, y: &Fq2<C>) -> Option<Fq2<C>> {
    let numerator = x.square() * Fq2::<C>::from(3u64);
    y.double().inverse().map(|inv| numerator * inv)
}
