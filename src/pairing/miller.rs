//! Optimal-ate Miller loop over any number of `(Q, P)` pairs.
//!
//! All pairs share one accumulator `f`, so a product of `k` pairings costs a
//! single run of squarings. `ate` and `ate2` in the engine are the `k = 1`
//! and `k = 2` cases.

use ark_ec::AffineRepr;
use ark_ff::{Field, One};

use super::endomorphism::psi;
use super::line::{self, LineStep};
use crate::arith::curve::{CurveFamily, Fq12, G1Affine, G2Affine, PairingCurve};

struct PairState<'a, C: PairingCurve> {
    q: &'a G2Affine<C>,
    neg_q: G2Affine<C>,
    p: &'a G1Affine<C>,
    acc: G2Affine<C>,
}

impl<C: PairingCurve> PairState<'_, C> {
    fn step(&mut self, step: LineStep<'_, C>, f: &mut Fq12<C>) {
        if let Some(value) = line::evaluate(&mut self.acc, step, self.p) {
            value.multiply_into(f);
        }
    }
}

/// Raw Miller loop output `Π f_{n,Q_i}(P_i)` (before final exponentiation).
///
/// Pairs with an identity in either slot contribute nothing, so the result
/// is one exactly when every pair is degenerate.
pub(crate) fn multi_miller_loop<C: PairingCurve>(pairs: &[(G2Affine<C>, G1Affine<C>)]) -> Fq12<C> {
    let constants = C::constants();
    let mut states: Vec<PairState<'_, C>> = pairs
        .iter()
        .filter(|(q, p)| !q.is_zero() && !p.is_zero())
        .map(|(q, p)| PairState {
            q,
            neg_q: -*q,
            p,
            acc: *q,
        })
        .collect();

    let mut f = Fq12::<C>::one();
    if states.is_empty() {
        return f;
    }

    for &digit in &constants.miller_digits {
        f.square_in_place();
        for state in states.iter_mut() {
            state.step(LineStep::Double, &mut f);
        }
        match digit {
            1 => {
                for state in states.iter_mut() {
                    let q = state.q;
                    state.step(LineStep::Add(q), &mut f);
                }
            }
            -1 => {
                for state in states.iter_mut() {
                    let neg_q = state.neg_q;
                    state.step(LineStep::Add(&neg_q), &mut f);
                }
            }
            _ => {}
        }
    }

    match C::FAMILY {
        CurveFamily::Bn => {
            if C::PARAMETER_IS_NEGATIVE {
                f.conjugate_in_place();
                for state in states.iter_mut() {
                    state.acc = -state.acc;
                }
            }
            for state in states.iter_mut() {
                let k1 = psi::<C>(state.q);
                state.step(LineStep::Add(&k1), &mut f);
                let k2 = -psi::<C>(&k1);
                state.step(LineStep::Add(&k2), &mut f);
            }
        }
        CurveFamily::Bls => {
            if C::PARAMETER_IS_NEGATIVE {
                f.conjugate_in_place();
            }
        }
    }
    f
}
