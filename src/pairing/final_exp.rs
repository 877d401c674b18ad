//! Final exponentiation `f ↦ f^((p^12 - 1)/r)`.
//!
//! The easy part `(p^6 - 1)(p^2 + 1)` is shared by every family. The hard
//! part is driven by [`PairingCurve::HARD_PART`]: powers `f^(u^j)` are
//! computed once, combined per row with small signed exponents, and each row
//! is moved into place with a Frobenius map.
//!
//! The BLS12-381 rows compute the cube of the hard part and the BN254 rows
//! compute it exactly. Results only agree with other libraries that raise to
//! the same fixed power.

use ark_ff::{CyclotomicMultSubgroup, Field, One};

use crate::arith::curve::{Fq12, PairingCurve};

/// `f^u` for the signed curve parameter; `f` must be unitary.
fn exp_by_parameter<C: PairingCurve>(f: &Fq12<C>) -> Fq12<C> {
    let mut out = f.cyclotomic_exp([C::PARAMETER]);
    if C::PARAMETER_IS_NEGATIVE {
        out.conjugate_in_place();
    }
    out
}

fn signed_power<C: PairingCurve>(f: &Fq12<C>, exponent: i64) -> Fq12<C> {
    let mut out = f.cyclotomic_exp([exponent.unsigned_abs()]);
    if exponent < 0 {
        out.conjugate_in_place();
    }
    out
}

/// Returns `None` only for `f = 0`, which no Miller loop produces.
pub(crate) fn final_exponentiation<C: PairingCurve>(f: &Fq12<C>) -> Option<Fq12<C>> {
    let inverse = f.inverse()?;

    // f^(p^6 - 1)
    let mut easy = *f;
    easy.conjugate_in_place();
    easy *= &inverse;
    // ^(p^2 + 1)
    let mut unitary = easy;
    unitary.frobenius_map_in_place(2);
    unitary *= &easy;

    let depth = C::HARD_PART.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut powers = Vec::with_capacity(depth);
    powers.push(unitary);
    for j in 1..depth {
        let next = exp_by_parameter::<C>(&powers[j - 1]);
        powers.push(next);
    }

    let mut result = Fq12::<C>::one();
    for (i, row) in C::HARD_PART.iter().enumerate() {
        let mut term = Fq12::<C>::one();
        for (power, &coefficient) in powers.iter().zip(row.iter()) {
            if coefficient != 0 {
                term *= &signed_power::<C>(power, coefficient);
            }
        }
        term.frobenius_map_in_place(i);
        result *= &term;
    }
    Some(result)
}
