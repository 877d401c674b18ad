//! Curve descriptions consumed by the pairing engine.
//!
//! A [`PairingCurve`] names the arkworks field tower and source groups of a
//! pairing-friendly curve together with the *data* the generic engine needs:
//! curve family, twist type, the signed curve parameter `u`, the final
//! exponentiation chain and the decomposition lattices. The engine contains
//! no per-curve code paths beyond what this data selects.
//!
//! Derived values (group order, Miller loop digits, twist Frobenius
//! constants, lattice reductions) are computed once per curve and cached in a
//! [`CurveConstants`].

use core::fmt::Debug;

use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ff::{Field, Fp12, Fp12Config, Fp2, Fp2Config, Fp6, Fp6Config, PrimeField};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;

use crate::arith::lattice::{Lattice, eval_poly};
use crate::config::CurveId;

#[cfg(feature = "bls12_381")]
mod bls12_381;
#[cfg(feature = "bls12_381")]
pub use bls12_381::Bls12_381Curve;

#[cfg(feature = "bn254")]
mod bn254;
#[cfg(feature = "bn254")]
pub use bn254::Bn254Curve;

/// Degree-2 extension of the base field.
pub type Fq2<C> = Fp2<<C as PairingCurve>::Fp2Params>;
/// Degree-6 extension, `Fq2[v]/(v^3 - ξ)`.
pub type Fq6<C> = Fp6<<C as PairingCurve>::Fp6Params>;
/// Degree-12 extension, `Fq6[w]/(w^2 - v)`; the pairing lands here.
pub type Fq12<C> = Fp12<<C as PairingCurve>::Fp12Params>;

pub type G1Affine<C> = Affine<<C as PairingCurve>::G1Config>;
pub type G1Projective<C> = Projective<<C as PairingCurve>::G1Config>;
pub type G2Affine<C> = Affine<<C as PairingCurve>::G2Config>;
pub type G2Projective<C> = Projective<<C as PairingCurve>::G2Config>;

/// Scalar field of both source groups.
pub type Scalar<C> = <C as PairingCurve>::Fr;

/// Pairing-friendly curve families with an implemented final exponentiation
/// chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CurveFamily {
    /// Barreto-Naehrig: loop over `6u + 2`, Frobenius fix-up after the loop.
    Bn,
    /// Barreto-Lynn-Scott: loop over `u`, no fix-up.
    Bls,
}

/// Sextic twist type of the group-2 curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TwistType {
    /// Divisive twist `y^2 = x^3 + b/ξ`.
    D,
    /// Multiplicative twist `y^2 = x^3 + b·ξ`.
    M,
}

/// Static description of a pairing-friendly curve.
pub trait PairingCurve: Send + Sync + Debug + Copy + Eq + Default + Sized + 'static {
    /// Base prime field.
    type Fq: PrimeField;
    /// Scalar field (prime group order `r`).
    type Fr: PrimeField;
    type Fp2Params: Fp2Config<Fp = Self::Fq>;
    type Fp6Params: Fp6Config<Fp2Config = Self::Fp2Params>;
    type Fp12Params: Fp12Config<Fp6Config = Self::Fp6Params>;
    type G1Config: SWCurveConfig<BaseField = Self::Fq, ScalarField = Self::Fr>;
    type G2Config: SWCurveConfig<BaseField = Fp2<Self::Fp2Params>, ScalarField = Self::Fr>;

    const ID: CurveId;
    const FAMILY: CurveFamily;
    const TWIST: TwistType;
    /// `|u|`.
    const PARAMETER: u64;
    const PARAMETER_IS_NEGATIVE: bool;

    /// Hard part of the final exponentiation, one row per Frobenius power:
    /// `f^hard = Π_i frob_i(Π_j (f^(u^j))^(row_i[j]))`.
    const HARD_PART: &'static [&'static [i64]];

    /// Group-1 endomorphism eigenvalue as a polynomial in `u`.
    const G1_EIGENVALUE: &'static [i64];
    /// Reduced basis for the group-1 GLV lattice, entries as polynomials in `u`.
    const G1_BASIS: &'static [&'static [&'static [i64]]];
    /// Reduced basis for the Galbraith-Scott lattice shared by group 2 and
    /// the target group (eigenvalue `p mod r`).
    const G2_BASIS: &'static [&'static [&'static [i64]]];

    /// Cube root of unity `β` with `(x, y) ↦ (βx, y)` acting as
    /// multiplication by the group-1 eigenvalue.
    fn endomorphism_coefficient() -> Self::Fq;

    /// Cached derived constants.
    fn constants() -> &'static CurveConstants<Self>;
}

/// Values derived from a [`PairingCurve`] description.
#[derive(Clone, Debug)]
pub struct CurveConstants<C: PairingCurve> {
    /// Prime order `r` of the source and target groups.
    pub order: BigUint,
    /// Base field characteristic `p`.
    pub modulus: BigUint,
    /// Signed curve parameter `u`.
    pub parameter: BigInt,
    /// Miller loop scalar: `|u|` (BLS) or `|6u + 2|` (BN).
    pub loop_count: BigUint,
    /// Signed digits `bit_i(3n) - bit_i(n)`, most significant first.
    pub miller_digits: Vec<i8>,
    /// Twist Frobenius coefficients: `ψ(x, y) = (x^p · psi_x, y^p · psi_y)`.
    pub psi_x: Fq2<C>,
    pub psi_y: Fq2<C>,
    pub beta: C::Fq,
    pub g1_lattice: Lattice,
    pub g2_lattice: Lattice,
}

impl<C: PairingCurve> CurveConstants<C> {
    pub(crate) fn derive() -> Self {
        let order: BigUint = C::Fr::MODULUS.into();
        let modulus: BigUint = C::Fq::MODULUS.into();
        let magnitude = BigInt::from(C::PARAMETER);
        let parameter = if C::PARAMETER_IS_NEGATIVE {
            -magnitude
        } else {
            magnitude
        };

        let loop_count = match C::FAMILY {
            CurveFamily::Bls => parameter.magnitude().clone(),
            CurveFamily::Bn => (&parameter * BigInt::from(6) + BigInt::from(2)).magnitude().clone(),
        };
        let miller_digits = signed_digits(&loop_count);

        // γ^-1 = ξ^((p^2 - 1) - e) keeps the derivation free of fallible inversions.
        let xi = <C::Fp6Params as Fp6Config>::NONRESIDUE;
        let p_minus_one = &modulus - BigUint::one();
        let group_exponent = &modulus * &modulus - BigUint::one();
        let (ex, ey) = (&p_minus_one / 3u32, &p_minus_one / 2u32);
        let (ex, ey) = match C::TWIST {
            TwistType::D => (ex, ey),
            TwistType::M => (&group_exponent - ex, &group_exponent - ey),
        };
        let psi_x = xi.pow(ex.to_u64_digits());
        let psi_y = xi.pow(ey.to_u64_digits());

        let signed_order = BigInt::from(order.clone());
        let g1_eigenvalue = eval_poly(C::G1_EIGENVALUE, &parameter)
            .mod_floor(&signed_order)
            .magnitude()
            .clone();
        let frobenius_eigenvalue = &modulus % &order;

        Self {
            g1_lattice: Lattice::from_polynomials(C::G1_BASIS, &parameter, g1_eigenvalue),
            g2_lattice: Lattice::from_polynomials(C::G2_BASIS, &parameter, frobenius_eigenvalue),
            beta: C::endomorphism_coefficient(),
            order,
            modulus,
            parameter,
            loop_count,
            miller_digits,
            psi_x,
            psi_y,
        }
    }
}

/// NAF-like signed digits of `n` read off `3n`, skipping the leading digit
/// and digit 0.
fn signed_digits(n: &BigUint) -> Vec<i8> {
    let triple = n * 3u32;
    let top = triple.bits();
    if top < 2 {
        return Vec::new();
    }
    (1..=top - 2)
        .rev()
        .map(|i| i8::from(triple.bit(i)) - i8::from(n.bit(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_digits_recombine() {
        for n in [5u64, 11, 0b1011_0111, 4965661367192848881] {
            let n_big = BigUint::from(n);
            let digits = signed_digits(&n_big);
            // 3n - n = 2n; the leading digit is 1 and digit 0 vanishes.
            let mut acc = BigInt::from(1);
            for d in &digits {
                acc = acc * BigInt::from(2) + BigInt::from(*d);
            }
            assert_eq!(acc, BigInt::from(n_big));
        }
    }
}
