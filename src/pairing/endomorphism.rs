//! Efficient endomorphisms and the decomposed scalar multiplications built on
//! them.
//!
//! | group | map | eigenvalue | sub-scalars |
//! |-------|-----|------------|-------------|
//! | G1 | `(x, y) ↦ (βx, y)` | curve specific | 2 (GLV) |
//! | G2 | `ψ` (untwist-Frobenius-twist) | `p mod r` | 4 (Galbraith-Scott) |
//! | GT | `f ↦ f^p` | `p mod r` | 4 (Galbraith-Scott) |

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use num_bigint::BigUint;

use super::multiexp::joint_multiexp;
use crate::arith::curve::{G1Affine, G1Projective, G2Affine, G2Projective, PairingCurve};
use crate::arith::group::{GroupElement, Gt};
use crate::arith::lattice::{Lattice, balance};

/// `ψ(x, y) = (x^p · γ_x, y^p · γ_y)`; acts on group 2 as `[p mod r]`.
pub(crate) fn psi<C: PairingCurve>(q: &G2Affine<C>) -> G2Affine<C> {
    if q.is_zero() {
        return *q;
    }
    let constants = C::constants();
    let mut x = q.x;
    x.frobenius_map_in_place(1);
    let mut y = q.y;
    y.frobenius_map_in_place(1);
    G2Affine::<C>::new_unchecked(x * constants.psi_x, y * constants.psi_y)
}

/// `φ(x, y) = (βx, y)`; acts on group 1 as the GLV eigenvalue.
pub(crate) fn phi<C: PairingCurve>(p: &G1Affine<C>) -> G1Affine<C> {
    if p.is_zero() {
        return *p;
    }
    G1Affine::<C>::new_unchecked(p.x * C::constants().beta, p.y)
}

/// Decomposes `e`, flips bases whose sub-scalar is shorter when negated and
/// runs one joint multi-exponentiation.
fn decomposed<G: GroupElement>(lattice: &Lattice, order: &BigUint, e: &BigUint, aux: Vec<G>) -> G {
    let (bases, scalars): (Vec<G>, Vec<BigUint>) = lattice
        .decompose(e)
        .iter()
        .zip(aux)
        .map(|(part, base)| {
            let (magnitude, negate) = balance(part, order);
            let base = if negate { base.negate() } else { base };
            (base, magnitude)
        })
        .unzip();
    joint_multiexp(&bases, &scalars)
}

/// Images of `seed` under `map^0 .. map^(count-1)`.
fn orbit<T: Clone>(seed: T, count: usize, map: impl Fn(&T) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(count);
    out.push(seed);
    while out.len() < count {
        let next = map(&out[out.len() - 1]);
        out.push(next);
    }
    out
}

pub(crate) fn glv_mul<C: PairingCurve>(p: &G1Projective<C>, e: &BigUint) -> G1Projective<C> {
    let constants = C::constants();
    let aux: Vec<G1Projective<C>> = orbit(p.into_affine(), constants.g1_lattice.dimension(), phi::<C>)
        .into_iter()
        .map(|a| a.into_group())
        .collect();
    decomposed(&constants.g1_lattice, &constants.order, e, aux)
}

pub(crate) fn gs_mul<C: PairingCurve>(q: &G2Projective<C>, e: &BigUint) -> G2Projective<C> {
    let constants = C::constants();
    let aux: Vec<G2Projective<C>> = orbit(q.into_affine(), constants.g2_lattice.dimension(), psi::<C>)
        .into_iter()
        .map(|a| a.into_group())
        .collect();
    decomposed(&constants.g2_lattice, &constants.order, e, aux)
}

pub(crate) fn gs_pow<C: PairingCurve>(g: &Gt<C>, e: &BigUint) -> Gt<C> {
    let constants = C::constants();
    let aux = orbit(*g, constants.g2_lattice.dimension(), |f| f.frobenius(1));
    decomposed(&constants.g2_lattice, &constants.order, e, aux)
}
