//! Scalar multiplication kernels over any [`GroupElement`].

use num_bigint::BigUint;

use crate::arith::group::GroupElement;

/// Left-to-right binary double-and-add.
pub(crate) fn double_and_add<G: GroupElement>(base: &G, scalar: &BigUint) -> G {
    let mut acc = G::identity();
    for i in (0..scalar.bits()).rev() {
        acc = acc.double();
        if scalar.bit(i) {
            acc = acc.combine(base);
        }
    }
    acc
}

/// `Σ scalars[i]·bases[i]` with one shared doubling chain.
///
/// A `2^m` table of subset sums is built up front; each bit position then
/// costs one doubling and at most one addition.
pub(crate) fn joint_multiexp<G: GroupElement>(bases: &[G], scalars: &[BigUint]) -> G {
    debug_assert_eq!(bases.len(), scalars.len());
    let mut table: Vec<G> = Vec::with_capacity(1 << bases.len());
    table.push(G::identity());
    for mask in 1usize..(1 << bases.len()) {
        let low = mask.trailing_zeros() as usize;
        let entry = table[mask & (mask - 1)].combine(&bases[low]);
        table.push(entry);
    }

    let bits = scalars.iter().map(BigUint::bits).max().unwrap_or(0);
    let mut acc = G::identity();
    for i in (0..bits).rev() {
        acc = acc.double();
        let mask = scalars
            .iter()
            .enumerate()
            .filter(|(_, s)| s.bit(i))
            .fold(0usize, |mask, (j, _)| mask | (1 << j));
        if mask != 0 {
            acc = acc.combine(&table[mask]);
        }
    }
    acc
}
