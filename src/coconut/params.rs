use ark_ec::PrimeGroup;
use num_bigint::BigUint;

use crate::arith::curve::{G1Projective, G2Projective, PairingCurve};
use crate::config::HashAlgorithm;

/// Public parameters shared by every authority and verifier.
///
/// # Fields
///
/// - `g1`, `g2`: fixed generators of the two source groups
/// - `capacity`: number of attributes a key signs (`q`)
/// - `hash`: digest used to derive signature bases from attributes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params<C: PairingCurve> {
    pub g1: G1Projective<C>,
    pub g2: G2Projective<C>,
    pub capacity: usize,
    pub hash: HashAlgorithm,
}

impl<C: PairingCurve> Params<C> {
    pub(crate) fn new(capacity: usize, hash: HashAlgorithm) -> Self {
        Self {
            g1: G1Projective::<C>::generator(),
            g2: G2Projective::<C>::generator(),
            capacity,
            hash,
        }
    }

    /// Prime order of the source and target groups.
    pub fn order(&self) -> &'static BigUint {
        &C::constants().order
    }
}
