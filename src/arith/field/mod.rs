//! Scalar-field helpers shared by the engine and the protocol.

use ark_ff::PrimeField;
use num_bigint::BigUint;
use rand_core::RngCore;

/// Samples a field element by reducing `MODULUS_BIT_SIZE + 128` random bits,
/// which keeps the distance from uniform below `2^-128`.
pub fn random_scalar<F: PrimeField, R: RngCore + ?Sized>(rng: &mut R) -> F {
    let byte_len = F::MODULUS_BIT_SIZE.div_ceil(8) as usize + 16;
    let mut bytes = vec![0u8; byte_len];
    rng.fill_bytes(&mut bytes);
    F::from_le_bytes_mod_order(&bytes)
}

/// Samples uniformly from `[1, r - 1]`.
pub fn random_nonzero_scalar<F: PrimeField, R: RngCore + ?Sized>(rng: &mut R) -> F {
    loop {
        let candidate = random_scalar::<F, R>(rng);
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

/// Canonical integer representative in `[0, r)`.
pub fn to_biguint<F: PrimeField>(scalar: &F) -> BigUint {
    scalar.into_bigint().into()
}
