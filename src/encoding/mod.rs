//! Attribute encoding: strings to scalars and to group-1 points.
//!
//! Both maps share one hash step. The digest is fitted into a buffer as wide
//! as the base field modulus (48 bytes on BLS12-381, 32 on BN254):
//!
//! - a shorter digest is right-aligned, the high-order bytes zero-filled;
//! - a digest at least as wide keeps its leading `width` bytes.
//!
//! The buffer is then read as a big-endian integer.

use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use sha2::{Digest, Sha256, Sha384, Sha512};
use tracing::{instrument, trace};

use crate::arith::curve::{G1Affine, G1Projective, PairingCurve, Scalar};
use crate::config::HashAlgorithm;
use crate::errors::Error;

/// Bounded number of x-coordinates tried before giving up on a point.
const MAX_POINT_ATTEMPTS: usize = 256;

fn digest(alg: HashAlgorithm, message: &[u8]) -> Vec<u8> {
    match alg {
        HashAlgorithm::Sha256 => Sha256::digest(message).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(message).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(message).to_vec(),
        HashAlgorithm::Blake3 => blake3::hash(message).as_bytes().to_vec(),
    }
}

/// Byte width of the base field modulus of `C`.
pub fn modulus_width<C: PairingCurve>() -> usize {
    C::Fq::MODULUS_BIT_SIZE.div_ceil(8) as usize
}

/// Hashes `message` and fits the digest into a modulus-width buffer.
pub fn aligned_digest<C: PairingCurve>(alg: HashAlgorithm, message: &[u8]) -> Result<Vec<u8>, Error> {
    let hash = digest(alg, message);
    if hash.is_empty() {
        return Err(Error::HashFailure(format!("{alg} returned no output")));
    }
    let width = modulus_width::<C>();
    let mut buffer = vec![0u8; width];
    if hash.len() >= width {
        buffer.copy_from_slice(&hash[..width]);
    } else {
        buffer[width - hash.len()..].copy_from_slice(&hash);
    }
    Ok(buffer)
}

/// Maps a message to a scalar, reducing the aligned digest modulo `r`.
pub fn hash_to_scalar<C: PairingCurve>(alg: HashAlgorithm, message: &[u8]) -> Result<Scalar<C>, Error> {
    let buffer = aligned_digest::<C>(alg, message)?;
    Ok(Scalar::<C>::from_be_bytes_mod_order(&buffer))
}

/// Hashes each attribute string to a scalar.
#[instrument(level = "trace", skip_all, fields(%alg, count = attributes.len()))]
pub fn hash_attributes<C, S>(alg: HashAlgorithm, attributes: &[S]) -> Result<Vec<Scalar<C>>, Error>
where
    C: PairingCurve,
    S: AsRef<str>,
{
    attributes
        .iter()
        .map(|attr| hash_to_scalar::<C>(alg, attr.as_ref().as_bytes()))
        .collect()
}

/// Maps a message to a non-identity point of the prime-order subgroup of
/// group 1.
///
/// Try-and-increment: the aligned digest seeds an x-coordinate, the smaller
/// of the two roots is taken and the cofactor cleared. Candidates without a
/// root, or that clear to the identity, move on to `x + 1`.
pub fn hash_to_point<C: PairingCurve>(alg: HashAlgorithm, message: &[u8]) -> Result<G1Projective<C>, Error> {
    let buffer = aligned_digest::<C>(alg, message)?;
    let mut x = C::Fq::from_be_bytes_mod_order(&buffer);
    for attempt in 0..MAX_POINT_ATTEMPTS {
        if let Some(point) = G1Affine::<C>::get_point_from_x_unchecked(x, false) {
            let point = point.clear_cofactor();
            if !point.is_zero() {
                trace!(attempt, "mapped message to curve");
                return Ok(point.into_group());
            }
        }
        x += C::Fq::from(1u64);
    }
    Err(Error::HashFailure(format!(
        "no curve point found after {MAX_POINT_ATTEMPTS} candidates"
    )))
}

/// Canonical big-endian encoding of a scalar.
pub fn scalar_bytes<C: PairingCurve>(scalar: &Scalar<C>) -> Vec<u8> {
    scalar.into_bigint().to_bytes_be()
}
