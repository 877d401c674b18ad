//! # Threshold credentials over a hand-built pairing engine
//!
//! This crate implements Coconut-style threshold anonymous credentials on top
//! of an optimal-ate pairing engine written against arkworks field and curve
//! arithmetic.
//!
//! ## Overview
//!
//! A set of independent authorities issue partial signatures over a vector
//! of attributes. Any qualified subset of partial signatures combines into a
//! single signature that verifies against a combined verification key,
//! without revealing which subset signed. Keys are either generated
//! independently per authority or dealt as `t`-of-`n` shares by a trusted
//! party.
//!
//! ## Architecture
//!
//! - **[`pairing`]**: the [`PairingEngine`]. Line functions, a multi-pair
//!   Miller loop (`ate`, `ate2`), a data-driven final exponentiation and
//!   GLV / Galbraith-Scott scalar multiplication in all three groups.
//!
//! - **[`arith`]**: [`PairingCurve`] descriptions for BLS12-381 and BN254,
//!   the [`GroupElement`] interface, the target group [`Gt`] and the
//!   lattice reduction used for scalar decomposition.
//!
//! - **[`coconut`]**: the [`CredentialScheme`] trait and its [`Coconut`]
//!   implementation with [`Params`], [`SecretKey`], [`VerificationKey`],
//!   [`Signature`] and [`AggregationMode`].
//!
//! - **[`lagrange`]**: Lagrange basis at zero and typed share interpolation.
//!
//! - **[`encoding`]**: hashing attribute strings to scalars and points.
//!
//! - **[`config`]**: [`SchemeConfig`], [`EngineConfig`], [`HashAlgorithm`],
//!   [`CurveId`] and [`ThresholdParameters`].
//!
//! - **[`errors`]**: error types for engine and protocol operations.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "bls12_381")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rand::{SeedableRng, rngs::StdRng};
//! use threshold_credentials::{
//!     AggregationMode, Bls12_381Curve, CredentialScheme, CurveId, InlineCoconut, SchemeConfig,
//! };
//! use threshold_credentials::encoding::hash_attributes;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let scheme = InlineCoconut::<Bls12_381Curve>::new(SchemeConfig::new(CurveId::Bls12_381))?;
//!
//! // One attribute slot, three independent authorities.
//! let params = scheme.setup(1)?;
//! let authorities = (0..3)
//!     .map(|_| scheme.keygen(&mut rng, &params))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let attributes = hash_attributes::<Bls12_381Curve, _>(params.hash, &["Hello World!"])?;
//! let partials = authorities
//!     .iter()
//!     .map(|(sk, _)| scheme.sign(&params, sk, &attributes))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let keys: Vec<_> = authorities.iter().map(|(_, vk)| vk.clone()).collect();
//!
//! let signature = scheme.aggregate_signatures(&params, &partials, &AggregationMode::Full)?;
//! let vk = scheme.aggregate_verification_keys(&params, &keys, &AggregationMode::Full)?;
//! assert!(scheme.verify(&params, &vk, &attributes, &signature));
//!
//! // Re-randomized credentials are unlinkable but still verify.
//! let shown = scheme.randomize(&mut rng, &params, &signature);
//! assert!(scheme.verify(&params, &vk, &attributes, &shown));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "bls12_381"))]
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! - **`bls12_381`** (default): BLS12-381 curve description
//! - **`bn254`** (default): BN254 curve description
//!
//! ## Performance
//!
//! Scalar multiplication and target-group exponentiation use endomorphism
//! decompositions (two sub-scalars in group 1, four in group 2 and the
//! target group) unless [`EngineConfig::endomorphism`] is switched off.
//! Verification evaluates both pairings in one Miller loop. With the
//! [`WorkerPool`] strategy, key derivation, share evaluation, threshold
//! aggregation and batch verification run on a rayon pool.
//!
//! ## Security Considerations
//!
//! - **Subgroup membership**: the pairing engine trusts its inputs. Enable
//!   [`EngineConfig::validate_membership`] when verifying keys or signatures
//!   that did not come from this crate; deserialization always validates.
//! - **Signature base**: `sig1` is derived from the attributes, so partial
//!   signatures over the same attributes share their base. Use
//!   [`CredentialScheme::randomize`] before showing a credential.
//! - **Trusted dealer**: [`CredentialScheme::ttp_keygen`] sees every share;
//!   the dealer must discard the polynomials after distribution.

pub mod arith;
pub mod coconut;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod lagrange;
pub mod pairing;
mod serde_impl;

pub use arith::*;
pub use coconut::*;
pub use config::{CurveId, EngineConfig, HashAlgorithm, SchemeConfig, ThresholdParameters};
pub use errors::{BackendError, Error};
pub use pairing::PairingEngine;
