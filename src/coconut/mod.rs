//! Coconut threshold credentials.
//!
//! Authorities hold signing keys over a fixed number of attributes. Each
//! issues a partial signature; partial signatures from independent
//! authorities, or from any `t` of `n` trusted-dealer shares, combine into a
//! single credential that verifies against the correspondingly combined
//! verification key.
//!
//! # Protocol Overview
//!
//! 1. **Setup** ([`CredentialScheme::setup`]): fix the attribute capacity `q`
//!    and bind the group generators.
//! 2. **Key Generation** ([`CredentialScheme::keygen`],
//!    [`CredentialScheme::ttp_keygen`]): independent keys, or `n` shares of a
//!    dealer key with threshold `t`.
//! 3. **Signing** ([`CredentialScheme::sign`]): `sig1` is derived from the
//!    attributes, `sig2 = [x + Σ m_i·y_i]sig1`.
//! 4. **Verification** ([`CredentialScheme::verify`]): one two-pairing
//!    product, `e(alpha + Σ [m_i]beta_i, sig1) == e(g2, sig2)`.
//! 5. **Randomization** ([`CredentialScheme::randomize`]): rescale both
//!    signature elements by a fresh scalar.
//! 6. **Aggregation** ([`CredentialScheme::aggregate_signatures`],
//!    [`CredentialScheme::aggregate_verification_keys`]): plain sums, or
//!    Lagrange-weighted sums over threshold indices.
//!
//! # Strategies
//!
//! [`Coconut`] is generic over a [`Dispatcher`]. [`Inline`] runs everything
//! on the caller's thread; [`WorkerPool`] spreads independent group work over
//! a rayon pool. Both honour the same contract and give identical outputs for
//! identically seeded randomness.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "bls12_381")]
//! # fn main() -> Result<(), threshold_credentials::errors::Error> {
//! use rand::{SeedableRng, rngs::StdRng};
//! use threshold_credentials::{
//!     AggregationMode, Bls12_381Curve, CredentialScheme, InlineCoconut,
//!     config::{CurveId, SchemeConfig},
//!     encoding::hash_attributes,
//! };
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let scheme = InlineCoconut::<Bls12_381Curve>::new(SchemeConfig::new(CurveId::Bls12_381))?;
//! let params = scheme.setup(2)?;
//! let keys = scheme.ttp_keygen(&mut rng, &params, 2, 3)?;
//!
//! let attributes = hash_attributes::<Bls12_381Curve, _>(params.hash, &["Foo", "Bar"])?;
//! let partials = [
//!     scheme.sign(&params, &keys.secret_keys[0], &attributes)?,
//!     scheme.sign(&params, &keys.secret_keys[2], &attributes)?,
//! ];
//! let mode = AggregationMode::threshold([1, 3]);
//! let signature = scheme.aggregate_signatures(&params, &partials, &mode)?;
//! let vk = scheme.aggregate_verification_keys(
//!     &params,
//!     &[keys.verification_keys[0].clone(), keys.verification_keys[2].clone()],
//!     &mode,
//! )?;
//! assert!(scheme.verify(&params, &vk, &attributes, &signature));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "bls12_381"))]
//! # fn main() {}
//! ```

use core::fmt::Debug;

use rand_core::RngCore;

use crate::arith::curve::{PairingCurve, Scalar};
use crate::errors::Error;

mod dispatch;
pub use dispatch::{Dispatcher, Inline, WorkerPool};

mod keys;
pub use keys::{KeyMaterial, SecretKey, VerificationKey};

mod params;
pub use params::Params;

mod scheme;
pub use scheme::{Coconut, InlineCoconut, PooledCoconut};

mod signature;
pub use signature::{AggregationMode, Signature};

/// Attribute value signed by a credential.
pub type Attribute<C> = Scalar<C>;

/// Threshold credential scheme interface.
///
/// The call order is Setup, then key generation, then signing, then any of
/// verification, randomization and aggregation. Every operation is a pure
/// function of its arguments; randomness comes only from the `rng` handle.
pub trait CredentialScheme<C: PairingCurve>: Debug + Send + Sync {
    /// Public parameters for attribute capacity `capacity`.
    ///
    /// Fails with [`Error::InvalidConfig`] when `capacity` is zero.
    fn setup(&self, capacity: usize) -> Result<Params<C>, Error>;

    /// Draws a fresh key pair with `x` and every `y_i` uniform in `[1, r - 1]`.
    fn keygen<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &Params<C>,
    ) -> Result<(SecretKey<C>, VerificationKey<C>), Error>;

    /// Trusted-dealer key generation: `authorities` shares, any `threshold`
    /// of which interpolate to the same combined key.
    ///
    /// Fails with [`Error::ThresholdConfig`] unless
    /// `1 <= threshold <= authorities`.
    fn ttp_keygen<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &Params<C>,
        threshold: usize,
        authorities: usize,
    ) -> Result<KeyMaterial<C>, Error>;

    /// Signs `attributes`, which must match the key's capacity.
    fn sign(
        &self,
        params: &Params<C>,
        sk: &SecretKey<C>,
        attributes: &[Attribute<C>],
    ) -> Result<Signature<C>, Error>;

    /// Returns whether `sig` is a valid credential on `attributes` under `vk`.
    ///
    /// Never errors: an attribute count mismatch or an identity `sig1` is
    /// simply `false`.
    fn verify(
        &self,
        params: &Params<C>,
        vk: &VerificationKey<C>,
        attributes: &[Attribute<C>],
        sig: &Signature<C>,
    ) -> bool;

    /// Rescales both elements of `sig` by a fresh non-zero scalar.
    fn randomize<R: RngCore + ?Sized>(&self, rng: &mut R, params: &Params<C>, sig: &Signature<C>) -> Signature<C>;

    /// Combines partial signatures over the same attributes.
    fn aggregate_signatures(
        &self,
        params: &Params<C>,
        signatures: &[Signature<C>],
        mode: &AggregationMode,
    ) -> Result<Signature<C>, Error>;

    /// Combines verification keys with the same rule as
    /// [`aggregate_signatures`](Self::aggregate_signatures).
    fn aggregate_verification_keys(
        &self,
        params: &Params<C>,
        keys: &[VerificationKey<C>],
        mode: &AggregationMode,
    ) -> Result<VerificationKey<C>, Error>;

    /// Verifies independent `(attributes, signature)` pairs under one key.
    fn verify_batch(
        &self,
        params: &Params<C>,
        vk: &VerificationKey<C>,
        batch: &[(Vec<Attribute<C>>, Signature<C>)],
    ) -> Vec<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::curve::G2Projective;
    use ark_ec::AffineRepr;
    use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
    use ark_ff::Zero;
    use crate::arith::group::GroupElement;
    use crate::config::{EngineConfig, SchemeConfig};
    use crate::encoding::hash_attributes;
    use crate::lagrange::{interpolate_secret_shares, interpolate_verification_shares};
    use rand::{SeedableRng, rngs::StdRng};
    use rand_chacha::ChaCha20Rng;

    fn config<C: PairingCurve>() -> SchemeConfig {
        SchemeConfig::new(C::ID).with_workers(2)
    }

    fn inline<C: PairingCurve>() -> InlineCoconut<C> {
        Coconut::new(config::<C>()).expect("inline scheme")
    }

    fn pooled<C: PairingCurve>() -> PooledCoconut<C> {
        Coconut::new(config::<C>()).expect("pooled scheme")
    }

    fn attrs<C: PairingCurve>(params: &Params<C>, values: &[&str]) -> Vec<Attribute<C>> {
        hash_attributes::<C, _>(params.hash, values).expect("hash attributes")
    }

    fn run_key_relation<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(1);
        let params = scheme.setup(3).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        assert_eq!(sk.capacity(), 3);
        assert_eq!(vk.capacity(), 3);
        assert_eq!(vk.alpha, params.g2 * sk.x);
        for (beta, y) in vk.beta.iter().zip(&sk.y) {
            assert_eq!(*beta, params.g2 * y);
        }
        assert!(matches!(scheme.setup(0), Err(Error::InvalidConfig(_))));
    }

    fn run_hello_world<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(2);
        let params = scheme.setup(1).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        let honest = attrs(&params, &["Hello World!"]);
        let malicious = attrs(&params, &["Malicious Hello World!"]);

        let sig = scheme.sign(&params, &sk, &honest).expect("sign");
        assert!(scheme.verify(&params, &vk, &honest, &sig));
        assert!(!scheme.verify(&params, &vk, &malicious, &sig));
    }

    fn run_sign_verify_randomize<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(3);
        let params = scheme.setup(3).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        let honest = attrs(&params, &["Foo", "Bar", "Baz"]);
        let malicious = attrs(&params, &["Foo", "Bar", "Malicious Baz"]);

        let sig = scheme.sign(&params, &sk, &honest).expect("sign");
        assert!(scheme.verify(&params, &vk, &honest, &sig));
        assert!(!scheme.verify(&params, &vk, &malicious, &sig));

        let randomized = scheme.randomize(&mut rng, &params, &sig);
        assert_ne!(randomized, sig);
        assert!(scheme.verify(&params, &vk, &honest, &randomized));
        assert!(!scheme.verify(&params, &vk, &malicious, &randomized));

        let msig = scheme.sign(&params, &sk, &malicious).expect("sign");
        assert!(!scheme.verify(&params, &vk, &honest, &msig));
    }

    fn run_sign_rejects_wrong_length<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(4);
        let params = scheme.setup(3).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        for values in [&["Foo", "Bar"][..], &["Foo", "Bar", "Baz", "Qux"][..]] {
            let attributes = attrs(&params, values);
            assert!(matches!(
                scheme.sign(&params, &sk, &attributes),
                Err(Error::ParameterMismatch { expected: 3, actual }) if actual == values.len()
            ));
        }

        let attributes = attrs(&params, &["Foo", "Bar", "Baz"]);
        let sig = scheme.sign(&params, &sk, &attributes).expect("sign");
        assert!(!scheme.verify(&params, &vk, &attributes[..2], &sig));

        let degenerate = Signature {
            sig1: GroupElement::identity(),
            sig2: GroupElement::identity(),
        };
        assert!(!scheme.verify(&params, &vk, &attributes, &degenerate));
    }

    fn run_full_aggregation<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(5);
        let params = scheme.setup(2).expect("setup");
        let honest = attrs(&params, &["Foo", "Bar"]);
        let malicious = attrs(&params, &["Foo", "Malicious Bar"]);

        let keys: Vec<_> = (0..3).map(|_| scheme.keygen(&mut rng, &params).expect("keygen")).collect();
        let other: Vec<_> = (0..3).map(|_| scheme.keygen(&mut rng, &params).expect("keygen")).collect();
        let full = AggregationMode::Full;

        let sign_all = |set: &[(SecretKey<C>, VerificationKey<C>)], m: &[Attribute<C>]| -> Vec<Signature<C>> {
            set.iter().map(|(sk, _)| scheme.sign(&params, sk, m).expect("sign")).collect()
        };
        let vks = |set: &[(SecretKey<C>, VerificationKey<C>)]| -> Vec<VerificationKey<C>> {
            set.iter().map(|(_, vk)| vk.clone()).collect()
        };

        let sigs = sign_all(&keys, &honest);
        let aggr_sig = scheme.aggregate_signatures(&params, &sigs, &full).expect("aggregate");
        let aggr_vk = scheme.aggregate_verification_keys(&params, &vks(&keys), &full).expect("aggregate");
        assert!(scheme.verify(&params, &aggr_vk, &honest, &aggr_sig));
        assert!(!scheme.verify(&params, &aggr_vk, &malicious, &aggr_sig));

        // A single authority's signature does not verify against the aggregate.
        assert!(!scheme.verify(&params, &aggr_vk, &honest, &sigs[0]));

        // Keys and signatures from an independent set never cross-verify.
        let other_sigs = sign_all(&other, &honest);
        let other_sig = scheme.aggregate_signatures(&params, &other_sigs, &full).expect("aggregate");
        let other_vk = scheme.aggregate_verification_keys(&params, &vks(&other), &full).expect("aggregate");
        assert!(scheme.verify(&params, &other_vk, &honest, &other_sig));
        assert!(!scheme.verify(&params, &aggr_vk, &honest, &other_sig));
        assert!(!scheme.verify(&params, &other_vk, &honest, &aggr_sig));
        assert!(!scheme.verify(&params, &keys[0].1, &honest, &other_sigs[0]));

        // Mixing the two sets fails against either aggregate key.
        let mixed = [sigs[0].clone(), sigs[1].clone(), other_sigs[2].clone()];
        let mixed_sig = scheme.aggregate_signatures(&params, &mixed, &full).expect("aggregate");
        assert!(!scheme.verify(&params, &aggr_vk, &honest, &mixed_sig));
        assert!(!scheme.verify(&params, &other_vk, &honest, &mixed_sig));

        // Signatures over malicious attributes fail against honest attributes.
        let bad_sigs = sign_all(&keys, &malicious);
        let bad_sig = scheme.aggregate_signatures(&params, &bad_sigs, &full).expect("aggregate");
        assert!(scheme.verify(&params, &aggr_vk, &malicious, &bad_sig));
        assert!(!scheme.verify(&params, &aggr_vk, &honest, &bad_sig));
    }

    fn run_threshold_consistency<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(6);
        let params = scheme.setup(2).expect("setup");
        let keys = scheme.ttp_keygen(&mut rng, &params, 3, 5).expect("ttp keygen");
        assert_eq!(keys.secret_keys.len(), 5);
        assert_eq!(keys.indices(), vec![1, 2, 3, 4, 5]);

        let pick = |indices: &[u64]| {
            let sks: Vec<_> = indices.iter().map(|&i| keys.share(i).expect("share").0.clone()).collect();
            let vks: Vec<_> = indices.iter().map(|&i| keys.share(i).expect("share").1.clone()).collect();
            (sks, vks)
        };
        let mul = |g: &G2Projective<C>, l: &Scalar<C>| *g * l;

        let (sks_a, vks_a) = pick(&[1, 2, 3]);
        let (sks_b, vks_b) = pick(&[5, 2, 4]);
        let sk_a = interpolate_secret_shares(&sks_a, &[1, 2, 3]).expect("interpolate");
        let sk_b = interpolate_secret_shares(&sks_b, &[5, 2, 4]).expect("interpolate");
        assert_eq!(sk_a, sk_b);

        let vk_a = interpolate_verification_shares(&vks_a, &[1, 2, 3], mul).expect("interpolate");
        let vk_b = interpolate_verification_shares(&vks_b, &[5, 2, 4], mul).expect("interpolate");
        assert_eq!(vk_a, vk_b);
        assert_eq!(vk_a.alpha, params.g2 * sk_a.x);
        for (beta, y) in vk_a.beta.iter().zip(&sk_a.y) {
            assert_eq!(*beta, params.g2 * y);
        }

        let mode = AggregationMode::threshold([5, 2, 4]);
        let aggregated = scheme.aggregate_verification_keys(&params, &vks_b, &mode).expect("aggregate");
        assert_eq!(aggregated, vk_a);

        assert!(matches!(
            scheme.ttp_keygen(&mut rng, &params, 0, 3),
            Err(Error::ThresholdConfig { threshold: 0, authorities: 3 })
        ));
        assert!(matches!(
            scheme.ttp_keygen(&mut rng, &params, 4, 3),
            Err(Error::ThresholdConfig { threshold: 4, authorities: 3 })
        ));
    }

    fn run_threshold_end_to_end<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(7);
        let params = scheme.setup(2).expect("setup");
        let honest = attrs(&params, &["Foo", "Bar"]);
        let malicious = attrs(&params, &["Malicious Foo", "Bar"]);
        let keys = scheme.ttp_keygen(&mut rng, &params, 2, 3).expect("ttp keygen");

        let sigs: Vec<_> = [0, 2]
            .iter()
            .map(|&i| scheme.sign(&params, &keys.secret_keys[i], &honest).expect("sign"))
            .collect();
        let vks = [keys.verification_keys[0].clone(), keys.verification_keys[2].clone()];

        let mode = AggregationMode::threshold([1, 3]);
        let sig = scheme.aggregate_signatures(&params, &sigs, &mode).expect("aggregate");
        let vk = scheme.aggregate_verification_keys(&params, &vks, &mode).expect("aggregate");
        assert!(scheme.verify(&params, &vk, &honest, &sig));
        assert!(!scheme.verify(&params, &vk, &malicious, &sig));

        let randomized = scheme.randomize(&mut rng, &params, &sig);
        assert!(scheme.verify(&params, &vk, &honest, &randomized));

        // Labelling share 3 as share 2 reconstructs the wrong value.
        let wrong = AggregationMode::threshold([1, 2]);
        let wrong_sig = scheme.aggregate_signatures(&params, &sigs, &wrong).expect("aggregate");
        assert!(!scheme.verify(&params, &vk, &honest, &wrong_sig));

        // Any other qualified subset yields the same combined key.
        let vk_12 = scheme
            .aggregate_verification_keys(&params, &keys.verification_keys[..2], &wrong)
            .expect("aggregate");
        assert_eq!(vk_12, vk);
        assert!(!scheme.verify(&params, &vk_12, &honest, &wrong_sig));

        // A single share is below threshold.
        let single = scheme
            .aggregate_signatures(&params, &sigs[..1], &AggregationMode::threshold([1]))
            .expect("aggregate");
        assert!(!scheme.verify(&params, &vk, &honest, &single));

        // An independent dealer's shares do not verify against this key.
        let other = scheme.ttp_keygen(&mut rng, &params, 2, 3).expect("ttp keygen");
        let other_sigs: Vec<_> = [0, 2]
            .iter()
            .map(|&i| scheme.sign(&params, &other.secret_keys[i], &honest).expect("sign"))
            .collect();
        let other_sig = scheme.aggregate_signatures(&params, &other_sigs, &mode).expect("aggregate");
        assert!(!scheme.verify(&params, &vk, &honest, &other_sig));
    }

    fn run_threshold_edges<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(8);
        let params = scheme.setup(1).expect("setup");
        let honest = attrs(&params, &["Hello World!"]);

        // t = 1, n = 1; a single share is the whole key.
        let keys = scheme.ttp_keygen(&mut rng, &params, 1, 1).expect("ttp keygen");
        let sig = scheme.sign(&params, &keys.secret_keys[0], &honest).expect("sign");
        let mode = AggregationMode::threshold([1]);
        let aggr_sig = scheme.aggregate_signatures(&params, &[sig.clone()], &mode).expect("aggregate");
        let aggr_vk = scheme
            .aggregate_verification_keys(&params, &keys.verification_keys, &mode)
            .expect("aggregate");
        assert_eq!(aggr_sig, sig);
        assert!(scheme.verify(&params, &aggr_vk, &honest, &aggr_sig));

        // t = n = 3 with every share.
        let keys = scheme.ttp_keygen(&mut rng, &params, 3, 3).expect("ttp keygen");
        let sigs: Vec<_> = keys
            .secret_keys
            .iter()
            .map(|sk| scheme.sign(&params, sk, &honest).expect("sign"))
            .collect();
        let mode = AggregationMode::threshold(keys.indices());
        let aggr_sig = scheme.aggregate_signatures(&params, &sigs, &mode).expect("aggregate");
        let aggr_vk = scheme
            .aggregate_verification_keys(&params, &keys.verification_keys, &mode)
            .expect("aggregate");
        assert!(scheme.verify(&params, &aggr_vk, &honest, &aggr_sig));
    }

    fn run_aggregation_errors<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(9);
        let params = scheme.setup(1).expect("setup");
        let keys = scheme.ttp_keygen(&mut rng, &params, 2, 3).expect("ttp keygen");
        let honest = attrs(&params, &["Foo"]);
        let sigs: Vec<_> = keys.secret_keys[..2]
            .iter()
            .map(|sk| scheme.sign(&params, sk, &honest).expect("sign"))
            .collect();
        let vks = &keys.verification_keys[..2];

        for mode in [AggregationMode::Full, AggregationMode::threshold([1, 2])] {
            assert!(matches!(
                scheme.aggregate_signatures(&params, &[], &mode),
                Err(Error::MalformedInput(_))
            ));
            assert!(matches!(
                scheme.aggregate_verification_keys(&params, &[], &mode),
                Err(Error::MalformedInput(_))
            ));
        }
        for bad in [vec![1], vec![1, 1], vec![0, 2], vec![1, 2, 3]] {
            let mode = AggregationMode::Threshold(bad);
            assert!(matches!(
                scheme.aggregate_signatures(&params, &sigs, &mode),
                Err(Error::MalformedInput(_))
            ));
            assert!(matches!(
                scheme.aggregate_verification_keys(&params, vks, &mode),
                Err(Error::MalformedInput(_))
            ));
        }

        let wider = scheme.setup(2).expect("setup");
        let (_, wide_vk) = scheme.keygen(&mut rng, &wider).expect("keygen");
        assert!(matches!(
            scheme.aggregate_verification_keys(&params, &[vks[0].clone(), wide_vk], &AggregationMode::Full),
            Err(Error::MalformedInput(_))
        ));
    }

    fn run_verify_batch<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        let mut rng = StdRng::seed_from_u64(10);
        let params = scheme.setup(2).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        let a = attrs(&params, &["Foo", "Bar"]);
        let b = attrs(&params, &["Baz", "Qux"]);
        let sig_a = scheme.sign(&params, &sk, &a).expect("sign");
        let sig_b = scheme.sign(&params, &sk, &b).expect("sign");

        let batch = vec![
            (a.clone(), sig_a.clone()),
            (b.clone(), sig_a),
            (b.clone(), sig_b.clone()),
            (a[..1].to_vec(), sig_b),
        ];
        assert_eq!(scheme.verify_batch(&params, &vk, &batch), vec![true, false, true, false]);
    }

    fn run_strategy_equivalence<C: PairingCurve>() {
        let direct = inline::<C>();
        let pool = pooled::<C>();
        let params = direct.setup(2).expect("setup");
        assert_eq!(params, pool.setup(2).expect("setup"));

        let mut rng_a = ChaCha20Rng::seed_from_u64(11);
        let mut rng_b = ChaCha20Rng::seed_from_u64(11);
        let (sk_a, vk_a) = direct.keygen(&mut rng_a, &params).expect("keygen");
        let (sk_b, vk_b) = pool.keygen(&mut rng_b, &params).expect("keygen");
        assert_eq!((&sk_a, &vk_a), (&sk_b, &vk_b));

        let keys_a = direct.ttp_keygen(&mut rng_a, &params, 2, 4).expect("ttp keygen");
        let keys_b = pool.ttp_keygen(&mut rng_b, &params, 2, 4).expect("ttp keygen");
        assert_eq!(keys_a.secret_keys, keys_b.secret_keys);
        assert_eq!(keys_a.verification_keys, keys_b.verification_keys);

        let attributes = attrs(&params, &["Foo", "Bar"]);
        let sig_a = direct.sign(&params, &sk_a, &attributes).expect("sign");
        let sig_b = pool.sign(&params, &sk_b, &attributes).expect("sign");
        assert_eq!(sig_a, sig_b);
        assert_eq!(
            direct.randomize(&mut rng_a, &params, &sig_a),
            pool.randomize(&mut rng_b, &params, &sig_b)
        );

        // Output of one strategy verifies under the other.
        assert!(pool.verify(&params, &vk_a, &attributes, &sig_a));
        assert!(direct.verify(&params, &vk_b, &attributes, &sig_b));
    }

    fn run_membership_checks<C: PairingCurve>() {
        let engine = EngineConfig {
            validate_membership: true,
            ..EngineConfig::default()
        };
        let scheme = InlineCoconut::<C>::new(SchemeConfig::new(C::ID).with_engine(engine)).expect("scheme");
        let plain = InlineCoconut::<C>::new(SchemeConfig::new(C::ID).with_engine(EngineConfig {
            endomorphism: false,
            ..EngineConfig::default()
        }))
        .expect("scheme");

        let mut rng = StdRng::seed_from_u64(12);
        let params = scheme.setup(1).expect("setup");
        let (sk, vk) = scheme.keygen(&mut rng, &params).expect("keygen");
        let attributes = attrs(&params, &["Hello World!"]);
        let sig = scheme.sign(&params, &sk, &attributes).expect("sign");
        assert!(scheme.verify(&params, &vk, &attributes, &sig));
        assert!(plain.verify(&params, &vk, &attributes, &sig));
        assert_eq!(plain.sign(&params, &sk, &attributes).expect("sign"), sig);
    }

    /// First point with a small x-coordinate that lies on the curve but
    /// outside the prime-order subgroup.
    fn off_subgroup<P: SWCurveConfig>() -> Affine<P> {
        (1..256u64)
            .filter_map(|k| Affine::<P>::get_point_from_x_unchecked(P::BaseField::from(k), false))
            .find(|p| !p.is_in_correct_subgroup_assuming_on_curve())
            .expect("cofactor points exist")
    }

    fn strict_and_lax<C: PairingCurve>() -> (InlineCoconut<C>, InlineCoconut<C>) {
        let strict = EngineConfig {
            validate_membership: true,
            ..EngineConfig::default()
        };
        (
            InlineCoconut::<C>::new(SchemeConfig::new(C::ID).with_engine(strict)).expect("scheme"),
            InlineCoconut::<C>::new(SchemeConfig::new(C::ID)).expect("scheme"),
        )
    }

    fn run_rejects_off_subgroup_sig1<C: PairingCurve>() {
        let (strict, lax) = strict_and_lax::<C>();
        let mut rng = StdRng::seed_from_u64(13);
        let params = strict.setup(2).expect("setup");
        let (sk, vk) = strict.keygen(&mut rng, &params).expect("keygen");
        let attributes = attrs(&params, &["Foo", "Bar"]);

        // Same relation as an honest signature, but over a cofactor point.
        let exponent = sk.y.iter().zip(&attributes).fold(sk.x, |acc, (y, m)| acc + *y * m);
        let sig1 = off_subgroup::<C::G1Config>().into_group();
        let forged = Signature {
            sig1,
            sig2: sig1 * exponent,
        };
        assert!(lax.verify(&params, &vk, &attributes, &forged));
        assert!(!strict.verify(&params, &vk, &attributes, &forged));
    }

    fn run_rejects_off_subgroup_beta<C: PairingCurve>() {
        let (strict, lax) = strict_and_lax::<C>();
        let mut rng = StdRng::seed_from_u64(14);
        let params = strict.setup(1).expect("setup");
        let (sk, mut vk) = strict.keygen(&mut rng, &params).expect("keygen");

        // A zero attribute keeps beta out of the pairing equation, so only
        // the membership check can notice the swap.
        let attributes = vec![Attribute::<C>::zero()];
        let sig = strict.sign(&params, &sk, &attributes).expect("sign");
        assert!(strict.verify(&params, &vk, &attributes, &sig));

        vk.beta[0] = off_subgroup::<C::G2Config>().into_group();
        assert!(lax.verify(&params, &vk, &attributes, &sig));
        assert!(!strict.verify(&params, &vk, &attributes, &sig));
    }

    fn run_suite<C: PairingCurve, S: CredentialScheme<C>>(scheme: &S) {
        run_key_relation::<C, S>(scheme);
        run_hello_world::<C, S>(scheme);
        run_sign_verify_randomize::<C, S>(scheme);
        run_sign_rejects_wrong_length::<C, S>(scheme);
        run_full_aggregation::<C, S>(scheme);
        run_threshold_consistency::<C, S>(scheme);
        run_threshold_end_to_end::<C, S>(scheme);
        run_threshold_edges::<C, S>(scheme);
        run_aggregation_errors::<C, S>(scheme);
        run_verify_batch::<C, S>(scheme);
    }

    #[cfg(feature = "bls12_381")]
    mod bls12_381 {
        use super::*;
        use crate::Bls12_381Curve;

        #[test]
        fn inline_suite() {
            run_suite::<Bls12_381Curve, _>(&inline::<Bls12_381Curve>());
        }

        #[test]
        fn pooled_suite() {
            run_suite::<Bls12_381Curve, _>(&pooled::<Bls12_381Curve>());
        }

        #[test]
        fn strategies_agree() {
            run_strategy_equivalence::<Bls12_381Curve>();
        }

        #[test]
        fn membership_checks() {
            run_membership_checks::<Bls12_381Curve>();
            run_rejects_off_subgroup_sig1::<Bls12_381Curve>();
            run_rejects_off_subgroup_beta::<Bls12_381Curve>();
        }

        #[test]
        fn rejects_mismatched_curve() {
            let config = SchemeConfig::new(crate::config::CurveId::Bn254);
            assert!(matches!(
                InlineCoconut::<Bls12_381Curve>::new(config),
                Err(Error::Backend(_))
            ));
        }
    }

    #[cfg(feature = "bn254")]
    mod bn254 {
        use super::*;
        use crate::Bn254Curve;

        #[test]
        fn inline_suite() {
            run_suite::<Bn254Curve, _>(&inline::<Bn254Curve>());
        }

        #[test]
        fn pooled_suite() {
            run_suite::<Bn254Curve, _>(&pooled::<Bn254Curve>());
        }

        #[test]
        fn strategies_agree() {
            run_strategy_equivalence::<Bn254Curve>();
        }

        #[test]
        fn membership_checks() {
            // BN254's group 1 has cofactor 1, so only keys can be off-subgroup.
            run_membership_checks::<Bn254Curve>();
            run_rejects_off_subgroup_beta::<Bn254Curve>();
        }
    }
}
