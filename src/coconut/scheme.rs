use core::marker::PhantomData;

use ark_ff::Zero;
use ark_poly::{DenseUVPolynomial, Polynomial, univariate::DensePolynomial};
use rand_core::RngCore;
use tracing::{instrument, trace, warn};

use crate::arith::curve::{G1Projective, G2Projective, PairingCurve, Scalar};
use crate::arith::field::random_nonzero_scalar;
use crate::arith::group::GroupElement;
use crate::config::{SchemeConfig, ThresholdParameters};
use crate::encoding::{hash_to_point, scalar_bytes};
use crate::errors::{BackendError, Error};
use crate::lagrange::{interpolate_verification_shares, lagrange_basis_at_zero};
use crate::pairing::PairingEngine;

use super::{
    AggregationMode, CredentialScheme, Dispatcher, Inline, KeyMaterial, Params, SecretKey,
    Signature, VerificationKey, WorkerPool,
};

/// Coconut threshold credentials over curve `C`, with group work placed by
/// the dispatcher `D`.
#[derive(Debug)]
pub struct Coconut<C: PairingCurve, D: Dispatcher = Inline> {
    config: SchemeConfig,
    engine: PairingEngine<C>,
    dispatcher: D,
    _curve: PhantomData<C>,
}

/// Direct strategy: every operation runs on the calling thread.
pub type InlineCoconut<C> = Coconut<C, Inline>;
/// Dispatched strategy: group work is spread over a worker pool.
pub type PooledCoconut<C> = Coconut<C, WorkerPool>;

impl<C: PairingCurve, D: Dispatcher> Coconut<C, D> {
    /// Builds a scheme from `config`, whose curve must match `C`.
    pub fn new(config: SchemeConfig) -> Result<Self, Error> {
        let dispatcher = D::from_config(&config)?;
        Self::with_dispatcher(config, dispatcher)
    }

    pub fn with_dispatcher(config: SchemeConfig, dispatcher: D) -> Result<Self, Error> {
        config.validate()?;
        if config.curve != C::ID {
            return Err(Error::Backend(BackendError::UnsupportedCurve(
                "configured curve does not match the scheme's curve type",
            )));
        }
        Ok(Self {
            engine: PairingEngine::new(config.engine),
            config,
            dispatcher,
            _curve: PhantomData,
        })
    }

    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    pub fn engine(&self) -> &PairingEngine<C> {
        &self.engine
    }

    fn derive_verification_key(&self, params: &Params<C>, sk: &SecretKey<C>) -> VerificationKey<C> {
        let engine = self.engine;
        let g2 = params.g2;
        let mut scalars = Vec::with_capacity(1 + sk.y.len());
        scalars.push(sk.x);
        scalars.extend_from_slice(&sk.y);
        let mut points = self.dispatcher.map(&scalars, |s| engine.g2_mul(&g2, s)).into_iter();
        let alpha = points.next().unwrap_or_else(G2Projective::<C>::identity);
        VerificationKey {
            g2,
            alpha,
            beta: points.collect(),
        }
    }

    /// `sig1` is derived from the attributes, so independent authorities
    /// signing the same attributes produce the same base.
    fn signature_base(&self, params: &Params<C>, attributes: &[Scalar<C>]) -> Result<G1Projective<C>, Error> {
        let message: Vec<u8> = attributes.iter().flat_map(scalar_bytes::<C>).collect();
        hash_to_point::<C>(params.hash, &message)
    }

    fn well_formed(&self, vk: &VerificationKey<C>, sig: &Signature<C>) -> bool {
        let engine = &self.engine;
        engine.g1_member(&sig.sig1)
            && engine.g1_member(&sig.sig2)
            && engine.g2_member(&vk.alpha)
            && vk.beta.iter().all(|b| engine.g2_member(b))
    }

    fn weights(&self, mode: &AggregationMode, len: usize) -> Result<Option<Vec<Scalar<C>>>, Error> {
        match mode {
            AggregationMode::Full => Ok(None),
            AggregationMode::Threshold(indices) => {
                if indices.len() != len {
                    return Err(Error::MalformedInput(format!(
                        "{len} inputs but {} indices",
                        indices.len()
                    )));
                }
                lagrange_basis_at_zero::<Scalar<C>>(indices).map(Some)
            }
        }
    }
}

impl<C: PairingCurve, D: Dispatcher> CredentialScheme<C> for Coconut<C, D> {
    #[instrument(level = "info", skip_all, fields(curve = %C::ID, capacity = capacity))]
    fn setup(&self, capacity: usize) -> Result<Params<C>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidConfig(
                "attribute capacity must be at least 1".into(),
            ));
        }
        Ok(Params::new(capacity, self.config.hash))
    }

    #[instrument(level = "info", skip_all, fields(capacity = params.capacity))]
    fn keygen<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &Params<C>,
    ) -> Result<(SecretKey<C>, VerificationKey<C>), Error> {
        let x = random_nonzero_scalar(rng);
        let y = (0..params.capacity).map(|_| random_nonzero_scalar(rng)).collect();
        let sk = SecretKey { x, y };
        let vk = self.derive_verification_key(params, &sk);
        Ok((sk, vk))
    }

    #[instrument(level = "info", skip_all, fields(threshold = threshold, authorities = authorities, capacity = params.capacity))]
    fn ttp_keygen<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        params: &Params<C>,
        threshold: usize,
        authorities: usize,
    ) -> Result<KeyMaterial<C>, Error> {
        let parameters = ThresholdParameters::new(threshold, authorities)?;

        // One degree-(t-1) polynomial for x and one per y_j; constant terms
        // are the combined secret.
        let polynomials: Vec<DensePolynomial<Scalar<C>>> = (0..=params.capacity)
            .map(|_| {
                let coeffs = (0..threshold).map(|_| random_nonzero_scalar(rng)).collect();
                DensePolynomial::from_coefficients_vec(coeffs)
            })
            .collect();

        let indices: Vec<u64> = (1..=authorities as u64).collect();
        let secret_keys = self.dispatcher.map(&indices, |&i| {
            let point = Scalar::<C>::from(i);
            let mut values = polynomials.iter().map(|p| p.evaluate(&point));
            let x = values.next().unwrap_or_else(Scalar::<C>::zero);
            SecretKey {
                x,
                y: values.collect(),
            }
        });
        trace!(shares = secret_keys.len(), "evaluated secret shares");

        let verification_keys = secret_keys
            .iter()
            .map(|sk| self.derive_verification_key(params, sk))
            .collect();

        Ok(KeyMaterial {
            parameters,
            secret_keys,
            verification_keys,
        })
    }

    #[instrument(level = "info", skip_all, fields(attributes = attributes.len()))]
    fn sign(
        &self,
        params: &Params<C>,
        sk: &SecretKey<C>,
        attributes: &[Scalar<C>],
    ) -> Result<Signature<C>, Error> {
        if attributes.len() != sk.y.len() {
            return Err(Error::ParameterMismatch {
                expected: sk.y.len(),
                actual: attributes.len(),
            });
        }
        let sig1 = self.signature_base(params, attributes)?;
        let exponent = sk
            .y
            .iter()
            .zip(attributes)
            .fold(sk.x, |acc, (y, m)| acc + *y * m);
        let sig2 = self.engine.g1_mul(&sig1, &exponent);
        Ok(Signature { sig1, sig2 })
    }

    #[instrument(level = "info", skip_all, fields(attributes = attributes.len()))]
    fn verify(
        &self,
        params: &Params<C>,
        vk: &VerificationKey<C>,
        attributes: &[Scalar<C>],
        sig: &Signature<C>,
    ) -> bool {
        if attributes.len() != vk.beta.len() {
            warn!(
                expected = vk.beta.len(),
                actual = attributes.len(),
                "attribute count does not match verification key"
            );
            return false;
        }
        if sig.sig1.is_identity() {
            return false;
        }
        if self.engine.config().validate_membership && !self.well_formed(vk, sig) {
            trace!("membership check failed");
            return false;
        }

        let engine = &self.engine;
        let kx = vk
            .beta
            .iter()
            .zip(attributes)
            .fold(vk.alpha, |acc, (beta, m)| acc + engine.g2_mul(beta, m));

        // e(Kx, sig1) == e(g2, sig2)  <=>  e(Kx, sig1)·e(-g2, sig2) == 1
        match engine.double_pairing(&kx, &sig.sig1, &(-params.g2), &sig.sig2) {
            Ok(product) => product.is_identity(),
            Err(_) => false,
        }
    }

    #[instrument(level = "info", skip_all)]
    fn randomize<R: RngCore + ?Sized>(&self, rng: &mut R, _params: &Params<C>, sig: &Signature<C>) -> Signature<C> {
        let t: Scalar<C> = random_nonzero_scalar(rng);
        Signature {
            sig1: self.engine.g1_mul(&sig.sig1, &t),
            sig2: self.engine.g1_mul(&sig.sig2, &t),
        }
    }

    #[instrument(level = "info", skip_all, fields(signatures = signatures.len()))]
    fn aggregate_signatures(
        &self,
        _params: &Params<C>,
        signatures: &[Signature<C>],
        mode: &AggregationMode,
    ) -> Result<Signature<C>, Error> {
        let first = signatures
            .first()
            .ok_or_else(|| Error::MalformedInput("no signatures to aggregate".into()))?;
        let sig2 = match self.weights(mode, signatures.len())? {
            None => signatures
                .iter()
                .fold(G1Projective::<C>::identity(), |acc, s| acc + s.sig2),
            Some(weights) => {
                let engine = self.engine;
                let pairs: Vec<_> = signatures.iter().map(|s| s.sig2).zip(weights).collect();
                self.dispatcher
                    .map(&pairs, |(s, l)| engine.g1_mul(s, l))
                    .into_iter()
                    .fold(G1Projective::<C>::identity(), |acc, s| acc + s)
            }
        };
        Ok(Signature {
            sig1: first.sig1,
            sig2,
        })
    }

    #[instrument(level = "info", skip_all, fields(keys = keys.len()))]
    fn aggregate_verification_keys(
        &self,
        _params: &Params<C>,
        keys: &[VerificationKey<C>],
        mode: &AggregationMode,
    ) -> Result<VerificationKey<C>, Error> {
        let first = keys
            .first()
            .ok_or_else(|| Error::MalformedInput("no verification keys to aggregate".into()))?;
        if keys.iter().any(|k| k.beta.len() != first.beta.len()) {
            return Err(Error::MalformedInput(
                "verification keys differ in capacity".into(),
            ));
        }
        match mode {
            AggregationMode::Full => {
                let mut combined = first.clone();
                for key in &keys[1..] {
                    combined.alpha += key.alpha;
                    for (acc, beta) in combined.beta.iter_mut().zip(&key.beta) {
                        *acc += beta;
                    }
                }
                Ok(combined)
            }
            AggregationMode::Threshold(indices) => {
                let engine = self.engine;
                interpolate_verification_shares(keys, indices, |g, l| engine.g2_mul(g, l))
            }
        }
    }

    #[instrument(level = "info", skip_all, fields(batch = batch.len()))]
    fn verify_batch(
        &self,
        params: &Params<C>,
        vk: &VerificationKey<C>,
        batch: &[(Vec<Scalar<C>>, Signature<C>)],
    ) -> Vec<bool> {
        self.dispatcher
            .map(batch, |(attributes, sig)| self.verify(params, vk, attributes, sig))
    }
}
