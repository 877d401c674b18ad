//! Optimal-ate pairing engine.
//!
//! [`PairingEngine`] evaluates Miller loops, applies the final
//! exponentiation and offers endomorphism-accelerated scalar multiplication
//! in all three groups. It is generic over a [`PairingCurve`] description and
//! carries an [`EngineConfig`].
//!
//! # Trust boundary
//!
//! The engine does not validate that inputs lie in the prime-order
//! subgroups. Callers supply well-formed group elements; results for other
//! inputs are unspecified. The `*_member` helpers exist for callers that want
//! to check at their own boundary.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "bn254")]
//! # {
//! use ark_ec::PrimeGroup;
//! use threshold_credentials::{Bn254Curve, EngineConfig, G1Projective, G2Projective, PairingEngine};
//!
//! let engine = PairingEngine::<Bn254Curve>::new(EngineConfig::default());
//! let p = G2Projective::<Bn254Curve>::generator();
//! let q = G1Projective::<Bn254Curve>::generator();
//! let e = engine.pairing(&p, &q).expect("non-zero miller output");
//! assert!(engine.is_in_target_group(&e));
//! # }
//! ```

use core::marker::PhantomData;

use ark_ec::CurveGroup;
use ark_ff::{Field, One, PrimeField, Zero};
use tracing::instrument;

use crate::arith::curve::{
    Fq12, G1Affine, G1Projective, G2Affine, G2Projective, PairingCurve, Scalar,
};
use crate::arith::field::to_biguint;
use crate::arith::group::Gt;
use crate::config::EngineConfig;
use crate::errors::BackendError;

pub(crate) mod endomorphism;
mod final_exp;
mod line;
mod miller;
mod multiexp;

/// Pairing engine for curve `C`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingEngine<C: PairingCurve> {
    config: EngineConfig,
    _curve: PhantomData<C>,
}

impl<C: PairingCurve> Default for PairingEngine<C> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<C: PairingCurve> PairingEngine<C> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            _curve: PhantomData,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Raw Miller loop value of `e(P, Q)` for `P` in group 2 and `Q` in group 1.
    pub fn ate(&self, p: &G2Affine<C>, q: &G1Affine<C>) -> Fq12<C> {
        miller::multi_miller_loop::<C>(&[(*p, *q)])
    }

    /// Raw Miller loop value of `e(P, Q)·e(R, S)` computed in one loop.
    pub fn ate2(
        &self,
        p: &G2Affine<C>,
        q: &G1Affine<C>,
        r: &G2Affine<C>,
        s: &G1Affine<C>,
    ) -> Fq12<C> {
        miller::multi_miller_loop::<C>(&[(*p, *q), (*r, *s)])
    }

    /// Raw Miller loop value of a product of any number of pairings.
    pub fn multi_ate(&self, pairs: &[(G2Affine<C>, G1Affine<C>)]) -> Fq12<C> {
        miller::multi_miller_loop::<C>(pairs)
    }

    /// Maps a raw Miller loop value into the target group.
    pub fn final_exponentiation(&self, f: &Fq12<C>) -> Option<Gt<C>> {
        final_exp::final_exponentiation::<C>(f).map(Gt)
    }

    /// Full pairing `e(P, Q)`.
    #[instrument(level = "trace", skip_all)]
    pub fn pairing(&self, p: &G2Projective<C>, q: &G1Projective<C>) -> Result<Gt<C>, BackendError> {
        let f = self.ate(&p.into_affine(), &q.into_affine());
        self.final_exponentiation(&f)
            .ok_or(BackendError::Math("zero miller loop output"))
    }

    /// Full product `e(P, Q)·e(R, S)`.
    #[instrument(level = "trace", skip_all)]
    pub fn double_pairing(
        &self,
        p: &G2Projective<C>,
        q: &G1Projective<C>,
        r: &G2Projective<C>,
        s: &G1Projective<C>,
    ) -> Result<Gt<C>, BackendError> {
        let points = G2Projective::<C>::normalize_batch(&[*p, *r]);
        let bases = G1Projective::<C>::normalize_batch(&[*q, *s]);
        let f = self.ate2(&points[0], &bases[0], &points[1], &bases[1]);
        self.final_exponentiation(&f)
            .ok_or(BackendError::Math("zero miller loop output"))
    }

    /// `[e]P` in group 1, using the GLV split when enabled.
    pub fn g1_mul(&self, p: &G1Projective<C>, e: &Scalar<C>) -> G1Projective<C> {
        let e = to_biguint(e);
        if self.config.endomorphism {
            endomorphism::glv_mul::<C>(p, &e)
        } else {
            multiexp::double_and_add(p, &e)
        }
    }

    /// `[e]Q` in group 2, using the Galbraith-Scott split when enabled.
    pub fn g2_mul(&self, q: &G2Projective<C>, e: &Scalar<C>) -> G2Projective<C> {
        let e = to_biguint(e);
        if self.config.endomorphism {
            endomorphism::gs_mul::<C>(q, &e)
        } else {
            multiexp::double_and_add(q, &e)
        }
    }

    /// `g^e` in the target group, using the Galbraith-Scott split when enabled.
    pub fn gt_pow(&self, g: &Gt<C>, e: &Scalar<C>) -> Gt<C> {
        let e = to_biguint(e);
        if self.config.endomorphism {
            endomorphism::gs_pow::<C>(g, &e)
        } else {
            multiexp::double_and_add(g, &e)
        }
    }

    /// `f^r == 1`.
    pub fn is_in_target_group(&self, g: &Gt<C>) -> bool {
        let value = g.value();
        !value.is_zero() && value.pow(C::Fr::MODULUS).is_one()
    }

    /// On-curve and prime-order subgroup check in group 1.
    pub fn g1_member(&self, p: &G1Projective<C>) -> bool {
        let affine = p.into_affine();
        affine.is_on_curve() && affine.is_in_correct_subgroup_assuming_on_curve()
    }

    /// On-curve and prime-order subgroup check in group 2.
    pub fn g2_member(&self, q: &G2Projective<C>) -> bool {
        let affine = q.into_affine();
        affine.is_on_curve() && affine.is_in_correct_subgroup_assuming_on_curve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::field::random_nonzero_scalar;
    use crate::arith::group::GroupElement;
    use ark_ec::PrimeGroup;
    use rand::{SeedableRng, rngs::StdRng};

    fn engines<C: PairingCurve>() -> [PairingEngine<C>; 2] {
        [
            PairingEngine::new(EngineConfig::default()),
            PairingEngine::new(EngineConfig {
                endomorphism: false,
                ..EngineConfig::default()
            }),
        ]
    }

    fn run_bilinearity<C: PairingCurve>() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = G2Projective::<C>::generator();
        let q = G1Projective::<C>::generator();
        for engine in engines::<C>() {
            let base = engine.pairing(&p, &q).expect("pairing");
            assert!(!base.is_identity(), "pairing of generators is degenerate");
            let a: C::Fr = random_nonzero_scalar(&mut rng);
            let b: C::Fr = random_nonzero_scalar(&mut rng);
            let lhs = engine
                .pairing(&engine.g2_mul(&p, &a), &engine.g1_mul(&q, &b))
                .expect("pairing");
            assert_eq!(lhs, engine.gt_pow(&base, &(a * b)));
            assert_eq!(lhs, engine.pairing(&(p * (a * b)), &q).expect("pairing"));
        }
    }

    fn run_non_degeneracy<C: PairingCurve>() {
        let engine = PairingEngine::<C>::default();
        let p = G2Projective::<C>::generator();
        let q = G1Projective::<C>::generator();
        let zero1 = G1Projective::<C>::identity();
        let zero2 = G2Projective::<C>::identity();
        assert!(engine.pairing(&zero2, &q).expect("pairing").is_identity());
        assert!(engine.pairing(&p, &zero1).expect("pairing").is_identity());
        assert!(engine.ate(&p.into_affine(), &zero1.into_affine()).is_one());
        assert!(!engine.pairing(&p, &q).expect("pairing").is_identity());
    }

    fn run_double_pairing<C: PairingCurve>() {
        let mut rng = StdRng::seed_from_u64(5);
        let engine = PairingEngine::<C>::default();
        let p = G2Projective::<C>::generator();
        let q = G1Projective::<C>::generator();
        let a: C::Fr = random_nonzero_scalar(&mut rng);
        let b: C::Fr = random_nonzero_scalar(&mut rng);
        let r = p * a;
        let s = q * b;

        let joint = engine.double_pairing(&p, &q, &r, &s).expect("pairing");
        let separate = engine.pairing(&p, &q).expect("pairing") * engine.pairing(&r, &s).expect("pairing");
        assert_eq!(joint, separate);

        let raw = engine.ate2(&p.into_affine(), &q.into_affine(), &r.into_affine(), &s.into_affine());
        let product = engine.ate(&p.into_affine(), &q.into_affine()) * engine.ate(&r.into_affine(), &s.into_affine());
        assert_eq!(raw, product);

        let cancel = engine.double_pairing(&p, &q, &(-p), &q).expect("pairing");
        assert!(cancel.is_identity());
    }

    fn run_fast_matches_plain<C: PairingCurve>() {
        let mut rng = StdRng::seed_from_u64(9);
        let [fast, plain] = engines::<C>();
        let p = G1Projective::<C>::generator() * C::Fr::from(7u64);
        let q = G2Projective::<C>::generator() * C::Fr::from(11u64);
        let g = fast.pairing(&q, &p).expect("pairing");
        let mut scalars: Vec<C::Fr> = (0..6).map(|_| random_nonzero_scalar(&mut rng)).collect();
        scalars.push(C::Fr::from(0u64));
        scalars.push(C::Fr::from(1u64));
        scalars.push(-C::Fr::from(1u64));
        for e in &scalars {
            assert_eq!(fast.g1_mul(&p, e), p * e);
            assert_eq!(plain.g1_mul(&p, e), p * e);
            assert_eq!(fast.g2_mul(&q, e), q * e);
            assert_eq!(plain.g2_mul(&q, e), q * e);
            assert_eq!(fast.gt_pow(&g, e), plain.gt_pow(&g, e));
        }
        assert!(fast.g1_mul(&G1Projective::<C>::identity(), &scalars[0]).is_identity());
        assert!(fast.g2_mul(&G2Projective::<C>::identity(), &scalars[0]).is_identity());
        assert_eq!(fast.gt_pow(&g, &C::Fr::from(2u64)), g * g);
    }

    fn run_membership<C: PairingCurve>() {
        let engine = PairingEngine::<C>::default();
        let p = G2Projective::<C>::generator();
        let q = G1Projective::<C>::generator();
        let e = engine.pairing(&p, &q).expect("pairing");
        assert!(engine.is_in_target_group(&e));
        assert!(engine.g1_member(&q));
        assert!(engine.g2_member(&p));
        // A raw Miller loop value is not yet in the order-r subgroup.
        let raw = Gt::<C>(engine.ate(&p.into_affine(), &q.into_affine()));
        assert!(!engine.is_in_target_group(&raw));
    }

    #[cfg(feature = "bls12_381")]
    mod bls12_381 {
        use super::*;
        use crate::Bls12_381Curve;

        #[test]
        fn bilinearity() {
            run_bilinearity::<Bls12_381Curve>();
        }

        #[test]
        fn non_degeneracy() {
            run_non_degeneracy::<Bls12_381Curve>();
        }

        #[test]
        fn double_pairing() {
            run_double_pairing::<Bls12_381Curve>();
        }

        #[test]
        fn fast_scalar_mul_matches_plain() {
            run_fast_matches_plain::<Bls12_381Curve>();
        }

        #[test]
        fn membership() {
            run_membership::<Bls12_381Curve>();
        }
    }

    #[cfg(feature = "bn254")]
    mod bn254 {
        use super::*;
        use crate::Bn254Curve;

        #[test]
        fn bilinearity() {
            run_bilinearity::<Bn254Curve>();
        }

        #[test]
        fn non_degeneracy() {
            run_non_degeneracy::<Bn254Curve>();
        }

        #[test]
        fn double_pairing() {
            run_double_pairing::<Bn254Curve>();
        }

        #[test]
        fn fast_scalar_mul_matches_plain() {
            run_fast_matches_plain::<Bn254Curve>();
        }

        #[test]
        fn membership() {
            run_membership::<Bn254Curve>();
        }
    }
}
