use std::sync::OnceLock;

use ark_bls12_381::{Fq, Fq12Config, Fq2Config, Fq6Config, Fr, g1, g2};
use ark_ff::MontFp;

use super::{CurveConstants, CurveFamily, PairingCurve, TwistType};
use crate::config::CurveId;

/// BLS12-381: `u = -0xd201000000010000`, M-type twist over `ξ = 1 + i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bls12_381Curve;

impl PairingCurve for Bls12_381Curve {
    type Fq = Fq;
    type Fr = Fr;
    type Fp2Params = Fq2Config;
    type Fp6Params = Fq6Config;
    type Fp12Params = Fq12Config;
    type G1Config = g1::Config;
    type G2Config = g2::Config;

    const ID: CurveId = CurveId::Bls12_381;
    const FAMILY: CurveFamily = CurveFamily::Bls;
    const TWIST: TwistType = TwistType::M;
    const PARAMETER: u64 = 0xd201_0000_0001_0000;
    const PARAMETER_IS_NEGATIVE: bool = true;

    // 3·(p^4 - p^2 + 1)/r as Σ λ_i p^i; the factor 3 keeps every λ_i integral.
    const HARD_PART: &'static [&'static [i64]] = &[
        &[3, -1, 2, 0, -2, 1],
        &[-1, 2, 0, -2, 1],
        &[0, 1, -2, 1],
        &[1, -2, 1],
    ];

    // λ = -u^2
    const G1_EIGENVALUE: &'static [i64] = &[0, 0, -1];
    const G1_BASIS: &'static [&'static [&'static [i64]]] = &[
        &[&[0, 0, 1], &[1]],
        &[&[1], &[1, 0, -1]],
    ];
    const G2_BASIS: &'static [&'static [&'static [i64]]] = &[
        &[&[0, -1], &[1], &[0], &[0]],
        &[&[0], &[0, -1], &[1], &[0]],
        &[&[0], &[0], &[0, -1], &[1]],
        &[&[1], &[0], &[-1], &[0, 1]],
    ];

    fn endomorphism_coefficient() -> Fq {
        const BETA: Fq = MontFp!(
            "793479390729215512621379701633421447060886740281060493010456487427281649075476305620758731620350"
        );
        BETA
    }

    fn constants() -> &'static CurveConstants<Self> {
        static CONSTANTS: OnceLock<CurveConstants<Bls12_381Curve>> = OnceLock::new();
        CONSTANTS.get_or_init(CurveConstants::derive)
    }
}
