use std::sync::OnceLock;

use ark_bn254::{Fq, Fq12Config, Fq2Config, Fq6Config, Fr, g1, g2};
use ark_ff::MontFp;

use super::{CurveConstants, CurveFamily, PairingCurve, TwistType};
use crate::config::CurveId;

/// BN254: `u = 4965661367192848881`, D-type twist over `ξ = 9 + i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bn254Curve;

impl PairingCurve for Bn254Curve {
    type Fq = Fq;
    type Fr = Fr;
    type Fp2Params = Fq2Config;
    type Fp6Params = Fq6Config;
    type Fp12Params = Fq12Config;
    type G1Config = g1::Config;
    type G2Config = g2::Config;

    const ID: CurveId = CurveId::Bn254;
    const FAMILY: CurveFamily = CurveFamily::Bn;
    const TWIST: TwistType = TwistType::D;
    const PARAMETER: u64 = 4_965_661_367_192_848_881;
    const PARAMETER_IS_NEGATIVE: bool = false;

    const HARD_PART: &'static [&'static [i64]] = &[
        &[-2, -18, -30, -36],
        &[1, -12, -18, -36],
        &[1, 0, 6],
        &[1],
    ];

    // λ = 36u^3 + 18u^2 + 6u + 1
    const G1_EIGENVALUE: &'static [i64] = &[1, 6, 18, 36];
    const G1_BASIS: &'static [&'static [&'static [i64]]] = &[
        &[&[-1, -4, -6], &[-1, -2]],
        &[&[-1, -2], &[0, 2, 6]],
    ];
    const G2_BASIS: &'static [&'static [&'static [i64]]] = &[
        &[&[1, 2], &[0], &[0, 2], &[1]],
        &[&[0, 2], &[1, 1], &[0, -1], &[0, 1]],
        &[&[1, 1], &[0, 1], &[0, 1], &[0, -2]],
        &[&[1, 2], &[0, -1], &[-1, -1], &[0, -1]],
    ];

    fn endomorphism_coefficient() -> Fq {
        const BETA: Fq = MontFp!("2203960485148121921418603742825762020974279258880205651966");
        BETA
    }

    fn constants() -> &'static CurveConstants<Self> {
        static CONSTANTS: OnceLock<CurveConstants<Bn254Curve>> = OnceLock::new();
        CONSTANTS.get_or_init(CurveConstants::derive)
    }
}
