use crate::arith::curve::{G1Projective, PairingCurve};

/// Credential `(sig1, sig2)` with `sig2 = [x + Σ m_i·y_i]sig1`.
///
/// Partial signatures over the same attributes share `sig1`, which is what
/// lets them be aggregated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<C: PairingCurve> {
    pub sig1: G1Projective<C>,
    pub sig2: G1Projective<C>,
}

/// How a set of signatures or verification keys is combined.
///
/// - `Full`: every input has unit weight (independent authorities).
/// - `Threshold(indices)`: inputs are threshold shares; `indices[i]` is the
///   1-based authority index of input `i`, and inputs are weighted by the
///   Lagrange basis at zero over that index set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AggregationMode {
    Full,
    Threshold(Vec<u64>),
}

impl AggregationMode {
    pub fn threshold(indices: impl Into<Vec<u64>>) -> Self {
        AggregationMode::Threshold(indices.into())
    }
}
