use crate::arith::curve::{G2Projective, PairingCurve, Scalar};
use crate::config::ThresholdParameters;
use crate::lagrange::{GroupShare, ScalarShare};

/// Signing key of one authority: `x` and one `y_i` per attribute slot.
///
/// # Security
///
/// Owned by a single authority. Fewer than `t` threshold shares reveal
/// nothing about the combined key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey<C: PairingCurve> {
    pub x: Scalar<C>,
    pub y: Vec<Scalar<C>>,
}

impl<C: PairingCurve> SecretKey<C> {
    /// Number of attributes this key signs.
    pub fn capacity(&self) -> usize {
        self.y.len()
    }
}

/// Public counterpart of a [`SecretKey`]: `alpha = [x]g2`, `beta_i = [y_i]g2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey<C: PairingCurve> {
    pub g2: G2Projective<C>,
    pub alpha: G2Projective<C>,
    pub beta: Vec<G2Projective<C>>,
}

impl<C: PairingCurve> VerificationKey<C> {
    pub fn capacity(&self) -> usize {
        self.beta.len()
    }
}

/// Output of trusted-dealer key generation.
///
/// Share `i` (0-based position) belongs to the authority with index `i + 1`;
/// those indices are what threshold aggregation expects.
#[derive(Clone, Debug)]
pub struct KeyMaterial<C: PairingCurve> {
    pub parameters: ThresholdParameters,
    pub secret_keys: Vec<SecretKey<C>>,
    pub verification_keys: Vec<VerificationKey<C>>,
}

impl<C: PairingCurve> KeyMaterial<C> {
    /// Authority indices `1..=n`.
    pub fn indices(&self) -> Vec<u64> {
        (1..=self.secret_keys.len() as u64).collect()
    }

    /// Key pair held by the authority with 1-based `index`.
    pub fn share(&self, index: u64) -> Option<(&SecretKey<C>, &VerificationKey<C>)> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        Some((
            self.secret_keys.get(position)?,
            self.verification_keys.get(position)?,
        ))
    }
}

// Component 0 is `x`, the rest are `y`.
impl<C: PairingCurve> ScalarShare for SecretKey<C> {
    type Scalar = Scalar<C>;

    fn scalar_count(&self) -> usize {
        1 + self.y.len()
    }

    fn scalar(&self, i: usize) -> &Scalar<C> {
        if i == 0 { &self.x } else { &self.y[i - 1] }
    }

    fn with_scalars(&self, scalars: Vec<Scalar<C>>) -> Self {
        let mut scalars = scalars.into_iter();
        let x = scalars.next().unwrap_or(self.x);
        Self {
            x,
            y: scalars.collect(),
        }
    }
}

// Component 0 is `alpha`, the rest are `beta`; `g2` is carried over.
impl<C: PairingCurve> GroupShare for VerificationKey<C> {
    type Element = G2Projective<C>;
    type Scalar = Scalar<C>;

    fn element_count(&self) -> usize {
        1 + self.beta.len()
    }

    fn element(&self, i: usize) -> &G2Projective<C> {
        if i == 0 { &self.alpha } else { &self.beta[i - 1] }
    }

    fn with_elements(&self, elements: Vec<G2Projective<C>>) -> Self {
        let mut elements = elements.into_iter();
        let alpha = elements.next().unwrap_or(self.alpha);
        Self {
            g2: self.g2,
            alpha,
            beta: elements.collect(),
        }
    }
}
