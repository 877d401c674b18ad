//! Group abstractions shared by the two source groups and the target group.
//!
//! [`GroupElement`] is the minimal interface the joint multi-exponentiation
//! in the engine is written against. Curve points implement it additively,
//! [`Gt`] multiplicatively (`combine` is multiplication, `double` squaring,
//! `negate` conjugation).

use core::fmt::{self, Debug};
use core::ops::Mul;

use ark_ec::short_weierstrass::{Projective, SWCurveConfig};
use ark_ff::{AdditiveGroup, Field, One, Zero};

use crate::arith::curve::{Fq12, PairingCurve};

/// Group operations used by scalar multiplication.
pub trait GroupElement: Clone + Send + Sync + Debug + 'static {
    /// Returns the identity element.
    fn identity() -> Self;

    /// Checks if this is the identity element.
    fn is_identity(&self) -> bool;

    /// Group law.
    fn combine(&self, other: &Self) -> Self;

    /// `self` combined with itself.
    fn double(&self) -> Self;

    /// Group inverse.
    fn negate(&self) -> Self;
}

impl<P: SWCurveConfig> GroupElement for Projective<P> {
    fn identity() -> Self {
        Projective::zero()
    }

    fn is_identity(&self) -> bool {
        self.is_zero()
    }

    fn combine(&self, other: &Self) -> Self {
        *self + other
    }

    fn double(&self) -> Self {
        AdditiveGroup::double(self)
    }

    fn negate(&self) -> Self {
        -*self
    }
}

/// Element of the order-`r` target group inside `Fq12`.
///
/// Values are only produced by the final exponentiation or by group
/// operations on such values, so every `Gt` is unitary and its inverse is its
/// conjugate.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Gt<C: PairingCurve>(pub(crate) Fq12<C>);

impl<C: PairingCurve> Gt<C> {
    /// The underlying `Fq12` value.
    pub fn value(&self) -> &Fq12<C> {
        &self.0
    }

    /// Raises `self` to `p^power` (the `p`-power Frobenius).
    pub fn frobenius(&self, power: usize) -> Self {
        let mut value = self.0;
        value.frobenius_map_in_place(power);
        Gt(value)
    }
}

impl<C: PairingCurve> Debug for Gt<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Gt").field(&self.0).finish()
    }
}

impl<C: PairingCurve> Default for Gt<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: PairingCurve> Mul for Gt<C> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Gt(self.0 * rhs.0)
    }
}

impl<C: PairingCurve> GroupElement for Gt<C> {
    fn identity() -> Self {
        Gt(Fq12::<C>::one())
    }

    fn is_identity(&self) -> bool {
        self.0.is_one()
    }

    fn combine(&self, other: &Self) -> Self {
        Gt(self.0 * other.0)
    }

    fn double(&self) -> Self {
        Gt(self.0.square())
    }

    fn negate(&self) -> Self {
        let mut value = self.0;
        value.conjugate_in_place();
        Gt(value)
    }
}
