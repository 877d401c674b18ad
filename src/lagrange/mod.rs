//! Lagrange interpolation at zero over authority indices.
//!
//! Shares are indexed by distinct positive integers `x_1..x_k`. The basis
//! coefficients are
//!
//! ```text
//! l_i(0) = Π_{j≠i} (-x_j) / (x_i - x_j)   (mod r)
//! ```
//!
//! Two statically typed entry points recombine whole key shares:
//! [`interpolate_secret_shares`] over scalar components and
//! [`interpolate_verification_shares`] over group components. Each works
//! through a small capability trait, so the share type decides what its
//! components are.

use ark_ff::{PrimeField, batch_inversion};
use tracing::instrument;

use crate::arith::group::GroupElement;
use crate::errors::Error;

/// Checks that `indices` is non-empty and holds distinct positive integers.
pub fn validate_indices(indices: &[u64]) -> Result<(), Error> {
    if indices.is_empty() {
        return Err(Error::MalformedInput("empty index set".into()));
    }
    if indices.contains(&0) {
        return Err(Error::MalformedInput("share index 0 is reserved for the secret".into()));
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(Error::MalformedInput("duplicate share index".into()));
    }
    Ok(())
}

/// Basis coefficients `l_i(0)` for every index, in input order.
#[instrument(level = "trace", skip_all, fields(points = indices.len()))]
pub fn lagrange_basis_at_zero<F: PrimeField>(indices: &[u64]) -> Result<Vec<F>, Error> {
    validate_indices(indices)?;
    let points: Vec<F> = indices.iter().map(|&x| F::from(x)).collect();

    let mut numerators = Vec::with_capacity(points.len());
    let mut denominators = Vec::with_capacity(points.len());
    for (i, xi) in points.iter().enumerate() {
        let mut num = F::one();
        let mut den = F::one();
        for (j, xj) in points.iter().enumerate() {
            if i != j {
                num *= -*xj;
                den *= *xi - *xj;
            }
        }
        numerators.push(num);
        denominators.push(den);
    }

    // Distinct indices below r keep every denominator non-zero.
    batch_inversion(&mut denominators);
    Ok(numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, inv)| num * inv)
        .collect())
}

/// A share made of scalar components (a secret key share).
pub trait ScalarShare: Sized {
    type Scalar: PrimeField;

    fn scalar_count(&self) -> usize;

    fn scalar(&self, i: usize) -> &Self::Scalar;

    /// Builds a share of the same shape holding `scalars`.
    fn with_scalars(&self, scalars: Vec<Self::Scalar>) -> Self;
}

/// A share made of group components (a verification key share).
pub trait GroupShare: Sized {
    type Element: GroupElement;
    type Scalar: PrimeField;

    fn element_count(&self) -> usize;

    fn element(&self, i: usize) -> &Self::Element;

    /// Builds a share of the same shape holding `elements`; components that
    /// are not interpolated (such as a generator) are taken from `self`.
    fn with_elements(&self, elements: Vec<Self::Element>) -> Self;
}

fn check_shape(shares: usize, indices: &[u64], counts: impl Iterator<Item = usize>) -> Result<usize, Error> {
    if shares == 0 {
        return Err(Error::MalformedInput("no shares to interpolate".into()));
    }
    if shares != indices.len() {
        return Err(Error::MalformedInput(format!(
            "{shares} shares but {} indices",
            indices.len()
        )));
    }
    let mut counts = counts;
    let width = counts.next().unwrap_or(0);
    if counts.any(|c| c != width) {
        return Err(Error::MalformedInput("shares differ in component count".into()));
    }
    Ok(width)
}

/// Recombines secret shares at zero: component `k` of the result is
/// `Σ_i l_i(0)·share_i[k]`.
#[instrument(level = "trace", skip_all, fields(shares = shares.len()))]
pub fn interpolate_secret_shares<S: ScalarShare>(shares: &[S], indices: &[u64]) -> Result<S, Error> {
    let width = check_shape(shares.len(), indices, shares.iter().map(S::scalar_count))?;
    let basis = lagrange_basis_at_zero::<S::Scalar>(indices)?;
    let scalars = (0..width)
        .map(|k| {
            shares
                .iter()
                .zip(&basis)
                .map(|(share, l)| *share.scalar(k) * l)
                .sum()
        })
        .collect();
    Ok(shares[0].with_scalars(scalars))
}

/// Recombines verification shares at zero: component `k` of the result is
/// `Σ_i [l_i(0)]share_i[k]`, with `mul` supplying the scalar multiplication.
#[instrument(level = "trace", skip_all, fields(shares = shares.len()))]
pub fn interpolate_verification_shares<S, M>(shares: &[S], indices: &[u64], mul: M) -> Result<S, Error>
where
    S: GroupShare,
    M: Fn(&S::Element, &S::Scalar) -> S::Element,
{
    let width = check_shape(shares.len(), indices, shares.iter().map(S::element_count))?;
    let basis = lagrange_basis_at_zero::<S::Scalar>(indices)?;
    let elements = (0..width)
        .map(|k| {
            shares
                .iter()
                .zip(&basis)
                .fold(S::Element::identity(), |acc, (share, l)| {
                    acc.combine(&mul(share.element(k), l))
                })
        })
        .collect();
    Ok(shares[0].with_elements(elements))
}
