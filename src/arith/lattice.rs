//! Short-lattice scalar decomposition for GLV and Galbraith-Scott
//! multiplication.
//!
//! A [`Lattice`] holds a reduced basis of `{ v : Σ v_i λ^i ≡ 0 (mod r) }`.
//! Babai rounding against that basis turns one scalar `e` into `m` short
//! sub-scalars with `Σ u_i λ^i ≡ e (mod r)`. All arithmetic here is exact
//! big-integer arithmetic; nothing is constant time.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Evaluates `Σ coeffs[k] · u^k`.
pub(crate) fn eval_poly(coeffs: &[i64], u: &BigInt) -> BigInt {
    coeffs
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, &c| acc * u + BigInt::from(c))
}

fn determinant(m: &[Vec<BigInt>]) -> BigInt {
    match m.len() {
        0 => BigInt::one(),
        1 => m[0][0].clone(),
        2 => &m[0][0] * &m[1][1] - &m[0][1] * &m[1][0],
        _ => {
            let mut det = BigInt::zero();
            for (j, pivot) in m[0].iter().enumerate() {
                if pivot.is_zero() {
                    continue;
                }
                let minor: Vec<Vec<BigInt>> = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(k, _)| *k != j)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                let term = pivot * determinant(&minor);
                if j % 2 == 0 {
                    det += term;
                } else {
                    det -= term;
                }
            }
            det
        }
    }
}

/// `round(n / d)` with ties towards +∞.
fn round_div(n: &BigInt, d: &BigInt) -> BigInt {
    let (n, d) = if d.is_negative() {
        (-n, -d)
    } else {
        (n.clone(), d.clone())
    };
    (n * BigInt::from(2) + &d).div_floor(&(d * BigInt::from(2)))
}

#[derive(Clone, Debug)]
pub struct Lattice {
    eigenvalue: BigUint,
    basis: Vec<Vec<BigInt>>,
    determinant: BigInt,
    /// Signed cofactors of the first column of `basis`.
    cofactors: Vec<BigInt>,
}

impl Lattice {
    /// Builds a lattice from rows whose entries are polynomials in the curve
    /// parameter `u`.
    pub(crate) fn from_polynomials(rows: &[&[&[i64]]], u: &BigInt, eigenvalue: BigUint) -> Self {
        let basis: Vec<Vec<BigInt>> = rows
            .iter()
            .map(|row| row.iter().map(|entry| eval_poly(entry, u)).collect())
            .collect();
        let det = determinant(&basis);
        let cofactors = (0..basis.len())
            .map(|j| {
                let minor: Vec<Vec<BigInt>> = basis
                    .iter()
                    .enumerate()
                    .filter(|(row, _)| *row != j)
                    .map(|(_, row)| row[1..].to_vec())
                    .collect();
                let minor = determinant(&minor);
                if j % 2 == 0 { minor } else { -minor }
            })
            .collect();
        Self {
            eigenvalue,
            basis,
            determinant: det,
            cofactors,
        }
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    /// Endomorphism eigenvalue `λ` this lattice was reduced for.
    pub fn eigenvalue(&self) -> &BigUint {
        &self.eigenvalue
    }

    /// Babai rounding of `(e, 0, .., 0)`; the result satisfies
    /// `Σ u_i λ^i ≡ e (mod r)`.
    pub fn decompose(&self, e: &BigUint) -> Vec<BigInt> {
        let e = BigInt::from(e.clone());
        let multipliers: Vec<BigInt> = self
            .cofactors
            .iter()
            .map(|cof| round_div(&(&e * cof), &self.determinant))
            .collect();
        (0..self.dimension())
            .map(|i| {
                let start = if i == 0 { e.clone() } else { BigInt::zero() };
                self.basis
                    .iter()
                    .zip(&multipliers)
                    .fold(start, |acc, (row, c)| acc - c * &row[i])
            })
            .collect()
    }
}

/// Reduces `value` modulo `order` and picks whichever of `x` and `order - x`
/// is shorter. The flag is set when the negated representative was chosen.
pub fn balance(value: &BigInt, order: &BigUint) -> (BigUint, bool) {
    let modulus = BigInt::from(order.clone());
    let reduced = value.mod_floor(&modulus).magnitude().clone();
    if reduced.is_zero() {
        return (reduced, false);
    }
    let negated = order - &reduced;
    if negated.bits() < reduced.bits() {
        (negated, true)
    } else {
        (reduced, false)
    }
}
