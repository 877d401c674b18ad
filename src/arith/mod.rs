//! Arithmetic layer underneath the pairing engine.
//!
//! - **[`curve`]**: [`PairingCurve`] descriptions (field tower, source groups,
//!   curve parameter, final exponentiation chain, decomposition lattices) and
//!   their cached [`CurveConstants`].
//! - **[`group`]**: the [`GroupElement`] interface and the target group [`Gt`].
//! - **[`field`]**: scalar sampling and integer conversion.
//! - **[`lattice`]**: Babai rounding against short lattice bases.
//!
//! Raw field and curve-point arithmetic comes from arkworks.

pub mod curve;
pub use curve::*;

pub mod group;
pub use group::*;

pub mod field;
pub use field::*;

pub mod lattice;
pub use lattice::Lattice;
