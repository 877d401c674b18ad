//! Error types for the crate.
//!
//! Two tiers, mirroring the split between the pairing engine and the
//! credential protocol built on top of it:
//!
//! - [`BackendError`] is raised by curve descriptions, the pairing engine and
//!   the serialization helpers.
//! - [`Error`] is what the protocol API returns. Engine errors convert into it
//!   through `#[from]`.
//!
//! Verification never produces an error: a signature that does not verify is
//! reported as `false`, while caller misuse (wrong attribute count, bad
//! threshold configuration, unsupported digest) is reported as an [`Error`].
//!
//! # Examples
//!
//! ```rust
//! use threshold_credentials::errors::{BackendError, Error};
//!
//! let err: Error = BackendError::Math("zero miller loop output").into();
//! assert!(matches!(err, Error::Backend(_)));
//! ```

use thiserror::Error;

/// Errors bubbled up from the pairing engine and curve descriptions.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
    #[error("{0}")]
    Other(String),
}

/// High-level errors returned by the credential protocol API.
#[derive(Debug, Error)]
pub enum Error {
    /// Attribute vector length does not match the key capacity.
    #[error("parameter mismatch: expected {expected} attributes, got {actual}")]
    ParameterMismatch { expected: usize, actual: usize },
    /// Threshold outside `1..=authorities`.
    #[error("invalid threshold configuration: threshold {threshold} of {authorities} authorities")]
    ThresholdConfig { threshold: usize, authorities: usize },
    /// Unsupported digest algorithm or empty digest output.
    #[error("hash failure: {0}")]
    HashFailure(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
