//! Configuration types for the credential scheme and its pairing engine.
//!
//! Everything here is plain data deriving `serde` traits so deployments can
//! keep scheme settings next to the rest of their configuration.
//!
//! # Example
//!
//! ```rust
//! use threshold_credentials::config::{CurveId, HashAlgorithm, SchemeConfig, ThresholdParameters};
//!
//! let config = SchemeConfig::new(CurveId::Bls12_381).with_hash(HashAlgorithm::Sha512);
//! config.curve.ensure_supported().expect("curve compiled in");
//!
//! let threshold = ThresholdParameters::new(2, 3).expect("2-of-3 is valid");
//! assert_eq!(threshold.authorities, 3);
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Supported pairing-friendly elliptic curves.
///
/// - **BLS12-381**: BLS family, negative curve parameter, M-type sextic twist.
///   Roughly 128 bits of security.
/// - **BN254**: BN family, positive curve parameter, D-type sextic twist.
///   Roughly 100 bits of security; exercises the Frobenius fix-up of the
///   Miller loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    /// BN254 curve (~100-bit security)
    Bn254,
    /// BLS12-381 curve (~128-bit security, recommended)
    Bls12_381,
}

impl CurveId {
    /// Checks that the curve was compiled in.
    ///
    /// ```rust
    /// use threshold_credentials::config::CurveId;
    ///
    /// # #[cfg(feature = "bn254")]
    /// CurveId::Bn254.ensure_supported().expect("bn254 feature enabled");
    /// ```
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match self {
            CurveId::Bls12_381 => {
                if cfg!(feature = "bls12_381") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with the `bls12_381` feature to use BLS12-381",
                    ))
                }
            }
            CurveId::Bn254 => {
                if cfg!(feature = "bn254") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with the `bn254` feature to use BN254",
                    ))
                }
            }
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveId::Bn254 => f.write_str("bn254"),
            CurveId::Bls12_381 => f.write_str("bls12-381"),
        }
    }
}

/// Pairing engine switches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Use GLV / Galbraith-Scott decomposition for scalar multiplication and
    /// target-group exponentiation. When off, plain double-and-add is used.
    pub endomorphism: bool,
    /// Check prime-order subgroup membership of signature and verification
    /// key elements before verifying. Off by default: inputs produced by this
    /// crate's own key generation and signing are always well formed.
    pub validate_membership: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endomorphism: true,
            validate_membership: false,
        }
    }
}

/// Digest used to map attribute strings onto scalars and curve points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Blake3,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(Error::HashFailure(format!("unsupported digest algorithm `{s}`"))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blake3 => "blake3",
        };
        f.write_str(name)
    }
}

/// Settings consumed when constructing a credential scheme.
///
/// # Fields
///
/// - `curve`: must match the curve type the scheme is instantiated with
/// - `engine`: pairing engine switches
/// - `hash`: digest for attribute and signature-base hashing
/// - `workers`: size of the worker pool used by the dispatched strategy;
///   `None` lets rayon pick
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemeConfig {
    pub curve: CurveId,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub hash: HashAlgorithm,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl SchemeConfig {
    pub fn new(curve: CurveId) -> Self {
        Self {
            curve,
            engine: EngineConfig::default(),
            hash: HashAlgorithm::default(),
            workers: None,
        }
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Validates the configuration: the curve must be compiled in and a
    /// requested worker pool must have at least one thread.
    pub fn validate(&self) -> Result<(), Error> {
        self.curve.ensure_supported()?;
        if self.workers == Some(0) {
            return Err(Error::InvalidConfig(
                "worker pool must have at least one thread".into(),
            ));
        }
        Ok(())
    }
}

/// `(t, n)` parameters for trusted-dealer key generation.
///
/// # Constraints
///
/// - `threshold` must satisfy `1 <= threshold <= authorities`
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParameters {
    /// Minimum number of authorities whose shares reconstruct the key (t)
    pub threshold: usize,
    /// Total number of authorities (n)
    pub authorities: usize,
}

impl ThresholdParameters {
    pub fn new(threshold: usize, authorities: usize) -> Result<Self, Error> {
        let params = Self {
            threshold,
            authorities,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.threshold < 1 || self.threshold > self.authorities {
            return Err(Error::ThresholdConfig {
                threshold: self.threshold,
                authorities: self.authorities,
            });
        }
        Ok(())
    }
}
