//! Serde support for keys, signatures and public parameters.
//!
//! # Serialization Strategy
//!
//! - **Curve points** (G1, G2): arkworks compressed encoding
//! - **Scalars**: arkworks compressed encoding (little-endian, canonical)
//! - **Vectors**: arrays of byte strings
//!
//! Decoding goes through arkworks' validating deserializer, so points that
//! are off the curve or outside the prime-order subgroup are rejected here
//! even though the pairing engine itself does not check them.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "bn254")]
//! # {
//! use rand::{SeedableRng, rngs::StdRng};
//! use threshold_credentials::{Bn254Curve, CredentialScheme, InlineCoconut, VerificationKey};
//! use threshold_credentials::config::{CurveId, SchemeConfig};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let scheme = InlineCoconut::<Bn254Curve>::new(SchemeConfig::new(CurveId::Bn254)).unwrap();
//! let params = scheme.setup(2).unwrap();
//! let (_, vk) = scheme.keygen(&mut rng, &params).unwrap();
//!
//! let json = serde_json::to_string(&vk).unwrap();
//! let decoded: VerificationKey<Bn254Curve> = serde_json::from_str(&json).unwrap();
//! assert_eq!(decoded, vk);
//! # }
//! ```

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PairingCurve;
use crate::coconut::{Params, SecretKey, Signature, VerificationKey};
use crate::config::HashAlgorithm;

fn to_bytes<T: CanonicalSerialize, E: serde::ser::Error>(value: &T) -> Result<Vec<u8>, E> {
    let mut bytes = Vec::with_capacity(value.compressed_size());
    value
        .serialize_compressed(&mut bytes)
        .map_err(E::custom)?;
    Ok(bytes)
}

fn to_bytes_vec<T: CanonicalSerialize, E: serde::ser::Error>(values: &[T]) -> Result<Vec<Vec<u8>>, E> {
    values.iter().map(to_bytes::<T, E>).collect()
}

fn from_bytes<T: CanonicalDeserialize, E: de::Error>(bytes: &[u8]) -> Result<T, E> {
    T::deserialize_compressed(bytes).map_err(E::custom)
}

fn from_bytes_vec<T: CanonicalDeserialize, E: de::Error>(items: &[Vec<u8>]) -> Result<Vec<T>, E> {
    items.iter().map(|bytes| from_bytes::<T, E>(bytes)).collect()
}

// Implement Serialize and Deserialize for SecretKey
impl<C: PairingCurve> Serialize for SecretKey<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SecretKey", 2)?;
        state.serialize_field("x", &to_bytes::<_, S::Error>(&self.x)?)?;
        state.serialize_field("y", &to_bytes_vec::<_, S::Error>(&self.y)?)?;
        state.end()
    }
}

impl<'de, C: PairingCurve> Deserialize<'de> for SecretKey<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SecretKeyHelper {
            x: Vec<u8>,
            y: Vec<Vec<u8>>,
        }

        let helper = SecretKeyHelper::deserialize(deserializer)?;
        Ok(SecretKey {
            x: from_bytes::<_, D::Error>(&helper.x)?,
            y: from_bytes_vec::<_, D::Error>(&helper.y)?,
        })
    }
}

// Implement Serialize and Deserialize for VerificationKey
impl<C: PairingCurve> Serialize for VerificationKey<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("VerificationKey", 3)?;
        state.serialize_field("g2", &to_bytes::<_, S::Error>(&self.g2)?)?;
        state.serialize_field("alpha", &to_bytes::<_, S::Error>(&self.alpha)?)?;
        state.serialize_field("beta", &to_bytes_vec::<_, S::Error>(&self.beta)?)?;
        state.end()
    }
}

impl<'de, C: PairingCurve> Deserialize<'de> for VerificationKey<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct VerificationKeyHelper {
            g2: Vec<u8>,
            alpha: Vec<u8>,
            beta: Vec<Vec<u8>>,
        }

        let helper = VerificationKeyHelper::deserialize(deserializer)?;
        Ok(VerificationKey {
            g2: from_bytes::<_, D::Error>(&helper.g2)?,
            alpha: from_bytes::<_, D::Error>(&helper.alpha)?,
            beta: from_bytes_vec::<_, D::Error>(&helper.beta)?,
        })
    }
}

// Implement Serialize and Deserialize for Signature
impl<C: PairingCurve> Serialize for Signature<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Signature", 2)?;
        state.serialize_field("sig1", &to_bytes::<_, S::Error>(&self.sig1)?)?;
        state.serialize_field("sig2", &to_bytes::<_, S::Error>(&self.sig2)?)?;
        state.end()
    }
}

impl<'de, C: PairingCurve> Deserialize<'de> for Signature<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SignatureHelper {
            sig1: Vec<u8>,
            sig2: Vec<u8>,
        }

        let helper = SignatureHelper::deserialize(deserializer)?;
        Ok(Signature {
            sig1: from_bytes::<_, D::Error>(&helper.sig1)?,
            sig2: from_bytes::<_, D::Error>(&helper.sig2)?,
        })
    }
}

// Implement Serialize and Deserialize for Params
impl<C: PairingCurve> Serialize for Params<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Params", 4)?;
        state.serialize_field("g1", &to_bytes::<_, S::Error>(&self.g1)?)?;
        state.serialize_field("g2", &to_bytes::<_, S::Error>(&self.g2)?)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("hash", &self.hash)?;
        state.end()
    }
}

impl<'de, C: PairingCurve> Deserialize<'de> for Params<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ParamsHelper {
            g1: Vec<u8>,
            g2: Vec<u8>,
            capacity: usize,
            hash: HashAlgorithm,
        }

        let helper = ParamsHelper::deserialize(deserializer)?;
        if helper.capacity == 0 {
            return Err(de::Error::custom("attribute capacity must be at least 1"));
        }
        Ok(Params {
            g1: from_bytes::<_, D::Error>(&helper.g1)?,
            g2: from_bytes::<_, D::Error>(&helper.g2)?,
            capacity: helper.capacity,
            hash: helper.hash,
        })
    }
}
