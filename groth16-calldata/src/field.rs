//! Arbitrary-precision field elements and the curves whose moduli bound them.

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use ark_ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize, de};

/// An element of a prime field, stored as an unbounded unsigned integer.
///
/// Parsing accepts decimal numerals and `0x`-prefixed hexadecimal numerals, since both
/// appear in the artifacts of the circom ecosystem (`proof.json` uses decimal, exported
/// calldata uses hex). The value is not reduced: range checks against a modulus happen in
/// the [`ProofEncoder`](crate::ProofEncoder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

/// Error returned when a string is not a valid numeral.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFieldElementError {
    /// The input string was empty.
    #[error("empty value")]
    Empty,
    /// The input string contained characters that are not digits of its radix.
    #[error("`{0}` is not a decimal or 0x-prefixed hexadecimal integer")]
    InvalidNumeral(String),
}

impl FieldElement {
    /// Wraps an integer.
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// Returns the integer value.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consumes `self` and returns the integer value.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// Formats the value as `0x`-prefixed hex, zero padded to at least 32 bytes.
    ///
    /// This is the format snarkjs uses when exporting Solidity calldata.
    pub fn to_padded_hex(&self) -> String {
        format!("0x{:064x}", self.0)
    }

    /// Converts the value into a `uint256` word, or `None` if it does not fit into 256 bits.
    pub fn to_u256(&self) -> Option<U256> {
        U256::try_from_be_slice(&self.0.to_bytes_be())
    }

    /// Converts an arkworks prime field element into its canonical integer.
    pub fn from_prime_field<F: PrimeField>(f: F) -> Self {
        Self(f.into_bigint().into())
    }
}

impl FromStr for FieldElement {
    type Err = ParseFieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseFieldElementError::Empty);
        }
        let invalid = || ParseFieldElementError::InvalidNumeral(s.to_owned());
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        // BigUint's own parser tolerates `+` and `_`, neither of which is a valid numeral here
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        BigUint::parse_bytes(digits.as_bytes(), radix)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl Serialize for FieldElement {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.0.to_string())
    }
}

struct FieldElementVisitor;

impl de::Visitor<'_> for FieldElementVisitor {
    type Value = FieldElement;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal or 0x-prefixed hexadecimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(FieldElementVisitor)
    }
}

/// The pairing-friendly curves a proof can be encoded for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// BN254, called `bn128` by circom. The curve of the EVM pairing precompiles.
    #[default]
    Bn254,
    /// BLS12-381. Its base field does not fit into a `uint256`.
    Bls12_381,
}

/// Error returned when parsing an unknown curve name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown curve `{0}`, expected one of bn254, bls12-381")]
pub struct UnknownCurve(String);

impl Curve {
    /// Returns the name of the curve as written by circom/snarkjs.
    pub fn circom_name(&self) -> &'static str {
        match self {
            Curve::Bn254 => "bn128",
            Curve::Bls12_381 => "bls12381",
        }
    }

    /// Looks a curve up by its circom name or its arkworks name.
    pub fn from_circom_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bn128" | "bn254" | "alt_bn128" => Some(Curve::Bn254),
            "bls12381" | "bls12_381" | "bls12-381" => Some(Curve::Bls12_381),
            _ => None,
        }
    }

    /// Modulus of the base field, which bounds the proof coordinates.
    pub fn base_field_modulus(&self) -> BigUint {
        match self {
            Curve::Bn254 => ark_bn254::Fq::MODULUS.into(),
            Curve::Bls12_381 => ark_bls12_381::Fq::MODULUS.into(),
        }
    }

    /// Modulus of the scalar field, which bounds the public signals.
    pub fn scalar_field_modulus(&self) -> BigUint {
        match self {
            Curve::Bn254 => ark_bn254::Fr::MODULUS.into(),
            Curve::Bls12_381 => ark_bls12_381::Fr::MODULUS.into(),
        }
    }
}

impl FromStr for Curve {
    type Err = UnknownCurve;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Curve::from_circom_name(s).ok_or_else(|| UnknownCurve(s.to_owned()))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Bn254 => f.write_str("bn254"),
            Curve::Bls12_381 => f.write_str("bls12-381"),
        }
    }
}
