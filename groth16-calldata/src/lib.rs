//! # Groth16 verifier calldata
//!
//! A crate for turning Groth16 proofs into the arguments of a Solidity verifier's
//! `verifyProof(uint[2] _pA, uint[2][2] _pB, uint[2] _pC, uint[N] _pubSignals)` entry point,
//! as generated by snarkjs or gnark.
//!
//! A proof can arrive in two shapes, modeled by [`ProofSource`]:
//! - a structured proof (`proof.json` plus `public.json`, see [`circom_proof_types`]),
//! - a serialized calldata string, as printed by `snarkjs zkey export soliditycalldata`.
//!
//! Both are encoded by a [`ProofEncoder`] into the same [`VerifierCallArgs`]. All values are
//! arbitrary-precision [`FieldElement`]s, range-checked against the moduli of the configured
//! [`Curve`].
//!
//! ## Example usage
//! ```rust,no_run
//! use circom_proof_types::groth16::{Proof, PublicSignals};
//! use groth16_calldata::{G2Order, ProofEncoder, ProofSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let proof = Proof::from_path("build/proof.json")?;
//! let signals = PublicSignals::from_path("build/public.json")?;
//! // proof.json stores G2 pairs in snarkjs order
//! let encoder = ProofEncoder::default().g2_order(G2Order::Snarkjs);
//! let args = encoder.encode(&ProofSource::structured(proof, signals))?;
//! println!("{}", args.to_calldata_string());
//! # Ok(())
//! # }
//! ```
//!
//! ## G2 coordinate order
//! snarkjs and arkworks store the coordinates of a G2 point as `[c0, c1]` pairs of the
//! quadratic extension, while the EVM pairing precompile, and therefore the Solidity
//! verifier, expects `[c1, c0]`. The encoder is the single place that translates between
//! the two, see [`G2Order`]. Serialized calldata is always taken as already translated.
#![deny(missing_docs)]

#[cfg(feature = "ark")]
pub mod ark;
mod call_args;
mod encoder;
mod field;

pub use call_args::{G1Coordinates, G2Coordinates, VerifierCallArgs};
pub use encoder::{G2Order, ProofEncoder, ProofSource};
pub use field::{Curve, FieldElement, ParseFieldElementError, UnknownCurve};

/// Errors that can occur while encoding a proof.
///
/// Both variants are caller input errors; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A structured proof or its public signals are missing coordinates, contain
    /// non-numeric values, or contain values outside their field.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// A serialized calldata string has fewer than eight values, or contains values that
    /// are not integers or lie outside their field.
    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),
}
