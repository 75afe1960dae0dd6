//! Groth16 proof verification against a verification oracle.
//!
//! A [`VerificationOracle`] is anything that implements the fixed entry point
//! `verifyProof(uint[2], uint[2][2], uint[2], uint[N]) returns (bool)`. Two oracles are
//! provided:
//! - [`EvmVerifierOracle`] calls a deployed Solidity verifier through `eth_call`,
//! - [`ArkworksOracle`] performs the same pairing check locally from a verifying key.
//!
//! The [`VerificationClient`] submits [`VerifierCallArgs`] produced by a
//! [`ProofEncoder`](groth16_calldata::ProofEncoder) and reports the oracle's verdict.
//! A verdict of `false` is a successful detection of an invalid proof, not an error.
//!
//! ```rust,no_run
//! use groth16_calldata::{ProofEncoder, ProofSource};
//! use groth16_verifier_client::{EvmVerifierOracle, VerificationClient};
//! use std::time::Duration;
//!
//! # async fn run(calldata: String) -> eyre::Result<()> {
//! let oracle = EvmVerifierOracle::new(
//!     "http://127.0.0.1:8545".parse()?,
//!     "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse()?,
//! );
//! let client = VerificationClient::new().with_timeout(Duration::from_secs(10));
//! let valid = client
//!     .verify_source(&ProofEncoder::default(), &ProofSource::serialized(calldata), &oracle)
//!     .await?;
//! println!("The proof is valid: {valid}");
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]

mod arkworks;
mod client;
mod evm;
mod oracle;

#[cfg(test)]
pub(crate) mod test_circuit;

pub use arkworks::ArkworksOracle;
pub use client::VerificationClient;
pub use evm::{EvmVerifierOracle, encode_verify_proof_call, verify_proof_selector};
pub use groth16_calldata::VerifierCallArgs;
pub use oracle::VerificationOracle;

/// Errors that can occur while submitting a proof to a verification oracle.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The call could not be dispatched or completed: connectivity failure, timeout, or no
    /// verifier at the expected address. The call is read-only and may be retried.
    #[error("verification oracle unavailable")]
    OracleUnavailable(#[source] eyre::Report),
    /// The oracle rejected the shape of the arguments, e.g. a wrong number of public
    /// signals. This points to an encoding defect rather than to an invalid proof.
    #[error("verification oracle rejected the call arguments: {0}")]
    ArgumentRejected(String),
}

/// Errors of the full encode-and-verify pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The proof could not be encoded.
    #[error(transparent)]
    Encoding(#[from] groth16_calldata::EncodingError),
    /// The encoded proof could not be verified.
    #[error(transparent)]
    Verification(#[from] VerificationError),
}
