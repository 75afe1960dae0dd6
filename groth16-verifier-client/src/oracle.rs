use std::future::Future;

use groth16_calldata::VerifierCallArgs;

use crate::VerificationError;

/// An entity implementing the Groth16 verifier entry point
/// `verifyProof(uint[2] _pA, uint[2][2] _pB, uint[2] _pC, uint[N] _pubSignals) returns (bool)`.
///
/// Implementations receive the four components of `args` positionally and must not reorder
/// them. `Ok(false)` means the proof was checked and rejected.
pub trait VerificationOracle {
    /// Submits the call and returns the verifier's verdict.
    fn verify_proof(
        &self,
        args: &VerifierCallArgs,
    ) -> impl Future<Output = Result<bool, VerificationError>> + Send;
}
