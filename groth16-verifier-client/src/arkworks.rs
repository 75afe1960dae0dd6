use std::sync::Arc;

use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{PrimeField, Zero};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use groth16_calldata::{FieldElement, G1Coordinates, G2Coordinates, VerifierCallArgs};

use crate::{VerificationError, VerificationOracle};

/// A local reference oracle for BN254 that checks proofs with arkworks.
///
/// It follows the semantics of the Solidity verifier generated by snarkjs: the number of
/// public signals is part of the call signature, so a mismatch is a rejected call, while
/// values outside their field or points off the curve make the proof invalid.
///
/// As an oracle, the pairing check runs on tokio's blocking pool, so a
/// [`VerificationClient`](crate::VerificationClient) timeout stops waiting for it.
#[derive(Debug, Clone)]
pub struct ArkworksOracle {
    pvk: Arc<PreparedVerifyingKey<Bn254>>,
    num_public_inputs: usize,
}

impl ArkworksOracle {
    /// Creates an oracle for the given verifying key.
    pub fn new(vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            pvk: Arc::new(ark_groth16::prepare_verifying_key(vk)),
            num_public_inputs: vk.gamma_abc_g1.len().saturating_sub(1),
        }
    }

    /// The number of public signals the verifying key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.num_public_inputs
    }

    /// Runs the pairing check synchronously.
    pub fn check(&self, args: &VerifierCallArgs) -> Result<bool, VerificationError> {
        if args.public_signals.len() != self.num_public_inputs {
            return Err(VerificationError::ArgumentRejected(format!(
                "expected uint256[{}] public signals, got {}",
                self.num_public_inputs,
                args.public_signals.len()
            )));
        }
        let Some(proof) = decode_proof(args) else {
            tracing::debug!("proof coordinates are not valid curve points");
            return Ok(false);
        };
        let Some(inputs) = args
            .public_signals
            .iter()
            .map(to_field::<ark_bn254::Fr>)
            .collect::<Option<Vec<_>>>()
        else {
            tracing::debug!("public signal is not a scalar field element");
            return Ok(false);
        };
        Groth16::<Bn254>::verify_proof(&self.pvk, &proof, &inputs)
            .map_err(|e| VerificationError::ArgumentRejected(e.to_string()))
    }
}

impl VerificationOracle for ArkworksOracle {
    async fn verify_proof(&self, args: &VerifierCallArgs) -> Result<bool, VerificationError> {
        let oracle = self.clone();
        let args = args.clone();
        tokio::task::spawn_blocking(move || oracle.check(&args))
            .await
            .map_err(|e| {
                VerificationError::OracleUnavailable(
                    eyre::Report::new(e).wrap_err("pairing check did not complete"),
                )
            })?
    }
}

fn to_field<F: PrimeField>(value: &FieldElement) -> Option<F> {
    let modulus: num_bigint::BigUint = F::MODULUS.into();
    (value.as_biguint() < &modulus).then(|| F::from(value.as_biguint().clone()))
}

fn decode_proof(args: &VerifierCallArgs) -> Option<Proof<Bn254>> {
    Some(Proof {
        a: g1(&args.pi_a)?,
        b: g2(&args.pi_b)?,
        c: g1(&args.pi_c)?,
    })
}

fn g1(coords: &G1Coordinates) -> Option<G1Affine> {
    let x = to_field::<Fq>(&coords[0])?;
    let y = to_field::<Fq>(&coords[1])?;
    if x.is_zero() && y.is_zero() {
        return Some(G1Affine::zero());
    }
    let p = G1Affine::new_unchecked(x, y);
    (p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()).then_some(p)
}

fn g2(coords: &G2Coordinates) -> Option<G2Affine> {
    // the verifier orders each pair as [c1, c0]
    let x = Fq2::new(to_field(&coords[0][1])?, to_field(&coords[0][0])?);
    let y = Fq2::new(to_field(&coords[1][1])?, to_field(&coords[1][0])?);
    if x.is_zero() && y.is_zero() {
        return Some(G2Affine::zero());
    }
    let p = G2Affine::new_unchecked(x, y);
    (p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()).then_some(p)
}
