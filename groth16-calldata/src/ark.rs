//! Conversions between arkworks BN254 Groth16 proofs and the verifier call representation.

use ark_bn254::Bn254;
use ark_ec::AffineRepr;
use ark_ff::{PrimeField, Zero};
use ark_groth16::Proof;
use circom_proof_types::groth16::{Proof as SnarkjsProof, PublicSignals};

use crate::{Curve, FieldElement, VerifierCallArgs};

/// Prepares an arkworks proof and its public inputs for a call to the Solidity verifier.
///
/// The G2 element is emitted in the verifier's `[c1, c0]` order, so the result equals what
/// [`ProofEncoder`](crate::ProofEncoder) produces from the same proof's `proof.json` with
/// [`G2Order::Snarkjs`](crate::G2Order::Snarkjs).
pub fn prepare_call_args(proof: &Proof<Bn254>, public_inputs: &[ark_bn254::Fr]) -> VerifierCallArgs {
    // Infinity is represented as (0, 0)
    let (ax, ay) = proof.a.xy().unwrap_or_default();
    // Infinity is represented as (0, 0, 0, 0)
    let (bx, by) = proof.b.xy().unwrap_or_default();
    // Infinity is represented as (0, 0)
    let (cx, cy) = proof.c.xy().unwrap_or_default();

    VerifierCallArgs {
        pi_a: [fe(ax), fe(ay)],
        pi_b: [[fe(bx.c1), fe(bx.c0)], [fe(by.c1), fe(by.c0)]],
        pi_c: [fe(cx), fe(cy)],
        public_signals: public_inputs.iter().copied().map(fe).collect(),
    }
}

/// Writes an arkworks proof in the projective layout snarkjs uses for `proof.json`.
///
/// Finite points get the homogeneous coordinate `1`; the point at infinity is `[0, 1, 0]`
/// in G1 and `[[0, 0], [1, 0], [0, 0]]` in G2.
pub fn snarkjs_proof(proof: &Proof<Bn254>) -> SnarkjsProof {
    SnarkjsProof {
        pi_a: g1_projective(&proof.a),
        pi_b: g2_projective(&proof.b),
        pi_c: g1_projective(&proof.c),
        protocol: Some(SnarkjsProof::PROTOCOL.to_owned()),
        curve: Some(Curve::Bn254.circom_name().to_owned()),
    }
}

/// Writes public inputs the way snarkjs writes `public.json`.
pub fn snarkjs_public_signals(public_inputs: &[ark_bn254::Fr]) -> PublicSignals {
    public_inputs.iter().map(|f| fe(*f).to_string()).collect()
}

fn fe<F: PrimeField>(f: F) -> FieldElement {
    FieldElement::from_prime_field(f)
}

fn g1_projective(p: &ark_bn254::G1Affine) -> Vec<String> {
    match p.xy() {
        Some((x, y)) => vec![fe(x).to_string(), fe(y).to_string(), "1".to_owned()],
        None => vec!["0".to_owned(), "1".to_owned(), "0".to_owned()],
    }
}

fn g2_projective(p: &ark_bn254::G2Affine) -> Vec<Vec<String>> {
    let pair = |c0: ark_bn254::Fq, c1: ark_bn254::Fq| vec![fe(c0).to_string(), fe(c1).to_string()];
    match p.xy() {
        Some((x, y)) => vec![pair(x.c0, x.c1), pair(y.c0, y.c1), pair(1u64.into(), 0u64.into())],
        None => {
            let zero = ark_bn254::Fq::zero();
            vec![pair(zero, zero), pair(1u64.into(), zero), pair(zero, zero)]
        }
    }
}
