//! A small BN254 circuit and a real Groth16 proof for it, shared by the tests.
//!
//! The circuit proves knowledge of a password whose salted digest is public:
//! `digest = (password + salt)^3`, with public inputs `[digest, salt]`.

use std::sync::OnceLock;

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, VerifyingKey};
use ark_relations::{
    lc,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError},
};
use ark_snark::SNARK;
use ark_std::rand::{SeedableRng, rngs::StdRng};
use groth16_calldata::{G2Order, ProofEncoder, VerifierCallArgs, ark};

#[derive(Clone)]
pub(crate) struct SaltedPasswordCircuit {
    pub(crate) password: Fr,
    pub(crate) salt: Fr,
}

impl SaltedPasswordCircuit {
    fn salted(&self) -> Fr {
        self.password + self.salt
    }

    pub(crate) fn digest(&self) -> Fr {
        let s = self.salted();
        s * s * s
    }
}

impl ConstraintSynthesizer<Fr> for SaltedPasswordCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let digest = cs.new_input_variable(|| Ok(self.digest()))?;
        let salt = cs.new_input_variable(|| Ok(self.salt))?;
        let password = cs.new_witness_variable(|| Ok(self.password))?;
        let square = cs.new_witness_variable(|| Ok(self.salted() * self.salted()))?;

        let salted = lc!() + password + salt;
        cs.enforce_constraint(salted.clone(), salted.clone(), lc!() + square)?;
        cs.enforce_constraint(lc!() + square, salted, lc!() + digest)?;
        Ok(())
    }
}

pub(crate) struct Fixture {
    pub(crate) vk: VerifyingKey<Bn254>,
    pub(crate) proof: Proof<Bn254>,
    pub(crate) public_inputs: Vec<Fr>,
}

impl Fixture {
    /// The call arguments, encoded from the snarkjs JSON representation of the proof.
    pub(crate) fn call_args(&self) -> VerifierCallArgs {
        ProofEncoder::default()
            .g2_order(G2Order::Snarkjs)
            .expected_public_inputs(2)
            .from_structured(
                &ark::snarkjs_proof(&self.proof),
                &ark::snarkjs_public_signals(&self.public_inputs),
            )
            .unwrap()
    }
}

pub(crate) fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(123456);
        let circuit = SaltedPasswordCircuit {
            password: Fr::from(123456u64),
            salt: Fr::from(1u64),
        };
        let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit.clone(), &mut rng).unwrap();
        let proof = Groth16::<Bn254>::prove(&pk, circuit.clone(), &mut rng).unwrap();
        Fixture {
            vk,
            proof,
            public_inputs: vec![circuit.digest(), circuit.salt],
        }
    })
}
