use circom_proof_types::groth16::{Proof, PublicSignals};
use num_bigint::BigUint;

use crate::{Curve, EncodingError, FieldElement, G1Coordinates, G2Coordinates, VerifierCallArgs};

/// Ordering of the two base-field components of each G2 coordinate in a structured proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum G2Order {
    /// The pairs are already in the order the verifier expects and are passed through.
    #[default]
    Verifier,
    /// The pairs are in snarkjs/arkworks order `[c0, c1]`, as found in `proof.json`.
    /// The Solidity verifier expects `[c1, c0]`, so each pair is swapped.
    Snarkjs,
}

/// The two representations a proof can arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofSource {
    /// A proof object with nested coordinate arrays, plus its public signals.
    Structured {
        /// The proof.
        proof: Proof,
        /// The public signals.
        signals: PublicSignals,
    },
    /// A serialized calldata string as exported by snarkjs.
    Serialized(String),
}

impl ProofSource {
    /// Creates a [`ProofSource::Structured`].
    pub fn structured(proof: Proof, signals: PublicSignals) -> Self {
        Self::Structured { proof, signals }
    }

    /// Creates a [`ProofSource::Serialized`].
    pub fn serialized(calldata: impl Into<String>) -> Self {
        Self::Serialized(calldata.into())
    }
}

/// Translates proofs into [`VerifierCallArgs`].
///
/// The encoder is stateless apart from its configuration and can be shared freely.
#[derive(Debug, Clone)]
pub struct ProofEncoder {
    curve: Curve,
    g2_order: G2Order,
    expected_public_inputs: Option<usize>,
    base_modulus: BigUint,
    scalar_modulus: BigUint,
}

impl Default for ProofEncoder {
    fn default() -> Self {
        Self::new(Curve::default())
    }
}

impl ProofEncoder {
    /// Creates an encoder for `curve` that passes G2 coordinates through unchanged and
    /// accepts any number of public signals.
    pub fn new(curve: Curve) -> Self {
        Self {
            curve,
            g2_order: G2Order::default(),
            expected_public_inputs: None,
            base_modulus: curve.base_field_modulus(),
            scalar_modulus: curve.scalar_field_modulus(),
        }
    }

    /// Sets the G2 ordering of structured proofs.
    pub fn g2_order(mut self, g2_order: G2Order) -> Self {
        self.g2_order = g2_order;
        self
    }

    /// Enforces the circuit's declared number of public inputs.
    pub fn expected_public_inputs(mut self, count: usize) -> Self {
        self.expected_public_inputs = Some(count);
        self
    }

    /// The curve this encoder range-checks against.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Encodes either representation of a proof.
    pub fn encode(&self, source: &ProofSource) -> Result<VerifierCallArgs, EncodingError> {
        match source {
            ProofSource::Structured { proof, signals } => self.from_structured(proof, signals),
            ProofSource::Serialized(calldata) => self.from_serialized_calldata(calldata),
        }
    }

    /// Encodes a proof object and its public signals.
    ///
    /// The homogeneous coordinate of each group element is dropped, G2 pairs are reordered
    /// according to [`G2Order`], and the public signals keep their order.
    pub fn from_structured(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
    ) -> Result<VerifierCallArgs, EncodingError> {
        if !proof.is_groth16() {
            return Err(EncodingError::MalformedProof(format!(
                "unsupported protocol `{}`",
                proof.protocol.as_deref().unwrap_or_default()
            )));
        }
        if let Some(name) = proof.curve.as_deref() {
            if Curve::from_circom_name(name) != Some(self.curve) {
                return Err(EncodingError::MalformedProof(format!(
                    "proof is for curve `{name}` but encoder expects `{}`",
                    self.curve.circom_name()
                )));
            }
        }

        let pi_a = self.g1("pi_a", &proof.pi_a)?;
        let pi_b = self.g2("pi_b", &proof.pi_b)?;
        let pi_c = self.g1("pi_c", &proof.pi_c)?;
        let public_signals = signals
            .as_ref()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                self.signal(s)
                    .map_err(|e| EncodingError::MalformedProof(format!("public_signals[{i}]: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.check_signal_count(public_signals.len())
            .map_err(EncodingError::MalformedProof)?;

        tracing::debug!(
            public_signals = public_signals.len(),
            g2_order = ?self.g2_order,
            "encoded structured proof"
        );
        Ok(VerifierCallArgs {
            pi_a,
            pi_b,
            pi_c,
            public_signals,
        })
    }

    /// Encodes a serialized calldata string such as
    /// `["a","b"],[["c","d"],["e","f"]],["g","h"],["i",...]`.
    ///
    /// Brackets, quotes and whitespace are stripped and the rest is split on commas. The
    /// first eight values are A, B (row-major) and C; the rest are the public signals. The
    /// values are taken positionally and never reordered.
    pub fn from_serialized_calldata(
        &self,
        calldata: &str,
    ) -> Result<VerifierCallArgs, EncodingError> {
        let stripped = calldata
            .chars()
            .filter(|c| !matches!(c, '[' | ']' | '"') && !c.is_whitespace())
            .collect::<String>();
        let tokens = stripped.split(',').map(str::trim).collect::<Vec<_>>();
        if tokens.len() < VerifierCallArgs::PROOF_WORDS {
            return Err(EncodingError::MalformedCalldata(format!(
                "expected at least {} comma separated values, found {}",
                VerifierCallArgs::PROOF_WORDS,
                tokens.len()
            )));
        }

        let (proof_tokens, signal_tokens) = match tokens.split_at(VerifierCallArgs::PROOF_WORDS) {
            // an empty trailing `[]` signal list
            (proof_tokens, [""]) => (proof_tokens, &[][..]),
            split => split,
        };
        let proof_values = proof_tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                self.coordinate(t)
                    .map_err(|e| EncodingError::MalformedCalldata(format!("value {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let public_signals = signal_tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                self.signal(t).map_err(|e| {
                    EncodingError::MalformedCalldata(format!(
                        "value {}: {e}",
                        i + VerifierCallArgs::PROOF_WORDS
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.check_signal_count(public_signals.len())
            .map_err(EncodingError::MalformedCalldata)?;

        let [ax, ay, bx0, bx1, by0, by1, cx, cy]: [FieldElement; 8] = proof_values
            .try_into()
            .map_err(|_| {
                EncodingError::MalformedCalldata("expected exactly eight proof values".to_owned())
            })?;
        tracing::debug!(
            public_signals = public_signals.len(),
            "encoded serialized calldata"
        );
        Ok(VerifierCallArgs {
            pi_a: [ax, ay],
            pi_b: [[bx0, bx1], [by0, by1]],
            pi_c: [cx, cy],
            public_signals,
        })
    }

    fn g1(&self, name: &str, coords: &[String]) -> Result<G1Coordinates, EncodingError> {
        if !(2..=3).contains(&coords.len()) {
            return Err(EncodingError::MalformedProof(format!(
                "{name} must have 2 or 3 coordinates, found {}",
                coords.len()
            )));
        }
        let parse = |i: usize| {
            self.coordinate(&coords[i])
                .map_err(|e| EncodingError::MalformedProof(format!("{name}[{i}]: {e}")))
        };
        Ok([parse(0)?, parse(1)?])
    }

    fn g2(&self, name: &str, rows: &[Vec<String>]) -> Result<G2Coordinates, EncodingError> {
        if !(2..=3).contains(&rows.len()) {
            return Err(EncodingError::MalformedProof(format!(
                "{name} must have 2 or 3 rows, found {}",
                rows.len()
            )));
        }
        let parse_row = |i: usize| {
            let row = &rows[i];
            if row.len() != 2 {
                return Err(EncodingError::MalformedProof(format!(
                    "{name}[{i}] must have 2 coordinates, found {}",
                    row.len()
                )));
            }
            let parse = |j: usize| {
                self.coordinate(&row[j])
                    .map_err(|e| EncodingError::MalformedProof(format!("{name}[{i}][{j}]: {e}")))
            };
            let [c0, c1] = [parse(0)?, parse(1)?];
            Ok(match self.g2_order {
                G2Order::Verifier => [c0, c1],
                G2Order::Snarkjs => [c1, c0],
            })
        };
        Ok([parse_row(0)?, parse_row(1)?])
    }

    fn coordinate(&self, value: &str) -> Result<FieldElement, String> {
        parse_bounded(value, &self.base_modulus, "base")
    }

    fn signal(&self, value: &str) -> Result<FieldElement, String> {
        parse_bounded(value, &self.scalar_modulus, "scalar")
    }

    fn check_signal_count(&self, found: usize) -> Result<(), String> {
        match self.expected_public_inputs {
            Some(expected) if expected != found => Err(format!(
                "expected {expected} public signals, found {found}"
            )),
            _ => Ok(()),
        }
    }
}

fn parse_bounded(value: &str, modulus: &BigUint, field: &str) -> Result<FieldElement, String> {
    let fe = value.parse::<FieldElement>().map_err(|e| e.to_string())?;
    if fe.as_biguint() >= modulus {
        return Err(format!("`{value}` is not below the {field} field modulus"));
    }
    Ok(fe)
}
