use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::FieldElement;

/// Coordinates `(x, y)` of a G1 point.
pub type G1Coordinates = [FieldElement; 2];

/// Coordinates `[[x0, x1], [y0, y1]]` of a G2 point, in the order the verifier expects.
pub type G2Coordinates = [[FieldElement; 2]; 2];

/// The arguments of a Solidity Groth16 verifier's entry point
/// `verifyProof(uint[2] _pA, uint[2][2] _pB, uint[2] _pC, uint[N] _pubSignals)`,
/// in exactly that shape and order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierCallArgs {
    /// Proof element A.
    pub pi_a: G1Coordinates,
    /// Proof element B.
    pub pi_b: G2Coordinates,
    /// Proof element C.
    pub pi_c: G1Coordinates,
    /// The public signals, in circuit order.
    pub public_signals: Vec<FieldElement>,
}

impl VerifierCallArgs {
    /// Number of field elements of the proof part (A, B and C).
    pub const PROOF_WORDS: usize = 8;

    /// Iterates over all values in call order: A, B row by row, C, then the public signals.
    pub fn iter(&self) -> impl Iterator<Item = &FieldElement> {
        self.pi_a
            .iter()
            .chain(self.pi_b.iter().flatten())
            .chain(self.pi_c.iter())
            .chain(self.public_signals.iter())
    }

    /// Converts all values to `uint256` words in call order.
    ///
    /// Returns `None` if a value does not fit into 256 bits, which is only possible for
    /// curves whose fields are wider than the EVM word.
    pub fn to_uint256_words(&self) -> Option<Vec<U256>> {
        self.iter().map(FieldElement::to_u256).collect()
    }

    /// Renders the arguments in the calldata format of snarkjs' `exportSolidityCallData`:
    /// `["0x..","0x.."],[["0x..","0x.."],["0x..","0x.."]],["0x..","0x.."],["0x..",...]`.
    pub fn to_calldata_string(&self) -> String {
        fn pair(values: &[FieldElement; 2]) -> String {
            format!(
                "[\"{}\",\"{}\"]",
                values[0].to_padded_hex(),
                values[1].to_padded_hex()
            )
        }
        let signals = self
            .public_signals
            .iter()
            .map(|s| format!("\"{}\"", s.to_padded_hex()))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{},[{},{}],{},[{signals}]",
            pair(&self.pi_a),
            pair(&self.pi_b[0]),
            pair(&self.pi_b[1]),
            pair(&self.pi_c),
        )
    }
}
