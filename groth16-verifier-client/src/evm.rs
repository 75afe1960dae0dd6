//! A [`VerificationOracle`] backed by a Solidity verifier contract, reached through the
//! `eth_call` method of an EVM JSON-RPC endpoint.

use alloy_primitives::{Address, keccak256};
use groth16_calldata::VerifierCallArgs;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{VerificationError, VerificationOracle};

/// JSON-RPC error code geth and anvil use for reverted calls.
const EXECUTION_REVERTED: i64 = 3;

/// Calls `verifyProof` on a deployed verifier contract.
#[derive(Debug, Clone)]
pub struct EvmVerifierOracle {
    client: reqwest::Client,
    rpc_url: Url,
    address: Address,
    block: String,
}

impl EvmVerifierOracle {
    /// Creates an oracle for the verifier at `address`, queried through `rpc_url` at the
    /// `latest` block.
    pub fn new(rpc_url: Url, address: Address) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url,
            address,
            block: "latest".to_owned(),
        }
    }

    /// Uses a preconfigured HTTP client, e.g. with custom headers or proxies.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Queries the verifier at the given block tag or number instead of `latest`.
    pub fn block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    /// The address of the verifier contract.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Returns the function selector of
/// `verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[N])` for `N` public signals.
///
/// The public-signal array is static, so its length is part of the signature.
pub fn verify_proof_selector(num_public_signals: usize) -> [u8; 4] {
    let signature =
        format!("verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[{num_public_signals}])");
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.0[..4]);
    selector
}

/// ABI-encodes a `verifyProof` call: the selector followed by one 32-byte big-endian word
/// per value, in the order A, B (row-major), C, public signals.
///
/// Fails with [`VerificationError::ArgumentRejected`] if a value does not fit into a
/// `uint256`.
pub fn encode_verify_proof_call(args: &VerifierCallArgs) -> Result<Vec<u8>, VerificationError> {
    let words = args.to_uint256_words().ok_or_else(|| {
        VerificationError::ArgumentRejected("value does not fit into uint256".to_owned())
    })?;
    let mut data = Vec::with_capacity(4 + 32 * words.len());
    data.extend_from_slice(&verify_proof_selector(args.public_signals.len()));
    for word in words {
        data.extend_from_slice(&word.to_be_bytes::<32>());
    }
    Ok(data)
}

#[derive(Serialize)]
struct CallRequest {
    to: String,
    data: String,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallRequest, &'a str),
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

fn unavailable(report: eyre::Report) -> VerificationError {
    VerificationError::OracleUnavailable(report)
}

impl JsonRpcError {
    fn into_verification_error(self) -> VerificationError {
        if self.code == EXECUTION_REVERTED || self.message.to_ascii_lowercase().contains("revert") {
            VerificationError::ArgumentRejected(format!(
                "{} (json-rpc error {})",
                self.message, self.code
            ))
        } else {
            unavailable(eyre::eyre!(
                "json-rpc error {}: {}",
                self.code,
                self.message
            ))
        }
    }
}

/// Decodes the ABI `bool` returned by `verifyProof`.
fn decode_bool(result: &str) -> Result<bool, VerificationError> {
    let bytes = hex::decode(result.trim_start_matches("0x"))
        .map_err(|e| unavailable(eyre::Report::new(e).wrap_err("return data is not hex")))?;
    if bytes.is_empty() {
        return Err(unavailable(eyre::eyre!(
            "empty return data, no verifier deployed at the address"
        )));
    }
    match bytes.as_slice() {
        [head @ .., last] if bytes.len() == 32 && head.iter().all(|b| *b == 0) && *last <= 1 => {
            Ok(*last == 1)
        }
        _ => Err(unavailable(eyre::eyre!(
            "return data 0x{} is not an ABI encoded bool",
            hex::encode(&bytes)
        ))),
    }
}

impl VerificationOracle for EvmVerifierOracle {
    async fn verify_proof(&self, args: &VerifierCallArgs) -> Result<bool, VerificationError> {
        let data = encode_verify_proof_call(args)?;
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallRequest {
                    to: self.address.to_string(),
                    data: format!("0x{}", hex::encode(data)),
                },
                &self.block,
            ),
        };
        tracing::debug!(
            address = %self.address,
            rpc_url = %self.rpc_url,
            public_signals = args.public_signals.len(),
            "dispatching eth_call to verifier"
        );

        let response = self
            .client
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| unavailable(eyre::Report::new(e).wrap_err("eth_call request failed")))?;
        let response = response.json::<JsonRpcResponse>().await.map_err(|e| {
            unavailable(eyre::Report::new(e).wrap_err("invalid json-rpc response"))
        })?;

        match response {
            JsonRpcResponse {
                error: Some(error), ..
            } => Err(error.into_verification_error()),
            JsonRpcResponse {
                result: Some(result),
                ..
            } => decode_bool(&result),
            _ => Err(unavailable(eyre::eyre!(
                "json-rpc response has neither result nor error"
            ))),
        }
    }
}
