use std::time::Duration;

use groth16_calldata::{ProofEncoder, ProofSource, VerifierCallArgs};

use crate::{Error, VerificationError, VerificationOracle};

/// Submits encoded proofs to a [`VerificationOracle`].
///
/// The client holds no state besides its timeout; it can be cloned and used for any number
/// of concurrent requests against the same oracle. It never retries.
#[derive(Debug, Clone, Default)]
pub struct VerificationClient {
    timeout: Option<Duration>,
}

impl VerificationClient {
    /// Creates a client without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts oracle calls that take longer than `timeout`.
    ///
    /// A timed out call is reported as [`VerificationError::OracleUnavailable`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Passes `args` to the oracle and returns its verdict verbatim.
    pub async fn verify<O: VerificationOracle>(
        &self,
        args: &VerifierCallArgs,
        oracle: &O,
    ) -> Result<bool, VerificationError> {
        tracing::debug!(
            public_signals = args.public_signals.len(),
            "submitting proof to verification oracle"
        );
        let call = oracle.verify_proof(args);
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, call).await.unwrap_or_else(|_| {
                Err(VerificationError::OracleUnavailable(eyre::eyre!(
                    "oracle did not respond within {timeout:?}"
                )))
            }),
            None => call.await,
        };
        match &result {
            Ok(valid) => tracing::debug!(valid, "verification oracle responded"),
            Err(VerificationError::OracleUnavailable(report)) => {
                tracing::warn!("verification oracle unavailable: {report:#}")
            }
            Err(VerificationError::ArgumentRejected(reason)) => {
                tracing::error!("verification oracle rejected encoded arguments, encoder defect: {reason}")
            }
        }
        result
    }

    /// Encodes `source` with `encoder` and verifies the result.
    pub async fn verify_source<O: VerificationOracle>(
        &self,
        encoder: &ProofEncoder,
        source: &ProofSource,
        oracle: &O,
    ) -> Result<bool, Error> {
        let args = encoder.encode(source)?;
        Ok(self.verify(&args, oracle).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use groth16_calldata::{EncodingError, FieldElement};

    use super::*;
    use crate::{ArkworksOracle, test_circuit::fixture};

    struct FixedOracle(fn() -> Result<bool, VerificationError>);

    impl VerificationOracle for FixedOracle {
        async fn verify_proof(&self, _: &VerifierCallArgs) -> Result<bool, VerificationError> {
            (self.0)()
        }
    }

    #[derive(Default)]
    struct RecordingOracle(Mutex<Vec<VerifierCallArgs>>);

    impl VerificationOracle for RecordingOracle {
        async fn verify_proof(&self, args: &VerifierCallArgs) -> Result<bool, VerificationError> {
            self.0.lock().unwrap().push(args.clone());
            Ok(true)
        }
    }

    struct SlowOracle(Duration);

    impl VerificationOracle for SlowOracle {
        async fn verify_proof(&self, _: &VerifierCallArgs) -> Result<bool, VerificationError> {
            tokio::time::sleep(self.0).await;
            Ok(true)
        }
    }

    fn small_args() -> VerifierCallArgs {
        ProofEncoder::default()
            .from_serialized_calldata("1,2,3,4,5,6,7,8,9,10,11")
            .unwrap()
    }

    #[tokio::test]
    async fn false_is_a_verdict_not_an_error() {
        let client = VerificationClient::new();
        let valid = client
            .verify(&small_args(), &FixedOracle(|| Ok(false)))
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn oracle_errors_are_surfaced() {
        let client = VerificationClient::new();
        let err = client
            .verify(
                &small_args(),
                &FixedOracle(|| Err(VerificationError::ArgumentRejected("bad length".into()))),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::ArgumentRejected(reason) if reason == "bad length"));

        let err = client
            .verify(
                &small_args(),
                &FixedOracle(|| Err(VerificationError::OracleUnavailable(eyre::eyre!("down")))),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::OracleUnavailable(_)));
    }

    #[tokio::test]
    async fn arguments_reach_the_oracle_unchanged() {
        let oracle = RecordingOracle::default();
        let args = small_args();
        VerificationClient::new().verify(&args, &oracle).await.unwrap();
        let seen = oracle.0.lock().unwrap();
        assert_eq!(seen.as_slice(), [args]);
        assert_eq!(
            seen[0].public_signals,
            [9u64, 10, 11].map(FieldElement::from).to_vec()
        );
    }

    #[tokio::test]
    async fn timeout_is_reported_as_unavailable() {
        let client = VerificationClient::new().with_timeout(Duration::from_millis(20));
        let err = client
            .verify(&small_args(), &SlowOracle(Duration::from_secs(5)))
            .await
            .unwrap_err();
        match err {
            VerificationError::OracleUnavailable(report) => {
                assert!(report.to_string().contains("did not respond"))
            }
            other => panic!("expected OracleUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fast_oracle_within_timeout() {
        let client = VerificationClient::new().with_timeout(Duration::from_secs(5));
        assert!(
            client
                .verify(&small_args(), &SlowOracle(Duration::from_millis(1)))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn encoding_errors_surface_before_the_oracle_is_called() {
        let oracle = RecordingOracle::default();
        let err = VerificationClient::new()
            .verify_source(
                &ProofEncoder::default(),
                &ProofSource::serialized("[\"1\",\"2\"]"),
                &oracle,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Encoding(EncodingError::MalformedCalldata(_))
        ));
        assert!(oracle.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_to_end_against_the_reference_oracle() {
        let fixture = fixture();
        let oracle = ArkworksOracle::new(&fixture.vk);
        let client = VerificationClient::new().with_timeout(Duration::from_secs(30));
        let source = ProofSource::serialized(fixture.call_args().to_calldata_string());
        let valid = client
            .verify_source(&ProofEncoder::default().expected_public_inputs(2), &source, &oracle)
            .await
            .unwrap();
        assert!(valid);
    }

    #[tokio::test]
    async fn concurrent_requests_are_independent() {
        let fixture = fixture();
        let oracle = ArkworksOracle::new(&fixture.vk);
        let client = VerificationClient::new();
        let good = fixture.call_args();
        let mut bad = fixture.call_args();
        bad.public_signals[1] = FieldElement::from(2);
        let (good, bad, again) = tokio::join!(
            client.verify(&good, &oracle),
            client.verify(&bad, &oracle),
            client.verify(&good, &oracle),
        );
        assert!(good.unwrap());
        assert!(!bad.unwrap());
        assert!(again.unwrap());
    }
}
