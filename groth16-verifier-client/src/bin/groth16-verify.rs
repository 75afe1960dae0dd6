use std::{path::PathBuf, process::ExitCode, time::Duration};

use alloy_primitives::Address;
use circom_proof_types::groth16::{Proof, PublicSignals};
use clap::{Args, Parser, Subcommand};
use eyre::Context;
use groth16_calldata::{Curve, G2Order, ProofEncoder, ProofSource};
use groth16_verifier_client::{EvmVerifierOracle, VerificationClient};
use reqwest::Url;
use tracing_subscriber::EnvFilter;

/// Utility tools for encoding Groth16 proofs into the arguments of a Solidity verifier contract and for checking them against a deployed verifier. Proof files are expected in the snarkjs `proof.json`/`public.json` format, calldata strings in the format of `snarkjs zkey export soliditycalldata`.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Config {
    #[clap(subcommand)]
    subcommand: SubCommand,
}

#[derive(Debug, Subcommand)]
enum SubCommand {
    GenerateCall(GenerateCallConfig),
    DecodeCall(DecodeCallConfig),
    Verify(VerifyConfig),
}

#[derive(Debug, Args)]
struct EncoderConfig {
    /// The curve the proof was generated on.
    #[clap(long, default_value_t = Curve::Bn254)]
    pub curve: Curve,
    /// The number of public signals the verifier expects. Not checked if omitted.
    #[clap(long)]
    pub public_inputs: Option<usize>,
}

impl EncoderConfig {
    fn encoder(&self) -> ProofEncoder {
        let encoder = ProofEncoder::new(self.curve).g2_order(G2Order::Snarkjs);
        match self.public_inputs {
            Some(count) => encoder.expected_public_inputs(count),
            None => encoder,
        }
    }
}

#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
struct SourceConfig {
    /// Path to Circom proof.
    #[clap(long, requires = "public", conflicts_with_all = ["calldata", "calldata_file"])]
    pub proof: Option<PathBuf>,
    /// Path to Circom public inputs.
    #[clap(long, requires = "proof")]
    pub public: Option<PathBuf>,
    /// Serialized calldata string.
    #[clap(long, conflicts_with = "calldata_file")]
    pub calldata: Option<String>,
    /// Path to a file containing a serialized calldata string.
    #[clap(long)]
    pub calldata_file: Option<PathBuf>,
}

impl SourceConfig {
    fn load(self) -> eyre::Result<ProofSource> {
        match self {
            SourceConfig {
                proof: Some(proof),
                public: Some(public),
                ..
            } => {
                let proof = Proof::from_path(&proof)
                    .with_context(|| format!("while reading proof {}", proof.display()))?;
                let signals = PublicSignals::from_path(&public)
                    .with_context(|| format!("while reading public inputs {}", public.display()))?;
                Ok(ProofSource::structured(proof, signals))
            }
            SourceConfig {
                calldata: Some(calldata),
                ..
            } => Ok(ProofSource::serialized(calldata)),
            SourceConfig {
                calldata_file: Some(path),
                ..
            } => {
                let calldata = std::fs::read_to_string(&path)
                    .with_context(|| format!("while reading calldata {}", path.display()))?;
                Ok(ProofSource::serialized(calldata))
            }
            _ => eyre::bail!("either --proof and --public or --calldata/--calldata-file is required"),
        }
    }
}

#[derive(Debug, Args)]
struct GenerateCallConfig {
    /// Path to Circom proof.
    #[clap(long)]
    pub proof: PathBuf,
    /// Path to Circom public inputs.
    #[clap(long)]
    pub public: PathBuf,
    /// Location of the output file. Write to stdout if omitted.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub encoder: EncoderConfig,
}

#[derive(Debug, Args)]
struct DecodeCallConfig {
    /// Serialized calldata string.
    #[clap(long, conflicts_with = "calldata_file", required_unless_present = "calldata_file")]
    pub calldata: Option<String>,
    /// Path to a file containing a serialized calldata string.
    #[clap(long)]
    pub calldata_file: Option<PathBuf>,
    #[clap(flatten)]
    pub encoder: EncoderConfig,
}

#[derive(Debug, Args)]
struct VerifyConfig {
    #[clap(flatten)]
    pub source: SourceConfig,
    #[clap(flatten)]
    pub encoder: EncoderConfig,
    /// URL of the EVM JSON-RPC endpoint.
    #[clap(long, env = "VERIFIER_RPC_URL")]
    pub rpc_url: Url,
    /// Address of the deployed verifier contract.
    #[clap(long, env = "VERIFIER_ADDRESS")]
    pub address: Address,
    /// Abort the verification after this many milliseconds.
    #[clap(long)]
    pub timeout_ms: Option<u64>,
}

fn generate_call(config: GenerateCallConfig) -> eyre::Result<ExitCode> {
    let GenerateCallConfig {
        proof,
        public,
        output,
        encoder,
    } = config;
    let proof = Proof::from_path(&proof).context("while parsing proof")?;
    let signals = PublicSignals::from_path(&public).context("while parsing public inputs")?;
    let args = encoder.encoder().from_structured(&proof, &signals)?;
    let result = args.to_calldata_string();
    if let Some(output) = output {
        std::fs::write(output, result).context("while writing output")?;
    } else {
        println!("{result}");
    }
    Ok(ExitCode::SUCCESS)
}

fn decode_call(config: DecodeCallConfig) -> eyre::Result<ExitCode> {
    let DecodeCallConfig {
        calldata,
        calldata_file,
        encoder,
    } = config;
    let calldata = match (calldata, calldata_file) {
        (Some(calldata), _) => calldata,
        (None, Some(path)) => std::fs::read_to_string(path).context("while reading calldata")?,
        (None, None) => eyre::bail!("either --calldata or --calldata-file is required"),
    };
    let args = encoder.encoder().from_serialized_calldata(&calldata)?;
    println!("{}", serde_json::to_string_pretty(&args)?);
    Ok(ExitCode::SUCCESS)
}

async fn verify(config: VerifyConfig) -> eyre::Result<ExitCode> {
    let VerifyConfig {
        source,
        encoder,
        rpc_url,
        address,
        timeout_ms,
    } = config;
    let source = source.load()?;
    let oracle = EvmVerifierOracle::new(rpc_url, address);
    let client = match timeout_ms {
        Some(ms) => VerificationClient::new().with_timeout(Duration::from_millis(ms)),
        None => VerificationClient::new(),
    };
    tracing::info!(%address, curve = %encoder.curve, "verifying proof");
    let valid = client
        .verify_source(&encoder.encoder(), &source, &oracle)
        .await
        .context("while verifying proof")?;
    tracing::info!(valid, "verifier responded");
    println!("The proof is valid: {valid}");
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let config = Config::parse();
    match config.subcommand {
        SubCommand::GenerateCall(config) => generate_call(config),
        SubCommand::DecodeCall(config) => decode_call(config),
        SubCommand::Verify(config) => verify(config).await,
    }
}
