#![warn(missing_docs)]
//! This crate defines the Groth16 artifacts written by circom/snarkjs (`proof.json` and
//! `public.json`) and utilities to read them from files.
//!
//! Values are kept as the numeral strings found in the files. Interpreting them as field
//! elements, including range checks against a field modulus, is left to the consumer, since
//! the same file may be targeted at verifiers with different numeric conventions.
use std::path::Path;

pub mod groth16;

/// Errors that can occur while loading a circom artifact.
#[derive(Debug, thiserror::Error)]
pub enum CircomFileError {
    /// Error during IO operations (reading/opening file, etc.)
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON or does not match the expected layout.
    #[error("invalid circom json: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn json_from_path<T, P>(path: P) -> Result<T, CircomFileError>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading circom artifact");
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
