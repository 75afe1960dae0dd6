//! This module defines the [`Proof`] struct that allows loading snarkjs Groth16 proofs from JSON files via [`serde::Deserialize`] and [`serde::Serialize`].

use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::CircomFileError;

/// A Groth16 proof in the layout snarkjs writes to `proof.json`.
///
/// The group elements are stored in projective form: `pi_a` and `pi_c` are `[x, y, z]` and
/// `pi_b` is `[[x0, x1], [y0, y1], [z0, z1]]`, with the extension-field pairs of `pi_b` in
/// snarkjs' native `[c0, c1]` order. The homogeneous coordinate is always `1` (or `[1, 0]`)
/// for finite points.
///
/// The coordinates are kept as the numeral strings from the file, no arithmetic is
/// performed on them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Proof element A (G1).
    pub pi_a: Vec<String>,
    /// Proof element B (G2).
    pub pi_b: Vec<Vec<String>>,
    /// Proof element C (G1).
    pub pi_c: Vec<String>,
    /// The proof system, `"groth16"` for files written by snarkjs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// The circom name of the curve, e.g. `"bn128"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

impl Proof {
    /// The protocol name snarkjs writes for Groth16 proofs.
    pub const PROTOCOL: &'static str = "groth16";

    /// Deserializes a [`Proof`] from a reader over `proof.json` contents.
    pub fn from_reader(reader: impl Read) -> Result<Self, CircomFileError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a [`Proof`] from the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CircomFileError> {
        crate::json_from_path(path)
    }

    /// Returns `true` if the proof does not declare a protocol or declares Groth16.
    pub fn is_groth16(&self) -> bool {
        self.protocol
            .as_deref()
            .is_none_or(|protocol| protocol == Self::PROTOCOL)
    }
}
