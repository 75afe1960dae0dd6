//! This module defines the [`PublicSignals`] struct that allows loading public signals from JSON files via [`serde::Deserialize`] and [`serde::Serialize`].

use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::CircomFileError;

/// The public signals of a Groth16 proof, as written by snarkjs to `public.json`.
///
/// The order is the order of the circuit's public outputs followed by its public inputs and
/// is significant: the verifier binds each value positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicSignals(
    /// The values of the public signals.
    pub Vec<String>,
);

impl PublicSignals {
    /// Deserializes [`PublicSignals`] from a reader over `public.json` contents.
    pub fn from_reader(reader: impl Read) -> Result<Self, CircomFileError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads [`PublicSignals`] from the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CircomFileError> {
        crate::json_from_path(path)
    }

    /// Consumes `self` and returns the inner values.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Number of public signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no public signals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[String]> for PublicSignals {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for PublicSignals {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
