//! This module defines types related to Groth16 used in circom and utilities to read these types from files.
mod proof;
mod public_input;

pub use proof::Proof;
pub use public_input::PublicSignals;
