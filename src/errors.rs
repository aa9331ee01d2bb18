// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use crate::messages::SignerId;
use thiserror::Error;

/// The library's error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JPakeError {
    /// An operation was invoked before its prerequisites were met, or after
    /// it had already been consumed
    #[error("Out of sequence: {0}")]
    OutOfSequence(&'static str),
    /// A zero-knowledge proof failed its verification equation
    #[error("Invalid zero-knowledge proof")]
    InvalidProof,
    /// The peer's proof carries the same signer id as the local session
    #[error(
        "Other party uses same signer id ({0}). To avoid replay attacks a different id is \
         required for each end"
    )]
    DuplicateSigner(SignerId),
    /// A peer-supplied group element reduces to a value that would let an
    /// attacker fix the shared key
    #[error("Degenerate group element")]
    DegenerateElement,
    /// The shared secret is empty or reduces to zero in the exponent group
    #[error("Invalid secret")]
    InvalidSecret,
    /// An injected private exponent lies outside its allowed range
    #[error("Private exponent out of range")]
    InvalidExponent,
    /// A custom parameter set failed a structural check
    #[error("Invalid parameters: {0}")]
    InvalidParameters(&'static str),
    /// A field is too long for the length-prefixed challenge encoding
    #[error("Field of {len} bytes exceeds the 65535 byte encoding limit")]
    FieldTooLong {
        /// Length of the offending field in bytes
        len: usize,
    },
}

impl JPakeError {
    /// Returns true for errors raised while checking a peer's proof. The run
    /// must be aborted and never retried with the same data.
    pub fn is_proof_failure(&self) -> bool {
        matches!(self, Self::InvalidProof | Self::DuplicateSigner(_))
    }
}
