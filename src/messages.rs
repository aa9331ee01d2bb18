// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The messages and value types exchanged in the J-PAKE protocol

use core::fmt;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::errors::JPakeError;

/// Longest field the length-prefixed challenge encoding can carry
pub(crate) const MAX_FIELD_LEN: usize = u16::MAX as usize;

const RANDOM_SIGNER_ID_LEN: usize = 16;

/// An opaque label distinguishing the two parties of a run. It is bound into
/// every proof, and the two ends must use different ids.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerId(Vec<u8>);

impl SignerId {
    /// Create a signer id from raw bytes
    pub fn new(id: impl Into<Vec<u8>>) -> Result<Self, JPakeError> {
        let id = id.into();
        if id.len() > MAX_FIELD_LEN {
            return Err(JPakeError::FieldTooLong { len: id.len() });
        }
        Ok(Self(id))
    }

    /// Draw a fresh random signer id
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut id = vec![0u8; RANDOM_SIGNER_ID_LEN];
        rng.fill_bytes(&mut id);
        Self(id)
    }

    /// The raw bytes of the id
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignerId").field(&hex::encode(&self.0)).finish()
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(&self.0) {
            Ok(text) => write!(f, "{text:?}"),
            Err(_) => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

impl TryFrom<&str> for SignerId {
    type Error = JPakeError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id.as_bytes())
    }
}

impl TryFrom<&[u8]> for SignerId {
    type Error = JPakeError;

    fn try_from(id: &[u8]) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<Vec<u8>> for SignerId {
    type Error = JPakeError;

    fn try_from(id: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// A non-interactive Schnorr proof of knowledge of a discrete logarithm,
/// bound to the prover's [`SignerId`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zkp {
    /// The commitment `generator^r mod p`
    pub gr: BigUint,
    /// The response `r - exponent * h mod q`
    pub b: BigUint,
    /// The prover's signer id
    pub id: SignerId,
}

/// The first message in the J-PAKE protocol, sent by both parties
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOneMessage {
    /// `g^x1 mod p`
    pub gx1: BigUint,
    /// Proof of knowledge of `x1`
    pub zkp_x1: Zkp,
    /// `g^x2 mod p`
    pub gx2: BigUint,
    /// Proof of knowledge of `x2`
    pub zkp_x2: Zkp,
}

/// The second message in the J-PAKE protocol, sent by both parties
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTwoMessage {
    /// `(gx1 * gx3 * gx4)^(x2 * s) mod p`
    pub a: BigUint,
    /// Proof of knowledge of `x2 * s`
    pub zkp_a: Zkp,
}

/// The shared password, before it is normalized to an integer
#[derive(Clone, Copy, Debug)]
pub enum Password<'a> {
    /// Raw bytes, mapped by [`CipherSuite::normalize_secret`](crate::CipherSuite::normalize_secret)
    Bytes(&'a [u8]),
    /// An integer secret, used as is
    Integer(&'a BigUint),
}

impl<'a> From<&'a str> for Password<'a> {
    fn from(text: &'a str) -> Self {
        Self::Bytes(text.as_bytes())
    }
}

impl<'a> From<&'a String> for Password<'a> {
    fn from(text: &'a String) -> Self {
        Self::Bytes(text.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Password<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Password<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a BigUint> for Password<'a> {
    fn from(secret: &'a BigUint) -> Self {
        Self::Integer(secret)
    }
}

/// The raw shared value `K` produced by a completed run.
///
/// This is not suitable for use as a key directly: pass
/// [`SharedKey::to_bytes_be`] through a key derivation function first.
#[derive(Clone, Debug)]
pub struct SharedKey(pub(crate) BigUint);

impl SharedKey {
    /// The big-endian encoding of `K`
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// `K` as an integer
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes_be().ct_eq(&other.0.to_bytes_be()).into()
    }
}

impl Eq for SharedKey {}
