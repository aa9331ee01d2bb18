// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use digest::Digest;
use num_bigint::BigUint;

/// Configures the primitives used by a J-PAKE session:
/// * Hash: the digest used to derive zero-knowledge proof challenges, and
/// * `normalize_secret`: how a byte string password becomes an exponent.
///
/// Both ends of a run must use the same cipher suite.
pub trait CipherSuite {
    /// The hashing function to use for proof challenges
    type Hash: Digest;

    /// Map a password to an integer. The default reads the bytes as a
    /// big-endian integer, which is what other J-PAKE implementations
    /// expect from a raw password.
    fn normalize_secret(secret: &[u8]) -> BigUint {
        BigUint::from_bytes_be(secret)
    }
}

/// The default [`CipherSuite`], based on `Sha1` and a big-endian password
/// encoding, interoperable with the OpenSSL and BouncyCastle J-PAKE
/// implementations
#[derive(Debug)]
pub struct DefaultCipherSuite;
impl CipherSuite for DefaultCipherSuite {
    type Hash = sha1::Sha1;
}
